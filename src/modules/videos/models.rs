use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use vitrin_http::error::AppError;

/// A gallery video, addressed by its watch URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    /// YouTube or Vimeo watch URL
    pub url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for creating or patching a video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoDraft {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl VideoDraft {
    pub fn into_document(self, now: DateTime<Utc>) -> Result<Video, AppError> {
        let (title, url) = validate(self.title.as_deref(), self.url.as_deref())?;

        Ok(Video {
            id: Uuid::now_v7(),
            title,
            url,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_to(self, stored: Video, now: DateTime<Utc>) -> Result<Video, AppError> {
        let title = self.title.unwrap_or(stored.title);
        let url = self.url.unwrap_or(stored.url);
        let (title, url) = validate(Some(&title), Some(&url))?;
        let description = match self.description {
            Some(d) => {
                let d = d.trim().to_string();
                (!d.is_empty()).then_some(d)
            }
            None => stored.description,
        };

        Ok(Video {
            id: stored.id,
            title,
            url,
            description,
            created_at: stored.created_at,
            updated_at: now,
        })
    }
}

fn validate(title: Option<&str>, url: Option<&str>) -> Result<(String, String), AppError> {
    let mut errors = Vec::new();
    let title = match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            errors.push(json!({"field": "title", "error": "required"}));
            String::new()
        }
    };
    let url = match url.map(str::trim) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => {
            errors.push(json!({"field": "url", "error": "required"}));
            String::new()
        }
    };
    if !errors.is_empty() {
        return Err(AppError::validation(errors, "video failed validation"));
    }
    Ok((title, url))
}
