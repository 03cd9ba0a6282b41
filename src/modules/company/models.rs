use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use vitrin_http::error::AppError;

/// Fallback site title served before the settings document has ever
/// been saved.
pub const DEFAULT_SITE_TITLE: &str = "Demo Electricals";

/// Social platforms the footer knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialPlatform {
    Facebook,
    YouTube,
    Instagram,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Comma-separated phone numbers; the first one is the WhatsApp
    /// contact.
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Site-wide settings, a singleton document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySettings {
    pub site_title: String,
    pub gst_no: Option<String>,
    pub msme_no: Option<String>,
    pub contact: ContactInfo,
    pub google_maps_link: Option<String>,
    pub social_links: Vec<SocialLink>,
    /// Absent until the document has been saved once.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            site_title: DEFAULT_SITE_TITLE.to_string(),
            gst_no: None,
            msme_no: None,
            contact: ContactInfo::default(),
            google_maps_link: None,
            social_links: Vec::new(),
            updated_at: None,
        }
    }
}

/// Full-replace payload for PUT. A missing `site_title` falls back to
/// the default; an explicitly empty one is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanySettingsDraft {
    pub site_title: Option<String>,
    pub gst_no: Option<String>,
    pub msme_no: Option<String>,
    #[serde(default)]
    pub contact: ContactInfo,
    pub google_maps_link: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl CompanySettingsDraft {
    pub fn into_document(self, now: DateTime<Utc>) -> Result<CompanySettings, AppError> {
        let site_title = match self.site_title.map(|t| t.trim().to_string()) {
            None => DEFAULT_SITE_TITLE.to_string(),
            Some(t) if t.is_empty() => {
                return Err(AppError::validation(
                    vec![json!({"field": "site_title", "error": "required"})],
                    "company settings failed validation",
                ))
            }
            Some(t) => t,
        };

        Ok(CompanySettings {
            site_title,
            gst_no: normalize(self.gst_no),
            msme_no: normalize(self.msme_no),
            contact: ContactInfo {
                phone: normalize(self.contact.phone),
                email: normalize(self.contact.email),
                address: normalize(self.contact.address),
            },
            google_maps_link: normalize(self.google_maps_link),
            social_links: self.social_links,
            updated_at: Some(now),
        })
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
