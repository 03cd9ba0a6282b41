use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use vitrin_http::error::AppError;

use crate::hooks::slug::resolve_slug;

/// A product category as stored and served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category
    pub id: Uuid,
    /// Display name, unique across categories
    pub name: String,
    /// URL-friendly slug, unique across categories
    pub slug: String,
    /// Optional blurb shown on the storefront
    pub description: Option<String>,
    /// Thumbnail for category cards
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for creating or patching a category.
///
/// Every field is optional; `into_document` and `apply_to` decide what
/// missing fields mean. The slug is derived from the name when the
/// client does not send one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryDraft {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CategoryDraft {
    /// Validate the draft and materialize a new document.
    pub fn into_document(self, now: DateTime<Utc>) -> Result<Category, AppError> {
        let name = validate_name(self.name.as_deref())?;
        let slug = resolve_slug(self.slug.as_deref(), Some(&name), None).unwrap_or_default();

        Ok(Category {
            id: Uuid::now_v7(),
            name,
            slug,
            description: normalize_optional(self.description),
            image_url: normalize_optional(self.image_url),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the patch over a stored document and re-validate.
    ///
    /// The slug is re-derived from the (possibly patched) name unless
    /// the patch carries an explicit slug, so renaming a category moves
    /// its URL with it.
    pub fn apply_to(self, stored: Category, now: DateTime<Utc>) -> Result<Category, AppError> {
        let draft_name = self.name;
        let name = match &draft_name {
            Some(name) => validate_name(Some(name))?,
            None => stored.name.clone(),
        };
        let slug = resolve_slug(
            self.slug.as_deref(),
            draft_name.as_deref(),
            Some(&stored.name),
        )
        .unwrap_or(stored.slug);
        let description = match self.description {
            Some(d) => normalize_optional(Some(d)),
            None => stored.description,
        };
        let image_url = match self.image_url {
            Some(u) => normalize_optional(Some(u)),
            None => stored.image_url,
        };

        Ok(Category {
            id: stored.id,
            name,
            slug,
            description,
            image_url,
            created_at: stored.created_at,
            updated_at: now,
        })
    }
}

fn validate_name(name: Option<&str>) -> Result<String, AppError> {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => Ok(n.to_string()),
        _ => Err(AppError::validation(
            vec![json!({"field": "name", "error": "required"})],
            "category failed validation",
        )),
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_derives_slug_from_name() {
        let draft = CategoryDraft {
            name: Some("Circuit Breakers".to_string()),
            ..Default::default()
        };
        let doc = draft.into_document(Utc::now()).unwrap();
        assert_eq!(doc.name, "Circuit Breakers");
        assert_eq!(doc.slug, "circuit-breakers");
        assert_eq!(doc.description, None);
    }

    #[test]
    fn test_create_explicit_slug_is_normalized() {
        let draft = CategoryDraft {
            name: Some("Switchgear".to_string()),
            slug: Some("Custom SLUG!".to_string()),
            ..Default::default()
        };
        let doc = draft.into_document(Utc::now()).unwrap();
        assert_eq!(doc.slug, "custom-slug");
    }

    #[test]
    fn test_create_without_name_is_rejected() {
        let err = CategoryDraft::default().into_document(Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let blank = CategoryDraft {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.into_document(Utc::now()).is_err());
    }

    #[test]
    fn test_patch_rename_moves_slug() {
        let stored = CategoryDraft {
            name: Some("Old Name".to_string()),
            ..Default::default()
        }
        .into_document(Utc::now())
        .unwrap();

        let patch = CategoryDraft {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let updated = patch.apply_to(stored.clone(), Utc::now()).unwrap();
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.slug, "new-name");
        assert_eq!(updated.created_at, stored.created_at);
    }

    #[test]
    fn test_patch_without_fields_keeps_document() {
        let stored = CategoryDraft {
            name: Some("Panels".to_string()),
            description: Some("Power panels".to_string()),
            ..Default::default()
        }
        .into_document(Utc::now())
        .unwrap();

        let updated = CategoryDraft::default()
            .apply_to(stored.clone(), Utc::now())
            .unwrap();
        assert_eq!(updated.name, "Panels");
        assert_eq!(updated.slug, "panels");
        assert_eq!(updated.description.as_deref(), Some("Power panels"));
    }

    #[test]
    fn test_patch_clears_description_with_empty_string() {
        let stored = CategoryDraft {
            name: Some("Panels".to_string()),
            description: Some("Power panels".to_string()),
            ..Default::default()
        }
        .into_document(Utc::now())
        .unwrap();

        let patch = CategoryDraft {
            description: Some("".to_string()),
            ..Default::default()
        };
        let updated = patch.apply_to(stored, Utc::now()).unwrap();
        assert_eq!(updated.description, None);
    }
}
