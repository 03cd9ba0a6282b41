use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use vitrin_http::error::AppError;

use crate::hooks::price::derive_price;
use crate::hooks::slug::resolve_slug;

/// GST slab applicable to a product. Stored and serialized as the
/// string-encoded percentage, matching the catalog's editing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GstRate {
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "12")]
    Twelve,
    #[default]
    #[serde(rename = "18")]
    Eighteen,
    #[serde(rename = "28")]
    TwentyEight,
}

impl GstRate {
    pub fn as_str(self) -> &'static str {
        match self {
            GstRate::Five => "5",
            GstRate::Twelve => "12",
            GstRate::Eighteen => "18",
            GstRate::TwentyEight => "28",
        }
    }

    /// Percentage value for the price hook.
    pub fn as_percent(self) -> Decimal {
        match self {
            GstRate::Five => Decimal::from(5),
            GstRate::Twelve => Decimal::from(12),
            GstRate::Eighteen => Decimal::from(18),
            GstRate::TwentyEight => Decimal::from(28),
        }
    }
}

impl FromStr for GstRate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5" => Ok(GstRate::Five),
            "12" => Ok(GstRate::Twelve),
            "18" => Ok(GstRate::Eighteen),
            "28" => Ok(GstRate::TwentyEight),
            other => Err(anyhow::anyhow!("unknown GST rate '{other}'")),
        }
    }
}

impl fmt::Display for GstRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// One technical specification row, e.g. Voltage / 440V.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

/// A catalog product as stored and served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    /// URL-friendly slug, unique across products
    pub slug: String,
    pub category_id: Uuid,
    /// Maximum retail price; absent means "price on request"
    pub mrp: Option<Decimal>,
    /// Discount percent off the MRP
    pub discount: Option<Decimal>,
    pub gst_rate: GstRate,
    /// Derived sale price. Recomputed on every write, never taken
    /// from client input.
    pub price: Option<Decimal>,
    pub description: String,
    pub images: Vec<ProductImage>,
    pub specifications: Vec<Specification>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Distinguish a field sent as `null` (clear it) from a field left out
/// of the payload (keep the stored value). Absent fields never reach
/// this deserializer; `#[serde(default)]` covers them.
fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Client payload for creating or patching a product.
///
/// There is deliberately no `price` field: clients cannot set the
/// derived price, and any `price` key in the payload is dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub mrp: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub discount: Option<Option<Decimal>>,
    pub gst_rate: Option<GstRate>,
    pub description: Option<String>,
    pub images: Option<Vec<ProductImage>>,
    pub specifications: Option<Vec<Specification>>,
}

impl ProductDraft {
    /// Validate the draft and materialize a new document, running the
    /// slug and price hooks.
    pub fn into_document(self, now: DateTime<Utc>) -> Result<Product, AppError> {
        let mut errors = Vec::new();

        let title = require_text(self.title.as_deref(), "title", &mut errors);
        let category_id = match self.category_id {
            Some(id) => id,
            None => {
                errors.push(json!({"field": "category_id", "error": "required"}));
                Uuid::nil()
            }
        };
        let description = require_text(self.description.as_deref(), "description", &mut errors);
        let mrp = self.mrp.flatten();
        let discount = self.discount.flatten();
        let images = self.images.unwrap_or_default();
        let specifications = self.specifications.unwrap_or_default();

        check_pricing(mrp, discount, &mut errors);
        check_attachments(&images, &specifications, &mut errors);
        if !errors.is_empty() {
            return Err(AppError::validation(errors, "product failed validation"));
        }

        let gst_rate = self.gst_rate.unwrap_or_default();
        let slug = resolve_slug(self.slug.as_deref(), Some(&title), None).unwrap_or_default();
        let price = derive_price(mrp, discount, Some(gst_rate.as_percent()));

        Ok(Product {
            id: Uuid::now_v7(),
            title,
            slug,
            category_id,
            mrp,
            discount,
            gst_rate,
            price,
            description,
            images,
            specifications,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the patch over a stored document, re-validate, and re-run
    /// both hooks on the merged values. The price always reflects the
    /// merged mrp/discount/gst, and the slug follows the title unless
    /// an explicit slug is sent.
    pub fn apply_to(self, stored: Product, now: DateTime<Utc>) -> Result<Product, AppError> {
        let mut errors = Vec::new();

        let draft_title = self.title;
        let title = match draft_title.as_deref() {
            Some(t) => require_text(Some(t), "title", &mut errors),
            None => stored.title.clone(),
        };
        let category_id = self.category_id.unwrap_or(stored.category_id);
        let mrp = match self.mrp {
            Some(patched) => patched,
            None => stored.mrp,
        };
        let discount = match self.discount {
            Some(patched) => patched,
            None => stored.discount,
        };
        let gst_rate = self.gst_rate.unwrap_or(stored.gst_rate);
        let description = match self.description.as_deref() {
            Some(d) => require_text(Some(d), "description", &mut errors),
            None => stored.description,
        };
        let images = self.images.unwrap_or(stored.images);
        let specifications = self.specifications.unwrap_or(stored.specifications);

        check_pricing(mrp, discount, &mut errors);
        check_attachments(&images, &specifications, &mut errors);
        if !errors.is_empty() {
            return Err(AppError::validation(errors, "product failed validation"));
        }

        let slug = resolve_slug(
            self.slug.as_deref(),
            draft_title.as_deref(),
            Some(&stored.title),
        )
        .unwrap_or(stored.slug);
        let price = derive_price(mrp, discount, Some(gst_rate.as_percent()));

        Ok(Product {
            id: stored.id,
            title,
            slug,
            category_id,
            mrp,
            discount,
            gst_rate,
            price,
            description,
            images,
            specifications,
            created_at: stored.created_at,
            updated_at: now,
        })
    }
}

fn require_text(
    value: Option<&str>,
    field: &'static str,
    errors: &mut Vec<serde_json::Value>,
) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(json!({"field": field, "error": "required"}));
            String::new()
        }
    }
}

fn check_pricing(
    mrp: Option<Decimal>,
    discount: Option<Decimal>,
    errors: &mut Vec<serde_json::Value>,
) {
    if let Some(mrp) = mrp {
        if mrp < Decimal::ZERO {
            errors.push(json!({"field": "mrp", "error": "must not be negative"}));
        }
    }
    if let Some(discount) = discount {
        if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
            errors.push(json!({"field": "discount", "error": "must be between 0 and 100"}));
        }
    }
}

fn check_attachments(
    images: &[ProductImage],
    specifications: &[Specification],
    errors: &mut Vec<serde_json::Value>,
) {
    if images.iter().any(|i| i.url.trim().is_empty()) {
        errors.push(json!({"field": "images", "error": "every image needs a url"}));
    }
    if specifications
        .iter()
        .any(|s| s.label.trim().is_empty() || s.value.trim().is_empty())
    {
        errors.push(json!({"field": "specifications", "error": "label and value are required"}));
    }
}
