//! Single-row persistence for the company settings document.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use vitrin_db::codec;
use vitrin_http::error::AppError;

use super::models::{CompanySettings, ContactInfo};

fn map_row(row: &SqliteRow) -> anyhow::Result<CompanySettings> {
    let social_links: String = row.try_get("social_links")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(CompanySettings {
        site_title: row.try_get("site_title")?,
        gst_no: row.try_get("gst_no")?,
        msme_no: row.try_get("msme_no")?,
        contact: ContactInfo {
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
        },
        google_maps_link: row.try_get("google_maps_link")?,
        social_links: codec::parse_json(&social_links)?,
        updated_at: Some(codec::parse_datetime(&updated_at)?),
    })
}

/// Load the settings document, or the built-in defaults when nothing
/// has been saved yet.
pub async fn load(pool: &SqlitePool) -> Result<CompanySettings, AppError> {
    let row = sqlx::query(
        "SELECT site_title, gst_no, msme_no, phone, email, address, google_maps_link, \
         social_links, updated_at FROM company_settings WHERE id = 1",
    )
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    match row.as_ref() {
        Some(row) => Ok(map_row(row)?),
        None => Ok(CompanySettings::default()),
    }
}

/// Upsert the singleton row.
pub async fn save(pool: &SqlitePool, settings: &CompanySettings) -> Result<(), AppError> {
    let updated_at = settings.updated_at.unwrap_or_else(chrono::Utc::now);

    sqlx::query(
        "INSERT INTO company_settings \
         (id, site_title, gst_no, msme_no, phone, email, address, google_maps_link, \
          social_links, updated_at) \
         VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET \
         site_title = excluded.site_title, gst_no = excluded.gst_no, \
         msme_no = excluded.msme_no, phone = excluded.phone, email = excluded.email, \
         address = excluded.address, google_maps_link = excluded.google_maps_link, \
         social_links = excluded.social_links, updated_at = excluded.updated_at",
    )
    .bind(&settings.site_title)
    .bind(&settings.gst_no)
    .bind(&settings.msme_no)
    .bind(&settings.contact.phone)
    .bind(&settings.contact.email)
    .bind(&settings.contact.address)
    .bind(&settings.google_maps_link)
    .bind(codec::encode_json(&settings.social_links)?)
    .bind(codec::encode_datetime(&updated_at))
    .execute(pool)
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(())
}
