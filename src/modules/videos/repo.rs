//! SQLite persistence for videos.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use vitrin_db::codec;
use vitrin_http::error::AppError;
use vitrin_kernel::Paginated;

use super::models::Video;

const COLUMNS: &str = "id, title, url, description, created_at, updated_at";

fn map_row(row: &SqliteRow) -> anyhow::Result<Video> {
    let id: String = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Video {
        id: codec::parse_uuid(&id)?,
        title: row.try_get("title")?,
        url: row.try_get("url")?,
        description: row.try_get("description")?,
        created_at: codec::parse_datetime(&created_at)?,
        updated_at: codec::parse_datetime(&updated_at)?,
    })
}

pub async fn insert(pool: &SqlitePool, video: &Video) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO videos (id, title, url, description, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(video.id.to_string())
    .bind(&video.title)
    .bind(&video.url)
    .bind(&video.description)
    .bind(codec::encode_datetime(&video.created_at))
    .bind(codec::encode_datetime(&video.updated_at))
    .execute(pool)
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(())
}

pub async fn update(pool: &SqlitePool, video: &Video) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE videos SET title = ?, url = ?, description = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&video.title)
    .bind(&video.url)
    .bind(&video.description)
    .bind(codec::encode_datetime(&video.updated_at))
    .bind(video.id.to_string())
    .execute(pool)
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("video not found"));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM videos WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("video not found"));
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool, page: i64, limit: i64) -> Result<Paginated<Video>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM videos ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    let docs = rows
        .iter()
        .map(map_row)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Paginated::new(docs, total as u64, page as u64, limit as u64))
}

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Video>, AppError> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM videos WHERE id = ?"))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(row.as_ref().map(map_row).transpose()?)
}
