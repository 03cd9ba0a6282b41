//! SQLite persistence for categories.

use serde_json::json;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use vitrin_db::codec;
use vitrin_http::error::AppError;
use vitrin_kernel::Paginated;

use super::models::Category;

const COLUMNS: &str = "id, name, slug, description, image_url, created_at, updated_at";

fn map_row(row: &SqliteRow) -> anyhow::Result<Category> {
    let id: String = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Category {
        id: codec::parse_uuid(&id)?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        created_at: codec::parse_datetime(&created_at)?,
        updated_at: codec::parse_datetime(&updated_at)?,
    })
}

fn map_write_error(err: sqlx::Error) -> AppError {
    if vitrin_db::is_unique_violation(&err) {
        let field = if err.to_string().contains("categories.name") {
            "name"
        } else {
            "slug"
        };
        AppError::conflict(
            vec![json!({"field": field, "error": "already exists"})],
            "a category with this name or slug already exists",
        )
    } else {
        AppError::Internal(err.into())
    }
}

pub async fn insert(pool: &SqlitePool, category: &Category) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO categories (id, name, slug, description, image_url, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(category.id.to_string())
    .bind(&category.name)
    .bind(&category.slug)
    .bind(&category.description)
    .bind(&category.image_url)
    .bind(codec::encode_datetime(&category.created_at))
    .bind(codec::encode_datetime(&category.updated_at))
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

pub async fn update(pool: &SqlitePool, category: &Category) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE categories SET name = ?, slug = ?, description = ?, image_url = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(&category.name)
    .bind(&category.slug)
    .bind(&category.description)
    .bind(&category.image_url)
    .bind(codec::encode_datetime(&category.updated_at))
    .bind(category.id.to_string())
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("category not found"));
    }
    Ok(())
}

/// Delete a category. Fails with a conflict while products still
/// reference it.
pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|err| {
            if vitrin_db::is_foreign_key_violation(&err) {
                AppError::conflict(
                    vec![json!({"field": "id", "error": "referenced by products"})],
                    "category still has products assigned",
                )
            } else {
                AppError::Internal(err.into())
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("category not found"));
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool, page: i64, limit: i64) -> Result<Paginated<Category>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM categories ORDER BY name COLLATE NOCASE LIMIT ? OFFSET ?"
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

/// Every category, for storefront navigation.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Category>, AppError> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM categories ORDER BY name COLLATE NOCASE"
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(rows.iter().map(map_row).collect::<anyhow::Result<Vec<_>>>()?)
}

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Category>, AppError> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM categories WHERE id = ?"))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(row.as_ref().map(map_row).transpose()?)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Category>, AppError> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM categories WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(row.as_ref().map(map_row).transpose()?)
}
