//! SQLite persistence for products.
//!
//! Money columns are TEXT so decimals round-trip exactly; image and
//! specification lists are JSON TEXT columns.

use serde_json::json;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use vitrin_db::codec;
use vitrin_http::error::AppError;
use vitrin_kernel::Paginated;

use super::models::Product;

const COLUMNS: &str = "id, title, slug, category_id, mrp, discount, gst_rate, price, \
                       description, images, specifications, created_at, updated_at";

fn map_row(row: &SqliteRow) -> anyhow::Result<Product> {
    let id: String = row.try_get("id")?;
    let category_id: String = row.try_get("category_id")?;
    let mrp: Option<String> = row.try_get("mrp")?;
    let discount: Option<String> = row.try_get("discount")?;
    let gst_rate: String = row.try_get("gst_rate")?;
    let price: Option<String> = row.try_get("price")?;
    let images: String = row.try_get("images")?;
    let specifications: String = row.try_get("specifications")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Product {
        id: codec::parse_uuid(&id)?,
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        category_id: codec::parse_uuid(&category_id)?,
        mrp: codec::parse_decimal_opt(mrp.as_deref())?,
        discount: codec::parse_decimal_opt(discount.as_deref())?,
        gst_rate: gst_rate.parse()?,
        price: codec::parse_decimal_opt(price.as_deref())?,
        description: row.try_get("description")?,
        images: codec::parse_json(&images)?,
        specifications: codec::parse_json(&specifications)?,
        created_at: codec::parse_datetime(&created_at)?,
        updated_at: codec::parse_datetime(&updated_at)?,
    })
}

fn map_write_error(err: sqlx::Error) -> AppError {
    if vitrin_db::is_unique_violation(&err) {
        AppError::conflict(
            vec![json!({"field": "slug", "error": "already exists"})],
            "a product with this slug already exists",
        )
    } else if vitrin_db::is_foreign_key_violation(&err) {
        AppError::validation(
            vec![json!({"field": "category_id", "error": "category does not exist"})],
            "product failed validation",
        )
    } else {
        AppError::Internal(err.into())
    }
}

pub async fn insert(pool: &SqlitePool, product: &Product) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO products (id, title, slug, category_id, mrp, discount, gst_rate, price, \
         description, images, specifications, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(product.id.to_string())
    .bind(&product.title)
    .bind(&product.slug)
    .bind(product.category_id.to_string())
    .bind(product.mrp.as_ref().map(codec::encode_decimal))
    .bind(product.discount.as_ref().map(codec::encode_decimal))
    .bind(product.gst_rate.as_str())
    .bind(product.price.as_ref().map(codec::encode_decimal))
    .bind(&product.description)
    .bind(codec::encode_json(&product.images)?)
    .bind(codec::encode_json(&product.specifications)?)
    .bind(codec::encode_datetime(&product.created_at))
    .bind(codec::encode_datetime(&product.updated_at))
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

pub async fn update(pool: &SqlitePool, product: &Product) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE products SET title = ?, slug = ?, category_id = ?, mrp = ?, discount = ?, \
         gst_rate = ?, price = ?, description = ?, images = ?, specifications = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(&product.title)
    .bind(&product.slug)
    .bind(product.category_id.to_string())
    .bind(product.mrp.as_ref().map(codec::encode_decimal))
    .bind(product.discount.as_ref().map(codec::encode_decimal))
    .bind(product.gst_rate.as_str())
    .bind(product.price.as_ref().map(codec::encode_decimal))
    .bind(&product.description)
    .bind(codec::encode_json(&product.images)?)
    .bind(codec::encode_json(&product.specifications)?)
    .bind(codec::encode_datetime(&product.updated_at))
    .bind(product.id.to_string())
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("product not found"));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("product not found"));
    }
    Ok(())
}

/// Newest-first page of products, optionally narrowed to a category
/// slug. An unknown slug yields an empty page rather than an error.
pub async fn list(
    pool: &SqlitePool,
    page: i64,
    limit: i64,
    category_slug: Option<&str>,
) -> Result<Paginated<Product>, AppError> {
    let (total, rows) = match category_slug {
        Some(slug) => {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM products WHERE category_id = \
                 (SELECT id FROM categories WHERE slug = ?)",
            )
            .bind(slug)
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

            let rows = sqlx::query(&format!(
                "SELECT {COLUMNS} FROM products WHERE category_id = \
                 (SELECT id FROM categories WHERE slug = ?) \
                 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
            ))
            .bind(slug)
            .bind(limit)
            .bind((page - 1) * limit)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

            (total, rows)
        }
        None => {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
                .fetch_one(pool)
                .await
                .map_err(|e| AppError::Internal(e.into()))?;

            let rows = sqlx::query(&format!(
                "SELECT {COLUMNS} FROM products \
                 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
            ))
            .bind(limit)
            .bind((page - 1) * limit)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

            (total, rows)
        }
    };

    let docs = rows
        .iter()
        .map(map_row)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Paginated::new(docs, total as u64, page as u64, limit as u64))
}

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Product>, AppError> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(row.as_ref().map(map_row).transpose()?)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Product>, AppError> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM products WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(row.as_ref().map(map_row).transpose()?)
}
