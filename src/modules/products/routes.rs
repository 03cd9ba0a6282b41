use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use vitrin_http::error::AppError;
use vitrin_kernel::{AppState, Paginated};

use super::models::{Product, ProductDraft};
use super::repo;
use crate::modules::{clamp_paging, parse_doc_id};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Narrow the listing to one category, addressed by slug.
    pub category: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{slug}", get(get_by_slug).patch(update).delete(remove))
        .with_state(state)
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Product>>, AppError> {
    let (page, limit) = clamp_paging(params.page, params.limit);
    let page = repo::list(&state.db, page, limit, params.category.as_deref()).await?;
    Ok(Json(page))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let doc = draft.into_document(Utc::now())?;
    repo::insert(&state.db, &doc).await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, AppError> {
    repo::find_by_slug(&state.db, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no product with slug '{slug}'")))
}

// Writes address documents by id, reads by slug; both share the one
// path parameter.
async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, AppError> {
    let id = parse_doc_id(&raw_id)?;
    let stored = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("product not found"))?;
    let updated = draft.apply_to(stored, Utc::now())?;
    repo::update(&state.db, &updated).await?;
    Ok(Json(updated))
}

async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_doc_id(&raw_id)?;
    repo::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
