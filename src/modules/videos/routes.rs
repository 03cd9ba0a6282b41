use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use vitrin_http::error::AppError;
use vitrin_kernel::{AppState, Paginated};

use super::models::{Video, VideoDraft};
use super::repo;
use crate::modules::{clamp_paging, parse_doc_id};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).patch(update).delete(remove))
        .with_state(state)
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Video>>, AppError> {
    let (page, limit) = clamp_paging(params.page, params.limit);
    Ok(Json(repo::list(&state.db, page, limit).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<VideoDraft>,
) -> Result<(StatusCode, Json<Video>), AppError> {
    let doc = draft.into_document(Utc::now())?;
    repo::insert(&state.db, &doc).await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Video>, AppError> {
    let id = parse_doc_id(&raw_id)?;
    repo::find_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("video not found"))
}

async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(draft): Json<VideoDraft>,
) -> Result<Json<Video>, AppError> {
    let id = parse_doc_id(&raw_id)?;
    let stored = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("video not found"))?;
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
