use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use vitrin_http::error::AppError;
use vitrin_kernel::AppState;

use super::models::{CompanySettings, CompanySettingsDraft};
use super::repo;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(fetch).put(replace))
        .with_state(state)
}

async fn fetch(State(state): State<AppState>) -> Result<Json<CompanySettings>, AppError> {
    Ok(Json(repo::load(&state.db).await?))
}

async fn replace(
    State(state): State<AppState>,
    Json(draft): Json<CompanySettingsDraft>,
) -> Result<Json<CompanySettings>, AppError> {
    let doc = draft.into_document(Utc::now())?;
    repo::save(&state.db, &doc).await?;
    Ok(Json(doc))
}
