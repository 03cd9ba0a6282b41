use std::sync::Arc;

use sqlx::SqlitePool;

use crate::settings::Settings;

/// Shared application state cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(settings: Settings, db: SqlitePool) -> Self {
        Self {
            settings: Arc::new(settings),
            db,
        }
    }
}
