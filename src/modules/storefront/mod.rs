pub mod routes;
pub mod views;

use async_trait::async_trait;
use axum::Router;
use vitrin_kernel::{AppState, InitCtx, Module};

/// Server-rendered public site: home, catalog, product detail, video
/// gallery and contact pages. Reads the same tables the collection
/// APIs write; owns no schema of its own.
pub struct StorefrontModule;

impl StorefrontModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for StorefrontModule {
    fn name(&self) -> &'static str {
        "storefront"
    }

    fn pages(&self, state: AppState) -> Option<Router> {
        Some(routes::router(state))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "storefront pages mounted at /");
        Ok(())
    }
}

/// Create a new instance of the storefront module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(StorefrontModule::new())
}
