//! HTTP server facade for VITRIN with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use vitrin_kernel::{AppState, ModuleRegistry};

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
///
/// Serves until a shutdown signal (ctrl-c or SIGTERM) arrives, then
/// returns so the caller can stop modules.
pub async fn start_server(registry: &ModuleRegistry, state: AppState) -> anyhow::Result<()> {
    let host = state.settings.server.host.clone();
    let port = state.settings.server.port;

    tracing::info!("starting HTTP server on {}:{}", host, port);

    // Build the main router
    let app = build_router(registry, state)
        .await
        .context("failed to build HTTP router")?;

    // Create the server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .context("failed to bind to address")?;

    tracing::info!("HTTP server listening on http://{}:{}", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes and pages mounted
pub async fn build_router(registry: &ModuleRegistry, state: AppState) -> anyhow::Result<Router> {
    // Add health check route
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    // Mount module API routes and server-rendered pages
    for module in registry.modules() {
        let module_name = module.name();

        if let Some(module_router) = module.routes(state.clone()) {
            tracing::info!(
                module = module_name,
                "mounting module routes under /api/{}",
                module_name
            );
            router_builder = router_builder.mount_module(module_name, module_router);
        }

        if let Some(pages) = module.pages(state.clone()) {
            tracing::info!(module = module_name, "mounting module pages at root");
            router_builder = router_builder.mount_pages(pages);
        }
    }

    // Add OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    // Layers only wrap routes registered before them, so they go last
    router_builder = router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(state.settings.server.request_timeout_ms);

    Ok(router_builder.build())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
