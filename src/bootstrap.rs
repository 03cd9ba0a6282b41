//! Application bootstrap: registry assembly, migrations and serving.

use anyhow::Context;
use vitrin_kernel::{AppState, InitCtx, ModuleRegistry, Settings};

use crate::modules;

/// Assemble the full module registry in boot order.
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Apply every pending module migration and return how many ran.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let registry = build_registry();
    let pool = vitrin_db::connect(&settings.database)
        .await
        .context("failed to open database")?;

    vitrin_db::run_migrations(&pool, &registry.collect_migrations())
        .await
        .context("failed to run migrations")
}

/// Run the application: init modules, migrate, serve until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry();

    let pool = vitrin_db::connect(&settings.database)
        .await
        .context("failed to open database")?;

    {
        let ctx = InitCtx {
            settings: &settings,
            db: &pool,
        };
        registry.init_modules(&ctx).await?;

        let applied = vitrin_db::run_migrations(&pool, &registry.collect_migrations())
            .await
            .context("failed to run migrations")?;
        tracing::info!(applied, "database migrations complete");

        registry.start_modules(&ctx).await?;
    }

    let state = AppState::new(settings, pool);
    vitrin_http::start_server(&registry, state).await?;

    registry.stop_modules().await?;

    Ok(())
}
