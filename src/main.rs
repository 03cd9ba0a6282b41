use anyhow::Context;
use vitrin_app::bootstrap;
use vitrin_kernel::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load VITRIN settings")?;
    vitrin_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.path,
        "vitrin-app starting"
    );

    bootstrap::run(settings).await
}
