//! Logging and tracing bootstrap.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use vitrin_kernel::settings::{LogFormat, TelemetrySettings};

const DEFAULT_DIRECTIVE: &str = "info,sqlx=warn";

/// Resolve the filter directive: configured value, then `RUST_LOG`, then
/// the default.
fn directive_from(settings: &TelemetrySettings, env_directive: Option<String>) -> String {
    settings
        .directive
        .clone()
        .or(env_directive)
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

/// Install the global tracing subscriber.
///
/// Idempotent: a subscriber installed earlier (e.g. by a test harness)
/// wins and the call becomes a no-op.
pub fn init(settings: &TelemetrySettings) {
    let directive = directive_from(settings, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::new(directive);
    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .ok(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .ok(),
    };
}
