use anyhow::Context;
use clap::{Parser, Subcommand};
use vitrin_kernel::Settings;

#[derive(Parser)]
#[command(name = "vitrin", version, about = "Catalog storefront server and tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations, then serve HTTP until shutdown
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// List registered modules
    Modules,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load VITRIN settings")?;
    vitrin_telemetry::init(&settings.telemetry);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => vitrin_app::bootstrap::run(settings).await,
        Command::Migrate => {
            let applied = vitrin_app::bootstrap::migrate(&settings).await?;
            println!("applied {applied} migrations");
            Ok(())
        }
        Command::Modules => {
            let registry = vitrin_app::build_registry();
            for module in registry.modules() {
                println!(
                    "{} ({} migrations)",
                    module.name(),
                    module.migrations().len()
                );
            }
            Ok(())
        }
    }
}
