//! Ladle CLI entry point.

use anyhow::Result;
use clap::Parser;
use ladle::cli::{commands, Cli, Commands};
use ladle::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ladle={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    std::fs::create_dir_all(settings.data_dir())?;

    match &cli.command {
        Commands::Quote {
            volume,
            suppliers,
            json,
        } => {
            commands::run_quote(*volume, suppliers.as_deref(), *json, &settings)?;
        }

        Commands::Transport { distance, volume } => {
            commands::run_transport(*distance, *volume)?;
        }

        Commands::Tariff { base_cost, canadian } => {
            commands::run_tariff(*base_cost, *canadian)?;
        }

        Commands::Ask {
            task,
            with_suppliers,
            suppliers,
            model,
        } => {
            commands::run_ask(task, *with_suppliers, suppliers.clone(), model.clone(), settings)
                .await?;
        }

        Commands::Research { question, model } => {
            commands::run_research(question.clone(), model.clone(), settings).await?;
        }

        Commands::Memory { action } => {
            commands::run_memory(action, &settings).await?;
        }

        Commands::Doctor => {
            let path = config_path.unwrap_or_else(Settings::default_config_path);
            commands::run_doctor(&settings, &path).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path)?;
        }
    }

    Ok(())
}
