mod cli;
mod commands;

use anon_api::Client;
use anon_config::Config;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    let base_url = cli
        .server
        .unwrap_or_else(|| config.server.base_url.clone());
    let client = Client::new(base_url)?;

    match cli.command {
        cli::Commands::Run {
            text,
            file,
            level,
            mode,
            auto_suggest,
            highlighted,
            save,
            output,
        } => {
            let level = commands::resolve_level(level, &config)?;
            let mode = commands::resolve_mode(mode, &config)?;
            commands::run::handle(
                &client,
                commands::run::RunOptions {
                    text,
                    file,
                    level,
                    mode,
                    auto_suggest,
                    highlighted,
                    save,
                    output,
                },
            )
            .await
        }
        cli::Commands::Extract { file } => commands::extract::handle(&client, file).await,
        cli::Commands::Review {
            text,
            file,
            level,
            mode,
        } => {
            let level = commands::resolve_level(level, &config)?;
            let mode = commands::resolve_mode(mode, &config)?;
            commands::review::handle(client, text, file, level, mode).await
        }
        cli::Commands::Download {
            record_id,
            format,
            output,
        } => commands::download::handle(&client, record_id, format, output).await,
    }
}
