use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use interactions_bot::config::RegistrationConfig;
use interactions_bot::registration::{CommandManifest, RegistrationClient};

const DEFAULT_MANIFEST: &str = "./config/application_commands.json";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interactions_bot=info".into()),
        )
        .init();

    let config = RegistrationConfig::from_env()?;
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let manifest: CommandManifest = serde_json::from_str(&raw)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let client = RegistrationClient::new(config.bot_token);
    let registered = client
        .bulk_overwrite(&config.application_id, &manifest.global)
        .await
        .context("failed to bulk overwrite application commands")?;

    for command in &registered {
        info!(id = %command.id, name = %command.name, "registered command");
    }
    info!(count = registered.len(), "registered commands");
    Ok(())
}
