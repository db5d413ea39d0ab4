use anyhow::{Context, Result};
use tracing::info;

use interactions_bot::{
    commands, config::Config, web_api, Ed25519Validator, InteractionDispatcher,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interactions_bot=info,tower_http=info".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    let validator =
        Ed25519Validator::from_hex(&config.public_key).context("failed to decode public key")?;
    let registry = commands::default_registry(&config.command_settings())
        .context("failed to build http client")?;

    let dispatcher = InteractionDispatcher::new(validator, registry)
        .with_body_limit(config.max_body_bytes)
        .with_handler_timeout(config.handler_timeout);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = commands::BUILD_HASH,
        built = %commands::formatted_build_date(),
        commands = ?dispatcher.registry().names(),
        "starting interactions api"
    );

    web_api::run_http_server(config.bind_address(), web_api::AppState::new(dispatcher))
        .await
        .context("http server failed")
}
