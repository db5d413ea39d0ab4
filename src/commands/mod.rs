//! The bot's slash commands and the registry that binds them to their names.

pub mod checkem;
pub mod mdn;
pub mod progress;
pub mod words;

use std::time::Duration;

use chrono::DateTime;

use crate::context::InteractionContext;
use crate::errors::CommandError;
use crate::registry::CommandRegistry;
use crate::types::InteractionResponse;

use self::mdn::{DocSearch, MdnSearch};

pub const BUILD_HASH: &str = match option_env!("BUILD_HASH") {
    Some(hash) => hash,
    None => "dev",
};

const BUILD_DATE: Option<&str> = option_env!("BUILD_DATE");

/// Renders the `BUILD_DATE` epoch seconds baked in at compile time.
pub fn formatted_build_date() -> String {
    BUILD_DATE
        .and_then(|epoch| epoch.parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "at an unknown time".to_string())
}

pub fn test_command(_: &InteractionContext) -> Result<InteractionResponse, CommandError> {
    Ok(InteractionResponse::message(
        "test successful <:AlienUnpleased:940285855292080149>",
    ))
}

pub fn version_command(_: &InteractionContext) -> Result<InteractionResponse, CommandError> {
    Ok(InteractionResponse::message(format!(
        "Built {} using commit {BUILD_HASH}",
        formatted_build_date()
    )))
}

pub struct CommandSettings {
    pub mdn_base_url: String,
    pub http_timeout: Duration,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            mdn_base_url: mdn::DEFAULT_MDN_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(2),
        }
    }
}

/// Every command the bot answers, with `search` backing `mdn`.
pub fn registry_with<S: DocSearch + 'static>(search: S) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register("checkem", checkem::checkem_command);
    registry.register("leftpad", words::left_pad_command);
    registry.register("mdn", MdnSearch::new(search));
    registry.register("progress", progress::progress_command);
    registry.register("shuffle", words::shuffle_command);
    registry.register("test", test_command);
    registry.register("version", version_command);
    registry
}

pub fn default_registry(settings: &CommandSettings) -> Result<CommandRegistry, reqwest::Error> {
    let client = mdn::MdnClient::new(settings.mdn_base_url.clone(), settings.http_timeout)?;
    Ok(registry_with(client))
}
