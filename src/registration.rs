//! Client for publishing slash-command definitions to the platform.

use reqwest::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10/";

pub const COMMAND_TYPE_CHAT_INPUT: u8 = 1;

pub const OPTION_TYPE_STRING: u8 = 3;
pub const OPTION_TYPE_INTEGER: u8 = 4;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status code {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOptionChoice {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOptionDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<CommandOptionChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOptionDefinition>,
}

/// The manifest read by the `register-commands` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global: Vec<CommandDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApplicationCommand {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<u8>,
    pub application_id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub struct RegistrationClient {
    base_url: String,
    bot_token: String,
    client: reqwest::Client,
}

impl RegistrationClient {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_API_BASE, bot_token)
    }

    pub fn with_base_url(base_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            bot_token: bot_token.into(),
            client: reqwest::Client::new(),
        }
    }

    fn commands_url(&self, application_id: &str) -> String {
        format!("{}applications/{application_id}/commands", self.base_url)
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<Option<T>, RegistrationError> {
        let resp = self
            .client
            .request(method.clone(), url)
            .header(header::AUTHORIZATION, format!("Bot {}", self.bot_token))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        debug!(%method, url, status = status.as_u16(), "registration request");
        if status.is_client_error() || status.is_server_error() {
            return Err(RegistrationError::Status(status.as_u16()));
        }

        let bytes = resp.bytes().await?;
        if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Creates (or updates, if the name exists) one global command.
    pub async fn register(
        &self,
        application_id: &str,
        command: &CommandDefinition,
    ) -> Result<Option<ApplicationCommand>, RegistrationError> {
        self.send(Method::POST, &self.commands_url(application_id), command)
            .await
    }

    /// Replaces every global command with `commands`.
    pub async fn bulk_overwrite(
        &self,
        application_id: &str,
        commands: &[CommandDefinition],
    ) -> Result<Vec<ApplicationCommand>, RegistrationError> {
        Ok(self
            .send(Method::PUT, &self.commands_url(application_id), commands)
            .await?
            .unwrap_or_default())
    }
}
