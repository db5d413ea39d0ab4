//! Server configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::commands::mdn::DEFAULT_MDN_BASE_URL;
use crate::commands::CommandSettings;
use crate::dispatch::{DEFAULT_BODY_LIMIT, DEFAULT_HANDLER_TIMEOUT};

#[derive(Debug, Clone)]
pub struct Config {
    /// Hex-encoded Ed25519 public key of the application.
    pub public_key: String,

    pub bind_host: IpAddr,

    pub port: u16,

    /// Largest interaction body accepted, in bytes (default: 1 MiB)
    pub max_body_bytes: usize,

    /// Upper bound on a single command invocation (default: 3s)
    pub handler_timeout: Duration,

    pub mdn_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            public_key: env::var("DISCORD_PUBLIC_KEY")
                .context("DISCORD_PUBLIC_KEY must be set")?,
            bind_host: env::var("BIND_HOST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(IpAddr::from([0, 0, 0, 0])),
            port: match env::var("PORT") {
                Ok(v) if !v.is_empty() => v.parse().context("PORT must be a port number")?,
                _ => 8080,
            },
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BODY_LIMIT),
            handler_timeout: env::var("HANDLER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_HANDLER_TIMEOUT),
            mdn_base_url: env::var("MDN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MDN_BASE_URL.into()),
        })
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }

    pub fn command_settings(&self) -> CommandSettings {
        CommandSettings {
            mdn_base_url: self.mdn_base_url.clone(),
            // Must expire before the handler timeout does.
            http_timeout: self.handler_timeout.mul_f32(0.8),
        }
    }
}

/// Settings for the `register-commands` binary.
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    pub application_id: String,
    pub bot_token: String,
}

impl RegistrationConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            application_id: env::var("DISCORD_APPLICATION_ID")
                .context("Missing required environment variable DISCORD_APPLICATION_ID")?,
            bot_token: env::var("DISCORD_BOT_TOKEN")
                .context("Missing required environment variable DISCORD_BOT_TOKEN")?,
        })
    }
}
