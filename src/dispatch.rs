//! Per-request interaction state machine.
//!
//! Every request ends in exactly one response: 405 for the wrong method,
//! 401 when the signature does not check out, 400 for payloads that cannot be
//! decoded or routed, 500 when a command fails, and 200 otherwise.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info, warn};

use crate::auth::{CapturedRequest, RequestValidator};
use crate::codec::{decode_interaction, encode_response};
use crate::context::InteractionContext;
use crate::errors::{CommandError, ServiceError};
use crate::registry::CommandRegistry;
use crate::types::{Interaction, InteractionResponse, InteractionType};

pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(3);

pub struct InteractionDispatcher {
    validator: Arc<dyn RequestValidator>,
    registry: Arc<CommandRegistry>,
    body_limit: usize,
    handler_timeout: Duration,
}

impl InteractionDispatcher {
    pub fn new<V: RequestValidator + 'static>(validator: V, registry: CommandRegistry) -> Self {
        Self {
            validator: Arc::new(validator),
            registry: Arc::new(registry),
            body_limit: DEFAULT_BODY_LIMIT,
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
        }
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        if request.method() != Method::POST {
            return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "POST")]).into_response();
        }

        match self.process(request).await {
            Ok(response) => encode_response(response),
            Err(err) => {
                let (status, msg) = error_to_http(err);
                (status, msg).into_response()
            }
        }
    }

    async fn process(&self, request: Request<Body>) -> Result<InteractionResponse, ServiceError> {
        let captured = CapturedRequest::capture(request, self.body_limit).await?;
        self.validator.validate(&captured)?;

        let interaction = decode_interaction(captured.body())?;
        info!(
            interaction_type = u8::from(interaction.kind),
            interaction_id = %interaction.id,
            command = interaction.command_name().unwrap_or_default(),
            "interaction received"
        );

        self.route(interaction).await
    }

    pub async fn route(&self, interaction: Interaction) -> Result<InteractionResponse, ServiceError> {
        match interaction.kind {
            InteractionType::Ping => Ok(InteractionResponse::pong()),
            InteractionType::ApplicationCommand => {
                let name = interaction
                    .command_name()
                    .ok_or(ServiceError::MissingCommandData)?
                    .to_string();
                let handler = self
                    .registry
                    .lookup(&name)
                    .ok_or_else(|| ServiceError::UnhandledCommand(name.clone()))?;

                let ctx = InteractionContext::new(interaction);
                let response = tokio::time::timeout(self.handler_timeout, handler.handle(&ctx))
                    .await
                    .map_err(|_| CommandError::Timeout)??;

                debug!(command = %name, "command handled");
                Ok(response)
            }
            InteractionType::Unknown(kind) => Err(ServiceError::UnknownInteractionType(kind)),
        }
    }
}

fn error_to_http(err: ServiceError) -> (StatusCode, String) {
    let code = err.code();
    let status = err.status();
    match &err {
        ServiceError::BadSignature(reason) => {
            warn!(code, reason = %reason, "rejected interaction request");
        }
        ServiceError::Handler(_) => {
            error!(code, error = %err, "command failed");
        }
        _ => {
            info!(code, error = %err, "interaction not routed");
        }
    }
    (status, err.to_string())
}
