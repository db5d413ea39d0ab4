//! Wire encoding for interactions and their responses.
//!
//! Responses are written with `serde_json`, which never HTML-escapes, so
//! mention syntax like `<@123>` and custom emoji like `<:name:id>` reach the
//! platform byte-for-byte.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::ServiceError;
use crate::types::{Interaction, InteractionResponse};

pub fn decode_interaction(body: &[u8]) -> Result<Interaction, ServiceError> {
    serde_json::from_slice(body).map_err(|e| ServiceError::Decode(e.to_string()))
}

pub fn decode_response(body: &[u8]) -> Result<InteractionResponse, ServiceError> {
    serde_json::from_slice(body).map_err(|e| ServiceError::Decode(e.to_string()))
}

pub fn encode_response(response: InteractionResponse) -> Response {
    (StatusCode::OK, Json(response)).into_response()
}
