pub mod auth;
pub mod codec;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod errors;
pub mod registration;
pub mod registry;
pub mod types;
pub mod web_api;

pub use auth::{CapturedRequest, Ed25519Validator, RequestValidator};
pub use context::InteractionContext;
pub use dispatch::InteractionDispatcher;
pub use errors::{AuthFailure, CommandError, ErrorCode, ServiceError};
pub use registry::{CommandHandler, CommandRegistry};
pub use types::*;
