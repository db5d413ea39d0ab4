use axum::http::StatusCode;
use thiserror::Error;

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ErrBadSignature = 1001,
    ErrInvalidPublicKey = 1002,

    ErrDecode = 1101,

    ErrUnknownInteractionType = 1201,
    ErrUnhandledCommand = 1202,
    ErrMissingCommandData = 1203,

    ErrHandler = 1301,
}

/// Why a request failed authentication. Logged, never sent to the caller.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("missing header {0}")]
    MissingHeader(&'static str),
    #[error("header {0} is not valid utf-8")]
    InvalidHeader(&'static str),
    #[error("signature is not valid hex: {0}")]
    SignatureHex(#[from] hex::FromHexError),
    #[error("signature has the wrong length")]
    SignatureLength,
    #[error("failed to read request body: {0}")]
    Body(String),
    #[error("signature does not match")]
    Mismatch,
}

/// Failures raised by command handlers.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing required option `{0}`")]
    MissingOption(String),
    #[error("option `{option}` must be a {expected}")]
    ValueType {
        option: String,
        expected: &'static str,
    },
    #[error("{0}")]
    Upstream(String),
    #[error("command timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request signature")]
    BadSignature(#[source] AuthFailure),
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("{0}")]
    Decode(String),
    #[error("unknown interaction type: {0}")]
    UnknownInteractionType(u8),
    #[error("unhandled command: {0}")]
    UnhandledCommand(String),
    #[error("application command without data")]
    MissingCommandData,
    #[error(transparent)]
    Handler(#[from] CommandError),
}

impl From<AuthFailure> for ServiceError {
    fn from(reason: AuthFailure) -> Self {
        ServiceError::BadSignature(reason)
    }
}

impl ServiceError {
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::BadSignature(_) => ErrorCode::ErrBadSignature as u16,
            ServiceError::InvalidPublicKey(_) => ErrorCode::ErrInvalidPublicKey as u16,
            ServiceError::Decode(_) => ErrorCode::ErrDecode as u16,
            ServiceError::UnknownInteractionType(_) => {
                ErrorCode::ErrUnknownInteractionType as u16
            }
            ServiceError::UnhandledCommand(_) => ErrorCode::ErrUnhandledCommand as u16,
            ServiceError::MissingCommandData => ErrorCode::ErrMissingCommandData as u16,
            ServiceError::Handler(_) => ErrorCode::ErrHandler as u16,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::BadSignature(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Decode(_)
            | ServiceError::UnknownInteractionType(_)
            | ServiceError::UnhandledCommand(_)
            | ServiceError::MissingCommandData => StatusCode::BAD_REQUEST,
            ServiceError::InvalidPublicKey(_) | ServiceError::Handler(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
