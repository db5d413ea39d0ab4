use axum::body::{to_bytes, Body, Bytes};
use axum::http::{HeaderMap, Method, Request, Uri};
use ed25519_dalek::{Signature, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH};

use crate::errors::{AuthFailure, ServiceError};
use crate::types::{SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// The bytes the platform signs: the timestamp header immediately followed by
/// the raw body.
pub fn signed_message(timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(timestamp.len() + body.len());
    out.extend_from_slice(timestamp.as_bytes());
    out.extend_from_slice(body);
    out
}

pub fn verify_with_pubkey(sig: &[u8], msg: &[u8], pubkey: &VerifyingKey) -> Result<(), AuthFailure> {
    let signature = Signature::from_slice(sig).map_err(|_| AuthFailure::SignatureLength)?;
    pubkey
        .verify(msg, &signature)
        .map_err(|_| AuthFailure::Mismatch)
}

/// A request whose body has been read off the transport exactly once.
///
/// The captured bytes are the single source of truth for both signature
/// verification and decoding, and [`CapturedRequest::replay`] hands out an
/// identical request as many times as needed.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl CapturedRequest {
    pub async fn capture(request: Request<Body>, limit: usize) -> Result<Self, ServiceError> {
        let (parts, body) = request.into_parts();
        let body = to_bytes(body, limit)
            .await
            .map_err(|e| AuthFailure::Body(e.to_string()))?;

        Ok(Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        })
    }

    pub fn new(headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            method: Method::POST,
            uri: Uri::from_static("/interactions"),
            headers,
            body: body.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    fn header(&self, name: &'static str) -> Result<&str, AuthFailure> {
        self.headers
            .get(name)
            .ok_or(AuthFailure::MissingHeader(name))?
            .to_str()
            .map_err(|_| AuthFailure::InvalidHeader(name))
    }

    pub fn replay(&self) -> Request<Body> {
        let mut request = Request::new(Body::from(self.body.clone()));
        *request.method_mut() = self.method.clone();
        *request.uri_mut() = self.uri.clone();
        *request.headers_mut() = self.headers.clone();
        request
    }
}

/// Decides whether an interactions request genuinely came from the platform.
pub trait RequestValidator: Send + Sync {
    fn validate(&self, request: &CapturedRequest) -> Result<(), ServiceError>;
}

pub struct Ed25519Validator {
    public_key: VerifyingKey,
}

impl Ed25519Validator {
    pub fn new(public_key: VerifyingKey) -> Self {
        Self { public_key }
    }

    pub fn from_hex(public_key: &str) -> Result<Self, ServiceError> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|e| ServiceError::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            ServiceError::InvalidPublicKey(format!(
                "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
                b.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| ServiceError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::new(key))
    }

    pub fn public_key(&self) -> &VerifyingKey {
        &self.public_key
    }
}

impl RequestValidator for Ed25519Validator {
    fn validate(&self, request: &CapturedRequest) -> Result<(), ServiceError> {
        let signature = hex::decode(request.header(SIGNATURE_HEADER)?).map_err(AuthFailure::from)?;
        let timestamp = request.header(TIMESTAMP_HEADER)?;
        let message = signed_message(timestamp, request.body());

        verify_with_pubkey(&signature, &message, &self.public_key)?;
        Ok(())
    }
}
