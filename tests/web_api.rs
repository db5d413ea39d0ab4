use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
};
use ed25519_dalek::{Signer, SigningKey};
use interactions_bot::auth::signed_message;
use interactions_bot::codec::decode_response;
use interactions_bot::{
    web_api, CapturedRequest, CommandError, CommandRegistry, Ed25519Validator,
    InteractionContext, InteractionDispatcher, InteractionResponse, InteractionResponseType,
    RequestValidator, ServiceError, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use tower::util::ServiceExt;

const TIMESTAMP: &str = "1700000000";

struct PassingValidator;

impl RequestValidator for PassingValidator {
    fn validate(&self, _: &CapturedRequest) -> Result<(), ServiceError> {
        Ok(())
    }
}

struct FailingValidator;

impl RequestValidator for FailingValidator {
    fn validate(&self, _: &CapturedRequest) -> Result<(), ServiceError> {
        Err(interactions_bot::AuthFailure::Mismatch.into())
    }
}

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[5u8; 32])
}

fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register("test", |_: &InteractionContext| -> Result<InteractionResponse, CommandError> {
        Ok(InteractionResponse::message("ok"))
    });
    registry.register("explode", |ctx: &InteractionContext| -> Result<InteractionResponse, CommandError> {
        let input = ctx.string_option("input")?.unwrap_or_default();
        Err(CommandError::Upstream(format!("cannot handle {input}")))
    });
    registry
}

fn app_with<V: RequestValidator + 'static>(validator: V) -> axum::Router {
    let dispatcher = InteractionDispatcher::new(validator, registry());
    web_api::build_router(web_api::AppState::new(dispatcher))
}

fn app() -> axum::Router {
    app_with(Ed25519Validator::new(signing_key().verifying_key()))
}

fn signed_request(body: &str) -> Request<Body> {
    let sig = signing_key().sign(&signed_message(TIMESTAMP, body.as_bytes()));
    Request::builder()
        .method("POST")
        .uri("/interactions")
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, hex::encode(sig.to_bytes()))
        .header(TIMESTAMP_HEADER, TIMESTAMP)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn ping_is_answered_with_pong() {
    let resp = app().oneshot(signed_request(r#"{"type":1}"#)).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );
    let decoded = decode_response(body_string(resp).await.as_bytes()).unwrap();
    assert_eq!(decoded.kind(), InteractionResponseType::Pong);
    assert!(decoded.data().is_none());
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    for method in ["GET", "PUT", "DELETE"] {
        let resp = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/interactions")
                    .body(Body::from(r#"{"type":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(resp.headers().get("allow").unwrap(), "POST");
    }
}

#[tokio::test]
async fn zeroed_signature_is_unauthorized() {
    let mut req = signed_request(r#"{"type":1}"#);
    req.headers_mut()
        .insert(SIGNATURE_HEADER, "0".repeat(128).parse().unwrap());

    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(resp).await, "invalid request signature");
}

#[tokio::test]
async fn missing_signature_headers_are_unauthorized() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/interactions")
                .body(Body::from(r#"{"type":1}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn failing_validator_short_circuits() {
    let resp = app_with(FailingValidator)
        .oneshot(signed_request(r#"{"type":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unregistered_command_is_a_bad_request() {
    let resp = app()
        .oneshot(signed_request(
            r#"{"type":2,"data":{"name":"doesnotexist"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "unhandled command: doesnotexist");
}

#[tokio::test]
async fn registered_command_replies() {
    let resp = app()
        .oneshot(signed_request(r#"{"type":2,"data":{"name":"test"}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let decoded = decode_response(body_string(resp).await.as_bytes()).unwrap();
    assert_eq!(decoded.kind(), InteractionResponseType::ChannelMessageWithSource);
    assert_eq!(decoded.content(), Some("ok"));
}

#[tokio::test]
async fn handler_error_is_surfaced_as_500() {
    let resp = app()
        .oneshot(signed_request(
            r#"{"type":2,"data":{"name":"explode","options":[{"name":"input","type":3,"value":"X"}]}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp).await.contains("cannot handle X"));
}

#[tokio::test]
async fn unknown_interaction_type_is_a_bad_request() {
    let resp = app_with(PassingValidator)
        .oneshot(signed_request(r#"{"type":3,"data":{"name":"test"}}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "unknown interaction type: 3");
}

#[tokio::test]
async fn malformed_payload_is_a_bad_request() {
    let resp = app_with(PassingValidator)
        .oneshot(signed_request(r#"{"type":"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!body_string(resp).await.is_empty());
}

#[tokio::test]
async fn oversized_body_is_rejected_before_decoding() {
    let dispatcher = InteractionDispatcher::new(PassingValidator, registry()).with_body_limit(8);
    let app = web_api::build_router(web_api::AppState::new(dispatcher));

    let resp = app
        .oneshot(signed_request(r#"{"type":1,"padding":"xxxxxxxx"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn other_paths_are_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let app = app();
    let mut handles = Vec::new();
    for i in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let body = if i % 2 == 0 {
                r#"{"type":1}"#
            } else {
                r#"{"type":2,"data":{"name":"test"}}"#
            };
            let resp = app.oneshot(signed_request(body)).await.unwrap();
            (i, resp.status(), body_string(resp).await)
        }));
    }

    for handle in handles {
        let (i, status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let decoded = decode_response(body.as_bytes()).unwrap();
        if i % 2 == 0 {
            assert_eq!(decoded, InteractionResponse::pong());
        } else {
            assert_eq!(decoded.content(), Some("ok"));
        }
    }
}
