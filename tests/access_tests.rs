// Access gate and public endpoint tests
// Author: kelexine (https://github.com/kelexine)

use aigc_relay::access::AccessCodeSet;
use aigc_relay::config::{ForwardingConfig, ProviderEnv, ServerConfig};
use aigc_relay::error::ACCESS_CODE_MESSAGE;
use aigc_relay::forward::Forwarder;
use aigc_relay::server::create_router;
use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    response::Response,
    Router,
};
use mockito::Matcher;
use proptest::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn build_app(env: ProviderEnv) -> Router {
    let config = Arc::new(ServerConfig::resolve(env).unwrap());
    let forwarder = Forwarder::new(config.clone(), &ForwardingConfig::default()).unwrap();
    create_router(config, forwarder).unwrap()
}

fn gated_env(base_url: &str, codes: Option<&str>) -> ProviderEnv {
    ProviderEnv {
        code: codes.map(str::to_string),
        openai_api_key: Some("sk-openai".to_string()),
        openai_url: Some(base_url.to_string()),
        hugging_face_url: Some(base_url.to_string()),
        stable_diffusion_url: Some(base_url.to_string()),
        ..Default::default()
    }
}

fn openai_request(access_code: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/openai")
        .header("path", "v1/chat/completions")
        .header("content-type", "application/json");
    if let Some(code) = access_code {
        builder = builder.header("access-code", code);
    }
    builder.body(Body::from(r#"{"x":1}"#)).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn assert_access_denied(response: Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], true);
    assert_eq!(json["needAccessCode"], true);
    assert_eq!(json["msg"], ACCESS_CODE_MESSAGE);
}

#[tokio::test]
async fn test_missing_code_is_rejected_without_forwarding() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let app = build_app(gated_env(&server.url(), Some("alpha,beta")));
    let response = app.oneshot(openai_request(None)).await.unwrap();

    assert_access_denied(response).await;
    mock.assert_async().await;
}

#[tokio::test]
async fn test_wrong_code_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let app = build_app(gated_env(&server.url(), Some("alpha,beta")));
    let response = app.oneshot(openai_request(Some("gamma"))).await.unwrap();

    assert_access_denied(response).await;
    mock.assert_async().await;
}

#[tokio::test]
async fn test_every_configured_code_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-openai")
        .with_status(200)
        .expect(3)
        .create_async()
        .await;

    let app = build_app(gated_env(&server.url(), Some("alpha, beta")));
    for code in ["alpha", "beta", "  alpha  "] {
        let response = app.clone().oneshot(openai_request(Some(code))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "code {:?} should pass", code);
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_ascii_code_header_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let app = build_app(gated_env(&server.url(), Some("café")));
    let mut request = openai_request(None);
    request.headers_mut().insert(
        "access-code",
        HeaderValue::from_bytes("café".as_bytes()).unwrap(),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_codes_bypasses_check() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let app = build_app(gated_env(&server.url(), None));
    for code in [None, Some("anything at all")] {
        let response = app.clone().oneshot(openai_request(code)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_is_config_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    // Valid code, but no HuggingFace token on the server
    let app = build_app(gated_env(&server.url(), Some("alpha")));
    let request = Request::builder()
        .method("POST")
        .uri("/api/hugging-face")
        .header("path", "models/gpt2")
        .header("access-code", "alpha")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], true);
    assert_eq!(json["msg"], "Empty Token For: hugging-face");
    assert!(json.get("needAccessCode").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_is_checked_before_credential() {
    let server = mockito::Server::new_async().await;

    let app = build_app(gated_env(&server.url(), Some("alpha")));
    let request = Request::builder()
        .method("POST")
        .uri("/api/diffusion")
        .header("path", "sdapi/v1/txt2img")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_access_denied(response).await;
}

#[tokio::test]
async fn test_config_endpoint_reports_need_code_only() {
    let server = mockito::Server::new_async().await;

    for (codes, expected) in [(Some("alpha"), true), (None, false)] {
        let app = build_app(gated_env(&server.url(), codes));
        let request = Request::builder()
            .method("POST")
            .uri("/api/config")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "needCode": expected }));
    }
}

#[tokio::test]
async fn test_config_endpoint_is_not_gated() {
    let server = mockito::Server::new_async().await;

    let app = build_app(gated_env(&server.url(), Some("alpha")));
    let request = Request::builder()
        .method("GET")
        .uri("/api/config")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_configured_providers() {
    let server = mockito::Server::new_async().await;

    let app = build_app(gated_env(&server.url(), None));
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["openai"]["status"], "ok");
    assert_eq!(json["checks"]["hugging-face"]["status"], "warning");
    assert!(!json.to_string().contains("sk-openai"));
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_rejections() {
    let server = mockito::Server::new_async().await;

    let app = build_app(gated_env(&server.url(), Some("alpha")));
    let response = app.clone().oneshot(openai_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("GET")
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("relay_access_rejections_total"));
}

/// Sends `code` as raw header bytes to a route with no credential configured,
/// so a request that passes the gate stops at the credential check.
fn gate_admits(app: &Router, code: &str) -> bool {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/hugging-face")
        .header("path", "models/gpt2")
        .header("access-code", HeaderValue::from_bytes(code.as_bytes()).unwrap())
        .body(Body::from("{}"))
        .unwrap();

    runtime.block_on(async {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        json.get("needAccessCode").is_none()
    })
}

proptest! {
    #[test]
    fn configured_codes_always_verify(codes in prop::collection::vec("[a-zA-Z0-9]{1,16}", 1..6)) {
        let set = AccessCodeSet::from_list(&codes.join(","));
        for code in &codes {
            prop_assert!(set.verify(Some(code.as_bytes())));
        }
    }

    #[test]
    fn foreign_codes_never_verify(
        codes in prop::collection::vec("[a-zA-Z0-9]{1,16}", 1..6),
        candidate in "[a-zA-Z0-9]{0,16}",
    ) {
        prop_assume!(!codes.contains(&candidate));
        let set = AccessCodeSet::from_list(&codes.join(","));
        prop_assert!(!set.verify(Some(candidate.as_bytes())));
    }

    #[test]
    fn non_ascii_codes_pass_the_gate_through_headers(
        codes in prop::collection::vec("[a-zA-Z0-9éüñß日本語秘密]{1,8}", 1..4),
        candidate in "[a-zA-Z0-9éüñß日本語秘密]{1,8}",
    ) {
        let app = build_app(gated_env("http://127.0.0.1:1", Some(&codes.join(","))));
        for code in &codes {
            prop_assert!(gate_admits(&app, code), "configured code {:?} was rejected", code);
        }
        prop_assert_eq!(gate_admits(&app, &candidate), codes.contains(&candidate));
    }
}
