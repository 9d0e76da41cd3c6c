//! Integration tests. Build the router around a fake generator and drive
//! `/api/aryan-ai` and `/api/health` through `tower::ServiceExt::oneshot`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use folio_api::config::{ApiConfig, Environment};
use folio_api::error::SERVER_FALLBACK;
use folio_api::{AppState, router};
use folio_core::biography::Biography;
use folio_core::genai::{GeminiClient, GenAiError, TextGenerator};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Generator that records prompts and answers with a canned result.
struct FakeGenerator {
    reply: Result<String, fn() -> GenAiError>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(make: fn() -> GenAiError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(make),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }

    fn credential_present(&self) -> bool {
        true
    }
}

fn config(environment: Environment) -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        environment,
        gemini_api_key: Some("test-key".into()),
    }
}

fn app(generator: Arc<dyn TextGenerator>, environment: Environment) -> axum::Router {
    let biography = Biography::embedded().expect("embedded biography");
    let state = AppState::new(config(environment), generator, &biography).expect("state");
    router(state)
}

async fn post_json(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/aryan-ai")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: Value = serde_json::from_slice(&bytes).expect("parse JSON");
    (status, json)
}

#[tokio::test]
async fn reply_is_returned_verbatim() {
    let text = "  **Hey!** I'm Aryan.\n* ESP32 wizard\n* meme lord  ";
    let generator = FakeGenerator::replying(text);
    let app = app(generator.clone(), Environment::Development);

    let (status, json) = post_json(app, r#"{"query": "Who is Aryan?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], text);
    assert_eq!(json["debug"], json!({ "credentialPresent": true }));
    assert!(json.get("error").is_none());

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("User: Who is Aryan?"));
    assert!(prompts[0].contains("\"name\": \"Aryan\""));
}

#[tokio::test]
async fn production_omits_debug_on_success() {
    let app = app(FakeGenerator::replying("hi"), Environment::Production);

    let (status, json) = post_json(app, r#"{"query": "hello"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "reply": "hi" }));
}

#[tokio::test]
async fn upstream_failure_returns_fallback_with_ok_status() {
    let generator = FakeGenerator::failing(|| GenAiError::Status {
        status: 503,
        body: "overloaded".into(),
    });
    let app = app(generator, Environment::Development);

    let (status, json) = post_json(app, r#"{"query": "skills?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], SERVER_FALLBACK);
    assert_eq!(json["error"], "Generation API returned 503: overloaded");
    assert_eq!(json["debug"]["credentialPresent"], true);
}

#[tokio::test]
async fn production_failure_hides_error_details() {
    let generator = FakeGenerator::failing(|| GenAiError::MalformedResponse("bad".into()));
    let app = app(generator, Environment::Production);

    let (status, json) = post_json(app, r#"{"query": "skills?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "reply": SERVER_FALLBACK }));
}

#[tokio::test]
async fn missing_credential_reports_absent_key() {
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::with_base_url(
        None,
        "http://127.0.0.1:9",
    ));
    let biography = Biography::embedded().unwrap();
    let config = ApiConfig {
        gemini_api_key: None,
        ..config(Environment::Development)
    };
    let app = router(AppState::new(config, generator, &biography).unwrap());

    for query in ["one", "two"] {
        let (status, json) = post_json(app.clone(), &json!({ "query": query }).to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], SERVER_FALLBACK);
        assert_eq!(json["debug"]["credentialPresent"], false);
        assert_eq!(json["error"], "GEMINI_API_KEY is not configured");
    }
}

#[tokio::test]
async fn malformed_body_returns_fallback_with_ok_status() {
    let generator = FakeGenerator::replying("unused");
    let app = app(generator.clone(), Environment::Development);

    let (status, json) = post_json(app.clone(), "{not json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], SERVER_FALLBACK);

    let (status, json) = post_json(app, r#"{"question": "wrong field"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], SERVER_FALLBACK);

    assert!(generator.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_credential_presence() {
    let app = app(FakeGenerator::replying("x"), Environment::Production);

    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["credentialPresent"], true);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn cross_origin_posts_are_allowed() {
    let app = app(FakeGenerator::replying("hi"), Environment::Production);

    let req = Request::builder()
        .method("POST")
        .uri("/api/aryan-ai")
        .header("origin", "https://portfolio.example")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"query": "hello"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn preflight_is_answered_for_any_origin() {
    let generator = FakeGenerator::replying("unused");
    let app = app(generator.clone(), Environment::Development);

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/aryan-ai")
        .header("origin", "https://elsewhere.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");

    assert!(resp.status().is_success());
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert!(resp.headers().contains_key("access-control-allow-methods"));
    assert!(generator.prompts.lock().unwrap().is_empty());
}
