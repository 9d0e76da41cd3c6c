use folio_api_client::{ClientError, RelayClient, RelayDebug};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn ask_posts_query_and_parses_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/aryan-ai")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "query": "Show my skills" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"reply": "C, Rust and memes", "debug": {"credentialPresent": true}}"#)
        .create_async()
        .await;

    let client = RelayClient::new(&server.url());
    let reply = client.ask("Show my skills").await.unwrap();

    assert_eq!(reply.reply, "C, Rust and memes");
    assert_eq!(reply.error, None);
    assert_eq!(
        reply.debug,
        Some(RelayDebug {
            credential_present: true
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn fallback_body_is_still_a_reply() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/aryan-ai")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"reply": "⚠️ Gemini API error — check model name or key."}"#)
        .create_async()
        .await;

    let reply = RelayClient::new(&server.url()).ask("hi").await.unwrap();
    assert!(reply.reply.starts_with("⚠️ Gemini API error"));
    assert!(reply.debug.is_none());
}

#[tokio::test]
async fn null_or_missing_reply_reads_as_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/aryan-ai")
        .match_body(Matcher::Json(json!({ "query": "null" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"reply": null}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/api/aryan-ai")
        .match_body(Matcher::Json(json!({ "query": "missing" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"debug": {"credentialPresent": false}}"#)
        .create_async()
        .await;

    let client = RelayClient::new(&server.url());

    let reply = client.ask("null").await.unwrap();
    assert_eq!(reply.reply, "");

    let reply = client.ask("missing").await.unwrap();
    assert_eq!(reply.reply, "");
    assert_eq!(
        reply.debug,
        Some(RelayDebug {
            credential_present: false
        })
    );
}

#[tokio::test]
async fn error_status_is_client_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/aryan-ai")
        .with_status(502)
        .create_async()
        .await;

    let err = RelayClient::new(&server.url()).ask("hi").await.unwrap_err();
    assert!(matches!(err, ClientError::Status(502)));
}

#[tokio::test]
async fn non_relay_body_is_client_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/aryan-ai")
        .with_status(200)
        .with_body("<html>not the relay</html>")
        .create_async()
        .await;

    let err = RelayClient::new(&server.url()).ask("hi").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn unreachable_relay_is_client_error() {
    // Port 9 (discard) is essentially never listening on loopback.
    let err = RelayClient::new("http://127.0.0.1:9").ask("hi").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn trailing_slash_is_trimmed() {
    assert_eq!(
        RelayClient::new("http://localhost:3100/").base_url(),
        "http://localhost:3100"
    );
}
