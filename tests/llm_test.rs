use std::time::Duration;

use serde_json::json;
use surveyor::config::settings::Settings;
use surveyor::services::llm::{ChatMessage, LlmClient, LlmError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_client() -> (LlmClient, MockServer) {
    let server = MockServer::start().await;

    let mut settings = Settings::new("sk-test");
    settings.base_url = server.uri();
    settings.model = "gpt-test".to_string();
    settings.generation_timeout = Duration::from_millis(300);

    (LlmClient::new(&settings).unwrap(), server)
}

fn messages() -> Vec<ChatMessage> {
    vec![ChatMessage::system("You are terse."), ChatMessage::user("Say hi")]
}

#[tokio::test]
async fn test_chat_returns_first_choice_content() {
    let (client, server) = setup_client().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "messages": [
                { "role": "system", "content": "You are terse." },
                { "role": "user", "content": "Say hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "hi" } },
                { "message": { "role": "assistant", "content": "hello" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.chat(&messages()).await.unwrap(), "hi");
    assert_eq!(client.model(), "gpt-test");
}

#[tokio::test]
async fn test_chat_without_choices_is_empty_response() {
    let (client, server) = setup_client().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    assert!(matches!(client.chat(&messages()).await, Err(LlmError::EmptyResponse)));
}

#[tokio::test]
async fn test_chat_with_null_content_is_empty_response() {
    let (client, server) = setup_client().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })))
        .mount(&server)
        .await;

    assert!(matches!(client.chat(&messages()).await, Err(LlmError::EmptyResponse)));
}

#[tokio::test]
async fn test_chat_non_json_error_body_keeps_status() {
    let (client, server) = setup_client().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    match client.chat(&messages()).await {
        Err(LlmError::ApiError(message)) => {
            assert!(message.starts_with("503"), "{}", message);
            assert!(message.ends_with("upstream overloaded"), "{}", message);
        }
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_chat_garbage_success_body_is_invalid_response() {
    let (client, server) = setup_client().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    assert!(matches!(client.chat(&messages()).await, Err(LlmError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_chat_times_out() {
    let (client, server) = setup_client().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "choices": [{ "message": { "content": "late" } }] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    match client.chat(&messages()).await {
        Err(LlmError::Timeout(after)) => assert_eq!(after, Duration::from_millis(300)),
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_stalled_error_body_reports_timeout() {
    // Sends the status line and headers of an error, then never finishes the body.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 8192];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Type: text/plain\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let mut settings = Settings::new("sk-test");
    settings.base_url = format!("http://{}", addr);
    settings.generation_timeout = Duration::from_millis(300);
    let client = LlmClient::new(&settings).unwrap();

    match client.chat(&messages()).await {
        Err(LlmError::Timeout(after)) => assert_eq!(after, Duration::from_millis(300)),
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}
