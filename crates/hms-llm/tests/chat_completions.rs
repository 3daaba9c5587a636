use hms_core::chat::{ChatMessage, ChatRequest};
use hms_llm::{ClientConfig, LlmError, OpenRouterClient};
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::Server) -> OpenRouterClient {
    OpenRouterClient::new(ClientConfig::new("test-key").with_base_url(server.url()))
}

#[tokio::test]
async fn sends_exactly_one_post_with_messages_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "model": "openai/gpt-4o",
            "messages": [
                {"role": "system", "content": "Be brief"},
                {"role": "user", "content": "What departments are open?"}
            ],
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"message": {"content": "Cardiology"}}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let request = ChatRequest::new("openai/gpt-4o")
        .with_message(ChatMessage::system("Be brief"))
        .with_message(ChatMessage::user("What departments are open?"));

    let response = client_for(&server).send(request).await.unwrap();
    assert_eq!(response.primary_content(), Some("Cardiology"));
    mock.assert_async().await;
}

#[tokio::test]
async fn cleans_assistant_content_in_place() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"choices": [{"message": {"content": "**Hi** there\n#heading"}}]}).to_string(),
        )
        .create_async()
        .await;

    let request = ChatRequest::new("m").with_message(ChatMessage::user("hi"));
    let response = client_for(&server).send(request).await.unwrap();

    assert_eq!(response.primary_content(), Some("Hi there\nheading"));
}

#[tokio::test]
async fn response_without_choices_passes_through_unchanged() {
    let body = json!({"error": {"code": 401, "message": "No auth credentials found"}});

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let request = ChatRequest::new("m").with_message(ChatMessage::user("hi"));
    let response = client_for(&server).send(request).await.unwrap();

    assert_eq!(response.into_inner(), body);
}

#[tokio::test]
async fn non_2xx_json_body_is_a_normal_result() {
    // The wrapper never looks at the status code; a service-shaped error
    // body is the caller's to inspect.
    let body = json!({"error": {"message": "Rate limit exceeded", "code": 429}});

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let request = ChatRequest::new("m").with_message(ChatMessage::user("hi"));
    let response = client_for(&server).send(request).await.unwrap();

    assert_eq!(response.into_inner(), body);
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let request = ChatRequest::new("m").with_message(ChatMessage::user("hi"));
    let err = client_for(&server).send(request).await.unwrap_err();

    assert!(matches!(err, LlmError::Parse(_)));
}

#[tokio::test]
async fn default_headers_ride_along_but_never_override() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("http-referer", "https://hms.example")
        .match_header("x-title", "HMS")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": []}).to_string())
        .create_async()
        .await;

    let config = ClientConfig::new("test-key")
        .with_base_url(server.url())
        .with_header("HTTP-Referer", "https://hms.example")
        .with_header("X-Title", "HMS")
        // both collide with the fixed headers and must lose
        .with_header("Authorization", "Bearer forged")
        .with_header("Content-Type", "text/plain");

    let request = ChatRequest::new("m").with_message(ChatMessage::user("hi"));
    OpenRouterClient::new(config).send(request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Nothing listens on this port.
    let config = ClientConfig::new("test-key").with_base_url("http://127.0.0.1:9");
    let request = ChatRequest::new("m").with_message(ChatMessage::user("hi"));

    let err = OpenRouterClient::new(config).send(request).await.unwrap_err();
    assert!(matches!(err, LlmError::Transport(_)));
}
