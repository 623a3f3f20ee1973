//! Integration tests for GroqProvider against a mock chat completions endpoint

use chat_core::Message;
use chat_llm::{CompletionProvider, CompletionRequest, GroqProvider, LLMError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            Message::system("You are a pirate."),
            Message::user("Where is the treasure?"),
        ],
        model: "llama3-70b-8192".to_string(),
        temperature: 0.3,
        max_tokens: 200,
    }
}

#[tokio::test]
async fn test_completion_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3-70b-8192",
            "max_tokens": 200,
            "stream": false,
            "messages": [
                {"role": "system", "content": "You are a pirate."},
                {"role": "user", "content": "Where is the treasure?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1234567890,
            "model": "llama3-70b-8192",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Arr, buried on the island!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let completion = provider.complete(&request()).await.expect("completion");

    assert_eq!(completion.content, "Arr, buried on the island!");
    assert_eq!(completion.model.as_deref(), Some("llama3-70b-8192"));
    assert_eq!(completion.usage.expect("usage").completion_tokens, 7);
}

#[tokio::test]
async fn test_api_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"message": "Rate limit reached", "type": "tokens", "code": "rate_limit_exceeded"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let err = provider.complete(&request()).await.unwrap_err();

    match err {
        LLMError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("expected LLMError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let err = provider.complete(&request()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "API error (HTTP 503): Service Unavailable"
    );
}

#[tokio::test]
async fn test_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-test",
            "choices": []
        })))
        .mount(&mock_server)
        .await;

    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let err = provider.complete(&request()).await.unwrap_err();

    assert!(matches!(err, LLMError::Protocol(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let provider = GroqProvider::new("gsk-test").with_base_url("http://127.0.0.1:1");
    let err = provider.complete(&request()).await.unwrap_err();

    assert!(matches!(err, LLMError::Http(_)));
}
