//! Interaction cycles driven through the REPL against a mock Groq endpoint

use std::io::Cursor;

use chat_cli::{repl, Controls, Flow, Repl, TerminalSurface};
use chat_core::{Persona, Settings};
use chat_llm::GroqProvider;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(api_key: Option<&str>) -> Settings {
    Settings {
        api_key: api_key.map(str::to_string),
        ..Settings::default()
    }
}

fn new_repl<'a>(settings: &'a Settings, provider: &'a GroqProvider) -> Repl<'a, Vec<u8>> {
    colored::control::set_override(false);
    Repl::new(
        settings,
        provider,
        Controls::from_defaults(&settings.defaults),
        TerminalSurface::new(Vec::new()),
    )
    .unwrap()
}

fn output(repl: Repl<'_, Vec<u8>>) -> String {
    String::from_utf8(repl.into_surface().into_inner()).unwrap()
}

fn reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama3-8b-8192",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
    }))
}

#[tokio::test]
async fn test_message_gets_a_reply() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(reply("Hello! How can I help?"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = settings(Some("gsk-test"));
    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let mut repl = new_repl(&settings, &provider);

    assert_eq!(repl.handle_line("hi").await, Flow::Continue);
    assert_eq!(repl.session().conversation().len(), 3);

    let text = output(repl);
    assert!(text.contains("You: hi\n"));
    assert!(text.contains("Assistant: Hello! How can I help?\n"));
}

#[tokio::test]
async fn test_persona_change_applies_before_the_turn() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3-70b-8192",
            "temperature": 0.8,
            "messages": [
                {"role": "system", "content": Persona::Pirate.instruction()},
                {"role": "user", "content": "ahoy"}
            ]
        })))
        .respond_with(reply("Arr!"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = settings(Some("gsk-test"));
    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let mut repl = new_repl(&settings, &provider);

    repl.handle_line("/persona pirate").await;
    repl.handle_line("/model llama3-70b").await;
    repl.handle_line("/temperature +").await;
    repl.handle_line("ahoy").await;

    assert_eq!(
        repl.session().conversation().system_instruction(),
        Some(Persona::Pirate.instruction())
    );
    assert!(output(repl).contains("Assistant: Arr!\n"));
}

#[tokio::test]
async fn test_provider_error_is_rendered_in_place() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"message": "Rate limit reached", "type": "tokens"}
        })))
        .mount(&mock_server)
        .await;

    let settings = settings(Some("gsk-test"));
    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let mut repl = new_repl(&settings, &provider);

    assert_eq!(repl.handle_line("hi").await, Flow::Continue);
    assert_eq!(repl.session().conversation().len(), 2);

    let text = output(repl);
    assert!(text.contains("Assistant: Error: API error (HTTP 429): Rate limit reached\n"));
}

#[tokio::test]
async fn test_missing_key_warns_and_fails_turns() {
    let settings = settings(None);
    let provider = GroqProvider::new("").with_base_url("http://127.0.0.1:1");
    let mut repl = new_repl(&settings, &provider);

    repl.handle_line("/status").await;
    repl.handle_line("hi").await;
    repl.handle_line("/status").await;

    assert_eq!(repl.session().conversation().len(), 2);
    let text = output(repl);
    assert!(text.contains("Last transition: Waiting for AI response -> Last reply failed"));
    assert!(text.contains("Using model: llama3-8b-8192"));
    assert!(text.contains("Groq API Key not found. Please add it to your .env file."));
    assert!(text.contains("Assistant: Error: "));
}

#[tokio::test]
async fn test_reset_keeps_only_the_system_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(reply("Indeed."))
        .mount(&mock_server)
        .await;

    let settings = settings(Some("gsk-test"));
    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let mut repl = new_repl(&settings, &provider);

    repl.handle_line("/persona sherlock").await;
    repl.handle_line("who did it?").await;
    repl.handle_line("/reset").await;

    let conversation = repl.session().conversation();
    assert_eq!(conversation.len(), 1);
    assert_eq!(
        conversation.system_instruction(),
        Some(Persona::SherlockHolmes.instruction())
    );
    assert!(output(repl).contains("(no messages yet)"));
}

#[tokio::test]
async fn test_invalid_input_changes_nothing() {
    let settings = settings(Some("gsk-test"));
    let provider = GroqProvider::new("gsk-test").with_base_url("http://127.0.0.1:1");
    let mut repl = new_repl(&settings, &provider);

    repl.handle_line("/temperature 3").await;
    repl.handle_line("/persona luigi").await;
    repl.handle_line("/dance").await;
    repl.handle_line("   ").await;

    assert_eq!(repl.controls(), &Controls::default());
    assert_eq!(repl.session().conversation().len(), 1);

    let text = output(repl);
    assert!(text.contains("temperature must be between"));
    assert!(text.contains("Unknown persona 'luigi'"));
    assert!(text.contains("Unknown command '/dance'"));
}

#[tokio::test]
async fn test_custom_prompt_overrides_persona() {
    let settings = settings(Some("gsk-test"));
    let provider = GroqProvider::new("gsk-test");
    let mut repl = new_repl(&settings, &provider);

    repl.handle_line("/emoji none").await;
    repl.handle_line("/custom set Talk like a cat.").await;
    repl.handle_line("/persona robot").await;

    assert_eq!(
        repl.session().conversation().system_instruction(),
        Some("Talk like a cat. Do not use any emojis in your responses.")
    );

    repl.handle_line("/custom off").await;
    assert_eq!(
        repl.session().conversation().system_instruction(),
        Some(
            format!(
                "{} Do not use any emojis in your responses.",
                Persona::Robot.instruction()
            )
            .as_str()
        )
    );
}

#[tokio::test]
async fn test_run_stops_on_exit() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(reply("Hi there"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = settings(Some("gsk-test"));
    let provider = GroqProvider::new("gsk-test").with_base_url(mock_server.uri());
    let mut repl = new_repl(&settings, &provider);

    repl::run(&mut repl, Cursor::new("hello\nexit\nnever sent\n"))
        .await
        .unwrap();

    assert_eq!(repl.session().conversation().len(), 3);
    let text = output(repl);
    assert!(text.contains("Session ID: "));
    assert!(text.contains("Goodbye!"));
}
