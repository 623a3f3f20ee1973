//! OpenAI-compatible request serialization and response parsing.
//!
//! Groq exposes the same chat completions shape as OpenAI. Only `role` and
//! `content` are sent for each message.

use chat_core::Message;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::provider::{Completion, CompletionRequest, LLMError, Result, TokenUsage};

/// Convert [`Message`] values to an OpenAI-compatible JSON array.
pub fn messages_to_openai_compat_json(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|m| {
            json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect()
}

/// Build a non-streaming chat completions request body.
pub fn build_openai_compat_body(request: &CompletionRequest) -> Value {
    json!({
        "model": request.model,
        "messages": messages_to_openai_compat_json(&request.messages),
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
        "stream": false,
    })
}

#[derive(Debug, Deserialize)]
struct OpenAICompatResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<OpenAICompatChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatChoice {
    message: Option<OpenAICompatMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatErrorBody {
    error: OpenAICompatError,
}

#[derive(Debug, Deserialize)]
struct OpenAICompatError {
    message: String,
}

/// Extract the first choice's text from a completion response body.
pub fn parse_openai_compat_completion(body: &str) -> Result<Completion> {
    let response: OpenAICompatResponse = serde_json::from_str(body)?;

    let first = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::Protocol("response contained no choices".to_string()))?;

    let content = first
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| LLMError::Protocol("first choice has no message content".to_string()))?;

    Ok(Completion {
        content,
        model: response.model,
        usage: response.usage,
    })
}

/// Best description of a failed request: the provider's `error.message` when
/// the body is OpenAI-style JSON, otherwise the raw body.
pub fn openai_compat_error_message(body: &str) -> String {
    match serde_json::from_str::<OpenAICompatErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}
