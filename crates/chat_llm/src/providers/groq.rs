use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::provider::{Completion, CompletionProvider, CompletionRequest, LLMError, Result};

use super::common::openai_compat::{
    build_openai_compat_body, openai_compat_error_message, parse_openai_compat_completion,
};

pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GroqProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GROQ_API_BASE.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        if self.api_key.trim().is_empty() {
            return Err(LLMError::Auth("Groq API key is not configured".to_string()));
        }

        let body = build_openai_compat_body(request);

        log::debug!(
            "Groq request: model={}, messages={}, temperature={}, max_tokens={}",
            request.model,
            request.messages.len(),
            request.temperature,
            request.max_tokens
        );

        let mut builder = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("Groq returned HTTP {}", status);
            return Err(LLMError::Api {
                status: status.as_u16(),
                message: openai_compat_error_message(&text),
            });
        }

        parse_openai_compat_completion(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_provider() {
        let provider = GroqProvider::new("test_key");
        assert_eq!(provider.api_key, "test_key");
        assert_eq!(provider.base_url, "https://api.groq.com/openai/v1");
        assert!(provider.timeout.is_none());
    }

    #[test]
    fn test_chained_builders() {
        let provider = GroqProvider::new("test_key")
            .with_base_url("http://localhost:9999/v1/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(provider.base_url, "http://localhost:9999/v1");
        assert_eq!(provider.endpoint(), "http://localhost:9999/v1/chat/completions");
        assert_eq!(provider.timeout, Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let provider = GroqProvider::new("").with_base_url("http://127.0.0.1:1");
        let request = CompletionRequest {
            messages: vec![chat_core::Message::user("hi")],
            model: "llama3-8b-8192".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        };

        let err = provider.complete(&request).await.unwrap_err();
        assert!(matches!(err, LLMError::Auth(_)));
    }
}
