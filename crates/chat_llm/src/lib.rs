pub mod provider;
pub mod providers;

pub use provider::{
    Completion, CompletionProvider, CompletionRequest, LLMError, Result, TokenUsage,
};
pub use providers::GroqProvider;
