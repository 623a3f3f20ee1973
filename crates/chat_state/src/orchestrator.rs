//! Turn orchestrator - one user submission and its reply (or failure).
//!
//! Provider failures never escape a turn: they are rendered in the reply
//! slot and returned as [`TurnOutcome::Failed`]. [`TurnError`] is reserved
//! for submissions that could not start at all.

use chat_core::ChatConfig;
use chat_llm::{Completion, CompletionProvider, CompletionRequest, LLMError};
use thiserror::Error;

use crate::machine::{TurnEvent, TurnState};
use crate::session::ChatSession;
use crate::surface::ChatSurface;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("Cannot submit an empty message")]
    EmptyMessage,

    #[error("A reply is still pending ({0:?})")]
    Busy(TurnState),
}

/// Result of a turn that was started.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The provider answered; the reply is now part of the conversation.
    Replied(Completion),
    /// The provider failed; the user message stays unanswered.
    Failed(LLMError),
}

impl TurnOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied(_))
    }
}

/// Text rendered in the reply slot when the provider fails.
pub fn error_text(error: &LLMError) -> String {
    format!("Error: {}", error)
}

impl ChatSession {
    /// Record `user_text`, ask the provider for a reply and render the result.
    ///
    /// The whole history, including the system message, is sent with the
    /// model id, temperature and max tokens from `config`.
    pub async fn submit_turn<P, S>(
        &mut self,
        user_text: &str,
        config: &ChatConfig,
        provider: &P,
        surface: &mut S,
    ) -> Result<TurnOutcome, TurnError>
    where
        P: CompletionProvider + ?Sized,
        S: ChatSurface + ?Sized,
    {
        if user_text.trim().is_empty() {
            return Err(TurnError::EmptyMessage);
        }
        if !self.machine.can_transition(&TurnEvent::UserMessageSent) {
            return Err(TurnError::Busy(self.machine.state().clone()));
        }

        self.machine.handle_event(TurnEvent::UserMessageSent);
        self.conversation.append_user(user_text);
        if let Some(message) = self.conversation.last() {
            surface.render_message(message);
        }

        let slot = surface.reserve_reply();

        let request = CompletionRequest {
            messages: self.conversation.messages().to_vec(),
            model: config.model().id().to_string(),
            temperature: config.temperature().value(),
            max_tokens: config.max_tokens().value(),
        };

        self.machine.handle_event(TurnEvent::LLMRequestInitiated);

        match provider.complete(&request).await {
            Ok(completion) => {
                surface.fill_reply(slot, &completion.content);
                self.conversation.append_assistant(completion.content.clone());
                self.machine.handle_event(TurnEvent::LLMResponseReceived);

                if let Some(usage) = &completion.usage {
                    log::debug!(
                        "Reply from {}: prompt={}, completion={}, total={} tokens",
                        completion.model.as_deref().unwrap_or(request.model.as_str()),
                        usage.prompt_tokens,
                        usage.completion_tokens,
                        usage.total_tokens
                    );
                }

                Ok(TurnOutcome::Replied(completion))
            }
            Err(error) => {
                log::warn!("Completion failed for session {}: {}", self.id(), error);
                surface.fill_error(slot, &error_text(&error));
                self.machine.handle_event(TurnEvent::LLMRequestFailed {
                    error: error.to_string(),
                });

                Ok(TurnOutcome::Failed(error))
            }
        }
    }
}
