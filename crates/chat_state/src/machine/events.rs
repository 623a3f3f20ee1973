//! Turn events - Defines events that trigger state transitions

/// Events that can move the turn state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// User submitted a new message.
    UserMessageSent,

    /// Completion request was sent to the provider.
    LLMRequestInitiated,

    /// Provider returned a reply.
    LLMResponseReceived,

    /// Provider call failed.
    LLMRequestFailed { error: String },

    /// Conversation was cleared back to its system message.
    ConversationReset,
}
