//! Turn states - Defines all possible states of a chat session's turn cycle

/// Where the session is within a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TurnState {
    /// Awaiting user input.
    #[default]
    Idle,

    /// The user message is being recorded and rendered.
    ProcessingUserMessage,

    /// Blocked on the completion provider.
    AwaitingLLMResponse,

    /// The last provider call failed. The user may simply submit again.
    Failed {
        error_message: String,
        failed_at: String, // ISO timestamp
    },
}

impl TurnState {
    /// Check if this state allows a new user submission.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed { .. })
    }

    /// Get a human-readable description of the current state.
    pub fn description(&self) -> &str {
        match self {
            Self::Idle => "Ready for input",
            Self::ProcessingUserMessage => "Processing your message",
            Self::AwaitingLLMResponse => "Waiting for AI response",
            Self::Failed { .. } => "Last reply failed",
        }
    }
}
