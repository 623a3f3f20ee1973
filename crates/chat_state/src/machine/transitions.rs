//! State transitions - FSM transition logic
//!
//! Implements the state machine that handles event-driven state transitions.

use super::events::TurnEvent;
use super::states::TurnState;

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The state before the transition.
    pub from: TurnState,
    /// The state after the transition.
    pub to: TurnState,
    /// The event that triggered the transition.
    pub event: TurnEvent,
    /// Whether the state actually changed.
    pub changed: bool,
}

/// State machine for a session's turn cycle.
#[derive(Debug, Clone)]
pub struct StateMachine {
    /// Current state.
    current_state: TurnState,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine in Idle state.
    pub fn new() -> Self {
        Self::with_state(TurnState::Idle)
    }

    /// Create a state machine with a specific initial state.
    pub fn with_state(state: TurnState) -> Self {
        Self {
            current_state: state,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &TurnState {
        &self.current_state
    }

    /// Get the transition history.
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Handle an event and transition to a new state.
    pub fn handle_event(&mut self, event: TurnEvent) -> StateTransition {
        let old_state = self.current_state.clone();
        let new_state = Self::compute_next_state(&old_state, &event);
        let changed = old_state != new_state;

        if changed {
            log::debug!("Turn state: {:?} -> {:?}", old_state, new_state);
        } else {
            log::trace!("Turn event {:?} ignored in {:?}", event, old_state);
        }

        self.current_state = new_state.clone();

        let transition = StateTransition {
            from: old_state,
            to: new_state,
            event,
            changed,
        };

        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Compute the next state given current state and event.
    fn compute_next_state(state: &TurnState, event: &TurnEvent) -> TurnState {
        use TurnEvent::*;
        use TurnState::*;

        match (state, event) {
            (current, UserMessageSent) if current.accepts_user_input() => ProcessingUserMessage,

            (ProcessingUserMessage, LLMRequestInitiated) => AwaitingLLMResponse,

            (AwaitingLLMResponse, LLMResponseReceived) => Idle,
            (AwaitingLLMResponse, LLMRequestFailed { error }) => Failed {
                error_message: error.clone(),
                failed_at: chrono::Utc::now().to_rfc3339(),
            },

            // Reset always returns to Idle, even mid-turn.
            (_, ConversationReset) => Idle,

            // ========== Default: No transition ==========
            _ => state.clone(),
        }
    }

    /// Check if a transition is valid without executing it.
    pub fn can_transition(&self, event: &TurnEvent) -> bool {
        Self::compute_next_state(&self.current_state, event) != self.current_state
    }
}
