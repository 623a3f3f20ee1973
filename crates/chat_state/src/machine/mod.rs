//! State machine module
//!
//! Tracks where the session is within a single turn.

mod events;
mod states;
mod transitions;

pub use events::TurnEvent;
pub use states::TurnState;
pub use transitions::{StateMachine, StateTransition};
