//! chat_state - Conversation state and turn orchestration
//!
//! This crate owns everything that changes during a chat session: the
//! message history, the turn state machine, and the operations that
//! submit turns and reset the conversation.

pub mod conversation;
pub mod machine;
pub mod orchestrator;
pub mod reset;
pub mod session;
pub mod surface;

// Re-export commonly used types
pub use conversation::Conversation;
pub use machine::{StateMachine, StateTransition, TurnEvent, TurnState};
pub use orchestrator::{error_text, TurnError, TurnOutcome};
pub use session::ChatSession;
pub use surface::{ChatSurface, ReplySlot};
