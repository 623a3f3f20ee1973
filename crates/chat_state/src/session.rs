//! Chat session - explicit session-scoped state passed into every event handler.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use chat_core::ChatConfig;

use crate::conversation::Conversation;
use crate::machine::{StateMachine, StateTransition, TurnState};
use crate::surface::ChatSurface;

/// One user's chat session: created on start, dropped on exit.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    pub(crate) conversation: Conversation,
    pub(crate) machine: StateMachine,
}

impl ChatSession {
    /// Start a session seeded with the config's system instruction.
    pub fn start(config: &ChatConfig) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            conversation: Conversation::initialize(config.system_instruction()),
            machine: StateMachine::new(),
        };
        log::info!("Chat session {} started", session.id);
        session
    }

    /// Apply the current cycle's system instruction to message[0].
    pub fn sync(&mut self, config: &ChatConfig) -> bool {
        let changed = self.conversation.sync_system(&config.system_instruction());
        if changed {
            log::debug!("System instruction updated for session {}", self.id);
        }
        changed
    }

    /// Redraw the visible history on `surface`.
    pub fn render_history<S: ChatSurface + ?Sized>(&self, surface: &mut S) {
        let visible: Vec<_> = self.conversation.visible_messages().collect();
        surface.refresh(&visible);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> &TurnState {
        self.machine.state()
    }

    /// Most recent state machine transition, if any event has been handled.
    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.machine.history().last()
    }
}
