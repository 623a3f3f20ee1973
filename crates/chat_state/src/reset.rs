//! Reset controller - clears a session back to its system message.

use crate::machine::TurnEvent;
use crate::session::ChatSession;
use crate::surface::ChatSurface;

impl ChatSession {
    /// Discard all turns, keep message[0] as it is now, and redraw.
    ///
    /// The preserved instruction is whatever the last `sync` left in place,
    /// not a fresh composition from the controls.
    pub fn reset<S: ChatSurface + ?Sized>(&mut self, surface: &mut S) -> String {
        let dropped = self.conversation.len().saturating_sub(1);
        let instruction = self.conversation.reset();
        self.machine.handle_event(TurnEvent::ConversationReset);
        log::info!(
            "Session {} reset, {} message(s) discarded",
            self.id(),
            dropped
        );
        self.render_history(surface);
        instruction
    }
}
