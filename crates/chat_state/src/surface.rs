//! Output surface - where a session renders its messages.

use chat_core::Message;

/// Handle to a reply placeholder reserved on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplySlot(pub usize);

/// Rendering target for a chat session.
pub trait ChatSurface {
    /// Show one message.
    fn render_message(&mut self, message: &Message);

    /// Reserve a spot for a reply that has not arrived yet.
    fn reserve_reply(&mut self) -> ReplySlot;

    /// Put the assistant's reply into a reserved spot.
    fn fill_reply(&mut self, slot: ReplySlot, content: &str);

    /// Put an error description into a reserved spot instead of a reply.
    fn fill_error(&mut self, slot: ReplySlot, error: &str);

    /// Redraw the whole visible history.
    fn refresh(&mut self, visible: &[&Message]);
}
