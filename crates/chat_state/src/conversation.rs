//! Conversation state - the ordered message history of one session.
//!
//! The first message is always the system instruction. User and assistant
//! turns are appended in order and never merged.

use chat_core::{Message, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation holding only the system instruction.
    pub fn initialize(instruction: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(instruction)],
        }
    }

    /// Keep message[0] in step with the latest system instruction.
    ///
    /// Returns `true` if the conversation changed.
    pub fn sync_system(&mut self, instruction: &str) -> bool {
        match self.messages.first_mut() {
            Some(first) if first.is_system() => {
                if first.content == instruction {
                    return false;
                }
                first.content = instruction.to_string();
            }
            _ => self.messages.insert(0, Message::system(instruction)),
        }
        true
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// Every message except the system instruction, in order.
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> + Clone + '_ {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    /// Current content of message[0].
    pub fn system_instruction(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.is_system())
            .map(|m| m.content.as_str())
    }

    /// Full history including the system message, as sent to the provider.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every turn, keeping whatever message[0] currently holds.
    ///
    /// The kept text is not recomputed from the controls. Returns it.
    pub fn reset(&mut self) -> String {
        let instruction = self
            .messages
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.messages = vec![Message::system(instruction.clone())];
        instruction
    }
}
