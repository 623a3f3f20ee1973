//! Terminal surface - renders the chat with colored text.

use std::fmt;
use std::io::{self, IsTerminal, Write};

use chat_core::{Message, Role};
use chat_state::{ChatSurface, ReplySlot};
use colored::Colorize;

pub struct TerminalSurface<W: Write> {
    out: W,
    next_slot: usize,
    /// Whether a pending reply can be drawn and then overwritten in place.
    interactive: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let interactive = out.is_terminal();
        Self::new(out).interactive(interactive)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Plain, non-interactive output: replies are written once they arrive.
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_slot: 0,
            interactive: false,
        }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Start of a filled reply line, clearing the placeholder when one was drawn.
    fn reply_prefix(&self) -> &'static str {
        if self.interactive {
            "\r\x1b[2K"
        } else {
            ""
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.flush()) {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }

    pub fn line(&mut self, text: &str) {
        self.emit(format_args!("{}\n", text));
    }

    pub fn dimmed(&mut self, text: &str) {
        self.emit(format_args!("{}\n", text.dimmed()));
    }

    pub fn info(&mut self, text: &str) {
        self.emit(format_args!("{}\n", text.cyan()));
    }

    pub fn warning(&mut self, text: &str) {
        self.emit(format_args!("{}\n", format!("⚠️  {}", text).yellow()));
    }

    pub fn error(&mut self, text: &str) {
        self.emit(format_args!("{}\n", format!("❌ {}", text).red()));
    }

    pub fn prompt(&mut self) {
        self.emit(format_args!("{} ", "You:".cyan().bold()));
    }

    fn header(role: Role) -> colored::ColoredString {
        match role {
            Role::User => "You:".cyan().bold(),
            Role::Assistant => "Assistant:".green().bold(),
            Role::System => "System:".dimmed(),
        }
    }
}

impl<W: Write> ChatSurface for TerminalSurface<W> {
    fn render_message(&mut self, message: &Message) {
        let header = Self::header(message.role);
        self.emit(format_args!("{} {}\n", header, message.content));
    }

    fn reserve_reply(&mut self) -> ReplySlot {
        let slot = ReplySlot(self.next_slot);
        self.next_slot += 1;
        if self.interactive {
            let header = Self::header(Role::Assistant);
            self.emit(format_args!("{} {}", header, "…".dimmed()));
        }
        slot
    }

    fn fill_reply(&mut self, slot: ReplySlot, content: &str) {
        log::trace!("Filling reply slot {:?}", slot);
        let header = Self::header(Role::Assistant);
        let prefix = self.reply_prefix();
        self.emit(format_args!("{}{} {}\n", prefix, header, content));
    }

    fn fill_error(&mut self, slot: ReplySlot, error: &str) {
        log::trace!("Filling reply slot {:?} with an error", slot);
        let header = Self::header(Role::Assistant);
        let prefix = self.reply_prefix();
        self.emit(format_args!("{}{} {}\n", prefix, header, error.red()));
    }

    fn refresh(&mut self, visible: &[&Message]) {
        self.emit(format_args!("{}\n", "─".repeat(50).dimmed()));
        if visible.is_empty() {
            self.dimmed("(no messages yet)");
        }
        for message in visible {
            self.render_message(message);
        }
    }
}
