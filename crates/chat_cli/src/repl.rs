//! Interactive chat loop. Each input line is one interaction cycle:
//! apply control changes, rebuild the config, sync the system message, act.

use std::io::{self, BufRead, Write};

use chat_core::{ChatConfig, Choice, EmojiLevel, Model, Mood, Persona, Settings};
use chat_llm::CompletionProvider;
use chat_state::{ChatSession, TurnError, TurnOutcome};

use crate::commands::{self, Command, Setting, HELP};
use crate::controls::Controls;
use crate::terminal::TerminalSurface;

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<'a, W: Write> {
    settings: &'a Settings,
    provider: &'a dyn CompletionProvider,
    controls: Controls,
    session: ChatSession,
    surface: TerminalSurface<W>,
}

impl<'a, W: Write> Repl<'a, W> {
    pub fn new(
        settings: &'a Settings,
        provider: &'a dyn CompletionProvider,
        controls: Controls,
        surface: TerminalSurface<W>,
    ) -> anyhow::Result<Self> {
        let config = controls.config()?;
        let session = ChatSession::start(&config);
        Ok(Self {
            settings,
            provider,
            controls,
            session,
            surface,
        })
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn into_surface(self) -> TerminalSurface<W> {
        self.surface
    }

    pub fn welcome(&mut self) {
        self.surface.info("🤖 Custom Chatbot with Groq API");
        self.surface
            .dimmed(&format!("Session ID: {}", self.session.id()));
        self.surface
            .dimmed("Type /help for commands, 'exit' or 'quit' to leave");
        self.api_key_banner();
        self.surface.line("");
    }

    fn api_key_banner(&mut self) {
        if let Some(warning) = self.settings.api_key_warning() {
            self.surface.warning(&warning.to_string());
        }
    }

    /// Run one interaction cycle for `line`.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }

        let command = match commands::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.surface.error(&e.to_string());
                return Flow::Continue;
            }
        };

        if let Err(e) = self.apply_control(&command) {
            self.surface.error(&e.to_string());
            return Flow::Continue;
        }

        let config = match self.controls.config() {
            Ok(config) => config,
            Err(e) => {
                self.surface.error(&e.to_string());
                return Flow::Continue;
            }
        };
        self.session.sync(&config);

        match &command {
            Command::Say(text) => {
                if let Err(e) = self.submit(text, &config).await {
                    self.surface.error(&e.to_string());
                }
            }
            Command::Reset => {
                self.session.reset(&mut self.surface);
                self.surface.info("🧹 Conversation cleared");
            }
            Command::History => self.session.render_history(&mut self.surface),
            Command::Status => self.print_status(),
            Command::Options => self.print_options(),
            Command::Help => self.surface.line(HELP),
            Command::Quit => {
                self.surface.info("👋 Goodbye!");
                return Flow::Quit;
            }
            Command::CustomOn | Command::CustomSet(_) => {
                let text = self.controls.custom_text().unwrap_or_default().to_string();
                self.surface.dimmed(&format!("Custom system prompt: {}", text));
            }
            Command::Model(_)
            | Command::Persona(_)
            | Command::Mood(_)
            | Command::Temperature(_)
            | Command::MaxTokens(_)
            | Command::Emoji(_)
            | Command::CustomOff => self.print_setting_changed(&command),
        }

        Flow::Continue
    }

    /// Send one message outside the command loop, e.g. for a one-shot CLI call.
    pub async fn send(&mut self, text: &str) -> anyhow::Result<TurnOutcome> {
        let config = self.controls.config()?;
        self.session.sync(&config);
        Ok(self.submit(text, &config).await?)
    }

    async fn submit(&mut self, text: &str, config: &ChatConfig) -> Result<TurnOutcome, TurnError> {
        let outcome = self
            .session
            .submit_turn(text, config, self.provider, &mut self.surface)
            .await?;
        if let TurnOutcome::Failed(e) = &outcome {
            log::debug!("Turn failed: {:?}", e);
        }
        Ok(outcome)
    }

    fn apply_control(&mut self, command: &Command) -> Result<(), chat_core::ConfigError> {
        match command {
            Command::Model(model) => self.controls.model = *model,
            Command::Persona(persona) => self.controls.persona = *persona,
            Command::Mood(mood) => self.controls.mood = *mood,
            Command::Emoji(level) => self.controls.emoji = *level,
            Command::Temperature(Setting::Set(value)) => self.controls.set_temperature(*value)?,
            Command::Temperature(Setting::Nudge(steps)) => {
                self.controls.temperature = self.controls.temperature.nudge(*steps)
            }
            Command::MaxTokens(Setting::Set(value)) => self.controls.set_max_tokens(*value)?,
            Command::MaxTokens(Setting::Nudge(steps)) => {
                self.controls.max_tokens = self.controls.max_tokens.nudge(*steps)
            }
            Command::CustomOn => self.controls.set_custom_enabled(true),
            Command::CustomOff => self.controls.set_custom_enabled(false),
            Command::CustomSet(text) => self.controls.set_custom_text(text.clone()),
            _ => {}
        }
        Ok(())
    }

    fn print_setting_changed(&mut self, command: &Command) {
        let message = match command {
            Command::Model(model) => format!("Model: {} ({})", model, model.id()),
            Command::Persona(persona) => format!("Character: {}", persona),
            Command::Mood(mood) => format!("Mood: {}", mood),
            Command::Temperature(_) => {
                format!("Temperature: {:.1}", self.controls.temperature.value())
            }
            Command::MaxTokens(_) => format!("Response length: {}", self.controls.max_tokens.value()),
            Command::Emoji(level) => format!("Emoji usage: {}", level),
            Command::CustomOff => "Custom system prompt disabled".to_string(),
            _ => return,
        };
        self.surface.dimmed(&message);
    }

    fn print_status(&mut self) {
        let controls = self.controls.clone();
        let state = self.session.state().description().to_string();
        let turns = self.session.conversation().visible_messages().count();
        let instruction = self
            .session
            .conversation()
            .system_instruction()
            .unwrap_or_default()
            .to_string();

        self.surface.info("Settings");
        self.surface.line(&format!("  Using model: {}", controls.model.id()));
        self.surface.line(&format!("  Character: {}", controls.persona));
        self.surface.line(&format!("  Mood: {}", controls.mood));
        self.surface
            .line(&format!("  Temperature: {:.1}", controls.temperature.value()));
        self.surface
            .line(&format!("  Response length: {}", controls.max_tokens.value()));
        self.surface.line(&format!("  Emoji usage: {}", controls.emoji));
        self.surface.line(&format!(
            "  Custom system prompt: {}",
            if controls.custom_enabled() { "on" } else { "off" }
        ));
        self.surface.line(&format!("  System prompt: {}", instruction));
        self.surface
            .dimmed(&format!("  Session {}: {} message(s), {}", self.session.id(), turns, state));
        if let Some(transition) = self.session.last_transition() {
            let line = format!(
                "  Last transition: {} -> {}",
                transition.from.description(),
                transition.to.description()
            );
            self.surface.dimmed(&line);
        }
        self.api_key_banner();
    }

    pub fn print_options(&mut self) {
        self.print_choices::<Model>("Models", self.controls.model);
        self.print_choices::<Persona>("Characters", self.controls.persona);
        self.print_choices::<Mood>("Moods", self.controls.mood);
        self.print_choices::<EmojiLevel>("Emoji usage", self.controls.emoji);
    }

    fn print_choices<T: Choice>(&mut self, title: &str, current: T) {
        self.surface.info(title);
        for option in T::ALL {
            let marker = if *option == current { "*" } else { " " };
            self.surface.line(&format!(
                " {} {:<20} ({})",
                marker,
                option.label(),
                option.key()
            ));
        }
    }
}

/// Read lines from `input` until EOF or a quit command.
pub async fn run<W: Write, R: BufRead>(repl: &mut Repl<'_, W>, mut input: R) -> io::Result<()> {
    repl.welcome();

    loop {
        repl.surface.prompt();

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            repl.surface.line("");
            break;
        }

        if repl.handle_line(&line).await == Flow::Quit {
            break;
        }
    }

    Ok(())
}
