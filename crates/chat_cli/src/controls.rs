//! Control state - the terminal equivalent of the sidebar widgets.
//!
//! Controls are mutable; every interaction cycle turns them into a fresh,
//! immutable `ChatConfig`.

use chat_core::{
    persona_with_mood, ChatConfig, ConfigError, Defaults, EmojiLevel, MaxTokens, Model, Mood,
    Persona, Temperature,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub model: Model,
    pub persona: Persona,
    pub mood: Mood,
    pub temperature: Temperature,
    pub max_tokens: MaxTokens,
    pub emoji: EmojiLevel,
    use_custom: bool,
    custom_text: Option<String>,
}

impl Default for Controls {
    fn default() -> Self {
        Self::from_defaults(&Defaults::default())
    }
}

impl Controls {
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            model: defaults.model,
            persona: defaults.persona,
            mood: defaults.mood,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            emoji: defaults.emoji,
            use_custom: false,
            custom_text: None,
        }
    }

    pub fn set_temperature(&mut self, value: f64) -> Result<(), ConfigError> {
        self.temperature = Temperature::new(value)?;
        Ok(())
    }

    pub fn set_max_tokens(&mut self, value: u32) -> Result<(), ConfigError> {
        self.max_tokens = MaxTokens::new(value)?;
        Ok(())
    }

    pub fn custom_enabled(&self) -> bool {
        self.use_custom
    }

    /// Text of the override editor, if it is switched on.
    pub fn custom_text(&self) -> Option<&str> {
        self.custom_text.as_deref().filter(|_| self.use_custom)
    }

    /// Toggle the manual override.
    ///
    /// Switching it on pre-fills the editor with the current persona and
    /// mood text. Switching it off discards the edited text.
    pub fn set_custom_enabled(&mut self, enabled: bool) {
        if enabled && self.custom_text.is_none() {
            self.custom_text = Some(persona_with_mood(
                self.persona.instruction(),
                self.mood.instruction(),
            ));
        }
        if !enabled {
            self.custom_text = None;
        }
        self.use_custom = enabled;
    }

    /// Replace the override text, switching the override on.
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = Some(text.into());
        self.use_custom = true;
    }

    /// Snapshot the controls for this cycle.
    pub fn config(&self) -> Result<ChatConfig, ConfigError> {
        ChatConfig::builder()
            .model(self.model)
            .persona(self.persona)
            .mood(self.mood)
            .temperature(self.temperature.value())
            .max_tokens(self.max_tokens.value())
            .emoji(self.emoji)
            .custom_prompt(self.custom_text().map(str::to_string))
            .build()
    }
}
