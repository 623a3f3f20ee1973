//! Chat configuration - the typed, validated snapshot of every user control.
//!
//! A `ChatConfig` is rebuilt from the controls on every interaction cycle and
//! never mutated afterwards. The system instruction is derived from it, not
//! stored alongside it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::{EmojiLevel, Model, Mood, Persona};
use crate::prompt::compose_for;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Sampling temperature in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Temperature(f64);

impl Temperature {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;
    pub const STEP: f64 = 0.1;

    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ConfigError::OutOfRange {
                field: "temperature",
                min: Self::MIN,
                max: Self::MAX,
                value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Move by `steps` slider notches, staying inside the valid range.
    pub fn nudge(self, steps: i32) -> Self {
        let notches = (self.0 / Self::STEP).round() + steps as f64;
        let value = (notches * Self::STEP).clamp(Self::MIN, Self::MAX);
        Self((value * 10.0).round() / 10.0)
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(0.7)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f64 {
    fn from(value: Temperature) -> Self {
        value.0
    }
}

/// Upper bound on reply length in tokens, `[50, 4096]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MaxTokens(u32);

impl MaxTokens {
    pub const MIN: u32 = 50;
    pub const MAX: u32 = 4096;
    pub const STEP: u32 = 50;

    pub fn new(value: u32) -> Result<Self, ConfigError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ConfigError::OutOfRange {
                field: "max_tokens",
                min: Self::MIN as f64,
                max: Self::MAX as f64,
                value: value as f64,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn nudge(self, steps: i32) -> Self {
        let value = self.0 as i64 + steps as i64 * Self::STEP as i64;
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }
}

impl Default for MaxTokens {
    fn default() -> Self {
        Self(1024)
    }
}

impl TryFrom<u32> for MaxTokens {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaxTokens> for u32 {
    fn from(value: MaxTokens) -> Self {
        value.0
    }
}

/// Immutable snapshot of the chat controls for one interaction cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    model: Model,
    temperature: Temperature,
    max_tokens: MaxTokens,
    persona: Persona,
    mood: Mood,
    emoji: EmojiLevel,
    custom_prompt: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: Temperature::default(),
            max_tokens: MaxTokens::default(),
            persona: Persona::default(),
            mood: Mood::default(),
            emoji: EmojiLevel::default(),
            custom_prompt: None,
        }
    }
}

impl ChatConfig {
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn max_tokens(&self) -> MaxTokens {
        self.max_tokens
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn emoji(&self) -> EmojiLevel {
        self.emoji
    }

    /// Override text, present only while manual editing is switched on.
    pub fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt.as_deref()
    }

    /// The combined directive sent as the conversation's system message.
    pub fn system_instruction(&self) -> String {
        compose_for(self.persona, self.mood, self.emoji, self.custom_prompt())
    }
}

/// Builder for [`ChatConfig`]; raw numeric values are validated in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ChatConfigBuilder {
    model: Model,
    temperature: f64,
    max_tokens: u32,
    persona: Persona,
    mood: Mood,
    emoji: EmojiLevel,
    custom_prompt: Option<String>,
}

impl Default for ChatConfigBuilder {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: Temperature::default().value(),
            max_tokens: MaxTokens::default().value(),
            persona: Persona::default(),
            mood: Mood::default(),
            emoji: EmojiLevel::default(),
            custom_prompt: None,
        }
    }
}

impl ChatConfigBuilder {
    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    pub fn emoji(mut self, emoji: EmojiLevel) -> Self {
        self.emoji = emoji;
        self
    }

    pub fn custom_prompt(mut self, custom_prompt: Option<String>) -> Self {
        self.custom_prompt = custom_prompt;
        self
    }

    pub fn build(self) -> Result<ChatConfig, ConfigError> {
        Ok(ChatConfig {
            model: self.model,
            temperature: Temperature::new(self.temperature)?,
            max_tokens: MaxTokens::new(self.max_tokens)?,
            persona: self.persona,
            mood: self.mood,
            emoji: self.emoji,
            custom_prompt: self.custom_prompt,
        })
    }
}
