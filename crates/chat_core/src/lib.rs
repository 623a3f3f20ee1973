//! chat_core - Core types for the persona chat
//!
//! This crate provides the foundational types used across all chat crates:
//! - `options` - Model, Persona, Mood and EmojiLevel registries
//! - `prompt` - system instruction composition
//! - `config` - ChatConfig, the validated per-cycle control snapshot
//! - `settings` - API credentials and initial control values
//! - `message` - role-tagged chat messages

pub mod config;
pub mod message;
pub mod options;
pub mod prompt;
pub mod settings;

// Re-export commonly used types
pub use config::{ChatConfig, ChatConfigBuilder, ConfigError, MaxTokens, Temperature};
pub use message::{Message, Role};
pub use options::{parse_choice, Choice, EmojiLevel, Model, Mood, OptionError, Persona};
pub use prompt::{compose, compose_for, persona_with_mood};
pub use settings::{Defaults, Settings, SettingsError};
