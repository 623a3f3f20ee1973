//! LLM Providers
//!
//! This module contains the completion provider implementations.

pub(crate) mod common;
pub mod groq;

pub use groq::GroqProvider;
