//! Prompt composer - merges persona, mood and emoji settings into one system instruction.

use crate::options::{EmojiLevel, Mood, Persona};

/// Persona text followed by the mood text, separated by a single space.
///
/// A mood with empty text contributes nothing. This is also the text the
/// custom-override editor starts from.
pub fn persona_with_mood(persona_text: &str, mood_text: &str) -> String {
    let mut instruction = persona_text.to_string();
    if !mood_text.is_empty() {
        instruction.push(' ');
        instruction.push_str(mood_text);
    }
    instruction
}

/// Build the system instruction.
///
/// When `custom_override` is present it replaces the persona/mood text
/// verbatim; the emoji directive is appended in both cases.
pub fn compose(
    persona_text: &str,
    mood_text: &str,
    emoji: EmojiLevel,
    custom_override: Option<&str>,
) -> String {
    let mut instruction = match custom_override {
        Some(text) => text.to_string(),
        None => persona_with_mood(persona_text, mood_text),
    };

    if let Some(directive) = emoji.directive() {
        instruction.push(' ');
        instruction.push_str(directive);
    }

    instruction
}

/// [`compose`] for registry options.
pub fn compose_for(
    persona: Persona,
    mood: Mood,
    emoji: EmojiLevel,
    custom_override: Option<&str>,
) -> String {
    compose(
        persona.instruction(),
        mood.instruction(),
        emoji,
        custom_override,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Choice;

    #[test]
    fn minimal_emoji_is_persona_plus_mood() {
        for persona in Persona::ALL {
            for mood in Mood::ALL {
                let expected = if mood.instruction().is_empty() {
                    persona.instruction().to_string()
                } else {
                    format!("{} {}", persona.instruction(), mood.instruction())
                };
                assert_eq!(
                    compose_for(*persona, *mood, EmojiLevel::Minimal, None),
                    expected
                );
            }
        }
    }

    #[test]
    fn emoji_directive_appended_once() {
        for level in EmojiLevel::ALL {
            let first = compose_for(Persona::Pirate, Mood::Happy, *level, None);
            let second = compose_for(Persona::Pirate, Mood::Happy, *level, None);
            assert_eq!(first, second);

            match level.directive() {
                Some(directive) => {
                    assert_eq!(first.matches(directive).count(), 1);
                    assert!(first.ends_with(&format!(" {directive}")));
                }
                None => assert_eq!(
                    first,
                    persona_with_mood(Persona::Pirate.instruction(), Mood::Happy.instruction())
                ),
            }
        }
    }

    #[test]
    fn emoji_none_text() {
        let instruction = compose("You are a helpful assistant.", "", EmojiLevel::None, None);
        assert_eq!(
            instruction,
            "You are a helpful assistant. Do not use any emojis in your responses."
        );
    }

    #[test]
    fn custom_override_ignores_persona_and_mood() {
        for persona in Persona::ALL {
            for mood in Mood::ALL {
                assert_eq!(
                    compose_for(*persona, *mood, EmojiLevel::Moderate, Some("X")),
                    "X Use some emojis occasionally in your responses."
                );
                assert_eq!(
                    compose_for(*persona, *mood, EmojiLevel::Minimal, Some("X")),
                    "X"
                );
            }
        }
    }

    #[test]
    fn disabling_override_restores_composition() {
        let with_override = compose_for(Persona::Robot, Mood::Sad, EmojiLevel::Minimal, Some("X"));
        let without = compose_for(Persona::Robot, Mood::Sad, EmojiLevel::Minimal, None);
        assert_eq!(with_override, "X");
        assert!(without.starts_with(Persona::Robot.instruction()));
        assert!(without.ends_with(Mood::Sad.instruction()));
    }
}
