//! Option registry - the fixed sets of models, personas, moods and emoji levels
//!
//! Every set is a closed enum with an `ALL` table in presentation order.
//! Lookups from an enum value to its text can never fail; only parsing
//! free-form user input (`FromStr`) can.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a user-supplied name does not match any option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Unknown {kind} '{value}'. Available: {available}")]
    Unknown {
        kind: &'static str,
        value: String,
        available: String,
    },
}

/// Shared behaviour of the enumerated option sets.
pub trait Choice: Copy + PartialEq + 'static {
    /// Human readable name of the set ("model", "persona", ...).
    const KIND: &'static str;
    /// All options in presentation order.
    const ALL: &'static [Self];

    /// Label shown to the user.
    fn label(self) -> &'static str;

    /// Short, shell-friendly key.
    fn key(self) -> &'static str;

    /// Extra names accepted when parsing.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a label, key or alias to an option, ignoring case and punctuation.
pub fn parse_choice<T: Choice>(input: &str) -> Result<T, OptionError> {
    let wanted = normalize(input);
    T::ALL
        .iter()
        .copied()
        .find(|option| {
            !wanted.is_empty()
                && (normalize(option.label()) == wanted
                    || normalize(option.key()) == wanted
                    || option.aliases().iter().any(|a| normalize(a) == wanted))
        })
        .ok_or_else(|| OptionError::Unknown {
            kind: T::KIND,
            value: input.to_string(),
            available: T::ALL
                .iter()
                .map(|o| o.key())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

macro_rules! impl_choice_conversions {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = OptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_choice(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = OptionError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                parse_choice(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.key().to_string()
            }
        }
    };
}

// ========== Models ==========

/// Language models offered by the completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Model {
    #[default]
    Llama3Small,
    Llama3Large,
    Mixtral,
    Gemma,
}

impl Model {
    /// Provider-side model identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Llama3Small => "llama3-8b-8192",
            Self::Llama3Large => "llama3-70b-8192",
            Self::Mixtral => "mixtral-8x7b-32768",
            Self::Gemma => "gemma-7b-it",
        }
    }
}

impl Choice for Model {
    const KIND: &'static str = "model";
    const ALL: &'static [Self] = &[
        Self::Llama3Small,
        Self::Llama3Large,
        Self::Mixtral,
        Self::Gemma,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Llama3Small => "Llama 3 8B",
            Self::Llama3Large => "Llama 3 70B",
            Self::Mixtral => "Mixtral 8x7B",
            Self::Gemma => "Gemma 7B",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Llama3Small => "llama3-8b",
            Self::Llama3Large => "llama3-70b",
            Self::Mixtral => "mixtral",
            Self::Gemma => "gemma",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Llama3Small => &["llama3-8b-8192"],
            Self::Llama3Large => &["llama3-70b-8192"],
            Self::Mixtral => &["mixtral-8x7b-32768", "mixtral-8x7b"],
            Self::Gemma => &["gemma-7b-it", "gemma-7b"],
        }
    }
}

impl_choice_conversions!(Model);

// ========== Personas ==========

/// Character the assistant plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Persona {
    #[default]
    DefaultAssistant,
    Mario,
    SherlockHolmes,
    Pirate,
    Shakespeare,
    Robot,
}

impl Persona {
    /// Instruction fragment describing this character.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::DefaultAssistant => "You are a helpful assistant.",
            Self::Mario => {
                "You are Mario from Super Mario Bros. Respond with Mario's enthusiasm, use his \
                 catchphrases like 'It's-a me, Mario!' and 'Wahoo!' Make references to Princess \
                 Peach, Luigi, Bowser, and the Mushroom Kingdom. End messages with 'Let's-a go!'"
            }
            Self::SherlockHolmes => {
                "You are Sherlock Holmes, the world's greatest detective. Be analytical, \
                 observant, and use complex vocabulary. Make deductions based on small details. \
                 Occasionally mention Watson, London, or your address at 221B Baker Street."
            }
            Self::Pirate => {
                "You are a pirate from the golden age of piracy. Use pirate slang, say 'Arr', \
                 'matey', and 'ye' frequently. Talk about treasure, the sea, your ship, and \
                 adventures. Refer to the user as 'landlubber' or 'me hearty'."
            }
            Self::Shakespeare => {
                "You are William Shakespeare. Speak in an eloquent, poetic manner using Early \
                 Modern English. Use thee, thou, thy, and hath. Include metaphors, similes, and \
                 occasionally quote from your famous plays and sonnets."
            }
            Self::Robot => {
                "You are a robot with artificial intelligence. Speak in a logical, precise \
                 manner with occasional computing terminology. Sometimes add *processing* or \
                 *analyzing* actions. Use phrases like 'Affirmative' instead of 'Yes'."
            }
        }
    }
}

impl Choice for Persona {
    const KIND: &'static str = "persona";
    const ALL: &'static [Self] = &[
        Self::DefaultAssistant,
        Self::Mario,
        Self::SherlockHolmes,
        Self::Pirate,
        Self::Shakespeare,
        Self::Robot,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::DefaultAssistant => "Default Assistant",
            Self::Mario => "Mario",
            Self::SherlockHolmes => "Sherlock Holmes",
            Self::Pirate => "Pirate",
            Self::Shakespeare => "Shakespeare",
            Self::Robot => "Robot",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::DefaultAssistant => "default",
            Self::Mario => "mario",
            Self::SherlockHolmes => "sherlock",
            Self::Pirate => "pirate",
            Self::Shakespeare => "shakespeare",
            Self::Robot => "robot",
        }
    }
}

impl_choice_conversions!(Persona);

// ========== Moods ==========

/// Emotional tone layered on top of the persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mood {
    #[default]
    Neutral,
    Happy,
    Sad,
    Excited,
    Grumpy,
    Mysterious,
}

impl Mood {
    /// Instruction fragment for this mood. Empty for `Neutral`.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Neutral => "",
            Self::Happy => {
                "You are extremely happy, cheerful, and optimistic. Use upbeat language, \
                 exclamation marks, and express enthusiasm for everything."
            }
            Self::Sad => {
                "You are feeling melancholic and somewhat pessimistic. Express things with a \
                 hint of sadness and occasionally sigh."
            }
            Self::Excited => {
                "You are very excited and energetic! Use LOTS of exclamation points!!! Express \
                 wonder and amazement at everything!"
            }
            Self::Grumpy => {
                "You are grumpy and slightly annoyed. Complain about minor inconveniences and \
                 use sarcasm occasionally."
            }
            Self::Mysterious => {
                "You are mysterious and enigmatic. Speak in riddles sometimes and hint at \
                 knowing more than you reveal."
            }
        }
    }
}

impl Choice for Mood {
    const KIND: &'static str = "mood";
    const ALL: &'static [Self] = &[
        Self::Neutral,
        Self::Happy,
        Self::Sad,
        Self::Excited,
        Self::Grumpy,
        Self::Mysterious,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Excited => "Excited",
            Self::Grumpy => "Grumpy",
            Self::Mysterious => "Mysterious",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Excited => "excited",
            Self::Grumpy => "grumpy",
            Self::Mysterious => "mysterious",
        }
    }
}

impl_choice_conversions!(Mood);

// ========== Emoji levels ==========

/// How freely the assistant should use emojis. Ordered from least to most.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum EmojiLevel {
    None,
    #[default]
    Minimal,
    Moderate,
    Abundant,
}

impl EmojiLevel {
    /// Sentence appended to the system instruction, if any.
    ///
    /// `Minimal` is the model's baseline and adds nothing.
    pub fn directive(self) -> Option<&'static str> {
        match self {
            Self::None => Some("Do not use any emojis in your responses."),
            Self::Minimal => None,
            Self::Moderate => Some("Use some emojis occasionally in your responses."),
            Self::Abundant => Some("Use plenty of relevant emojis throughout your responses."),
        }
    }
}

impl Choice for EmojiLevel {
    const KIND: &'static str = "emoji level";
    const ALL: &'static [Self] = &[Self::None, Self::Minimal, Self::Moderate, Self::Abundant];

    fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Minimal => "Minimal",
            Self::Moderate => "Moderate",
            Self::Abundant => "Abundant",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Abundant => "abundant",
        }
    }
}

impl_choice_conversions!(EmojiLevel);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_ids_match_provider_names() {
        let ids: Vec<_> = Model::ALL.iter().map(|m| m.id()).collect();
        assert_eq!(
            ids,
            vec![
                "llama3-8b-8192",
                "llama3-70b-8192",
                "mixtral-8x7b-32768",
                "gemma-7b-it"
            ]
        );
    }

    #[test]
    fn neutral_is_the_only_empty_mood() {
        for mood in Mood::ALL {
            assert_eq!(mood.instruction().is_empty(), *mood == Mood::Neutral);
        }
    }

    #[test]
    fn parse_accepts_labels_keys_and_aliases() {
        assert_eq!("Sherlock Holmes".parse::<Persona>(), Ok(Persona::SherlockHolmes));
        assert_eq!("sherlock".parse::<Persona>(), Ok(Persona::SherlockHolmes));
        assert_eq!("sherlock_holmes".parse::<Persona>(), Ok(Persona::SherlockHolmes));
        assert_eq!("Llama 3 70B".parse::<Model>(), Ok(Model::Llama3Large));
        assert_eq!("mixtral-8x7b-32768".parse::<Model>(), Ok(Model::Mixtral));
        assert_eq!("ABUNDANT".parse::<EmojiLevel>(), Ok(EmojiLevel::Abundant));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "Luigi".parse::<Persona>().unwrap_err();
        let OptionError::Unknown { kind, value, available } = err;
        assert_eq!(kind, "persona");
        assert_eq!(value, "Luigi");
        assert!(available.contains("mario"));

        assert!("".parse::<Mood>().is_err());
    }

    #[test]
    fn defaults_match_initial_controls() {
        assert_eq!(Model::default(), Model::Llama3Small);
        assert_eq!(Persona::default(), Persona::DefaultAssistant);
        assert_eq!(Mood::default(), Mood::Neutral);
        assert_eq!(EmojiLevel::default(), EmojiLevel::Minimal);
    }

    #[test]
    fn emoji_levels_are_ordered() {
        assert!(EmojiLevel::None < EmojiLevel::Minimal);
        assert!(EmojiLevel::Moderate < EmojiLevel::Abundant);
        assert!(EmojiLevel::Minimal.directive().is_none());
    }

    #[test]
    fn serde_uses_keys_and_accepts_labels() {
        let json = serde_json::to_string(&Persona::SherlockHolmes).unwrap();
        assert_eq!(json, "\"sherlock\"");
        let parsed: Mood = serde_json::from_str("\"Mysterious\"").unwrap();
        assert_eq!(parsed, Mood::Mysterious);
        assert!(serde_json::from_str::<Model>("\"gpt-4\"").is_err());
    }
}
