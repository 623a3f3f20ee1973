//! REPL input parsing. Lines starting with `/` are commands, anything else is a chat message.

use chat_core::{EmojiLevel, Model, Mood, OptionError, Persona};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '/{0}'. Type /help for the list of commands")]
    UnknownCommand(String),

    #[error("/{command} needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid value '{value}' for /{command}")]
    InvalidValue {
        command: &'static str,
        value: String,
    },

    #[error(transparent)]
    Option(#[from] OptionError),
}

/// New value for a numeric slider: absolute, or a number of notches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setting<T> {
    Set(T),
    Nudge(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Say(String),
    Model(Model),
    Persona(Persona),
    Mood(Mood),
    Temperature(Setting<f64>),
    MaxTokens(Setting<u32>),
    Emoji(EmojiLevel),
    CustomOn,
    CustomOff,
    CustomSet(String),
    Reset,
    History,
    Status,
    Options,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  /model <name>          Select model (llama3-8b, llama3-70b, mixtral, gemma)
  /persona <name>        Select character (default, mario, sherlock, pirate, shakespeare, robot)
  /mood <name>           Select mood (neutral, happy, sad, excited, grumpy, mysterious)
  /temperature <v|+|->   Set temperature 0.0-1.0, or nudge by 0.1
  /max-tokens <n|+|->    Set response length 50-4096, or nudge by 50
  /emoji <level>         Emoji usage (none, minimal, moderate, abundant)
  /custom on|off         Toggle the custom system prompt
  /custom set <text>     Replace the custom system prompt
  /reset                 Clear the conversation, keeping the system prompt
  /history               Show the conversation so far
  /status                Show current settings
  /options               List all available choices
  /help                  Show this help
  /quit                  Leave (also: exit, quit)";

fn nudge_or<T: std::str::FromStr>(
    command: &'static str,
    arg: &str,
) -> Result<Setting<T>, CommandError> {
    match arg {
        "+" => Ok(Setting::Nudge(1)),
        "-" => Ok(Setting::Nudge(-1)),
        _ => arg
            .parse::<T>()
            .map(Setting::Set)
            .map_err(|_| CommandError::InvalidValue {
                command,
                value: arg.to_string(),
            }),
    }
}

fn required<'a>(
    command: &'static str,
    expected: &'static str,
    arg: &'a str,
) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(arg)
    }
}

/// Parse one trimmed, non-empty input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();

    if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        return Ok(Command::Quit);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Say(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "model" => Ok(Command::Model(required("model", "a model name", arg)?.parse()?)),
        "persona" | "character" => Ok(Command::Persona(
            required("persona", "a persona name", arg)?.parse()?,
        )),
        "mood" => Ok(Command::Mood(required("mood", "a mood name", arg)?.parse()?)),
        "temperature" | "temp" => Ok(Command::Temperature(nudge_or(
            "temperature",
            required("temperature", "a value, + or -", arg)?,
        )?)),
        "max-tokens" | "max_tokens" | "length" => Ok(Command::MaxTokens(nudge_or(
            "max-tokens",
            required("max-tokens", "a value, + or -", arg)?,
        )?)),
        "emoji" => Ok(Command::Emoji(
            required("emoji", "an emoji level", arg)?.parse()?,
        )),
        "custom" => {
            let arg = required("custom", "on, off or set <text>", arg)?;
            let (action, text) = match arg.split_once(char::is_whitespace) {
                Some((action, text)) => (action, text.trim()),
                None => (arg, ""),
            };
            match action.to_ascii_lowercase().as_str() {
                "on" => Ok(Command::CustomOn),
                "off" => Ok(Command::CustomOff),
                "set" => Ok(Command::CustomSet(
                    required("custom", "the prompt text after 'set'", text)?.to_string(),
                )),
                _ => Err(CommandError::InvalidValue {
                    command: "custom",
                    value: arg.to_string(),
                }),
            }
        }
        "reset" => Ok(Command::Reset),
        "history" => Ok(Command::History),
        "status" => Ok(Command::Status),
        "options" => Ok(Command::Options),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}
