use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chat_cli::{init_logging, repl, Controls, Repl, TerminalSurface};
use chat_core::{EmojiLevel, Model, Mood, Persona, Settings};
use chat_llm::GroqProvider;
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "persona-chat")]
#[command(about = "Chat with a Groq-hosted model that plays a character")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./persona-chat.toml when present)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Model to use (llama3-8b, llama3-70b, mixtral, gemma)
    #[arg(long, short, global = true)]
    model: Option<Model>,

    /// Character the assistant plays
    #[arg(long, short, global = true)]
    persona: Option<Persona>,

    /// Emotional tone of the character
    #[arg(long, global = true)]
    mood: Option<Mood>,

    /// Sampling temperature (0.0 - 1.0)
    #[arg(long, global = true)]
    temperature: Option<f64>,

    /// Maximum response length in tokens (50 - 4096)
    #[arg(long, global = true)]
    max_tokens: Option<u32>,

    /// Emoji usage (none, minimal, moderate, abundant)
    #[arg(long, global = true)]
    emoji: Option<EmojiLevel>,

    /// Replace the persona and mood text with a custom system prompt
    #[arg(long, global = true)]
    custom_prompt: Option<String>,

    /// Enable debug mode
    #[arg(long, short, global = true, default_value = "false")]
    debug: bool,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat (default)
    Chat,
    /// Send a single message and print the reply
    Send {
        /// Message content
        message: String,
    },
    /// List the available models, characters, moods and emoji levels
    Options,
    /// Print the system prompt the current settings produce
    Prompt,
}

impl Cli {
    fn controls(&self, settings: &Settings) -> anyhow::Result<Controls> {
        let mut controls = Controls::from_defaults(&settings.defaults);
        if let Some(model) = self.model {
            controls.model = model;
        }
        if let Some(persona) = self.persona {
            controls.persona = persona;
        }
        if let Some(mood) = self.mood {
            controls.mood = mood;
        }
        if let Some(temperature) = self.temperature {
            controls.set_temperature(temperature)?;
        }
        if let Some(max_tokens) = self.max_tokens {
            controls.set_max_tokens(max_tokens)?;
        }
        if let Some(emoji) = self.emoji {
            controls.emoji = emoji;
        }
        if let Some(text) = &self.custom_prompt {
            controls.set_custom_text(text.clone());
        }
        Ok(controls)
    }
}

fn provider(settings: &Settings) -> GroqProvider {
    let provider = GroqProvider::new(settings.api_key().unwrap_or_default())
        .with_base_url(settings.api_base.clone());
    match settings.timeout_secs {
        Some(secs) => provider.with_timeout(Duration::from_secs(secs)),
        None => provider,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.log_level.is_some() {
        env_logger::init();
    } else {
        init_logging(cli.debug);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let controls = cli.controls(&settings)?;

    log::debug!("API base: {}", settings.api_base);
    log::debug!("Model: {}", controls.model.id());

    let provider = provider(&settings);
    let mut repl = Repl::new(&settings, &provider, controls, TerminalSurface::stdout())?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            repl::run(&mut repl, io::stdin().lock()).await?;
        }
        Commands::Send { message } => {
            if let Some(warning) = settings.api_key_warning() {
                eprintln!("{}", format!("⚠️  {}", warning).yellow());
            }
            if !repl.send(&message).await?.is_replied() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Options => repl.print_options(),
        Commands::Prompt => {
            let config = repl.controls().config()?;
            println!("{}", config.system_instruction());
        }
    }

    Ok(ExitCode::SUCCESS)
}
