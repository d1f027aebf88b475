//! Command-line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use mindbridge::config::{AiProvider, AppConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// Google Gemini (needs MINDBRIDGE__AI__GEMINI_API_KEY)
    Gemini,
    /// Canned replies, no network
    Mock,
}

impl From<ProviderArg> for AiProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => AiProvider::Gemini,
            ProviderArg::Mock => AiProvider::Mock,
        }
    }
}

/// CLI arguments for mindbridge. Flags override environment configuration.
#[derive(Parser, Debug)]
#[command(name = "mindbridge")]
#[command(author, version, about = "Conversational mental-health support in your terminal")]
#[command(long_about = r#"
Mindbridge is a supportive chat companion. It asks questions first and offers
practical techniques once it understands what you're going through.

It is not a substitute for professional care. If you are in crisis, call or
text 988, text HOME to 741741, or call 911.

Configuration is read from the environment (MINDBRIDGE__SECTION__KEY) and an
optional .env file. Example:
  MINDBRIDGE__AI__GEMINI_API_KEY=... mindbridge
  mindbridge --provider mock
"#)]
pub struct Cli {
    /// Generation provider
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Turns before replies switch to offering techniques
    #[arg(long, value_name = "TURNS")]
    pub phase_threshold: Option<usize>,

    /// Directory for /export reports
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Applies flag overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(provider) = self.provider {
            config.ai.provider = provider.into();
        }
        if let Some(threshold) = self.phase_threshold {
            config.conversation.phase_threshold = threshold;
        }
        if let Some(dir) = &self.export_dir {
            config.export.directory = dir.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }
        match self.verbose {
            0 => {}
            1 => config.logging.level = "debug".to_string(),
            _ => config.logging.level = "trace".to_string(),
        }
    }
}
