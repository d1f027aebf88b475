//! CLI entrypoint for mindbridge.
//!
//! Wires configuration, logging, adapters and handlers together, then runs
//! the chat loop.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mindbridge::adapters::{
    GeminiProvider, JsonFileExporter, MockAIProvider, StaticSpecialistDirectory,
};
use mindbridge::application::{ExportAnalysisHandler, SendMessageConfig, SendMessageHandler};
use mindbridge::config::{AiProvider, AppConfig, LoggingConfig};
use mindbridge::domain::conversation::PhaseManager;
use mindbridge::domain::session::{SessionState, TurnEngine};
use mindbridge::ports::AIProvider as GenerationProvider;

use cli::{ChatRepl, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging);

    let provider = build_provider(&config)?;
    let provider_info = provider.provider_info();
    info!(provider = %provider_info.name, model = %provider_info.model, "Provider ready");

    let directory = StaticSpecialistDirectory::embedded().context("failed to load specialist roster")?;
    let engine = TurnEngine::new(Arc::new(directory))
        .with_phase_manager(PhaseManager::new(config.conversation.phase_threshold));

    let send = SendMessageHandler::new(provider, engine).with_config(SendMessageConfig {
        timeout: config.ai.timeout(),
        temperature: config.ai.temperature,
        max_tokens: config.ai.max_output_tokens,
    });
    let export = ExportAnalysisHandler::new(Arc::new(JsonFileExporter::new(
        config.export.directory.clone(),
    )));

    let state = SessionState::new(config.conversation.confidence_threshold);
    info!(session_id = %state.session_id(), "Session started");

    let banner = format!("Provider: {} ({})", provider_info.name, provider_info.model);
    ChatRepl::new(send, export, state, banner).run().await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase()));

    // Logs go to stderr so they never interleave with the chat transcript.
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn build_provider(config: &AppConfig) -> Result<Arc<dyn GenerationProvider>> {
    match config.ai.provider {
        AiProvider::Mock => Ok(Arc::new(MockAIProvider::new())),
        AiProvider::Gemini => {
            let gemini = config
                .ai
                .gemini_config()
                .context("MINDBRIDGE__AI__GEMINI_API_KEY is not set")?;
            Ok(Arc::new(GeminiProvider::new(gemini)?))
        }
    }
}
