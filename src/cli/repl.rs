//! Line-oriented chat loop over stdin/stdout.
//!
//! The loop is single-flight: the next line is not read until the current
//! turn has completed and rendered.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use mindbridge::application::{
    ExportAnalysisHandler, SendMessageCommand, SendMessageError, SendMessageHandler,
};
use mindbridge::domain::session::SessionState;
use mindbridge::ports::ExportError;

use super::render::render_outcome;

pub struct ChatRepl {
    send: SendMessageHandler,
    export: ExportAnalysisHandler,
    state: SessionState,
    banner: String,
}

enum Command {
    Quit,
    Continue,
}

impl ChatRepl {
    pub fn new(
        send: SendMessageHandler,
        export: ExportAnalysisHandler,
        state: SessionState,
        banner: impl Into<String>,
    ) -> Self {
        Self {
            send,
            export,
            state,
            banner: banner.into(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        self.print_welcome();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print_prompt();
            let Some(line) = lines.next_line().await? else {
                println!("Take care.");
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                match self.handle_command(line).await {
                    Command::Quit => break,
                    Command::Continue => continue,
                }
            }

            self.process_message(line).await;
        }

        info!(
            session_id = %self.state.session_id(),
            turns = self.state.history().len(),
            "Session ended"
        );
        Ok(())
    }

    async fn process_message(&mut self, line: &str) {
        match self
            .send
            .handle(&self.state, SendMessageCommand::new(line))
            .await
        {
            Ok(result) => {
                println!();
                print!("{}", render_outcome(&result.outcome));
                self.state = result.state;
            }
            Err(SendMessageError::EmptyContent) => {}
            Err(err) => println!("{}", err),
        }
    }

    async fn handle_command(&self, cmd: &str) -> Command {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Take care.");
                Command::Quit
            }
            "/export" => {
                match self.export.handle(&self.state).await {
                    Ok(receipt) => println!(
                        "Exported {} turn(s) to {}",
                        receipt.entries,
                        receipt.location.display()
                    ),
                    Err(ExportError::NothingToExport) => {
                        println!("Nothing to export yet.")
                    }
                    Err(err) => {
                        warn!(error = %err, "Export failed");
                        println!("Export failed: {}", err);
                    }
                }
                Command::Continue
            }
            "/help" | "/h" | "/?" => {
                print_help();
                Command::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                Command::Continue
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                 Mindbridge                  │");
        println!("╰─────────────────────────────────────────────╯");
        println!("{}", self.banner);
        println!();
        println!("This is a supportive companion, not a clinician.");
        println!("In a crisis: call or text 988, text HOME to 741741, or call 911.");
        print_help();
    }
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  /export          - Save this session's analysis as JSON");
    println!("  /help, /h, /?    - Show this help");
    println!("  /quit, /exit, /q - Exit");
    println!();
}

fn print_prompt() {
    use std::io::Write;
    print!("you> ");
    let _ = std::io::stdout().flush();
}
