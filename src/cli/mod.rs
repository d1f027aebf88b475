mod args;
mod render;
mod repl;

pub use args::Cli;
pub use repl::ChatRepl;
