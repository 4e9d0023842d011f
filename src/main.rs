//! Tinker - a minimal interactive coding agent
//!
//! Main entry point for the CLI application.

use std::sync::Arc;

use clap::Parser;
use tinker::{Agent, Config, Repl, SessionLogger};

/// Tinker - a minimal interactive coding agent
#[derive(Parser, Debug)]
#[command(name = "tinker")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model identifier
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Maximum tool-use rounds per input
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Single prompt mode (non-interactive)
    #[arg(long, short = 'p')]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.set_model(model.clone());
    }

    if let Some(max_rounds) = args.max_rounds {
        config.agent.max_rounds = max_rounds;
    }

    if args.debug {
        config.agent.debug = true;
    }

    // Single prompt mode
    if let Some(prompt) = args.prompt {
        let logger = Arc::new(SessionLogger::open(&config.logging.dir)?);
        let mut agent = Agent::with_config(config, logger)?;

        let response = agent.process(&prompt).await?;
        println!("{}", response);
        return Ok(());
    }

    // Interactive REPL mode
    let mut repl = Repl::with_config(config)?;
    repl.run().await?;

    Ok(())
}
