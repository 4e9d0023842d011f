//! Interactive REPL for Tinker
//!
//! Provides the main user interaction loop. An interrupt is observed at the
//! prompt boundary, so any in-flight round finishes before the session ends
//! cleanly with a `session_end` record.

use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agent::Agent;
use crate::cli::commands::{handle_command, CommandResult};
use crate::core::{Config, Result};
use crate::logging::{LogEvent, SessionLogger};

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    agent: Agent,
}

impl Repl {
    /// Create a REPL with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let logger = Arc::new(SessionLogger::open(&config.logging.dir)?);
        let agent = Agent::with_config(config, logger)?;
        Ok(Self { agent })
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let logger = self.agent.logger();
        logger.log(&LogEvent::SessionStart);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("You: ");
            io::stdout().flush()?;

            let line = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!("\nGracefully shutting down...");
                    logger.log(&LogEvent::SessionEnd {
                        reason: "interrupt".to_string(),
                    });
                    break;
                }
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                // EOF (Ctrl+D)
                println!("\nGoodbye!");
                logger.log(&LogEvent::SessionEnd {
                    reason: "eof".to_string(),
                });
                break;
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            match handle_command(input, &mut self.agent) {
                CommandResult::Exit => {
                    println!("Goodbye!");
                    logger.log(&LogEvent::SessionEnd {
                        reason: "exit".to_string(),
                    });
                    break;
                }
                CommandResult::Clear => {
                    println!("Conversation cleared.\n");
                }
                CommandResult::Handled(output) => {
                    println!("{}\n", output);
                }
                CommandResult::Continue(input) => {
                    logger.log(&LogEvent::UserInput {
                        message: input.clone(),
                    });

                    match self.agent.process(&input).await {
                        Ok(response) => {
                            println!("\nAgent: {}\n", response);
                            logger.log(&LogEvent::AgentResponse { message: response });
                        }
                        Err(e) => {
                            eprintln!("\nError: {}\n", e);
                            logger.log(&LogEvent::Error {
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        let config = self.agent.config();

        println!("Tinker - interactive coding agent");
        println!("─────────────────────────────────────");
        println!("Model:    {}", config.api.model);
        println!("Log dir:  {}", config.logging.dir.display());
        println!();
        println!("Commands: help, clear, status, debug, exit (Ctrl+C to quit)");
        println!("─────────────────────────────────────");
    }
}
