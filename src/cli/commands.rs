//! CLI commands
//!
//! Special commands that can be executed in the REPL.

use crate::agent::Agent;

/// Result of parsing a command
pub enum CommandResult {
    /// Continue processing as normal input
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
    /// Clear history
    Clear,
}

/// Parse and handle special commands
pub fn handle_command(input: &str, agent: &mut Agent) -> CommandResult {
    let input = input.trim();
    let cmd = input
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    match cmd.as_str() {
        "exit" | "quit" | "q" => CommandResult::Exit,

        "clear" | "reset" => {
            agent.clear_history();
            CommandResult::Clear
        }

        "help" | "?" => CommandResult::Handled(help_text()),

        "status" => {
            let config = agent.config();
            let status = format!(
                "Tinker Status:\n\
                 ─────────────────────────────\n\
                 Model:      {}\n\
                 Max rounds: {}\n\
                 Transcript: {} turns\n\
                 Log file:   {}\n\
                 Debug:      {}",
                config.api.model,
                config.agent.max_rounds,
                agent.transcript_len(),
                agent.logger().session_path().display(),
                if config.agent.debug { "on" } else { "off" }
            );
            CommandResult::Handled(status)
        }

        "debug" => {
            let new_state = !agent.config().agent.debug;
            agent.set_debug(new_state);
            CommandResult::Handled(format!(
                "Debug mode: {}",
                if new_state { "ON" } else { "OFF" }
            ))
        }

        _ => {
            // Not a command, treat as normal input
            if input.starts_with('/') {
                CommandResult::Handled(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    cmd
                ))
            } else {
                CommandResult::Continue(input.to_string())
            }
        }
    }
}

/// Generate help text
fn help_text() -> String {
    r#"Tinker Commands:
─────────────────────────────────────────────
  help, ?          Show this help message
  exit, quit, q    Exit Tinker
  clear, reset     Clear the conversation transcript
  status           Show current configuration
  debug            Toggle debug mode

Keyboard Shortcuts:
  Ctrl+C           Exit after the current round
  Ctrl+D           Exit Tinker

Tips:
  - The agent can read, list, and edit files in the working directory
  - Session logs are written under the log directory as JSON lines
─────────────────────────────────────────────"#
        .to_string()
}
