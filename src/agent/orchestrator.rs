//! Agent orchestrator
//!
//! The conversation loop: send the transcript to the model, execute any
//! requested tools, fold the results back in, and repeat until the model
//! produces a final text answer.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::agent::loop_state::RoundState;
use crate::agent::transcript::Transcript;
use crate::core::{Config, Result, TinkerError, ToolOutcome, ToolUseRequest};
use crate::llm::{AnthropicClient, ModelProvider, ModelRequest, ModelResponse};
use crate::logging::{LogEvent, SessionLogger};
use crate::tools::ToolRegistry;

/// Main agent that orchestrates model calls and tool execution
pub struct Agent {
    /// Configuration
    config: Config,
    /// Model endpoint
    provider: Arc<dyn ModelProvider>,
    /// Tool registry (wrapped in Arc for parallel execution)
    tools: Arc<ToolRegistry>,
    /// Session log sink
    logger: Arc<SessionLogger>,
    /// Conversation transcript
    transcript: Transcript,
}

impl Agent {
    /// Create an agent backed by the Anthropic API
    ///
    /// Fails fast if the API credential is missing from the environment.
    pub fn with_config(config: Config, logger: Arc<SessionLogger>) -> Result<Self> {
        let provider = Arc::new(AnthropicClient::from_config(&config)?);
        Ok(Self::with_provider(config, provider, logger))
    }

    /// Create an agent with a custom model provider
    pub fn with_provider(
        config: Config,
        provider: Arc<dyn ModelProvider>,
        logger: Arc<SessionLogger>,
    ) -> Self {
        Self {
            config,
            provider,
            tools: Arc::new(ToolRegistry::new()),
            logger,
            transcript: Transcript::new(),
        }
    }

    /// Process one user input through the tool-use resolution loop
    ///
    /// The loop ends when the model stops for any reason other than wanting
    /// tools, or when the round cap is hit. Tool failures never abort the
    /// loop; they are reported back to the model as data.
    pub async fn process(&mut self, user_input: &str) -> Result<String> {
        self.transcript.push_user_text(user_input);

        let mut state = RoundState::new(self.config.agent.max_rounds);

        loop {
            let response = self.run_inference().await?;

            let requests = response.tool_uses();

            // Plain completion (or a tool-use stop that requested nothing):
            // the transcript stays as-is and the response is the answer.
            if !response.wants_tools() || requests.is_empty() {
                return Ok(response.text());
            }

            // Append the assistant's raw content, tool-use requests included.
            self.transcript.push_assistant(response.content);

            if self.config.agent.debug {
                let names: Vec<&str> = requests.iter().map(|r| r.name.as_str()).collect();
                eprintln!("DEBUG: executing {} tool(s): {}", names.len(), names.join(", "));
            }

            let outcomes = self.execute_tools(&requests).await;
            self.transcript.push_tool_results(outcomes);

            state.next_round();
            if !state.should_continue() {
                return Err(TinkerError::RoundLimit(state.max_rounds));
            }
        }
    }

    /// Send the full transcript plus the tool descriptors to the model
    async fn run_inference(&self) -> Result<ModelResponse> {
        let request = ModelRequest {
            model: self.config.api.model.clone(),
            max_tokens: self.config.api.max_tokens,
            system: self.config.agent.system_prompt.clone(),
            messages: self.transcript.messages().to_vec(),
            tools: self.tools.definitions(),
        };

        if self.config.agent.debug {
            eprintln!(
                "DEBUG: calling {} with {} turns, {} tools",
                self.provider.name(),
                request.messages.len(),
                request.tools.len()
            );
        }

        self.provider.complete(&request).await
    }

    /// Execute one round of tool-use requests concurrently
    ///
    /// Join-all barrier: every request gets exactly one outcome, in whatever
    /// order the tasks finish, before the model is called again.
    async fn execute_tools(&self, requests: &[ToolUseRequest]) -> Vec<ToolOutcome> {
        let mut set: JoinSet<ToolOutcome> = JoinSet::new();

        for request in requests {
            let tools = Arc::clone(&self.tools);
            let logger = Arc::clone(&self.logger);
            let request = request.clone();

            set.spawn(async move {
                let outcome = tools.execute(&request).await;

                if outcome.success {
                    logger.log(&LogEvent::ToolUsage {
                        tool: outcome.tool_name.clone(),
                        input: request.input.clone(),
                        result: outcome.output.clone(),
                    });
                } else {
                    logger.log(&LogEvent::ToolError {
                        tool: outcome.tool_name.clone(),
                        input: request.input.clone(),
                        error: outcome.output.clone(),
                    });
                }

                outcome
            });
        }

        let mut outcomes = Vec::with_capacity(requests.len());
        while let Some(joined) = set.join_next().await {
            if let Ok(outcome) = joined {
                outcomes.push(outcome);
            }
        }

        // A panicked task still owes its request a result entry.
        for request in requests {
            if !outcomes.iter().any(|o| o.request_id == request.id) {
                outcomes.push(ToolOutcome::failure(
                    &request.id,
                    &request.name,
                    "Tool task failed to complete",
                ));
            }
        }

        outcomes
    }

    /// Clear the conversation transcript
    pub fn clear_history(&mut self) {
        self.transcript.clear();
    }

    /// Get current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the session logger handle
    pub fn logger(&self) -> Arc<SessionLogger> {
        Arc::clone(&self.logger)
    }

    /// Get transcript length in turns
    pub fn transcript_len(&self) -> usize {
        self.transcript.len()
    }

    /// Enable or disable debug output
    pub fn set_debug(&mut self, debug: bool) {
        self.config.agent.debug = debug;
    }
}
