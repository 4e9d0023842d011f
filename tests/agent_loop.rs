//! Integration tests for the conversation loop
//!
//! Drives the agent with a scripted model provider so every transcript
//! invariant can be checked without a live endpoint.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use tinker::core::{Config, ContentBlock, Result};
use tinker::llm::{ModelProvider, ModelRequest, ModelResponse, StopReason};
use tinker::logging::SessionLogger;
use tinker::{Agent, TinkerError};

/// Provider that replays a fixed script of responses and records every
/// request it receives. When the script runs dry it replays `fallback`.
struct ScriptedProvider {
    script: Mutex<VecDeque<ModelResponse>>,
    fallback: ModelResponse,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedProvider {
    fn new(script: Vec<ModelResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: text_response("fallback"),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn with_fallback(script: Vec<ModelResponse>, fallback: ModelResponse) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn text_response(text: &str) -> ModelResponse {
    ModelResponse {
        content: vec![ContentBlock::Text {
            text: text.to_string(),
        }],
        stop_reason: StopReason::EndTurn,
        model: "scripted".to_string(),
        usage: None,
    }
}

fn tool_use_response(requests: Vec<(&str, &str, serde_json::Value)>) -> ModelResponse {
    ModelResponse {
        content: requests
            .into_iter()
            .map(|(id, name, input)| ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            })
            .collect(),
        stop_reason: StopReason::ToolUse,
        model: "scripted".to_string(),
        usage: None,
    }
}

/// Agent wired to a scripted provider, logging into a temp directory
fn scripted_agent(provider: Arc<ScriptedProvider>, log_dir: &std::path::Path) -> Agent {
    let mut config = Config::default();
    config.logging.dir = log_dir.to_path_buf();
    let logger = Arc::new(SessionLogger::open(log_dir).unwrap());
    Agent::with_provider(config, provider, logger)
}

/// Collect the tool_result blocks of a message
fn tool_results(request: &ModelRequest) -> Vec<(&String, &String, bool)> {
    request
        .messages
        .last()
        .unwrap()
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => Some((tool_use_id, content, *is_error)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_plain_completion_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![text_response("Hello there.")]));
    let mut agent = scripted_agent(provider.clone(), dir.path());

    let answer = agent.process("hi").await.unwrap();
    assert_eq!(answer, "Hello there.");
    // On plain completion the transcript is returned unchanged: just the
    // user turn, with the response delivered alongside it.
    assert_eq!(agent.transcript_len(), 1);
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn test_one_result_per_request_in_a_multi_tool_round() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("present.txt");
    std::fs::write(&present, "alpha").unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_use_response(vec![
            ("toolu_1", "read_file", json!({"path": present.to_str().unwrap()})),
            ("toolu_2", "read_file", json!({"path": "missing.txt"})),
            ("toolu_3", "list_files", json!({"path": dir.path().to_str().unwrap()})),
        ]),
        text_response("done"),
    ]));
    let mut agent = scripted_agent(provider.clone(), dir.path());

    let answer = agent.process("inspect things").await.unwrap();
    assert_eq!(answer, "done");

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);

    // The second model call carries exactly one result per request,
    // gathered into a single user turn.
    let results = tool_results(&requests[1]);
    assert_eq!(results.len(), 3);
    let mut ids: Vec<&str> = results.iter().map(|(id, _, _)| id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["toolu_1", "toolu_2", "toolu_3"]);

    for (id, content, is_error) in results {
        match id.as_str() {
            "toolu_1" => {
                assert!(!is_error);
                assert_eq!(content, "alpha");
            }
            "toolu_2" => {
                // The failure is data for the model, not a crash.
                assert!(is_error);
                assert!(content.contains("missing.txt"));
            }
            "toolu_3" => {
                assert!(!is_error);
                assert!(content.contains("present.txt"));
            }
            other => panic!("unexpected result id {}", other),
        }
    }
}

#[tokio::test]
async fn test_tool_failure_does_not_end_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_use_response(vec![("toolu_1", "read_file", json!({"path": "nope.txt"}))]),
        text_response("recovered"),
    ]));
    let mut agent = scripted_agent(provider.clone(), dir.path());

    let answer = agent.process("read nope.txt").await.unwrap();
    assert_eq!(answer, "recovered");

    // The next input still proceeds on the same transcript.
    let answer = agent.process("anything else?").await.unwrap();
    assert_eq!(answer, "fallback");
}

#[tokio::test]
async fn test_unknown_tool_becomes_an_error_result() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_use_response(vec![("toolu_1", "send_email", json!({"to": "x"}))]),
        text_response("ok"),
    ]));
    let mut agent = scripted_agent(provider.clone(), dir.path());

    agent.process("email someone").await.unwrap();

    let requests = provider.requests();
    let results = tool_results(&requests[1]);
    assert_eq!(results.len(), 1);
    let (id, content, is_error) = &results[0];
    assert_eq!(id.as_str(), "toolu_1");
    assert!(is_error);
    assert!(content.contains("Unknown tool"));
}

#[tokio::test]
async fn test_round_cap_is_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ScriptedProvider::with_fallback(
        Vec::new(),
        tool_use_response(vec![("toolu_1", "list_files", json!({}))]),
    ));
    let mut config = Config::default();
    config.agent.max_rounds = 3;
    config.logging.dir = dir.path().to_path_buf();
    let logger = Arc::new(SessionLogger::open(dir.path()).unwrap());
    let mut agent = Agent::with_provider(config, provider.clone(), logger);

    let err = agent.process("loop forever").await.unwrap_err();
    assert!(matches!(err, TinkerError::RoundLimit(3)));
    // One model call per round, then the cap stops the loop.
    assert_eq!(provider.requests().len(), 3);
}

#[tokio::test]
async fn test_edit_then_read_round_trip_through_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("notes.md");
    let target_str = target.to_str().unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_use_response(vec![(
            "toolu_1",
            "edit_file",
            json!({"path": target_str, "old_str": "", "new_str": "fresh content"}),
        )]),
        tool_use_response(vec![(
            "toolu_2",
            "read_file",
            json!({"path": target_str}),
        )]),
        text_response("created and verified"),
    ]));
    let mut agent = scripted_agent(provider.clone(), dir.path());

    let answer = agent.process("create notes.md").await.unwrap();
    assert_eq!(answer, "created and verified");

    // A missing file is created containing exactly new_str.
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "fresh content");

    // The read round-trips the created content back to the model.
    let requests = provider.requests();
    let results = tool_results(&requests[2]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1, "fresh content");
    assert!(!results[0].2);
}

#[tokio::test]
async fn test_tool_events_reach_the_session_log() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_use_response(vec![
            ("toolu_1", "list_files", json!({"path": dir.path().to_str().unwrap()})),
            ("toolu_2", "read_file", json!({"path": "absent.txt"})),
        ]),
        text_response("done"),
    ]));
    let mut agent = scripted_agent(provider, &log_dir);

    agent.process("look around").await.unwrap();

    let latest = std::fs::read_to_string(log_dir.join("latest.jsonl")).unwrap();
    let events: Vec<serde_json::Value> = latest
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(events.iter().any(|e| e["event"] == "tool_usage"));
    assert!(events
        .iter()
        .any(|e| e["event"] == "tool_error" && e["tool"] == "read_file"));
}
