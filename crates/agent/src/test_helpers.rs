//! Shared test helpers: scripted providers and stub tools.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use wayfarer_core::error::{ProviderError, ToolError};
use wayfarer_core::message::{Message, MessageToolCall};
use wayfarer_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use wayfarer_core::tool::{Tool, ToolArgs};

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next entry in the queue and records
/// the request it was given. Panics if more calls are made than scripted.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<ProviderResponse>) -> Self {
        Self::scripted(responses.into_iter().map(Ok).collect())
    }

    /// Script that may include failures.
    pub fn scripted(responses: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider that returns a single text response (no tool calls).
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![make_text_response(text)])
    }

    /// A provider that first returns tool calls, then a final answer.
    pub fn tool_then_answer(tool_calls: Vec<MessageToolCall>, answer: &str) -> Self {
        Self::new(vec![
            make_tool_call_response(tool_calls),
            make_text_response(answer),
        ])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The requests received so far, in order.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        let index = requests.len();

        if index >= responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{index}, have {})",
                responses.len()
            );
        }

        requests.push(request);
        responses[index].clone()
    }
}

/// A provider that requests the same tool on every round, forever.
pub struct AlwaysToolProvider {
    calls: Mutex<usize>,
}

impl AlwaysToolProvider {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Provider for AlwaysToolProvider {
    fn name(&self) -> &str {
        "always_tool"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        let call = make_tool_call(&format!("loop{}", *calls), "echo", r#"{"query":"again"}"#);
        Ok(make_tool_call_response(vec![call]))
    }
}

/// A provider that never answers within any reasonable deadline.
pub struct StalledProvider;

#[async_trait]
impl Provider for StalledProvider {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(ProviderError::EmptyResponse)
    }
}

/// Create a simple text response (no tool calls).
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Create a response that requests tools.
pub fn make_tool_call_response(tool_calls: Vec<MessageToolCall>) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant_with_calls("", tool_calls),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// Helper to create a tool call with raw argument text.
pub fn make_tool_call(id: &str, name: &str, arguments: &str) -> MessageToolCall {
    MessageToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments: arguments.to_string(),
    }
}

/// A tool that always returns the same text.
pub struct FixedTool {
    pub name: &'static str,
    pub output: &'static str,
}

#[async_trait]
impl Tool for FixedTool {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "Returns a fixed answer"
    }
    async fn execute(&self, _args: &ToolArgs) -> Result<String, ToolError> {
        Ok(self.output.to_string())
    }
}

/// A tool that echoes its `query`.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Echoes the query back"
    }
    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        Ok(format!("echo: {}", args.require_text("query")?))
    }
}

/// A tool whose body always fails.
pub struct BrokenTool;

#[async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        "broken"
    }
    fn description(&self) -> &str {
        "Always fails"
    }
    async fn execute(&self, _args: &ToolArgs) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed {
            tool_name: "broken".into(),
            reason: "backend offline".into(),
        })
    }
}
