//! The agent reasoning loop implementation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use wayfarer_config::AppConfig;
use wayfarer_core::error::ProviderError;
use wayfarer_core::event::{DomainEvent, EventBus};
use wayfarer_core::message::{Conversation, ConversationId, Message, MessageToolCall};
use wayfarer_core::provider::{Provider, ProviderRequest, ProviderResponse};
use wayfarer_core::tool::{ToolArgs, ToolRegistry};

use crate::prompt;

/// Returned in place of an answer when the step ceiling is hit.
pub const CEILING_MESSAGE: &str = "Sorry, I reached the maximum number of reasoning steps \
while handling your request. Please start a new conversation.";

pub const DEFAULT_MAX_STEPS: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the loop is in its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// No turn in progress (fresh, reset, or between turns before the first call)
    Idle,
    AwaitingModel,
    DispatchingTools,
    /// The last turn ended with a model answer
    Done,
    /// The last turn ran out of steps
    CeilingReached,
    /// The last turn ended with a gateway failure
    Failed,
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Answered,
    CeilingReached,
}

/// The result of one `process_turn` call.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// The model's final text, or [`CEILING_MESSAGE`]
    pub answer: String,
    pub outcome: Outcome,
    /// Gateway round-trips made
    pub steps: usize,
    /// Tool calls that produced a tool message
    pub tool_calls_made: usize,
    /// Tool calls dropped for bad arguments or an unknown name
    pub skipped_calls: usize,
}

/// The bounded reasoning loop. Owns its conversation context.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,

    /// Event bus for domain events
    event_bus: Arc<EventBus>,

    /// Inserted as the first message of every fresh context
    system_prompt: String,

    /// Gateway round-trips allowed per turn
    max_steps: usize,

    /// Deadline for each gateway call
    request_timeout: Duration,

    conversation: Conversation,
    state: LoopState,
}

impl AgentLoop {
    /// Create a new agent loop with an empty context.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let system_prompt = prompt::system_prompt(&tools);
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            event_bus,
            system_prompt,
            max_steps: DEFAULT_MAX_STEPS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            conversation: Conversation::new(),
            state: LoopState::Idle,
        }
    }

    /// Create a loop with the model, limits and prompt taken from configuration.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let mut agent = Self::new(
            provider,
            &config.default_model,
            config.default_temperature,
            tools,
            event_bus,
        )
        .with_max_steps(config.agent.max_steps)
        .with_request_timeout(Duration::from_secs(config.agent.request_timeout_secs));

        if let Some(max) = config.default_max_tokens {
            agent = agent.with_max_tokens(max);
        }
        if let Some(prompt) = &config.agent.system_prompt {
            agent = agent.with_system_prompt(prompt);
        }
        agent
    }

    /// Set the maximum number of gateway round-trips per turn (at least 1).
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max.max(1);
        self
    }

    /// Set the deadline for each gateway call.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the default system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Label the context, e.g. with the session id it serves.
    pub fn with_conversation_id(mut self, id: impl AsRef<str>) -> Self {
        self.conversation.id = ConversationId::from(id.as_ref());
        self
    }

    /// Process a user input and return the final text.
    pub async fn process(&mut self, input: &str) -> Result<String, wayfarer_core::Error> {
        Ok(self.process_turn(input).await?.answer)
    }

    /// Process a user input and report how the turn went.
    ///
    /// Only a gateway failure is returned as an error. Unparseable arguments
    /// and unknown tools are skipped; tool failures become tool messages.
    pub async fn process_turn(&mut self, input: &str) -> Result<TurnOutcome, wayfarer_core::Error> {
        info!(
            conversation_id = %self.conversation.id,
            messages = self.conversation.len(),
            "Processing user input"
        );

        if self.conversation.is_empty() {
            self.conversation.push(Message::system(&self.system_prompt))?;
        }
        self.conversation.push(Message::user(input))?;

        let tool_definitions = self.tools.definitions();
        let mut steps = 0;
        let mut tool_calls_made = 0;
        let mut skipped_calls = 0;

        while steps < self.max_steps {
            steps += 1;
            self.state = LoopState::AwaitingModel;

            debug!(
                conversation_id = %self.conversation.id,
                step = steps,
                "Agent loop step"
            );

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: self.conversation.messages().to_vec(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = match self.call_provider(request).await {
                Ok(response) => response,
                Err(e) => {
                    self.state = LoopState::Failed;
                    warn!(conversation_id = %self.conversation.id, error = %e, "Provider call failed");
                    self.event_bus.publish(DomainEvent::ErrorOccurred {
                        context: format!("provider:{}", self.provider.name()),
                        error_message: e.to_string(),
                        timestamp: Utc::now(),
                    });
                    return Err(e.into());
                }
            };

            self.event_bus.publish(DomainEvent::ResponseGenerated {
                conversation_id: self.conversation.id.to_string(),
                model: response.model.clone(),
                tokens_used: response.usage.as_ref().map_or(0, |u| u.total_tokens),
                tool_calls: response.message.tool_calls.len(),
                timestamp: Utc::now(),
            });

            let message = response.message;
            if !message.has_tool_calls() {
                let answer = message.content.clone();
                self.append(message)?;
                self.state = LoopState::Done;
                return Ok(TurnOutcome {
                    answer,
                    outcome: Outcome::Answered,
                    steps,
                    tool_calls_made,
                    skipped_calls,
                });
            }

            debug!(tool_count = message.tool_calls.len(), "Executing tool calls");
            let calls = message.tool_calls.clone();
            self.append(message)?;
            self.state = LoopState::DispatchingTools;

            for call in &calls {
                if self.dispatch(call).await? {
                    tool_calls_made += 1;
                } else {
                    skipped_calls += 1;
                }
            }
        }

        warn!(
            conversation_id = %self.conversation.id,
            steps,
            "Step ceiling reached without a final answer"
        );
        self.state = LoopState::CeilingReached;
        Ok(TurnOutcome {
            answer: CEILING_MESSAGE.to_string(),
            outcome: Outcome::CeilingReached,
            steps,
            tool_calls_made,
            skipped_calls,
        })
    }

    async fn call_provider(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        match tokio::time::timeout(self.request_timeout, self.provider.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(format!(
                "no response from {} within {}s",
                self.provider.name(),
                self.request_timeout.as_secs_f32()
            ))),
        }
    }

    /// Run one tool call. Returns whether a tool message was appended.
    async fn dispatch(&mut self, call: &MessageToolCall) -> Result<bool, wayfarer_core::Error> {
        let args = match ToolArgs::parse(&call.arguments) {
            Ok(args) => args,
            Err(e) => {
                warn!(tool = %call.name, call_id = %call.id, error = %e, "Skipping tool call with unparseable arguments");
                self.publish_skip(call, e.to_string());
                return Ok(false);
            }
        };

        let tools = Arc::clone(&self.tools);
        let Some(tool) = tools.get(&call.name) else {
            debug!(tool = %call.name, call_id = %call.id, "Skipping call to unknown tool");
            self.publish_skip(call, format!("unknown tool '{}'", call.name));
            return Ok(false);
        };

        let start = Instant::now();
        let result = tool.call(&args).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        self.event_bus.publish(DomainEvent::ToolExecuted {
            tool_name: call.name.clone(),
            success: result.is_ok(),
            duration_ms,
            timestamp: Utc::now(),
        });

        let content = match result {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                format!("Tool execution failed: {e}")
            }
        };

        self.append(Message::tool_result(&call.id, content))?;
        Ok(true)
    }

    /// Push a mid-turn message. A rejected message fails the turn.
    fn append(&mut self, message: Message) -> Result<(), wayfarer_core::Error> {
        if let Err(e) = self.conversation.push(message) {
            self.state = LoopState::Failed;
            warn!(conversation_id = %self.conversation.id, error = %e, "Context rejected message");
            self.event_bus.publish(DomainEvent::ErrorOccurred {
                context: "context".into(),
                error_message: e.to_string(),
                timestamp: Utc::now(),
            });
            return Err(e.into());
        }
        Ok(())
    }

    fn publish_skip(&self, call: &MessageToolCall, reason: String) {
        self.event_bus.publish(DomainEvent::ToolCallSkipped {
            call_id: call.id.clone(),
            tool_name: call.name.clone(),
            reason,
            timestamp: Utc::now(),
        });
    }

    /// Drop the whole context. The next turn starts with a fresh system message.
    pub fn reset_context(&mut self) {
        self.conversation.clear();
        self.state = LoopState::Idle;
    }

    /// Read-only view of the context.
    pub fn context(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}
