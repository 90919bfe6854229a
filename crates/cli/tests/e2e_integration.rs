//! End-to-end integration tests for the Wayfarer travel agent.
//!
//! These tests exercise the full pipeline from user input to agent output:
//! provider rounds, real travel tools, the HTTP API and configuration.

use std::sync::Arc;

use wayfarer_agent::{AgentLoop, CEILING_MESSAGE, LoopState, Outcome};
use wayfarer_config::AppConfig;
use wayfarer_core::error::ProviderError;
use wayfarer_core::event::{DomainEvent, EventBus};
use wayfarer_core::message::{Message, MessageToolCall, Role};
use wayfarer_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use wayfarer_core::tool::ToolArgs;
use wayfarer_providers::OfflineProvider;
use wayfarer_tools::default_registry;

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence.
struct ScriptedProvider {
    responses: std::sync::Mutex<Vec<ProviderResponse>>,
    call_count: std::sync::Mutex<usize>,
}

impl ScriptedProvider {
    fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            call_count: std::sync::Mutex::new(0),
        }
    }

    fn tool_then_text(tool_calls: Vec<MessageToolCall>, answer: &str) -> Self {
        Self::new(vec![tool_response(tool_calls), text_response(answer)])
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        if *count >= responses.len() {
            panic!(
                "ScriptedProvider exhausted: call #{}, have {}",
                *count,
                responses.len()
            );
        }
        let resp = responses[*count].clone();
        *count += 1;
        Ok(resp)
    }
}

/// Asks for the weather on every round and never answers.
struct RestlessProvider;

#[async_trait::async_trait]
impl Provider for RestlessProvider {
    fn name(&self) -> &str {
        "restless"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let id = format!("call_{}", request.messages.len());
        Ok(tool_response(vec![MessageToolCall {
            id,
            name: "weather_query".into(),
            arguments: r#"{"query":"Beijing"}"#.into(),
        }]))
    }
}

fn usage() -> Option<Usage> {
    Some(Usage {
        prompt_tokens: 10,
        completion_tokens: 5,
        total_tokens: 15,
    })
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: usage(),
        model: "mock-model".into(),
    }
}

fn tool_response(tool_calls: Vec<MessageToolCall>) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant_with_calls("", tool_calls),
        usage: usage(),
        model: "mock-model".into(),
    }
}

fn make_tool_call(name: &str, args: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: format!("call_{name}"),
        name: name.to_string(),
        arguments: serde_json::to_string(&args).unwrap(),
    }
}

fn agent_with(provider: Arc<dyn Provider>) -> AgentLoop {
    AgentLoop::new(
        provider,
        "mock-model",
        0.7,
        Arc::new(default_registry()),
        Arc::new(EventBus::default()),
    )
}

// ── E2E: Agent Loop With Real Tools ──────────────────────────────────────

#[tokio::test]
async fn e2e_weather_tool_then_answer() {
    let provider = Arc::new(ScriptedProvider::tool_then_text(
        vec![make_tool_call(
            "weather_query",
            serde_json::json!({"query": "北京"}),
        )],
        "Beijing is sunny today.",
    ));
    let mut agent = agent_with(provider.clone());

    let outcome = agent
        .process_turn("北京的天气怎么样？")
        .await
        .expect("Agent should succeed");

    assert_eq!(outcome.answer, "Beijing is sunny today.");
    assert_eq!(outcome.outcome, Outcome::Answered);
    assert_eq!(outcome.tool_calls_made, 1);
    assert_eq!(provider.calls(), 2);

    let tool_msg = &agent.context()[3];
    assert_eq!(tool_msg.role, Role::Tool);
    assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_weather_query"));
    assert!(tool_msg.content.contains("Weather in Beijing"));
}

#[tokio::test]
async fn e2e_several_tools_in_one_round() {
    let provider = Arc::new(ScriptedProvider::tool_then_text(
        vec![
            make_tool_call("attraction_recommend", serde_json::json!({"query": "Hangzhou"})),
            make_tool_call("food_recommend", serde_json::json!({"query": "Hangzhou"})),
            make_tool_call("visa_lookup", serde_json::json!({"query": "Hangzhou"})),
        ],
        "Here is your Hangzhou plan.",
    ));
    let mut agent = agent_with(provider);

    let outcome = agent.process_turn("Plan my Hangzhou trip").await.unwrap();
    assert_eq!(outcome.tool_calls_made, 2);
    assert_eq!(outcome.skipped_calls, 1);

    let tool_contents: Vec<&str> = agent
        .context()
        .iter()
        .filter(|m| m.role == Role::Tool)
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(tool_contents.len(), 2);
    assert!(tool_contents[0].starts_with("Top attractions in Hangzhou"));
    assert!(tool_contents[1].starts_with("Local food in Hangzhou"));
}

#[tokio::test]
async fn e2e_offline_provider_full_pipeline() {
    let mut agent = agent_with(Arc::new(OfflineProvider::new()));

    let reply = agent.process("What should I eat in Chengdu?").await.unwrap();
    assert!(reply.contains("Local food in Chengdu"));
    assert_eq!(agent.state(), LoopState::Done);

    // A follow-up without a keyword gets the capability overview.
    let reply = agent.process("thanks").await.unwrap();
    assert!(!reply.is_empty());
    let systems = agent.context().iter().filter(|m| m.role == Role::System).count();
    assert_eq!(systems, 1);
}

#[tokio::test]
async fn e2e_restless_model_hits_ceiling() {
    let events = Arc::new(EventBus::default());
    let mut rx = events.subscribe();
    let mut agent = AgentLoop::new(
        Arc::new(RestlessProvider),
        "mock-model",
        0.7,
        Arc::new(default_registry()),
        events,
    )
    .with_max_steps(4);

    let outcome = agent.process_turn("weather forever").await.unwrap();
    assert_eq!(outcome.answer, CEILING_MESSAGE);
    assert_eq!(outcome.outcome, Outcome::CeilingReached);
    assert_eq!(outcome.steps, 4);
    assert_eq!(agent.context().len(), 2 + 4 * 2);

    let mut responses = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event.as_ref(), DomainEvent::ResponseGenerated { .. }) {
            responses += 1;
        }
    }
    assert_eq!(responses, 4);
}

#[tokio::test]
async fn e2e_all_tools_executable() {
    let registry = default_registry();

    let expected_tools = [
        ("weather_query", "Weather in Shanghai"),
        ("attraction_recommend", "Top attractions in Shanghai"),
        ("hotel_search", "Hotels in Shanghai"),
        ("route_planning", "Travel tips"),
        ("food_recommend", "Local food in Shanghai"),
    ];

    for (tool_name, marker) in expected_tools {
        let tool = registry
            .get(tool_name)
            .unwrap_or_else(|| panic!("Tool '{tool_name}' should be registered"));
        let output = tool
            .call(&ToolArgs::new().with("query", "上海"))
            .await
            .expect("Tool should succeed");
        assert!(output.contains(marker), "{tool_name}: {output}");
    }

    // Missing query is rejected before the tool body runs.
    let err = registry
        .get("weather_query")
        .unwrap()
        .call(&ToolArgs::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("query"));
}

// ── E2E: HTTP API ────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_gateway_health_and_chat() {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let state = Arc::new(wayfarer_gateway::AppState::from_config(&AppConfig::default()));
    let app = wayfarer_gateway::build_router(state.clone());

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), 200);

    for (session, message) in [("alice", "北京的天气怎么样？"), ("bob", "上海有什么好的酒店推荐？")] {
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({"message": message, "session_id": session}).to_string(),
            ))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["session_id"], session);
        assert_eq!(json["outcome"], "answered");
    }

    assert_eq!(state.sessions.ids().await, vec!["alice".to_string(), "bob".to_string()]);
    let alice = state.sessions.get("alice").await.unwrap();
    let alice = alice.lock().await;
    assert!(alice.context().iter().all(|m| !m.content.contains("Hotels in")));
}

// ── E2E: Configuration System ───────────────────────────────────────────

#[tokio::test]
async fn e2e_config_defaults_and_validation() {
    let config = AppConfig::default();

    // Verify sensible defaults.
    assert!(!config.default_model.is_empty());
    assert!(config.default_temperature >= 0.0);
    assert!(config.default_temperature <= 2.0);
    assert_eq!(config.agent.max_steps, 10);
    assert!(config.server.port > 0);

    // Verify TOML roundtrip through a file.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, AppConfig::default_toml()).unwrap();
    let reparsed = AppConfig::load_from(&path).expect("Config should parse back");
    assert_eq!(reparsed.default_model, config.default_model);
    assert_eq!(reparsed.server.port, config.server.port);

    // Invalid limits are rejected.
    assert!(AppConfig::from_toml_str("[agent]\nmax_steps = 0\n").is_err());
}
