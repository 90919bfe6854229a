//! `wayfarer demo` — Run the canned demo queries through the agent loop.
//!
//! Always uses the offline provider, so the demo works without an API key.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use wayfarer_agent::AgentLoop;
use wayfarer_config::AppConfig;
use wayfarer_core::event::EventBus;
use wayfarer_providers::OfflineProvider;

pub const DEMO_QUERIES: [&str; 5] = [
    "北京的天气怎么样？",
    "推荐上海的景点",
    "广州有什么好吃的？",
    "帮我规划北京一日游路线",
    "上海有什么好的酒店推荐？",
];

pub async fn run(pause_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let mut agent = offline_agent(&config);

    println!("🎭 Wayfarer demo");
    println!("{}", "=".repeat(40));

    for (i, query) in DEMO_QUERIES.iter().enumerate() {
        println!("\n📝 Example {}: {query}", i + 1);
        println!("🤖 Reply:");
        println!("{}", answer(&mut agent, query).await?);

        if i + 1 < DEMO_QUERIES.len() {
            println!("\n{}", "-".repeat(40));
            if pause_secs > 0 {
                tokio::time::sleep(Duration::from_secs(pause_secs)).await;
            }
        }
    }

    println!("\n✨ Demo finished. Try `wayfarer chat` or `wayfarer serve`.");
    Ok(())
}

fn offline_agent(config: &AppConfig) -> AgentLoop {
    let tools = Arc::new(wayfarer_tools::default_registry());
    AgentLoop::from_config(
        config,
        Arc::new(OfflineProvider::new()),
        tools,
        Arc::new(EventBus::default()),
    )
}

/// Each demo query starts from a fresh context.
async fn answer(agent: &mut AgentLoop, query: &str) -> Result<String, wayfarer_core::Error> {
    debug!(query, "Running demo query");
    agent.reset_context();
    agent.process(query).await
}
