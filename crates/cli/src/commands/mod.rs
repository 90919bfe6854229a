//! Subcommand implementations.

pub mod chat;
pub mod demo;
pub mod doctor;
pub mod init;
pub mod serve;
pub mod tools;

use std::sync::Arc;
use wayfarer_agent::AgentLoop;
use wayfarer_config::AppConfig;
use wayfarer_core::event::EventBus;

/// Build an agent with the configured provider and the built-in tools.
pub fn build_agent(config: &AppConfig) -> AgentLoop {
    let provider = wayfarer_providers::build_from_config(config);
    let tools = Arc::new(wayfarer_tools::default_registry());
    AgentLoop::from_config(config, provider, tools, Arc::new(EventBus::default()))
}
