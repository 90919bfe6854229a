//! # Wayfarer Core
//!
//! Domain types, traits, and error definitions for the Wayfarer travel agent.
//! This crate has **no framework dependencies**: it defines the domain model
//! that the provider, tool, agent and shell crates implement against.
//!
//! ## Design Philosophy
//!
//! The language-model gateway ([`Provider`]) and the local capabilities
//! ([`Tool`]) are traits defined here. Implementations live in their
//! respective crates, so the agent loop can be driven by scripted providers
//! and stub tools in tests.

pub mod error;
pub mod event;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{ContextError, Error, ProviderError, Result, ToolError};
pub use event::{DomainEvent, EventBus};
pub use message::{Conversation, ConversationId, Message, MessageToolCall, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use tool::{ArgValue, ParamKind, ParamSpec, Tool, ToolArgs, ToolRegistry};
