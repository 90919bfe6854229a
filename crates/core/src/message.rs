//! Message and Conversation domain types.
//!
//! These are the value objects that flow through the reasoning loop:
//! the user asks → the provider answers or requests tools → tools reply →
//! the provider answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ContextError;

/// Unique identifier for a conversation (session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The language model
    Assistant,
    /// Agent instructions (role, available tools)
    System,
    /// Tool execution result
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        };
        f.write_str(name)
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Tool calls requested by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// If this is a tool result, which tool call it responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_role(role: Role, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            tool_calls: Vec::new(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content.into())
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content.into())
    }

    /// Create an assistant message carrying tool call requests.
    pub fn assistant_with_calls(content: impl Into<String>, tool_calls: Vec<MessageToolCall>) -> Self {
        let mut msg = Self::with_role(Role::Assistant, content.into());
        msg.tool_calls = tool_calls;
        msg
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content.into())
    }

    /// Create a tool result message.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut msg = Self::with_role(Role::Tool, content.into());
        msg.tool_call_id = Some(tool_call_id.into());
        msg
    }

    /// Whether this is an assistant message requesting tools.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool call embedded in an assistant message.
///
/// Emitted by the provider; the loop never constructs one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageToolCall {
    /// Opaque ID for this tool call
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as a serialized JSON object
    pub arguments: String,
}

/// An ordered message log with enforced structure.
///
/// Invariants held by [`Conversation::push`]:
/// - at most one system message, and only at index 0;
/// - every tool message answers a call id from the nearest preceding
///   assistant message (only tool messages may sit in between).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: ConversationId,

    /// Ordered messages
    messages: Vec<Message>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message, rejecting anything that would break the invariants.
    pub fn push(&mut self, message: Message) -> Result<(), ContextError> {
        match message.role {
            Role::System if !self.messages.is_empty() => {
                return Err(ContextError::MisplacedSystemMessage);
            }
            Role::Tool => {
                let call_id = message
                    .tool_call_id
                    .as_deref()
                    .ok_or(ContextError::MissingToolCallId)?;
                if !self.answers_pending_call(call_id) {
                    return Err(ContextError::OrphanToolResult(call_id.to_string()));
                }
            }
            _ => {}
        }

        self.updated_at = Utc::now();
        self.messages.push(message);
        Ok(())
    }

    fn answers_pending_call(&self, call_id: &str) -> bool {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role != Role::Tool)
            .is_some_and(|m| {
                m.role == Role::Assistant && m.tool_calls.iter().any(|tc| tc.id == call_id)
            })
    }

    /// Read-only view of the ordered messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message, returning to the pre-first-call state.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.updated_at = Utc::now();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(id: &str) -> MessageToolCall {
        MessageToolCall {
            id: id.into(),
            name: "weather_query".into(),
            arguments: r#"{"query":"Beijing"}"#.into(),
        }
    }

    #[test]
    fn create_user_message() {
        let msg = Message::user("Hello, agent!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello, agent!");
        assert!(msg.tool_calls.is_empty());
    }

    #[test]
    fn conversation_tracks_updates() {
        let mut conv = Conversation::new();
        let created = conv.created_at;

        conv.push(Message::user("First message")).unwrap();
        assert_eq!(conv.len(), 1);
        assert!(conv.updated_at >= created);
    }

    #[test]
    fn system_message_only_at_front() {
        let mut conv = Conversation::new();
        conv.push(Message::system("You are a travel assistant")).unwrap();
        conv.push(Message::user("hi")).unwrap();

        let err = conv.push(Message::system("again")).unwrap_err();
        assert_eq!(err, ContextError::MisplacedSystemMessage);
        assert_eq!(conv.len(), 2);
    }

    #[test]
    fn tool_results_must_follow_their_assistant_message() {
        let mut conv = Conversation::new();
        conv.push(Message::user("weather?")).unwrap();
        conv.push(Message::assistant_with_calls("", vec![call("c1"), call("c2")]))
            .unwrap();
        conv.push(Message::tool_result("c1", "sunny")).unwrap();
        conv.push(Message::tool_result("c2", "cloudy")).unwrap();

        let err = conv.push(Message::tool_result("c3", "?")).unwrap_err();
        assert_eq!(err, ContextError::OrphanToolResult("c3".into()));
    }

    #[test]
    fn tool_result_after_user_message_is_rejected() {
        let mut conv = Conversation::new();
        conv.push(Message::assistant_with_calls("", vec![call("c1")]))
            .unwrap();
        conv.push(Message::user("never mind")).unwrap();

        assert!(conv.push(Message::tool_result("c1", "late")).is_err());
    }

    #[test]
    fn tool_result_without_id_is_rejected() {
        let mut conv = Conversation::new();
        let mut msg = Message::tool_result("c1", "x");
        msg.tool_call_id = None;
        assert_eq!(conv.push(msg).unwrap_err(), ContextError::MissingToolCallId);
    }

    #[test]
    fn clear_allows_a_fresh_system_message() {
        let mut conv = Conversation::new();
        conv.push(Message::system("one")).unwrap();
        conv.clear();
        assert!(conv.is_empty());
        conv.push(Message::system("two")).unwrap();
        assert_eq!(conv.messages()[0].content, "two");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::assistant_with_calls("checking", vec![call("c1")]);
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.role, Role::Assistant);
        assert_eq!(deserialized.tool_calls, vec![call("c1")]);
    }
}
