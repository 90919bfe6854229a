//! Error types for the Wayfarer domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; only provider failures are
//! expected to reach the caller of the agent loop.

use thiserror::Error;

/// The top-level error type for all Wayfarer operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider (language-model gateway) errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Conversation context invariants ---
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider returned no response")]
    EmptyResponse,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} - {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Missing required argument '{0}'")]
    MissingArgument(String),
}

/// Violations of the conversation context invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContextError {
    #[error("system message must be the first and only system message in the context")]
    MisplacedSystemMessage,

    #[error("tool result '{0}' does not answer a call from the preceding assistant message")]
    OrphanToolResult(String),

    #[error("tool result is missing its tool call id")]
    MissingToolCallId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "hotel_search".into(),
            reason: "table unavailable".into(),
        });
        assert!(err.to_string().contains("hotel_search"));
        assert!(err.to_string().contains("table unavailable"));
    }

    #[test]
    fn context_error_converts_into_top_level() {
        let err: Error = ContextError::OrphanToolResult("c9".into()).into();
        assert!(matches!(err, Error::Context(_)));
        assert!(err.to_string().contains("c9"));
    }
}
