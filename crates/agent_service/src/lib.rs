//! Minimal transport-neutral contract for one Agent Service exchange.
//!
//! This crate defines the query/reply/error types shared by the chat controller and every
//! service implementation. It excludes transport details, wire payloads and turn
//! orchestration.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Identifier for one user turn.
pub type TurnId = u64;

/// Error returned while constructing/configuring a service before any turn starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInitError {
    message: String,
}

impl ServiceInitError {
    /// Creates a new service initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ServiceInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServiceInitError {}

impl From<String> for ServiceInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ServiceInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Input for one Agent Service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentQuery {
    pub turn_id: TurnId,
    /// Raw user text, forwarded untouched.
    pub message: String,
}

impl AgentQuery {
    #[must_use]
    pub fn new(turn_id: TurnId, message: impl Into<String>) -> Self {
        Self {
            turn_id,
            message: message.into(),
        }
    }
}

/// Successful service reply. Both fields may be missing from a well-formed success body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentReply {
    pub response: Option<String>,
    pub tool_used: Option<String>,
}

impl AgentReply {
    /// Constructs a reply carrying text and no tool annotation.
    #[must_use]
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            tool_used: None,
        }
    }

    /// Constructs a reply carrying text and the tool the agent invoked.
    #[must_use]
    pub fn with_tool(response: impl Into<String>, tool_used: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            tool_used: Some(tool_used.into()),
        }
    }
}

/// Coarse classification of [`AgentError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    Transport,
    Status,
    Decode,
    Timeout,
    Internal,
}

impl AgentErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

/// Failure of one Agent Service call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent service unreachable: {0}")]
    Transport(String),

    #[error("agent service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("agent service reply could not be decoded: {0}")]
    Decode(String),

    #[error("agent service did not reply within {}s", .after.as_secs_f64())]
    Timeout { after: Duration },

    #[error("agent service failed: {0}")]
    Internal(String),
}

impl AgentError {
    /// Returns the coarse classification for this error.
    #[must_use]
    pub fn kind(&self) -> AgentErrorKind {
        match self {
            Self::Transport(_) => AgentErrorKind::Transport,
            Self::Status { .. } => AgentErrorKind::Status,
            Self::Decode(_) => AgentErrorKind::Decode,
            Self::Timeout { .. } => AgentErrorKind::Timeout,
            Self::Internal(_) => AgentErrorKind::Internal,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind() == AgentErrorKind::Timeout
    }
}

/// Immutable metadata describing an agent service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProfile {
    pub service_id: String,
    pub endpoint: Option<String>,
}

/// Service interface for answering one user query.
#[async_trait]
pub trait AgentService: Send + Sync + 'static {
    /// Returns service identity metadata.
    fn profile(&self) -> ServiceProfile;

    /// Sends one query and resolves with the reply or a failure.
    ///
    /// Implementations need not bound their own latency; callers apply the turn timeout and
    /// drop the future to cancel.
    async fn ask(&self, query: AgentQuery) -> Result<AgentReply, AgentError>;
}
