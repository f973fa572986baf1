//! Transport-only client for the Agent Service HTTP endpoint.
//!
//! This crate owns request building, response parsing and error classification for
//! `POST /agent` only. It has no knowledge of transcripts, turns or timeouts beyond the
//! optional per-request transport timeout.
//!
//! Wire contract: request body `{"message": <string>}`, success body
//! `{"response": <string>, "tool_used": <string, optional>}`.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::AgentApiClient;
pub use config::AgentApiConfig;
pub use error::AgentApiError;
pub use payload::{AgentRequest, AgentResponse};
pub use reqwest::StatusCode;
pub use url::normalize_agent_url;
