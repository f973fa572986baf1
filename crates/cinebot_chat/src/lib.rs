//! Terminal chat client for the movie assistant Agent Service.
//!
//! ## Service bootstrap
//!
//! `CINEBOT_PROVIDER` selects the agent service:
//!
//! - `http` (default) posts each message to `CINEBOT_ENDPOINT`
//!   (default `http://127.0.0.1:8000/agent`)
//! - `mock` answers from a small built-in movie catalog, without any network
//!
//! `CINEBOT_TIMEOUT_SEC` bounds each turn (default 30).
//!
//! Optionally set `CINEBOT_CONFIG_PATH` to a UTF-8 JSON file; environment variables override
//! its values:
//!
//! ```json
//! {
//!   "endpoint": "http://127.0.0.1:8000",
//!   "timeout_sec": 30,
//!   "welcome": "Hello! Ask me about movies.",
//!   "provider": "http",
//!   "headers": {"x-client": "terminal"}
//! }
//! ```
//!
//! Contract notes:
//! - every field is optional; unknown JSON fields are rejected
//! - `timeout_sec` must be > 0 when provided
//! - an endpoint without an `/agent` path gets one appended
//!
//! ## Turn contract
//!
//! Each submitted line is one turn: it is appended to the transcript, sent as
//! `{"message": ...}`, and exactly one bot message is appended when the turn resolves, either
//! the reply or a fallback error text. Lines starting with `/` are commands (`/help`, `/quit`)
//! and never reach the transcript.

pub mod commands;
pub mod config;
pub mod driver;
pub mod runtime;
pub mod services;
pub mod session;
pub mod view;
