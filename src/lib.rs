//! Inline terminal presentation for the CineBot chat client.
//!
//! Everything here is pure rendering of controller state: message blocks, the busy loader and
//! the scrollback that keeps the newest transcript entry in view. The chat controller itself
//! lives in `cinebot_chat`.
//!
//! Invariant: widgets never write to the terminal; only the caller passes rendered rows to a
//! [`Terminal`].

pub mod config;
pub mod logging;
pub mod style;

pub mod core;
pub mod platform;
pub mod render;
pub mod widgets;

/// Runtime component trait.
pub use crate::core::component::Component;
/// Terminal interface and process-backed implementation.
pub use crate::core::terminal::Terminal;
pub use crate::platform::process_terminal::{stdout_is_tty, ProcessTerminal};
/// Environment configuration and logging setup.
pub use crate::config::EnvConfig;
pub use crate::logging::{init_logging, LoggingError};
/// Render-layer scrollback tracking.
pub use crate::render::Scrollback;
/// ANSI styling toggle.
pub use crate::style::Style;
/// Built-in chat widgets.
pub use crate::widgets::{Author, Loader, MessageBlock};

/// Grapheme-aware wrapping helper.
pub use crate::core::text::wrap::wrap_with_prefix;
/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::width::visible_width;
/// Escape sequence stripping helper.
pub use crate::core::text::ansi::strip_ansi;
