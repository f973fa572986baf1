//! Environment configuration for the presentation layer.

use std::env;

use crate::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub no_color: bool,
    pub log_filter: Option<String>,
    pub log_file: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            no_color: env_flag("CINEBOT_NO_COLOR") || env_string_opt("NO_COLOR").is_some(),
            log_filter: env_string_opt("CINEBOT_LOG"),
            log_file: env_string_opt("CINEBOT_LOG_FILE"),
        }
    }

    /// Picks colored output only when allowed and stdout is a terminal.
    pub fn style(&self, stdout_is_tty: bool) -> Style {
        if self.no_color || !stdout_is_tty {
            Style::plain()
        } else {
            Style::colored()
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
