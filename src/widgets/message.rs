//! Transcript message widget.

use crate::core::component::Component;
use crate::core::text::wrap::wrap_with_prefix;
use crate::style::Style;

const CONTINUATION_PREFIX: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

impl Author {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "you",
            Self::Bot => "cinebot",
        }
    }
}

/// One transcript entry laid out for the terminal.
///
/// Text is split on `\n` into separate rows, each wrapped to the render width. A bot entry with
/// a badge gets a trailing `Used Tool: ..` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBlock {
    author: Author,
    text: String,
    badge: Option<String>,
    style: Style,
}

impl MessageBlock {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            badge: None,
            style: Style::default(),
        }
    }

    pub fn with_badge(mut self, badge: Option<String>) -> Self {
        self.badge = badge.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn badge(&self) -> Option<&str> {
        self.badge.as_deref()
    }

    fn label_prefix(&self) -> String {
        let label = match self.author {
            Author::User => self.style.cyan(self.author.label()),
            Author::Bot => self.style.blue(self.author.label()),
        };
        format!("{}: ", self.style.bold(&label))
    }
}

impl Component for MessageBlock {
    fn render(&mut self, width: usize) -> Vec<String> {
        let first_prefix = self.label_prefix();
        let mut rows = Vec::new();

        for (index, line) in self.text.split('\n').enumerate() {
            let prefix = if index == 0 {
                first_prefix.as_str()
            } else {
                CONTINUATION_PREFIX
            };
            rows.extend(wrap_with_prefix(
                line.trim_end_matches('\r'),
                width,
                prefix,
                CONTINUATION_PREFIX,
            ));
        }

        if self.author == Author::Bot {
            if let Some(badge) = self.badge.as_deref() {
                let badge = self.style.magenta(&format!("Used Tool: {badge}"));
                rows.push(format!("{CONTINUATION_PREFIX}{badge}"));
            }
        }

        rows
    }
}
