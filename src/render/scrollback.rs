//! Append-only scrollback: renders transcript entries that have not been written yet.

use crate::core::component::Component;
use crate::widgets::MessageBlock;

/// Tracks how much of an append-only transcript has already reached the terminal.
///
/// Writing only the new entries at the bottom of an inline terminal is what keeps the latest
/// message in view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Scrollback {
    rendered: usize,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries already written.
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Renders entries past the last call, separated by blank rows, and marks them written.
    pub fn render_pending<T, F>(
        &mut self,
        entries: &[T],
        width: usize,
        mut to_block: F,
    ) -> Vec<String>
    where
        F: FnMut(&T) -> MessageBlock,
    {
        let start = self.rendered.min(entries.len());
        let mut rows = Vec::new();

        for (offset, entry) in entries[start..].iter().enumerate() {
            if start + offset > 0 {
                rows.push(String::new());
            }
            rows.extend(to_block(entry).render(width));
        }

        self.rendered = entries.len();
        rows
    }
}
