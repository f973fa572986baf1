//! Grapheme-aware hard wrapping for single logical lines.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, visible_width};

/// Wraps one logical line (no `\n`) into rows of at most `width` cells.
///
/// `first_prefix` starts the first row and `continuation_prefix` every following row. Both may
/// carry ANSI styling; only their visible width counts against `width`. A `width` of zero
/// disables wrapping.
pub fn wrap_with_prefix(
    text: &str,
    width: usize,
    first_prefix: &str,
    continuation_prefix: &str,
) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![format!("{first_prefix}{text}")];
    }

    let mut rows = Vec::new();
    let mut row = first_prefix.to_string();
    let mut prefix_len = visible_width(first_prefix);
    let mut row_len = prefix_len;

    for grapheme in text.graphemes(true) {
        let cells = grapheme_width(grapheme);
        if row_len + cells > width && row_len > prefix_len {
            rows.push(std::mem::take(&mut row));
            row.push_str(continuation_prefix);
            prefix_len = visible_width(continuation_prefix);
            row_len = prefix_len;
        }
        row.push_str(grapheme);
        row_len += cells;
    }

    rows.push(row);
    rows
}
