//! Busy indicator widget.

use crate::core::component::Component;
use crate::style::Style;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner plus message; the owner advances it with [`Loader::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loader {
    message: String,
    frame: usize,
    style: Style,
}

impl Loader {
    pub fn new(message: Option<String>) -> Self {
        Self {
            message: message.unwrap_or_else(|| "Loading...".to_string()),
            frame: 0,
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }

    pub fn line(&self) -> String {
        let spinner = self.style.cyan(SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]);
        format!("{spinner} {}", self.style.dim(&self.message))
    }
}

impl Component for Loader {
    fn render(&mut self, _width: usize) -> Vec<String> {
        vec![self.line()]
    }
}

#[cfg(test)]
mod tests {
    use super::Loader;
    use crate::core::component::Component;
    use crate::style::Style;

    #[test]
    fn loader_ticks_through_spinner_frames() {
        let mut loader =
            Loader::new(Some("Agent is typing...".to_string())).with_style(Style::plain());

        let before = loader.render(40);
        loader.tick();
        let after = loader.render(40);

        assert_eq!(before, vec!["⠋ Agent is typing..."]);
        assert_eq!(after, vec!["⠙ Agent is typing..."]);
    }

    #[test]
    fn reset_returns_to_first_frame() {
        let mut loader = Loader::new(None).with_style(Style::plain());
        loader.tick();
        loader.tick();
        loader.reset();
        assert_eq!(loader.line(), "⠋ Loading...");
    }
}
