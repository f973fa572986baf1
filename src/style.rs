//! ANSI styling that can be switched off for plain output.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn wrap(&self, text: &str, prefix: &str, suffix: &str) -> String {
        if self.color {
            format!("{prefix}{text}{suffix}")
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        self.wrap(text, "\x1b[2m", "\x1b[22m")
    }

    pub fn bold(&self, text: &str) -> String {
        self.wrap(text, "\x1b[1m", "\x1b[22m")
    }

    pub fn cyan(&self, text: &str) -> String {
        self.wrap(text, "\x1b[36m", "\x1b[39m")
    }

    pub fn blue(&self, text: &str) -> String {
        self.wrap(text, "\x1b[34m", "\x1b[39m")
    }

    pub fn magenta(&self, text: &str) -> String {
        self.wrap(text, "\x1b[35m", "\x1b[39m")
    }

    pub fn yellow(&self, text: &str) -> String {
        self.wrap(text, "\x1b[33m", "\x1b[39m")
    }

    pub fn green(&self, text: &str) -> String {
        self.wrap(text, "\x1b[32m", "\x1b[39m")
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::colored()
    }
}
