//! Inline terminal view of a [`Session`].
//!
//! Transcript rows are written once, in order, at the bottom of the terminal. The prompt or the
//! busy loader occupies the last row and is redrawn in place; both are only drawn for
//! interactive terminals.

use std::io;

use cinebot::{Author, Loader, MessageBlock, Scrollback, Style, Terminal};

use crate::session::{Message, Sender, Session};

pub const PROMPT: &str = "> ";
pub const LOADER_MESSAGE: &str = "Agent is typing...";

const CLEAR_LINE: &str = "\r\x1b[2K";
const ERASE_PREVIOUS_LINE: &str = "\x1b[1A\x1b[2K\r";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transient {
    None,
    Prompt,
    Loader,
}

pub struct ChatView<T: Terminal> {
    terminal: T,
    style: Style,
    header: Option<String>,
    scrollback: Scrollback,
    loader: Loader,
    transient: Transient,
}

impl<T: Terminal> ChatView<T> {
    pub fn new(terminal: T, style: Style) -> Self {
        Self {
            terminal,
            style,
            header: None,
            scrollback: Scrollback::new(),
            loader: Loader::new(Some(LOADER_MESSAGE.to_string())).with_style(style),
            transient: Transient::None,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Writes the header, then everything in the transcript.
    pub fn start(&mut self, session: &Session) -> io::Result<()> {
        if let Some(header) = self.header.clone() {
            let header = self.style.bold(&header);
            self.terminal.write(&format!("{header}\n\n"))?;
        }
        self.sync(session)
    }

    /// Writes transcript entries not yet on screen and redraws the prompt or loader.
    pub fn sync(&mut self, session: &Session) -> io::Result<()> {
        self.clear_transient()?;

        let width = usize::from(self.terminal.columns());
        let style = self.style;
        let rows = self
            .scrollback
            .render_pending(session.transcript(), width, |message| block(message, style));
        for row in rows {
            self.terminal.write(&row)?;
            self.terminal.write("\n")?;
        }

        if self.terminal.is_interactive() {
            if session.is_busy() {
                if self.transient != Transient::Loader {
                    self.loader.reset();
                }
                self.terminal.write(&self.loader.line())?;
                self.transient = Transient::Loader;
            } else {
                self.terminal.write(PROMPT)?;
                self.transient = Transient::Prompt;
            }
        }

        self.terminal.flush()
    }

    /// Removes the line the terminal echoed while the user typed, over the prompt or the loader.
    /// Accepted input is shown again from the transcript.
    pub fn erase_echoed_input(&mut self) -> io::Result<()> {
        if self.terminal.is_interactive() && self.transient != Transient::None {
            self.terminal.write(ERASE_PREVIOUS_LINE)?;
            self.transient = Transient::None;
        }
        Ok(())
    }

    /// Writes a one-off notice above the prompt. Notices are not part of the transcript.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        self.clear_transient()?;
        for line in text.lines() {
            let line = self.style.yellow(line);
            self.terminal.write(&format!("{line}\n"))?;
        }
        Ok(())
    }

    pub fn tick_loader(&mut self) -> io::Result<()> {
        if self.transient != Transient::Loader {
            return Ok(());
        }
        self.loader.tick();
        self.terminal.write(CLEAR_LINE)?;
        self.terminal.write(&self.loader.line())?;
        self.terminal.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.clear_transient()?;
        self.terminal.flush()
    }

    fn clear_transient(&mut self) -> io::Result<()> {
        if self.transient != Transient::None {
            self.terminal.write(CLEAR_LINE)?;
            self.transient = Transient::None;
        }
        Ok(())
    }
}

/// Lays out one transcript message.
pub fn block(message: &Message, style: Style) -> MessageBlock {
    let author = match message.sender {
        Sender::User => Author::User,
        Sender::Bot => Author::Bot,
    };
    MessageBlock::new(author, message.text.clone())
        .with_badge(message.tool.clone())
        .with_style(style)
}
