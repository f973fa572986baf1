//! Process-based terminal implementation.

use std::io::{self, BufWriter, Stdout, Write};

#[cfg(unix)]
use libc::{self, c_int};

use crate::core::terminal::Terminal;

const FALLBACK_COLUMNS: u16 = 80;

/// Terminal backed by the process stdout, with width read from the controlling tty.
pub struct ProcessTerminal {
    out: BufWriter<Stdout>,
    interactive: bool,
}

impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            out: BufWriter::new(io::stdout()),
            interactive: stdin_is_tty() && stdout_is_tty(),
        }
    }
}

impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ProcessTerminal {
    fn write(&mut self, data: &str) -> io::Result<()> {
        self.out.write_all(data.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn columns(&self) -> u16 {
        terminal_columns().unwrap_or(FALLBACK_COLUMNS)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Returns whether stdout is attached to a terminal.
pub fn stdout_is_tty() -> bool {
    is_tty(1)
}

fn stdin_is_tty() -> bool {
    is_tty(0)
}

#[cfg(unix)]
fn is_tty(fd: c_int) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_fd: i32) -> bool {
    false
}

#[cfg(unix)]
fn terminal_columns() -> Option<u16> {
    read_winsize(1).map(|(columns, _)| columns)
}

#[cfg(not(unix))]
fn terminal_columns() -> Option<u16> {
    None
}

#[cfg(unix)]
fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}
