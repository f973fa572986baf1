//! Terminal trait.

use std::io;

/// Minimal output surface for the inline chat view.
pub trait Terminal {
    /// Write output to the terminal. Output may be buffered until [`Terminal::flush`].
    fn write(&mut self, data: &str) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> io::Result<()>;

    /// Terminal width in cells.
    fn columns(&self) -> u16;

    /// Whether input is typed by a person at this terminal (and therefore echoed by it).
    fn is_interactive(&self) -> bool;
}
