//! Platform-specific terminal integrations.

pub mod process_terminal;

pub use process_terminal::{stdout_is_tty, ProcessTerminal};
