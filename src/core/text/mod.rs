//! Text helpers (ANSI scanning, width calculations, wrapping).
//!
//! These helpers are pure (string in/string out) so widgets can depend on them without touching
//! the terminal.

pub mod ansi;
pub mod width;
pub mod wrap;
