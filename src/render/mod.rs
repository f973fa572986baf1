//! Render-layer helpers.

pub mod scrollback;

pub use scrollback::Scrollback;
