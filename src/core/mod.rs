//! Core interfaces and text helpers.

pub mod component;
pub mod terminal;
pub mod text;
