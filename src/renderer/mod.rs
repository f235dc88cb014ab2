//! Terminal rendering module
//!
//! Snapshots are rasterised onto a character grid, then written to the
//! terminal with crossterm.

pub mod canvas;
pub mod terminal;

pub use canvas::{Canvas, Cell, Tone, draw};
pub use terminal::Terminal;
