//! Terminal rendering module
//!
//! Draws a `RenderFrame` with crossterm. The simulation works in field pixels;
//! the renderer scales them onto whatever cell grid the terminal offers.

pub mod terminal;
pub mod viewport;

pub use terminal::TerminalRenderer;
pub use viewport::{CellRect, Viewport};
