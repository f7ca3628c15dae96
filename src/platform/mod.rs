//! Platform abstraction layer
//!
//! Terminal-side plumbing the simulation never sees:
//! - Keyboard events folded into per-tick `TickInput`
//! - Frame pacing and elapsed-time measurement

pub mod input;
pub mod time;

pub use input::KeyTracker;
pub use time::FrameClock;
