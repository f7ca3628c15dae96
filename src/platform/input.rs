//! Keyboard input
//!
//! Terminals differ in what they report. Ones with keyboard enhancement send
//! `Press`/`Repeat`/`Release`; classic ones only send repeated `Press` while a
//! key is down. Each key remembers the frame it was last seen and counts as
//! held until it is released or goes quiet for `HOLD_WINDOW` frames.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Frames a key stays held after its last press or repeat
pub const HOLD_WINDOW: u64 = 4;

/// Folds key events into a `TickInput` per frame
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// One-shot actions seen since the last snapshot
    edges: TickInput,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key event
    pub fn handle(&mut self, key: KeyEvent) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('p') => self.edges.pause = true,
                    KeyCode::Char('r') => self.edges.reset = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.edges.quit = true
                    }
                    KeyCode::Char('q') | KeyCode::Esc => self.edges.quit = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    fn is_held(&self, code: KeyCode) -> bool {
        self.key_frame
            .get(&code)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Input for the coming tick. Clears the one-shot actions and advances
    /// the frame counter.
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            move_right: self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            fire: self.is_held(KeyCode::Char(' ')),
            ..std::mem::take(&mut self.edges)
        };

        let frame = self.frame;
        self.key_frame
            .retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
        self.frame += 1;
        input
    }
}

/// Treat letter keys case-insensitively
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
