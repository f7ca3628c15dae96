//! Score keeping
//!
//! Tracks the running score and the best score ever recorded. The highscore
//! is read from a `HighscoreStore` and written back only when a session ends
//! with a new record. Store failures are logged and never reach the player.

use crate::persistence::HighscoreStore;

pub struct ScoreKeeper {
    score: u64,
    highscore: u64,
    store: Box<dyn HighscoreStore>,
}

impl ScoreKeeper {
    /// Create a keeper and load the stored highscore
    pub fn new(store: Box<dyn HighscoreStore>) -> Self {
        let mut keeper = Self {
            score: 0,
            highscore: 0,
            store,
        };
        keeper.reload();
        keeper
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn highscore(&self) -> u64 {
        self.highscore
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Re-read the highscore from the store (0 if absent or unreadable)
    pub fn reload(&mut self) {
        self.highscore = match self.store.load() {
            Ok(Some(highscore)) => {
                log::info!("Loaded highscore {}", highscore);
                highscore
            }
            Ok(None) => {
                log::info!("No highscore found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to read highscore: {}", e);
                0
            }
        };
    }

    /// Start a new session: zero the score and reload the highscore
    pub fn reset(&mut self) {
        self.score = 0;
        self.reload();
    }

    /// Close the session. Returns true if the score set a new record.
    pub fn end_session(&mut self) -> bool {
        if self.score <= self.highscore {
            return false;
        }
        self.highscore = self.score;
        if let Err(e) = self.store.save(self.highscore) {
            log::warn!("Failed to save highscore {}: {}", self.highscore, e);
        }
        true
    }
}

impl std::fmt::Debug for ScoreKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreKeeper")
            .field("score", &self.score)
            .field("highscore", &self.highscore)
            .finish_non_exhaustive()
    }
}
