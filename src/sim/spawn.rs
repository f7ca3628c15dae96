//! Time-gated, score-tiered enemy spawning
//!
//! The policy gets harder in three score bands:
//! - below 50: Easy only, capped at 6 alive
//! - 50..100: Easy or Medium (60/40), each falling back to the other at its cap
//! - 100 and up: Hard (rare, capped, on a cooldown), Medium or Easy, with
//!   Medium/Easy spawns suppressed while a Hard is alive and the field is busy

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, Population, Tier};
use crate::consts::{ENEMY_SPAWN_INSET, HARD_SPAWN_COOLDOWN_MS};

const EASY_CAP: usize = 6;
const MEDIUM_CAP: usize = 4;
const HARD_CAP: usize = 2;
/// Medium/Easy limits while a Hard enemy is alive
const MEDIUM_CAP_WITH_HARD: usize = 4;
const EASY_CAP_WITH_HARD: usize = 2;

/// Time between spawn attempts for the current score
pub fn spawn_interval_ms(score: u64) -> u64 {
    if score < 200 {
        1200
    } else if score < 500 {
        900
    } else {
        600
    }
}

/// Decides when and what to spawn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Session time of the last spawn attempt
    pub last_spawn_ms: u64,
    /// Session time of the last Hard spawn (None = never)
    pub last_hard_spawn_ms: Option<u64>,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called every tick. Spawns at most one enemy once the interval for the
    /// current score has elapsed; the attempt resets the timer even when the
    /// policy decides to skip.
    pub fn maybe_spawn(
        &mut self,
        now_ms: u64,
        score: u64,
        population: Population,
        field_width: f32,
        rng: &mut impl Rng,
    ) -> Option<Enemy> {
        if now_ms.saturating_sub(self.last_spawn_ms) < spawn_interval_ms(score) {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let roll: f32 = rng.random();
        let tier = self.choose_tier(now_ms, score, population, roll)?;

        let lo = ENEMY_SPAWN_INSET as i32;
        let hi = ((field_width - ENEMY_SPAWN_INSET) as i32).max(lo);
        let x = rng.random_range(lo..=hi) as f32;

        log::debug!(
            "Spawn {} at x={} (score {}, roll {:.3}, alive {:?})",
            tier.as_str(),
            x,
            score,
            roll,
            population
        );
        Some(Enemy::spawn(tier, x))
    }

    /// Pick a tier for a spawn attempt, or None to skip.
    ///
    /// `roll` is a uniform sample in [0, 1); it is ignored below score 50.
    /// Choosing Hard records `now_ms` as the last Hard spawn.
    pub fn choose_tier(
        &mut self,
        now_ms: u64,
        score: u64,
        population: Population,
        roll: f32,
    ) -> Option<Tier> {
        if score < 50 {
            return (population.easy < EASY_CAP).then_some(Tier::Easy);
        }

        if score < 100 {
            let tier = if roll < 0.6 {
                if population.easy < EASY_CAP {
                    Tier::Easy
                } else {
                    Tier::Medium
                }
            } else if population.medium < MEDIUM_CAP {
                Tier::Medium
            } else {
                Tier::Easy
            };
            return Some(tier);
        }

        if roll > 0.8 && population.hard < HARD_CAP && self.hard_cooldown_elapsed(now_ms) {
            self.last_hard_spawn_ms = Some(now_ms);
            return Some(Tier::Hard);
        }

        if roll > 0.4 {
            if population.hard > 0 && population.medium >= MEDIUM_CAP_WITH_HARD {
                return None;
            }
            return Some(Tier::Medium);
        }

        if population.hard > 0 && population.easy >= EASY_CAP_WITH_HARD {
            return None;
        }
        Some(Tier::Easy)
    }

    fn hard_cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_hard_spawn_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= HARD_SPAWN_COOLDOWN_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pop(easy: usize, medium: usize, hard: usize) -> Population {
        Population { easy, medium, hard }
    }

    #[test]
    fn test_interval_bands() {
        assert_eq!(spawn_interval_ms(0), 1200);
        assert_eq!(spawn_interval_ms(199), 1200);
        assert_eq!(spawn_interval_ms(200), 900);
        assert_eq!(spawn_interval_ms(499), 900);
        assert_eq!(spawn_interval_ms(500), 600);
    }

    #[test]
    fn test_low_score_is_always_easy() {
        let mut director = SpawnDirector::new();
        for roll in [0.0, 0.3, 0.59, 0.61, 0.85, 0.99] {
            assert_eq!(director.choose_tier(10_000, 0, pop(0, 0, 0), roll), Some(Tier::Easy));
            assert_eq!(director.choose_tier(10_000, 49, pop(5, 0, 0), roll), Some(Tier::Easy));
        }
    }

    #[test]
    fn test_low_score_skips_at_easy_cap() {
        let mut director = SpawnDirector::new();
        assert_eq!(director.choose_tier(10_000, 20, pop(6, 0, 0), 0.1), None);
    }

    #[test]
    fn test_mid_band_preferences_and_fallbacks() {
        let mut director = SpawnDirector::new();
        assert_eq!(director.choose_tier(0, 50, pop(0, 0, 0), 0.59), Some(Tier::Easy));
        assert_eq!(director.choose_tier(0, 50, pop(6, 0, 0), 0.59), Some(Tier::Medium));
        assert_eq!(director.choose_tier(0, 99, pop(0, 0, 0), 0.6), Some(Tier::Medium));
        assert_eq!(director.choose_tier(0, 99, pop(0, 4, 0), 0.6), Some(Tier::Easy));
        // the mid band never spawns Hard
        assert_eq!(director.choose_tier(0, 75, pop(0, 0, 0), 0.95), Some(Tier::Medium));
        assert_eq!(director.last_hard_spawn_ms, None);
    }

    #[test]
    fn test_high_band_hard_spawn() {
        let mut director = SpawnDirector::new();
        assert_eq!(director.choose_tier(7_000, 150, pop(0, 0, 0), 0.85), Some(Tier::Hard));
        assert_eq!(director.last_hard_spawn_ms, Some(7_000));
    }

    #[test]
    fn test_hard_respects_cooldown() {
        let mut director = SpawnDirector::new();
        assert_eq!(director.choose_tier(1_000, 150, pop(0, 0, 0), 0.9), Some(Tier::Hard));
        // within 5s the same roll degrades to Medium
        assert_eq!(director.choose_tier(5_999, 150, pop(0, 0, 1), 0.9), Some(Tier::Medium));
        assert_eq!(director.last_hard_spawn_ms, Some(1_000));
        assert_eq!(director.choose_tier(6_000, 150, pop(0, 0, 1), 0.9), Some(Tier::Hard));
    }

    #[test]
    fn test_hard_cap() {
        let mut director = SpawnDirector::new();
        assert_eq!(director.choose_tier(60_000, 300, pop(0, 0, 2), 0.99), Some(Tier::Medium));
        assert_eq!(director.last_hard_spawn_ms, None);
    }

    #[test]
    fn test_high_band_skips_while_hard_alive() {
        let mut director = SpawnDirector::new();
        assert_eq!(director.choose_tier(0, 100, pop(0, 4, 1), 0.5), None);
        assert_eq!(director.choose_tier(0, 100, pop(0, 4, 0), 0.5), Some(Tier::Medium));
        assert_eq!(director.choose_tier(0, 100, pop(2, 0, 1), 0.4), None);
        assert_eq!(director.choose_tier(0, 100, pop(2, 0, 0), 0.4), Some(Tier::Easy));
    }

    #[test]
    fn test_maybe_spawn_waits_for_interval() {
        let mut director = SpawnDirector::new();
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(director.maybe_spawn(1_199, 0, pop(0, 0, 0), 480.0, &mut rng).is_none());
        let enemy = director
            .maybe_spawn(1_200, 0, pop(0, 0, 0), 480.0, &mut rng)
            .expect("interval elapsed");
        assert_eq!(enemy.tier, Tier::Easy);
        assert!(enemy.body.center().x >= 30.0 && enemy.body.center().x <= 450.0);
        assert_eq!(enemy.body.bottom(), -10.0);
        assert_eq!(director.last_spawn_ms, 1_200);
        assert!(director.maybe_spawn(2_399, 0, pop(1, 0, 0), 480.0, &mut rng).is_none());
    }

    #[test]
    fn test_skipped_attempt_still_resets_timer() {
        let mut director = SpawnDirector::new();
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(director.maybe_spawn(1_200, 0, pop(6, 0, 0), 480.0, &mut rng).is_none());
        assert_eq!(director.last_spawn_ms, 1_200);
    }

    proptest! {
        #[test]
        fn prop_hard_cap_and_spacing(seed in any::<u64>(), score in 100u64..1000) {
            let mut director = SpawnDirector::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut population = Population::default();
            let mut hard_times = Vec::new();
            let mut now = 0;
            for _ in 0..500 {
                now += 16;
                if let Some(enemy) = director.maybe_spawn(now, score, population, 480.0, &mut rng) {
                    if enemy.tier == Tier::Hard {
                        hard_times.push(now);
                    }
                    population.add(enemy.tier);
                }
                prop_assert!(population.hard <= 2);
            }
            for pair in hard_times.windows(2) {
                prop_assert!(pair[1] - pair[0] >= 5000);
            }
        }

        #[test]
        fn prop_low_band_easy_cap(seed in any::<u64>(), score in 0u64..50) {
            let mut director = SpawnDirector::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut population = Population::default();
            let mut now = 0;
            for _ in 0..2000 {
                now += 16;
                if let Some(enemy) = director.maybe_spawn(now, score, population, 480.0, &mut rng) {
                    prop_assert_eq!(enemy.tier, Tier::Easy);
                    population.add(enemy.tier);
                }
                prop_assert!(population.easy <= 6);
            }
        }
    }
}
