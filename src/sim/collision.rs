//! Collision resolution between bullets, enemies and the player
//!
//! Both passes only mark entities dead; the session sweeps the collections
//! afterwards, so nothing is removed while it is being iterated.

use super::bullet::Bullet;
use super::enemy::Enemy;
use super::player::Player;
use super::state::{GameEvent, ScoringPolicy};

/// What a collision pass produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Score earned this pass
    pub points: u64,
    /// Effects in the order they happened
    pub events: Vec<GameEvent>,
}

/// Resolve bullet↔enemy and player↔enemy contacts for one tick.
///
/// Each bullet damages at most the first live enemy it overlaps and is
/// consumed whether or not the enemy dies. Every live enemy touching the
/// player is destroyed without score and costs the player one hit.
pub fn resolve(
    bullets: &mut [Bullet],
    enemies: &mut [Enemy],
    player: &mut Player,
    scoring: ScoringPolicy,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for bullet in bullets.iter_mut().filter(|b| b.body.alive) {
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.body.alive && bullet.body.intersects(&e.body))
        else {
            continue;
        };

        if enemy.hit() {
            let points = scoring.points_for(enemy.tier);
            outcome.points += points;
            outcome.events.push(GameEvent::EnemyDestroyed {
                tier: enemy.tier,
                pos: enemy.body.center(),
                points,
            });
        }
        bullet.body.kill();
    }

    for enemy in enemies.iter_mut().filter(|e| e.body.alive) {
        if !player.body.intersects(&enemy.body) {
            continue;
        }
        enemy.body.kill();
        if player.hit() {
            outcome.events.push(GameEvent::PlayerHit {
                lives: player.lives,
            });
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Tier;
    use crate::sim::state::GameConfig;
    use glam::Vec2;

    fn bullet_at(center: Vec2) -> Bullet {
        Bullet::new(center)
    }

    fn enemy_centered(tier: Tier, center: Vec2) -> Enemy {
        Enemy::at(tier, center - Vec2::splat(tier.size() / 2.0))
    }

    #[test]
    fn test_bullet_destroys_easy() {
        let mut player = Player::new(&GameConfig::default());
        let mut bullets = vec![bullet_at(Vec2::new(100.0, 100.0))];
        let mut enemies = vec![enemy_centered(Tier::Easy, Vec2::new(100.0, 100.0))];

        let outcome = resolve(&mut bullets, &mut enemies, &mut player, ScoringPolicy::Tiered);

        assert_eq!(outcome.points, 2);
        assert!(!bullets[0].body.alive);
        assert!(!enemies[0].body.alive);
        assert_eq!(
            outcome.events,
            vec![GameEvent::EnemyDestroyed {
                tier: Tier::Easy,
                pos: Vec2::new(100.0, 100.0),
                points: 2,
            }]
        );
    }

    #[test]
    fn test_flat_scoring() {
        let mut player = Player::new(&GameConfig::default());
        let mut bullets = vec![bullet_at(Vec2::new(100.0, 100.0))];
        let mut enemies = vec![enemy_centered(Tier::Easy, Vec2::new(100.0, 100.0))];

        let outcome = resolve(
            &mut bullets,
            &mut enemies,
            &mut player,
            ScoringPolicy::Flat { points: 10 },
        );
        assert_eq!(outcome.points, 10);
    }

    #[test]
    fn test_bullet_consumed_without_kill() {
        let mut player = Player::new(&GameConfig::default());
        let mut bullets = vec![bullet_at(Vec2::new(200.0, 200.0))];
        let mut enemies = vec![enemy_centered(Tier::Medium, Vec2::new(200.0, 200.0))];

        let outcome = resolve(&mut bullets, &mut enemies, &mut player, ScoringPolicy::Tiered);

        assert_eq!(outcome.points, 0);
        assert!(outcome.events.is_empty());
        assert!(!bullets[0].body.alive);
        assert!(enemies[0].body.alive);
        assert_eq!(enemies[0].health, 2);
    }

    #[test]
    fn test_bullet_hits_only_first_overlap() {
        let mut player = Player::new(&GameConfig::default());
        let mut bullets = vec![bullet_at(Vec2::new(100.0, 100.0))];
        let mut enemies = vec![
            enemy_centered(Tier::Easy, Vec2::new(100.0, 100.0)),
            enemy_centered(Tier::Easy, Vec2::new(105.0, 100.0)),
        ];

        let outcome = resolve(&mut bullets, &mut enemies, &mut player, ScoringPolicy::Tiered);

        assert_eq!(outcome.points, 2);
        assert!(!enemies[0].body.alive);
        assert!(enemies[1].body.alive);
    }

    #[test]
    fn test_bullets_stop_once_enemy_dies() {
        let mut player = Player::new(&GameConfig::default());
        let mut bullets = vec![
            bullet_at(Vec2::new(300.0, 100.0)),
            bullet_at(Vec2::new(302.0, 100.0)),
            bullet_at(Vec2::new(304.0, 100.0)),
            bullet_at(Vec2::new(306.0, 100.0)),
        ];
        let mut enemies = vec![enemy_centered(Tier::Medium, Vec2::new(300.0, 100.0))];

        let outcome = resolve(&mut bullets, &mut enemies, &mut player, ScoringPolicy::Tiered);

        // the third bullet kills it, the fourth finds nothing alive
        assert_eq!(outcome.points, 5);
        assert!(!bullets[2].body.alive);
        assert!(bullets[3].body.alive);
    }

    #[test]
    fn test_ramming_enemies_each_hit_player() {
        let mut player = Player::new(&GameConfig::default());
        let center = player.body.center();
        let mut bullets: Vec<Bullet> = Vec::new();
        let mut enemies = vec![
            enemy_centered(Tier::Easy, center),
            enemy_centered(Tier::Hard, center + Vec2::new(10.0, 0.0)),
        ];

        let outcome = resolve(&mut bullets, &mut enemies, &mut player, ScoringPolicy::Tiered);

        // both rammers die, but invulnerability absorbs the second hit
        assert!(enemies.iter().all(|e| !e.body.alive));
        assert_eq!(player.lives, 2);
        assert_eq!(outcome.points, 0);
        assert_eq!(outcome.events, vec![GameEvent::PlayerHit { lives: 2 }]);
    }

    #[test]
    fn test_shot_enemy_does_not_ram() {
        let mut player = Player::new(&GameConfig::default());
        let center = player.body.center();
        let mut bullets = vec![bullet_at(center)];
        let mut enemies = vec![enemy_centered(Tier::Easy, center)];

        let outcome = resolve(&mut bullets, &mut enemies, &mut player, ScoringPolicy::Tiered);

        assert_eq!(outcome.points, 2);
        assert_eq!(player.lives, 3);
    }
}
