//! Game session: the per-tick simulation loop and its state machine
//!
//! Tick order while Playing: fire → spawn → movement → collision → sweep →
//! score → terminal check. Paused and GameOver freeze everything but still
//! produce a render frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::collision;
use super::enemy::{Enemy, Population};
use super::player::Player;
use super::spawn::SpawnDirector;
use super::starfield::StarField;
use super::state::{GameConfig, GameEvent, GamePhase, RenderFrame, Sprite, SpriteKind};
use crate::highscores::ScoreKeeper;
use crate::persistence::HighscoreStore;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held
    pub move_left: bool,
    /// Held
    pub move_right: bool,
    /// Held; fires whenever the cooldown allows
    pub fire: bool,
    /// Edge-triggered pause toggle
    pub pause: bool,
    /// Edge-triggered restart, honoured only after game over
    pub reset: bool,
    /// Edge-triggered; handled by the outer loop
    pub quit: bool,
}

/// One running game, from start to game over and across resets
#[derive(Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Simulated time since the last (re)start; only advances while Playing
    pub clock_ms: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub starfield: StarField,
    pub spawner: SpawnDirector,
    pub scores: ScoreKeeper,
    /// Set when the last game ended with a new record
    new_record: bool,
    rng: Pcg32,
    /// Effects waiting to be handed out by the next tick
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session; the first tick reports `MusicStart` and `GameStarted`
    pub fn new(config: GameConfig, store: Box<dyn HighscoreStore>, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = StarField::new(
            config.star_count,
            config.field_width,
            config.field_height,
            &mut rng,
        );
        log::info!("Session created with seed {}", seed);
        Self {
            player: Player::new(&config),
            phase: GamePhase::Playing,
            clock_ms: 0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            starfield,
            spawner: SpawnDirector::new(),
            scores: ScoreKeeper::new(store),
            new_record: false,
            rng,
            events: vec![GameEvent::MusicStart, GameEvent::GameStarted],
            config,
        }
    }

    pub fn score(&self) -> u64 {
        self.scores.score()
    }

    pub fn highscore(&self) -> u64 {
        self.scores.highscore()
    }

    /// Advance the session by `dt_ms` of elapsed time. Returns the effects
    /// produced since the previous tick.
    pub fn tick(&mut self, input: &TickInput, dt_ms: u32) -> Vec<GameEvent> {
        if input.pause {
            match self.phase {
                GamePhase::Playing => {
                    self.phase = GamePhase::Paused;
                    log::info!("Paused");
                    return self.take_events();
                }
                GamePhase::Paused => {
                    self.phase = GamePhase::Playing;
                    log::info!("Resumed");
                }
                GamePhase::GameOver => {}
            }
        }

        if input.reset && self.phase == GamePhase::GameOver {
            self.reset();
            return self.take_events();
        }

        if self.phase == GamePhase::Playing {
            self.step(input, dt_ms);
        }

        self.take_events()
    }

    fn step(&mut self, input: &TickInput, dt_ms: u32) {
        self.clock_ms += u64::from(dt_ms);
        let now = self.clock_ms;

        if input.fire {
            if let Some(bullet) = self.player.shoot(now) {
                self.bullets.push(bullet);
                self.events.push(GameEvent::ShotFired);
            }
        }

        let population = Population::count(&self.enemies);
        if let Some(enemy) = self.spawner.maybe_spawn(
            now,
            self.scores.score(),
            population,
            self.config.field_width,
            &mut self.rng,
        ) {
            self.enemies.push(enemy);
        }

        self.player.update(dt_ms, input);
        for bullet in &mut self.bullets {
            bullet.update();
        }
        for enemy in &mut self.enemies {
            enemy.update(self.config.field_height);
        }
        self.starfield.update(&mut self.rng);

        let outcome = collision::resolve(
            &mut self.bullets,
            &mut self.enemies,
            &mut self.player,
            self.config.scoring,
        );

        self.bullets.retain(|b| b.body.alive);
        self.enemies.retain(|e| e.body.alive);

        self.scores.add_score(outcome.points);
        self.events.extend(outcome.events);

        if self.player.is_dead() {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        let score = self.scores.score();
        log::info!("Game over with score {} at {}ms", score, self.clock_ms);

        self.events.push(GameEvent::GameOver { score });
        self.new_record = self.scores.end_session();
        if self.new_record {
            log::info!("New record: {}", score);
            self.events.push(GameEvent::NewRecord { score });
        }
        self.events.push(GameEvent::MusicStop);
    }

    /// Back to a fresh Playing state; the stored highscore is only re-read
    fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.clock_ms = 0;
        self.player = Player::new(&self.config);
        self.bullets.clear();
        self.enemies.clear();
        self.starfield = StarField::new(
            self.config.star_count,
            self.config.field_width,
            self.config.field_height,
            &mut self.rng,
        );
        self.spawner = SpawnDirector::new();
        self.scores.reset();
        self.new_record = false;
        log::info!("Session reset (highscore {})", self.scores.highscore());

        self.events.push(GameEvent::MusicStart);
        self.events.push(GameEvent::GameStarted);
    }

    fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot for the renderer, back to front
    pub fn frame(&self) -> RenderFrame {
        let mut sprites = Vec::with_capacity(
            self.starfield.stars.len() + self.enemies.len() + self.bullets.len() + 1,
        );

        sprites.extend(self.starfield.stars.iter().map(|star| Sprite {
            kind: SpriteKind::Star,
            pos: star.pos,
            size: Vec2::splat(f32::from(star.size)),
        }));
        sprites.extend(self.enemies.iter().map(|enemy| Sprite {
            kind: SpriteKind::Enemy(enemy.tier),
            pos: enemy.body.pos,
            size: enemy.body.size,
        }));
        sprites.extend(self.bullets.iter().map(|bullet| Sprite {
            kind: SpriteKind::Bullet,
            pos: bullet.body.pos,
            size: bullet.body.size,
        }));
        sprites.push(Sprite {
            kind: SpriteKind::Player,
            pos: self.player.body.pos,
            size: self.player.body.size,
        });

        RenderFrame {
            field: Vec2::new(self.config.field_width, self.config.field_height),
            sprites,
            lives: self.player.lives,
            max_lives: self.player.max_lives,
            score: self.scores.score(),
            highscore: self.scores.highscore(),
            paused: self.phase == GamePhase::Paused,
            game_over: self.phase == GamePhase::GameOver,
            new_record: self.new_record,
            player_invulnerable: self.player.is_invulnerable(),
            clock_ms: self.clock_ms,
        }
    }
}
