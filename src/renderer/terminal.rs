//! Terminal renderer
//!
//! Every frame is queued in full and flushed once. Nothing here touches game
//! state; the renderer only reads the `RenderFrame` it is given.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::viewport::{CellRect, Viewport};
use crate::sim::{RenderFrame, Sprite, SpriteKind, Tier};

const C_BORDER: Color = Color::DarkBlue;
const C_SCORE: Color = Color::Yellow;
const C_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Blink period for the invulnerable player
const BLINK_MS: u64 = 100;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   P : Pause   Q : Quit";

pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
    height: u16,
    viewport: Viewport,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            width,
            height,
            viewport: Viewport::for_terminal(width, height),
        }
    }

    /// Resize the drawing area
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.viewport = Viewport::for_terminal(width, height);
        log::debug!("Renderer resized to {}x{}", width, height);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Render one complete frame
    pub fn render(&mut self, frame: &RenderFrame) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border()?;
        self.draw_hud(frame)?;

        let blink_off = frame.player_invulnerable && (frame.clock_ms / BLINK_MS) % 2 == 1;
        for sprite in &frame.sprites {
            if blink_off && sprite.kind == SpriteKind::Player {
                continue;
            }
            self.draw_sprite(frame, sprite)?;
        }

        self.out.queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(CONTROLS_HINT))?;

        if frame.game_over {
            self.draw_game_over(frame)?;
        } else if frame.paused {
            self.draw_banner(&[("PAUSED", Color::Yellow), ("P - Resume", Color::White)])?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let inner = usize::from(self.width.saturating_sub(2));
        let bottom = self.height.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

        for row in 2..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_hud(&mut self, frame: &RenderFrame) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_SCORE))?;
        self.out.queue(Print(format!(
            "Score:{:>6}  Record:{:>6}",
            frame.score, frame.highscore
        )))?;

        let lost = frame.max_lives.saturating_sub(frame.lives);
        let lives = format!(
            "Lives:{}{}",
            "♥".repeat(frame.lives as usize),
            "♡".repeat(lost as usize)
        );
        let col = self
            .width
            .saturating_sub(lives.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(col, 0))?;
        self.out.queue(style::SetForegroundColor(C_LIVES))?;
        self.out.queue(Print(lives))?;
        Ok(())
    }

    fn draw_sprite(&mut self, frame: &RenderFrame, sprite: &Sprite) -> std::io::Result<()> {
        let Some(rect) = self.viewport.project(frame.field, sprite.pos, sprite.size) else {
            return Ok(());
        };
        let (glyph, color) = appearance(sprite);
        self.fill(rect, glyph, color)
    }

    fn fill(&mut self, rect: CellRect, glyph: char, color: Color) -> std::io::Result<()> {
        let line: String = std::iter::repeat_n(glyph, usize::from(rect.width)).collect();
        self.out.queue(style::SetForegroundColor(color))?;
        for row in rect.row..rect.row + rect.height {
            self.out.queue(cursor::MoveTo(rect.col, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn draw_game_over(&mut self, frame: &RenderFrame) -> std::io::Result<()> {
        let record = frame.new_record;
        let score_line = format!("Final Score: {:>6}", frame.score);
        let best_line = if record {
            format!("★ NEW RECORD: {:>6} ★", frame.score)
        } else {
            format!("Record:      {:>6}", frame.highscore)
        };

        self.draw_banner(&[
            ("╔════════════════════╗", Color::Red),
            ("║     GAME  OVER     ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (best_line.as_str(), if record { Color::Yellow } else { Color::DarkGrey }),
            ("R - Play Again  Q - Quit", Color::White),
        ])
    }

    /// Centred block of lines over the play area
    fn draw_banner(&mut self, lines: &[(&str, Color)]) -> std::io::Result<()> {
        let (cx, cy) = self.viewport.center();
        let start = cy.saturating_sub(lines.len() as u16 / 2);
        for (i, (text, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(text.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, start + i as u16))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*text))?;
        }
        Ok(())
    }
}

fn appearance(sprite: &Sprite) -> (char, Color) {
    match sprite.kind {
        SpriteKind::Star if sprite.size.x >= 2.0 => ('*', Color::Grey),
        SpriteKind::Star => ('·', Color::DarkGrey),
        SpriteKind::Player => ('█', Color::White),
        SpriteKind::Bullet => ('│', Color::Cyan),
        SpriteKind::Enemy(Tier::Easy) => ('▼', Color::Green),
        SpriteKind::Enemy(Tier::Medium) => ('◆', Color::Yellow),
        SpriteKind::Enemy(Tier::Hard) => ('■', Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn frame() -> RenderFrame {
        RenderFrame {
            field: Vec2::new(480.0, 720.0),
            sprites: vec![
                Sprite {
                    kind: SpriteKind::Enemy(Tier::Hard),
                    pos: Vec2::new(100.0, 100.0),
                    size: Vec2::splat(75.0),
                },
                Sprite {
                    kind: SpriteKind::Player,
                    pos: Vec2::new(215.0, 625.0),
                    size: Vec2::splat(50.0),
                },
            ],
            lives: 2,
            max_lives: 3,
            score: 42,
            highscore: 40,
            paused: false,
            game_over: false,
            new_record: false,
            player_invulnerable: false,
            clock_ms: 0,
        }
    }

    fn draw(frame: &RenderFrame) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new(), 50, 40);
        renderer.render(frame).unwrap();
        String::from_utf8_lossy(renderer.writer_mut()).into_owned()
    }

    #[test]
    fn test_hud_and_sprites() {
        let out = draw(&frame());
        assert!(out.contains("Score:    42"));
        assert!(out.contains("Record:    40"));
        assert!(out.contains("Lives:♥♥♡"));
        assert!(out.contains('■'));
        assert!(out.contains('█'));
        assert!(!out.contains("PAUSED"));
    }

    #[test]
    fn test_overlays() {
        let mut paused = frame();
        paused.paused = true;
        assert!(draw(&paused).contains("PAUSED"));

        let mut over = frame();
        over.game_over = true;
        let out = draw(&over);
        assert!(out.contains("GAME  OVER"));
        assert!(!out.contains("NEW RECORD"));
        assert!(out.contains("R - Play Again"));

        over.new_record = true;
        assert!(draw(&over).contains("NEW RECORD"));
    }

    #[test]
    fn test_invulnerable_player_blinks() {
        let mut f = frame();
        f.player_invulnerable = true;
        f.clock_ms = 0;
        assert!(draw(&f).contains('█'));
        f.clock_ms = BLINK_MS;
        assert!(!draw(&f).contains('█'));
    }
}
