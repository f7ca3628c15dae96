//! Star Shooter - terminal front end
//!
//! # Usage
//!
//! ```bash
//! star-shooter
//! star-shooter --seed 42 --highscore-file /tmp/best.json
//! star-shooter --check-assets
//! star-shooter --allow-missing-assets
//! ```
//!
//! # Keyboard
//!
//! - ← → / A D: Move
//! - SPACE: Shoot
//! - P: Pause/Resume
//! - R: Restart after game over
//! - Q / ESC / Ctrl-C: Quit

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
};

use star_shooter::assets::{self, AssetError};
use star_shooter::audio::AudioManager;
use star_shooter::persistence::JsonFileStore;
use star_shooter::platform::{FrameClock, KeyTracker};
use star_shooter::renderer::TerminalRenderer;
use star_shooter::settings::{DEFAULT_SETTINGS_FILE, Settings};
use star_shooter::sim::{GameSession, TickInput};

const LOG_FILE: &str = "star-shooter.log";

#[derive(Parser)]
#[command(name = "star-shooter")]
#[command(author, version, about = "Star Shooter - a terminal vertical shoot-'em-up")]
struct Args {
    /// Settings file (JSON)
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Highscore file, overriding the settings
    #[arg(long)]
    highscore_file: Option<PathBuf>,

    /// List missing asset files and exit
    #[arg(long)]
    check_assets: bool,

    /// Start even if some asset files are missing
    #[arg(long)]
    allow_missing_assets: bool,
}

/// Raw mode and alternate screen, undone on drop
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Key release events; terminals without the protocol ignore this
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(Self { keyboard_enhanced })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {}", LOG_FILE))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging()?;
    log::info!("Star Shooter starting...");

    let mut settings = Settings::load(&args.settings);
    if let Some(path) = args.highscore_file {
        settings.highscore_file = path;
    }

    if args.check_assets {
        return Ok(match assets::preflight(&settings.asset_root) {
            Ok(()) => {
                println!("All assets present under {}", settings.asset_root.display());
                ExitCode::SUCCESS
            }
            Err(AssetError::Missing(paths)) => {
                println!("Missing {} asset file(s):", paths.len());
                for path in paths {
                    println!("  {}", path.display());
                }
                ExitCode::FAILURE
            }
        });
    }

    assets::startup_check(&settings.asset_root, args.allow_missing_assets)
        .context("asset preflight failed (run with --check-assets for the list)")?;

    let seed = args.seed.unwrap_or_else(time_seed);
    let store = JsonFileStore::new(&settings.highscore_file);
    let session = GameSession::new(settings.game_config(), Box::new(store), seed);

    let guard = TerminalGuard::enter()?;
    let result = run(session, &settings);
    drop(guard);

    result?;
    log::info!("Star Shooter exiting");
    Ok(ExitCode::SUCCESS)
}

/// Run one tick and hand its effects to audio. Returns false once quit was
/// requested; the tick still completes first.
fn advance(
    session: &mut GameSession,
    audio: &mut AudioManager,
    input: &TickInput,
    dt_ms: u32,
) -> bool {
    for event in session.tick(input, dt_ms) {
        audio.handle(&event);
    }
    !input.quit
}

fn run(mut session: GameSession, settings: &Settings) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(BufWriter::new(stdout()), cols, rows);
    let mut audio = AudioManager::new(settings);
    let mut keys = KeyTracker::new();
    let mut clock = FrameClock::new(settings.target_fps);

    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => keys.handle(key),
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        let input = keys.snapshot();
        if !advance(&mut session, &mut audio, &input, clock.delta_ms()) {
            break;
        }

        renderer.render(&session.frame())?;
        clock.wait();
    }

    audio.stop_music();
    renderer.writer_mut().flush()?;
    Ok(())
}
