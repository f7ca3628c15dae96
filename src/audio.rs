//! Audio playback
//!
//! Turns simulation effect events into sounds played through rodio. Without
//! an output device the manager still tracks triggers and logs them, so the
//! game runs the same either way. Playback never blocks the tick.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

use crate::settings::Settings;
use crate::sim::GameEvent;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("playback error: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shot,
    /// Enemy destroyed by a bullet
    EnemyDestroyed,
    /// Player lost a life
    PlayerHit,
    /// Session started or restarted
    GameStart,
    /// New highscore set
    NewRecord,
    /// Background loop
    Music,
}

impl SoundEffect {
    /// File stem under `assets/sounds`
    pub fn stem(self) -> &'static str {
        match self {
            SoundEffect::Shot => "gunplayer",
            SoundEffect::EnemyDestroyed => "deadenemy",
            SoundEffect::PlayerHit => "deadplayer",
            SoundEffect::GameStart | SoundEffect::NewRecord => "gamestart",
            SoundEffect::Music => "musicgame",
        }
    }

    /// One-shot effect for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(SoundEffect::Shot),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::EnemyDestroyed),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::GameStarted => Some(SoundEffect::GameStart),
            GameEvent::NewRecord { .. } => Some(SoundEffect::NewRecord),
            GameEvent::MusicStart | GameEvent::MusicStop | GameEvent::GameOver { .. } => None,
        }
    }
}

/// Open output device; the stream must outlive every sink
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio manager for the game
pub struct AudioManager {
    sound_dir: PathBuf,
    sfx_volume: f32,
    music_volume: f32,
    output: Option<Output>,
    /// Sink for the looping background track
    music: Option<Sink>,
    music_playing: bool,
    /// Everything triggered so far, newest last
    played: Vec<SoundEffect>,
}

impl AudioManager {
    /// Open the default output device. Falls back to log-only playback if
    /// there is none.
    pub fn new(settings: &Settings) -> Self {
        let mut audio = Self::silent(settings);
        if audio.sfx_volume > 0.0 || audio.music_volume > 0.0 {
            audio.output = match OutputStream::try_default() {
                Ok((stream, handle)) => Some(Output {
                    _stream: stream,
                    handle,
                }),
                Err(e) => {
                    log::warn!("No audio output device ({}) - audio disabled", e);
                    None
                }
            };
        }
        audio
    }

    /// A manager that never touches an output device
    pub fn silent(settings: &Settings) -> Self {
        Self {
            sound_dir: settings.asset_root.join("assets").join("sounds"),
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            output: None,
            music: None,
            music_playing: false,
            played: Vec::new(),
        }
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MusicStart => self.start_music(),
            GameEvent::MusicStop => self.stop_music(),
            _ => {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.play(effect);
                }
            }
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        self.played.push(effect);

        let Some(path) = resolve_sound(&self.sound_dir, effect.stem()) else {
            log::debug!("play {:?} (no sound file)", effect);
            return;
        };
        let Some(output) = &self.output else {
            log::debug!("play {:?} ({}) without output", effect, path.display());
            return;
        };
        match start_sink(&output.handle, &path, self.sfx_volume, false) {
            Ok(sink) => sink.detach(),
            Err(e) => log::warn!("Failed to play {}: {}", path.display(), e),
        }
    }

    fn start_music(&mut self) {
        if self.music_playing || self.music_volume <= 0.0 {
            return;
        }
        self.music_playing = true;

        let Some(path) = resolve_sound(&self.sound_dir, SoundEffect::Music.stem()) else {
            log::debug!("music loop start (no sound file)");
            return;
        };
        let Some(output) = &self.output else {
            log::debug!("music loop start ({}) without output", path.display());
            return;
        };
        match start_sink(&output.handle, &path, self.music_volume, true) {
            Ok(sink) => self.music = Some(sink),
            Err(e) => log::warn!("Failed to start music {}: {}", path.display(), e),
        }
    }

    /// Stop the background loop (also used on shutdown)
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
        if self.music_playing {
            self.music_playing = false;
            log::debug!("music loop stop");
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn played(&self) -> &[SoundEffect] {
        &self.played
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("sound_dir", &self.sound_dir)
            .field("sfx_volume", &self.sfx_volume)
            .field("music_volume", &self.music_volume)
            .field("has_output", &self.output.is_some())
            .field("music_playing", &self.music_playing)
            .finish_non_exhaustive()
    }
}

/// Decode a sound file
pub fn load_source(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
    let file = File::open(path)?;
    Ok(Decoder::new(BufReader::new(file))?)
}

/// Start a sound on its own sink at `volume`, looping forever if asked
fn start_sink(
    handle: &OutputStreamHandle,
    path: &Path,
    volume: f32,
    looped: bool,
) -> Result<Sink, AudioError> {
    let source = load_source(path)?;
    let sink = Sink::try_new(handle)?;
    sink.set_volume(volume);
    if looped {
        sink.append(source.repeat_infinite());
    } else {
        sink.append(source);
    }
    Ok(sink)
}

/// Find `<stem>.mp3` or `<stem>.wav` in `dir`
pub fn resolve_sound(dir: &Path, stem: &str) -> Option<PathBuf> {
    ["mp3", "wav"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.exists())
}
