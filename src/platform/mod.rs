//! Platform abstraction layer
//!
//! The simulation core never talks to a device. These traits are the
//! whole surface the shells provide:
//! - [`Presentation`]: image/text drawing, frame flush, input polling
//! - [`AudioSink`]: fire-and-forget effects, music toggle, retrigger ages
//! - [`ScoreStore`]: leaderboard load/save in the legacy text format
//!
//! `headless` implements all three with no device at all, for tests and
//! the native demo shell; `web` implements them on canvas 2D, DOM events
//! and LocalStorage.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::collections::HashMap;

use crate::highscores::HighScores;
use crate::sim::InputEvent;

/// Sprite-sheet source / destination rectangle, world coordinates for `dst`
///
/// World space puts x:0 at the horizontal center and y:0 at the bottom;
/// implementations perform the flip into their own device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Cyan,
    Yellow,
    Orange,
    White,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// How a line of HUD text should render
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub color: TextColor,
    pub align: TextAlign,
    pub small: bool,
    pub bright: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: TextColor::Cyan,
            align: TextAlign::Center,
            small: false,
            bright: false,
        }
    }
}

/// Drawing and input collaborator
pub trait Presentation {
    fn screen_width(&self) -> u32;
    fn screen_height(&self) -> u32;

    /// Make an image resource available under `key`; false is fatal
    fn load_image(&mut self, key: &str) -> bool;

    /// Next pending abstract input symbol, if any
    fn poll_event(&mut self) -> Option<InputEvent>;

    fn clear(&mut self);
    fn draw_sprite(&mut self, key: &str, src: Rect, dst: Rect) -> bool;
    /// `y` is measured downward from the top of the screen
    fn draw_text(&mut self, text: &str, y: f32, style: TextStyle);

    /// Flush the frame; false is an unrecoverable device loss
    fn present(&mut self) -> bool;
}

/// Sound effects the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Jetpack,
    StarBasic,
    StarMoving,
    GameOver,
    HighScore,
}

/// Audio collaborator
pub trait AudioSink {
    /// Play an effect; `now_ms` stamps the retrigger age bookkeeping
    fn play(&mut self, effect: SoundEffect, now_ms: f64) -> bool;

    /// Milliseconds since `effect` last played; infinity if it never did
    fn ms_since(&self, effect: SoundEffect, now_ms: f64) -> f64;

    /// Pause or resume background music; returns true when now paused
    fn toggle_music(&mut self) -> bool;
}

/// Leaderboard persistence collaborator
pub trait ScoreStore {
    /// Load the table; malformed or missing data yields a zeroed board
    fn load(&self) -> HighScores;
    fn save(&mut self, scores: &HighScores);
}

/// Last-played timestamps shared by audio sinks
#[derive(Debug, Clone, Default)]
pub struct EffectAges {
    played_at: HashMap<SoundEffect, f64>,
}

impl EffectAges {
    pub fn record(&mut self, effect: SoundEffect, now_ms: f64) {
        self.played_at.insert(effect, now_ms);
    }

    pub fn ms_since(&self, effect: SoundEffect, now_ms: f64) -> f64 {
        self.played_at
            .get(&effect)
            .map_or(f64::INFINITY, |at| now_ms - at)
    }
}

/// Dotfile-backed score store for native builds
#[cfg(not(target_arch = "wasm32"))]
pub struct FileScoreStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileScoreStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileScoreStore {
    fn load(&self) -> HighScores {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => HighScores::parse(&text),
            Err(err) => {
                log::info!("no readable highscore file ({err}); starting zeroed");
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) {
        if let Err(err) = std::fs::write(&self.path, scores.format()) {
            log::warn!("failed to save highscores: {err}");
        }
    }
}
