//! Deviceless collaborators
//!
//! Drive the full session without a window, audio device or disk: unit
//! tests assert against the recorded draw calls, and the native binary
//! uses a scripted run as its demo mode.

use std::collections::VecDeque;

use super::{AudioSink, EffectAges, Presentation, Rect, ScoreStore, SoundEffect, TextStyle};
use crate::consts::{SCREEN_H, SCREEN_W};
use crate::highscores::HighScores;
use crate::sim::InputEvent;

/// Presentation that swallows draws and replays a frame-indexed script
pub struct HeadlessPresentation {
    frame: u64,
    script: VecDeque<(u64, InputEvent)>,
    /// Text drawn during the current frame, newest last
    pub text_log: Vec<String>,
    /// Sprites drawn during the current frame
    pub sprite_log: Vec<(String, Rect)>,
    /// When false, `present` reports device loss
    pub healthy: bool,
}

impl Default for HeadlessPresentation {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPresentation {
    pub fn new() -> Self {
        Self {
            frame: 0,
            script: VecDeque::new(),
            text_log: Vec::new(),
            sprite_log: Vec::new(),
            healthy: true,
        }
    }

    /// Deliver `events` at the frame indices given; must be sorted
    pub fn scripted(events: Vec<(u64, InputEvent)>) -> Self {
        let mut p = Self::new();
        p.script = events.into();
        p
    }

    /// Queue an event for the current frame
    pub fn push_event(&mut self, event: InputEvent) {
        self.script.push_back((self.frame, event));
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Presentation for HeadlessPresentation {
    fn screen_width(&self) -> u32 {
        SCREEN_W as u32
    }

    fn screen_height(&self) -> u32 {
        SCREEN_H as u32
    }

    fn load_image(&mut self, _key: &str) -> bool {
        true
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        match self.script.front() {
            Some(&(at, event)) if at <= self.frame => {
                self.script.pop_front();
                Some(event)
            }
            _ => None,
        }
    }

    fn clear(&mut self) {
        self.text_log.clear();
        self.sprite_log.clear();
    }

    fn draw_sprite(&mut self, key: &str, _src: Rect, dst: Rect) -> bool {
        self.sprite_log.push((key.to_string(), dst));
        true
    }

    fn draw_text(&mut self, text: &str, _y: f32, _style: TextStyle) {
        self.text_log.push(text.to_string());
    }

    fn present(&mut self) -> bool {
        self.frame += 1;
        self.healthy
    }
}

/// Audio sink that only keeps the retrigger bookkeeping
#[derive(Debug, Default)]
pub struct NullAudio {
    ages: EffectAges,
    paused: bool,
    /// Every effect played, in order
    pub play_log: Vec<SoundEffect>,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for NullAudio {
    fn play(&mut self, effect: SoundEffect, now_ms: f64) -> bool {
        self.ages.record(effect, now_ms);
        self.play_log.push(effect);
        true
    }

    fn ms_since(&self, effect: SoundEffect, now_ms: f64) -> f64 {
        self.ages.ms_since(effect, now_ms)
    }

    fn toggle_music(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

/// In-memory score store
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    saved: Option<HighScores>,
    /// Number of times `save` ran
    pub save_count: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(scores: HighScores) -> Self {
        Self {
            saved: Some(scores),
            save_count: 0,
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> HighScores {
        self.saved.clone().unwrap_or_default()
    }

    fn save(&mut self, scores: &HighScores) {
        self.saved = Some(scores.clone());
        self.save_count += 1;
    }
}
