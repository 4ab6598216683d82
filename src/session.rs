//! The shell around the simulation
//!
//! A `Session` owns the game state and the three collaborators, and turns
//! one frame's worth of wall-clock time into poll → step → side effects →
//! render. Both control-flow shells drive it through [`Session::run_step`],
//! which is why neither may embed its own event loop.

use std::fmt;

use crate::consts::*;
use crate::frame::FrameTiming;
use crate::platform::{
    AudioSink, Presentation, Rect, ScoreStore, SoundEffect, TextAlign, TextColor, TextStyle,
};
use crate::settings::Settings;
use crate::sim::{step, GameEvent, GameState, RoundPhase, StepResult};

/// Sprite sheets the presentation must provide
const SPRITE_KEYS: [&str; 3] = ["player", "basic_star", "moving_star"];

/// HUD and board layout (y measured from the top)
const SCORE_Y: f32 = 10.0;
const VELOCITY_Y: f32 = 10.0;
const HINT_Y: f32 = 520.0;
const FPS_Y: f32 = 580.0;
const BOARD_HEADER_Y: f32 = 125.0;
const BOARD_FIRST_ENTRY_Y: f32 = 150.0;
const BOARD_ENTRY_SPACING: f32 = 20.0;
const NEW_HIGHSCORE_Y: f32 = 375.0;
const NICK_PROMPT_Y: f32 = 400.0;
const NICK_Y: f32 = 425.0;
const CONTINUE_Y: f32 = 490.0;

/// Fatal startup failure; the simulation never runs
#[derive(Debug)]
pub enum InitError {
    ImageLoad(&'static str),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::ImageLoad(key) => write!(f, "failed to load image '{key}'"),
        }
    }
}

impl std::error::Error for InitError {}

pub struct Session<P: Presentation, A: AudioSink, S: ScoreStore> {
    state: GameState,
    presentation: P,
    audio: A,
    store: S,
    show_fps: bool,
}

impl<P: Presentation, A: AudioSink, S: ScoreStore> Session<P, A, S> {
    pub fn new(
        mut presentation: P,
        audio: A,
        store: S,
        settings: &Settings,
        seed: u64,
    ) -> Result<Self, InitError> {
        for key in SPRITE_KEYS {
            if !presentation.load_image(key) {
                return Err(InitError::ImageLoad(key));
            }
        }

        let scores = store.load();
        Ok(Self {
            state: GameState::new(seed, scores),
            presentation,
            audio,
            store,
            show_fps: settings.show_fps,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Begin the next round; the driver calls this on `StepResult::Restart`
    pub fn reset_round(&mut self) {
        self.state.reset_round();
    }

    /// One full frame: poll input, simulate, apply side effects, render
    pub fn run_step(&mut self, timing: &FrameTiming) -> StepResult {
        let mut input = Vec::new();
        while let Some(event) = self.presentation.poll_event() {
            input.push(event);
        }

        let verdict = step(&mut self.state, &input, timing.dt);
        if verdict == StepResult::Quit {
            return StepResult::Quit;
        }

        self.apply_events(timing.now_ms);

        if !self.render(timing) {
            return StepResult::Error;
        }
        verdict
    }

    /// Translate the step's events into collaborator calls
    fn apply_events(&mut self, now_ms: f64) {
        let events = std::mem::take(&mut self.state.events);
        for event in &events {
            match event {
                GameEvent::Jumped => {
                    self.audio.play(SoundEffect::Jetpack, now_ms);
                }
                GameEvent::Collected { moving } => {
                    // Pickup boosts re-trigger the jetpack sound only after
                    // the previous one has had time to play out
                    if self.audio.ms_since(SoundEffect::Jetpack, now_ms) > JETPACK_SOUND_MS {
                        self.audio.play(SoundEffect::Jetpack, now_ms);
                    }
                    self.audio.play(SoundEffect::StarBasic, now_ms);
                    if *moving {
                        self.audio.play(SoundEffect::StarMoving, now_ms);
                    }
                }
                GameEvent::RoundOver { placed } => {
                    if placed.is_some() {
                        self.store.save(&self.state.scores);
                        self.audio.play(SoundEffect::HighScore, now_ms);
                    } else {
                        self.audio.play(SoundEffect::GameOver, now_ms);
                    }
                }
                GameEvent::NicknameCommitted => {
                    self.store.save(&self.state.scores);
                }
                GameEvent::MusicToggled => {
                    let paused = self.audio.toggle_music();
                    log::info!("music {}", if paused { "paused" } else { "resumed" });
                }
                GameEvent::FpsToggled => {
                    self.show_fps = !self.show_fps;
                }
            }
        }
    }

    fn render(&mut self, timing: &FrameTiming) -> bool {
        self.presentation.clear();

        for star in &self.state.stars {
            let frame = star.sprite_frame() as f32;
            self.presentation.draw_sprite(
                star.sprite_key(),
                Rect {
                    x: frame * STAR_W,
                    y: 0.0,
                    w: STAR_W,
                    h: STAR_H,
                },
                Rect {
                    x: star.pos.x,
                    y: star.pos.y,
                    w: STAR_W,
                    h: STAR_H,
                },
            );
        }

        let player = &self.state.player;
        let (col, row) = player.sprite_frame();
        self.presentation.draw_sprite(
            player.sprite_key(),
            Rect {
                x: col as f32 * PLAYER_W,
                y: row as f32 * PLAYER_H,
                w: PLAYER_W,
                h: PLAYER_H,
            },
            Rect {
                x: player.pos.x,
                y: player.pos.y,
                w: PLAYER_W,
                h: PLAYER_H,
            },
        );

        self.presentation.draw_text(
            &format!("Score: {}", player.score()),
            SCORE_Y,
            TextStyle::default(),
        );
        self.presentation.draw_text(
            &format!("Velocity: {} m/s", player.speed().round() as i64),
            VELOCITY_Y,
            TextStyle {
                color: TextColor::White,
                align: TextAlign::Right,
                small: true,
                bright: false,
            },
        );

        if self.state.phase == RoundPhase::Playing
            && player.standing_on_floor()
            && self.state.ticks > IDLE_HINT_TICKS
        {
            self.presentation
                .draw_text("UP to jump", HINT_Y, TextStyle::default());
        }

        if self.show_fps {
            self.presentation.draw_text(
                &format!(" FPS: {}", timing.fps.round() as i64),
                FPS_Y,
                TextStyle {
                    color: TextColor::Green,
                    align: TextAlign::Left,
                    small: true,
                    bright: true,
                },
            );
        }

        if self.state.phase != RoundPhase::Playing {
            self.draw_board();
        }

        self.presentation.present()
    }

    /// Round-over board, redrawn every frame so no shell has to block
    fn draw_board(&mut self) {
        let placed = match &self.state.phase {
            RoundPhase::AwaitingScoreEntry { slot, .. } => Some(*slot),
            RoundPhase::AwaitingAcknowledge { slot } => *slot,
            RoundPhase::Playing => None,
        };

        self.presentation
            .draw_text("Highscore", BOARD_HEADER_Y, TextStyle::default());

        for (i, entry) in self.state.scores.entries().iter().enumerate() {
            let line = if entry.name.is_empty() {
                entry.score.to_string()
            } else {
                format!("{} ({})", entry.score, entry.name)
            };
            let color = if placed == Some(i) {
                TextColor::Orange
            } else {
                TextColor::Yellow
            };
            self.presentation.draw_text(
                &line,
                BOARD_FIRST_ENTRY_Y + i as f32 * BOARD_ENTRY_SPACING,
                TextStyle {
                    color,
                    ..TextStyle::default()
                },
            );
        }

        if placed.is_some() {
            self.presentation
                .draw_text("New highscore!", NEW_HIGHSCORE_Y, TextStyle::default());
        }

        match &self.state.phase {
            RoundPhase::AwaitingScoreEntry { nick, .. } => {
                self.presentation.draw_text(
                    "Enter your name (1-5 letters) and press enter",
                    NICK_PROMPT_Y,
                    TextStyle::default(),
                );
                let shown = if nick.is_empty() { "_" } else { nick.as_str() };
                self.presentation.draw_text(
                    shown,
                    NICK_Y,
                    TextStyle {
                        color: TextColor::Orange,
                        ..TextStyle::default()
                    },
                );
            }
            RoundPhase::AwaitingAcknowledge { .. } => {
                self.presentation.draw_text(
                    "Press any key to continue",
                    CONTINUE_Y,
                    TextStyle::default(),
                );
            }
            RoundPhase::Playing => {}
        }
    }
}
