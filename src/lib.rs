//! Starleap - an endless vertical-scroller arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, round phases)
//! - `frame`: Frame timing (dt conversion, throttling, rolling FPS)
//! - `session`: Shell tying the simulation to its collaborators
//! - `platform`: Presentation/audio/persistence traits + headless impls
//! - `highscores`: Fixed-size leaderboard with the legacy text codec
//! - `settings`: Data-driven player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod frame;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
///
/// Physics constants are expressed in design-tick units: `dt == 1.0` means
/// one tick of the native 24 Hz physics rate. The frame driver converts
/// wall-clock milliseconds into ticks by dividing by [`consts::PHYSICS_TICK_MS`].
pub mod consts {
    /// Logical playfield size in world pixels
    pub const SCREEN_W: f32 = 1000.0;
    pub const SCREEN_H: f32 = 600.0;

    /// Owned-loop throttle target (frames per second)
    pub const FRAME_RATE: u32 = 60;
    /// Target frame interval for the owned loop
    pub const REFRESH_MS: f64 = 1000.0 / FRAME_RATE as f64;
    /// Duration of one design physics tick
    pub const PHYSICS_TICK_MS: f64 = 1000.0 / 24.0;

    /// Player sprite size
    pub const PLAYER_W: f32 = 20.0;
    pub const PLAYER_H: f32 = 40.0;
    /// Star sprite size (both variants)
    pub const STAR_W: f32 = 20.0;
    pub const STAR_H: f32 = 20.0;

    /// Downward acceleration per tick²
    pub const GRAVITY: f32 = 1.0;
    /// Horizontal speed while a direction is held
    pub const BASE_RUN_SPEED: f32 = 10.0;
    /// Any push first raises vertical speed to at least this
    pub const JUMP_FLOOR_SPEED: f32 = 10.0;
    /// Extra vertical speed per push level (1 = basic, 2 = moving star)
    pub const BOOST_PER_LEVEL: f32 = 10.0;
    /// Vertical speed cap (higher makes the game trivial)
    pub const SPEED_LIMIT: f32 = 80.0;

    /// Vertical gap between spawned star rows
    pub const STAR_SPACING: f32 = 50.0;
    /// A d7 roll of 1 adds a moving star to the row
    pub const MOVING_STAR_DIE: u32 = 7;
    /// Moving stars drift up to this many pixels per tick on each axis
    pub const MOVING_DRIFT_MAX: i32 = 5;

    /// Score accrues in sub-units; displayed score = units / this
    pub const SCORE_UNIT_DIVISOR: u64 = 10;
    /// Player animation advances at dt / this
    pub const PLAYER_ANIM_DIVISOR: f32 = 10.0;

    /// Minimum interval before the jetpack effect may re-trigger on pickups
    pub const JETPACK_SOUND_MS: f64 = 388.0;
    /// Ticks of standing still before the "UP to jump" hint appears
    pub const IDLE_HINT_TICKS: f32 = 120.0;
    /// Nickname length cap for highscore entry
    pub const NICK_MAX: usize = 5;
}

/// Half-width a sprite's center may travel before leaving the playfield
///
/// World x:0 is the middle of the screen, so the border is symmetric.
#[inline]
pub fn horizontal_border(screen_w: f32, sprite_w: f32) -> f32 {
    (screen_w - sprite_w) / 2.0
}
