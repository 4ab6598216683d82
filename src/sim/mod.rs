//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the state
//! - Variable `dt` in design-tick units, supplied by the frame driver
//! - No rendering or platform dependencies

pub mod collectible;
pub mod collision;
pub mod entity;
pub mod player;
pub mod spawn;
pub mod state;
pub mod step;

pub use collectible::{Collectible, CollectibleKind};
pub use collision::sprites_touch;
pub use entity::Anim;
pub use player::{Heading, Player};
pub use spawn::replenish;
pub use state::{GameEvent, GameState, RoundPhase};
pub use step::{step, InputEvent, StepResult};
