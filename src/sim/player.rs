//! Player physics, scoring and sprite-frame selection
//!
//! There is no ground plane: the starting floor exists only as the
//! `standing_on_floor` flag, and the first push spends it for the rest of
//! the life. Score accrues from sustained upward velocity rather than
//! height reached, which rewards keeping the jetpack chain alive.

use glam::Vec2;

use super::collectible::Collectible;
use super::collision::sprites_touch;
use super::entity::Anim;
use crate::consts::*;
use crate::horizontal_border;

/// Horizontal intent from input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Still,
    Right,
}

/// Frame columns used while walking on the floor
const WALK_FRAME_BASE: u16 = 3;
/// Frame columns used while gaining height
const RISE_FRAME_BASE: u16 = 1;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    standing_on_floor: bool,
    score_units: u64,
    facing_right: bool,
    anim: Anim,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            standing_on_floor: true,
            score_units: 0,
            facing_right: true,
            anim: Anim::new(2),
        }
    }

    /// Back to the starting position, floor jump restored
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply horizontal intent
    ///
    /// While rising, running speed grows by `log2(vy)` so built-up momentum
    /// carries into steering.
    pub fn set_heading(&mut self, heading: Heading) {
        let lift_bonus = if self.vel.y > 0.0 {
            self.vel.y.log2()
        } else {
            0.0
        };
        match heading {
            Heading::Right => {
                self.vel.x = BASE_RUN_SPEED + lift_bonus;
                self.facing_right = true;
            }
            Heading::Left => {
                self.vel.x = -(BASE_RUN_SPEED + lift_bonus);
                self.facing_right = false;
            }
            Heading::Still => self.vel.x = 0.0,
        }
    }

    /// One dt-scaled physics step
    pub fn integrate(&mut self, dt: f32) {
        // X axis: the update is frozen, not clamped, at the playfield border
        let new_x = self.pos.x + self.vel.x * dt;
        let border = horizontal_border(SCREEN_W, PLAYER_W);
        if self.vel.x != 0.0 && new_x >= -border && new_x <= border {
            self.pos.x = new_x;
        }

        // Y axis: once in motion the player can always fall through y = 0
        if self.vel.y != 0.0 || self.pos.y > 0.0 {
            self.pos.y += self.vel.y * dt;
            self.vel.y -= GRAVITY * dt;

            if self.vel.y > 0.0 {
                self.score_units += (self.vel.y * dt).round() as u64;
            }
        }

        if self.vel.y > 0.0 || (self.standing_on_floor && self.vel.x != 0.0) {
            self.anim.advance(dt / PLAYER_ANIM_DIVISOR);
        }
    }

    /// Manual jump; only valid while still standing on the floor
    ///
    /// Returns false (and changes nothing) once airborne.
    pub fn jump(&mut self) -> bool {
        if self.standing_on_floor {
            self.standing_on_floor = false;
            self.force_push(1);
            true
        } else {
            false
        }
    }

    /// Externally-triggered vertical boost of the given level
    pub fn force_push(&mut self, level: u8) {
        if self.vel.y < JUMP_FLOOR_SPEED {
            self.vel.y = JUMP_FLOOR_SPEED;
        }
        self.vel.y += BOOST_PER_LEVEL * level as f32;
        self.vel.y = self.vel.y.min(SPEED_LIMIT);
        // The floor jump is spent for this life
        self.standing_on_floor = false;
    }

    pub fn touches(&self, star: &Collectible) -> bool {
        sprites_touch(self.pos, Self::size(), star.pos, Collectible::size())
    }

    /// True once the player has dropped past the loss threshold
    pub fn has_fallen_out(&self) -> bool {
        self.pos.y < -2.0 * PLAYER_H
    }

    /// Displayed score
    pub fn score(&self) -> u64 {
        self.score_units / SCORE_UNIT_DIVISOR
    }

    /// Velocity magnitude for the HUD readout
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn standing_on_floor(&self) -> bool {
        self.standing_on_floor
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_W, PLAYER_H)
    }

    pub fn sprite_key(&self) -> &'static str {
        "player"
    }

    /// Sprite sheet (column, row) on display
    ///
    /// Walking cycles columns 3-4, rising cycles 1-2, otherwise column 0;
    /// the row flips with facing direction.
    pub fn sprite_frame(&self) -> (u16, u16) {
        let col = if self.standing_on_floor && self.vel.x != 0.0 {
            WALK_FRAME_BASE + self.anim.frame()
        } else if self.vel.y > 0.0 {
            RISE_FRAME_BASE + self.anim.frame()
        } else {
            0
        };
        (col, if self.facing_right { 1 } else { 0 })
    }
}
