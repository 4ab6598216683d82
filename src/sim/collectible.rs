//! Collectible stars
//!
//! Two variants share one struct: `Basic` sits where it spawned, `Moving`
//! drifts with a constant velocity sampled once at spawn. `spawn_y` keeps
//! the pre-recentering spawn coordinate so the generator can extend the
//! horizon from the most recent row regardless of how far the camera has
//! shifted; it must move in lock-step with `pos.y` on every recenter.

use glam::Vec2;
use rand::Rng;

use super::entity::Anim;
use crate::consts::*;
use crate::horizontal_border;

/// Star frame columns in the sprite sheet
const STAR_FRAMES: u16 = 4;

/// Which flavor of star this is; decides the push level on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    Basic,
    Moving,
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
    /// Spawn-order vertical coordinate, shifted together with `pos.y`
    pub spawn_y: f32,
    /// Constant drift; zero for basic stars
    pub vel: Vec2,
    anim: Anim,
}

impl Collectible {
    /// Spawn a stationary star one row above `prev_spawn_y`
    pub fn basic(prev_spawn_y: f32, rng: &mut impl Rng) -> Self {
        let y = prev_spawn_y + STAR_SPACING;
        let border = horizontal_border(SCREEN_W, STAR_W);
        Self {
            kind: CollectibleKind::Basic,
            pos: Vec2::new(rng.random_range(-border..=border), y),
            spawn_y: y,
            vel: Vec2::ZERO,
            anim: Anim::new(STAR_FRAMES),
        }
    }

    /// Spawn a drifting star at the same row height as a basic one
    pub fn moving(prev_spawn_y: f32, rng: &mut impl Rng) -> Self {
        let mut star = Self::basic(prev_spawn_y, rng);
        star.kind = CollectibleKind::Moving;
        star.vel = Vec2::new(
            rng.random_range(-MOVING_DRIFT_MAX..=MOVING_DRIFT_MAX) as f32,
            rng.random_range(-MOVING_DRIFT_MAX..=MOVING_DRIFT_MAX) as f32,
        );
        star
    }

    /// Per-step drift and animation
    pub fn advance(&mut self, dt: f32) {
        self.anim.advance(dt);
        self.pos += self.vel * dt;
    }

    /// Shift both live and spawn coordinates by the same camera delta
    pub fn shift_y(&mut self, delta: f32) {
        self.pos.y += delta;
        self.spawn_y += delta;
    }

    /// Push strength granted on pickup
    pub fn boost_level(&self) -> u8 {
        match self.kind {
            CollectibleKind::Basic => 1,
            CollectibleKind::Moving => 2,
        }
    }

    pub fn sprite_key(&self) -> &'static str {
        match self.kind {
            CollectibleKind::Basic => "basic_star",
            CollectibleKind::Moving => "moving_star",
        }
    }

    /// Sprite sheet column on display
    pub fn sprite_frame(&self) -> u16 {
        self.anim.frame()
    }

    pub fn size() -> Vec2 {
        Vec2::new(STAR_W, STAR_H)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_basic_spawns_one_row_up_inside_borders() {
        let mut rng = Pcg32::seed_from_u64(7);
        let border = horizontal_border(SCREEN_W, STAR_W);
        for prev in [0.0, 150.0, 550.0] {
            let star = Collectible::basic(prev, &mut rng);
            assert_eq!(star.spawn_y, prev + STAR_SPACING);
            assert_eq!(star.pos.y, star.spawn_y);
            assert!(star.pos.x >= -border && star.pos.x <= border);
            assert_eq!(star.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_moving_drift_is_bounded() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let star = Collectible::moving(100.0, &mut rng);
            let max = MOVING_DRIFT_MAX as f32;
            assert!(star.vel.x.abs() <= max);
            assert!(star.vel.y.abs() <= max);
        }
    }

    #[test]
    fn test_shift_keeps_spawn_y_in_lock_step() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut star = Collectible::basic(200.0, &mut rng);
        let (y0, s0) = (star.pos.y, star.spawn_y);

        star.shift_y(-120.0);
        assert_eq!(star.pos.y, y0 - 120.0);
        assert_eq!(star.spawn_y, s0 - 120.0);
    }

    #[test]
    fn test_advance_moves_only_movers() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut basic = Collectible::basic(0.0, &mut rng);
        let start = basic.pos;
        basic.advance(2.0);
        assert_eq!(basic.pos, start);

        let mut moving = Collectible::moving(0.0, &mut rng);
        let start = moving.pos;
        moving.advance(2.0);
        assert_eq!(moving.pos, start + moving.vel * 2.0);
    }
}
