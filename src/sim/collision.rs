//! Player/star contact test
//!
//! Axis-aligned box overlap with an asymmetric vertical tolerance: the
//! y-check uses the full player height plus *half* the other sprite's
//! height, so contact is registered more generously above and below than
//! to the sides. Pickups must feel forgiving at jetpack speeds.

use glam::Vec2;

/// True if two sprites centered at `a_pos`/`b_pos` overlap
///
/// `a` is the probing sprite (the player); the vertical tolerance is
/// `a.h + b.h/2` while the horizontal one is the symmetric `(a.w + b.w)/2`.
#[inline]
pub fn sprites_touch(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    (a_pos.y - b_pos.y).abs() < a_size.y + b_size.y / 2.0
        && (a_pos.x - b_pos.x).abs() < (a_size.x + b_size.x) / 2.0
}
