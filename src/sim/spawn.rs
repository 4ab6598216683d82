//! Horizon maintenance
//!
//! Keeps the region above the camera stocked with stars. Only the tail of
//! the list is inspected, so per-frame work is bounded by the number of
//! rows newly revealed since the last step — amortized O(1), never a
//! rescan of the whole list.

use rand::Rng;

use super::collectible::Collectible;
use crate::consts::*;

/// Top up the star list until the newest row sits a full screen ahead
///
/// Postcondition: the list is non-empty and the most recently appended
/// star's `spawn_y` is at least `SCREEN_H`.
pub fn replenish(stars: &mut Vec<Collectible>, rng: &mut impl Rng) {
    // At least one star must exist to anchor the horizon
    if stars.is_empty() {
        stars.push(Collectible::basic(0.0, rng));
    }

    let mut tail_y = stars.last().map_or(0.0, |star| star.spawn_y);

    while tail_y < SCREEN_H {
        let star = Collectible::basic(tail_y, rng);
        let row_y = star.spawn_y;
        stars.push(star);

        // The occasional row also gets a drifting star at the same height
        if rng.random_range(0..MOVING_STAR_DIE) == 1 {
            stars.push(Collectible::moving(tail_y, rng));
        }

        tail_y = row_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collectible::CollectibleKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_replenish_fills_a_screen_ahead() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut stars = Vec::new();
        replenish(&mut stars, &mut rng);

        assert!(!stars.is_empty());
        let tail = stars.last().map(|s| s.spawn_y);
        assert!(tail >= Some(SCREEN_H));
    }

    #[test]
    fn test_replenish_is_idempotent_when_stocked() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut stars = Vec::new();
        replenish(&mut stars, &mut rng);

        let count = stars.len();
        replenish(&mut stars, &mut rng);
        assert_eq!(stars.len(), count);
    }

    #[test]
    fn test_rows_are_evenly_spaced() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut stars = Vec::new();
        replenish(&mut stars, &mut rng);

        let rows: Vec<f32> = stars
            .iter()
            .filter(|s| s.kind == CollectibleKind::Basic)
            .map(|s| s.spawn_y)
            .collect();
        for pair in rows.windows(2) {
            assert_eq!(pair[1] - pair[0], STAR_SPACING);
        }
    }

    #[test]
    fn test_extends_from_recentered_tail() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut stars = Vec::new();
        replenish(&mut stars, &mut rng);

        // Camera moved up: every spawn_y drops by 200
        for star in stars.iter_mut() {
            star.shift_y(-200.0);
        }
        // Some stars are now below the fold, the tail is inside the screen
        replenish(&mut stars, &mut rng);
        let tail = stars.last().map(|s| s.spawn_y);
        assert!(tail >= Some(SCREEN_H));
    }

    #[test]
    fn test_deterministic_for_a_seed() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        replenish(&mut a, &mut Pcg32::seed_from_u64(99));
        replenish(&mut b, &mut Pcg32::seed_from_u64(99));

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.vel, y.vel);
        }
    }
}
