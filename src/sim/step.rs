//! The per-step simulation function
//!
//! One call advances the world by `dt` design ticks: input dispatch,
//! player integration, star interaction, horizon replenishment, the loss
//! check and camera recentering, all phase-aware. Both control-flow
//! shells (the blocking native loop and the browser-pumped callback)
//! call exactly this, so their observable behavior cannot drift apart.

use super::player::Heading;
use super::spawn;
use super::state::{GameEvent, GameState, RoundPhase};
use crate::consts::*;

/// Abstract input symbols delivered by the presentation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Left,
    Right,
    Still,
    Up,
    PausePlay,
    Quit,
    FpsToggle,
    /// A letter key, consumed by highscore name entry
    Char(char),
    Backspace,
    Enter,
}

/// What the caller should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Keep stepping
    Continue,
    /// Reset the round, then keep stepping
    Restart,
    /// Orderly shutdown requested
    Quit,
    /// Unrecoverable presentation failure; terminate with nonzero status
    Error,
}

/// Advance the simulation by `dt` ticks
pub fn step(state: &mut GameState, input: &[InputEvent], dt: f32) -> StepResult {
    state.events.clear();

    if let Some(result) = dispatch_input(state, input) {
        return result;
    }

    if state.phase != RoundPhase::Playing {
        return StepResult::Continue;
    }

    state.ticks += dt;
    state.player.integrate(dt);

    // Stars act, then the player sweeps up touches; strays that drifted
    // below the screen drop silently
    let GameState {
        player,
        stars,
        events,
        rng,
        ..
    } = state;

    for star in stars.iter_mut() {
        star.advance(dt);
    }
    stars.retain(|star| {
        let touched = player.touches(star);
        if touched {
            player.force_push(star.boost_level());
            events.push(GameEvent::Collected {
                moving: star.boost_level() > 1,
            });
        }
        !touched && star.pos.y >= 0.0
    });

    spawn::replenish(stars, rng);

    if player.has_fallen_out() {
        let final_score = player.score();
        let placed = state.scores.insert(final_score);
        log::info!("round over: score {final_score}, placed {placed:?}");

        state.phase = match placed {
            Some(slot) => RoundPhase::AwaitingScoreEntry {
                slot,
                nick: String::new(),
            },
            None => RoundPhase::AwaitingAcknowledge { slot: None },
        };
        events.push(GameEvent::RoundOver { placed });
        return StepResult::Continue;
    }

    // Recenter the camera once the player climbs past mid-screen
    let offset = player.pos.y - SCREEN_H / 2.0;
    if offset > 0.0 {
        player.pos.y -= offset;
        for star in stars.iter_mut() {
            star.shift_y(-offset);
        }
    }

    StepResult::Continue
}

/// Phase-sensitive input handling; `Some` short-circuits the step
fn dispatch_input(state: &mut GameState, input: &[InputEvent]) -> Option<StepResult> {
    for &ev in input {
        if ev == InputEvent::Quit {
            return Some(StepResult::Quit);
        }

        match &mut state.phase {
            RoundPhase::Playing => match ev {
                InputEvent::Left => state.player.set_heading(Heading::Left),
                InputEvent::Right => state.player.set_heading(Heading::Right),
                InputEvent::Still => state.player.set_heading(Heading::Still),
                InputEvent::Up => {
                    if state.player.jump() {
                        state.events.push(GameEvent::Jumped);
                    }
                }
                InputEvent::PausePlay => state.events.push(GameEvent::MusicToggled),
                InputEvent::FpsToggle => state.events.push(GameEvent::FpsToggled),
                // Letter keys double as commands outside name entry, so the
                // presentation can stay phase-blind
                InputEvent::Char(c) => match c.to_ascii_lowercase() {
                    'q' => return Some(StepResult::Quit),
                    'p' => state.events.push(GameEvent::MusicToggled),
                    'f' => state.events.push(GameEvent::FpsToggled),
                    _ => {}
                },
                _ => {}
            },

            RoundPhase::AwaitingScoreEntry { slot, nick } => match ev {
                InputEvent::Char(c) if c.is_ascii_alphabetic() && nick.len() < NICK_MAX => {
                    nick.push(c.to_ascii_uppercase());
                }
                InputEvent::Backspace => {
                    nick.pop();
                }
                InputEvent::Enter if !nick.is_empty() => {
                    let slot = *slot;
                    state.scores.set_nickname(slot, nick.clone());
                    state.phase = RoundPhase::AwaitingAcknowledge { slot: Some(slot) };
                    state.events.push(GameEvent::NicknameCommitted);
                }
                _ => {}
            },

            // Any keypress restarts; Still is a key release, not a press
            RoundPhase::AwaitingAcknowledge { .. } => {
                if ev != InputEvent::Still {
                    return Some(StepResult::Restart);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::sim::collectible::Collectible;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fresh_state() -> GameState {
        GameState::new(1234, HighScores::new())
    }

    /// Run steps with no input until the round ends
    fn run_until_round_over(state: &mut GameState, max_steps: u32) {
        for _ in 0..max_steps {
            step(state, &[], 1.0);
            if state.phase != RoundPhase::Playing {
                return;
            }
        }
        panic!("round did not end within {max_steps} steps");
    }

    #[test]
    fn test_horizon_invariant_after_step() {
        let mut state = fresh_state();
        step(&mut state, &[], 1.0);

        assert!(!state.stars.is_empty());
        let tail = state.stars.last().map(|s| s.spawn_y);
        assert!(tail >= Some(SCREEN_H));
    }

    #[test]
    fn test_recentering_shifts_everything_in_lock_step() {
        let mut state = fresh_state();
        step(&mut state, &[], 1.0);

        state.player.jump();
        state.player.pos.y = SCREEN_H / 2.0 + 120.0;
        // Drop stars already in contact so the zip below stays aligned
        let probe = state.player.clone();
        state.stars.retain(|s| !probe.touches(s));
        let star_before: Vec<(f32, f32)> =
            state.stars.iter().map(|s| (s.pos.y, s.spawn_y)).collect();

        // One zero-dt step applies recentering without moving anything else
        step(&mut state, &[], 0.0);

        assert_eq!(state.player.pos.y, SCREEN_H / 2.0);
        for (star, (y, spawn_y)) in state.stars.iter().zip(star_before) {
            assert_eq!(star.pos.y, y - 120.0);
            assert_eq!(star.spawn_y, spawn_y - 120.0);
        }
    }

    #[test]
    fn test_pickup_scores_and_boosts() {
        let mut state = fresh_state();
        state.player.jump();
        // Plant a star straight onto the player
        let mut rng = Pcg32::seed_from_u64(0);
        let mut star = Collectible::basic(0.0, &mut rng);
        star.pos = state.player.pos;
        state.stars.push(star);

        step(&mut state, &[], 0.0);

        // Star removed, a pickup event emitted, velocity re-floored
        assert!(!state.stars.iter().any(|s| s.pos == state.player.pos));
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Collected { moving: false })));
        assert!(state.player.vel.y >= JUMP_FLOOR_SPEED);
    }

    #[test]
    fn test_offscreen_star_is_removed_silently() {
        let mut state = fresh_state();
        step(&mut state, &[], 1.0);

        let mut rng = Pcg32::seed_from_u64(0);
        let mut stray = Collectible::basic(0.0, &mut rng);
        stray.pos = glam::Vec2::new(400.0, -10.0);
        state.stars.insert(0, stray);

        step(&mut state, &[], 0.0);
        assert!(state.stars.iter().all(|s| s.pos.y >= 0.0));
        assert!(!state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Collected { .. })));
    }

    #[test]
    fn test_fall_ends_round_and_places_score_once() {
        let mut state = fresh_state();
        // Jump, then freefall with no input; gravity wins eventually
        step(&mut state, &[InputEvent::Up], 1.0);
        run_until_round_over(&mut state, 2000);

        // Any score, even 0, lands on an all-zero board
        assert!(matches!(
            state.phase,
            RoundPhase::AwaitingScoreEntry { slot: 0, .. }
        ));
        let placed_events = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundOver { .. }))
            .count();
        assert_eq!(placed_events, 1);

        // Further steps must not insert again
        let board_before: Vec<u64> = state.scores.entries().iter().map(|e| e.score).collect();
        step(&mut state, &[], 1.0);
        let board_after: Vec<u64> = state.scores.entries().iter().map(|e| e.score).collect();
        assert_eq!(board_before, board_after);
    }

    #[test]
    fn test_score_entry_keystrokes() {
        let mut state = fresh_state();
        step(&mut state, &[InputEvent::Up], 1.0);
        run_until_round_over(&mut state, 2000);

        let input = [
            InputEvent::Char('l'),
            InputEvent::Char('i'),
            InputEvent::Char('s'),
            InputEvent::Char('z'),
            InputEvent::Backspace,
            InputEvent::Char('a'),
            InputEvent::Char('x'), // sixth letter after backspace: still fits
        ];
        step(&mut state, &input, 1.0);
        match &state.phase {
            RoundPhase::AwaitingScoreEntry { nick, .. } => assert_eq!(nick, "LISAX"),
            other => panic!("unexpected phase {other:?}"),
        }

        // Length cap holds
        step(&mut state, &[InputEvent::Char('q')], 1.0);
        match &state.phase {
            RoundPhase::AwaitingScoreEntry { nick, .. } => assert_eq!(nick, "LISAX"),
            other => panic!("unexpected phase {other:?}"),
        }

        // Commit moves to acknowledge and writes the nickname
        step(&mut state, &[InputEvent::Enter], 1.0);
        assert!(matches!(
            state.phase,
            RoundPhase::AwaitingAcknowledge { slot: Some(0) }
        ));
        assert_eq!(state.scores.get(0).map(|e| e.name.as_str()), Some("LISAX"));
    }

    #[test]
    fn test_empty_nick_cannot_commit() {
        let mut state = fresh_state();
        step(&mut state, &[InputEvent::Up], 1.0);
        run_until_round_over(&mut state, 2000);

        step(&mut state, &[InputEvent::Enter], 1.0);
        assert!(matches!(
            state.phase,
            RoundPhase::AwaitingScoreEntry { .. }
        ));
    }

    #[test]
    fn test_acknowledge_any_key_restarts() {
        let mut state = fresh_state();
        state.phase = RoundPhase::AwaitingAcknowledge { slot: None };

        // A key release is not a keypress
        assert_eq!(step(&mut state, &[InputEvent::Still], 1.0), StepResult::Continue);
        assert_eq!(step(&mut state, &[InputEvent::Left], 1.0), StepResult::Restart);
    }

    #[test]
    fn test_quit_wins_in_every_phase() {
        for phase in [
            RoundPhase::Playing,
            RoundPhase::AwaitingScoreEntry {
                slot: 0,
                nick: String::new(),
            },
            RoundPhase::AwaitingAcknowledge { slot: None },
        ] {
            let mut state = fresh_state();
            state.phase = phase;
            assert_eq!(step(&mut state, &[InputEvent::Quit], 1.0), StepResult::Quit);
        }
    }

    #[test]
    fn test_manual_jump_emits_event_only_from_floor() {
        let mut state = fresh_state();
        step(&mut state, &[InputEvent::Up], 1.0);
        assert!(state.events.contains(&GameEvent::Jumped));

        step(&mut state, &[InputEvent::Up], 1.0);
        assert!(!state.events.contains(&GameEvent::Jumped));
    }
}
