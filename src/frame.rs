//! Frame timing
//!
//! Converts wall-clock frame delivery into design-tick `dt` values and
//! keeps a rolling FPS average. The clock is fed `now_ms` by its caller
//! so the same code serves `Instant`-based native loops and
//! `performance.now()`-based browser pumps.

use crate::consts::*;

/// Timing facts for one step
#[derive(Debug, Clone, Copy)]
pub struct FrameTiming {
    /// Wall-clock timestamp this frame started at
    pub now_ms: f64,
    /// Milliseconds since the previous frame
    pub elapsed_ms: f64,
    /// Elapsed time in design ticks
    pub dt: f32,
    /// Rolling average frames per second
    pub fps: f64,
}

/// Wall-clock to simulation-time bookkeeping
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    fps: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_ms: None,
            fps: 0.0,
        }
    }

    /// Milliseconds still to sleep before the target frame interval elapses
    ///
    /// Owned-loop mode only; an externally pumped shell never sleeps.
    pub fn throttle_ms(&self, now_ms: f64) -> f64 {
        match self.last_ms {
            Some(last) => (REFRESH_MS - (now_ms - last)).max(0.0),
            None => 0.0,
        }
    }

    /// Start a frame: measure elapsed wall time and convert it to ticks
    ///
    /// The very first frame is credited one design tick. The rolling
    /// average is weighted 10:1 toward history, so a single slow frame
    /// barely dents the readout.
    pub fn tick(&mut self, now_ms: f64) -> FrameTiming {
        let elapsed_ms = match self.last_ms {
            Some(last) => (now_ms - last).max(0.01),
            None => PHYSICS_TICK_MS,
        };
        self.last_ms = Some(now_ms);

        self.fps = (self.fps * 10.0 + 1000.0 / elapsed_ms) / 11.0;

        FrameTiming {
            now_ms,
            elapsed_ms,
            dt: (elapsed_ms / PHYSICS_TICK_MS) as f32,
            fps: self.fps,
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Owned-loop shell: throttle, measure, step, repeat until quit or error
///
/// Returns the process exit code. The externally-driven shell performs no
/// sleeping; a host that paces invocation calls [`crate::session::Session::run_step`]
/// itself and interprets the same [`crate::sim::StepResult`] values.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_blocking<P, A, S>(session: &mut crate::session::Session<P, A, S>) -> i32
where
    P: crate::platform::Presentation,
    A: crate::platform::AudioSink,
    S: crate::platform::ScoreStore,
{
    use crate::sim::StepResult;

    let start = std::time::Instant::now();
    let now_ms = move || start.elapsed().as_secs_f64() * 1000.0;

    let mut clock = FrameClock::new();
    loop {
        let wait = clock.throttle_ms(now_ms());
        if wait > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(wait / 1000.0));
        }

        // Re-measure after the sleep; the step sees real elapsed time
        let timing = clock.tick(now_ms());
        match session.run_step(&timing) {
            StepResult::Continue => {}
            StepResult::Restart => session.reset_round(),
            StepResult::Quit => return 0,
            StepResult::Error => {
                log::error!("presentation failure, shutting down");
                return 1;
            }
        }
    }
}
