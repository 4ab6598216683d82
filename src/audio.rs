//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed. A
//! two-oscillator pad stands in for background music; [`AudioSink`] ages
//! let the session gate rapid jetpack retriggers.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{AudioSink, EffectAges, SoundEffect};
use crate::settings::Settings;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    music: Option<GainNode>,
    music_paused: bool,
    ages: EffectAges,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context; the game plays on silently
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music: None,
            music_paused: false,
            ages: EffectAges::default(),
        }
    }

    /// Start the ambient pad; safe to call repeatedly
    pub fn start_music(&mut self) {
        if self.music.is_some() || self.music_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        let Some(gain) = ctx.create_gain().ok() else {
            return;
        };
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        gain.gain().set_value(self.music_volume * 0.15);

        // Two slightly detuned low sines make a slow-beating drone
        for freq in [55.0_f32, 55.6] {
            if let Ok(osc) = ctx.create_oscillator() {
                osc.set_type(OscillatorType::Sine);
                osc.frequency().set_value(freq);
                if osc.connect_with_audio_node(&gain).is_ok() {
                    let _ = osc.start();
                }
            }
        }
        self.music = Some(gain);
    }

    /// Resume audio context (required after user gesture)
    fn resume_if_suspended(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Oscillator wired through its own gain envelope to the output
    fn voice(
        &self,
        ctx: &AudioContext,
        freq: f32,
        shape: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(shape);
        osc.frequency().set_value(freq);

        let gain = ctx.create_gain().ok()?;
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some((osc, gain))
    }

    // === Sound generators ===

    /// Jetpack - rushing upward whoosh
    fn play_jetpack(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let Some((osc, gain)) = self.voice(ctx, 120.0, OscillatorType::Sawtooth) else {
            return;
        };

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        // Sweep up through two octaves as the thrust builds
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.3)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Basic star pickup - short rising ding
    fn play_star_basic(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let Some((osc, gain)) = self.voice(ctx, 620.0, OscillatorType::Sine) else {
            return;
        };

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.14)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(930.0, t + 0.1)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
    }

    /// Moving star pickup - bright three-note sparkle over the basic chime
    fn play_star_moving(&self, ctx: &AudioContext, vol: f32) {
        let base = ctx.current_time();
        for (i, freq) in [830.0_f32, 1040.0, 1320.0].into_iter().enumerate() {
            let t = base + i as f64 * 0.05;
            if let Some((osc, gain)) = self.voice(ctx, freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(vol * 0.22, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }
    }

    /// Game over - one long falling groan with a low thump underneath
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        if let Some((osc, gain)) = self.voice(ctx, 440.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.9)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.85)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 1.0).ok();
        }
        if let Some((osc, gain)) = self.voice(ctx, 70.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.3, t + 0.1).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.start_with_when(t + 0.1).ok();
            osc.stop_with_when(t + 0.55).ok();
        }
    }

    /// New high score - major-triad fanfare climbing to the octave
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        let base = ctx.current_time();
        for (i, freq) in [523.0_f32, 659.0, 784.0, 1046.0].into_iter().enumerate() {
            let t = base + i as f64 * 0.09;
            if let Some((osc, gain)) = self.voice(ctx, freq, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.18, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.28)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.32).ok();
            }
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect, now_ms: f64) -> bool {
        self.ages.record(effect, now_ms);

        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return false;
        }
        let Some(ctx) = self.ctx.clone() else {
            return false;
        };

        self.resume_if_suspended();
        // First user-triggered sound is also our cue to start the pad
        self.start_music();

        match effect {
            SoundEffect::Jetpack => self.play_jetpack(&ctx, vol),
            SoundEffect::StarBasic => self.play_star_basic(&ctx, vol),
            SoundEffect::StarMoving => self.play_star_moving(&ctx, vol),
            SoundEffect::GameOver => self.play_game_over(&ctx, vol),
            SoundEffect::HighScore => self.play_high_score(&ctx, vol),
        }
        true
    }

    fn ms_since(&self, effect: SoundEffect, now_ms: f64) -> f64 {
        self.ages.ms_since(effect, now_ms)
    }

    fn toggle_music(&mut self) -> bool {
        self.music_paused = !self.music_paused;
        if let Some(gain) = &self.music {
            let level = if self.music_paused {
                0.0
            } else {
                self.music_volume * 0.15
            };
            gain.gain().set_value(level);
        }
        self.music_paused
    }
}
