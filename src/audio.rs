//! Audio using the Web Audio API
//!
//! Procedurally generated sounds - no audio files to ship.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A lane locked on the guess
    LaneHit,
    /// Spin ended with no new hits
    NoHits,
    /// Single roller guessed right
    Win,
}

/// Audio manager for the draw pages
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    /// Running spin whir (oscillator, gain)
    spin_loop: Option<(OscillatorNode, GainNode)>,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
            spin_loop: None,
        }
    }

    /// Resume a suspended context (browsers require a user gesture)
    fn resume(&self, ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Start the looping spin sound (restarts it if already running)
    pub fn start_spin(&mut self) {
        self.stop_spin();
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume(ctx);

        let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(self.volume * 0.08, t).ok();
        // Slow wobble so the whir reads as movement
        for step in 0..200 {
            let at = t + step as f64 * 0.08;
            let freq = if step % 2 == 0 { 90.0 } else { 120.0 };
            osc.frequency().set_value_at_time(freq, at).ok();
        }
        osc.start().ok();
        self.spin_loop = Some((osc, gain));
    }

    /// Fade out and stop the spin sound
    pub fn stop_spin(&mut self) {
        let Some((osc, gain)) = self.spin_loop.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        gain.gain().cancel_scheduled_values(t).ok();
        gain.gain().set_value_at_time(self.volume * 0.08, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.08)
            .ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume(ctx);

        match effect {
            SoundEffect::LaneHit => self.play_arpeggio(ctx, &[660.0, 880.0], 0.09),
            SoundEffect::NoHits => self.play_thud(ctx),
            SoundEffect::Win => {
                self.play_arpeggio(ctx, &[500.0, 600.0, 700.0, 800.0, 1000.0], 0.08)
            }
        }
    }

    /// Rising notes, `spacing` seconds apart
    fn play_arpeggio(&self, ctx: &AudioContext, freqs: &[f32], spacing: f64) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * spacing;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(self.volume * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Low descending thump
    fn play_thud(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }
}
