use std::f32::consts::TAU;

use tracing::debug;

use crate::bio::signals::BioSignals;
use crate::core::frame::CoreFrame;
use crate::core::util::{clamp01, sanitize01, sanitize_or};
use crate::engine::channels::{dark_channel, light_channel};
use crate::engine::preset::{FadeCurve, Preset};

const DEFAULT_FREQ_HZ: f32 = 220.0;
const DEFAULT_CUTOFF_HZ: f32 = 800.0;
const DEFAULT_DARK_WEIGHT: f32 = 0.7;

/// How strongly the biosignal bias can push the dark weight above its base.
const BIAS_GAIN: f32 = 0.4;
/// Depth scale of the drift wobble on the channel cutoffs.
const DRIFT_WOBBLE: f32 = 0.5;

const AMP_CEIL: f32 = 0.9;
const CUTOFF_FLOOR_HZ: f32 = 40.0;
const CUTOFF_CEIL_HZ: f32 = 16_000.0;

/// Per-channel contribution to the final mix. `light` is always derived as
/// `1 - dark` after clamping, so the pair sums to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub dark: f32,
    pub light: f32,
}

impl BlendWeights {
    fn from_dark(dark: f32) -> Self {
        let dark = clamp01(dark);
        Self {
            dark,
            light: 1.0 - dark,
        }
    }
}

/// The blended result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outputs {
    pub freq_hz: f32,
    pub amp: f32,
    pub cutoff_hz: f32,
    pub azimuth_rad: f32,
    pub elevation_rad: f32,
    pub dark_phase_active: bool,
    pub weights: BlendWeights,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            freq_hz: DEFAULT_FREQ_HZ,
            amp: 0.0,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            azimuth_rad: 0.0,
            elevation_rad: 0.0,
            dark_phase_active: false,
            weights: BlendWeights::from_dark(DEFAULT_DARK_WEIGHT),
        }
    }
}

/// Defensive copy of the engine's internal state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSnapshot {
    pub elapsed_sec: f32,
    pub dark_phase_active: bool,
    pub weights: BlendWeights,
    pub last: Outputs,
}

/// Control-rate blend engine. Holds only the active preset, an accumulated
/// elapsed clock, and the last tick's outputs; `step` is pure arithmetic over
/// its inputs plus that clock. Single-threaded by construction.
pub struct ShadowEngine {
    preset: Preset,
    elapsed_sec: f32,
    last: Outputs,
}

impl ShadowEngine {
    pub fn new(preset: Preset) -> Self {
        Self {
            preset,
            elapsed_sec: 0.0,
            last: Outputs::default(),
        }
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    /// Swap the active preset. Takes effect on the next `step`; the elapsed
    /// clock keeps running.
    pub fn set_preset(&mut self, preset: Preset) {
        self.preset = preset;
    }

    /// Advance the clock by `dt` seconds and blend one tick. Negative or
    /// non-finite `dt` leaves the clock untouched; non-finite frame fields
    /// are sanitized instead of propagating through the mix.
    pub fn step(&mut self, dt: f32, frame: &CoreFrame, bio: BioSignals) -> Outputs {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_sec += dt;
        }
        let t = self.elapsed_sec;
        let frame = frame.sanitized();
        let polarity = self.preset.polarity;

        // Arousal pushes the blend toward the dark channel: low calm proxy and
        // a high band ratio both raise the bias. Missing readings are neutral.
        let bias = if polarity.shadow_mode {
            1.0
        } else {
            let calm = sanitize01(bio.hrv.unwrap_or(0.5));
            let band_ratio = sanitize01(bio.eeg_band_ratio.unwrap_or(0.5));
            0.5 * ((1.0 - calm) + band_ratio)
        };

        let base = clamp01(polarity.dark_weight);
        let enabled_base = if polarity.blend_enabled { base } else { 0.0 };
        let mut dark_w = clamp01(enabled_base + BIAS_GAIN * bias * (1.0 - base));

        let mut light = light_channel(&frame, &self.preset.sensitivity);
        let mut dark = dark_channel(&frame, &light, polarity.dark_phase.intensity);

        if let Some(drift) = polarity.drift {
            let growth = (drift.depth * drift.drift_rate * t).exp();
            light.freq_hz *= growth;
            dark.freq_hz *= growth;
            let wobble = TAU * drift.drift_rate * t;
            light.cutoff_hz *= 1.0 + DRIFT_WOBBLE * drift.depth * wobble.sin();
            dark.cutoff_hz *= 1.0 + DRIFT_WOBBLE * drift.depth * wobble.cos();
        }

        let gate = polarity.dark_phase;
        let dark_phase_active = gate.duration_sec > 0.0 && t < gate.duration_sec;
        if dark_phase_active {
            let mut fade = clamp01(t / gate.duration_sec);
            if gate.curve == FadeCurve::Exponential {
                fade *= fade;
            }
            dark_w = clamp01(1.0 - fade + dark_w * fade);
            dark.amp *= 1.0 + gate.intensity * (1.0 - fade);
        }
        if dark_phase_active != self.last.dark_phase_active {
            debug!(active = dark_phase_active, elapsed_sec = t, "dark phase boundary");
        }

        let weights = BlendWeights::from_dark(dark_w);
        let freq_hz = sanitize_or(
            weights.light * light.freq_hz + weights.dark * dark.freq_hz,
            DEFAULT_FREQ_HZ,
        );
        let amp = (weights.light * light.amp + weights.dark * dark.amp).clamp(0.0, AMP_CEIL);
        let cutoff_hz = (weights.light * light.cutoff_hz + weights.dark * dark.cutoff_hz)
            .clamp(CUTOFF_FLOOR_HZ, CUTOFF_CEIL_HZ);

        let out = Outputs {
            freq_hz,
            amp,
            cutoff_hz,
            azimuth_rad: frame.azimuth_rad,
            elevation_rad: frame.elevation_rad,
            dark_phase_active,
            weights,
        };
        self.last = out;
        out
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            elapsed_sec: self.elapsed_sec,
            dark_phase_active: self.last.dark_phase_active,
            weights: self.last.weights,
            last: self.last,
        }
    }
}
