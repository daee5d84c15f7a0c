use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::util::{sanitize01, sanitize_or, wrap01};

const PHI: f32 = 1.618_034;

const FALLBACK_FREQ_HZ: f32 = 220.0;
const FALLBACK_CUTOFF_HZ: f32 = 800.0;

/// One control tick's normalized geometric/temporal state. Produced fresh
/// each tick by the frame driver; the engine never mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreFrame {
    /// Angular rotation phase in [0, 1).
    pub phase01: f32,
    /// Golden-ratio companion phase in [0, 1).
    pub phi_phase01: f32,
    /// Curvature scalar in [0, 1].
    pub curvature01: f32,
    /// Breath/time scalar in [0, 1].
    pub temporal01: f32,
    /// Signed angular rate, rad/s.
    pub angular_rate: f32,
    pub azimuth_rad: f32,
    pub elevation_rad: f32,
    pub base_freq_hz: f32,
    pub base_amp: f32,
    pub base_cutoff_hz: f32,
}

impl CoreFrame {
    /// Copy with every field forced into its valid domain. Non-finite scalars
    /// collapse to safe values instead of propagating through the blend.
    pub fn sanitized(&self) -> Self {
        let base_freq_hz = sanitize_or(self.base_freq_hz, FALLBACK_FREQ_HZ);
        let base_cutoff_hz = sanitize_or(self.base_cutoff_hz, FALLBACK_CUTOFF_HZ);
        Self {
            phase01: sanitize01(self.phase01),
            phi_phase01: sanitize01(self.phi_phase01),
            curvature01: sanitize01(self.curvature01),
            temporal01: sanitize01(self.temporal01),
            angular_rate: sanitize_or(self.angular_rate, 0.0),
            azimuth_rad: sanitize_or(self.azimuth_rad, 0.0),
            elevation_rad: sanitize_or(self.elevation_rad, 0.0),
            base_freq_hz: if base_freq_hz > 0.0 {
                base_freq_hz
            } else {
                FALLBACK_FREQ_HZ
            },
            base_amp: sanitize01(self.base_amp),
            base_cutoff_hz: if base_cutoff_hz > 0.0 {
                base_cutoff_hz
            } else {
                FALLBACK_CUTOFF_HZ
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameFieldConfig {
    /// Rotation rate of the angular phase, Hz.
    #[serde(default = "FrameFieldConfig::default_rotation_hz")]
    pub rotation_hz: f32,
    /// Breath cycle length driving the temporal scalar, seconds.
    #[serde(default = "FrameFieldConfig::default_breath_period_sec")]
    pub breath_period_sec: f32,
    /// Oscillation rate of the curvature scalar, Hz.
    #[serde(default = "FrameFieldConfig::default_curvature_hz")]
    pub curvature_hz: f32,
    /// Elevation sweep half-range, radians.
    #[serde(default = "FrameFieldConfig::default_elevation_span_rad")]
    pub elevation_span_rad: f32,
    #[serde(default = "FrameFieldConfig::default_base_freq_hz")]
    pub base_freq_hz: f32,
    #[serde(default = "FrameFieldConfig::default_base_amp")]
    pub base_amp: f32,
    #[serde(default = "FrameFieldConfig::default_base_cutoff_hz")]
    pub base_cutoff_hz: f32,
}

impl FrameFieldConfig {
    fn default_rotation_hz() -> f32 {
        0.05
    }
    fn default_breath_period_sec() -> f32 {
        8.0
    }
    fn default_curvature_hz() -> f32 {
        0.085
    }
    fn default_elevation_span_rad() -> f32 {
        0.6
    }
    fn default_base_freq_hz() -> f32 {
        220.0
    }
    fn default_base_amp() -> f32 {
        0.5
    }
    fn default_base_cutoff_hz() -> f32 {
        1800.0
    }
}

impl Default for FrameFieldConfig {
    fn default() -> Self {
        Self {
            rotation_hz: Self::default_rotation_hz(),
            breath_period_sec: Self::default_breath_period_sec(),
            curvature_hz: Self::default_curvature_hz(),
            elevation_span_rad: Self::default_elevation_span_rad(),
            base_freq_hz: Self::default_base_freq_hz(),
            base_amp: Self::default_base_amp(),
            base_cutoff_hz: Self::default_base_cutoff_hz(),
        }
    }
}

/// Frame driver: owns an elapsed clock and derives a fresh `CoreFrame` each
/// tick from slow rotation, breath, and curvature oscillators.
#[derive(Debug, Clone)]
pub struct FrameField {
    cfg: FrameFieldConfig,
    elapsed_sec: f32,
}

impl FrameField {
    pub fn new(cfg: FrameFieldConfig) -> Self {
        Self {
            cfg,
            elapsed_sec: 0.0,
        }
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    pub fn advance(&mut self, dt: f32) -> CoreFrame {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_sec += dt;
        }
        let t = self.elapsed_sec;
        let cfg = &self.cfg;

        let phase01 = wrap01(t * cfg.rotation_hz);
        let phi_phase01 = wrap01(t * cfg.rotation_hz * PHI);
        let curvature01 = 0.5 + 0.5 * (TAU * cfg.curvature_hz * t).sin();
        let breath = cfg.breath_period_sec.max(1e-3);
        // Starts at 0 (exhaled) and peaks mid-cycle.
        let temporal01 = 0.5 - 0.5 * (TAU * t / breath).cos();

        CoreFrame {
            phase01,
            phi_phase01,
            curvature01,
            temporal01,
            angular_rate: TAU * cfg.rotation_hz,
            azimuth_rad: TAU * phase01,
            elevation_rad: cfg.elevation_span_rad * (TAU * t / (2.0 * breath)).sin(),
            base_freq_hz: cfg.base_freq_hz,
            base_amp: cfg.base_amp,
            base_cutoff_hz: cfg.base_cutoff_hz,
        }
    }
}
