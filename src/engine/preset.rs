use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Shape of the dark-phase fade from full-dark back to the steady blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FadeCurve {
    #[default]
    Linear,
    Exponential,
}

/// Slow exponential drift of both channel frequencies plus sinusoidal
/// modulation of the cutoffs, driven by the engine's elapsed clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DarkDrift {
    #[serde(default = "DarkDrift::default_drift_rate")]
    pub drift_rate: f32,
    #[serde(default = "DarkDrift::default_depth")]
    pub depth: f32,
}

impl DarkDrift {
    fn default_drift_rate() -> f32 {
        0.02
    }
    fn default_depth() -> f32 {
        0.3
    }
}

impl Default for DarkDrift {
    fn default() -> Self {
        Self {
            drift_rate: Self::default_drift_rate(),
            depth: Self::default_depth(),
        }
    }
}

/// Time-bounded window after session start that biases the blend toward the
/// dark channel, fading out over `duration_sec`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DarkPhase {
    #[serde(default = "DarkPhase::default_duration_sec")]
    pub duration_sec: f32,
    #[serde(default)]
    pub curve: FadeCurve,
    #[serde(default = "DarkPhase::default_intensity")]
    pub intensity: f32,
}

impl DarkPhase {
    fn default_duration_sec() -> f32 {
        12.0
    }
    fn default_intensity() -> f32 {
        0.6
    }
}

impl Default for DarkPhase {
    fn default() -> Self {
        Self {
            duration_sec: Self::default_duration_sec(),
            curve: FadeCurve::default(),
            intensity: Self::default_intensity(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polarity {
    #[serde(default = "Polarity::default_blend_enabled")]
    pub blend_enabled: bool,
    /// Base dark-channel weight before biosignal bias, [0, 1].
    #[serde(default = "Polarity::default_dark_weight")]
    pub dark_weight: f32,
    /// When set, the biosignal bias is pinned to 1.
    #[serde(default)]
    pub shadow_mode: bool,
    #[serde(default)]
    pub drift: Option<DarkDrift>,
    #[serde(default)]
    pub dark_phase: DarkPhase,
}

impl Polarity {
    fn default_blend_enabled() -> bool {
        true
    }
    fn default_dark_weight() -> f32 {
        0.35
    }
}

impl Default for Polarity {
    fn default() -> Self {
        Self {
            blend_enabled: Self::default_blend_enabled(),
            dark_weight: Self::default_dark_weight(),
            shadow_mode: false,
            drift: None,
            dark_phase: DarkPhase::default(),
        }
    }
}

/// Per-channel sensitivity coefficients: how strongly each centered frame
/// scalar bends frequency, amplitude, and filter cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensitivity {
    /// phase, phi-phase, curvature, temporal.
    #[serde(default = "Sensitivity::default_freq")]
    pub freq: [f32; 4],
    /// curvature, |angular rate|.
    #[serde(default = "Sensitivity::default_amp")]
    pub amp: [f32; 2],
    /// phase, curvature.
    #[serde(default = "Sensitivity::default_cutoff")]
    pub cutoff: [f32; 2],
}

impl Sensitivity {
    fn default_freq() -> [f32; 4] {
        [0.45, 0.3, 0.6, 0.2]
    }
    fn default_amp() -> [f32; 2] {
        [0.5, 0.08]
    }
    fn default_cutoff() -> [f32; 2] {
        [0.9, 0.7]
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            freq: Self::default_freq(),
            amp: Self::default_amp(),
            cutoff: Self::default_cutoff(),
        }
    }
}

/// Immutable-per-session configuration bundle for the blend engine. Replaced
/// wholesale via `ShadowEngine::set_preset`, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Preset {
    #[serde(default)]
    pub polarity: Polarity,
    #[serde(default)]
    pub sensitivity: Sensitivity,
}

impl Preset {
    /// Parse a preset TOML, falling back to the default preset when the file
    /// is missing or malformed.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        match fs::read_to_string(path_obj) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(preset) => preset,
                Err(err) => {
                    warn!("failed to parse preset {path}: {err}; using default preset");
                    Self::default()
                }
            },
            Err(err) => {
                warn!("failed to read preset {path}: {err}; using default preset");
                Self::default()
            }
        }
    }
}
