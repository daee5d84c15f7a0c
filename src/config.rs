use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::frame::FrameFieldConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Engine step rate, ticks per second.
    #[serde(default = "SessionConfig::default_control_rate_hz")]
    pub control_rate_hz: f32,
    #[serde(default = "SessionConfig::default_duration_sec")]
    pub duration_sec: f32,
    /// Simulator seed; a fixed seed reproduces a session exactly.
    #[serde(default = "SessionConfig::default_seed")]
    pub seed: u64,
    /// Physiology refresh period, seconds.
    #[serde(default = "SessionConfig::default_bio_tick_sec")]
    pub bio_tick_sec: f32,
    /// Write a per-tick CSV trace here when set.
    #[serde(default)]
    pub trace_path: Option<String>,
}

impl SessionConfig {
    fn default_control_rate_hz() -> f32 {
        60.0
    }
    fn default_duration_sec() -> f32 {
        120.0
    }
    fn default_seed() -> u64 {
        7
    }
    fn default_bio_tick_sec() -> f32 {
        1.0
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            control_rate_hz: Self::default_control_rate_hz(),
            duration_sec: Self::default_duration_sec(),
            seed: Self::default_seed(),
            bio_tick_sec: Self::default_bio_tick_sec(),
            trace_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub frame: FrameFieldConfig,
    /// Preset TOML path; the built-in default preset is used when unset.
    #[serde(default)]
    pub preset_path: Option<String>,
}

impl AppConfig {
    fn round_f32(x: f32) -> f32 {
        (x * 1_000_000.0).round() / 1_000_000.0
    }

    fn format_f32_compact(x: f32) -> String {
        let mut s = format!("{:.6}", x);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        if s.is_empty() { "0".to_string() } else { s }
    }

    fn rounded(mut self) -> Self {
        self.session.control_rate_hz = Self::round_f32(self.session.control_rate_hz);
        self.session.duration_sec = Self::round_f32(self.session.duration_sec);
        self.session.bio_tick_sec = Self::round_f32(self.session.bio_tick_sec);
        self.frame.rotation_hz = Self::round_f32(self.frame.rotation_hz);
        self.frame.breath_period_sec = Self::round_f32(self.frame.breath_period_sec);
        self.frame.curvature_hz = Self::round_f32(self.frame.curvature_hz);
        self.frame.elevation_span_rad = Self::round_f32(self.frame.elevation_span_rad);
        self
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write commented defaults and return them.
        let default_cfg = Self::default().rounded();
        if let Ok(text) = toml::to_string_pretty(&default_cfg) {
            let mut commented = String::new();
            for line in text.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    commented.push('\n');
                } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                    commented.push_str(line);
                    commented.push('\n');
                } else {
                    let mut out_line = line.to_string();
                    if let Some((lhs, rhs)) = line.split_once('=') {
                        let rhs_trim = rhs.trim();
                        let has_decimal = rhs_trim.contains('.');
                        if (has_decimal || rhs_trim.contains('e') || rhs_trim.contains('E'))
                            && !rhs_trim.contains('"')
                            && rhs_trim != "true"
                            && rhs_trim != "false"
                        {
                            if let Ok(val) = rhs_trim.parse::<f32>() {
                                let mut formatted = Self::format_f32_compact(val);
                                if has_decimal && !formatted.contains('.') {
                                    formatted.push_str(".0");
                                }
                                out_line = format!("{} = {}", lhs.trim(), formatted);
                            }
                        }
                    }
                    commented.push_str("# ");
                    commented.push_str(&out_line);
                    commented.push('\n');
                }
            }
            if let Err(err) = fs::write(path_obj, commented) {
                eprintln!("Failed to write default config to {path}: {err}");
            }
        } else {
            eprintln!("Failed to serialize default config; continuing with defaults");
        }
        default_cfg
    }
}
