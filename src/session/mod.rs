//! Headless session loop: steps the frame field, the simulator, and the
//! engine at the configured control rate and collects a summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::bio::simulator::BioSimulator;
use crate::config::AppConfig;
use crate::core::frame::FrameField;
use crate::engine::preset::Preset;
use crate::engine::{Outputs, ShadowEngine};

/// One tick of trace output, flattened for CSV.
#[derive(Debug, Clone, Copy)]
pub struct TraceRow {
    pub t_sec: f32,
    pub freq_hz: f32,
    pub amp: f32,
    pub cutoff_hz: f32,
    pub azimuth_rad: f32,
    pub elevation_rad: f32,
    pub dark_weight: f32,
    pub light_weight: f32,
    pub dark_phase_active: bool,
}

impl TraceRow {
    fn from_outputs(t_sec: f32, out: &Outputs) -> Self {
        Self {
            t_sec,
            freq_hz: out.freq_hz,
            amp: out.amp,
            cutoff_hz: out.cutoff_hz,
            azimuth_rad: out.azimuth_rad,
            elevation_rad: out.elevation_rad,
            dark_weight: out.weights.dark,
            light_weight: out.weights.light,
            dark_phase_active: out.dark_phase_active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub elapsed_sec: f32,
    pub mean_amp: f32,
    pub min_freq_hz: f32,
    pub max_freq_hz: f32,
    pub dark_phase_ticks: u64,
}

pub struct SessionDriver {
    engine: ShadowEngine,
    simulator: BioSimulator,
    field: FrameField,
    dt: f32,
    trace: Vec<TraceRow>,
    keep_trace: bool,
}

impl SessionDriver {
    pub fn new(cfg: &AppConfig, preset: Preset) -> Self {
        let rate = if cfg.session.control_rate_hz.is_finite() && cfg.session.control_rate_hz > 0.0 {
            cfg.session.control_rate_hz
        } else {
            60.0
        };
        Self {
            engine: ShadowEngine::new(preset),
            simulator: BioSimulator::with_tick(cfg.session.seed, cfg.session.bio_tick_sec),
            field: FrameField::new(cfg.frame.clone()),
            dt: 1.0 / rate,
            trace: Vec::new(),
            keep_trace: cfg.session.trace_path.is_some(),
        }
    }

    pub fn engine(&self) -> &ShadowEngine {
        &self.engine
    }

    pub fn trace(&self) -> &[TraceRow] {
        &self.trace
    }

    pub fn run(&mut self, ticks: u64) -> SessionSummary {
        info!(ticks, dt_sec = self.dt, "session start");
        self.simulator.start_session();
        if self.keep_trace {
            self.trace.reserve(ticks as usize);
        }

        let mut amp_sum = 0.0f64;
        let mut min_freq = f32::MAX;
        let mut max_freq = f32::MIN;
        let mut dark_phase_ticks = 0u64;

        for tick in 0..ticks {
            self.simulator.advance(self.dt);
            let frame = self.field.advance(self.dt);
            let out = self
                .engine
                .step(self.dt, &frame, self.simulator.bio_signals());

            amp_sum += out.amp as f64;
            min_freq = min_freq.min(out.freq_hz);
            max_freq = max_freq.max(out.freq_hz);
            if out.dark_phase_active {
                dark_phase_ticks += 1;
            }
            if self.keep_trace {
                self.trace
                    .push(TraceRow::from_outputs(self.field.elapsed_sec(), &out));
            }
            if tick % 600 == 0 {
                debug!(
                    tick,
                    freq_hz = out.freq_hz,
                    amp = out.amp,
                    dark_w = out.weights.dark,
                    "tick block"
                );
            }
        }

        self.simulator.stop_session();
        let snapshot = self.engine.snapshot();
        let summary = SessionSummary {
            ticks,
            elapsed_sec: snapshot.elapsed_sec,
            mean_amp: if ticks > 0 {
                (amp_sum / ticks as f64) as f32
            } else {
                0.0
            },
            min_freq_hz: if ticks > 0 { min_freq } else { 0.0 },
            max_freq_hz: if ticks > 0 { max_freq } else { 0.0 },
            dark_phase_ticks,
        };
        info!(
            elapsed_sec = summary.elapsed_sec,
            mean_amp = summary.mean_amp,
            dark_phase_ticks = summary.dark_phase_ticks,
            "session end"
        );
        summary
    }
}

pub fn write_trace_csv(path: &str, rows: &[TraceRow]) -> std::io::Result<()> {
    let file = File::create(Path::new(path))?;
    let mut w = BufWriter::new(file);
    writeln!(
        w,
        "t_sec,freq_hz,amp,cutoff_hz,azimuth_rad,elevation_rad,dark_w,light_w,dark_phase"
    )?;
    for row in rows {
        writeln!(
            w,
            "{:.4},{:.3},{:.4},{:.2},{:.4},{:.4},{:.4},{:.4},{}",
            row.t_sec,
            row.freq_hz,
            row.amp,
            row.cutoff_hz,
            row.azimuth_rad,
            row.elevation_rad,
            row.dark_weight,
            row.light_weight,
            u8::from(row.dark_phase_active),
        )?;
    }
    w.flush()
}
