// Entry point: runs one headless blend session at the configured control rate.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use umbral::cli::Args;
use umbral::config::AppConfig;
use umbral::engine::preset::Preset;
use umbral::session::{SessionDriver, write_trace_csv};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let args = Args::parse();
    let mut cfg = AppConfig::load_or_default(&args.config);
    if let Some(duration) = args.duration {
        cfg.session.duration_sec = duration;
    }
    if let Some(seed) = args.seed {
        cfg.session.seed = seed;
    }
    if let Some(trace) = args.trace {
        cfg.session.trace_path = Some(trace);
    }
    if let Some(preset) = args.preset {
        cfg.preset_path = Some(preset);
    }

    let preset = match cfg.preset_path.as_deref() {
        Some(path) => Preset::load_or_default(path),
        None => Preset::default(),
    };

    let ticks = (cfg.session.duration_sec.max(0.0) * cfg.session.control_rate_hz).ceil() as u64;
    let mut driver = SessionDriver::new(&cfg, preset);
    let summary = driver.run(ticks);

    if let Some(path) = cfg.session.trace_path.as_deref() {
        match write_trace_csv(path, driver.trace()) {
            Ok(()) => info!(path, rows = driver.trace().len(), "trace written"),
            Err(err) => error!(path, "failed to write trace: {err}"),
        }
    }

    info!(
        ticks = summary.ticks,
        elapsed_sec = summary.elapsed_sec,
        mean_amp = summary.mean_amp,
        freq_min_hz = summary.min_freq_hz,
        freq_max_hz = summary.max_freq_hz,
        dark_phase_ticks = summary.dark_phase_ticks,
        "session complete"
    );
}
