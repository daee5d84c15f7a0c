use std::f32::consts::TAU;

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::bio::signals::BioSignals;
use crate::core::ticker::Ticker;
use crate::core::util::clamp01;

/// Keeps the band ratio defined when both bands read zero.
pub const BAND_RATIO_EPSILON: f32 = 1e-6;

const DEFAULT_TICK_SEC: f32 = 1.0;

/// Simulated HRV range (RMSSD-like, ms) mapped onto the [0, 1] calm proxy.
const HRV_MIN_MS: f32 = 20.0;
const HRV_MAX_MS: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPowers {
    pub delta: f32,
    pub theta: f32,
    pub alpha: f32,
    pub beta: f32,
}

/// Full simulated physiological snapshot, refreshed once per tick while the
/// session runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BioState {
    pub heart_rate_bpm: f32,
    pub hrv_ms: f32,
    pub breathing_rate_bpm: f32,
    pub skin_conductance_us: f32,
    pub brainwaves: BandPowers,
    pub muscle_tension: f32,
    pub body_temp_c: f32,
}

impl Default for BioState {
    fn default() -> Self {
        Self {
            heart_rate_bpm: 64.0,
            hrv_ms: 52.0,
            breathing_rate_bpm: 7.0,
            skin_conductance_us: 4.2,
            brainwaves: BandPowers {
                delta: 0.55,
                theta: 0.4,
                alpha: 0.5,
                beta: 0.3,
            },
            muscle_tension: 0.3,
            body_temp_c: 36.7,
        }
    }
}

/// Plausible smoothly varying physiology without sensor hardware: each field
/// follows an independent sine of a distinct period around its baseline plus
/// bounded seeded jitter. Two states, stopped and running; `advance` refreshes
/// the snapshot once per tick period while running.
pub struct BioSimulator {
    running: bool,
    ticker: Ticker,
    rng: SmallRng,
    elapsed_sec: f32,
    state: BioState,
}

impl BioSimulator {
    pub fn new(seed: u64) -> Self {
        Self::with_tick(seed, DEFAULT_TICK_SEC)
    }

    pub fn with_tick(seed: u64, tick_sec: f32) -> Self {
        Self {
            running: false,
            ticker: Ticker::new(tick_sec),
            rng: SmallRng::seed_from_u64(seed),
            elapsed_sec: 0.0,
            state: BioState::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Idempotent: starting a running session is a no-op.
    pub fn start_session(&mut self) {
        self.running = true;
    }

    /// Idempotent: stopping a stopped session is a no-op. A later restart
    /// resumes from the current snapshot; the tick accumulator is cleared so
    /// the first refresh lands a full period after the restart.
    pub fn stop_session(&mut self) {
        if self.running {
            self.ticker.reset();
        }
        self.running = false;
    }

    /// Feed elapsed wall/loop time. No-op while stopped.
    pub fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        let fired = self.ticker.advance(dt);
        for _ in 0..fired {
            self.elapsed_sec += self.ticker.period_sec();
            self.refresh();
        }
    }

    /// Replace the simulated snapshot wholesale, e.g. to feed readings from a
    /// real sensor rig through the same accessors.
    pub fn inject_state(&mut self, state: BioState) {
        self.state = state;
    }

    pub fn full_state(&self) -> BioState {
        self.state
    }

    /// Derive the normalized proxy pair from the current snapshot. The band
    /// ratio is `alpha / (alpha + beta + eps)`: zero (not NaN) when both
    /// bands read zero.
    pub fn bio_signals(&self) -> BioSignals {
        let bands = self.state.brainwaves;
        let alpha = bands.alpha.max(0.0);
        let beta = bands.beta.max(0.0);
        let ratio = alpha / (alpha + beta + BAND_RATIO_EPSILON);

        let calm = (self.state.hrv_ms - HRV_MIN_MS) / (HRV_MAX_MS - HRV_MIN_MS);

        BioSignals {
            hrv: Some(clamp01(calm)),
            eeg_band_ratio: Some(clamp01(ratio)),
        }
    }

    fn refresh(&mut self) {
        let t = self.elapsed_sec;
        let rng = &mut self.rng;
        let state = &mut self.state;

        state.heart_rate_bpm = osc(t, 64.0, 4.0, 23.0) + jitter(rng, 0.8);
        state.hrv_ms = (osc(t, 52.0, 14.0, 37.0) + jitter(rng, 2.0)).clamp(HRV_MIN_MS, HRV_MAX_MS);
        state.breathing_rate_bpm = (osc(t, 7.0, 1.5, 53.0) + jitter(rng, 0.3)).max(3.0);
        state.skin_conductance_us = (osc(t, 4.2, 1.1, 41.0) + jitter(rng, 0.2)).max(0.1);
        state.brainwaves = BandPowers {
            delta: clamp01(osc(t, 0.55, 0.2, 61.0) + jitter(rng, 0.04)),
            theta: clamp01(osc(t, 0.4, 0.18, 47.0) + jitter(rng, 0.04)),
            alpha: clamp01(osc(t, 0.5, 0.25, 31.0) + jitter(rng, 0.05)),
            beta: clamp01(osc(t, 0.3, 0.15, 19.0) + jitter(rng, 0.05)),
        };
        state.muscle_tension = clamp01(osc(t, 0.3, 0.12, 29.0) + jitter(rng, 0.03));
        state.body_temp_c = osc(t, 36.7, 0.15, 101.0) + jitter(rng, 0.02);
    }
}

fn osc(t: f32, base: f32, amp: f32, period_sec: f32) -> f32 {
    base + amp * (TAU * t / period_sec).sin()
}

fn jitter(rng: &mut SmallRng, bound: f32) -> f32 {
    rng.random_range(-bound..=bound)
}
