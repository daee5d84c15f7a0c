use rand::{Rng, SeedableRng, rngs::SmallRng};

use umbral::bio::BioSignals;
use umbral::core::frame::CoreFrame;
use umbral::engine::ShadowEngine;
use umbral::engine::preset::{DarkDrift, DarkPhase, FadeCurve, Polarity, Preset};

fn random_preset(rng: &mut SmallRng) -> Preset {
    Preset {
        polarity: Polarity {
            blend_enabled: rng.random_bool(0.8),
            dark_weight: rng.random_range(0.0..=1.0),
            shadow_mode: rng.random_bool(0.2),
            drift: if rng.random_bool(0.5) {
                Some(DarkDrift {
                    drift_rate: rng.random_range(0.0..0.2),
                    depth: rng.random_range(0.0..1.0),
                })
            } else {
                None
            },
            dark_phase: DarkPhase {
                duration_sec: rng.random_range(0.0..30.0),
                curve: if rng.random_bool(0.5) {
                    FadeCurve::Linear
                } else {
                    FadeCurve::Exponential
                },
                intensity: rng.random_range(0.0..=1.0),
            },
        },
        sensitivity: Default::default(),
    }
}

fn random_frame(rng: &mut SmallRng) -> CoreFrame {
    CoreFrame {
        phase01: rng.random_range(0.0..1.0),
        phi_phase01: rng.random_range(0.0..1.0),
        curvature01: rng.random_range(0.0..=1.0),
        temporal01: rng.random_range(0.0..=1.0),
        angular_rate: rng.random_range(-10.0..10.0),
        azimuth_rad: rng.random_range(-3.2..3.2),
        elevation_rad: rng.random_range(-1.0..1.0),
        base_freq_hz: rng.random_range(30.0..2000.0),
        base_amp: rng.random_range(0.0..=1.0),
        base_cutoff_hz: rng.random_range(100.0..8000.0),
    }
}

fn random_bio(rng: &mut SmallRng) -> BioSignals {
    BioSignals {
        hrv: if rng.random_bool(0.9) {
            Some(rng.random_range(0.0..=1.0))
        } else {
            None
        },
        eeg_band_ratio: if rng.random_bool(0.9) {
            Some(rng.random_range(0.0..=1.0))
        } else {
            None
        },
    }
}

#[test]
fn outputs_stay_clamped_for_randomized_valid_inputs() {
    let mut rng = SmallRng::seed_from_u64(0xDA7A);
    for batch in 0..100 {
        let mut engine = ShadowEngine::new(random_preset(&mut rng));
        for tick in 0..100 {
            let dt = rng.random_range(0.0..0.1);
            let frame = random_frame(&mut rng);
            let out = engine.step(dt, &frame, random_bio(&mut rng));

            assert!(
                out.freq_hz.is_finite() && out.freq_hz > 0.0,
                "batch {batch} tick {tick}: freq {}",
                out.freq_hz
            );
            assert!(
                (0.0..=0.9).contains(&out.amp),
                "batch {batch} tick {tick}: amp {}",
                out.amp
            );
            assert!(
                (40.0..=16_000.0).contains(&out.cutoff_hz),
                "batch {batch} tick {tick}: cutoff {}",
                out.cutoff_hz
            );
            assert!((0.0..=1.0).contains(&out.weights.dark));
            assert!((0.0..=1.0).contains(&out.weights.light));
            assert!(
                (out.weights.dark + out.weights.light - 1.0).abs() < 1e-9,
                "batch {batch} tick {tick}: weights {:?}",
                out.weights
            );
        }
    }
}
