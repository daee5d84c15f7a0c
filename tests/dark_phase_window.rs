use umbral::bio::BioSignals;
use umbral::core::frame::{FrameField, FrameFieldConfig};
use umbral::engine::ShadowEngine;
use umbral::engine::preset::{DarkPhase, FadeCurve, Polarity, Preset};

fn preset_with_gate(duration_sec: f32, curve: FadeCurve) -> Preset {
    Preset {
        polarity: Polarity {
            dark_weight: 0.3,
            dark_phase: DarkPhase {
                duration_sec,
                curve,
                intensity: 0.6,
            },
            ..Polarity::default()
        },
        sensitivity: Default::default(),
    }
}

fn neutral_bio() -> BioSignals {
    BioSignals {
        hrv: Some(0.5),
        eeg_band_ratio: Some(0.5),
    }
}

#[test]
fn zero_duration_gate_never_activates() {
    let frame = FrameField::new(FrameFieldConfig::default()).advance(0.016);
    let mut engine = ShadowEngine::new(preset_with_gate(0.0, FadeCurve::Linear));
    let out = engine.step(0.016, &frame, neutral_bio());
    assert!(engine.snapshot().elapsed_sec > 0.0);
    assert!(!out.dark_phase_active);
}

#[test]
fn gate_is_active_inside_the_window_and_releases_after() {
    let mut field = FrameField::new(FrameFieldConfig::default());
    let mut engine = ShadowEngine::new(preset_with_gate(1.0, FadeCurve::Linear));

    let frame = field.advance(0.1);
    let early = engine.step(0.1, &frame, neutral_bio());
    assert!(early.dark_phase_active);
    // Early in the window the blend leans almost fully dark.
    assert!(early.weights.dark > 0.85);

    let mut last = early;
    for _ in 0..20 {
        let frame = field.advance(0.1);
        last = engine.step(0.1, &frame, neutral_bio());
    }
    assert!(engine.snapshot().elapsed_sec > 1.0);
    assert!(!last.dark_phase_active);
}

#[test]
fn dark_weight_fades_toward_steady_state_through_the_window() {
    let mut field = FrameField::new(FrameFieldConfig::default());
    let mut engine = ShadowEngine::new(preset_with_gate(2.0, FadeCurve::Linear));

    let mut previous = f32::MAX;
    for _ in 0..19 {
        let frame = field.advance(0.1);
        let out = engine.step(0.1, &frame, neutral_bio());
        assert!(out.dark_phase_active);
        assert!(
            out.weights.dark <= previous,
            "dark weight should not rise while the gate fades"
        );
        previous = out.weights.dark;
    }
}

#[test]
fn exponential_curve_holds_darkness_longer_than_linear() {
    let mut field_lin = FrameField::new(FrameFieldConfig::default());
    let mut field_exp = FrameField::new(FrameFieldConfig::default());
    let mut linear = ShadowEngine::new(preset_with_gate(2.0, FadeCurve::Linear));
    let mut exponential = ShadowEngine::new(preset_with_gate(2.0, FadeCurve::Exponential));

    for _ in 0..10 {
        let frame_lin = field_lin.advance(0.1);
        let frame_exp = field_exp.advance(0.1);
        let out_lin = linear.step(0.1, &frame_lin, neutral_bio());
        let out_exp = exponential.step(0.1, &frame_exp, neutral_bio());
        assert!(
            out_exp.weights.dark >= out_lin.weights.dark,
            "squared fade should keep the gate darker mid-window"
        );
    }
}
