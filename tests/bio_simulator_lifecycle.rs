use umbral::bio::{BandPowers, BioSimulator, BioState};

#[test]
fn running_flag_follows_start_and_stop() {
    let mut sim = BioSimulator::new(3);
    assert!(!sim.is_running());
    sim.start_session();
    assert!(sim.is_running());
    sim.stop_session();
    assert!(!sim.is_running());
}

#[test]
fn start_and_stop_are_idempotent() {
    let mut sim = BioSimulator::new(3);
    sim.start_session();
    sim.start_session();
    assert!(sim.is_running());

    sim.advance(0.6);
    sim.start_session();
    // A redundant start must not reset mid-period accumulation: the next
    // 0.6 s completes the first refresh.
    let before = sim.full_state();
    sim.advance(0.6);
    assert_ne!(sim.full_state(), before);

    sim.stop_session();
    sim.stop_session();
    assert!(!sim.is_running());
}

#[test]
fn advance_is_a_no_op_while_stopped() {
    let mut sim = BioSimulator::new(3);
    let initial = sim.full_state();
    sim.advance(10.0);
    assert_eq!(sim.full_state(), initial);

    sim.start_session();
    sim.stop_session();
    let parked = sim.full_state();
    sim.advance(10.0);
    assert_eq!(sim.full_state(), parked);
}

#[test]
fn zero_bands_give_zero_ratio_not_nan() {
    let mut sim = BioSimulator::new(3);
    sim.inject_state(BioState {
        brainwaves: BandPowers {
            delta: 0.0,
            theta: 0.0,
            alpha: 0.0,
            beta: 0.0,
        },
        ..BioState::default()
    });
    let signals = sim.bio_signals();
    let ratio = signals.eeg_band_ratio.unwrap();
    assert!(!ratio.is_nan());
    assert_eq!(ratio, 0.0);
}

#[test]
fn full_state_stays_physiological_over_an_hour() {
    let mut sim = BioSimulator::new(17);
    sim.start_session();
    for _ in 0..3600 {
        sim.advance(1.0);
        let state = sim.full_state();
        assert!(state.heart_rate_bpm > 40.0 && state.heart_rate_bpm < 120.0);
        assert!(state.hrv_ms >= 20.0 && state.hrv_ms <= 80.0);
        assert!(state.breathing_rate_bpm >= 3.0);
        assert!(state.skin_conductance_us > 0.0);
        for band in [
            state.brainwaves.delta,
            state.brainwaves.theta,
            state.brainwaves.alpha,
            state.brainwaves.beta,
        ] {
            assert!((0.0..=1.0).contains(&band));
        }
        assert!((0.0..=1.0).contains(&state.muscle_tension));
        assert!(state.body_temp_c > 35.5 && state.body_temp_c < 38.0);
    }
}
