//! Biosignal inputs to the blend: the normalized proxy pair plus a seeded
//! physiological simulator for sessions without sensor hardware.

pub mod signals;
pub mod simulator;

pub use signals::BioSignals;
pub use simulator::{BandPowers, BioSimulator, BioState};
