/// Normalized biosignal proxies for one tick. `None` means the source had no
/// reading; the engine substitutes a neutral midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BioSignals {
    /// Calm/arousal proxy in [0, 1]; higher is calmer.
    pub hrv: Option<f32>,
    /// Alpha-vs-beta band ratio in [0, 1]; higher means more alpha.
    pub eeg_band_ratio: Option<f32>,
}
