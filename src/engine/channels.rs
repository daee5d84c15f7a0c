use crate::core::frame::CoreFrame;
use crate::core::util::clamp01;
use crate::engine::preset::Sensitivity;

/// Complementary channel sits one octave below the primary.
pub const SUBHARMONIC_RATIO: f32 = 0.5;

/// Floor applied to the primary cutoff before it divides the reflection.
const REFLECT_DENOM_FLOOR_HZ: f32 = 100.0;
const REFLECT_CUTOFF_FLOOR_HZ: f32 = 40.0;

const AMP_RATIO_EPSILON: f32 = 1e-6;

/// One channel's synthesis parameters for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParams {
    pub freq_hz: f32,
    pub amp: f32,
    pub cutoff_hz: f32,
}

/// Primary (light) channel: base scales bent by the centered frame scalars.
pub fn light_channel(frame: &CoreFrame, sens: &Sensitivity) -> ChannelParams {
    let [k_phase, k_phi, k_curv, k_temp] = sens.freq;
    let bend = k_phase * (frame.phase01 - 0.5)
        + k_phi * (frame.phi_phase01 - 0.5)
        + k_curv * (frame.curvature01 - 0.5)
        + k_temp * (frame.temporal01 - 0.5);

    let freq_hz = frame.base_freq_hz * bend.exp();
    let amp = frame.base_amp
        * (1.0 + sens.amp[0] * (frame.curvature01 - 0.5))
        * (1.0 + sens.amp[1] * frame.angular_rate.abs());
    let cutoff_hz = frame.base_cutoff_hz
        * (sens.cutoff[0] * (frame.phase01 - 0.5) + sens.cutoff[1] * (frame.curvature01 - 0.5))
            .exp();

    ChannelParams {
        freq_hz,
        amp,
        cutoff_hz,
    }
}

/// Complementary (dark) channel: a subharmonic whose amplitude fills the
/// head-room the light channel leaves, with the cutoff reflected below the
/// base through `base² / light`.
pub fn dark_channel(frame: &CoreFrame, light: &ChannelParams, intensity: f32) -> ChannelParams {
    let residual = if frame.base_amp > AMP_RATIO_EPSILON {
        1.0 - light.amp / frame.base_amp
    } else {
        0.0
    };
    let amp = clamp01(frame.base_amp * residual * intensity);

    let cutoff_hz = (frame.base_cutoff_hz * frame.base_cutoff_hz
        / light.cutoff_hz.max(REFLECT_DENOM_FLOOR_HZ))
    .max(REFLECT_CUTOFF_FLOOR_HZ);

    ChannelParams {
        freq_hz: SUBHARMONIC_RATIO * light.freq_hz,
        amp,
        cutoff_hz,
    }
}
