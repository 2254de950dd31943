//! The navigation integrator: the only code that moves a [`SphericalState`].
//!
//! Two channels feed it every frame. The analog channel integrates controller sticks over the
//! frame time. The hand channel applies the motion of pinching hands, as classified by
//! [`InteractionMode`], and is not time scaled since hand motion is already a displacement.

use bevy_log::prelude::*;
use bevy_math::prelude::*;

use super::{
    component::EnabledMotion,
    config::{NavigationConfig, Sensitivity},
    gesture::{HandTracks, InteractionMode},
    inputs::{ControllerSample, Side},
    spherical::SphericalState,
};

/// Vertical stick orbit runs slower than horizontal, so orbiting feels faster left-right than
/// up-down.
pub const VERTICAL_ORBIT_RATIO: f32 = 0.8;

/// Scale applied to the secondary stick relative to `dolly_speed`.
pub const STICK_DOLLY_RATIO: f32 = 0.5;

/// Apply one frame of input to `state`, then clamp it. Returns true if the camera moved.
///
/// `dt` is the frame time in seconds, already clamped by the caller. A negative or non-finite `dt`
/// is treated as zero.
///
/// `config` is expected to have passed through [`NavigationConfig::sanitized`]. With invalid limits
/// the state still stays finite, but may land outside them.
pub fn integrate(
    state: &mut SphericalState,
    config: &NavigationConfig,
    enabled: &EnabledMotion,
    controllers: &[ControllerSample],
    hands: &mut HandTracks,
    mode: InteractionMode,
    dt: f32,
) -> bool {
    let before = *state;
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    if enabled.controllers {
        apply_analog(state, &config.sensitivity, controllers, dt);
    }
    if enabled.hands {
        apply_hands(state, &config.sensitivity, hands, mode);
    } else {
        // Baselines follow the hands while the channel is off, so re-enabling it mid-pinch starts
        // from the current position.
        for side in Side::ALL.into_iter().filter(|side| mode.uses(*side)) {
            hands[side].consume();
        }
    }
    state.clamp(&config.zoom_limits, &config.polar_limits);

    !before.same_coordinates(state)
}

/// Integrate controller sticks. Every controller contributes, additively.
pub fn apply_analog(
    state: &mut SphericalState,
    sensitivity: &Sensitivity,
    controllers: &[ControllerSample],
    dt: f32,
) {
    let orbit_scale = sensitivity.orbit_speed * dt;
    for sample in controllers {
        let Vec2 { x, y } = sample.axis_pair;
        if x != 0.0 {
            state.azimuth -= x * orbit_scale;
        }
        if y != 0.0 {
            state.polar -= y * orbit_scale * VERTICAL_ORBIT_RATIO;
        }
        if let Some(dolly) = sample.secondary_y.filter(|dolly| *dolly != 0.0) {
            state.radius += -dolly * sensitivity.dolly_speed * dt * STICK_DOLLY_RATIO;
        }
    }
}

/// Apply the motion of pinching hands for the given mode, and consume it.
///
/// All deltas are read before any hand's baseline is advanced, and each consumed hand is advanced
/// exactly once.
pub fn apply_hands(
    state: &mut SphericalState,
    sensitivity: &Sensitivity,
    hands: &mut HandTracks,
    mode: InteractionMode,
) {
    match mode {
        InteractionMode::Idle => (),
        InteractionMode::SingleOrbit(side) => {
            let delta = hands[side].pending_delta();
            if delta != Vec3::ZERO {
                trace!("{side:?} hand orbit delta {delta}");
                state.azimuth -= delta.x * sensitivity.hand_orbit_gain;
                state.polar -= delta.y * sensitivity.hand_orbit_gain;
            }
            hands[side].consume();
        }
        InteractionMode::DualDolly => {
            let [left, right] = Side::ALL.map(|side| hands[side]);
            let current_mid = (left.current_position + right.current_position) * 0.5;
            let last_mid = (left.current_position - left.pending_delta()
                + right.current_position
                - right.pending_delta())
                * 0.5;
            let dz = current_mid.z - last_mid.z;
            if dz != 0.0 {
                trace!("Two hand dolly delta {dz}");
                state.radius += dz * sensitivity.hand_dolly_gain;
            }
            for side in Side::ALL {
                hands[side].consume();
            }
        }
    }
}
