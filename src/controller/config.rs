//! Provides [`NavigationConfig`], the per-camera tuning of the controller.

use std::time::Duration;

use bevy_log::prelude::*;
use bevy_reflect::prelude::*;

use super::{spherical::PolarLimits, zoom::ZoomLimits};

/// How strongly the camera responds to each kind of input.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Sensitivity {
    /// Orbit rate in radians per second at full stick deflection.
    pub orbit_speed: f32,
    /// Dolly rate in world units per second at full secondary stick deflection.
    pub dolly_speed: f32,
    /// Radians of orbit per world unit of single hand motion.
    pub hand_orbit_gain: f32,
    /// World units of dolly per world unit of forward/backward motion of both hands.
    ///
    /// Hands move much less along the depth axis than the camera needs to travel, so this is
    /// usually far larger than `hand_orbit_gain`.
    pub hand_dolly_gain: f32,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            orbit_speed: 1.4,
            dolly_speed: 3.0,
            hand_orbit_gain: 1.2,
            hand_dolly_gain: 10.0,
        }
    }
}

/// Settings for one orbiting camera. Does not change while navigating.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct NavigationConfig {
    /// Input sensitivity of the camera.
    pub sensitivity: Sensitivity,
    /// Near and far bounds of the orbit radius.
    pub zoom_limits: ZoomLimits,
    /// Bounds of the polar angle.
    pub polar_limits: PolarLimits,
    /// The longest frame the controller will integrate. A longer frame, e.g. after the runtime
    /// paused rendering while the headset was taken off, is treated as this long, so a held stick
    /// doesn't launch the camera.
    pub max_delta_time: Duration,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sensitivity: Default::default(),
            zoom_limits: Default::default(),
            polar_limits: Default::default(),
            max_delta_time: Duration::from_millis(50),
        }
    }
}

impl NavigationConfig {
    /// Replace every invalid setting with its default, logging a warning for each.
    ///
    /// Speeds and gains must be finite and positive, radius bounds positive and ordered, polar
    /// bounds ordered and strictly inside `(0, π)`, and the maximum frame time non-zero.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let sensitivity = &mut self.sensitivity;
        for (name, value, default) in [
            (
                "orbit_speed",
                &mut sensitivity.orbit_speed,
                defaults.sensitivity.orbit_speed,
            ),
            (
                "dolly_speed",
                &mut sensitivity.dolly_speed,
                defaults.sensitivity.dolly_speed,
            ),
            (
                "hand_orbit_gain",
                &mut sensitivity.hand_orbit_gain,
                defaults.sensitivity.hand_orbit_gain,
            ),
            (
                "hand_dolly_gain",
                &mut sensitivity.hand_dolly_gain,
                defaults.sensitivity.hand_dolly_gain,
            ),
        ] {
            if !(value.is_finite() && *value > 0.0) {
                warn!("Invalid {name} {value}, using {default}");
                *value = default;
            }
        }
        if !self.zoom_limits.is_valid() {
            warn!(
                "Invalid zoom limits {:?}, using {:?}",
                self.zoom_limits, defaults.zoom_limits
            );
            self.zoom_limits = defaults.zoom_limits;
        }
        if !self.polar_limits.is_valid() {
            warn!(
                "Invalid polar limits {:?}, using {:?}",
                self.polar_limits, defaults.polar_limits
            );
            self.polar_limits = defaults.polar_limits;
        }
        if self.max_delta_time.is_zero() {
            warn!(
                "max_delta_time must be non-zero, using {:?}",
                defaults.max_delta_time
            );
            self.max_delta_time = defaults.max_delta_time;
        }
        self
    }

    /// The frame time to integrate, in seconds, for a frame that took `delta`.
    pub fn clamp_delta(&self, delta: Duration) -> f32 {
        delta.min(self.max_delta_time).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = NavigationConfig::default();
        assert_eq!(config.clone().sanitized(), config);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = NavigationConfig {
            sensitivity: Sensitivity {
                orbit_speed: -1.0,
                dolly_speed: f32::NAN,
                hand_orbit_gain: 2.0,
                hand_dolly_gain: 0.0,
            },
            zoom_limits: ZoomLimits {
                min_radius: 5.0,
                max_radius: 1.0,
            },
            polar_limits: PolarLimits { min: -0.1, max: 1.0 },
            max_delta_time: Duration::ZERO,
        }
        .sanitized();
        let defaults = NavigationConfig::default();
        assert_eq!(config.sensitivity.orbit_speed, defaults.sensitivity.orbit_speed);
        assert_eq!(config.sensitivity.dolly_speed, defaults.sensitivity.dolly_speed);
        assert_eq!(config.sensitivity.hand_orbit_gain, 2.0);
        assert_eq!(
            config.sensitivity.hand_dolly_gain,
            defaults.sensitivity.hand_dolly_gain
        );
        assert_eq!(config.zoom_limits, defaults.zoom_limits);
        assert_eq!(config.polar_limits, defaults.polar_limits);
        assert_eq!(config.max_delta_time, defaults.max_delta_time);
    }

    #[test]
    fn long_frames_are_clamped() {
        let config = NavigationConfig::default();
        assert!((config.clamp_delta(Duration::from_secs(3)) - 0.05).abs() < 1e-6);
        let dt = config.clamp_delta(Duration::from_millis(10));
        assert!((dt - 0.01).abs() < 1e-6);
    }
}
