//! The authoritative camera coordinate, [`SphericalState`], and its [`PolarLimits`].
//!
//! Axis convention: Y is up. The polar angle is measured from +Y, and the azimuth rotates about Y,
//! starting at +Z and turning toward +X. A camera at `polar = π/2, azimuth = 0` sits on the +Z side
//! of the pivot, looking down -Z.

use core::f32::consts::{FRAC_PI_2, PI};

use bevy_math::prelude::*;
use bevy_reflect::Reflect;

use super::zoom::ZoomLimits;

/// Bound the polar angle so the camera never reaches either pole.
///
/// At a pole, the direction to the pivot is parallel to the up axis and the look-at orientation is
/// undefined, which shows up as the camera suddenly flipping. Both bounds must stay strictly inside
/// `(0, π)`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PolarLimits {
    /// Smallest polar angle in radians, how close the camera may get to looking straight down.
    pub min: f32,
    /// Largest polar angle in radians, how close the camera may get to looking straight up.
    pub max: f32,
}

impl Default for PolarLimits {
    fn default() -> Self {
        Self {
            min: 0.01,
            max: PI - 0.01,
        }
    }
}

impl PolarLimits {
    /// Clamp `polar` into the limits. A NaN angle collapses to the horizon, or the nearest bound.
    ///
    /// Never panics, even on invalid limits.
    pub fn clamp(&self, polar: f32) -> f32 {
        let polar = if polar.is_nan() { FRAC_PI_2 } else { polar };
        polar.min(self.max).max(self.min)
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && 0.0 < self.min
            && self.min < self.max
            && self.max < PI
    }
}

/// Camera position expressed relative to a fixed pivot.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SphericalState {
    /// Distance from the pivot to the camera.
    pub radius: f32,
    /// Angle between the up axis and the pivot-to-camera direction, in radians.
    pub polar: f32,
    /// Rotation about the up axis, in radians. Free running, never wrapped.
    pub azimuth: f32,
    /// The world space point the camera orbits and looks at.
    pub pivot: Vec3,
}

impl Default for SphericalState {
    fn default() -> Self {
        Self {
            radius: 10.0,
            polar: FRAC_PI_2,
            azimuth: 0.0,
            pivot: Vec3::ZERO,
        }
    }
}

impl SphericalState {
    /// Convert a camera position into spherical form about `pivot`.
    ///
    /// The result is not clamped. A camera sitting on the pivot has no direction, so it is placed
    /// on the horizon at `azimuth = 0` with a zero radius, which the next clamp pushes out to the
    /// minimum radius.
    pub fn from_position(pivot: Vec3, position: Vec3) -> Self {
        let offset = position - pivot;
        let radius = offset.length();
        if !radius.is_finite() || radius <= f32::EPSILON {
            return Self {
                radius: 0.0,
                polar: FRAC_PI_2,
                azimuth: 0.0,
                pivot,
            };
        }
        Self {
            radius,
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
            pivot,
        }
    }

    /// Enforce the radius and polar bounds. Must be called after every mutation.
    ///
    /// The limits should come from a [`NavigationConfig::sanitized`] config. Invalid limits do not
    /// panic, but the state may end up outside them.
    ///
    /// [`NavigationConfig::sanitized`]: super::config::NavigationConfig::sanitized
    pub fn clamp(&mut self, zoom_limits: &ZoomLimits, polar_limits: &PolarLimits) {
        self.radius = zoom_limits.clamp(self.radius);
        self.polar = polar_limits.clamp(self.polar);
        if !self.azimuth.is_finite() {
            self.azimuth = 0.0;
        }
    }

    /// Is this state inside the given bounds?
    pub fn is_within(&self, zoom_limits: &ZoomLimits, polar_limits: &PolarLimits) -> bool {
        zoom_limits.contains(self.radius)
            && (polar_limits.min..=polar_limits.max).contains(&self.polar)
            && self.azimuth.is_finite()
    }

    /// Unit direction from the pivot toward the camera.
    pub fn direction(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    /// World space camera position.
    pub fn to_cartesian(&self) -> Vec3 {
        self.pivot + self.radius * self.direction()
    }

    /// True when the navigated coordinates of both states are bit-identical. The pivot is not
    /// compared.
    pub(crate) fn same_coordinates(&self, other: &Self) -> bool {
        self.radius.to_bits() == other.radius.to_bits()
            && self.polar.to_bits() == other.polar.to_bits()
            && self.azimuth.to_bits() == other.azimuth.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn position_roundtrip() {
        let pivot = Vec3::new(-1.0, 2.0, 0.0);
        let eye = Vec3::new(-5.0, 5.0, 12.0);
        let state = SphericalState::from_position(pivot, eye);
        assert!((state.radius - (eye - pivot).length()).abs() < 1e-5);
        assert_close(state.to_cartesian(), eye);
    }

    #[test]
    fn axis_convention() {
        let state = SphericalState {
            radius: 3.0,
            polar: FRAC_PI_2,
            azimuth: 0.0,
            pivot: Vec3::ZERO,
        };
        assert_close(state.to_cartesian(), Vec3::new(0.0, 0.0, 3.0));

        let state = SphericalState {
            azimuth: FRAC_PI_2,
            ..state
        };
        assert_close(state.to_cartesian(), Vec3::new(3.0, 0.0, 0.0));

        let state = SphericalState {
            polar: 0.0,
            ..state
        };
        assert_close(state.to_cartesian(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn camera_on_pivot_is_degenerate_but_finite() {
        let mut state = SphericalState::from_position(Vec3::ONE, Vec3::ONE);
        assert_eq!(state.radius, 0.0);
        state.clamp(&ZoomLimits::default(), &PolarLimits::default());
        assert_eq!(state.radius, 2.0);
        assert!(state.to_cartesian().is_finite());
    }

    #[test]
    fn clamp_recovers_out_of_range_polar() {
        let mut state = SphericalState {
            polar: -5.0,
            ..Default::default()
        };
        let polar_limits = PolarLimits::default();
        state.clamp(&ZoomLimits::default(), &polar_limits);
        assert_eq!(state.polar, polar_limits.min);
        assert!(state.to_cartesian().is_finite());

        state.polar = 9.0;
        state.clamp(&ZoomLimits::default(), &polar_limits);
        assert_eq!(state.polar, polar_limits.max);
    }

    #[test]
    fn clamp_recovers_non_finite_values() {
        let mut state = SphericalState {
            radius: f32::NAN,
            polar: f32::NAN,
            azimuth: f32::INFINITY,
            pivot: Vec3::ZERO,
        };
        let (zoom, polar) = (ZoomLimits::default(), PolarLimits::default());
        state.clamp(&zoom, &polar);
        assert!(state.is_within(&zoom, &polar));
        assert_eq!(state.polar, FRAC_PI_2);
    }

    #[test]
    fn clamp_is_identity_inside_bounds() {
        let before = SphericalState {
            radius: 7.25,
            polar: 1.1,
            azimuth: -13.7,
            pivot: Vec3::X,
        };
        let mut after = before;
        after.clamp(&ZoomLimits::default(), &PolarLimits::default());
        assert!(before.same_coordinates(&after));
    }

    #[test]
    fn clamp_with_invalid_limits_stays_finite() {
        let mut state = SphericalState {
            polar: f32::NAN,
            ..Default::default()
        };
        let zoom = ZoomLimits {
            min_radius: 5.0,
            max_radius: 1.0,
        };
        let polar = PolarLimits { min: 2.0, max: 1.0 };
        state.clamp(&zoom, &polar);
        assert_eq!(state.polar, 2.0);
        assert_eq!(state.radius, 5.0);
        assert!(state.to_cartesian().is_finite());
    }

    #[test]
    fn polar_limit_validity() {
        assert!(PolarLimits::default().is_valid());
        assert!(!PolarLimits { min: 0.0, max: 1.0 }.is_valid());
        assert!(!PolarLimits { min: 0.5, max: PI }.is_valid());
        assert!(!PolarLimits { min: 2.0, max: 1.0 }.is_valid());
    }
}
