//! Provides [`ZoomLimits`] settings.

use bevy_reflect::Reflect;

/// Bound the orbit radius, the distance between the camera and the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ZoomLimits {
    /// The closest the camera is allowed to get to the pivot, in world space units.
    ///
    /// Must be positive. Dolly inputs that would move the camera closer than this are absorbed.
    pub min_radius: f32,
    /// The furthest the camera is allowed to move away from the pivot, in world space units.
    ///
    /// Must be larger than `min_radius`. Without an upper bound, a hand held forward for a long
    /// time would push the camera out indefinitely.
    pub max_radius: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_radius: 2.0,
            max_radius: 50.0,
        }
    }
}

impl ZoomLimits {
    /// Clamp `radius` into the limits. A NaN radius collapses to `min_radius`.
    ///
    /// Never panics, even on invalid limits, but the result is only meaningful for limits that
    /// passed [`NavigationConfig::sanitized`](super::config::NavigationConfig::sanitized).
    pub fn clamp(&self, radius: f32) -> f32 {
        if radius.is_nan() {
            return self.min_radius;
        }
        radius.min(self.max_radius).max(self.min_radius)
    }

    /// Is `radius` inside the limits?
    pub fn contains(&self, radius: f32) -> bool {
        (self.min_radius..=self.max_radius).contains(&radius)
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius > 0.0
            && self.min_radius < self.max_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_range() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.clamp(0.5), 2.0);
        assert_eq!(limits.clamp(80.0), 50.0);
        assert_eq!(limits.clamp(12.0), 12.0);
        assert_eq!(limits.clamp(f32::INFINITY), 50.0);
        assert_eq!(limits.clamp(f32::NAN), 2.0);
    }

    #[test]
    fn validity() {
        assert!(ZoomLimits::default().is_valid());
        let swapped = ZoomLimits {
            min_radius: 10.0,
            max_radius: 1.0,
        };
        assert!(!swapped.is_valid());
        let zero = ZoomLimits {
            min_radius: 0.0,
            max_radius: 1.0,
        };
        assert!(!zero.is_valid());
    }

    #[test]
    fn invalid_limits_do_not_panic() {
        let swapped = ZoomLimits {
            min_radius: 10.0,
            max_radius: 1.0,
        };
        assert_eq!(swapped.clamp(5.0), 10.0);
        let nan = ZoomLimits {
            min_radius: f32::NAN,
            max_radius: f32::NAN,
        };
        assert_eq!(nan.clamp(5.0), 5.0);
    }
}
