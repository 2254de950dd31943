//! Projects a [`SphericalState`] into a [`CameraPose`].

use bevy_math::prelude::*;
use bevy_transform::prelude::*;

use super::spherical::SphericalState;

/// The orientation of an orbit camera: always facing the pivot, with a fixed up direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    /// The point the camera faces.
    pub target: Vec3,
    /// The world up direction used to orient the camera.
    pub up: Dir3,
}

/// Where the camera is, and what it is looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World space camera position.
    pub position: Vec3,
    /// Camera orientation.
    pub look_at: LookAt,
}

impl CameraPose {
    /// Project a clamped spherical state. Pure: the same state always yields the same pose.
    pub fn project(state: &SphericalState) -> Self {
        Self {
            position: state.to_cartesian(),
            look_at: LookAt {
                target: state.pivot,
                up: Dir3::Y,
            },
        }
    }

    /// The camera rotation. Well defined as long as the polar angle is kept away from the poles.
    pub fn rotation(&self) -> Quat {
        Transform::from_translation(self.position)
            .looking_at(self.look_at.target, self.look_at.up)
            .rotation
    }

    /// `transform` moved to this pose, keeping its scale.
    pub fn apply_to(&self, transform: &Transform) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation(),
            scale: transform.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use super::*;

    #[test]
    fn faces_the_pivot() {
        let state = SphericalState {
            radius: 6.0,
            polar: 0.9,
            azimuth: 2.3,
            pivot: Vec3::new(-1.0, 2.0, 0.0),
        };
        let pose = CameraPose::project(&state);
        let transform = pose.apply_to(&Transform::default());
        let to_pivot = (state.pivot - pose.position).normalize();
        assert!(transform.forward().dot(to_pivot) > 0.9999);
        // No roll: the camera's right vector stays horizontal.
        assert!(transform.right().y.abs() < 1e-5);
    }

    #[test]
    fn projection_is_idempotent() {
        let state = SphericalState::default();
        let first = CameraPose::project(&state);
        let second = CameraPose::project(&state);
        assert_eq!(first, second);
        assert_eq!(first.rotation(), second.rotation());
    }

    #[test]
    fn stays_finite_near_the_poles() {
        for polar in [0.01, PI - 0.01] {
            let state = SphericalState {
                polar,
                ..Default::default()
            };
            let pose = CameraPose::project(&state);
            assert!(pose.position.is_finite());
            assert!(pose.rotation().is_finite());
            assert!(pose.rotation().is_normalized());
        }
    }

    #[test]
    fn keeps_scale() {
        let pose = CameraPose::project(&SphericalState::default());
        let transform = pose.apply_to(&Transform::from_scale(Vec3::splat(2.0)));
        assert_eq!(transform.scale, Vec3::splat(2.0));
        assert_eq!(transform.translation, pose.position);
    }
}
