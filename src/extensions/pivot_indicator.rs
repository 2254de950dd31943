//! A `bevy_xr_orbit_cam` extension that draws an indicator in the scene at the location of the
//! pivot while a hand gesture is steering the camera. This makes it more obvious to users what
//! point in space they are orbiting around, or dollying toward.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::{prelude::*, Isometry3d};
use bevy_reflect::prelude::*;
use bevy_transform::{prelude::*, TransformSystem};

use crate::prelude::*;

/// See the [module](self) docs.
pub struct PivotIndicatorPlugin;

impl Plugin for PivotIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            draw_pivot.after(TransformSystem::TransformPropagate),
        )
        .register_type::<PivotIndicator>();
    }
}

/// Optional. Configures whether or not an [`XrOrbitCam`] should show a pivot indicator during hand
/// gestures. The indicator will be enabled if this component is not present.
#[derive(Debug, Component, Reflect)]
pub struct PivotIndicator {
    /// Should the indicator be visible on this camera?
    pub enabled: bool,
}

impl Default for PivotIndicator {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Use gizmos to draw the camera pivot in world space.
pub fn draw_pivot(
    cameras: Query<(&XrOrbitCam, &GlobalTransform, Option<&PivotIndicator>)>,
    mut gizmos: Gizmos,
) {
    for (orbit_cam, cam_transform, _) in cameras
        .iter()
        .filter(|(.., indicator)| indicator.map(|i| i.enabled).unwrap_or(true))
    {
        let mode = orbit_cam.interaction_mode();
        if mode.is_idle() {
            continue;
        }
        let scale = orbit_cam.spherical().radius * 0.01;

        // Shift the indicator toward the camera to prevent it clipping objects near the pivot
        let pivot = orbit_cam.pivot();
        let shift = (cam_transform.translation() - pivot).normalize_or_zero() * scale;
        let pivot = pivot + shift;

        let gizmo_color = || match mode {
            InteractionMode::DualDolly => Color::srgb(0.5, 0.8, 1.0),
            _ => Color::WHITE,
        };
        gizmos.circle(
            Isometry3d::new(pivot, cam_transform.rotation()),
            scale,
            gizmo_color(),
        );

        let offset = 1.5 * scale;
        let arm_length = 0.4;
        if mode.is_dollying() {
            // Arms along the view axis, pointing in the direction of travel.
            gizmos.ray(
                pivot + offset * cam_transform.back(),
                offset * arm_length * cam_transform.back(),
                gizmo_color(),
            );
            gizmos.ray(
                pivot + offset * cam_transform.forward(),
                offset * arm_length * cam_transform.forward(),
                gizmo_color(),
            );
        } else {
            for direction in [
                cam_transform.left(),
                cam_transform.right(),
                cam_transform.up(),
                cam_transform.down(),
            ] {
                gizmos.ray(
                    pivot + offset * direction,
                    offset * arm_length * direction,
                    gizmo_color(),
                );
            }
        }
    }
}
