//! A `bevy_xr_orbit_cam` extension that smoothly moves the orbit pivot, and optionally the orbit
//! radius, to a new target. The viewing angles are kept, so the camera glides along with the pivot.

use std::time::Duration;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_platform::collections::HashMap;
use bevy_reflect::prelude::*;
use bevy_time::prelude::*;
use bevy_window::RequestRedraw;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct RecenterPlugin;

impl Plugin for RecenterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Recenter>()
            .add_event::<RecenterTrigger>()
            .add_systems(
                PreUpdate,
                Recenter::update
                    .after(XrOrbitSystems::Collect)
                    .before(XrOrbitSystems::Navigate),
            )
            .add_systems(PostUpdate, RecenterTrigger::receive) // In PostUpdate so we don't miss users sending this in Update. Recenter::update will catch the changes next frame.
            .register_type::<Recenter>();
    }
}

/// Send this event to move the pivot of a camera. Animation speed is configured with the
/// [`Recenter`] resource.
#[derive(Debug, Event)]
pub struct RecenterTrigger {
    /// The new pivot.
    pub pivot: Vec3,
    /// The orbit radius when finished moving, or `None` to keep the current radius. Clamped to the
    /// camera's zoom limits.
    pub radius: Option<f32>,
    /// The camera to update.
    pub camera: Entity,
}

impl RecenterTrigger {
    fn receive(
        mut events: EventReader<Self>,
        mut state: ResMut<Recenter>,
        cameras: Query<&XrOrbitCam>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        for event in events.read() {
            let Ok(controller) = cameras.get(event.camera) else {
                continue;
            };
            if !event.pivot.is_finite() {
                warn!("Ignoring recenter to non-finite pivot {}", event.pivot);
                continue;
            }
            debug!("Recentering {:?} on {}", event.camera, event.pivot);
            redraw.write(RequestRedraw);

            let current = controller.spherical();
            let target_radius = controller
                .config()
                .zoom_limits
                .clamp(event.radius.unwrap_or(current.radius));

            state.map.insert(
                event.camera,
                RecenterEntry {
                    elapsed: Duration::ZERO,
                    initial_pivot: current.pivot,
                    initial_radius: current.radius,
                    target_pivot: event.pivot,
                    target_radius,
                    complete: false,
                },
            );
        }
    }
}

struct RecenterEntry {
    elapsed: Duration,
    initial_pivot: Vec3,
    initial_radius: f32,
    target_pivot: Vec3,
    target_radius: f32,
    complete: bool,
}

/// Stores settings and state for the recenter plugin.
#[derive(Resource, Reflect)]
pub struct Recenter {
    /// The duration of the recenter animation.
    pub animation_duration: Duration,
    /// The cubic curve used to animate the pivot during a recenter.
    #[reflect(ignore)]
    pub animation_curve: CubicSegment<Vec2>,
    #[reflect(ignore)]
    map: HashMap<Entity, RecenterEntry>,
}

impl Default for Recenter {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(400),
            animation_curve: CubicSegment::new_bezier_easing((0.42, 0.0), (0.58, 1.0)),
            map: Default::default(),
        }
    }
}

impl Recenter {
    /// Is the given camera currently being recentered?
    pub fn is_animating(&self, camera: Entity) -> bool {
        self.map.contains_key(&camera)
    }

    fn update(
        mut state: ResMut<Self>,
        mut cameras: Query<&mut XrOrbitCam>,
        time: Res<Time>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        let animation_duration = state.animation_duration;
        let animation_curve = state.animation_curve.clone();

        for (
            camera,
            RecenterEntry {
                elapsed,
                initial_pivot,
                initial_radius,
                target_pivot,
                target_radius,
                complete,
            },
        ) in state.map.iter_mut()
        {
            let Ok(mut controller) = cameras.get_mut(*camera) else {
                *complete = true;
                continue;
            };
            *elapsed += time.delta();
            let progress_t = if animation_duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f32() / animation_duration.as_secs_f32()).clamp(0.0, 1.0)
            };
            let progress = animation_curve.ease(progress_t);

            controller.retarget(
                initial_pivot.lerp(*target_pivot, progress),
                Some(*initial_radius + (*target_radius - *initial_radius) * progress),
            );

            if progress_t >= 1.0 {
                // Land exactly on the target, whatever the curve evaluates to at 1.
                controller.retarget(*target_pivot, Some(*target_radius));
                *complete = true;
            }
            redraw.write(RequestRedraw);
        }
        state.map.retain(|_, v| !v.complete);
    }
}
