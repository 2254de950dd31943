//! The orbit camera controller: input fusion and spherical navigation.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::ButtonInput;
use bevy_window::RequestRedraw;

pub mod component;
pub mod config;
pub mod gesture;
pub mod inputs;
pub mod motion;
pub mod pose;
pub mod spherical;
pub mod zoom;

use component::XrOrbitCam;
use inputs::{ControllerSelect, PinchEvent, Side, XrInputState};

/// Adds the controller systems that steer every [`XrOrbitCam`].
pub struct XrOrbitPlugin;

impl Plugin for XrOrbitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<XrInputState>()
            .init_resource::<ButtonInput<Side>>()
            .add_event::<PinchEvent>()
            .add_event::<ControllerSelect>()
            .add_event::<RequestRedraw>()
            .configure_sets(
                PreUpdate,
                XrOrbitSystems::Collect.before(XrOrbitSystems::Navigate),
            )
            .add_systems(
                PreUpdate,
                (PinchEvent::receive, ControllerSelect::update).in_set(XrOrbitSystems::Collect),
            )
            .add_systems(
                PreUpdate,
                XrOrbitCam::update_camera_positions.in_set(XrOrbitSystems::Navigate),
            )
            .register_type::<XrOrbitCam>()
            .register_type::<XrInputState>();
    }
}

/// System sets of the controller, both in [`PreUpdate`].
///
/// An XR backend should write [`XrInputState`] and send [`PinchEvent`]s before
/// [`XrOrbitSystems::Collect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum XrOrbitSystems {
    /// Buffer device events into [`XrInputState`].
    Collect,
    /// Step every camera and write its transform.
    Navigate,
}
