#![warn(missing_docs)]

//! An orbit camera controller for XR, that fuses thumbsticks and hand pinches.
//!
//! The camera orbits a fixed pivot, always looking at it. Its position is kept as a spherical
//! coordinate about the pivot, which every input source nudges each frame:
//!
//! - **Thumbsticks**: horizontal deflection orbits around the up axis, vertical deflection orbits
//!   over the top, and the vertical axis of a secondary stick dollies in and out. Every connected
//!   controller contributes.
//! - **One pinching hand**: dragging the pinched hand orbits the camera.
//! - **Two pinching hands**: pushing or pulling both hands dollies the camera.
//!
//! The radius and polar angle are clamped after every frame, so the camera never passes through
//! the pivot, never runs away, and never flips over a pole. Non-finite device readings are
//! discarded rather than propagated into the camera.
//!
//! ## Getting Started
//!
//! 1. Add [`DefaultXrOrbitPlugins`] to your app.
//! 2. Add an [`XrOrbitCam`](crate::controller::component::XrOrbitCam) to your camera, built from the
//!    pivot and the starting camera position.
//! 3. From your XR backend, write device state into
//!    [`XrInputState`](crate::controller::inputs::XrInputState) each frame and send a
//!    [`PinchEvent`](crate::controller::inputs::PinchEvent) when a pinch begins or ends.
//!
//! ## Extensions
//!
//! - [`RecenterPlugin`](crate::extensions::recenter::RecenterPlugin): smoothly move the pivot.
//! - [`PivotIndicatorPlugin`](crate::extensions::pivot_indicator::PivotIndicatorPlugin): draw the
//!   pivot while a hand gesture is active. Requires the `extension_pivot_indicator` feature.

pub mod controller;
pub mod extensions;

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            component::{EnabledMotion, XrOrbitCam},
            config::{NavigationConfig, Sensitivity},
            gesture::{HandTrack, HandTracks, InteractionMode},
            inputs::{
                ControllerSelect, ControllerSource, FrameInputs, HandSource, PinchEvent, Side,
                XrInputState,
            },
            pose::{CameraPose, LookAt},
            spherical::{PolarLimits, SphericalState},
            zoom::ZoomLimits,
            XrOrbitPlugin, XrOrbitSystems,
        },
        extensions::recenter::{Recenter, RecenterPlugin, RecenterTrigger},
        DefaultXrOrbitPlugins,
    };

    #[cfg(feature = "extension_pivot_indicator")]
    pub use crate::extensions::pivot_indicator::{PivotIndicator, PivotIndicatorPlugin};
}

/// Adds the controller and its default extensions.
pub struct DefaultXrOrbitPlugins;

impl bevy_app::PluginGroup for DefaultXrOrbitPlugins {
    #[allow(clippy::let_and_return)]
    fn build(self) -> bevy_app::PluginGroupBuilder {
        let group = bevy_app::PluginGroupBuilder::start::<Self>()
            .add(crate::controller::XrOrbitPlugin)
            .add(crate::extensions::recenter::RecenterPlugin);

        #[cfg(feature = "extension_pivot_indicator")]
        let group = group.add(crate::extensions::pivot_indicator::PivotIndicatorPlugin);

        group
    }
}
