//! The primary [`Component`] of the controller, [`XrOrbitCam`].

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use super::{
    config::NavigationConfig,
    gesture::{HandTracks, InteractionMode},
    inputs::{FrameInputs, XrInputState},
    motion,
    pose::CameraPose,
    spherical::SphericalState,
};

/// Tracks all state of a camera's orbit controller: its settings, its spherical coordinate about
/// the pivot, and the hands steering it.
///
/// # Moving the Camera
///
/// The [`XrOrbitPlugin`](crate::controller::XrOrbitPlugin) steps every `XrOrbitCam` once per frame
/// from the [`XrInputState`] resource, and writes the result to the camera's [`Transform`]. While
/// [`XrInputState::session_active`] is false the camera stays put and the controller is
/// [suspended](XrOrbitCam::suspend).
///
/// To drive the camera manually, e.g. from your own schedule:
///
/// 1. Snapshot the devices with [`FrameInputs::collect`], passing [`XrOrbitCam::hand_tracks`].
/// 2. Call [`XrOrbitCam::step`] with the snapshot and the frame time.
/// 3. Apply [`XrOrbitCam::pose`] to the camera transform.
#[derive(Debug, Clone, Reflect, Component)]
pub struct XrOrbitCam {
    /// What input channels are currently allowed to move the camera?
    pub enabled_motion: EnabledMotion,
    config: NavigationConfig,
    state: SphericalState,
    hands: HandTracks,
    mode: InteractionMode,
}

impl Default for XrOrbitCam {
    fn default() -> Self {
        let config = NavigationConfig::default();
        let mut state = SphericalState::default();
        state.clamp(&config.zoom_limits, &config.polar_limits);
        Self {
            enabled_motion: Default::default(),
            config,
            state,
            hands: Default::default(),
            mode: Default::default(),
        }
    }
}

impl XrOrbitCam {
    /// Create a controller for a camera at `eye` looking at `pivot`. Same as [`XrOrbitCam::new`],
    /// with the arguments in viewing order.
    pub fn looking_from(eye: Vec3, pivot: Vec3) -> Self {
        Self::new(pivot, eye)
    }

    /// Create a controller orbiting `pivot`, with the camera starting at `eye`.
    ///
    /// The starting position is clamped into the default limits. Use [`XrOrbitCam::with_config`]
    /// to supply your own.
    pub fn new(pivot: Vec3, eye: Vec3) -> Self {
        let mut cam = Self::default();
        cam.state = SphericalState::from_position(pivot, eye);
        cam.clamp();
        cam
    }

    /// Use the given settings. Invalid settings are replaced with defaults.
    pub fn with_config(mut self, config: NavigationConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Replace the settings. Invalid settings are replaced with defaults, and the camera is clamped
    /// into the new limits.
    pub fn set_config(&mut self, config: NavigationConfig) {
        self.config = config.sanitized();
        self.clamp();
    }

    /// The current settings.
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// The current spherical coordinate of the camera. Always within the configured limits.
    pub fn spherical(&self) -> &SphericalState {
        &self.state
    }

    /// Per-hand tracking state, carried from the previous frame.
    pub fn hand_tracks(&self) -> &HandTracks {
        &self.hands
    }

    /// The gesture classified in the latest frame.
    pub fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    /// The point the camera orbits and looks at.
    pub fn pivot(&self) -> Vec3 {
        self.state.pivot
    }

    /// The camera pose for the current state.
    pub fn pose(&self) -> CameraPose {
        CameraPose::project(&self.state)
    }

    /// Re-derive the spherical coordinate from a camera position, about the current pivot.
    pub fn reset(&mut self, eye: Vec3) {
        self.state = SphericalState::from_position(self.state.pivot, eye);
        self.clamp();
    }

    /// Orbit a new pivot, without moving the camera. The camera turns to face the new pivot.
    pub fn set_pivot(&mut self, pivot: Vec3) {
        let eye = self.state.to_cartesian();
        self.state = SphericalState::from_position(pivot, eye);
        self.clamp();
    }

    /// Move the pivot, and optionally the radius, keeping the viewing angles. The camera travels
    /// with the pivot.
    pub fn retarget(&mut self, pivot: Vec3, radius: Option<f32>) {
        if !pivot.is_finite() {
            warn!("Ignoring non-finite pivot {pivot}");
            return;
        }
        self.state.pivot = pivot;
        if let Some(radius) = radius {
            self.state.radius = radius;
        }
        self.clamp();
    }

    /// Run one frame of navigation: record hand samples, classify the gesture, and integrate the
    /// input into the spherical state. `dt` is the frame time in seconds, and should already be
    /// clamped with [`NavigationConfig::clamp_delta`].
    ///
    /// Returns true if the camera moved.
    pub fn step(&mut self, frame: &FrameInputs, dt: f32) -> bool {
        self.hands.observe(frame);
        let mode = InteractionMode::from_tracks(&self.hands);
        if mode != self.mode {
            debug!("Interaction mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        motion::integrate(
            &mut self.state,
            &self.config,
            &self.enabled_motion,
            &frame.controllers,
            &mut self.hands,
            mode,
            dt,
        )
    }

    /// Forget every hand while no session is running. Hands that are still tracked when the
    /// session resumes start from a fresh baseline.
    pub fn suspend(&mut self) {
        self.hands.observe(&FrameInputs::default());
        if !self.mode.is_idle() {
            debug!("Interaction mode {:?} -> Idle, session inactive", self.mode);
        }
        self.mode = InteractionMode::Idle;
    }

    fn clamp(&mut self) {
        self.state
            .clamp(&self.config.zoom_limits, &self.config.polar_limits);
    }

    /// Step every camera and update its transform. Called once per frame.
    pub fn update_camera_positions(
        mut cameras: Query<(&mut XrOrbitCam, &mut Transform)>,
        inputs: Res<XrInputState>,
        time: Res<Time>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        if !inputs.session_active {
            for mut controller in cameras.iter_mut().map(|(controller, _)| controller) {
                let hands = controller.hand_tracks();
                if hands.0.iter().any(|track| track.tracked) || !controller.mode.is_idle() {
                    controller.suspend();
                }
            }
            return;
        }
        for (mut controller, mut transform) in cameras.iter_mut() {
            let frame = FrameInputs::collect(&inputs, controller.hand_tracks());
            let dt = controller.config().clamp_delta(time.delta());
            let moved = controller.step(&frame, dt);
            let target = controller.pose().apply_to(&transform);
            let changed = transform.set_if_neq(target);
            if moved || changed {
                redraw.write(RequestRedraw);
            }
        }
    }
}

/// Controls which input channels may move the camera.
#[derive(Debug, Clone, Reflect)]
pub struct EnabledMotion {
    /// Should controller sticks orbit and dolly?
    pub controllers: bool,
    /// Should pinching hands orbit and dolly?
    pub hands: bool,
}

impl Default for EnabledMotion {
    fn default() -> Self {
        Self {
            controllers: true,
            hands: true,
        }
    }
}
