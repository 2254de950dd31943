//! The device boundary of the controller.
//!
//! An XR backend writes raw device state into [`XrInputState`] once per frame, before
//! [`PreUpdate`](bevy_app::PreUpdate). The controller never talks to devices directly: at the top of
//! each frame it takes a [`FrameInputs`] snapshot of that resource, and everything downstream reads
//! the snapshot.

use bevy_ecs::prelude::*;
use bevy_input::{ButtonInput, ButtonState};
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

use super::gesture::HandTracks;

/// Which hand a device is held in, or tracks. Doubles as the stable slot index of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Side {
    /// Slot 0.
    Left,
    /// Slot 1.
    Right,
}

impl Side {
    /// Both sides, in slot order.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// The slot index of this side.
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Raw state of one connected controller with a gamepad, as reported by the XR runtime.
///
/// Axes and buttons follow the `xr-standard` gamepad mapping: axes `0, 1` are a touchpad or the
/// only stick, axes `2, 3` the thumbstick, and button `0` the trigger ("select").
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ControllerSource {
    /// The hand holding the controller.
    pub handedness: Side,
    /// Axis values, nominally in `[-1, 1]`. Missing entries read as zero.
    pub axes: Vec<f32>,
    /// Pressed state of each button.
    pub buttons: Vec<bool>,
}

impl ControllerSource {
    /// A controller with no axes and no buttons.
    pub fn new(handedness: Side) -> Self {
        Self {
            handedness,
            axes: Vec::new(),
            buttons: Vec::new(),
        }
    }

    /// Set the axis array.
    pub fn with_axes(mut self, axes: impl Into<Vec<f32>>) -> Self {
        self.axes = axes.into();
        self
    }

    /// Set the button array.
    pub fn with_buttons(mut self, buttons: impl Into<Vec<bool>>) -> Self {
        self.buttons = buttons.into();
        self
    }
}

/// Raw state of one tracked hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct HandSource {
    /// Is the hand currently tracked? An untracked hand contributes nothing.
    pub tracked: bool,
    /// World space position of the hand.
    pub world_position: Vec3,
    /// Latest pinch state. Usually maintained by [`PinchEvent::receive`].
    pub is_pinching: bool,
}

/// Device state for the current frame. Written by the XR backend, read by the controller.
#[derive(Debug, Clone, Default, Resource, Reflect)]
pub struct XrInputState {
    /// Is an immersive session running? Outside of a session, the controller leaves the camera
    /// alone.
    pub session_active: bool,
    /// Every connected controller that has a gamepad.
    pub controllers: Vec<ControllerSource>,
    /// Tracked hands, indexed by [`Side::index`].
    pub hands: [HandSource; 2],
}

impl XrInputState {
    /// The hand in the given slot.
    pub fn hand(&self, side: Side) -> &HandSource {
        &self.hands[side.index()]
    }

    /// Mutable access to the hand in the given slot.
    pub fn hand_mut(&mut self, side: Side) -> &mut HandSource {
        &mut self.hands[side.index()]
    }
}

/// A pinch began or ended on one hand.
///
/// XR runtimes deliver pinches as discrete begin and end signals. Send one of these for each, and
/// [`PinchEvent::receive`] folds them into [`HandSource::is_pinching`] before the controller samples
/// the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct PinchEvent {
    /// The pinching hand.
    pub side: Side,
    /// [`ButtonState::Pressed`] when the pinch begins, [`ButtonState::Released`] when it ends.
    pub state: ButtonState,
}

impl PinchEvent {
    /// Buffer pinch signals into the hand state. Only the latest signal per hand matters.
    pub fn receive(mut events: EventReader<Self>, mut inputs: ResMut<XrInputState>) {
        for event in events.read() {
            let hand = inputs.hand_mut(event.side);
            let is_pinching = event.state.is_pressed();
            if hand.is_pinching != is_pinching {
                debug!("{:?} hand pinch {:?}", event.side, event.state);
            }
            hand.is_pinching = is_pinching;
        }
    }
}

/// The select button of a controller was pressed this frame.
///
/// The controller does not pick anything itself; this is for a picking collaborator that wants to
/// cast a ray from the controller. Per-side select state is also available as the
/// `ButtonInput<Side>` resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct ControllerSelect {
    /// The hand holding the controller that was pressed.
    pub side: Side,
}

impl ControllerSelect {
    /// Update the `ButtonInput<Side>` select state and send an event for every new press.
    pub fn update(
        inputs: Res<XrInputState>,
        mut select: ResMut<ButtonInput<Side>>,
        mut writer: EventWriter<Self>,
    ) {
        select.clear();
        for side in Side::ALL {
            let pressed = inputs.session_active
                && inputs
                    .controllers
                    .iter()
                    .filter(|source| source.handedness == side)
                    .any(|source| ControllerSample::from_source(source).select_pressed);
            if pressed {
                select.press(side);
            } else {
                select.release(side);
            }
            if select.just_pressed(side) {
                writer.write(ControllerSelect { side });
            }
        }
    }
}

/// The per-frame reading of one controller, after axis mapping and sanitizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSample {
    /// The hand holding the controller.
    pub handedness: Side,
    /// The orbit stick, each axis in `[-1, 1]`.
    pub axis_pair: Vec2,
    /// Vertical axis of the secondary stick, used for dolly. Only present on controllers that
    /// expose both a touchpad and a thumbstick, so the orbit stick never also dollies.
    pub secondary_y: Option<f32>,
    /// Is the select button held?
    pub select_pressed: bool,
}

impl ControllerSample {
    /// Map a raw controller onto a sample. Never fails: missing axes read as zero.
    pub fn from_source(source: &ControllerSource) -> Self {
        let axis = |index: usize| source.axes.get(index).copied();
        let x = axis(2).or_else(|| axis(0)).map(sanitize_axis).unwrap_or(0.0);
        let y = axis(3).or_else(|| axis(1)).map(sanitize_axis).unwrap_or(0.0);
        let secondary_y = (source.axes.len() >= 4)
            .then(|| axis(1))
            .flatten()
            .map(sanitize_axis);
        Self {
            handedness: source.handedness,
            axis_pair: Vec2::new(x, y),
            secondary_y,
            select_pressed: source.buttons.first().copied().unwrap_or(false),
        }
    }
}

/// The per-frame reading of one tracked hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSample {
    /// Was the hand pinching when the frame was sampled?
    pub is_pinching: bool,
    /// World space hand position. Always finite.
    pub world_position: Vec3,
    /// Was this hand also sampled in the previous frame? When it was not, the hand's last known
    /// position is stale and must not be used to compute motion.
    pub has_prior_sample: bool,
}

/// A snapshot of every active input source for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInputs {
    /// Samples of active controllers, in the order the runtime reported them.
    pub controllers: Vec<ControllerSample>,
    /// One slot per hand, empty when that hand is not tracked.
    pub hands: [Option<HandSample>; 2],
}

impl FrameInputs {
    /// Snapshot `inputs`. `tracks` provides continuity with the previous frame: whether a hand was
    /// tracked before, and a fallback position if the runtime reports a non-finite one.
    ///
    /// Outside of an active session, the snapshot is empty.
    pub fn collect(inputs: &XrInputState, tracks: &HandTracks) -> Self {
        if !inputs.session_active {
            return Self::default();
        }
        let controllers = inputs
            .controllers
            .iter()
            .map(ControllerSample::from_source)
            .collect();
        let hands = Side::ALL.map(|side| {
            let source = inputs.hand(side);
            if !source.tracked {
                return None;
            }
            let track = &tracks[side];
            let world_position = if source.world_position.is_finite() {
                source.world_position
            } else {
                warn_once!("Hand tracking reported a non-finite position, ignoring it.");
                track.current_position
            };
            Some(HandSample {
                is_pinching: source.is_pinching,
                world_position,
                has_prior_sample: track.tracked,
            })
        });
        Self { controllers, hands }
    }

    /// The sample of the given hand, if it is tracked.
    pub fn hand(&self, side: Side) -> Option<&HandSample> {
        self.hands[side.index()].as_ref()
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        warn_once!("A controller reported a non-finite axis value, treating it as zero.");
        0.0
    }
}
