//! Hand gesture tracking and classification.
//!
//! [`HandTracks`] carries per-hand state across frames, and [`InteractionMode`] is the gesture
//! derived from it each frame.

use core::ops::{Index, IndexMut};

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

use super::inputs::{FrameInputs, HandSample, Side};

/// What the hands are doing to the camera this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum InteractionMode {
    /// No hand is pinching.
    #[default]
    Idle,
    /// Exactly one hand is pinching, and its motion orbits the camera.
    SingleOrbit(Side),
    /// Both hands are pinching, and their combined forward/backward motion dollies the camera.
    DualDolly,
}

impl InteractionMode {
    /// Classify the two pinch signals of one frame. Level based: only the current values matter.
    pub fn classify(left_pinch: bool, right_pinch: bool) -> Self {
        match (left_pinch, right_pinch) {
            (false, false) => Self::Idle,
            (true, false) => Self::SingleOrbit(Side::Left),
            (false, true) => Self::SingleOrbit(Side::Right),
            (true, true) => Self::DualDolly,
        }
    }

    /// Classify the pinch state captured in `tracks`.
    pub fn from_tracks(tracks: &HandTracks) -> Self {
        Self::classify(
            tracks[Side::Left].is_pinching,
            tracks[Side::Right].is_pinching,
        )
    }

    /// Are no hands steering the camera?
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Is the camera being orbited by a hand?
    pub fn is_orbiting(&self) -> bool {
        matches!(self, Self::SingleOrbit(_))
    }

    /// Is the camera being dollied by both hands?
    pub fn is_dollying(&self) -> bool {
        matches!(self, Self::DualDolly)
    }

    /// Does this mode consume motion from the given hand?
    pub fn uses(&self, side: Side) -> bool {
        match self {
            Self::Idle => false,
            Self::SingleOrbit(s) => *s == side,
            Self::DualDolly => true,
        }
    }
}

/// State of one tracked hand that persists across frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct HandTrack {
    /// Position at the last frame this hand's motion was consumed.
    pub last_position: Vec3,
    /// Position in the current frame.
    pub current_position: Vec3,
    /// Pinch state in the current frame.
    pub is_pinching: bool,
    /// Pinch state in the previous frame.
    pub was_pinching: bool,
    /// Has a position been recorded as a baseline for motion? Until it has, the hand contributes
    /// no motion.
    pub initialized: bool,
    /// Was the hand tracked in the current frame?
    pub tracked: bool,
}

impl HandTrack {
    /// Record this frame's sample. Absent hands are treated as not pinching.
    pub fn observe(&mut self, sample: Option<&HandSample>) {
        self.was_pinching = self.is_pinching;
        self.tracked = sample.is_some();
        match sample {
            Some(sample) => {
                if !sample.has_prior_sample {
                    // Tracking was lost, `last_position` is stale.
                    self.initialized = false;
                }
                self.current_position = sample.world_position;
                self.is_pinching = sample.is_pinching;
            }
            None => self.is_pinching = false,
        }
    }

    /// Did a pinch begin this frame?
    pub fn pinch_started(&self) -> bool {
        self.is_pinching && !self.was_pinching
    }

    /// Did a pinch end this frame?
    pub fn pinch_ended(&self) -> bool {
        !self.is_pinching && self.was_pinching
    }

    /// Motion since the last consumed frame.
    ///
    /// Zero until the hand has a baseline, and on the frame a pinch begins: the last consumed
    /// position may date from a previous pinch, and the hand has moved freely since.
    pub fn pending_delta(&self) -> Vec3 {
        if !self.initialized || self.pinch_started() {
            Vec3::ZERO
        } else {
            self.current_position - self.last_position
        }
    }

    /// Mark this frame's motion as consumed. Call at most once per frame, after every read.
    pub(crate) fn consume(&mut self) {
        self.last_position = self.current_position;
        self.initialized = true;
    }
}

/// Per-hand tracking state, indexed by [`Side`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct HandTracks(pub [HandTrack; 2]);

impl HandTracks {
    /// Record the hand samples of a frame.
    pub fn observe(&mut self, frame: &FrameInputs) {
        for side in Side::ALL {
            self[side].observe(frame.hand(side));
        }
    }
}

impl Index<Side> for HandTracks {
    type Output = HandTrack;

    fn index(&self, side: Side) -> &Self::Output {
        &self.0[side.index()]
    }
}

impl IndexMut<Side> for HandTracks {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.0[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(position: Vec3, is_pinching: bool) -> HandSample {
        HandSample {
            is_pinching,
            world_position: position,
            has_prior_sample: true,
        }
    }

    #[test]
    fn classification_table() {
        use InteractionMode::*;
        assert_eq!(InteractionMode::classify(false, false), Idle);
        assert_eq!(InteractionMode::classify(true, false), SingleOrbit(Side::Left));
        assert_eq!(InteractionMode::classify(false, true), SingleOrbit(Side::Right));
        assert_eq!(InteractionMode::classify(true, true), DualDolly);
    }

    #[test]
    fn mode_uses_hands() {
        let mode = InteractionMode::SingleOrbit(Side::Left);
        assert!(mode.uses(Side::Left));
        assert!(!mode.uses(Side::Right));
        assert!(mode.is_orbiting());
        assert!(InteractionMode::DualDolly.uses(Side::Right));
        assert!(!InteractionMode::Idle.uses(Side::Left));
    }

    #[test]
    fn edges_are_tracked() {
        let mut track = HandTrack::default();
        track.observe(Some(&sample(Vec3::ZERO, true)));
        assert!(track.pinch_started());
        track.observe(Some(&sample(Vec3::ZERO, true)));
        assert!(!track.pinch_started());
        assert!(!track.pinch_ended());
        track.observe(Some(&sample(Vec3::ZERO, false)));
        assert!(track.pinch_ended());
    }

    #[test]
    fn lost_hand_stops_pinching() {
        let mut track = HandTrack::default();
        track.observe(Some(&sample(Vec3::ONE, true)));
        track.observe(None);
        assert!(!track.is_pinching);
        assert!(!track.tracked);
        assert_eq!(track.current_position, Vec3::ONE);
    }

    #[test]
    fn delta_requires_baseline() {
        let mut track = HandTrack::default();
        track.observe(Some(&sample(Vec3::new(0.3, 0.0, 0.0), true)));
        assert_eq!(track.pending_delta(), Vec3::ZERO);
        track.consume();
        assert!(track.initialized);

        track.observe(Some(&sample(Vec3::new(0.5, 0.1, 0.0), true)));
        let delta = track.pending_delta();
        assert!((delta - Vec3::new(0.2, 0.1, 0.0)).length() < 1e-6);
    }

    #[test]
    fn new_pinch_discards_stale_baseline() {
        let mut track = HandTrack::default();
        track.observe(Some(&sample(Vec3::ZERO, true)));
        track.consume();
        track.observe(Some(&sample(Vec3::ZERO, false)));
        // The hand moves a long way while not pinching, then pinches again.
        track.observe(Some(&sample(Vec3::new(1.0, 1.0, 0.0), true)));
        assert_eq!(track.pending_delta(), Vec3::ZERO);
    }

    #[test]
    fn reacquired_hand_loses_baseline() {
        let mut track = HandTrack::default();
        track.observe(Some(&sample(Vec3::ZERO, true)));
        track.consume();
        track.observe(Some(&HandSample {
            has_prior_sample: false,
            ..sample(Vec3::X, true)
        }));
        assert!(!track.initialized);
        assert_eq!(track.pending_delta(), Vec3::ZERO);
    }
}
