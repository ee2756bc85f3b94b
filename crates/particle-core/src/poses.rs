//! Synthetic hand poses in normalized landmark space.
//!
//! Used by the native demo tracker and keyboard shortcuts to drive the scene
//! without a camera, and by tests.

use crate::gesture::{GestureState, HandFrame, HandLandmarks};
use glam::Vec2;
use smallvec::smallvec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Fist,
    Open,
    Pinch,
}

/// One hand centred horizontally on `center_x`, wrist near the bottom of the frame.
pub fn hand(pose: Pose, center_x: f32) -> HandLandmarks {
    let at = |dx: f32, y: f32| Vec2::new(center_x + dx, y);
    match pose {
        Pose::Fist => HandLandmarks {
            wrist: at(0.0, 0.8),
            thumb_tip: at(-0.06, 0.74),
            index_tip: at(-0.03, 0.7),
            middle_mcp: at(0.0, 0.7),
            middle_tip: at(0.0, 0.7),
            ring_tip: at(0.03, 0.7),
            pinky_tip: at(0.06, 0.72),
        },
        Pose::Open => HandLandmarks {
            wrist: at(0.0, 0.8),
            thumb_tip: at(-0.3, 0.55),
            index_tip: at(-0.1, 0.3),
            middle_mcp: at(0.0, 0.6),
            middle_tip: at(0.0, 0.3),
            ring_tip: at(0.1, 0.3),
            pinky_tip: at(0.2, 0.35),
        },
        Pose::Pinch => HandLandmarks {
            thumb_tip: at(-0.08, 0.32),
            ..hand(Pose::Open, center_x)
        },
    }
}

/// Two open hands whose index tips and thumb tips nearly touch.
pub fn heart_pair(center_x: f32) -> [HandLandmarks; 2] {
    let side = |dx: f32| HandLandmarks {
        index_tip: Vec2::new(center_x + dx, 0.4),
        thumb_tip: Vec2::new(center_x + dx, 0.6),
        ..hand(Pose::Open, center_x + dx * 4.0)
    };
    [side(-0.05), side(0.05)]
}

/// A tracker frame that classifies as `state` with default thresholds.
pub fn frame_for(state: GestureState, center_x: f32) -> HandFrame {
    match state {
        GestureState::Flag => smallvec![hand(Pose::Fist, center_x)],
        GestureState::Heart => HandFrame::from_iter(heart_pair(center_x)),
        GestureState::Explode => smallvec![hand(Pose::Open, center_x)],
        GestureState::Photo => smallvec![hand(Pose::Pinch, center_x)],
        GestureState::None => HandFrame::new(),
    }
}
