//! Hand gesture classification.
//!
//! The hand tracker reports 21 normalized 2D keypoints per hand. They are
//! converted once, at the boundary, into [`HandLandmarks`] so the classifier
//! works with named points instead of array offsets.

use crate::config::GestureThresholds;
use crate::constants::DEFAULT_HAND_X;
use glam::Vec2;
use smallvec::SmallVec;
use thiserror::Error;

// Keypoint indices of the tracker's 21-point hand model.
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

#[derive(Debug, Error, PartialEq)]
pub enum LandmarkError {
    #[error("expected 21 landmarks per hand, got {0}")]
    WrongCount(usize),
    #[error("landmark stride must be 2 (x, y) or 3 (x, y, z), got {0}")]
    BadStride(usize),
    #[error("{len} floats do not split into {hands} hands of 21 x {stride}")]
    BadLength {
        len: usize,
        hands: usize,
        stride: usize,
    },
    #[error("at most two hands are supported, got {0}")]
    TooManyHands(usize),
    #[error("landmark {index} is not a finite coordinate")]
    NonFinite { index: usize },
}

/// The keypoints of one hand that gesture classification reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmarks {
    pub wrist: Vec2,
    pub thumb_tip: Vec2,
    pub index_tip: Vec2,
    pub middle_mcp: Vec2,
    pub middle_tip: Vec2,
    pub ring_tip: Vec2,
    pub pinky_tip: Vec2,
}

impl HandLandmarks {
    /// Mean wrist-to-fingertip distance over the four non-thumb fingers.
    pub fn openness(&self) -> f32 {
        let tips = [self.index_tip, self.middle_tip, self.ring_tip, self.pinky_tip];
        tips.iter().map(|t| t.distance(self.wrist)).sum::<f32>() / tips.len() as f32
    }

    /// Thumb tip to index tip distance.
    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip.distance(self.index_tip)
    }

    /// Parse one hand from interleaved floats (`stride` 2 or 3 per point, z ignored).
    pub fn from_flat(values: &[f32], stride: usize) -> Result<Self, LandmarkError> {
        if stride != 2 && stride != 3 {
            return Err(LandmarkError::BadStride(stride));
        }
        if values.len() % stride != 0 {
            return Err(LandmarkError::BadLength {
                len: values.len(),
                hands: 1,
                stride,
            });
        }
        let points = values
            .chunks_exact(stride)
            .map(|c| Vec2::new(c[0], c[1]))
            .collect::<SmallVec<[Vec2; LANDMARK_COUNT]>>();
        Self::try_from(points.as_slice())
    }
}

impl TryFrom<&[Vec2]> for HandLandmarks {
    type Error = LandmarkError;

    fn try_from(points: &[Vec2]) -> Result<Self, Self::Error> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(Self {
            wrist: points[WRIST],
            thumb_tip: points[THUMB_TIP],
            index_tip: points[INDEX_TIP],
            middle_mcp: points[MIDDLE_MCP],
            middle_tip: points[MIDDLE_TIP],
            ring_tip: points[RING_TIP],
            pinky_tip: points[PINKY_TIP],
        })
    }
}

/// Hands seen in one tracker frame.
pub type HandFrame = SmallVec<[HandLandmarks; 2]>;

/// Parse `hand_count` hands from one flat buffer of `hand_count * 21 * stride` floats.
pub fn hands_from_flat(values: &[f32], hand_count: usize) -> Result<HandFrame, LandmarkError> {
    if hand_count > 2 {
        return Err(LandmarkError::TooManyHands(hand_count));
    }
    if hand_count == 0 {
        return if values.is_empty() {
            Ok(HandFrame::new())
        } else {
            Err(LandmarkError::BadLength {
                len: values.len(),
                hands: 0,
                stride: 0,
            })
        };
    }
    let per_hand = values.len() / hand_count;
    let stride = per_hand / LANDMARK_COUNT;
    if per_hand * hand_count != values.len()
        || stride * LANDMARK_COUNT != per_hand
        || !(2..=3).contains(&stride)
    {
        return Err(LandmarkError::BadLength {
            len: values.len(),
            hands: hand_count,
            stride,
        });
    }
    values
        .chunks_exact(per_hand)
        .map(|hand| HandLandmarks::from_flat(hand, stride))
        .collect()
}

/// Discrete scene state driven by the latest gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Flag,
    Heart,
    Explode,
    Photo,
    /// Nothing classified yet; rendered exactly like `Flag`.
    None,
}

impl GestureState {
    pub const ALL: [GestureState; 5] = [
        GestureState::Flag,
        GestureState::Heart,
        GestureState::Explode,
        GestureState::Photo,
        GestureState::None,
    ];

    /// Collapse `None` onto the idle state.
    pub fn resolved(self) -> Self {
        match self {
            GestureState::None => GestureState::Flag,
            s => s,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GestureState::Flag => "FLAG",
            GestureState::Heart => "HEART",
            GestureState::Explode => "EXPLODE",
            GestureState::Photo => "PHOTO",
            GestureState::None => "NONE",
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            GestureState::Flag => 0,
            GestureState::Heart => 1,
            GestureState::Explode => 2,
            GestureState::Photo => 3,
            GestureState::None => 4,
        }
    }

    pub(crate) fn from_code(code: u8) -> Self {
        match code {
            0 => GestureState::Flag,
            1 => GestureState::Heart,
            2 => GestureState::Explode,
            3 => GestureState::Photo,
            _ => GestureState::None,
        }
    }
}

/// Result of classifying one tracker frame.
///
/// `hand_x` is the primary hand's middle-finger base x coordinate. It is only
/// reported when the single-hand branch ran, so the animator keeps its last
/// value through heart gestures and empty frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub state: GestureState,
    pub hand_x: Option<f32>,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            state: GestureState::Flag,
            hand_x: None,
        }
    }
}

/// Classify the hands of one frame. Only the first two hands are considered.
pub fn classify(hands: &[HandLandmarks], t: &GestureThresholds) -> Classification {
    if let [a, b, ..] = hands {
        let index_gap = a.index_tip.distance(b.index_tip);
        let thumb_gap = a.thumb_tip.distance(b.thumb_tip);
        if index_gap < t.heart_index && thumb_gap < t.heart_thumb {
            return Classification {
                state: GestureState::Heart,
                hand_x: None,
            };
        }
    }

    let Some(hand) = hands.first() else {
        return Classification::default();
    };

    let state = if hand.openness() < t.fist_openness {
        GestureState::Flag
    } else if hand.pinch_distance() < t.pinch {
        GestureState::Photo
    } else {
        GestureState::Explode
    };
    Classification {
        state,
        hand_x: Some(hand.middle_mcp.x),
    }
}

/// Rotation target in radians for a horizontal hand position.
pub fn hand_rotation(hand_x: f32, gain: f32) -> f32 {
    (hand_x - DEFAULT_HAND_X) * gain
}

/// Optional smoothing: a new state must be seen on `required` consecutive
/// samples before it replaces the current one. `required <= 1` passes every
/// sample straight through.
#[derive(Clone, Debug)]
pub struct GestureDebouncer {
    required: u32,
    current: GestureState,
    candidate: GestureState,
    streak: u32,
}

impl GestureDebouncer {
    pub fn new(required: u32) -> Self {
        Self {
            required,
            current: GestureState::Flag,
            candidate: GestureState::Flag,
            streak: 0,
        }
    }

    pub fn current(&self) -> GestureState {
        self.current
    }

    pub fn push(&mut self, state: GestureState) -> GestureState {
        if self.required <= 1 || state == self.current {
            self.current = state;
            self.candidate = state;
            self.streak = 0;
            return self.current;
        }
        if state == self.candidate {
            self.streak += 1;
        } else {
            self.candidate = state;
            self.streak = 1;
        }
        if self.streak >= self.required {
            log::debug!(
                "[gesture] {} held for {} samples",
                state.as_str(),
                self.streak
            );
            self.current = state;
            self.streak = 0;
        }
        self.current
    }
}
