// Host-side tests for the gesture classifier.

use glam::Vec2;
use particle_core::*;

/// A hand with the wrist at `wrist`, the four fingertips straight above it at
/// `openness`, and the thumb `pinch` to the left of the index tip.
fn hand(wrist: Vec2, openness: f32, pinch: f32) -> HandLandmarks {
    let tip = wrist - Vec2::new(0.0, openness);
    HandLandmarks {
        wrist,
        thumb_tip: tip - Vec2::new(pinch, 0.0),
        index_tip: tip,
        middle_mcp: wrist - Vec2::new(0.0, openness * 0.4),
        middle_tip: tip,
        ring_tip: tip,
        pinky_tip: tip,
    }
}

fn classify_default(hands: &[HandLandmarks]) -> Classification {
    classify(hands, &GestureThresholds::default())
}

#[test]
fn two_hands_with_touching_tips_make_a_heart() {
    let left = hand(Vec2::new(0.40, 0.9), 0.4, 0.1);
    let mut right = hand(Vec2::new(0.60, 0.9), 0.4, 0.1);
    right.index_tip = left.index_tip + Vec2::new(0.1, 0.0);
    right.thumb_tip = left.thumb_tip + Vec2::new(0.0, 0.1);
    let c = classify_default(&[left, right]);
    assert_eq!(c.state, GestureState::Heart);
    assert_eq!(c.hand_x, None, "heart frames carry no hand position");
}

#[test]
fn closed_hand_is_the_flag() {
    let h = hand(Vec2::new(0.5, 0.8), 0.1, 0.02);
    assert!((h.openness() - 0.1).abs() < 1e-6);
    // a closed fist wins over a pinch
    assert_eq!(classify_default(&[h]).state, GestureState::Flag);
}

#[test]
fn pinch_on_open_hand_is_photo() {
    let h = hand(Vec2::new(0.5, 0.8), 0.4, 0.03);
    let c = classify_default(&[h]);
    assert_eq!(c.state, GestureState::Photo);
    assert_eq!(c.hand_x, Some(0.5));
}

#[test]
fn open_hand_explodes() {
    let h = hand(Vec2::new(0.3, 0.8), 0.5, 0.3);
    let c = classify_default(&[h]);
    assert_eq!(c.state, GestureState::Explode);
    assert_eq!(c.hand_x, Some(0.3));
}

#[test]
fn no_hands_is_the_flag() {
    let c = classify_default(&[]);
    assert_eq!(c.state, GestureState::Flag);
    assert_eq!(c.hand_x, None);
}

#[test]
fn two_hands_apart_fall_back_to_the_first_hand() {
    let open = hand(Vec2::new(0.2, 0.8), 0.5, 0.3);
    let fist = hand(Vec2::new(0.8, 0.8), 0.1, 0.3);
    let c = classify_default(&[open, fist]);
    assert_eq!(c.state, GestureState::Explode);
    assert_eq!(c.hand_x, Some(0.2));
}

#[test]
fn only_the_first_two_hands_count() {
    let left = hand(Vec2::new(0.45, 0.9), 0.4, 0.05);
    let right = left;
    let far = hand(Vec2::new(0.95, 0.1), 0.1, 0.3);
    assert_eq!(
        classify_default(&[left, right, far]).state,
        GestureState::Heart
    );
}

#[test]
fn thresholds_are_strict_and_configurable() {
    let t = GestureThresholds {
        fist_openness: 0.3,
        ..GestureThresholds::default()
    };
    let h = hand(Vec2::new(0.5, 0.8), 0.28, 0.3);
    assert_eq!(classify(&[h], &t).state, GestureState::Flag);
    assert_eq!(classify_default(&[h]).state, GestureState::Explode);
}

#[test]
fn flat_buffer_round_trip_through_the_classifier() {
    let mut flat = vec![0.0f32; LANDMARK_COUNT * 2];
    let set = |flat: &mut Vec<f32>, i: usize, p: Vec2| {
        flat[i * 2] = p.x;
        flat[i * 2 + 1] = p.y;
    };
    set(&mut flat, WRIST, Vec2::new(0.5, 0.9));
    for tip in [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP] {
        set(&mut flat, tip, Vec2::new(0.5, 0.4));
    }
    set(&mut flat, THUMB_TIP, Vec2::new(0.8, 0.5));
    set(&mut flat, MIDDLE_MCP, Vec2::new(0.55, 0.7));
    let hands = hands_from_flat(&flat, 1).expect("one hand");
    let c = classify_default(&hands);
    assert_eq!(c.state, GestureState::Explode);
    assert_eq!(c.hand_x, Some(0.55));
}

#[test]
fn hand_rotation_is_centred() {
    assert_eq!(hand_rotation(DEFAULT_HAND_X, HAND_ROTATION_GAIN), 0.0);
    assert!((hand_rotation(1.0, 4.0) - 2.0).abs() < 1e-6);
    assert!((hand_rotation(0.0, 4.0) + 2.0).abs() < 1e-6);
}
