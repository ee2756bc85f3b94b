// Host-side tests for the tracker-to-render-loop hand-off.

use particle_core::poses::frame_for;
use particle_core::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn scene(stable_samples: u32) -> Scene {
    let mut cfg = SceneConfig::default().with_group_sizes(40, 60);
    cfg.stable_samples = stable_samples;
    Scene::new(cfg, 12).expect("valid config")
}

#[test]
fn newest_posted_gesture_wins() {
    let mut s = scene(1);
    let inbox = s.inbox();
    inbox.submit(&frame_for(GestureState::Explode, 0.3));
    inbox.submit(&frame_for(GestureState::Photo, 0.7));
    assert_eq!(s.frame(0.0), GestureState::Photo);
    assert!((s.animator().hand_x() - 0.7).abs() < 1e-6);
}

#[test]
fn frames_without_samples_keep_the_state() {
    let mut s = scene(1);
    s.inbox().submit(&frame_for(GestureState::Heart, 0.5));
    assert_eq!(s.frame(0.0), GestureState::Heart);
    for i in 1..30 {
        assert_eq!(s.frame(i as f32 / 60.0), GestureState::Heart);
    }
}

#[test]
fn heart_frames_keep_the_last_hand_position() {
    let mut s = scene(1);
    let inbox = s.inbox();
    inbox.submit(&frame_for(GestureState::Explode, 0.9));
    s.frame(0.0);
    inbox.submit(&frame_for(GestureState::Heart, 0.2));
    s.frame(0.1);
    assert_eq!(s.state(), GestureState::Heart);
    assert!((s.animator().hand_x() - 0.9).abs() < 1e-6);
}

#[test]
fn tracker_thread_posts_while_render_loop_reads() {
    let mut s = scene(1);
    let inbox = s.inbox();
    let done = Arc::new(AtomicBool::new(false));
    let tracker = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let cycle = [
                GestureState::Explode,
                GestureState::Photo,
                GestureState::Heart,
                GestureState::Flag,
            ];
            for i in 0..2000 {
                inbox.submit(&frame_for(cycle[i % cycle.len()], 0.5));
            }
            inbox.submit(&frame_for(GestureState::Explode, 0.25));
            done.store(true, Ordering::Release);
        })
    };

    let mut t = 0.0;
    while !done.load(Ordering::Acquire) {
        let state = s.frame(t);
        assert_ne!(state, GestureState::None);
        t += 1.0 / 60.0;
    }
    tracker.join().expect("tracker thread");
    assert_eq!(s.frame(t), GestureState::Explode);
    assert!((s.animator().hand_x() - 0.25).abs() < 1e-6);
}

#[test]
fn debounced_scene_waits_for_a_stable_gesture() {
    let mut s = scene(3);
    let inbox = s.inbox();
    let mut t = 0.0;
    let mut step = |s: &mut Scene, state| {
        inbox.submit(&frame_for(state, 0.5));
        t += 1.0 / 60.0;
        s.frame(t)
    };
    assert_eq!(step(&mut s, GestureState::Explode), GestureState::Flag);
    assert_eq!(step(&mut s, GestureState::Explode), GestureState::Flag);
    assert_eq!(step(&mut s, GestureState::Photo), GestureState::Flag);
    assert_eq!(step(&mut s, GestureState::Photo), GestureState::Flag);
    assert_eq!(step(&mut s, GestureState::Photo), GestureState::Photo);

    // render ticks with no new sample do not count toward the streak
    inbox.submit(&frame_for(GestureState::Heart, 0.5));
    assert_eq!(s.frame(1.0), GestureState::Photo);
    assert_eq!(s.frame(1.1), GestureState::Photo);
    assert_eq!(s.frame(1.2), GestureState::Photo);
}

#[test]
fn status_badge_tracks_state() {
    assert_eq!(GestureState::None.badge(), GestureState::Flag.badge());
    assert!(GestureState::Heart.badge().text.contains("LOVE"));
    assert_ne!(GestureState::Explode.badge(), GestureState::Photo.badge());
}

#[test]
fn one_bad_tracker_sample_does_not_poison_the_photo_ring() {
    let mut s = scene(1);
    let inbox = s.inbox();

    // raw tracker buffers with a NaN never reach the mailbox
    let mut flat = vec![0.5f32; 21 * 2];
    flat[MIDDLE_MCP * 2] = f32::NAN;
    assert!(matches!(
        hands_from_flat(&flat, 1),
        Err(LandmarkError::NonFinite { .. })
    ));

    // hand-built landmarks bypass parsing; the animator ignores the position
    let mut frame = frame_for(GestureState::Explode, 0.5);
    frame[0].middle_mcp.x = f32::NAN;
    inbox.submit(&frame);
    s.frame(0.0);
    assert_eq!(s.state(), GestureState::Explode);
    assert_eq!(s.animator().hand_x(), DEFAULT_HAND_X);

    for i in 1..300 {
        inbox.submit(&frame_for(GestureState::Explode, 0.6));
        s.frame(i as f32 / 60.0);
    }
    for (i, plane) in s.animator().photos().planes().iter().enumerate() {
        assert!(
            plane.position.is_finite() && plane.scale.is_finite(),
            "photo plane {i} at {:?}",
            plane.position
        );
    }
    assert!((s.animator().hand_x() - 0.6).abs() < 1e-6);
}
