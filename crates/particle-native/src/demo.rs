//! Stand-in hand tracker for the desktop build.
//!
//! A background thread cycles through the gestures, posting synthetic hand
//! poses into the scene's inbox at roughly camera rate. Landmarks get a little
//! jitter so the classifier sees tracker-like input rather than fixed points.

use glam::Vec2;
use particle_core::poses::frame_for;
use particle_core::{GestureInbox, GestureState, HandLandmarks};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const SAMPLE_INTERVAL: Duration = Duration::from_millis(33);
const HOLD_SECS: f32 = 3.0;
const JITTER: f32 = 0.004;
const CYCLE: [GestureState; 4] = [
    GestureState::Flag,
    GestureState::Explode,
    GestureState::Photo,
    GestureState::Heart,
];

fn jitter<R: Rng>(hand: &mut HandLandmarks, rng: &mut R) {
    for p in [
        &mut hand.wrist,
        &mut hand.thumb_tip,
        &mut hand.index_tip,
        &mut hand.middle_mcp,
        &mut hand.middle_tip,
        &mut hand.ring_tip,
        &mut hand.pinky_tip,
    ] {
        *p += Vec2::new(rng.gen_range(-JITTER..JITTER), rng.gen_range(-JITTER..JITTER));
    }
}

/// Spawn the demo tracker. It posts only while `enabled` is set and exits
/// once `shutdown` is set.
pub fn spawn(
    inbox: GestureInbox,
    enabled: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("gesture-demo".into())
        .spawn(move || {
            let mut rng = rand::thread_rng();
            let start = Instant::now();
            let mut last_state = None;
            while !shutdown.load(Ordering::Acquire) {
                if enabled.load(Ordering::Acquire) {
                    let t = start.elapsed().as_secs_f32();
                    let state = CYCLE[(t / HOLD_SECS) as usize % CYCLE.len()];
                    // sweep the hand so the exploded cloud turns
                    let center_x = 0.5 + 0.3 * (t * 0.7).sin();
                    let mut hands = frame_for(state, center_x);
                    for hand in hands.iter_mut() {
                        jitter(hand, &mut rng);
                    }
                    let c = inbox.submit(&hands);
                    if last_state != Some(c.state) {
                        log::debug!("[demo] posting {}", c.state.as_str());
                        last_state = Some(c.state);
                    }
                }
                thread::sleep(SAMPLE_INTERVAL);
            }
        })
}
