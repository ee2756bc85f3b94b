//! Single-slot, latest-value-wins hand-off from the hand tracker to the render loop.
//!
//! The whole classification (state + optional hand x) is packed into one
//! `AtomicU64`, so a post is a single store and a read is a single swap. Older
//! unread samples are simply overwritten.

use crate::config::GestureThresholds;
use crate::gesture::{classify, Classification, GestureState, HandLandmarks};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const OCCUPIED: u64 = 1 << 41;
const HAS_HAND_X: u64 = 1 << 40;
const STATE_SHIFT: u32 = 32;

fn pack(c: Classification) -> u64 {
    let mut bits = OCCUPIED | (u64::from(c.state.code()) << STATE_SHIFT);
    if let Some(x) = c.hand_x {
        bits |= HAS_HAND_X | u64::from(x.to_bits());
    }
    bits
}

fn unpack(bits: u64) -> Option<Classification> {
    if bits & OCCUPIED == 0 {
        return None;
    }
    let state = GestureState::from_code(((bits >> STATE_SHIFT) & 0xFF) as u8);
    let hand_x = (bits & HAS_HAND_X != 0).then(|| f32::from_bits(bits as u32));
    Some(Classification { state, hand_x })
}

#[derive(Debug, Default)]
pub struct GestureMailbox {
    slot: AtomicU64,
}

impl GestureMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is waiting with `c`.
    pub fn post(&self, c: Classification) {
        self.slot.store(pack(c), Ordering::Release);
    }

    /// Take the newest unread classification, leaving the slot empty.
    pub fn take(&self) -> Option<Classification> {
        unpack(self.slot.swap(0, Ordering::AcqRel))
    }

    /// Read the newest unread classification without consuming it.
    pub fn peek(&self) -> Option<Classification> {
        unpack(self.slot.load(Ordering::Acquire))
    }
}

/// Tracker-side handle: classifies raw hands and posts the result.
///
/// Cheap to clone and `Send + Sync`, so it can live in a tracker callback or
/// on another thread while the scene stays with the render loop.
#[derive(Clone, Debug)]
pub struct GestureInbox {
    mailbox: Arc<GestureMailbox>,
    thresholds: GestureThresholds,
}

impl GestureInbox {
    pub fn new(mailbox: Arc<GestureMailbox>, thresholds: GestureThresholds) -> Self {
        Self {
            mailbox,
            thresholds,
        }
    }

    /// Classify one tracker frame and post it. Returns what was posted.
    pub fn submit(&self, hands: &[HandLandmarks]) -> Classification {
        let c = classify(hands, &self.thresholds);
        self.mailbox.post(c);
        c
    }

    /// Post an already classified state (keyboard overrides, scripted demos).
    pub fn post(&self, c: Classification) {
        self.mailbox.post(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_reads_none() {
        let m = GestureMailbox::new();
        assert_eq!(m.take(), None);
        assert_eq!(m.peek(), None);
    }

    #[test]
    fn pack_preserves_hand_x_bits() {
        for x in [0.0f32, -0.0, 0.123_456, 1.0, f32::MIN_POSITIVE] {
            let c = Classification {
                state: GestureState::Explode,
                hand_x: Some(x),
            };
            let back = unpack(pack(c)).expect("occupied");
            assert_eq!(back.state, GestureState::Explode);
            assert_eq!(back.hand_x.map(f32::to_bits), Some(x.to_bits()));
        }
        let c = Classification {
            state: GestureState::Heart,
            hand_x: None,
        };
        assert_eq!(unpack(pack(c)), Some(c));
    }

    #[test]
    fn newest_value_wins_and_take_empties() {
        let m = GestureMailbox::new();
        m.post(Classification {
            state: GestureState::Explode,
            hand_x: Some(0.2),
        });
        m.post(Classification {
            state: GestureState::Photo,
            hand_x: Some(0.7),
        });
        assert_eq!(m.peek().map(|c| c.state), Some(GestureState::Photo));
        let c = m.take().expect("posted");
        assert_eq!(c.state, GestureState::Photo);
        assert_eq!(c.hand_x, Some(0.7));
        assert_eq!(m.take(), None);
    }
}
