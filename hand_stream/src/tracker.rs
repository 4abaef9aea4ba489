//! Edge-triggered finger-state tracker — the one stateful component.
//!
//! Seven boolean slots persist across frames, one per monitored
//! (hand, finger) pair: `slot = finger + hand * 4`. A trigger is emitted
//! only on an up→down transition, so holding a finger curled plays nothing
//! until it has been seen extended again.
//!
//! Two behaviors are load-bearing and intentionally preserved:
//!
//! * slot 3 is never written or triggered (the hand-0 block spans slots
//!   0–2 and the hand-1 block starts at 4);
//! * slots of a hand absent from the current frame keep their last value
//!   rather than resetting, so a hand that leaves curled and returns still
//!   curled does not re-trigger.

use crate::classifier::{finger_down, Finger};
use crate::landmark::HandObservation;

/// Slots reserved per hand; only the first three are used.
pub const SLOTS_PER_HAND: usize = 4;

/// Total slots (hand 0 → 0–2, hand 1 → 4–6, slot 3 unused).
pub const SLOT_COUNT: usize = 7;

/// Observations beyond this many hands per frame are ignored.
pub const MAX_HANDS: usize = 2;

// ════════════════════════════════════════════════════════════════════════════
// NoteTrigger
// ════════════════════════════════════════════════════════════════════════════

/// One up→down transition of a monitored finger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteTrigger {
    /// Position of the hand in this frame's detection list (0 or 1).
    pub hand: usize,
    pub finger: Finger,
}

impl NoteTrigger {
    /// Slot index, which is also the sample index to play.
    pub fn slot(&self) -> usize {
        self.finger.offset() + self.hand * SLOTS_PER_HAND
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FingerTracker
// ════════════════════════════════════════════════════════════════════════════

/// Persistent per-slot down state; see the module docs for the transition
/// rules.
#[derive(Clone, Debug, Default)]
pub struct FingerTracker {
    down: [bool; SLOT_COUNT],
}

impl FingerTracker {
    pub fn new() -> Self {
        FingerTracker::default()
    }

    /// Feed one frame's hand observations and collect the triggers fired by
    /// this frame, in (hand, finger) order.
    ///
    /// At most [`MAX_HANDS`] observations are consumed; slots belonging to
    /// hands not present in `hands` are left untouched.
    pub fn observe(&mut self, hands: &[HandObservation]) -> Vec<NoteTrigger> {
        let mut triggers = Vec::new();

        for (hand_idx, hand) in hands.iter().take(MAX_HANDS).enumerate() {
            for finger in Finger::MONITORED {
                let slot = finger.offset() + hand_idx * SLOTS_PER_HAND;
                if finger_down(hand, finger) {
                    if !self.down[slot] {
                        self.down[slot] = true;
                        triggers.push(NoteTrigger { hand: hand_idx, finger });
                    }
                } else {
                    self.down[slot] = false;
                }
            }
        }

        triggers
    }

    /// Current state of a slot.
    pub fn is_down(&self, slot: usize) -> bool {
        self.down[slot]
    }

    /// Forget all state, as at program start.
    pub fn reset(&mut self) {
        self.down = [false; SLOT_COUNT];
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
