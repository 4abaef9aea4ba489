//! Finger position classifier.
//!
//! One rule: a finger is "down" (curled) when its fingertip sits visually
//! below its base knuckle, i.e. `tip.y > mcp.y` under image coordinates
//! where y grows downward. No hysteresis, no angle analysis. This is a
//! deliberate heuristic and misclassifies sideways or upside-down hands.

use crate::landmark::{index, HandObservation};

/// The three fingers monitored per hand. Thumb and pinky are tracked by the
/// model but never classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
}

impl Finger {
    /// All monitored fingers, in slot order.
    pub const MONITORED: [Finger; 3] = [Finger::Index, Finger::Middle, Finger::Ring];

    /// Landmark index of the fingertip.
    pub fn tip(self) -> usize {
        match self {
            Finger::Index => index::INDEX_FINGER_TIP,
            Finger::Middle => index::MIDDLE_FINGER_TIP,
            Finger::Ring => index::RING_FINGER_TIP,
        }
    }

    /// Landmark index of the base knuckle (MCP).
    pub fn knuckle(self) -> usize {
        match self {
            Finger::Index => index::INDEX_FINGER_MCP,
            Finger::Middle => index::MIDDLE_FINGER_MCP,
            Finger::Ring => index::RING_FINGER_MCP,
        }
    }

    /// Position of this finger within a hand's slot block (0–2).
    pub fn offset(self) -> usize {
        match self {
            Finger::Index => 0,
            Finger::Middle => 1,
            Finger::Ring => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
        }
    }
}

/// True when `finger` on `hand` is classified as curled down.
pub fn finger_down(hand: &HandObservation, finger: Finger) -> bool {
    hand.point(finger.tip()).y > hand.point(finger.knuckle()).y
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT};

    fn hand_with(finger: Finger, tip_y: f32, knuckle_y: f32) -> HandObservation {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points[finger.tip()] = Landmark::new(0.5, tip_y);
        points[finger.knuckle()] = Landmark::new(0.5, knuckle_y);
        HandObservation::new(points)
    }

    #[test]
    fn tip_above_knuckle_is_up() {
        // tip.y = 0.30 is physically higher in the image than mcp.y = 0.50
        let hand = hand_with(Finger::Index, 0.30, 0.50);
        assert!(!finger_down(&hand, Finger::Index));
    }

    #[test]
    fn tip_below_knuckle_is_down() {
        let hand = hand_with(Finger::Index, 0.70, 0.50);
        assert!(finger_down(&hand, Finger::Index));
    }

    #[test]
    fn equal_heights_are_not_down() {
        let hand = hand_with(Finger::Middle, 0.50, 0.50);
        assert!(!finger_down(&hand, Finger::Middle));
    }

    #[test]
    fn fingers_classify_independently() {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points[Finger::Index.tip()] = Landmark::new(0.4, 0.8);
        points[Finger::Index.knuckle()] = Landmark::new(0.4, 0.5);
        points[Finger::Ring.tip()] = Landmark::new(0.6, 0.2);
        points[Finger::Ring.knuckle()] = Landmark::new(0.6, 0.5);
        let hand = HandObservation::new(points);
        assert!(finger_down(&hand, Finger::Index));
        assert!(!finger_down(&hand, Finger::Ring));
    }

    #[test]
    fn slot_offsets_are_stable() {
        assert_eq!(Finger::Index.offset(), 0);
        assert_eq!(Finger::Middle.offset(), 1);
        assert_eq!(Finger::Ring.offset(), 2);
    }
}
