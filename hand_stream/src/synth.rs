//! Keyboard-posed synthetic hands — simulation mode.
//!
//! Poses a parametric 21-landmark hand model so the whole pipeline runs
//! with no camera and no detection model. The three monitored fingers of
//! each hand can be curled or extended, and each hand can be removed from
//! the frame entirely (for exercising the frozen-slot behavior). Palms
//! drift on a slow phase so the viewer shows motion.
//!
//! Curled poses are built to satisfy the classifier's premise: the
//! fingertip of a curled finger always ends up below its knuckle.

use crate::classifier::Finger;
use crate::landmark::{index, HandObservation, Landmark, LANDMARK_COUNT};
use crate::source::{Capture, CaptureError, Frame, HandSource};

/// Default simulated frame size, matching a typical webcam mode.
pub const SIM_WIDTH: usize = 640;
pub const SIM_HEIGHT: usize = 480;

// Normalized geometry of the model hand.
const WRIST_DROP: f32 = 0.17;
const FINGER_X: [f32; 4] = [-0.055, -0.018, 0.018, 0.055];
const FINGER_MCP_LIFT: [f32; 4] = [0.0, -0.012, -0.006, 0.008];
const FINGER_LEN: [f32; 4] = [0.130, 0.148, 0.136, 0.105];

#[derive(Clone, Copy, Debug)]
struct SynthHand {
    present: bool,
    anchor: (f32, f32),
    curled: [bool; 3],
}

/// The simulation rig. Implements [`HandSource`] and never fails.
pub struct SyntheticHands {
    width: usize,
    height: usize,
    phase: f32,
    hands: [SynthHand; 2],
}

impl SyntheticHands {
    pub fn new() -> Self {
        Self::with_size(SIM_WIDTH, SIM_HEIGHT)
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        SyntheticHands {
            width,
            height,
            phase: 0.0,
            hands: [
                SynthHand {
                    present: true,
                    anchor: (0.32, 0.55),
                    curled: [false; 3],
                },
                SynthHand {
                    present: true,
                    anchor: (0.68, 0.55),
                    curled: [false; 3],
                },
            ],
        }
    }

    pub fn set_curled(&mut self, hand: usize, finger: Finger, curled: bool) {
        self.hands[hand].curled[finger.offset()] = curled;
    }

    pub fn set_present(&mut self, hand: usize, present: bool) {
        self.hands[hand].present = present;
    }

    pub fn toggle_present(&mut self, hand: usize) {
        self.hands[hand].present = !self.hands[hand].present;
    }

    pub fn is_present(&self, hand: usize) -> bool {
        self.hands[hand].present
    }

    /// Pose every present hand at the current phase.
    pub fn observations(&self) -> Vec<HandObservation> {
        self.hands
            .iter()
            .enumerate()
            .filter(|(_, h)| h.present)
            .map(|(idx, h)| pose_hand(idx, h, self.phase))
            .collect()
    }

    fn backdrop(&self) -> Frame {
        let mut frame = Frame::filled(self.width, self.height, 0xFF181820);
        for y in 0..self.height {
            let shade = 0x18 + (y * 0x20 / self.height.max(1)) as u32;
            let color = 0xFF000000 | (shade << 16) | (shade << 8) | (shade + 0x08);
            for x in 0..self.width {
                frame.pixels[y * self.width + x] = color;
            }
        }
        frame
    }
}

impl Default for SyntheticHands {
    fn default() -> Self {
        Self::new()
    }
}

impl HandSource for SyntheticHands {
    fn next_capture(&mut self) -> Result<Capture, CaptureError> {
        self.phase += 0.02;
        Ok(Capture {
            frame: self.backdrop(),
            hands: self.observations(),
        })
    }
}

/// Build the 21-point pose for one hand.
///
/// `mirror` flips finger order and thumb side so the two hands face each
/// other the way a left/right pair does on camera.
fn pose_hand(hand_idx: usize, hand: &SynthHand, phase: f32) -> HandObservation {
    let mirror = if hand_idx == 0 { 1.0 } else { -1.0 };
    let sway = phase + hand_idx as f32 * 1.7;
    let cx = hand.anchor.0 + 0.035 * sway.sin();
    let cy = hand.anchor.1 + 0.020 * (0.7 * sway).cos();

    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[index::WRIST] = Landmark::new(cx, cy + WRIST_DROP);

    // Thumb: a fixed diagonal chain on the inner side, never classified.
    let tside = mirror;
    for (k, slot) in (index::THUMB_CMC..=index::THUMB_TIP).enumerate() {
        let step = k as f32;
        points[slot] = Landmark::new(
            cx + tside * (0.060 + 0.026 * step),
            cy + 0.110 - 0.038 * step,
        );
    }

    // Index, middle, ring, pinky chains.
    for (f, &base_x) in FINGER_X.iter().enumerate() {
        let mcp_x = cx + mirror * base_x;
        let mcp_y = cy - 0.020 + FINGER_MCP_LIFT[f];
        let len = FINGER_LEN[f];
        let curl = if f < 3 && hand.curled[f] { 1.0 } else { 0.0 };

        let mcp_slot = index::INDEX_FINGER_MCP + f * 4;
        points[mcp_slot] = Landmark::new(mcp_x, mcp_y);

        // Joint offsets interpolated between an extended and a curled pose.
        let extended = [(0.0, -len / 3.0), (0.0, -2.0 * len / 3.0), (0.0, -len)];
        let folded = [
            (0.012 * mirror, -0.35 * len),
            (0.022 * mirror, 0.05 * len),
            (0.016 * mirror, 0.45 * len),
        ];
        for j in 0..3 {
            let dx = extended[j].0 * (1.0 - curl) + folded[j].0 * curl;
            let dy = extended[j].1 * (1.0 - curl) + folded[j].1 * curl;
            points[mcp_slot + 1 + j] = Landmark::new(mcp_x + dx, mcp_y + dy);
        }
    }

    HandObservation::new(points)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::finger_down;

    #[test]
    fn both_hands_present_by_default() {
        let mut rig = SyntheticHands::new();
        let cap = rig.next_capture().unwrap();
        assert_eq!(cap.hands.len(), 2);
        assert_eq!(cap.frame.width, SIM_WIDTH);
        assert_eq!(cap.frame.height, SIM_HEIGHT);
    }

    #[test]
    fn extended_fingers_classify_up() {
        let rig = SyntheticHands::new();
        for hand in rig.observations() {
            for finger in Finger::MONITORED {
                assert!(!finger_down(&hand, finger));
            }
        }
    }

    #[test]
    fn curled_fingers_classify_down() {
        let mut rig = SyntheticHands::new();
        rig.set_curled(0, Finger::Middle, true);
        rig.set_curled(1, Finger::Ring, true);
        let hands = rig.observations();
        assert!(finger_down(&hands[0], Finger::Middle));
        assert!(!finger_down(&hands[0], Finger::Index));
        assert!(finger_down(&hands[1], Finger::Ring));
    }

    #[test]
    fn absent_hand_is_omitted_from_capture() {
        let mut rig = SyntheticHands::new();
        rig.set_present(0, false);
        let cap = rig.next_capture().unwrap();
        assert_eq!(cap.hands.len(), 1);

        rig.toggle_present(0);
        assert!(rig.is_present(0));
        assert_eq!(rig.next_capture().unwrap().hands.len(), 2);
    }

    #[test]
    fn pose_stays_normalized() {
        let mut rig = SyntheticHands::new();
        for _ in 0..200 {
            let cap = rig.next_capture().unwrap();
            for hand in &cap.hands {
                for p in &hand.points {
                    assert!(p.x > 0.0 && p.x < 1.0, "x out of range: {}", p.x);
                    assert!(p.y > 0.0 && p.y < 1.0, "y out of range: {}", p.y);
                }
            }
        }
    }

    #[test]
    fn curl_is_reversible() {
        let mut rig = SyntheticHands::new();
        rig.set_curled(0, Finger::Index, true);
        assert!(finger_down(&rig.observations()[0], Finger::Index));
        rig.set_curled(0, Finger::Index, false);
        assert!(!finger_down(&rig.observations()[0], Finger::Index));
    }
}
