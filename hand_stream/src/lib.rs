//! # hand_stream
//!
//! Data model and per-frame logic for a webcam hand-landmark pipeline:
//! observations of up to two hands, each as 21 ordered normalized landmarks,
//! a one-rule finger-curl classifier, and the edge-triggered finger-state
//! tracker that turns curl transitions into note triggers.
//!
//! ## Landmark convention
//!
//! Landmark indices follow the MediaPipe hand-landmark model and are fixed
//! for every backend (see [`landmark::index`]):
//!
//! | Index | Point | Index | Point |
//! |---|---|---|---|
//! | 0 | wrist | 9–12 | middle MCP→tip |
//! | 1–4 | thumb CMC→tip | 13–16 | ring MCP→tip |
//! | 5–8 | index MCP→tip | 17–20 | pinky MCP→tip |
//!
//! `x` and `y` are normalized to `[0,1]` over frame width/height, with `y`
//! growing **downward**; `z` is carried but unused by the logic here.
//!
//! ## Slots
//!
//! Each monitored (hand, finger) pair owns a slot `finger + hand * 4`:
//! hand 0 uses slots 0–2, hand 1 uses slots 4–6. Slot 3 is permanently
//! unused; the sample indexed by it is loaded but can never play.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: [`synth::SyntheticHands`] poses
//!   keyboard-controlled hands; no camera or model required.
//! * `camera` — **Webcam mode**: OpenCV capture plus a MediaPipe helper
//!   process (see `tools/hand_landmarker.py`).

pub mod landmark;
pub mod classifier;
pub mod tracker;
pub mod source;
pub mod synth;
pub mod overlay;

#[cfg(feature = "camera")]
pub mod camera;

pub use classifier::{finger_down, Finger};
pub use landmark::{HandObservation, Landmark, HAND_CONNECTIONS};
pub use source::{Capture, CaptureError, Frame, HandSource, ScriptedSource};
pub use tracker::{FingerTracker, NoteTrigger, MAX_HANDS, SLOT_COUNT};
