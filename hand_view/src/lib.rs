//! # hand_view
//!
//! Variant 1 of the hand-tracking toys: a window that shows the mirrored
//! camera view with the full hand skeleton drawn over each detected hand
//! and a green marker on the index fingertip. Pure visual side effect; no
//! state feeds back from drawing.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: synthetic hands posed from the
//!   keyboard; no camera or model needed.
//! * `camera` — **Webcam mode**: OpenCV device 0 plus the MediaPipe helper
//!   process (`tools/hand_landmarker.py`).
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `A` / `S` / `D` (hold) | Curl hand 0's index / middle / ring |
//! | `J` / `K` / `L` (hold) | Curl hand 1's index / middle / ring |
//! | `H` | Toggle hand 0 in/out of frame |
//! | `N` | Toggle hand 1 in/out of frame |
//! | `Esc` | Quit |

pub mod app;
