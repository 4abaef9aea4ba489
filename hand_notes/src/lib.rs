//! # hand_notes
//!
//! Variant 2 of the hand-tracking toys: a seven-note air piano. The index,
//! middle, and ring finger of each detected hand own a note slot
//! (`finger + hand * 4`); curling a finger past its knuckle plays that
//! slot's sample once, and it cannot re-fire until the finger has been
//! seen extended again.
//!
//! ## Finger → note mapping
//!
//! | Slot | Hand | Finger | Sample |
//! |---|---|---|---|
//! | 0–2 | first detected | index / middle / ring | `do` / `re` / `mi` |
//! | 3 | — | (unused) | `fa` (loaded, never played) |
//! | 4–6 | second detected | index / middle / ring | `sol` / `la` / `si` |
//!
//! Samples live under `sounds/` next to the working directory; all seven
//! files must exist or the program refuses to start.
//! `cargo run -p hand_audio --bin make_bank` writes a set of placeholder
//! sine tones there.
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
pub mod visualizer;
