//! Capture sources — the seam between the opaque perception backends and
//! the per-frame logic.
//!
//! A [`HandSource`] yields one [`Capture`] per call: the frame image plus
//! whatever hands the backend detected in it. Consumers never learn whether
//! captures came from a real webcam, the keyboard-posed synthetic rig, or a
//! scripted replay in tests.

use std::collections::VecDeque;

use thiserror::Error;

use crate::landmark::HandObservation;

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// One video frame as a packed `0xAARRGGBB` buffer, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    /// A frame filled with a single color.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Frame {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Write a pixel; coordinates outside the frame are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Capture / CaptureError
// ════════════════════════════════════════════════════════════════════════════

/// One frame plus the hands detected in it (0–2 observations; extra hands
/// from a backend are dropped by the tracker).
#[derive(Clone, Debug)]
pub struct Capture {
    pub frame: Frame,
    pub hands: Vec<HandObservation>,
}

/// Failures a capture source can report.
///
/// Only [`CaptureError::EmptyFrame`] is recoverable: the caller logs it and
/// skips the iteration. Everything else ends the run.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("could not open capture device {0}")]
    DeviceUnavailable(i32),

    #[error("camera returned an empty frame")]
    EmptyFrame,

    #[error("hand landmark backend failed: {0}")]
    Backend(String),

    #[error("capture source is exhausted")]
    Exhausted,
}

/// Anything that can produce captures, one frame at a time.
///
/// Calls block until a frame is available; the main loops are synchronous
/// by design.
pub trait HandSource {
    fn next_capture(&mut self) -> Result<Capture, CaptureError>;
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource — deterministic replay for tests
// ════════════════════════════════════════════════════════════════════════════

/// Replays a fixed sequence of capture results, then reports
/// [`CaptureError::Exhausted`].
pub struct ScriptedSource {
    steps: VecDeque<Result<Capture, CaptureError>>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Result<Capture, CaptureError>>) -> Self {
        ScriptedSource {
            steps: steps.into(),
        }
    }

    /// Convenience: one capture per entry of `hands`, each on a small blank
    /// frame.
    pub fn from_hands(frames: Vec<Vec<HandObservation>>) -> Self {
        let steps = frames
            .into_iter()
            .map(|hands| {
                Ok(Capture {
                    frame: Frame::filled(64, 48, 0xFF000000),
                    hands,
                })
            })
            .collect();
        ScriptedSource::new(steps)
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl HandSource for ScriptedSource {
    fn next_capture(&mut self) -> Result<Capture, CaptureError> {
        self.steps.pop_front().unwrap_or(Err(CaptureError::Exhausted))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
