//! Real webcam backend: OpenCV capture feeding a MediaPipe hand-landmarker
//! helper process.
//!
//! The helper (`tools/hand_landmarker.py`) owns the pre-trained model; this
//! side only ships raw BGR frames down its stdin (12-byte size header plus
//! pixel data) and reads one JSON line back per frame. The process is
//! spawned once at startup and killed on drop.
//!
//! Compiled only with the `camera` feature.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use log::{info, warn};
use opencv::{core::Mat, prelude::*, videoio};
use serde::Deserialize;

use crate::landmark::{HandObservation, Landmark, LANDMARK_COUNT};
use crate::source::{Capture, CaptureError, Frame, HandSource};
use crate::tracker::MAX_HANDS;

/// Capture device index used by both binaries.
pub const CAMERA_INDEX: i32 = 0;

/// Hands scoring below this are dropped.
const MIN_CONFIDENCE: f32 = 0.5;

const HELPER_SCRIPT: &str = "tools/hand_landmarker.py";

// ════════════════════════════════════════════════════════════════════════════
// Wire format from the helper process
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct WireLandmark {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Deserialize)]
struct WireHand {
    score: f32,
    landmarks: Vec<WireLandmark>,
}

#[derive(Deserialize)]
struct WireResult {
    #[serde(default)]
    hands: Vec<WireHand>,
    #[serde(default)]
    error: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Landmarker helper process
// ════════════════════════════════════════════════════════════════════════════

struct Landmarker {
    process: Child,
    stdout: BufReader<ChildStdout>,
}

impl Landmarker {
    fn spawn() -> Result<Self, CaptureError> {
        let script = PathBuf::from(HELPER_SCRIPT);
        if !script.exists() {
            return Err(CaptureError::Backend(format!(
                "helper script {} not found; run from the repository root",
                script.display()
            )));
        }

        let mut process = Command::new(python_binary())
            .arg(&script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| CaptureError::Backend(format!("failed to start helper: {}", e)))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| CaptureError::Backend("helper has no stdout".into()))?;
        let mut stdout = BufReader::new(stdout);

        // The helper prints READY once the model is loaded.
        let mut line = String::new();
        stdout
            .read_line(&mut line)
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        if line.trim() != "READY" {
            return Err(CaptureError::Backend(format!(
                "helper did not signal ready, got: {}",
                line.trim()
            )));
        }
        info!("hand landmarker helper ready");

        Ok(Landmarker { process, stdout })
    }

    /// Run detection on one raw BGR frame.
    fn detect(
        &mut self,
        width: u32,
        height: u32,
        channels: u32,
        data: &[u8],
    ) -> Result<Vec<HandObservation>, CaptureError> {
        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| CaptureError::Backend("helper has no stdin".into()))?;

        let send = |e: std::io::Error| CaptureError::Backend(format!("helper write: {}", e));
        stdin.write_all(&width.to_le_bytes()).map_err(send)?;
        stdin.write_all(&height.to_le_bytes()).map_err(send)?;
        stdin.write_all(&channels.to_le_bytes()).map_err(send)?;
        stdin.write_all(data).map_err(send)?;
        stdin.flush().map_err(send)?;

        let mut line = String::new();
        self.stdout
            .read_line(&mut line)
            .map_err(|e| CaptureError::Backend(format!("helper read: {}", e)))?;

        let result: WireResult = serde_json::from_str(&line)
            .map_err(|e| CaptureError::Backend(format!("bad helper response: {}", e)))?;

        if let Some(err) = result.error {
            warn!("landmarker reported: {}", err);
            return Ok(Vec::new());
        }

        let mut hands = Vec::new();
        for hand in result.hands {
            if hand.score < MIN_CONFIDENCE {
                continue;
            }
            if hand.landmarks.len() != LANDMARK_COUNT {
                warn!("expected {} landmarks, got {}", LANDMARK_COUNT, hand.landmarks.len());
                continue;
            }
            let mut points = [Landmark::default(); LANDMARK_COUNT];
            for (slot, lm) in points.iter_mut().zip(hand.landmarks.iter()) {
                *slot = Landmark {
                    x: lm.x,
                    y: lm.y,
                    z: lm.z,
                };
            }
            hands.push(HandObservation::new(points));
            if hands.len() == MAX_HANDS {
                break;
            }
        }
        Ok(hands)
    }
}

impl Drop for Landmarker {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}

fn python_binary() -> &'static Path {
    // Prefer a project venv the way the helper's setup instructions create
    // one; fall back to whatever python3 is on PATH.
    let venv = Path::new(".venv/bin/python");
    if venv.exists() {
        venv
    } else {
        Path::new("python3")
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraSource
// ════════════════════════════════════════════════════════════════════════════

/// Webcam + landmarker capture source.
pub struct CameraSource {
    capture: videoio::VideoCapture,
    landmarker: Landmarker,
    buf: Mat,
}

impl CameraSource {
    /// Open the capture device at its default resolution and spawn the
    /// landmarker helper. Failure here is fatal to the program.
    pub fn open(device: i32) -> Result<Self, CaptureError> {
        let capture = videoio::VideoCapture::new(device, videoio::CAP_ANY)
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        let opened = capture
            .is_opened()
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        if !opened {
            return Err(CaptureError::DeviceUnavailable(device));
        }
        info!("camera {} opened", device);

        let landmarker = Landmarker::spawn()?;
        Ok(CameraSource {
            capture,
            landmarker,
            buf: Mat::default(),
        })
    }
}

impl HandSource for CameraSource {
    fn next_capture(&mut self) -> Result<Capture, CaptureError> {
        let ok = self
            .capture
            .read(&mut self.buf)
            .map_err(|e| CaptureError::Backend(e.to_string()))?;
        if !ok || self.buf.empty() {
            return Err(CaptureError::EmptyFrame);
        }

        let width = self.buf.cols() as u32;
        let height = self.buf.rows() as u32;
        let channels = self.buf.channels() as u32;
        let data = self
            .buf
            .data_bytes()
            .map_err(|e| CaptureError::Backend(e.to_string()))?;

        let hands = self.landmarker.detect(width, height, channels, data)?;
        let frame = bgr_to_frame(width as usize, height as usize, channels as usize, data);
        Ok(Capture { frame, hands })
    }
}

/// Pack interleaved BGR bytes into the `0xAARRGGBB` frame buffer.
fn bgr_to_frame(width: usize, height: usize, channels: usize, data: &[u8]) -> Frame {
    let mut frame = Frame::filled(width, height, 0xFF000000);
    if channels < 3 {
        return frame;
    }
    for (i, px) in frame.pixels.iter_mut().enumerate() {
        let at = i * channels;
        if at + 2 >= data.len() {
            break;
        }
        let b = data[at] as u32;
        let g = data[at + 1] as u32;
        let r = data[at + 2] as u32;
        *px = 0xFF000000 | (r << 16) | (g << 8) | b;
    }
    frame
}
