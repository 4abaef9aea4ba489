//! The viewer loop: capture → annotate → mirror → present.
//!
//! Single-threaded and synchronous; each iteration blocks on the capture
//! call, then draws and presents. An empty frame is logged and skipped,
//! everything else that fails ends the run.

use std::time::Duration;

use anyhow::{anyhow, Result};
use log::warn;
use minifb::{Key, Window, WindowOptions};

use hand_stream::overlay;
use hand_stream::{Capture, CaptureError, HandSource};

pub const WINDOW_TITLE: &str = "Hand Skeleton Viewer";

/// Annotate one capture in place: every hand's skeleton, the index-tip
/// marker, then the horizontal mirror flip for display. Drawing precedes
/// the flip, so markers land mirrored like the rest of the image.
pub fn annotate(cap: &mut Capture) {
    for hand in &cap.hands {
        overlay::draw_skeleton(&mut cap.frame, hand);
        overlay::draw_tip_marker(&mut cap.frame, hand);
    }
    overlay::mirror(&mut cap.frame);
}

/// Run the viewer until Escape, window close, or source exhaustion.
pub fn run() -> Result<()> {
    #[cfg(feature = "camera")]
    {
        use hand_stream::camera::{CameraSource, CAMERA_INDEX};
        let source = CameraSource::open(CAMERA_INDEX)?;
        run_loop(source, |_, _| {})
    }

    #[cfg(not(feature = "camera"))]
    {
        run_loop(hand_stream::synth::SyntheticHands::new(), sim_keys)
    }
}

fn run_loop<S, F>(mut source: S, mut on_keys: F) -> Result<()>
where
    S: HandSource,
    F: FnMut(&mut S, &Window),
{
    // The window is sized from the first good capture, since the camera's
    // default mode is unknown until a frame arrives.
    let mut window: Option<Window> = None;

    loop {
        if let Some(w) = &window {
            if !w.is_open() || w.is_key_down(Key::Escape) {
                break;
            }
        }

        let mut cap = match source.next_capture() {
            Ok(cap) => cap,
            Err(CaptureError::EmptyFrame) => {
                warn!("ignoring empty camera frame");
                continue;
            }
            Err(CaptureError::Exhausted) => break,
            Err(e) => return Err(e.into()),
        };

        annotate(&mut cap);

        if window.is_none() {
            window = Some(open_window(cap.frame.width, cap.frame.height)?);
        }
        if let Some(w) = window.as_mut() {
            on_keys(&mut source, w);
            w.update_with_buffer(&cap.frame.pixels, cap.frame.width, cap.frame.height)
                .map_err(|e| anyhow!("window update failed: {}", e))?;
        }
    }

    Ok(())
}

fn open_window(width: usize, height: usize) -> Result<Window> {
    let mut window = Window::new(
        WINDOW_TITLE,
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| anyhow!("cannot open window: {}", e))?;
    window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps
    Ok(window)
}

#[cfg(not(feature = "camera"))]
fn sim_keys(rig: &mut hand_stream::synth::SyntheticHands, window: &Window) {
    use hand_stream::Finger;
    use minifb::KeyRepeat;

    const CURL_KEYS: [(Key, usize, Finger); 6] = [
        (Key::A, 0, Finger::Index),
        (Key::S, 0, Finger::Middle),
        (Key::D, 0, Finger::Ring),
        (Key::J, 1, Finger::Index),
        (Key::K, 1, Finger::Middle),
        (Key::L, 1, Finger::Ring),
    ];
    for (key, hand, finger) in CURL_KEYS {
        rig.set_curled(hand, finger, window.is_key_down(key));
    }
    if window.is_key_pressed(Key::H, KeyRepeat::No) {
        rig.toggle_present(0);
    }
    if window.is_key_pressed(Key::N, KeyRepeat::No) {
        rig.toggle_present(1);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_stream::landmark::{index, Landmark, LANDMARK_COUNT};
    use hand_stream::overlay::MARKER_COLOR;
    use hand_stream::{Frame, HandObservation};

    const BG: u32 = 0xFF101010;

    fn capture_with_tip(x: f32, y: f32) -> Capture {
        let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        points[index::INDEX_FINGER_TIP] = Landmark::new(x, y);
        Capture {
            frame: Frame::filled(100, 100, BG),
            hands: vec![HandObservation::new(points)],
        }
    }

    #[test]
    fn marker_ends_up_mirrored() {
        let mut cap = capture_with_tip(0.25, 0.5);
        annotate(&mut cap);
        // Tip projects to x=25; after the flip it sits at 100-1-25 = 74.
        assert_eq!(cap.frame.pixel(74, 50), MARKER_COLOR);
        assert_ne!(cap.frame.pixel(25, 50), MARKER_COLOR);
    }

    #[test]
    fn empty_capture_only_mirrors() {
        let mut cap = Capture {
            frame: Frame::filled(10, 10, BG),
            hands: vec![],
        };
        annotate(&mut cap);
        assert!(cap.frame.pixels.iter().all(|&p| p == BG));
    }

    #[test]
    fn every_hand_gets_a_marker() {
        let mut cap = capture_with_tip(0.25, 0.5);
        let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        points[index::INDEX_FINGER_TIP] = Landmark::new(0.75, 0.25);
        cap.hands.push(HandObservation::new(points));
        annotate(&mut cap);
        assert_eq!(cap.frame.pixel(74, 50), MARKER_COLOR);
        assert_eq!(cap.frame.pixel(24, 25), MARKER_COLOR);
    }
}
