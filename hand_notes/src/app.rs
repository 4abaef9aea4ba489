//! Application state and the air-piano loop.
//!
//! `AppState` owns the finger tracker and the note sink; one call per frame
//! turns hand observations into sample triggers. The loop itself is
//! single-threaded and synchronous: capture → track → trigger → draw →
//! present, with Escape or window close as the only exits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

use hand_audio::{open_sink, NoteSink, SampleBank};
use hand_stream::{Capture, CaptureError, FingerTracker, HandSource, NoteTrigger};

use crate::visualizer::Viewer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

pub struct AppConfig {
    /// Directory holding the seven note samples.
    pub sounds_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            sounds_dir: PathBuf::from("sounds"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    tracker: FingerTracker,
    sink: Box<dyn NoteSink>,
    pub status: String,
    pub notes_played: usize,
}

impl AppState {
    pub fn new(sink: Box<dyn NoteSink>) -> Self {
        AppState {
            tracker: FingerTracker::new(),
            sink,
            status: "Ready - curl a finger to play".to_string(),
            notes_played: 0,
        }
    }

    /// Feed one capture through the tracker and fire every resulting
    /// trigger at the sink. Returns the triggers for callers that want
    /// them (tests, status display).
    pub fn handle_capture(&mut self, cap: &Capture) -> Vec<NoteTrigger> {
        let triggers = self.tracker.observe(&cap.hands);
        for t in &triggers {
            self.sink.trigger(t.slot());
            self.notes_played += 1;
        }
        if let Some(last) = triggers.last() {
            self.status = format!(
                "* note {} (hand {} {})  played {}",
                last.slot(),
                last.hand,
                last.finger.name(),
                self.notes_played,
            );
        }
        triggers
    }

    pub fn tracker(&self) -> &FingerTracker {
        &self.tracker
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Load the bank, open the sink and the capture source, and run until the
/// user quits. Missing samples and an unopenable camera are startup-fatal.
pub fn run(cfg: AppConfig) -> Result<()> {
    let bank = SampleBank::load(&cfg.sounds_dir)
        .with_context(|| format!("loading samples from {}/", cfg.sounds_dir.display()))?;
    let state = AppState::new(open_sink(bank));

    #[cfg(feature = "camera")]
    {
        use hand_stream::camera::{CameraSource, CAMERA_INDEX};
        let source = CameraSource::open(CAMERA_INDEX)?;
        run_loop(source, state, |_, _| {})
    }

    #[cfg(not(feature = "camera"))]
    {
        run_loop(hand_stream::synth::SyntheticHands::new(), state, sim_keys)
    }
}

fn run_loop<S, F>(mut source: S, mut state: AppState, mut on_keys: F) -> Result<()>
where
    S: HandSource,
    F: FnMut(&mut S, &minifb::Window),
{
    // Sized from the first good capture, once the camera's mode is known.
    let mut viewer: Option<Viewer> = None;

    loop {
        if let Some(v) = &viewer {
            if v.should_quit() {
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

        state.handle_capture(&cap);

        for hand in &cap.hands {
            hand_stream::overlay::draw_skeleton(&mut cap.frame, hand);
        }
        hand_stream::overlay::mirror(&mut cap.frame);

        if viewer.is_none() {
            viewer = Some(Viewer::new(cap.frame.width, cap.frame.height)?);
        }
        if let Some(v) = viewer.as_mut() {
            on_keys(&mut source, v.window());
            v.render(&cap.frame, &state.status)?;
        }
    }

    Ok(())
}

#[cfg(not(feature = "camera"))]
fn sim_keys(rig: &mut hand_stream::synth::SyntheticHands, window: &minifb::Window) {
    use hand_stream::Finger;
    use minifb::{Key, KeyRepeat};

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
    use std::cell::RefCell;
    use std::rc::Rc;

    use hand_stream::landmark::{Landmark, LANDMARK_COUNT};
    use hand_stream::{Finger, HandObservation, ScriptedSource};

    /// Sink that records triggered slots instead of playing them.
    struct RecordingSink {
        log: Rc<RefCell<Vec<usize>>>,
    }

    impl NoteSink for RecordingSink {
        fn trigger(&mut self, slot: usize) {
            self.log.borrow_mut().push(slot);
        }
    }

    fn recording_state() -> (AppState, Rc<RefCell<Vec<usize>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = RecordingSink {
            log: Rc::clone(&log),
        };
        (AppState::new(Box::new(sink)), log)
    }

    /// Build a hand with the given (index, middle, ring) curl pattern.
    fn hand(curled: [bool; 3]) -> HandObservation {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (finger, &is_down) in Finger::MONITORED.iter().zip(curled.iter()) {
            points[finger.knuckle()] = Landmark::new(0.5, 0.50);
            points[finger.tip()] = Landmark::new(0.5, if is_down { 0.70 } else { 0.30 });
        }
        HandObservation::new(points)
    }

    /// Run a scripted source to exhaustion the way the main loop does,
    /// returning the trigger count per good frame.
    fn drive(state: &mut AppState, source: &mut ScriptedSource) -> Vec<usize> {
        let mut per_frame = Vec::new();
        loop {
            match source.next_capture() {
                Ok(cap) => per_frame.push(state.handle_capture(&cap).len()),
                Err(CaptureError::EmptyFrame) => continue,
                Err(CaptureError::Exhausted) => break,
                Err(e) => panic!("unexpected capture error: {}", e),
            }
        }
        per_frame
    }

    #[test]
    fn five_frame_scenario_plays_slot_zero_twice() {
        let (mut state, log) = recording_state();
        let up = [false; 3];
        let mut source = ScriptedSource::from_hands(vec![
            vec![hand(up), hand(up)],                      // frame 1: all up
            vec![hand([true, false, false]), hand(up)],    // frame 2: hand 0 index down
            vec![hand([true, false, false]), hand(up)],    // frame 3: still down
            vec![hand(up), hand(up)],                      // frame 4: released
            vec![hand([true, false, false]), hand(up)],    // frame 5: down again
        ]);

        let per_frame = drive(&mut state, &mut source);
        assert_eq!(per_frame, [0, 1, 0, 0, 1]);
        assert_eq!(*log.borrow(), [0, 0]);
        assert_eq!(state.notes_played, 2);
    }

    #[test]
    fn empty_frames_are_skipped_without_state_damage() {
        let (mut state, log) = recording_state();
        let mut source = ScriptedSource::new(vec![
            Ok(capture(vec![hand([false; 3])])),
            Err(CaptureError::EmptyFrame),
            Err(CaptureError::EmptyFrame),
            Ok(capture(vec![hand([true, false, false])])),
        ]);

        let per_frame = drive(&mut state, &mut source);
        assert_eq!(per_frame, [0, 1]);
        assert_eq!(*log.borrow(), [0]);
    }

    #[test]
    fn both_hands_map_to_their_slot_blocks() {
        let (mut state, log) = recording_state();
        let cap = capture(vec![hand([true, true, false]), hand([false, false, true])]);
        state.handle_capture(&cap);
        assert_eq!(*log.borrow(), [0, 1, 6]);
    }

    #[test]
    fn status_reports_the_last_trigger() {
        let (mut state, _log) = recording_state();
        state.handle_capture(&capture(vec![hand([false, false, true])]));
        assert!(state.status.contains("note 2"), "status: {}", state.status);
        assert!(state.status.contains("ring"), "status: {}", state.status);
    }

    #[test]
    fn status_is_untouched_when_nothing_fires() {
        let (mut state, _log) = recording_state();
        let before = state.status.clone();
        state.handle_capture(&capture(vec![hand([false; 3])]));
        assert_eq!(state.status, before);
    }

    #[test]
    fn departed_hand_stays_latched_through_the_app() {
        let (mut state, log) = recording_state();
        // Hand 1 curls, vanishes, and returns still curled: one note only.
        state.handle_capture(&capture(vec![hand([false; 3]), hand([true, false, false])]));
        state.handle_capture(&capture(vec![hand([false; 3])]));
        state.handle_capture(&capture(vec![hand([false; 3]), hand([true, false, false])]));
        assert_eq!(*log.borrow(), [4]);
        assert!(state.tracker().is_down(4));
    }

    fn capture(hands: Vec<HandObservation>) -> Capture {
        Capture {
            frame: hand_stream::Frame::filled(64, 48, 0xFF000000),
            hands,
        }
    }
}
