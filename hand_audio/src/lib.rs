//! # hand_audio
//!
//! The sound half of the finger piano: seven WAV samples loaded once at
//! startup ([`SampleBank`]), mixed additively by a small voice mixer, and
//! played fire-and-forget through a [`NoteSink`].
//!
//! Sample indices match the tracker's slot layout one-to-one, so sample 3
//! is loaded like every other but can never be triggered. Overlapping
//! playback of the same or different samples is allowed and not sequenced:
//! each trigger just adds a voice.
//!
//! The cpal-backed sink owns the only extra thread in the process (the
//! device callback). When no output device or stream can be opened,
//! [`open_sink`] degrades to a warned silent sink instead of failing, so
//! the tracker remains usable on machines without audio.

pub mod bank;
pub mod mixer;
pub mod output;

pub use bank::{BankError, Sample, SampleBank, NOTE_FILES, SAMPLE_COUNT};
pub use mixer::Mixer;
pub use output::{open_sink, CpalSink, NoteSink, NullSink};
