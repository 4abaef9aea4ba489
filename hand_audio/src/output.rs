//! Note sinks — where triggers become sound.
//!
//! [`CpalSink`] opens the default output device and runs the mixer from
//! the device callback; [`NullSink`] swallows triggers. [`open_sink`]
//! picks between them at startup so a missing sound device degrades the
//! program to silence instead of killing it.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use log::warn;

use crate::bank::SampleBank;
use crate::mixer::Mixer;

/// Fire-and-forget playback of the sample at `slot`.
pub trait NoteSink {
    fn trigger(&mut self, slot: usize);
}

// ════════════════════════════════════════════════════════════════════════════
// NullSink
// ════════════════════════════════════════════════════════════════════════════

/// Silent sink used when no audio device is available.
pub struct NullSink;

impl NoteSink for NullSink {
    fn trigger(&mut self, _slot: usize) {}
}

// ════════════════════════════════════════════════════════════════════════════
// CpalSink
// ════════════════════════════════════════════════════════════════════════════

/// Default-output-device sink. Triggering locks the shared mixer briefly
/// to add a voice; mixing itself happens on the device callback thread.
pub struct CpalSink {
    bank: SampleBank,
    mixer: Arc<Mutex<Mixer>>,
    _stream: Stream, // playback stops when this is dropped
}

impl CpalSink {
    pub fn open(bank: SampleBank) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no default audio output device"))?;
        let supported = device.default_output_config()?;
        let config = supported.config();

        let mixer = Arc::new(Mutex::new(Mixer::new(config.sample_rate.0)));

        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&mixer))?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&mixer))?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&mixer))?,
            format => return Err(anyhow!("unsupported sample format '{}'", format)),
        };
        stream.play()?;

        Ok(CpalSink {
            bank,
            mixer,
            _stream: stream,
        })
    }

    /// Voices currently sounding (diagnostic).
    pub fn active_voices(&self) -> usize {
        self.mixer.lock().map(|m| m.active()).unwrap_or(0)
    }
}

impl NoteSink for CpalSink {
    fn trigger(&mut self, slot: usize) {
        let sample = self.bank.get(slot);
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.start(sample);
        }
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    mixer: Arc<Mutex<Mixer>>,
) -> Result<Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let err_fn = |err| warn!("audio stream error: {}", err);

    let stream = device.build_output_stream(
        config,
        move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
            let mut mixer = match mixer.lock() {
                Ok(m) => m,
                Err(_) => return,
            };
            for frame in output.chunks_mut(channels) {
                let v = T::from_sample(mixer.next_sample());
                for sample in frame.iter_mut() {
                    *sample = v;
                }
            }
        },
        err_fn,
        None,
    )?;
    Ok(stream)
}

// ════════════════════════════════════════════════════════════════════════════
// open_sink — device sink with silent fallback
// ════════════════════════════════════════════════════════════════════════════

/// Open the cpal sink, or fall back to [`NullSink`] with a warning.
pub fn open_sink(bank: SampleBank) -> Box<dyn NoteSink> {
    match CpalSink::open(bank) {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            warn!("audio output unavailable: {} — notes will be silent", e);
            Box::new(NullSink)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
