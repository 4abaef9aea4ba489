//! The seven-sample bank.
//!
//! File names are fixed; all seven must load at startup or the program
//! refuses to start. Samples are decoded once into mono `f32` buffers and
//! shared with mixer voices by `Arc`, so triggering never re-reads disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// One sample per slot, in slot order. Slot 3's file is required like the
/// others even though no finger maps to it.
pub const NOTE_FILES: [&str; 7] = [
    "do.wav", "re.wav", "mi.wav", "fa.wav", "sol.wav", "la.wav", "si.wav",
];

pub const SAMPLE_COUNT: usize = 7;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("cannot load sound file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("sound file {path} has {bits}-bit samples, which is unsupported")]
    UnsupportedBits { path: PathBuf, bits: u16 },
}

// ════════════════════════════════════════════════════════════════════════════
// Sample / SampleBank
// ════════════════════════════════════════════════════════════════════════════

/// A decoded sample: mono `f32` data at its file's native rate. The mixer
/// resamples on playback.
#[derive(Clone, Debug)]
pub struct Sample {
    pub data: Arc<Vec<f32>>,
    pub rate: u32,
}

/// All seven samples, immutable for the program lifetime.
#[derive(Debug)]
pub struct SampleBank {
    samples: Vec<Sample>,
}

impl SampleBank {
    /// Load every file of [`NOTE_FILES`] from `dir`, failing on the first
    /// one that is missing or undecodable.
    pub fn load(dir: &Path) -> Result<Self, BankError> {
        let samples = NOTE_FILES
            .iter()
            .map(|name| load_wav(&dir.join(name)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SampleBank { samples })
    }

    pub fn get(&self, slot: usize) -> &Sample {
        &self.samples[slot]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Decode one WAV file to mono `f32`. Multi-channel files are averaged.
fn load_wav(path: &Path) -> Result<Sample, BankError> {
    let unreadable = |source| BankError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(unreadable)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(unreadable)?,
        hound::SampleFormat::Int => {
            if spec.bits_per_sample > 32 {
                return Err(BankError::UnsupportedBits {
                    path: path.to_path_buf(),
                    bits: spec.bits_per_sample,
                });
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(unreadable)?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let data = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(Sample {
        data: Arc::new(data),
        rate: spec.sample_rate,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn full_bank_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in NOTE_FILES {
            write_wav(&dir.path().join(name), 1, &[0, 16_384, -16_384, 0]);
        }
        dir
    }

    #[test]
    fn loads_all_seven_samples() {
        let dir = full_bank_dir();
        let bank = SampleBank::load(dir.path()).unwrap();
        assert_eq!(bank.len(), SAMPLE_COUNT);
        for slot in 0..SAMPLE_COUNT {
            assert_eq!(bank.get(slot).data.len(), 4);
            assert_eq!(bank.get(slot).rate, 22_050);
        }
    }

    #[test]
    fn missing_file_names_the_culprit() {
        let dir = full_bank_dir();
        std::fs::remove_file(dir.path().join("fa.wav")).unwrap();
        let err = SampleBank::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("fa.wav"), "got: {}", err);
    }

    #[test]
    fn int_samples_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.wav");
        write_wav(&path, 1, &[i16::MAX, i16::MIN]);
        let sample = load_wav(&path).unwrap();
        assert!((sample.data[0] - 1.0).abs() < 1e-3);
        assert!((sample.data[1] + 1.0).abs() < 1e-3);
    }

    #[test]
    fn stereo_is_averaged_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.wav");
        // L = max, R = 0 → mono ≈ 0.5
        write_wav(&path, 2, &[i16::MAX, 0, 0, 0]);
        let sample = load_wav(&path).unwrap();
        assert_eq!(sample.data.len(), 2);
        assert!((sample.data[0] - 0.5).abs() < 1e-3);
        assert!(sample.data[1].abs() < 1e-6);
    }
}
