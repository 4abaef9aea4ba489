//! make_bank — write placeholder note samples for the air piano.
//!
//! The piano refuses to start unless all seven files of `NOTE_FILES`
//! exist under the sounds directory. This utility synthesizes a decaying
//! sine tone per note (an ascending C-major octave) so the piano is
//! playable without hunting for a sample pack.

use std::path::Path;

use anyhow::{Context, Result};

use hand_audio::NOTE_FILES;

/// One fundamental per slot: C5 major scale, do through si.
const FREQS: [f32; 7] = [523.25, 587.33, 659.25, 698.46, 783.99, 880.00, 987.77];

const RATE: u32 = 44_100;
const SECONDS: f32 = 0.6;

fn main() {
    println!();
    println!("  make_bank — placeholder tones for the air piano");
    println!();

    let dir = std::env::args().nth(1).unwrap_or_else(|| "sounds".to_string());
    if let Err(e) = write_bank(Path::new(&dir)) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn write_bank(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    for (name, freq) in NOTE_FILES.iter().zip(FREQS) {
        let path = dir.join(name);
        write_tone(&path, freq).with_context(|| format!("writing {}", path.display()))?;
        println!("  ✓  {}  ({:.2} Hz)", path.display(), freq);
    }
    println!();
    Ok(())
}

/// A decaying sine with a short attack ramp, 16-bit mono.
fn write_tone(path: &Path, freq: f32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;

    let total = (SECONDS * RATE as f32) as u32;
    let attack = RATE / 200; // 5 ms ramp, avoids a click at note start
    for n in 0..total {
        let t = n as f32 / RATE as f32;
        let env = (-4.0 * t).exp() * (n.min(attack) as f32 / attack as f32);
        let v = (2.0 * std::f32::consts::PI * freq * t).sin() * env * 0.6;
        writer.write_sample((v * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}
