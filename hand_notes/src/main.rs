//! hand_notes — air piano entry point.

use hand_audio::{BankError, NOTE_FILES};
use hand_notes::app::{run, AppConfig};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════╗");
    println!("║     Hand Notes — seven-note air piano        ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: webcam (device 0)");
    #[cfg(not(feature = "camera"))]
    {
        println!("  Mode: keyboard simulation  (use --features camera for a real webcam)");
        println!("  Keys: A/S/D curl hand 0, J/K/L curl hand 1, H/N toggle hands");
    }

    let cfg = AppConfig::default();
    println!(
        "  Samples: {}/{{{}}}",
        cfg.sounds_dir.display(),
        NOTE_FILES.join(", "),
    );
    println!("  Press ESC to quit.");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {:#}", e);
        if e.downcast_ref::<BankError>().is_some() {
            eprintln!();
            eprintln!("  All seven samples must exist before the piano can start.");
            eprintln!("  Generate placeholder tones with:");
            eprintln!("      cargo run -p hand_audio --bin make_bank");
        }
        std::process::exit(1);
    }
}
