//! hand_view — skeleton viewer entry point.

use hand_view::app;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════╗");
    println!("║   Hand Skeleton Viewer — landmark overlay    ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: webcam (device 0)");
    #[cfg(not(feature = "camera"))]
    {
        println!("  Mode: keyboard simulation  (use --features camera for a real webcam)");
        println!("  Keys: A/S/D curl hand 0, J/K/L curl hand 1, H/N toggle hands");
    }
    println!("  Press ESC to quit.");
    println!();

    if let Err(e) = app::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
