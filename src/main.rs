//! Hotcorners - run keyboard shortcuts from the screen corners
//!
//! Processes the command line actions in order, then monitors the pointer
//! until Ctrl+C.

use chrono::Datelike;
use hotcorners::app::{apply_actions, Application};
use hotcorners::cli::LaunchOptions;
use hotcorners::config::{RawConfig, ZoneConfig, CONFIGURATION_FILE_PATH};
use hotcorners::diagnostics::{init_logging, Diagnostics};
use hotcorners::platform::Platform;
use std::path::Path;
use std::sync::mpsc;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const HOMEPAGE: &str = "https://github.com/machinateur/hotcorners";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = LaunchOptions::from_env();
    let diagnostics = Diagnostics {
        verbose: options.verbose,
    };
    init_logging(diagnostics);

    print_banner();

    let path = Path::new(CONFIGURATION_FILE_PATH);
    let mut config = ZoneConfig::with_defaults();
    // Acquired on first use so that storing defaults works anywhere
    let mut platform: Option<Platform> = None;

    apply_actions(&options.actions, &mut config, path, &mut platform, Platform::native)?;

    if options.exit {
        tracing::info!("Exit requested, not monitoring");
        return Ok(());
    }

    ZoneConfig::load(path, &mut config)?;

    let platform = match platform {
        Some(platform) => platform,
        None => Platform::native()?,
    };

    run(config, &platform, diagnostics)
}

fn run(
    config: RawConfig,
    platform: &Platform,
    diagnostics: Diagnostics,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = Application::new(config, platform, diagnostics)?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        println!("\n🛑 Shutdown signal received...");
        let _ = shutdown_tx.send(());
    })?;

    app.start()?;

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("🎯 Hot corners active on {} zone(s)", app.dispatcher().zones().len());
    for (area, sequence) in app.dispatcher().zones().iter() {
        println!("   • {} → {}", area, sequence);
    }
    println!("   Press Ctrl+C to quit");
    println!("════════════════════════════════════════════════════════════════");
    println!();

    // Either a signal or a dropped handler ends the session
    let _ = shutdown_rx.recv();

    println!("\n⏳ Shutting down...");
    app.stop();

    println!("\n👋 Hotcorners has exited. Goodbye!");
    Ok(())
}

fn print_banner() {
    let year = chrono::Local::now().year();

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║ hotcorners {} - {}", VERSION, HOMEPAGE);
    println!("║ Copyright (c) 2021-{} machinateur", year);
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
}
