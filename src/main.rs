//! Reversi GUI
//!
//! Play 6x6 Reversi against the alpha-beta engine, or watch two engines play.
//! The first argument is an optional config file (default `reversi.toml`).

use std::path::PathBuf;

use reversi::config::{AppConfig, DEFAULT_CONFIG_PATH};
use reversi::ui::ReversiApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = AppConfig::load_or_default(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(path = %path.display(), found = path.exists(), mode = ?config.ui.mode, "configuration loaded");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([700.0, 480.0])
            .with_title("Reversi 6x6"),
        ..Default::default()
    };

    eframe::run_native(
        "Reversi",
        options,
        Box::new(|cc| Ok(Box::new(ReversiApp::new(cc, config)))),
    )?;
    Ok(())
}
