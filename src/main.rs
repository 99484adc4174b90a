//! Versebar - a minimal audio player bar
//! Built with iced, playing through rodio

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod audio;
mod cli;
mod features;
mod player;
mod ui;
mod utils;

use clap::Parser;

use app::{App, LaunchOptions};
use features::Settings;
use player::{SourceId, clamp_volume};

const WINDOW_WIDTH: f32 = 720.0;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();

    // Settings file first, command line flags on top
    let mut settings = match &cli.config {
        Some(path) if path.exists() => Settings::load_from_file(path)?,
        Some(_) => Settings::default(),
        None => Settings::load(),
    };
    if let Some(volume) = cli.volume {
        settings.volume = clamp_volume(volume);
    }
    if cli.repeat {
        settings.repeat = true;
    }

    tracing::info!("Starting versebar on {}", cli.source);

    let options = LaunchOptions {
        source: SourceId::new(cli.source),
        settings,
        settings_path: cli.config,
    };

    let window_height = ui::components::PLAYER_BAR_HEIGHT + 48.0;

    iced::application(move || App::new(options.clone()), App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(WINDOW_WIDTH, window_height),
            exit_on_close_request: false,
            ..Default::default()
        })
        .antialiasing(true)
        .run()?;

    Ok(())
}
