#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Firefly experience.

mod driver;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use firefly_core::GAME_TITLE;
use firefly_game::{preflight, DirectoryLevels, Game, GameConfig};
use firefly_rendering::{Color, Palette, Presentation, RenderingBackend, SceneStyle};
use firefly_rendering_macroquad::{AssetPaths, MacroquadBackend};
use firefly_settings::Settings;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::driver::Driver;

/// Command-line arguments accepted by the Firefly binary.
#[derive(Debug, Parser)]
#[command(name = "firefly", about = "Follow the firefly through the dark maze")]
struct CliArgs {
    /// Settings file; missing files fall back to built-in defaults.
    #[arg(long, value_name = "PATH", default_value = "config.toml")]
    config: PathBuf,
    /// Logs the measured frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Firefly command-line interface.
fn main() {
    init_tracing();

    let args = CliArgs::parse();
    if let Err(err) = run(args) {
        error!(error = %format!("{err:#}"), "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: CliArgs) -> Result<()> {
    let settings = Settings::load_or_default(&args.config)
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?;

    let levels = DirectoryLevels::new(settings.paths.levels.clone());
    let (first, last) = (settings.game.initial_level, settings.game.total_levels);
    preflight(&levels, first, last)
        .with_context(|| format!("campaign in {} is not playable", levels.root().display()))?;

    let game = Game::new(GameConfig::from_settings(&settings), Box::new(levels));
    let style = SceneStyle::new(settings.graphics.cell_size as f32);
    let mut driver = Driver::new(game, style);

    let colors = settings.colors;
    let presentation = Presentation::new(
        GAME_TITLE,
        settings.graphics.screen_width,
        settings.graphics.screen_height,
        Color::from(colors.background),
        Palette {
            wall: Color::from(colors.wall),
            floor: Color::from(colors.floor),
            player: Color::from(colors.player),
        },
        driver.initial_scene(),
    )?;

    let backend = MacroquadBackend::new()
        .with_show_fps(args.show_fps)
        .with_frame_budget(settings.frame_budget())
        .with_asset_paths(AssetPaths::from_settings(&settings));

    info!(
        config = %args.config.display(),
        levels = settings.game.total_levels,
        "starting"
    );
    backend.run(presentation, move |dt, input, scene| driver.frame(dt, input, scene))
}
