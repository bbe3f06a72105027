//! Bricks entry point
//!
//! Runs a headless session driven by the autopilot and can dump the last
//! frame as a PPM image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bricks::audio::AudioManager;
use bricks::host::{Autopilot, FramePacer};
use bricks::persistence::LevelCatalog;
use bricks::renderer::FramebufferRenderer;
use bricks::{Game, Settings};

#[derive(Parser, Debug)]
#[command(name = "bricks")]
#[command(about = "Fixed-timestep brick breaker, played by a seeded autopilot")]
struct Cli {
    /// Settings file (JSON); defaults are used when it is missing
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// Directory holding the level files
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    /// Autopilot seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Do not sleep between frames
    #[arg(long)]
    unpaced: bool,
    /// Write the last rendered frame to this PPM file
    #[arg(long)]
    screenshot: Option<PathBuf>,
    /// Highscore file
    #[arg(long)]
    highscore: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings);
    if let Some(dir) = cli.levels {
        settings.level_dir = dir;
    }
    if let Some(path) = cli.highscore {
        settings.highscore_path = path;
    }

    log::info!("Bricks starting...");
    let catalog = LevelCatalog::from_dir(&settings.level_dir, &settings.level_extension)
        .with_context(|| format!("failed loading levels from {}", settings.level_dir.display()))?;

    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let renderer = FramebufferRenderer::new(settings.screen_width, settings.screen_height);
    let mut game = Game::new(catalog, &settings, renderer, Autopilot::new(cli.seed), audio)?
        .with_frame_limit(cli.frames);
    if cli.unpaced {
        game = game.with_pacer(FramePacer::unpaced(settings.frame_ms()));
    }

    game.run()?;

    if let Some(path) = cli.screenshot {
        game.renderer()
            .framebuffer()
            .save_ppm(&path)
            .with_context(|| format!("failed writing screenshot {}", path.display()))?;
        log::info!("Screenshot written to {}", path.display());
    }

    Ok(())
}
