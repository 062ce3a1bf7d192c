//! Paints the layered parallax dusk backdrop that scrolls behind the level.

use anyhow::{Context, Result};
use log::info;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use duskprep::background;
use duskprep::config::BackgroundConfig;

const OUTPUT_IMAGE: &str = "assets/images/background.png";

fn main() -> Result<()> {
    TermLogger::init(
        log::LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let cfg = BackgroundConfig::default();
    info!(
        "painting {}x{} backdrop ({}px retro blocks)",
        cfg.width, cfg.height, cfg.pixel_size
    );

    let img = background::paint(&cfg);
    img.save(OUTPUT_IMAGE)
        .with_context(|| format!("failed to save {OUTPUT_IMAGE}"))?;
    info!("saved backdrop to {OUTPUT_IMAGE}");
    Ok(())
}
