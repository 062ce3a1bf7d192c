//! Re-packs the player spritesheet so every frame shares a bottom-center
//! "feet" anchor, then rewrites the frame-index JSON to match.
//!
//! One-shot migration tool: paths and geometry are compiled in, run it once
//! per spritesheet revision and review the output before swapping files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use duskprep::config::RealignConfig;
use duskprep::realign;
use duskprep::sheet::SheetIndex;

const INPUT_IMAGE: &str = "assets/sprites/player.png";
const INPUT_JSON: &str = "assets/sprites/player.json";
const OUTPUT_IMAGE: &str = "assets/sprites/player_fixed.png";
const OUTPUT_JSON: &str = "assets/sprites/player_fixed.json";

fn main() -> Result<()> {
    TermLogger::init(
        log::LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    info!("loading spritesheet from {INPUT_IMAGE}");
    let sheet = image::open(INPUT_IMAGE)
        .with_context(|| format!("failed to open spritesheet {INPUT_IMAGE}"))?
        .to_rgba8();

    info!("loading frame index from {INPUT_JSON}");
    let json = fs::read_to_string(INPUT_JSON)
        .with_context(|| format!("failed to read frame index {INPUT_JSON}"))?;
    let index = SheetIndex::from_json(&json)
        .with_context(|| format!("malformed frame index {INPUT_JSON}"))?;

    let cfg = RealignConfig::default();
    info!(
        "realigning {} frames into {}x{} cells, anchor ({}, {})",
        index.frames.len(), cfg.target_w, cfg.target_h, cfg.anchor_x, cfg.anchor_y
    );

    // The meta block names the image by file name, not by path.
    let image_name = Path::new(OUTPUT_IMAGE)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| OUTPUT_IMAGE.to_string());

    let (canvas, aligned) = realign::realign_sheet(&sheet, &index, &cfg, &image_name)?;

    canvas
        .save(OUTPUT_IMAGE)
        .with_context(|| format!("failed to save {OUTPUT_IMAGE}"))?;
    info!("saved realigned spritesheet to {OUTPUT_IMAGE}");

    let pretty = aligned.to_json_pretty()?;
    fs::write(OUTPUT_JSON, pretty)
        .with_context(|| format!("failed to write {OUTPUT_JSON}"))?;
    info!("saved frame index to {OUTPUT_JSON}");

    info!("done; review {OUTPUT_IMAGE} before replacing the originals");
    Ok(())
}
