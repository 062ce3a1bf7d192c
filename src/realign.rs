//! Frame realignment: extract every frame of a spritesheet, find its visible
//! content, and re-render it into a uniform grid so all frames share one
//! anchor point (bottom-center by default, so a character's feet stay put
//! across animation poses).
//!
//! Everything here is pure over in-memory images and descriptors; the binary
//! does the file I/O.

use anyhow::{Result, ensure};
use image::{RgbaImage, imageops};
use indexmap::IndexMap;
use log::{info, warn};

use crate::bounds::{self, ContentBounds};
use crate::config::RealignConfig;
use crate::sheet::{AlignedFrame, AlignedIndex, FrameRect, SheetIndex, SheetMeta, SheetSize};

// ── Frame extraction ──────────────────────────────────────────────────────────

/// Cut one frame's rectangle out of the source spritesheet.
///
/// A rectangle that leaves the source image is a broken index, not something
/// to paper over: fail fast and name the frame so the operator can fix it.
pub fn extract_frame(sheet: &RgbaImage, name: &str, rect: &FrameRect) -> Result<RgbaImage> {
    let (sheet_w, sheet_h) = sheet.dimensions();
    let fits = rect.x.checked_add(rect.w).is_some_and(|right| right <= sheet_w)
        && rect.y.checked_add(rect.h).is_some_and(|bottom| bottom <= sheet_h);
    ensure!(
        fits,
        "frame '{name}' rect ({}, {}) {}x{} lies outside the {sheet_w}x{sheet_h} source image",
        rect.x, rect.y, rect.w, rect.h
    );
    Ok(imageops::crop_imm(sheet, rect.x, rect.y, rect.w, rect.h).to_image())
}

// ── Compositing ───────────────────────────────────────────────────────────────

/// Place a frame onto a blank target-size canvas so that its content's
/// horizontal center lands on the anchor column and its content's bottom edge
/// on the anchor row.
///
/// The whole original frame is translated (never scaled); pixels pushed past
/// the canvas edge are silently clipped.
pub fn compose_frame(frame: &RgbaImage, content: &ContentBounds, cfg: &RealignConfig) -> RgbaImage {
    let (anchor_x, anchor_y) = cfg.anchor_pixel();
    let paste_x = anchor_x - content.center_x() as i64;
    let paste_y = anchor_y - content.max_y as i64;

    let mut canvas = RgbaImage::new(cfg.target_w, cfg.target_h);
    blit_clipped(&mut canvas, frame, paste_x, paste_y);
    canvas
}

/// Straight per-pixel copy of `src` into `dst` at the given offset. Alpha is
/// copied, not blended — the destination starts fully transparent.
fn blit_clipped(dst: &mut RgbaImage, src: &RgbaImage, offset_x: i64, offset_y: i64) {
    let (dst_w, dst_h) = dst.dimensions();
    for y in 0..src.height() {
        let dy = offset_y + y as i64;
        if dy < 0 || dy >= dst_h as i64 {
            continue;
        }
        for x in 0..src.width() {
            let dx = offset_x + x as i64;
            if dx < 0 || dx >= dst_w as i64 {
                continue;
            }
            dst.put_pixel(dx as u32, dy as u32, *src.get_pixel(x, y));
        }
    }
}

// ── Sheet assembly ────────────────────────────────────────────────────────────

/// Realign every frame of `index` and pack the results into a row-major grid
/// of `cfg.cols` columns. Returns the packed image together with the
/// rewritten frame index (`output_image_name` goes into its `meta` block).
pub fn realign_sheet(
    sheet: &RgbaImage,
    index: &SheetIndex,
    cfg: &RealignConfig,
    output_image_name: &str,
) -> Result<(RgbaImage, AlignedIndex)> {
    ensure!(cfg.cols > 0, "column count must be at least 1");
    ensure!(!index.frames.is_empty(), "frame index is empty; nothing to realign");

    let count = index.frames.len() as u32;
    let rows = count.div_ceil(cfg.cols);
    let canvas_w = cfg.cols * cfg.target_w;
    let canvas_h = rows * cfg.target_h;

    let mut canvas = RgbaImage::new(canvas_w, canvas_h);
    let mut frames = IndexMap::with_capacity(index.frames.len());
    let mut max_content_w = 0u32;
    let mut max_content_h = 0u32;

    for (i, (name, input)) in index.frames.iter().enumerate() {
        let frame_img = extract_frame(sheet, name, &input.frame)?;

        let content = match bounds::visible_bounds(&frame_img, cfg.alpha_threshold) {
            Some(b) => b,
            None => {
                warn!("{name}: fully transparent, anchoring the whole {}x{} frame", input.frame.w, input.frame.h);
                ContentBounds::full(input.frame.w, input.frame.h)
            }
        };
        if content.width() > cfg.target_w || content.height() > cfg.target_h {
            warn!(
                "{name}: content {}x{} exceeds the {}x{} cell and will be clipped",
                content.width(), content.height(), cfg.target_w, cfg.target_h
            );
        }

        let feet_offset = input.frame.h - content.max_y;
        info!(
            "{name}: content {}x{}, feet_offset={feet_offset}",
            content.width(), content.height()
        );
        max_content_w = max_content_w.max(content.width());
        max_content_h = max_content_h.max(content.height());

        let composed = compose_frame(&frame_img, &content, cfg);

        let cell_x = (i as u32 % cfg.cols) * cfg.target_w;
        let cell_y = (i as u32 / cfg.cols) * cfg.target_h;
        imageops::replace(&mut canvas, &composed, cell_x as i64, cell_y as i64);
        info!("{name}: placed at ({cell_x}, {cell_y})");

        frames.insert(name.clone(), AlignedFrame {
            frame: FrameRect { x: cell_x, y: cell_y, w: cfg.target_w, h: cfg.target_h },
            sprite_source_size: FrameRect { x: 0, y: 0, w: cfg.target_w, h: cfg.target_h },
            source_size: SheetSize { w: cfg.target_w, h: cfg.target_h },
        });
    }

    // Sizing never feeds back from content; this line is the operator's
    // sanity check that the configured cell really fits everything.
    info!(
        "max content size: {max_content_w}x{max_content_h} (target cell {}x{})",
        cfg.target_w, cfg.target_h
    );

    let meta = SheetMeta {
        image: output_image_name.to_string(),
        size: SheetSize { w: canvas_w, h: canvas_h },
    };
    Ok((canvas, AlignedIndex { frames, meta }))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
