// ── RealignConfig ─────────────────────────────────────────────────────────────

/// Fixed configuration for a realignment run.
///
/// The target cell size is a deliberate constant rather than something derived
/// from the observed content: the operator pre-chooses a size large enough for
/// the biggest frame, and the run only reports the observed maximum for a
/// sanity check. This keeps output geometry identical across runs even when
/// the art changes slightly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealignConfig {
    /// Width of every output frame cell in pixels.
    pub target_w: u32,
    /// Height of every output frame cell in pixels.
    pub target_h: u32,
    /// Normalized horizontal anchor in [0, 1]; 0.5 = content centered.
    pub anchor_x: f32,
    /// Normalized vertical anchor in [0, 1]; 1.0 = content bottom on the
    /// cell's bottom edge (the "feet" line).
    pub anchor_y: f32,
    /// Number of grid columns in the repacked sheet.
    pub cols: u32,
    /// A pixel counts as content when its alpha is strictly above this.
    pub alpha_threshold: u8,
}

impl RealignConfig {
    /// 192×192 cells, bottom-center anchor, 4 columns, alpha noise floor 10.
    pub fn default() -> Self {
        Self {
            target_w:        192,
            target_h:        192,
            anchor_x:        0.5,
            anchor_y:        1.0,
            cols:            4,
            alpha_threshold: 10,
        }
    }

    /// Anchor position in cell pixels, rounded to the nearest pixel.
    pub fn anchor_pixel(&self) -> (i64, i64) {
        (
            (self.target_w as f32 * self.anchor_x).round() as i64,
            (self.target_h as f32 * self.anchor_y).round() as i64,
        )
    }
}

// ── BackgroundConfig ──────────────────────────────────────────────────────────

/// Dimensions and look of the painted backdrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundConfig {
    /// Output width in pixels (wide, for horizontal scrolling).
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Side length of the chunky "retro pixel" blocks; 1 disables the pass.
    pub pixel_size: u32,
    /// Stars scattered over the upper half of the sky.
    pub star_count: u32,
}

impl BackgroundConfig {
    /// 1920×720 scrolling backdrop with 4px retro blocks.
    pub fn default() -> Self {
        Self {
            width:      1920,
            height:     720,
            pixel_size: 4,
            star_count: 150,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
