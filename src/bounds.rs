//! Content-bounds detection: the tightest rectangle around a frame's visible
//! pixels. Content shape is unconstrained, so every pixel is inspected.

use image::RgbaImage;

// ── ContentBounds ─────────────────────────────────────────────────────────────

/// Tightest axis-aligned rectangle enclosing a frame's visible pixels.
/// Mins are inclusive, maxes exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl ContentBounds {
    /// Bounds covering an entire `w`×`h` frame.
    pub fn full(w: u32, h: u32) -> Self {
        Self { min_x: 0, min_y: 0, max_x: w, max_y: h }
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Horizontal center of the content (integer floor).
    pub fn center_x(&self) -> u32 {
        self.min_x + self.width() / 2
    }
}

// ── Detection ─────────────────────────────────────────────────────────────────

/// Scan every pixel of `img` and return the bounds of those whose alpha is
/// strictly above `threshold`, or `None` when no pixel qualifies.
pub fn visible_bounds(img: &RgbaImage, threshold: u8) -> Option<ContentBounds> {
    let (width, height) = img.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for y in 0..height {
        for x in 0..width {
            if img.get_pixel(x, y)[3] > threshold {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x + 1);
                max_y = max_y.max(y + 1);
            }
        }
    }

    if min_x >= max_x {
        return None;
    }
    Some(ContentBounds { min_x, min_y, max_x, max_y })
}

/// Like [`visible_bounds`], but a fully transparent frame falls back to the
/// whole frame rectangle: there is nothing to anchor, so the entire cell is
/// treated as content.
pub fn find_content_bounds(img: &RgbaImage, threshold: u8) -> ContentBounds {
    let (width, height) = img.dimensions();
    visible_bounds(img, threshold).unwrap_or_else(|| ContentBounds::full(width, height))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
