//! Procedural dusk backdrop: a banded sky gradient, a seeded star field and
//! three overlapping mountain ridge layers, finished with a chunky
//! nearest-neighbour pixelation pass for the retro look.
//!
//! Every random choice comes from a fixed-seed generator, so repeated runs
//! paint byte-identical images.

use image::{Rgba, RgbaImage, imageops, imageops::FilterType};

use crate::config::BackgroundConfig;

// ── Palette ──────────────────────────────────────────────────────────────────

/// Sky gradient bands, top to bottom (dark dusk blue down to warm haze).
const SKY_BANDS: [[u8; 3]; 7] = [
    [25, 25, 60],
    [45, 45, 90],
    [70, 60, 110],
    [100, 70, 120],
    [140, 90, 130],
    [180, 120, 140],
    [200, 150, 160],
];

/// One mountain ridge layer. `base_offset` is the ridge baseline measured up
/// from the image bottom; peaks rise `min_height..=max_height` above it.
struct RidgeLayer {
    base_offset: i64,
    min_height: i64,
    max_height: i64,
    color: [u8; 3],
    seed: u64,
}

/// Back-to-front: farthest (darkest) layer first, painted over by nearer ones.
const RIDGE_LAYERS: [RidgeLayer; 3] = [
    RidgeLayer { base_offset: 250, min_height: 80, max_height: 200, color: [30, 30, 50], seed: 0xA1 },
    RidgeLayer { base_offset: 180, min_height: 60, max_height: 150, color: [40, 40, 65], seed: 0xB2 },
    RidgeLayer { base_offset: 120, min_height: 40, max_height: 100, color: [50, 50, 80], seed: 0xC3 },
];

const STAR_SEED: u64 = 42;

// ── Deterministic RNG ─────────────────────────────────────────────────────────

/// Tiny LCG, state advanced per draw. Fixed constants, fixed seeds, so the
/// painted output never changes between runs or machines.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f32(&mut self) -> f32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32 as f32 / u32::MAX as f32
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let span = (hi - lo + 1).max(1);
        lo + (self.next_f32() * span as f32) as i64 % span
    }
}

// ── Painting ──────────────────────────────────────────────────────────────────

/// Paint the full backdrop described by `cfg`. Pure; the caller saves it.
pub fn paint(cfg: &BackgroundConfig) -> RgbaImage {
    let mut img = RgbaImage::new(cfg.width, cfg.height);

    paint_sky(&mut img);
    scatter_stars(&mut img, cfg.star_count);
    for layer in &RIDGE_LAYERS {
        paint_ridge(&mut img, layer);
    }

    pixelate(img, cfg.pixel_size)
}

/// Horizontal gradient bands, top to bottom. The last band absorbs any
/// remainder rows when the height does not divide evenly.
fn paint_sky(img: &mut RgbaImage) {
    let (width, height) = img.dimensions();
    let band_h = (height / SKY_BANDS.len() as u32).max(1);
    for y in 0..height {
        let band = ((y / band_h) as usize).min(SKY_BANDS.len() - 1);
        let [r, g, b] = SKY_BANDS[band];
        for x in 0..width {
            img.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }
}

/// Scatter small white stars over the upper half of the sky.
fn scatter_stars(img: &mut RgbaImage, count: u32) {
    let (width, height) = img.dimensions();
    if width == 0 || height < 2 {
        return;
    }
    let mut rng = Lcg::new(STAR_SEED);
    for _ in 0..count {
        let x = rng.range(0, width as i64 - 1) as u32;
        let y = rng.range(0, height as i64 / 2 - 1) as u32;
        // Mostly 1px stars, the odd 2px one.
        let size = if rng.next_f32() < 0.75 { 1u32 } else { 2 };
        let brightness = rng.range(180, 255) as u8;
        for dy in 0..size {
            for dx in 0..size {
                let (px, py) = (x + dx, y + dy);
                if px < width && py < height {
                    img.put_pixel(px, py, Rgba([brightness, brightness, brightness, 255]));
                }
            }
        }
    }
}

/// Paint one mountain layer: walk left to right generating alternating peak
/// and valley points, then fill every column from the interpolated ridge line
/// down to the image bottom.
fn paint_ridge(img: &mut RgbaImage, layer: &RidgeLayer) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let mut rng = Lcg::new(layer.seed);
    let base_y = height as i64 - layer.base_offset;

    // Ridge polyline, starting at the baseline's lowest point on the left
    // edge and ending past the right edge.
    let mut points: Vec<(i64, i64)> = vec![(0, base_y + layer.max_height)];
    let mut x = 0i64;
    while x < width as i64 {
        let peak_x = x + rng.range(40, 120);
        let peak_y = base_y - rng.range(layer.min_height, layer.max_height);
        let valley_x = peak_x + rng.range(40, 120);
        let valley_y = base_y - rng.range(0, layer.min_height / 2);
        points.push((peak_x, peak_y));
        points.push((valley_x, valley_y));
        x = valley_x;
    }
    points.push((width as i64, base_y + layer.max_height));

    let [r, g, b] = layer.color;
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x1 <= x0 {
            continue;
        }
        for col in x0.max(0)..x1.min(width as i64) {
            // Linear interpolation along the segment.
            let t = (col - x0) as f64 / (x1 - x0) as f64;
            let ridge = y0 as f64 + t * (y1 - y0) as f64;
            let top = (ridge.round() as i64).clamp(0, height as i64);
            for row in top..height as i64 {
                img.put_pixel(col as u32, row as u32, Rgba([r, g, b, 255]));
            }
        }
    }
}

/// Downscale then upscale with nearest-neighbour sampling so the image reads
/// as `pixel_size`-sized blocks.
fn pixelate(img: RgbaImage, pixel_size: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    if pixel_size <= 1 || width / pixel_size == 0 || height / pixel_size == 0 {
        return img;
    }
    let small = imageops::resize(
        &img,
        width / pixel_size,
        height / pixel_size,
        FilterType::Nearest,
    );
    imageops::resize(&small, width, height, FilterType::Nearest)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn small_cfg() -> BackgroundConfig {
        BackgroundConfig { width: 96, height: 96, pixel_size: 1, star_count: 20 }
    }

    #[test]
    fn output_has_configured_dimensions() {
        let img = paint(&small_cfg());
        assert_eq!(img.dimensions(), (96, 96));
    }

    #[test]
    fn default_size_survives_pixelation() {
        let cfg = BackgroundConfig { width: 192, height: 72, ..BackgroundConfig::default() };
        let img = paint(&cfg);
        assert_eq!(img.dimensions(), (192, 72));
    }

    #[test]
    fn painting_is_deterministic() {
        let cfg = small_cfg();
        assert_eq!(paint(&cfg).as_raw(), paint(&cfg).as_raw());
    }

    #[test]
    fn every_pixel_is_opaque() {
        let img = paint(&small_cfg());
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn bottom_row_is_the_nearest_ridge_color() {
        // Ridge layers always reach the image bottom, and the nearest layer
        // paints last.
        let cfg = BackgroundConfig { width: 320, height: 720, pixel_size: 1, star_count: 0 };
        let img = paint(&cfg);
        let [r, g, b] = RIDGE_LAYERS[2].color;
        for x in 0..img.width() {
            assert_eq!(*img.get_pixel(x, 719), Rgba([r, g, b, 255]), "column {x}");
        }
    }

    #[test]
    fn top_row_is_sky_without_stars() {
        let cfg = BackgroundConfig { width: 64, height: 700, pixel_size: 1, star_count: 0 };
        let img = paint(&cfg);
        let [r, g, b] = SKY_BANDS[0];
        assert_eq!(*img.get_pixel(0, 0), Rgba([r, g, b, 255]));
    }

    #[test]
    fn stars_brighten_the_upper_half_only() {
        let cfg = BackgroundConfig { width: 256, height: 700, pixel_size: 1, star_count: 200 };
        let starless = BackgroundConfig { star_count: 0, ..cfg };
        let with_stars = paint(&cfg);
        let without = paint(&starless);
        let mut changed_lower_half = false;
        for y in 351..700u32 {
            for x in 0..256u32 {
                if with_stars.get_pixel(x, y) != without.get_pixel(x, y) {
                    changed_lower_half = true;
                }
            }
        }
        assert!(!changed_lower_half, "stars must stay in the upper half of the sky");
        assert_ne!(with_stars.as_raw(), without.as_raw(), "stars must change some pixels");
    }

    #[test]
    fn pixelate_produces_uniform_blocks() {
        let mut img = RgbaImage::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                img.put_pixel(x, y, Rgba([x as u8 * 30, y as u8 * 30, 0, 255]));
            }
        }
        let out = pixelate(img, 4);
        assert_eq!(out.dimensions(), (8, 8));
        // Each 4x4 block must be a single color.
        for by in 0..2u32 {
            for bx in 0..2u32 {
                let sample = *out.get_pixel(bx * 4, by * 4);
                for dy in 0..4 {
                    for dx in 0..4 {
                        assert_eq!(*out.get_pixel(bx * 4 + dx, by * 4 + dy), sample);
                    }
                }
            }
        }
    }

    #[test]
    fn pixelate_of_one_is_identity() {
        let cfg = small_cfg();
        let img = paint(&cfg);
        let same = pixelate(img.clone(), 1);
        assert_eq!(img.as_raw(), same.as_raw());
    }

    #[test]
    fn lcg_range_stays_in_bounds() {
        let mut rng = Lcg::new(7);
        for _ in 0..1000 {
            let v = rng.range(40, 120);
            assert!((40..=120).contains(&v), "{v} out of range");
        }
    }
}
