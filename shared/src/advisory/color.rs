//! Leaf colour classification over an HSV raster
//!
//! Pixels are in the 8-bit HSV convention: hue in `[0, 180)`, saturation and
//! value in `[0, 255]`. The ranges below are calibration constants and must
//! not be re-derived.

use crate::models::ColorRatios;

/// Side length of the square raster ratios are computed over
pub const ANALYSIS_SIZE: u32 = 256;

/// Inclusive HSV box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, pixel: [u8; 3]) -> bool {
        (0..3).all(|c| pixel[c] >= self.lower[c] && pixel[c] <= self.upper[c])
    }
}

pub const GREEN_RANGE: HsvRange = HsvRange::new([25, 40, 40], [95, 255, 255]);
pub const YELLOW_RANGE: HsvRange = HsvRange::new([20, 100, 100], [40, 255, 255]);
pub const BROWN_RANGE: HsvRange = HsvRange::new([10, 50, 20], [20, 255, 100]);
pub const GRAY_RANGE: HsvRange = HsvRange::new([0, 0, 40], [180, 40, 200]);

/// Fraction of pixels in each colour range.
///
/// Ranges overlap, so a pixel may count towards several ratios. An empty
/// raster yields all-zero ratios.
pub fn measure_ratios(hsv: &[[u8; 3]]) -> ColorRatios {
    if hsv.is_empty() {
        return ColorRatios::default();
    }

    let (mut green, mut yellow, mut brown, mut gray) = (0usize, 0usize, 0usize, 0usize);
    for &pixel in hsv {
        green += GREEN_RANGE.contains(pixel) as usize;
        yellow += YELLOW_RANGE.contains(pixel) as usize;
        brown += BROWN_RANGE.contains(pixel) as usize;
        gray += GRAY_RANGE.contains(pixel) as usize;
    }

    let total = hsv.len() as f64;
    ColorRatios::new(
        green as f64 / total,
        yellow as f64 / total,
        brown as f64 / total,
        gray as f64 / total,
    )
}

/// Convert one RGB pixel to 8-bit HSV (hue halved to fit in a byte)
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    let hue = ((h / 2.0).round() as u16 % 180) as u8;
    [hue, s.round() as u8, max as u8]
}
