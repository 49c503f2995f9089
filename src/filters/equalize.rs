//! HSL lightness histogram equalization.
//!
//! The lightness histogram is turned into a cumulative distribution and from
//! there into a [`RemapTable`] from old to new lightness level. Hue and
//! saturation of every pixel pass through unchanged, so the filter stretches
//! brightness without shifting colors.
//!
//! The image is read twice: once to build the histogram, once to render the
//! remapped pixels. Output is always RGBA with opaque alpha.

use ndarray::{Array3, ArrayView3};
use tracing::debug;

use crate::filters::color_science::{
    hsl_to_pixel, normalize, pixel_lightness_level, pixel_to_hsl, LEVELS, MAX_LEVEL,
};
use crate::filters::histogram::{lightness_histogram_u8, Histogram};
use crate::raster::{pixel_at, put_rgba, Pixel};

// ============================================================================
// Remap Table
// ============================================================================

/// Lookup from quantized lightness level to its equalized level.
///
/// Always monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    levels: [u8; LEVELS],
}

impl RemapTable {
    /// Table that maps every level to itself.
    pub fn identity() -> Self {
        let mut levels = [0u8; LEVELS];
        for (i, level) in levels.iter_mut().enumerate() {
            *level = i as u8;
        }
        RemapTable { levels }
    }

    /// Derive the equalizing table for `histogram`.
    ///
    /// Each level maps to `floor(cdf * MAX_LEVEL + 0.5)` where `cdf` is the
    /// inclusive cumulative share of pixels at or below that level. A zero
    /// `total_pixels` yields the identity table.
    pub fn equalize(histogram: &Histogram, total_pixels: u64) -> Self {
        if total_pixels == 0 {
            return RemapTable::identity();
        }

        let total = total_pixels as f64;
        let mut levels = [0u8; LEVELS];
        let mut cdf = 0.0;

        for (level, &count) in levels.iter_mut().zip(histogram.counts()) {
            cdf += count as f64 / total;
            *level = (cdf * MAX_LEVEL + 0.5).floor().min(MAX_LEVEL) as u8;
        }
        RemapTable { levels }
    }

    pub fn get(&self, level: usize) -> u8 {
        self.levels[level]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.levels
    }

    /// Equalized lightness (0.0-1.0) of `pixel`.
    #[inline]
    pub fn remap_lightness(&self, pixel: Pixel) -> f64 {
        normalize(self.levels[pixel_lightness_level(pixel)])
    }
}

// ============================================================================
// Equalization Filter
// ============================================================================

/// Equalize the HSL lightness of an image.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// RGBA image of the same size with equalized lightness and opaque alpha
pub fn equalize_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    let histogram = lightness_histogram_u8(input);
    debug!("histogram calculated for {}x{} pixels", width, height);

    let table = RemapTable::equalize(&histogram, (height * width) as u64);

    for y in 0..height {
        for x in 0..width {
            let pixel = pixel_at(&input, y, x);
            let (h, s, _) = pixel_to_hsl(pixel);
            put_rgba(&mut output, y, x, hsl_to_pixel(h, s, table.remap_lightness(pixel)));
        }
    }
    output
}
