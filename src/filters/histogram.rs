//! Lightness histogram.
//!
//! One bucket per quantized lightness level of the HSL representation.
//! Built in a single pass; the source image is only read.

use ndarray::ArrayView3;

use crate::filters::color_science::{pixel_lightness_level, LEVELS};
use crate::raster::{pixel_at, Raster};

/// Pixel counts per quantized lightness level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    pub fn new() -> Self {
        Histogram { counts: [0; LEVELS] }
    }

    /// Histogram of every pixel in `raster`.
    pub fn from_raster(raster: &Raster) -> Self {
        lightness_histogram_u8(raster.samples())
    }

    /// Count one pixel at lightness `level`.
    #[inline]
    pub fn add_level(&mut self, level: usize) {
        self.counts[level] += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn count(&self, level: usize) -> u64 {
        self.counts[level]
    }

    /// Number of pixels counted so far.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram::new()
    }
}

impl From<[u64; LEVELS]> for Histogram {
    fn from(counts: [u64; LEVELS]) -> Self {
        Histogram { counts }
    }
}

/// Build the lightness histogram of an image.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// Histogram whose counts sum to height * width
pub fn lightness_histogram_u8(input: ArrayView3<u8>) -> Histogram {
    let (height, width, _) = input.dim();
    let mut histogram = Histogram::new();

    for y in 0..height {
        for x in 0..width {
            histogram.add_level(pixel_lightness_level(pixel_at(&input, y, x)));
        }
    }
    histogram
}
