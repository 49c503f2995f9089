//! Grayscale conversion filter.
//!
//! Uses the HSL lightness of each pixel, `(max + min) / 2`, rather than a
//! weighted luminosity. Already gray pixels come out unchanged.

use ndarray::{Array3, ArrayView3};

use crate::filters::color_science::{hsl_to_pixel, pixel_to_hsl};
use crate::raster::{pixel_at, put_rgba};

/// Convert an image to grayscale by dropping hue and saturation.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// RGBA image with R=G=B=lightness, alpha 255
pub fn grayscale_hsl_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let (_, _, l) = pixel_to_hsl(pixel_at(&input, y, x));
            put_rgba(&mut output, y, x, hsl_to_pixel(0.0, 0.0, l));
        }
    }

    output
}
