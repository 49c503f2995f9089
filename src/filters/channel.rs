//! Single channel extraction: keep one of red, green or blue and zero the
//! other two. Pure per-pixel map, output alpha is always opaque.

use ndarray::{Array3, ArrayView3};

use crate::raster::{pixel_at, Channel};

/// Extract one color channel.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `channel` - Channel to keep
///
/// # Returns
/// RGBA image with only `channel` set and alpha 255
pub fn extract_channel_u8(input: ArrayView3<u8>, channel: Channel) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));
    let c = channel.index();

    for y in 0..height {
        for x in 0..width {
            output[[y, x, c]] = pixel_at(&input, y, x).sample(channel);
            output[[y, x, 3]] = u8::MAX;
        }
    }
    output
}
