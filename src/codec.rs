//! Image file boundary: decode files into [`Raster`]s and encode them back
//! as PNG or JPEG.
//!
//! Decoding accepts whatever container the `image` crate recognizes and
//! converts it to 8-bit RGBA. JPEG output drops the alpha channel since the
//! format has none.

use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use ndarray::Array3;
use tracing::debug;

use crate::config::{OutputFormat, JPEG_QUALITY};
use crate::errors::{invalid_dimensions, Result};
use crate::raster::{pixel_at, Raster};

/// Read and decode an image file.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Raster> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_bytes(&bytes)
}

/// Decode an in-memory encoded image.
pub fn decode_bytes(bytes: &[u8]) -> Result<Raster> {
    let img = image::load_from_memory(bytes)?;
    raster_from_image(&img)
}

/// Convert a decoded image to an RGBA raster anchored at the origin.
pub fn raster_from_image(img: &DynamicImage) -> Result<Raster> {
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    let samples = Array3::from_shape_vec((height, width, 4), rgba.into_raw())
        .map_err(invalid_dimensions)?;
    Raster::from_samples(samples)
}

/// Copy a raster into an `image` RGBA buffer.
pub fn to_rgba_image(raster: &Raster) -> RgbaImage {
    let samples = raster.samples();
    RgbaImage::from_fn(raster.width() as u32, raster.height() as u32, |x, y| {
        Rgba(pixel_at(&samples, y as usize, x as usize).to_rgba())
    })
}

/// Encode a raster in the given output format.
pub fn encode(raster: &Raster, format: OutputFormat) -> Result<Vec<u8>> {
    let img = to_rgba_image(raster);
    let (width, height) = img.dimensions();
    let mut bytes = Vec::new();

    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(
                img.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    Ok(bytes)
}

/// Encode `raster` and write it to `path`.
///
/// Encoding completes before the file is created, so a failed encode leaves
/// nothing behind.
pub fn write_file(raster: &Raster, format: OutputFormat, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(raster, format)?;
    fs::write(path, &bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
