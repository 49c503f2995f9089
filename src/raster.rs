//! In-memory raster images.
//!
//! A [`Raster`] pairs a sample array of shape (height, width, channels) with
//! explicit pixel [`Bounds`]. Filters read through the [`Pixel`] accessor so
//! that grayscale (1 channel), RGB (3 channels) and RGBA (4 channels) buffers
//! are handled the same way.
//!
//! Samples are always 8 bit. Decoded images of any other depth are converted
//! at the codec boundary.

use ndarray::{Array3, ArrayView3};

use crate::errors::{invalid_dimensions, Result};

// ============================================================================
// Bounds
// ============================================================================

/// Pixel rectangle of an image. `max_x` and `max_y` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Bounds { min_x, min_y, max_x, max_y }
    }

    /// Bounds of a `width` x `height` image anchored at the origin.
    ///
    /// Fails if either side doesn't fit the `i32` coordinate range.
    pub fn from_size(width: usize, height: usize) -> Result<Self> {
        let max_x = i32::try_from(width)
            .map_err(|_| invalid_dimensions(format!("width {width} out of range")))?;
        let max_y = i32::try_from(height)
            .map_err(|_| invalid_dimensions(format!("height {height} out of range")))?;
        Ok(Bounds::new(0, 0, max_x, max_y))
    }

    /// Zero when `max_x <= min_x`.
    pub fn width(&self) -> usize {
        span(self.min_x, self.max_x)
    }

    pub fn height(&self) -> usize {
        span(self.min_y, self.max_y)
    }

    /// Number of pixels inside the bounds, independent of where they start.
    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

fn span(min: i32, max: i32) -> usize {
    if max > min {
        max.abs_diff(min) as usize
    } else {
        0
    }
}

// ============================================================================
// Pixel
// ============================================================================

/// Color channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// One pixel: red, green and blue samples plus the alpha sample if the
/// source buffer has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Pixel {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b, a: None }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b, a: Some(u8::MAX) }
    }

    pub fn sample(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// RGBA samples, treating a missing alpha as fully opaque.
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a.unwrap_or(u8::MAX)]
    }
}

/// Read the pixel at row `y`, column `x` of a sample array.
///
/// 1 channel is gray, 2 is gray + alpha, 3 is RGB and 4 is RGBA. Channels
/// past the fourth are ignored, and a view without channels reads as black.
#[inline]
pub fn pixel_at(input: &ArrayView3<u8>, y: usize, x: usize) -> Pixel {
    match input.dim().2 {
        0 => Pixel::rgb(0, 0, 0),
        1 => {
            let v = input[[y, x, 0]];
            Pixel { r: v, g: v, b: v, a: None }
        }
        2 => {
            let v = input[[y, x, 0]];
            Pixel { r: v, g: v, b: v, a: Some(input[[y, x, 1]]) }
        }
        3 => Pixel::rgb(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]),
        _ => Pixel {
            r: input[[y, x, 0]],
            g: input[[y, x, 1]],
            b: input[[y, x, 2]],
            a: Some(input[[y, x, 3]]),
        },
    }
}

/// Write `pixel` as RGBA into row `y`, column `x` of a 4 channel array.
#[inline]
pub fn put_rgba(output: &mut Array3<u8>, y: usize, x: usize, pixel: Pixel) {
    let [r, g, b, a] = pixel.to_rgba();
    output[[y, x, 0]] = r;
    output[[y, x, 1]] = g;
    output[[y, x, 2]] = b;
    output[[y, x, 3]] = a;
}

// ============================================================================
// Raster
// ============================================================================

/// An image held entirely in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    bounds: Bounds,
    samples: Array3<u8>,
}

impl Raster {
    /// Wrap `samples` (height, width, channels) with explicit bounds.
    ///
    /// Fails if the array shape doesn't match the bounds or the channel
    /// count is not 1, 3 or 4.
    pub fn new(bounds: Bounds, samples: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = samples.dim();
        if !matches!(channels, 1 | 3 | 4) {
            return Err(invalid_dimensions(format!(
                "unsupported channel count {channels} (must be 1, 3 or 4)"
            )));
        }
        if width != bounds.width() || height != bounds.height() {
            return Err(invalid_dimensions(format!(
                "sample array is {width}x{height} but bounds are {}x{}",
                bounds.width(),
                bounds.height()
            )));
        }
        Ok(Raster { bounds, samples })
    }

    /// Wrap `samples` with bounds anchored at the origin.
    pub fn from_samples(samples: Array3<u8>) -> Result<Self> {
        let (height, width, _) = samples.dim();
        Raster::new(Bounds::from_size(width, height)?, samples)
    }

    /// Build an RGBA raster from row-major pixels.
    pub fn from_pixels(width: usize, height: usize, pixels: &[Pixel]) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(invalid_dimensions(format!(
                "{} pixels supplied for a {width}x{height} image",
                pixels.len()
            )));
        }
        let mut samples = Array3::<u8>::zeros((height, width, 4));
        for (i, pixel) in pixels.iter().enumerate() {
            put_rgba(&mut samples, i / width, i % width, *pixel);
        }
        Raster::from_samples(samples)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    pub fn channels(&self) -> usize {
        self.samples.dim().2
    }

    pub fn samples(&self) -> ArrayView3<'_, u8> {
        self.samples.view()
    }

    pub fn into_samples(self) -> Array3<u8> {
        self.samples
    }

    /// Pixel at absolute coordinates, `None` outside the bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let row = (y - self.bounds.min_y) as usize;
        let col = (x - self.bounds.min_x) as usize;
        Some(pixel_at(&self.samples.view(), row, col))
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let view = self.samples.view();
        let (height, width, _) = view.dim();
        (0..height).flat_map(move |y| (0..width).map(move |x| pixel_at(&view, y, x)))
    }
}
