//! Filter modules and the operation registry.
//!
//! ## Supported Formats
//!
//! All filters accept 8-bit images with 1, 3, or 4 channels:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! Every filter returns a new RGBA8 image of the same size with opaque alpha.
//! Inputs are never modified.
//!
//! ## Operations
//!
//! Filters are selected by name through [`Filter::from_name`]:
//!
//! | Name | Effect |
//! |------|--------|
//! | `ExtractRedChannel` | keep red, zero green and blue |
//! | `ExtractGreenChannel` | keep green, zero red and blue |
//! | `ExtractBlueChannel` | keep blue, zero red and green |
//! | `HistogramNormalization` | equalize HSL lightness (default) |
//! | `ConvertToGrayscale` | replace each pixel by its HSL lightness |
//! | `FindEdgesWithSobel` | known name, but edge detection is not implemented |

pub mod color_science;
pub mod histogram;
pub mod equalize;
pub mod channel;
pub mod grayscale;

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use crate::errors::{not_implemented, ImageFilterError, Result};
use crate::raster::{Channel, Raster};

/// Operation used when none is named.
pub const DEFAULT_OPERATION: &str = "HistogramNormalization";

const SOBEL_OPERATION: &str = "FindEdgesWithSobel";

/// Registered operation names, in listing order.
const OPERATION_NAMES: [&str; 6] = [
    "ExtractRedChannel",
    "ExtractGreenChannel",
    "ExtractBlueChannel",
    DEFAULT_OPERATION,
    SOBEL_OPERATION,
    "ConvertToGrayscale",
];

/// A pixel filter. Holds no state, so one value can be applied to any
/// number of images from any thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    ExtractChannel(Channel),
    #[default]
    HistogramEqualization,
    Grayscale,
}

impl Filter {
    /// Look up a filter by its registered name.
    ///
    /// Unknown names fail with [`ImageFilterError::UnknownOperation`]. The
    /// Sobel name is known but fails with [`ImageFilterError::NotImplemented`].
    pub fn from_name(name: &str) -> Result<Filter> {
        match name {
            "ExtractRedChannel" => Ok(Filter::ExtractChannel(Channel::Red)),
            "ExtractGreenChannel" => Ok(Filter::ExtractChannel(Channel::Green)),
            "ExtractBlueChannel" => Ok(Filter::ExtractChannel(Channel::Blue)),
            DEFAULT_OPERATION => Ok(Filter::HistogramEqualization),
            "ConvertToGrayscale" => Ok(Filter::Grayscale),
            SOBEL_OPERATION => Err(not_implemented(format!(
                "{SOBEL_OPERATION} (edge detection is not available)"
            ))),
            _ => Err(ImageFilterError::UnknownOperation(
                name.to_string(),
                OPERATION_NAMES.join(", "),
            )),
        }
    }

    /// All registered operation names, including ones that are not implemented.
    pub fn names() -> impl Iterator<Item = &'static str> {
        OPERATION_NAMES.iter().copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::ExtractChannel(Channel::Red) => "ExtractRedChannel",
            Filter::ExtractChannel(Channel::Green) => "ExtractGreenChannel",
            Filter::ExtractChannel(Channel::Blue) => "ExtractBlueChannel",
            Filter::HistogramEqualization => DEFAULT_OPERATION,
            Filter::Grayscale => "ConvertToGrayscale",
        }
    }

    /// Run the filter over a sample array (height, width, channels).
    pub fn apply_samples(&self, input: ArrayView3<u8>) -> Array3<u8> {
        match self {
            Filter::ExtractChannel(channel) => channel::extract_channel_u8(input, *channel),
            Filter::HistogramEqualization => equalize::equalize_u8(input),
            Filter::Grayscale => grayscale::grayscale_hsl_u8(input),
        }
    }

    /// Run the filter over `raster`, returning a new raster with the same bounds.
    pub fn apply(&self, raster: &Raster) -> Result<Raster> {
        Raster::new(raster.bounds(), self.apply_samples(raster.samples()))
    }
}

impl FromStr for Filter {
    type Err = ImageFilterError;

    fn from_str(s: &str) -> Result<Self> {
        Filter::from_name(s)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
