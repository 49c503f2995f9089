//! Run configuration: which file to read, which filter to apply and where
//! to write the result.
//!
//! Everything here is validated before the input file is touched, so a bad
//! operation name or output format never costs any pixel work.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{ImageFilterError, Result};
use crate::filters::Filter;

/// JPEG encoder quality, fixed.
pub const JPEG_QUALITY: u8 = 90;

/// Encoded output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Extension appended to the output name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ImageFilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "png" => Ok(OutputFormat::Png),
            "jpg" => Ok(OutputFormat::Jpeg),
            _ => Err(ImageFilterError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Png => f.write_str("png"),
            OutputFormat::Jpeg => f.write_str("jpg"),
        }
    }
}

/// A validated request to filter one image.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub format: OutputFormat,
    /// output file name without extension
    pub output_stem: String,
    pub filter: Filter,
}

impl RunConfig {
    /// Resolve the textual format and operation name.
    ///
    /// An empty input path or output name counts as missing. The format is
    /// checked next; an unknown operation is reported as
    /// [`ImageFilterError::UnknownOperation`].
    pub fn new(
        input: impl Into<PathBuf>,
        format: &str,
        output_stem: impl Into<String>,
        operation: &str,
    ) -> Result<Self> {
        let input = input.into();
        let output_stem = output_stem.into();
        if input.as_os_str().is_empty() {
            return Err(ImageFilterError::MissingArgument("img"));
        }
        if output_stem.is_empty() {
            return Err(ImageFilterError::MissingArgument("out"));
        }

        let format = format.parse::<OutputFormat>()?;
        let filter = Filter::from_name(operation)?;
        Ok(RunConfig {
            input,
            format,
            output_stem,
            filter,
        })
    }

    /// `<output_stem>.png` or `<output_stem>.jpeg`.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.output_stem, self.format.extension()))
    }
}
