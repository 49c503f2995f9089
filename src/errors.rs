//! Error type shared by the filters, the codec boundary and the CLI.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageFilterError>;

#[derive(Error, Debug)]
pub enum ImageFilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// decode and encode failures, including unsupported container formats
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unknown operation {0} (known operations: {1})")]
    UnknownOperation(String, String),

    #[error("operation not implemented: {0}")]
    NotImplemented(String),

    #[error("missing value for {0}")]
    MissingArgument(&'static str),

    #[error("invalid output format {0} (must be png|jpg)")]
    InvalidOutputFormat(String),

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
}

pub fn invalid_dimensions(msg: impl ToString) -> ImageFilterError {
    ImageFilterError::InvalidDimensions(msg.to_string())
}

pub fn not_implemented(msg: impl ToString) -> ImageFilterError {
    ImageFilterError::NotImplemented(msg.to_string())
}
