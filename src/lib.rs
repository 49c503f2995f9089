//! imagefilters
//!
//! Pixel filters for raster images, centered on HSL lightness histogram
//! equalization, with a command line front end, Python bindings via PyO3 and
//! WASM bindings for JavaScript.
//!
//! ## Image Format
//! Filters work on 8-bit sample arrays of shape (height, width, channels):
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4)
//!
//! Every filter produces a new RGBA array of the same size. Files of any
//! depth are converted to 8-bit RGBA when decoded, so histogram buckets and
//! output samples always share the same 256 levels.
//!
//! ## Pipeline
//! [`run`] decodes the input file, applies the configured [`Filter`] and
//! writes the result as PNG or JPEG. Configuration is validated up front in
//! [`RunConfig::new`], so an unknown operation fails before any file is read.

pub mod errors;
pub mod raster;
pub mod filters;
pub mod config;
pub mod codec;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::path::PathBuf;

use tracing::debug;

pub use config::{OutputFormat, RunConfig};
pub use errors::{ImageFilterError, Result};
pub use filters::{Filter, DEFAULT_OPERATION};
pub use raster::{Bounds, Channel, Pixel, Raster};

/// Decode `config.input`, apply the configured filter and write the result.
///
/// # Returns
/// Path of the written output file
pub fn run(config: &RunConfig) -> Result<PathBuf> {
    let input = codec::decode_file(&config.input)?;
    debug!(
        "decoded {} ({}x{}, {} channels)",
        config.input.display(),
        input.width(),
        input.height(),
        input.channels()
    );

    let output = config.filter.apply(&input)?;
    debug!("applied {}", config.filter);

    let path = config.output_path();
    codec::write_file(&output, config.format, &path)?;
    Ok(path)
}

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray1, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::errors::ImageFilterError;
    use crate::filters::{color_science, histogram, Filter};
    use crate::raster::Raster;

    fn to_py_err(err: ImageFilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn to_raster(image: &PyReadonlyArray3<'_, u8>) -> PyResult<Raster> {
        Raster::from_samples(image.as_array().to_owned()).map_err(to_py_err)
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Apply a registered operation to a u8 image (H, W, 1|3|4).
    ///
    /// Returns a new RGBA u8 image of the same size.
    #[pyfunction]
    #[pyo3(signature = (image, operation="HistogramNormalization"))]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        operation: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let filter = Filter::from_name(operation).map_err(to_py_err)?;
        let input = to_raster(&image)?;
        let result = filter.apply(&input).map_err(to_py_err)?;
        Ok(result.into_samples().into_pyarray(py))
    }

    /// Registered operation names.
    #[pyfunction]
    pub fn operation_names() -> Vec<&'static str> {
        Filter::names().collect()
    }

    /// Lightness histogram (256 buckets) of a u8 image.
    #[pyfunction]
    pub fn lightness_histogram<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray1<u64>>> {
        let input = to_raster(&image)?;
        let hist = histogram::Histogram::from_raster(&input);
        Ok(hist.counts().to_vec().into_pyarray(py))
    }

    // ========================================================================
    // Color Conversion
    // ========================================================================

    /// Convert normalized RGB to (h, s, l), all 0.0-1.0.
    #[pyfunction]
    pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
        color_science::rgb_to_hsl(r, g, b)
    }

    /// Convert (h, s, l) back to normalized RGB.
    #[pyfunction]
    pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
        color_science::hsl_to_rgb(h, s, l)
    }

    #[pymodule]
    pub fn imagefilters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        m.add_function(wrap_pyfunction!(operation_names, m)?)?;
        m.add_function(wrap_pyfunction!(lightness_histogram, m)?)?;
        m.add_function(wrap_pyfunction!(rgb_to_hsl, m)?)?;
        m.add_function(wrap_pyfunction!(hsl_to_rgb, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::imagefilters;
