//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat RGBA bytes (length = width * height * 4).

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::errors::{invalid_dimensions, ImageFilterError};
use crate::filters::histogram::Histogram;
use crate::filters::Filter;
use crate::raster::Raster;

fn to_js_error(err: ImageFilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn rgba_raster(data: &[u8], width: usize, height: usize) -> Result<Raster, JsValue> {
    let input = Array3::from_shape_vec((height, width, 4), data.to_vec())
        .map_err(|e| to_js_error(invalid_dimensions(e)))?;
    Raster::from_samples(input).map_err(to_js_error)
}

// ============================================================================
// Filters
// ============================================================================

/// Apply a registered operation to an RGBA image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `operation` - Operation name, e.g. "HistogramNormalization"
///
/// # Returns
/// Flat array of filtered RGBA bytes, or an error message
#[wasm_bindgen]
pub fn apply_filter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    operation: &str,
) -> Result<Vec<u8>, JsValue> {
    let filter = Filter::from_name(operation).map_err(to_js_error)?;
    let input = rgba_raster(data, width, height)?;

    let result = filter.apply(&input).map_err(to_js_error)?;
    Ok(result.into_samples().into_raw_vec_and_offset().0)
}

/// Lightness histogram (256 buckets) of an RGBA image.
#[wasm_bindgen]
pub fn lightness_histogram_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u64>, JsValue> {
    let input = rgba_raster(data, width, height)?;
    Ok(Histogram::from_raster(&input).counts().to_vec())
}

/// Registered operation names.
#[wasm_bindgen]
pub fn operation_names_wasm() -> Vec<String> {
    Filter::names().map(String::from).collect()
}
