use imagefilters::codec::{decode_file, write_file};
use imagefilters::filters::histogram::Histogram;
use imagefilters::{run, Filter, ImageFilterError, OutputFormat, Pixel, Raster, RunConfig};
use rayon::prelude::*;
use tempfile::tempdir;

fn solid(width: usize, height: usize, pixel: Pixel) -> Raster {
    Raster::from_pixels(width, height, &vec![pixel; width * height]).unwrap()
}

fn gradient(width: usize, height: usize) -> Raster {
    let pixels: Vec<Pixel> = (0..width * height)
        .map(|i| {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            Pixel::rgb((x * 255 / width as u32) as u8, (y * 7) as u8, 90)
        })
        .collect();
    Raster::from_pixels(width, height, &pixels).unwrap()
}

#[test]
fn test_extract_red_channel_2x2() {
    let input = Raster::from_pixels(
        2,
        2,
        &[
            Pixel::rgb(0, 0, 0),
            Pixel::rgb(255, 255, 255),
            Pixel::rgb(128, 128, 128),
            Pixel::rgb(64, 64, 64),
        ],
    )
    .unwrap();

    let filter = Filter::from_name("ExtractRedChannel").unwrap();
    let output = filter.apply(&input).unwrap();

    let pixels: Vec<[u8; 4]> = output.pixels().map(|p| p.to_rgba()).collect();
    assert_eq!(
        pixels,
        vec![[0, 0, 0, 255], [255, 0, 0, 255], [128, 0, 0, 255], [64, 0, 0, 255]]
    );
}

#[test]
fn test_grayscale_solid_gray_is_unchanged() {
    let input = solid(10, 10, Pixel::rgb(100, 100, 100));

    let output = Filter::from_name("ConvertToGrayscale").unwrap().apply(&input).unwrap();

    assert_eq!(output.bounds(), input.bounds());
    assert!(output.pixels().all(|p| p == Pixel::opaque(100, 100, 100)));
}

#[test]
fn test_histogram_total_matches_pixel_count() {
    let input = gradient(31, 17);

    let hist = Histogram::from_raster(&input);

    assert_eq!(hist.total(), (31 * 17) as u64);
}

#[test]
fn test_equalization_spreads_lightness() {
    // narrow band of dark grays
    let pixels: Vec<Pixel> = (0..64)
        .map(|i| {
            let v = 40 + (i % 16) as u8;
            Pixel::rgb(v, v, v)
        })
        .collect();
    let input = Raster::from_pixels(8, 8, &pixels).unwrap();

    let output = Filter::HistogramEqualization.apply(&input).unwrap();

    let max = output.pixels().map(|p| p.r).max().unwrap();
    let min = output.pixels().map(|p| p.r).min().unwrap();
    assert_eq!(max, 255);
    assert!(max - min > 200, "range {}..{}", min, max);
}

#[test]
fn test_run_writes_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input_path = dir.path().join("input.png");
    write_file(&gradient(12, 9), OutputFormat::Png, &input_path).unwrap();

    let stem = dir.path().join("result");
    let config = RunConfig::new(&input_path, "png", stem.to_str().unwrap(), "ExtractBlueChannel").unwrap();
    let written = run(&config).unwrap();

    assert_eq!(written, dir.path().join("result.png"));
    let output = decode_file(&written).unwrap();
    assert_eq!((output.width(), output.height()), (12, 9));
    assert!(output.pixels().all(|p| p.r == 0 && p.g == 0 && p.b == 90));
}

#[test]
fn test_run_writes_jpeg_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input_path = dir.path().join("input.png");
    write_file(&gradient(16, 16), OutputFormat::Png, &input_path).unwrap();

    let stem = dir.path().join("equalized");
    let config = RunConfig::new(&input_path, "jpg", stem.to_str().unwrap(), "HistogramNormalization").unwrap();
    let written = run(&config).unwrap();

    assert_eq!(written, dir.path().join("equalized.jpeg"));
    let output = decode_file(&written).unwrap();
    assert_eq!((output.width(), output.height()), (16, 16));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = RunConfig::new(
        dir.path().join("missing.png"),
        "png",
        dir.path().join("out").to_str().unwrap(),
        "ConvertToGrayscale",
    )
    .unwrap();

    assert!(matches!(run(&config), Err(ImageFilterError::Io(_))));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_undecodable_input_is_image_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input_path = dir.path().join("broken.png");
    std::fs::write(&input_path, b"not a png").unwrap();

    let config = RunConfig::new(&input_path, "png", dir.path().join("out").to_str().unwrap(), "ConvertToGrayscale").unwrap();

    assert!(matches!(run(&config), Err(ImageFilterError::Image(_))));
}

#[test]
fn test_bad_operation_fails_before_io() {
    // the input doesn't exist: only the name check can produce these errors
    let unknown = RunConfig::new("does/not/exist.png", "png", "out", "Emboss");
    assert!(matches!(unknown, Err(ImageFilterError::UnknownOperation(..))));

    let sobel = RunConfig::new("does/not/exist.png", "png", "out", "FindEdgesWithSobel");
    assert!(matches!(sobel, Err(ImageFilterError::NotImplemented(_))));
}

#[test]
fn test_filters_are_stateless_across_threads() {
    let images: Vec<Raster> = (0..8).map(|i| gradient(20 + i, 10)).collect();
    let filters = [
        Filter::HistogramEqualization,
        Filter::Grayscale,
        Filter::from_name("ExtractGreenChannel").unwrap(),
    ];

    for filter in filters {
        let sequential: Vec<Raster> = images.iter().map(|img| filter.apply(img).unwrap()).collect();
        let parallel: Vec<Raster> = images.par_iter().map(|img| filter.apply(img).unwrap()).collect();
        assert_eq!(sequential, parallel);
    }
}
