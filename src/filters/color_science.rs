//! Color space conversion: RGB <-> HSL.
//!
//! Conversions work on normalized `f64` channels in 0.0-1.0. Raw samples are
//! brought into that range with [`normalize`] and back with [`quantize`];
//! both divide/multiply by the same [`MAX_LEVEL`], so a round trip through
//! HSL reproduces every sample within one quantization step.
//!
//! ## Sample Width
//!
//! The crate is fixed to 8-bit samples. [`LEVELS`] is both the number of
//! representable sample values and the lightness histogram bucket count.

use crate::raster::Pixel;

/// Largest sample value, as a float for normalization.
pub const MAX_LEVEL: f64 = u8::MAX as f64;

/// Number of quantized levels per channel.
pub const LEVELS: usize = u8::MAX as usize + 1;

// ============================================================================
// Sample Normalization
// ============================================================================

/// Map a raw sample to 0.0-1.0.
#[inline]
pub fn normalize(sample: u8) -> f64 {
    sample as f64 / MAX_LEVEL
}

/// Map a normalized value back to a sample, rounding half up.
#[inline]
pub fn quantize(v: f64) -> u8 {
    (v * MAX_LEVEL + 0.5).floor().clamp(0.0, MAX_LEVEL) as u8
}

/// Histogram bucket of a pixel's HSL lightness, `floor((max + min) / 2)`
/// over the raw samples.
///
/// Computed on integers: the same value taken from the normalized lightness
/// can land a hair below a whole level and drop into the bucket underneath.
#[inline]
pub fn pixel_lightness_level(pixel: Pixel) -> usize {
    let max = pixel.r.max(pixel.g).max(pixel.b) as usize;
    let min = pixel.r.min(pixel.g).min(pixel.b) as usize;
    (max + min) / 2
}

// ============================================================================
// Color Space Conversion
// ============================================================================

/// Convert RGB to HSL.
/// Input: r, g, b in 0.0-1.0
/// Output: (h, s, l), all in 0.0-1.0 (h is a fraction of the full circle)
///
/// When two channels share the maximum, the hue branch is picked in
/// red, green, blue order.
#[inline]
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        let mut h = (g - b) / d;
        if g < b {
            h += 6.0;
        }
        h
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Convert HSL to RGB.
/// Input: h (wrapped modulo 1.0), s and l in 0.0-1.0
/// Output: (r, g, b) in 0.0-1.0
#[inline]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let h = h.rem_euclid(1.0);
    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let r = hue_to_channel(p, q, h + 1.0 / 3.0);
    let g = hue_to_channel(p, q, h);
    let b = hue_to_channel(p, q, h - 1.0 / 3.0);

    (r, g, b)
}

/// One RGB channel from the HSL intermediates `p`, `q` and the channel's
/// hue offset `t`.
#[inline]
pub fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

// ============================================================================
// Pixel Helpers
// ============================================================================

/// HSL triple of a raw pixel. Alpha is ignored.
#[inline]
pub fn pixel_to_hsl(pixel: Pixel) -> (f64, f64, f64) {
    rgb_to_hsl(normalize(pixel.r), normalize(pixel.g), normalize(pixel.b))
}

/// Opaque pixel for an HSL triple.
#[inline]
pub fn hsl_to_pixel(h: f64, s: f64, l: f64) -> Pixel {
    let (r, g, b) = hsl_to_rgb(h, s, l);
    Pixel::opaque(quantize(r), quantize(g), quantize(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(r: u8, g: u8, b: u8) -> Pixel {
        let (h, s, l) = pixel_to_hsl(Pixel::rgb(r, g, b));
        hsl_to_pixel(h, s, l)
    }

    #[test]
    fn test_rgb_hsl_roundtrip() {
        let (r, g, b) = (0.8, 0.4, 0.2);
        let (h, s, l) = rgb_to_hsl(r, g, b);
        let (nr, ng, nb) = hsl_to_rgb(h, s, l);

        assert!((r - nr).abs() < 1e-9);
        assert!((g - ng).abs() < 1e-9);
        assert!((b - nb).abs() < 1e-9);
    }

    #[test]
    fn test_u8_roundtrip_within_one_step() {
        // every third value per channel keeps the sweep fast in debug builds
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(3) {
                for b in (0..=255u8).step_by(3) {
                    let p = roundtrip(r, g, b);
                    assert!((p.r as i32 - r as i32).abs() <= 1, "r for {r},{g},{b}: {p:?}");
                    assert!((p.g as i32 - g as i32).abs() <= 1, "g for {r},{g},{b}: {p:?}");
                    assert!((p.b as i32 - b as i32).abs() <= 1, "b for {r},{g},{b}: {p:?}");
                }
            }
        }
    }

    #[test]
    fn test_extremes_roundtrip_exactly() {
        assert_eq!(roundtrip(255, 255, 255), Pixel::opaque(255, 255, 255));
        assert_eq!(roundtrip(0, 0, 0), Pixel::opaque(0, 0, 0));
        assert_eq!(roundtrip(255, 0, 0), Pixel::opaque(255, 0, 0));
        assert_eq!(roundtrip(0, 255, 255), Pixel::opaque(0, 255, 255));
    }

    #[test]
    fn test_achromatic_has_no_saturation() {
        for v in 0..=255u8 {
            let (h, s, l) = pixel_to_hsl(Pixel::rgb(v, v, v));
            assert_eq!(h, 0.0);
            assert_eq!(s, 0.0);
            assert!((l - normalize(v)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_saturation_ignores_hue() {
        for h in [0.0, 0.2, 0.5, 0.9, 3.7] {
            assert_eq!(hsl_to_rgb(h, 0.0, 0.4), (0.4, 0.4, 0.4));
        }
    }

    #[test]
    fn test_primary_hues() {
        let (h, s, l) = rgb_to_hsl(1.0, 0.0, 0.0);
        assert_eq!((h, s, l), (0.0, 1.0, 0.5));

        let (h, _, _) = rgb_to_hsl(0.0, 1.0, 0.0);
        assert!((h - 1.0 / 3.0).abs() < 1e-12);

        let (h, _, _) = rgb_to_hsl(0.0, 0.0, 1.0);
        assert!((h - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_tied_maximum_uses_red_branch() {
        // yellow: red and green tie for the maximum
        let (h, _, _) = rgb_to_hsl(1.0, 1.0, 0.0);
        assert!((h - 1.0 / 6.0).abs() < 1e-12);

        // magenta: red and blue tie, red branch adds a full turn
        let (h, _, _) = rgb_to_hsl(1.0, 0.0, 1.0);
        assert!((h - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_hue_wraps_modulo_one() {
        for k in 0..12 {
            let h = 0.05 + k as f64 * 0.08;
            for (s, l) in [(0.55, 0.45), (0.9, 0.3), (0.35, 0.7)] {
                assert_eq!(hsl_to_pixel(h, s, l), hsl_to_pixel(h + 1.0, s, l));
                assert_eq!(hsl_to_pixel(h, s, l), hsl_to_pixel(h - 1.0, s, l));
            }
        }
    }

    #[test]
    fn test_quantize_rounds_half_up() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(1.5), 255);
        assert_eq!(quantize(-0.2), 0);
    }

    #[test]
    fn test_lightness_level_truncates() {
        assert_eq!(pixel_lightness_level(Pixel::rgb(0, 0, 0)), 0);
        assert_eq!(pixel_lightness_level(Pixel::rgb(0, 1, 0)), 0);
        assert_eq!(pixel_lightness_level(Pixel::rgb(255, 255, 255)), 255);
        assert_eq!(pixel_lightness_level(Pixel::rgb(255, 0, 0)), 127);
    }

    #[test]
    fn test_equal_lightness_shares_a_level() {
        // 66/510 is exactly 33/255, but floor(l * 255) gives 32 in f64
        assert_eq!(pixel_lightness_level(Pixel::rgb(65, 1, 1)), 33);
        assert_eq!(pixel_lightness_level(Pixel::rgb(33, 33, 33)), 33);

        // every even max + min is a whole level
        for min in 0..=255u8 {
            for max in (min..=255u8).step_by(2) {
                let level = pixel_lightness_level(Pixel::rgb(max, min, min));
                assert_eq!(level, (max as usize + min as usize) / 2, "{max},{min}");
            }
        }
    }

    #[test]
    fn test_u8_roundtrip_full_channel_sweep() {
        for v in 0..=255u8 {
            for fixed in [0u8, 1, 77, 128, 254, 255] {
                for p in [(v, fixed, fixed), (fixed, v, fixed), (fixed, fixed, v), (v, fixed, 255 - fixed)] {
                    let out = roundtrip(p.0, p.1, p.2);
                    assert!((out.r as i32 - p.0 as i32).abs() <= 1, "r for {p:?}: {out:?}");
                    assert!((out.g as i32 - p.1 as i32).abs() <= 1, "g for {p:?}: {out:?}");
                    assert!((out.b as i32 - p.2 as i32).abs() <= 1, "b for {p:?}: {out:?}");
                }
            }
        }
    }
}
