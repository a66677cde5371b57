//! Bloom stage: glow bleed from bright regions.

use crate::image::RgbImage;

use super::helpers::{clamp01, gaussian_blur, luminance};

/// Soft bright-pass knee. Pixels below this luminance contribute nothing to
/// the bloom; contribution ramps linearly up to full at luminance 1.0.
const BRIGHT_PASS_THRESHOLD: f32 = 0.5;

/// Apply bloom: bright-pass, Gaussian blur, additive blend.
///
/// `strength` is the blend weight (intensity/100 * 0.8), `radius` the blur
/// spread in pixels of the *current* buffer. The radius is intentionally not
/// rescaled when the buffer was downscaled for preview, so a given slider
/// position always maps to the same pixel radius.
///
/// Returns `None` when the blur cannot run; the caller passes the input
/// through unchanged in that case.
pub(crate) fn apply_bloom(input: &RgbImage, strength: f32, radius: f32) -> Option<RgbImage> {
    if strength <= 0.0 || radius <= 0.0 {
        return Some(input.clone());
    }

    // Bright-pass: keep only what sits above the knee, weighted by how far
    // above it the pixel's luminance is.
    let mut bright = input.clone();
    for pixel in bright.data.chunks_exact_mut(3) {
        let luma = luminance(pixel[0], pixel[1], pixel[2]);
        let weight =
            ((luma - BRIGHT_PASS_THRESHOLD) / (1.0 - BRIGHT_PASS_THRESHOLD)).clamp(0.0, 1.0);
        pixel[0] *= weight;
        pixel[1] *= weight;
        pixel[2] *= weight;
    }

    // The stage radius approximates the visible spread; sigma is half of it
    // so the kernel tail stays within roughly that many pixels.
    let blurred = gaussian_blur(&bright, radius * 0.5)?;

    let mut out = input.clone();
    for (dst, src) in out.data.iter_mut().zip(blurred.data.iter()) {
        *dst = clamp01(*dst + src * strength);
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_strength_is_identity() {
        let img = RgbImage::solid(8, 8, [0.9, 0.9, 0.9]);
        let out = apply_bloom(&img, 0.0, 10.0).unwrap();
        assert_eq!(out.data, img.data);
    }

    #[test]
    fn test_dark_image_is_unchanged() {
        // Everything below the bright-pass knee contributes nothing.
        let img = RgbImage::solid(8, 8, [0.2, 0.2, 0.2]);
        let out = apply_bloom(&img, 0.8, 10.0).unwrap();
        for (a, b) in img.data.iter().zip(out.data.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_bright_image_gains_energy() {
        let img = RgbImage::solid(8, 8, [0.9, 0.9, 0.9]);
        let out = apply_bloom(&img, 0.8, 10.0).unwrap();
        let before: f32 = img.data.iter().sum();
        let after: f32 = out.data.iter().sum();
        assert!(after > before);
    }

    #[test]
    fn test_extent_is_preserved() {
        let img = RgbImage::solid(13, 7, [0.8, 0.8, 0.8]);
        let out = apply_bloom(&img, 0.5, 20.0).unwrap();
        assert_eq!(out.width, 13);
        assert_eq!(out.height, 7);
    }

    #[test]
    fn test_empty_image_reports_failure() {
        let img = RgbImage::solid(0, 0, [0.0, 0.0, 0.0]);
        assert!(apply_bloom(&img, 0.5, 10.0).is_none());
    }
}
