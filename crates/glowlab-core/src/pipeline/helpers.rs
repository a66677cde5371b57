//! Shared pixel operations for the pipeline stages.
//!
//! Gaussian blur, alpha compositing, and debug statistics.

use rayon::prelude::*;

use crate::image::{RgbImage, RgbaImage};

/// Use parallel row processing above this pixel count.
const PARALLEL_THRESHOLD: usize = 100_000;

/// Rec. 709 luminance of a linear RGB pixel.
#[inline(always)]
pub(crate) fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[inline(always)]
pub(crate) fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Build a normalized 1-D Gaussian kernel truncated at ceil(3*sigma).
fn build_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    if radius == 0 {
        return vec![1.0];
    }
    let len = radius * 2 + 1;
    let mut kernel = vec![0.0f32; len];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;
    for (i, slot) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        let v = (-x * x / s2).exp();
        *slot = v;
        sum += v;
    }
    let inv = 1.0 / sum;
    for v in &mut kernel {
        *v *= inv;
    }
    kernel
}

/// Separable Gaussian blur with edge clamping.
///
/// Rows are processed in parallel for large images, sequentially below the
/// threshold. The output extent matches the input.
pub(crate) fn gaussian_blur(image: &RgbImage, sigma: f32) -> Option<RgbImage> {
    if image.is_empty() {
        return None;
    }
    if sigma <= 0.0 {
        return Some(image.clone());
    }

    let w = image.width as usize;
    let h = image.height as usize;
    let kernel = build_gaussian_kernel(sigma);
    let radius = kernel.len() / 2;
    let row_len = w * 3;

    let horizontal_row = |y: usize, src: &[f32], row_out: &mut [f32]| {
        let row_start = y * row_len;
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x as isize + ki as isize - radius as isize).clamp(0, w as isize - 1)
                    as usize;
                let idx = row_start + sx * 3;
                acc[0] += src[idx] * kv;
                acc[1] += src[idx + 1] * kv;
                acc[2] += src[idx + 2] * kv;
            }
            let out = x * 3;
            row_out[out] = acc[0];
            row_out[out + 1] = acc[1];
            row_out[out + 2] = acc[2];
        }
    };

    let vertical_row = |y: usize, src: &[f32], row_out: &mut [f32]| {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y as isize + ki as isize - radius as isize).clamp(0, h as isize - 1)
                    as usize;
                let idx = sy * row_len + x * 3;
                acc[0] += src[idx] * kv;
                acc[1] += src[idx + 1] * kv;
                acc[2] += src[idx + 2] * kv;
            }
            let out = x * 3;
            row_out[out] = acc[0];
            row_out[out + 1] = acc[1];
            row_out[out + 2] = acc[2];
        }
    };

    let mut pass_h = vec![0.0f32; image.data.len()];
    let mut pass_v = vec![0.0f32; image.data.len()];

    if w * h >= PARALLEL_THRESHOLD {
        pass_h
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| horizontal_row(y, &image.data, row));
        pass_v
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| vertical_row(y, &pass_h, row));
    } else {
        for (y, row) in pass_h.chunks_mut(row_len).enumerate() {
            horizontal_row(y, &image.data, row);
        }
        for (y, row) in pass_v.chunks_mut(row_len).enumerate() {
            vertical_row(y, &pass_h, row);
        }
    }

    Some(RgbImage {
        width: image.width,
        height: image.height,
        data: pass_v,
    })
}

/// Source-over composite of an RGBA overlay onto an RGB base.
///
/// The overlay is placed with its top-left corner at `(dx, dy)` in base
/// coordinates; anything outside the base extent is cropped. `opacity`
/// scales the overlay's own alpha channel, matching the fade-then-blend
/// the original filter graph performed.
pub(crate) fn composite_over(
    base: &RgbImage,
    overlay: &RgbaImage,
    dx: i64,
    dy: i64,
    opacity: f32,
) -> Option<RgbImage> {
    if base.is_empty() || overlay.is_empty() {
        return None;
    }

    let mut out = base.clone();
    let bw = base.width as i64;
    let bh = base.height as i64;
    let ow = overlay.width as i64;
    let oh = overlay.height as i64;

    let x_start = dx.max(0);
    let y_start = dy.max(0);
    let x_end = (dx + ow).min(bw);
    let y_end = (dy + oh).min(bh);
    if x_start >= x_end || y_start >= y_end {
        // Overlay landed entirely outside the base extent.
        return Some(out);
    }

    for y in y_start..y_end {
        let oy = (y - dy) as usize;
        for x in x_start..x_end {
            let ox = (x - dx) as usize;
            let oi = (oy * overlay.width as usize + ox) * 4;
            let alpha = clamp01(overlay.data[oi + 3] * opacity);
            if alpha <= 0.0 {
                continue;
            }
            let bi = (y as usize * base.width as usize + x as usize) * 3;
            for c in 0..3 {
                let src = overlay.data[oi + c];
                let dst = out.data[bi + c];
                out.data[bi + c] = clamp01(src * alpha + dst * (1.0 - alpha));
            }
        }
    }

    Some(out)
}

/// Compute min, max, and mean statistics for debug output.
pub fn compute_stats(data: &[f32]) -> (f32, f32, f32) {
    if data.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut min = f32::MAX;
    let mut max = f32::MIN;
    let mut sum = 0.0;

    for &value in data {
        min = min.min(value);
        max = max.max(value);
        sum += value;
    }

    (min, max, sum / data.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalized() {
        for sigma in [0.5, 1.0, 4.0, 10.0] {
            let kernel = build_gaussian_kernel(sigma);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4, "kernel sum {} at sigma {}", sum, sigma);
        }
    }

    #[test]
    fn test_blur_preserves_extent_and_flat_color() {
        let img = RgbImage::solid(20, 10, [0.4, 0.5, 0.6]);
        let blurred = gaussian_blur(&img, 3.0).unwrap();
        assert_eq!(blurred.width, 20);
        assert_eq!(blurred.height, 10);
        // A flat image is a fixed point of the blur.
        for (a, b) in img.data.iter().zip(blurred.data.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_blur_zero_sigma_is_identity() {
        let img = RgbImage::solid(5, 5, [0.9, 0.1, 0.5]);
        let blurred = gaussian_blur(&img, 0.0).unwrap();
        assert_eq!(blurred.data, img.data);
    }

    #[test]
    fn test_blur_rejects_empty_image() {
        let img = RgbImage::solid(0, 10, [0.0, 0.0, 0.0]);
        assert!(gaussian_blur(&img, 2.0).is_none());
    }

    #[test]
    fn test_composite_full_cover_opaque() {
        let base = RgbImage::solid(4, 4, [0.0, 0.0, 0.0]);
        let overlay = RgbaImage::from_data(4, 4, vec![1.0; 4 * 4 * 4]).unwrap();
        let out = composite_over(&base, &overlay, 0, 0, 1.0).unwrap();
        for &v in &out.data {
            assert!((v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_composite_zero_opacity_is_identity() {
        let base = RgbImage::solid(4, 4, [0.3, 0.3, 0.3]);
        let overlay = RgbaImage::from_data(4, 4, vec![1.0; 4 * 4 * 4]).unwrap();
        let out = composite_over(&base, &overlay, 0, 0, 0.0).unwrap();
        assert_eq!(out.data, base.data);
    }

    #[test]
    fn test_composite_crops_offset_overlay() {
        let base = RgbImage::solid(4, 4, [0.0, 0.0, 0.0]);
        let overlay = RgbaImage::from_data(2, 2, vec![1.0; 2 * 2 * 4]).unwrap();
        // Bottom-right placement: only (3,3), (2,3), (3,2), (2,2) covered.
        let out = composite_over(&base, &overlay, 2, 2, 1.0).unwrap();
        assert_eq!(out.pixel(0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(out.pixel(3, 3), [1.0, 1.0, 1.0]);
        // Extent unchanged.
        assert_eq!(out.width, 4);
        assert_eq!(out.height, 4);
    }

    #[test]
    fn test_compute_stats_basic() {
        let data = vec![0.0, 0.5, 1.0, 0.25, 0.75];
        let (min, max, mean) = compute_stats(&data);
        assert!((min - 0.0).abs() < 0.001);
        assert!((max - 1.0).abs() < 0.001);
        assert!((mean - 0.5).abs() < 0.001);
    }
}
