//! Vignette stage: radial darkening toward the image edges.

use crate::image::RgbImage;

use super::helpers::clamp01;

/// Apply the vignette. `amount` is the normalized slider value (0-1); the
/// effective strength is `amount * 2.5`. Amounts at or below 0.01 skip the
/// stage.
///
/// Darkening is centered on the image and falls off quadratically with the
/// center distance normalized by the half-diagonal, clamped at black.
pub(crate) fn apply_vignette(input: &RgbImage, amount: f32) -> Option<RgbImage> {
    if input.is_empty() {
        return None;
    }
    if amount <= 0.01 {
        return Some(input.clone());
    }

    let strength = amount * 2.5;
    let w = input.width as usize;
    let center_x = input.width as f32 / 2.0;
    let center_y = input.height as f32 / 2.0;
    let half_diagonal = (input.width as f32 * input.width as f32
        + input.height as f32 * input.height as f32)
        .sqrt()
        / 2.0;

    let mut out = input.clone();
    for (i, pixel) in out.data.chunks_exact_mut(3).enumerate() {
        let x = (i % w) as f32;
        let y = (i / w) as f32;
        let dx = x - center_x;
        let dy = y - center_y;
        let t = ((dx * dx + dy * dy).sqrt() / half_diagonal).min(1.0);
        let factor = (1.0 - strength * t * t).max(0.0);
        pixel[0] = clamp01(pixel[0] * factor);
        pixel[1] = clamp01(pixel[1] * factor);
        pixel[2] = clamp01(pixel[2] * factor);
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_amount_is_pass_through() {
        let img = RgbImage::solid(10, 10, [0.6, 0.6, 0.6]);
        let out = apply_vignette(&img, 0.0).unwrap();
        assert_eq!(out.data, img.data);
    }

    #[test]
    fn test_threshold_amount_is_pass_through() {
        let img = RgbImage::solid(10, 10, [0.6, 0.6, 0.6]);
        let out = apply_vignette(&img, 0.01).unwrap();
        assert_eq!(out.data, img.data);
    }

    #[test]
    fn test_corners_darken_more_than_center() {
        let img = RgbImage::solid(21, 21, [0.8, 0.8, 0.8]);
        let out = apply_vignette(&img, 0.5).unwrap();
        let center = out.pixel(10, 10)[0];
        let corner = out.pixel(0, 0)[0];
        assert!(corner < center);
        assert!(center <= 0.8);
    }

    #[test]
    fn test_strong_vignette_clamps_at_black() {
        let img = RgbImage::solid(21, 21, [0.8, 0.8, 0.8]);
        let out = apply_vignette(&img, 1.0).unwrap();
        // strength 2.5 drives the corners negative before the clamp.
        let corner = out.pixel(0, 0)[0];
        assert!(corner >= 0.0);
        assert!(corner < 0.01);
    }
}
