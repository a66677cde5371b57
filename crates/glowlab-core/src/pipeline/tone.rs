//! Tone curve and warmth stages: per-channel linear transforms.

use crate::image::RgbImage;

use super::helpers::clamp01;

/// Apply the tone curve: contrast gain, shadow bias, highlight exposure.
///
/// Gain `c = 1 + contrast/100 * 0.5` applies uniformly to R, G, B together
/// with a brightness bias derived from the shadow slider. When the highlight
/// slider is active, an exposure-style multiplier `2^(highlights/100 * 0.5)`
/// is applied on top.
pub(crate) fn apply_tone_curve(
    input: &RgbImage,
    contrast: f32,
    highlights: f32,
    shadows: f32,
) -> Option<RgbImage> {
    if input.is_empty() {
        return None;
    }

    let gain = 1.0 + (contrast / 100.0) * 0.5;
    let shadow_scale = 1.0 + (shadows / 100.0) * 0.4;
    let bias = (1.0 - shadow_scale) * 0.1;

    let exposure = if highlights.abs() > 0.01 {
        2.0f32.powf((highlights / 100.0) * 0.5)
    } else {
        1.0
    };

    let mut out = input.clone();
    for value in out.data.iter_mut() {
        *value = clamp01((*value * gain + bias) * exposure);
    }

    Some(out)
}

/// Apply the warmth shift: red gain up for warm values, blue gain down for
/// cool values, green untouched. Values inside the dead zone (|warmth| <=
/// 0.5) skip the stage entirely.
pub(crate) fn apply_warmth(input: &RgbImage, warmth: f32) -> Option<RgbImage> {
    if input.is_empty() {
        return None;
    }
    if warmth.abs() <= 0.5 {
        return Some(input.clone());
    }

    let t = warmth / 100.0;
    let red_gain = 1.0 + (t * 0.15).max(0.0);
    let blue_gain = 1.0 - (-t * 0.15).max(0.0);

    let mut out = input.clone();
    for pixel in out.data.chunks_exact_mut(3) {
        pixel[0] = clamp01(pixel[0] * red_gain);
        pixel[2] = clamp01(pixel[2] * blue_gain);
    }

    Some(out)
}
