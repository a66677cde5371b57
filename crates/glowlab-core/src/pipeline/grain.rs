//! Grain stage: synthetic noise overlay simulating film texture.

use rand::Rng;

use crate::image::RgbImage;

use super::helpers::clamp01;

/// Composite uniform random noise over the image. `amount` is the
/// normalized slider value (grain/30, 0-1); the noise blends source-over at
/// alpha `amount * 0.15`. Amounts at or below 0.01 skip the stage.
///
/// This is the only non-deterministic stage: the noise source is not seeded,
/// matching the original's per-render random generator.
pub(crate) fn apply_grain(input: &RgbImage, amount: f32) -> Option<RgbImage> {
    if input.is_empty() {
        return None;
    }
    if amount <= 0.01 {
        return Some(input.clone());
    }

    let alpha = amount * 0.15;
    let mut rng = rand::thread_rng();

    let mut out = input.clone();
    for value in out.data.iter_mut() {
        let noise: f32 = rng.gen();
        *value = clamp01(noise * alpha + *value * (1.0 - alpha));
    }

    Some(out)
}
