//! The glow rendering pipeline.
//!
//! Six stages, applied strictly in order, each consuming the previous
//! stage's output:
//! - `bloom`: glow bleed from bright regions
//! - `tone`: contrast/highlight/shadow curve, then warmth
//! - `overlay`: style-specific light-leak or reflection compositing
//! - `vignette`: radial edge darkening
//! - `grain`: random noise overlay
//!
//! A stage that cannot produce output degrades to passing its input
//! through unchanged; only a render that cannot begin at all (zero-area
//! source) fails the whole call.

mod bloom;
mod grain;
mod helpers;
mod overlay;
mod tone;
mod vignette;

#[cfg(test)]
mod tests;

pub use helpers::compute_stats;

use crate::image::RgbImage;
use crate::models::GlowParameters;
use crate::overlays::LightLeakSet;
use crate::verbose_println;

// Stage functions stay crate-visible so tests can compare against partial
// pipelines.
pub(crate) use bloom::apply_bloom;
pub(crate) use grain::apply_grain;
pub(crate) use overlay::apply_style_overlay;
pub(crate) use tone::{apply_tone_curve, apply_warmth};
pub(crate) use vignette::apply_vignette;

/// Stateless renderer for the glow pipeline.
///
/// Holds the light-leak overlay set; everything else is a pure function of
/// (source, parameters, target size). Safe to share across threads behind a
/// reference; it takes no locks and keeps no mutable state.
pub struct GlowRenderer {
    leaks: LightLeakSet,
}

impl GlowRenderer {
    /// Renderer backed by the built-in procedural overlay set.
    pub fn new() -> Self {
        Self {
            leaks: LightLeakSet::procedural(),
        }
    }

    /// Renderer backed by light-leak textures loaded from a directory.
    pub fn with_leak_dir<P: AsRef<std::path::Path>>(dir: P) -> Result<Self, String> {
        Ok(Self {
            leaks: LightLeakSet::load_from_dir(dir)?,
        })
    }

    /// Downscaled render for interactive preview.
    ///
    /// When the source's longer side exceeds `max_size`, the source is
    /// scaled down uniformly before processing; it is never upscaled. Bloom
    /// radius is applied in the downscaled buffer's pixel units (the radius
    /// is deliberately not rescaled, keeping slider feel consistent between
    /// preview and export at the cost of a resolution-dependent visual
    /// spread).
    pub fn render_preview(
        &self,
        source: &RgbImage,
        params: &GlowParameters,
        max_size: u32,
    ) -> Result<RgbImage, String> {
        if source.is_empty() {
            return Err("Cannot render a zero-area source image".to_string());
        }
        let scaled = source
            .scaled_to_fit(max_size)
            .ok_or_else(|| "Failed to scale source for preview".to_string())?;
        Ok(self.apply_pipeline(scaled, params))
    }

    /// Full-resolution render for export.
    pub fn render_full(
        &self,
        source: &RgbImage,
        params: &GlowParameters,
    ) -> Result<RgbImage, String> {
        if source.is_empty() {
            return Err("Cannot render a zero-area source image".to_string());
        }
        Ok(self.apply_pipeline(source.clone(), params))
    }

    /// Run the six stages. Each stage either produces a new buffer or the
    /// previous image is carried forward unchanged.
    fn apply_pipeline(&self, source: RgbImage, params: &GlowParameters) -> RgbImage {
        let mut image = source;

        image = run_stage("bloom", image, |img| {
            apply_bloom(
                img,
                params.intensity / 100.0 * 0.8,
                params.bloom / 100.0 * 20.0,
            )
        });
        image = run_stage("tone", image, |img| {
            apply_tone_curve(img, params.contrast, params.highlights, params.shadows)
        });
        image = run_stage("warmth", image, |img| apply_warmth(img, params.warmth));
        image = run_stage("overlay", image, |img| {
            apply_style_overlay(img, params, &self.leaks)
        });
        image = run_stage("vignette", image, |img| {
            apply_vignette(img, params.vignette / 100.0)
        });
        image = run_stage("grain", image, |img| {
            apply_grain(img, params.grain / 30.0)
        });

        image
    }
}

impl Default for GlowRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one stage with pass-through fallback. A stage returning `None`
/// leaves the image untouched; the render keeps going.
fn run_stage<F>(name: &str, image: RgbImage, stage: F) -> RgbImage
where
    F: FnOnce(&RgbImage) -> Option<RgbImage>,
{
    match stage(&image) {
        Some(out) => {
            if crate::config::is_verbose() {
                let (min, max, mean) = compute_stats(&out.data);
                verbose_println!(
                    "[glow] After {} - min: {:.4}, max: {:.4}, mean: {:.4}",
                    name,
                    min,
                    max,
                    mean
                );
            }
            out
        }
        None => {
            verbose_println!("[glow] Stage {} unavailable, passing through", name);
            image
        }
    }
}
