//! Style overlay stage: light-leak and reflection compositing.

use crate::image::{RgbImage, RgbaImage};
use crate::models::{overlay_kind, GlowParameters, OverlayKind};
use crate::overlays::{reflection_overlay, LightLeakSet};

use super::helpers::composite_over;

/// Apply the style-dependent overlay, if the (style, mirror) pair selects
/// one. Styles without an overlay pass through pixel-identical.
pub(crate) fn apply_style_overlay(
    input: &RgbImage,
    params: &GlowParameters,
    leaks: &LightLeakSet,
) -> Option<RgbImage> {
    let intensity = params.intensity / 100.0;

    match overlay_kind(params.style, params.mirror_reflection) {
        OverlayKind::None => Some(input.clone()),
        OverlayKind::LightLeak(index) => {
            let overlay = leaks.leak(index)?;
            blend_overlay(
                input,
                overlay,
                params.light_position_x,
                params.light_position_y,
                intensity * 0.4,
            )
        }
        OverlayKind::Reflection => {
            let overlay = reflection_overlay(input.width, input.height)?;
            blend_overlay(
                input,
                &overlay,
                params.light_position_x,
                params.light_position_y,
                intensity * 0.25,
            )
        }
    }
}

/// Scale the overlay to cover the base, position it by the normalized
/// anchors, and source-over blend at the given opacity.
///
/// Cover scale is the max of the width and height ratios, so the texture
/// always spans the full base extent and overflow is cropped. The anchors
/// interpolate the top-left offset across the full placeable range: 0 is
/// flush to the origin edge, 1 flush to the opposite edge.
fn blend_overlay(
    base: &RgbImage,
    overlay: &RgbaImage,
    position_x: f32,
    position_y: f32,
    opacity: f32,
) -> Option<RgbImage> {
    if overlay.is_empty() {
        return None;
    }

    let scale_x = base.width as f32 / overlay.width.max(1) as f32;
    let scale_y = base.height as f32 / overlay.height.max(1) as f32;
    let scale = scale_x.max(scale_y);

    let scaled_w = ((overlay.width as f32 * scale).round() as u32).max(base.width);
    let scaled_h = ((overlay.height as f32 * scale).round() as u32).max(base.height);
    let scaled = overlay.resized(scaled_w, scaled_h)?;

    let dx = (base.width as f32 - scaled_w as f32) * position_x;
    let dy = (base.height as f32 - scaled_h as f32) * position_y;

    composite_over(base, &scaled, dx.round() as i64, dy.round() as i64, opacity)
}
