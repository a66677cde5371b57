//! Integration tests for the full glow pipeline.

use super::*;
use crate::models::{GlowStyle, ALL_STYLES};

fn renderer() -> GlowRenderer {
    GlowRenderer::new()
}

fn quiet_params(style: GlowStyle) -> GlowParameters {
    let mut p = GlowParameters::default_for(style);
    p.grain = 0.0;
    p
}

// ========================================================================
// Render contract
// ========================================================================

#[test]
fn test_render_produces_output_for_valid_input() {
    let r = renderer();
    let source = RgbImage::solid(100, 100, [0.5, 0.5, 0.5]);
    let params = GlowParameters::default();

    let preview = r.render_preview(&source, &params, 200).unwrap();
    assert!(preview.width > 0);
    assert!(preview.height > 0);

    let full = r.render_full(&source, &params);
    assert!(full.is_ok());
}

#[test]
fn test_zero_area_source_is_a_recoverable_error() {
    let r = renderer();
    let source = RgbImage::solid(0, 0, [0.0, 0.0, 0.0]);
    let params = GlowParameters::default();

    assert!(r.render_preview(&source, &params, 100).is_err());
    assert!(r.render_full(&source, &params).is_err());
}

#[test]
fn test_preview_never_upscales() {
    let r = renderer();
    let source = RgbImage::solid(200, 120, [0.3, 0.3, 0.3]);
    let params = quiet_params(GlowStyle::SoftBloom);

    // Cap below the longer side downsizes.
    let small = r.render_preview(&source, &params, 100).unwrap();
    assert!(small.longer_side() <= 100);

    // Cap above the longer side leaves the resolution alone.
    let same = r.render_preview(&source, &params, 5000).unwrap();
    assert_eq!(same.width, 200);
    assert_eq!(same.height, 120);
}

#[test]
fn test_full_render_preserves_extent() {
    let r = renderer();
    let source = RgbImage::solid(75, 33, [0.6, 0.5, 0.4]);
    for style in ALL_STYLES {
        let out = r.render_full(&source, &quiet_params(style)).unwrap();
        assert_eq!(out.width, 75, "width changed for {:?}", style);
        assert_eq!(out.height, 33, "height changed for {:?}", style);
    }
}

// ========================================================================
// Determinism
// ========================================================================

#[test]
fn test_renders_are_deterministic_without_grain() {
    let r = renderer();
    let source = RgbImage::solid(64, 64, [0.7, 0.4, 0.3]);
    for style in ALL_STYLES {
        let mut params = quiet_params(style);
        params.mirror_reflection = true;
        let a = r.render_full(&source, &params).unwrap();
        let b = r.render_full(&source, &params).unwrap();
        assert_eq!(a.data, b.data, "non-deterministic render for {:?}", style);
    }
}

#[test]
fn test_different_parameters_produce_different_output() {
    let r = renderer();
    let source = RgbImage::solid(50, 50, [0.3, 0.6, 0.4]);

    let mut low = quiet_params(GlowStyle::SoftBloom);
    low.intensity = 20.0;
    low.bloom = 10.0;
    let mut high = quiet_params(GlowStyle::SoftBloom);
    high.intensity = 90.0;
    high.bloom = 90.0;

    let out_low = r.render_preview(&source, &low, 100).unwrap();
    let out_high = r.render_preview(&source, &high, 100).unwrap();
    assert_ne!(out_low.data, out_high.data);
}

// ========================================================================
// Stage composition
// ========================================================================

#[test]
fn test_disabled_vignette_and_grain_leave_only_first_stages() {
    let r = renderer();
    let source = RgbImage::solid(48, 48, [0.65, 0.5, 0.35]);
    let mut params = GlowParameters::default_for(GlowStyle::GoldenHourGlow);
    params.vignette = 0.0;
    params.grain = 0.0;

    let full = r.render_full(&source, &params).unwrap();

    // Rebuild by hand from the first four stages only.
    let leaks = crate::overlays::LightLeakSet::procedural();
    let mut expected = source.clone();
    expected = apply_bloom(
        &expected,
        params.intensity / 100.0 * 0.8,
        params.bloom / 100.0 * 20.0,
    )
    .unwrap();
    expected =
        apply_tone_curve(&expected, params.contrast, params.highlights, params.shadows).unwrap();
    expected = apply_warmth(&expected, params.warmth).unwrap();
    expected = apply_style_overlay(&expected, &params, &leaks).unwrap();

    assert_eq!(full.data, expected.data);
}

#[test]
fn test_overlay_stage_is_noop_for_plain_styles() {
    let leaks = crate::overlays::LightLeakSet::procedural();
    let source = RgbImage::solid(30, 30, [0.45, 0.45, 0.45]);

    for style in ALL_STYLES {
        if matches!(
            style,
            GlowStyle::WarmLightLeak | GlowStyle::GoldenHourGlow | GlowStyle::GlassReflection
        ) {
            continue;
        }
        let mut params = quiet_params(style);
        params.mirror_reflection = true;
        let out = apply_style_overlay(&source, &params, &leaks).unwrap();
        assert_eq!(out.data, source.data, "overlay not a no-op for {:?}", style);
    }
}

#[test]
fn test_grain_stage_skipped_at_zero_matches_partial_pipeline() {
    // With every other slider neutral, a grain-only parameter set at zero
    // must leave the source untouched end to end.
    let r = renderer();
    let source = RgbImage::solid(20, 20, [0.35, 0.35, 0.35]);
    let params = GlowParameters {
        style: GlowStyle::MatteGlow,
        intensity: 0.0,
        bloom: 0.0,
        warmth: 0.0,
        contrast: 0.0,
        highlights: 0.0,
        shadows: 0.0,
        vignette: 0.0,
        grain: 0.0,
        light_position_x: 0.5,
        light_position_y: 0.5,
        mirror_reflection: false,
    };

    let out = r.render_full(&source, &params).unwrap();
    for (a, b) in source.data.iter().zip(out.data.iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn test_bloom_radius_is_not_rescaled_for_preview() {
    // The same parameters on a downscaled buffer use the same pixel radius,
    // so preview output is not simply a resized full render. Compare a
    // preview render against a render of the pre-scaled source: these must
    // match exactly, which pins the radius to buffer-space pixels.
    let r = renderer();
    let source = RgbImage::solid(160, 160, [0.8, 0.7, 0.6]);
    let params = quiet_params(GlowStyle::SoftBloom);

    let preview = r.render_preview(&source, &params, 80).unwrap();
    let prescaled = source.scaled_to_fit(80).unwrap();
    let direct = r.render_full(&prescaled, &params).unwrap();
    assert_eq!(preview.data, direct.data);
}
