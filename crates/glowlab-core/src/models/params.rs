//! Glow effect parameters.

use serde::{Deserialize, Serialize};

use super::style::GlowStyle;

/// One complete edit state for the glow pipeline.
///
/// All numeric fields are expected to sit inside their declared ranges; the
/// pipeline does not re-validate. UI sliders constrain input on the app side,
/// the CLI runs [`GlowParameters::clamped`] before rendering.
///
/// Serialized with the app's camelCase keys so preset blobs stay compatible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowParameters {
    /// Selected glow style; picks the overlay behavior and default vector.
    pub style: GlowStyle,

    /// Master strength multiplier for bloom and overlay opacity (0-100).
    pub intensity: f32,

    /// Bloom radius/amount (0-100).
    pub bloom: f32,

    /// Red/blue channel gain shift (-50-50).
    pub warmth: f32,

    /// Channel gain around the midpoint (-50-50).
    pub contrast: f32,

    /// Exposure-style lift in bright regions (-50-50).
    pub highlights: f32,

    /// Bias term affecting dark regions (-50-50).
    pub shadows: f32,

    /// Radial darkening strength (0-100).
    pub vignette: f32,

    /// Noise overlay opacity (0-30).
    pub grain: f32,

    /// Normalized overlay anchor, 0 = flush to origin edge (0-1).
    pub light_position_x: f32,

    /// Normalized overlay anchor for the vertical axis (0-1).
    pub light_position_y: f32,

    /// Enables the reflection overlay for compatible styles.
    pub mirror_reflection: bool,
}

impl Default for GlowParameters {
    fn default() -> Self {
        Self {
            style: GlowStyle::SoftBloom,
            intensity: 70.0,
            bloom: 50.0,
            warmth: 0.0,
            contrast: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            vignette: 30.0,
            grain: 5.0,
            light_position_x: 0.5,
            light_position_y: 0.5,
            mirror_reflection: false,
        }
    }
}

/// Per-style overrides applied on top of [`GlowParameters::default`] when a
/// style is selected. Fields left `None` keep the base default.
struct StyleDefaults {
    intensity: f32,
    bloom: Option<f32>,
    warmth: Option<f32>,
    contrast: Option<f32>,
    highlights: Option<f32>,
    vignette: f32,
    grain: Option<f32>,
}

/// Lookup table replacing the original per-style switch. Order matches
/// [`super::style::ALL_STYLES`].
const STYLE_DEFAULTS: [(GlowStyle, StyleDefaults); 8] = [
    (
        GlowStyle::SoftBloom,
        StyleDefaults {
            intensity: 70.0,
            bloom: Some(60.0),
            warmth: None,
            contrast: None,
            highlights: None,
            vignette: 25.0,
            grain: None,
        },
    ),
    (
        GlowStyle::CinematicHalo,
        StyleDefaults {
            intensity: 65.0,
            bloom: Some(45.0),
            warmth: None,
            contrast: Some(-10.0),
            highlights: None,
            vignette: 40.0,
            grain: None,
        },
    ),
    (
        GlowStyle::GlassReflection,
        StyleDefaults {
            intensity: 55.0,
            bloom: Some(70.0),
            warmth: None,
            contrast: None,
            highlights: Some(15.0),
            vignette: 20.0,
            grain: None,
        },
    ),
    (
        GlowStyle::WarmLightLeak,
        StyleDefaults {
            intensity: 60.0,
            bloom: None,
            warmth: Some(25.0),
            contrast: None,
            highlights: None,
            vignette: 50.0,
            grain: Some(8.0),
        },
    ),
    (
        GlowStyle::CoolStudioGlow,
        StyleDefaults {
            intensity: 65.0,
            bloom: Some(55.0),
            warmth: Some(-15.0),
            contrast: None,
            highlights: None,
            vignette: 35.0,
            grain: None,
        },
    ),
    (
        GlowStyle::GoldenHourGlow,
        StyleDefaults {
            intensity: 75.0,
            bloom: None,
            warmth: Some(35.0),
            contrast: None,
            highlights: Some(20.0),
            vignette: 40.0,
            grain: None,
        },
    ),
    (
        GlowStyle::MatteGlow,
        StyleDefaults {
            intensity: 50.0,
            bloom: Some(40.0),
            warmth: None,
            contrast: Some(-15.0),
            highlights: None,
            vignette: 45.0,
            grain: None,
        },
    ),
    (
        GlowStyle::CrispShine,
        StyleDefaults {
            intensity: 80.0,
            bloom: Some(55.0),
            warmth: None,
            contrast: Some(10.0),
            highlights: Some(25.0),
            vignette: 20.0,
            grain: None,
        },
    ),
];

impl GlowParameters {
    /// Default parameter vector for a style.
    ///
    /// Style and numeric fields decouple after this: callers may override any
    /// field independently once the style is selected.
    pub fn default_for(style: GlowStyle) -> Self {
        let mut p = Self {
            style,
            ..Self::default()
        };

        if let Some((_, d)) = STYLE_DEFAULTS.iter().find(|(s, _)| *s == style) {
            p.intensity = d.intensity;
            p.vignette = d.vignette;
            if let Some(bloom) = d.bloom {
                p.bloom = bloom;
            }
            if let Some(warmth) = d.warmth {
                p.warmth = warmth;
            }
            if let Some(contrast) = d.contrast {
                p.contrast = contrast;
            }
            if let Some(highlights) = d.highlights {
                p.highlights = highlights;
            }
            if let Some(grain) = d.grain {
                p.grain = grain;
            }
        }

        p
    }

    /// Clamp every numeric field into its declared range.
    ///
    /// The pipeline assumes in-range input; call this at the boundary when
    /// parameters come from untrusted sources (CLI flags, preset files).
    pub fn clamped(mut self) -> Self {
        self.intensity = self.intensity.clamp(0.0, 100.0);
        self.bloom = self.bloom.clamp(0.0, 100.0);
        self.warmth = self.warmth.clamp(-50.0, 50.0);
        self.contrast = self.contrast.clamp(-50.0, 50.0);
        self.highlights = self.highlights.clamp(-50.0, 50.0);
        self.shadows = self.shadows.clamp(-50.0, 50.0);
        self.vignette = self.vignette.clamp(0.0, 100.0);
        self.grain = self.grain.clamp(0.0, 30.0);
        self.light_position_x = self.light_position_x.clamp(0.0, 1.0);
        self.light_position_y = self.light_position_y.clamp(0.0, 1.0);
        self
    }
}
