//! Glow style definitions and overlay dispatch.

use serde::{Deserialize, Serialize};

/// The eight glow styles selectable in the editor.
///
/// Serialized names match the preset files written by the mobile app,
/// so presets exported from either side stay interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlowStyle {
    #[serde(rename = "Soft Bloom")]
    SoftBloom,
    #[serde(rename = "Cinematic Halo")]
    CinematicHalo,
    #[serde(rename = "Glass Reflection")]
    GlassReflection,
    #[serde(rename = "Warm Light Leak")]
    WarmLightLeak,
    #[serde(rename = "Cool Studio Glow")]
    CoolStudioGlow,
    #[serde(rename = "Golden Hour Glow")]
    GoldenHourGlow,
    #[serde(rename = "Matte Glow")]
    MatteGlow,
    #[serde(rename = "Crisp Shine")]
    CrispShine,
}

/// All styles, in the order the editor presents them.
pub const ALL_STYLES: [GlowStyle; 8] = [
    GlowStyle::SoftBloom,
    GlowStyle::CinematicHalo,
    GlowStyle::GlassReflection,
    GlowStyle::WarmLightLeak,
    GlowStyle::CoolStudioGlow,
    GlowStyle::GoldenHourGlow,
    GlowStyle::MatteGlow,
    GlowStyle::CrispShine,
];

impl GlowStyle {
    /// Display name, also the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            GlowStyle::SoftBloom => "Soft Bloom",
            GlowStyle::CinematicHalo => "Cinematic Halo",
            GlowStyle::GlassReflection => "Glass Reflection",
            GlowStyle::WarmLightLeak => "Warm Light Leak",
            GlowStyle::CoolStudioGlow => "Cool Studio Glow",
            GlowStyle::GoldenHourGlow => "Golden Hour Glow",
            GlowStyle::MatteGlow => "Matte Glow",
            GlowStyle::CrispShine => "Crisp Shine",
        }
    }

    /// Whether the style can carry the procedural reflection overlay.
    pub fn supports_mirror_reflection(&self) -> bool {
        matches!(self, GlowStyle::GlassReflection | GlowStyle::CinematicHalo)
    }
}

/// Overlay behavior selected by (style, mirror_reflection).
///
/// A tagged union instead of a class hierarchy: the compositing stage only
/// needs to know which texture to fetch (by index) or that the reflection
/// must be synthesized from the target extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// The overlay stage is a pass-through.
    None,

    /// Blend the pre-rendered light-leak texture at this index.
    LightLeak(usize),

    /// Synthesize and blend the radial reflection highlight.
    Reflection,
}

/// Map a style and the mirror flag to the overlay the pipeline applies.
pub fn overlay_kind(style: GlowStyle, mirror_reflection: bool) -> OverlayKind {
    match style {
        GlowStyle::WarmLightLeak => OverlayKind::LightLeak(0),
        GlowStyle::GoldenHourGlow => OverlayKind::LightLeak(1),
        GlowStyle::GlassReflection if mirror_reflection => OverlayKind::Reflection,
        _ => OverlayKind::None,
    }
}
