//! Named parameter presets.

use serde::{Deserialize, Serialize};

use super::params::GlowParameters;
use super::style::GlowStyle;

/// A saved, named parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlowPreset {
    /// User-visible preset name, also the file stem on disk.
    pub name: String,

    /// Full parameter vector, style included.
    pub parameters: GlowParameters,

    /// Optional notes or description.
    pub notes: Option<String>,
}

impl GlowPreset {
    pub fn new(name: impl Into<String>, parameters: GlowParameters) -> Self {
        Self {
            name: name.into(),
            parameters,
            notes: None,
        }
    }

    pub fn style(&self) -> GlowStyle {
        self.parameters.style
    }
}

/// The six presets the editor ships with.
pub fn built_in_presets() -> Vec<GlowPreset> {
    let morning = {
        let mut p = GlowParameters::default_for(GlowStyle::GoldenHourGlow);
        p.warmth = 30.0;
        p.intensity = 65.0;
        p
    };
    let studio = {
        let mut p = GlowParameters::default_for(GlowStyle::SoftBloom);
        p.bloom = 45.0;
        p.vignette = 35.0;
        p
    };
    let cinematic = {
        let mut p = GlowParameters::default_for(GlowStyle::CinematicHalo);
        p.contrast = -12.0;
        p.vignette = 45.0;
        p
    };
    let warm_fade = {
        let mut p = GlowParameters::default_for(GlowStyle::WarmLightLeak);
        p.grain = 10.0;
        p
    };
    let cool_edge = {
        let mut p = GlowParameters::default_for(GlowStyle::CoolStudioGlow);
        p.bloom = 60.0;
        p
    };
    let golden = GlowParameters::default_for(GlowStyle::GoldenHourGlow);

    vec![
        GlowPreset::new("Morning Light", morning),
        GlowPreset::new("Studio Portrait", studio),
        GlowPreset::new("Cinematic Mood", cinematic),
        GlowPreset::new("Warm Fade", warm_fade),
        GlowPreset::new("Cool Edge", cool_edge),
        GlowPreset::new("Golden Hour", golden),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_presets_count_and_names() {
        let presets = built_in_presets();
        assert_eq!(presets.len(), 6);

        let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Morning Light",
                "Studio Portrait",
                "Cinematic Mood",
                "Warm Fade",
                "Cool Edge",
                "Golden Hour"
            ]
        );
    }

    #[test]
    fn test_built_in_presets_tweak_style_defaults() {
        let presets = built_in_presets();

        let morning = &presets[0];
        assert_eq!(morning.style(), GlowStyle::GoldenHourGlow);
        assert_eq!(morning.parameters.warmth, 30.0);
        assert_eq!(morning.parameters.intensity, 65.0);

        let cinematic = &presets[2];
        assert_eq!(cinematic.parameters.contrast, -12.0);
        assert_eq!(cinematic.parameters.vignette, 45.0);
    }
}
