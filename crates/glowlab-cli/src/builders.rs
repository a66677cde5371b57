//! Building glow parameters from CLI inputs.

use std::path::Path;

use glowlab_core::models::GlowParameters;
use glowlab_core::presets::load_preset;

use crate::parsers::{parse_override, parse_style};

/// Build the parameter vector for a render.
///
/// Precedence: a preset file provides the base when given, otherwise the
/// style's default vector, otherwise the global default. `key=value`
/// overrides apply on top, and the result is clamped into range before it
/// reaches the pipeline.
pub fn build_parameters(
    style: Option<&str>,
    preset_path: Option<&Path>,
    overrides: &[String],
) -> Result<GlowParameters, String> {
    let mut params = if let Some(path) = preset_path {
        load_preset(path)?.parameters
    } else if let Some(style) = style {
        GlowParameters::default_for(parse_style(style)?)
    } else {
        GlowParameters::default()
    };

    for entry in overrides {
        let (key, value) = parse_override(entry)?;
        apply_override(&mut params, key, value)?;
    }

    Ok(params.clamped())
}

/// Apply one `key=value` override to a parameter vector.
pub fn apply_override(
    params: &mut GlowParameters,
    key: &str,
    value: &str,
) -> Result<(), String> {
    // Numeric sliders share one parse path.
    let mut set_number = |field: &mut f32| -> Result<(), String> {
        *field = value
            .parse::<f32>()
            .map_err(|_| format!("Invalid numeric value for {}: {}", key, value))?;
        Ok(())
    };

    match key.to_lowercase().replace(['-', '_'], "").as_str() {
        "intensity" => set_number(&mut params.intensity),
        "bloom" => set_number(&mut params.bloom),
        "warmth" => set_number(&mut params.warmth),
        "contrast" => set_number(&mut params.contrast),
        "highlights" => set_number(&mut params.highlights),
        "shadows" => set_number(&mut params.shadows),
        "vignette" => set_number(&mut params.vignette),
        "grain" => set_number(&mut params.grain),
        "lightpositionx" => set_number(&mut params.light_position_x),
        "lightpositiony" => set_number(&mut params.light_position_y),
        "style" => {
            params.style = parse_style(value)?;
            Ok(())
        }
        "mirrorreflection" | "mirror" => {
            params.mirror_reflection = value
                .parse::<bool>()
                .map_err(|_| format!("Invalid boolean for {}: {}", key, value))?;
            Ok(())
        }
        other => Err(format!("Unknown parameter: {}", other)),
    }
}
