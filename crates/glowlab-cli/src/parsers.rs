//! Parsing functions for CLI flag values.

use glowlab_core::models::{ExportFormat, ExportResolution, GlowStyle, ALL_STYLES};

/// Parse a style name.
///
/// Accepts the display name ("Golden Hour Glow"), kebab-case
/// ("golden-hour-glow"), or any casing/separator mix in between.
pub fn parse_style(value: &str) -> Result<GlowStyle, String> {
    let normalized: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    for style in ALL_STYLES {
        let candidate: String = style
            .name()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if candidate == normalized {
            return Ok(style);
        }
    }

    Err(format!(
        "Unknown style: {} (expected one of: {})",
        value,
        ALL_STYLES
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

/// Parse an export format ("jpeg", "jpg", or "png").
pub fn parse_format(value: &str) -> Result<ExportFormat, String> {
    match value.to_lowercase().as_str() {
        "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
        "png" => Ok(ExportFormat::Png),
        other => Err(format!(
            "Unknown format: {} (expected jpeg or png)",
            other
        )),
    }
}

/// Parse an export resolution cap ("original", "2048", or "1080").
pub fn parse_resolution(value: &str) -> Result<ExportResolution, String> {
    match value.to_lowercase().as_str() {
        "original" | "full" => Ok(ExportResolution::Original),
        "2048" | "2048px" => Ok(ExportResolution::Px2048),
        "1080" | "1080px" => Ok(ExportResolution::Px1080),
        other => Err(format!(
            "Unknown resolution: {} (expected original, 2048, or 1080)",
            other
        )),
    }
}

/// Split a `key=value` override into its parts.
pub fn parse_override(value: &str) -> Result<(&str, &str), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() && !val.trim().is_empty() => {
            Ok((key.trim(), val.trim()))
        }
        _ => Err(format!(
            "Override must be in format key=value (e.g. intensity=80), got: {}",
            value
        )),
    }
}
