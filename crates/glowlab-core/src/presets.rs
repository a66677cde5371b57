//! Preset management
//!
//! Load, save, and list named glow presets as YAML files.

use std::path::Path;

use crate::models::GlowPreset;

/// Validate a preset name to prevent path traversal attacks.
/// Rejects names containing path separators, "..", or other dangerous patterns.
pub fn validate_preset_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Preset name cannot be empty".to_string());
    }

    if name.contains('/') || name.contains('\\') {
        return Err("Preset name cannot contain path separators".to_string());
    }

    if name.contains("..") {
        return Err("Preset name cannot contain '..'".to_string());
    }

    if name.starts_with('.') {
        return Err("Preset name cannot start with '.'".to_string());
    }

    if name.contains('\0') {
        return Err("Preset name cannot contain null bytes".to_string());
    }

    Ok(())
}

/// Load a glow preset from a YAML file
pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<GlowPreset, String> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read preset file: {}", e))?;

    serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse preset YAML: {}", e))
}

/// Save a glow preset to a YAML file
pub fn save_preset<P: AsRef<Path>>(preset: &GlowPreset, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let yaml =
        serde_yaml::to_string(preset).map_err(|e| format!("Failed to serialize preset: {}", e))?;

    std::fs::write(path, yaml).map_err(|e| format!("Failed to write preset file: {}", e))
}

/// List all preset names stored in a directory
pub fn list_presets<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, String> {
    let dir = dir.as_ref();
    let mut presets = Vec::new();

    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("Failed to read presets directory: {}", e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("yml")
            || path.extension().and_then(|e| e.to_str()) == Some("yaml")
        {
            if let Some(name) = path.file_stem().and_then(|n| n.to_str()) {
                presets.push(name.to_string());
            }
        }
    }

    presets.sort();
    Ok(presets)
}

/// Get the default presets directory, creating it when missing
pub fn get_presets_dir() -> Result<std::path::PathBuf, String> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;

    let presets_dir = home_dir.join("glowlab").join("presets");

    if !presets_dir.exists() {
        std::fs::create_dir_all(&presets_dir)
            .map_err(|e| format!("Failed to create presets directory: {}", e))?;
    }

    Ok(presets_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{built_in_presets, GlowParameters, GlowStyle};
    use tempfile::tempdir;

    #[test]
    fn test_validate_preset_name_accepts_plain_names() {
        assert!(validate_preset_name("Morning Light").is_ok());
        assert!(validate_preset_name("warm-fade_2").is_ok());
    }

    #[test]
    fn test_validate_preset_name_rejects_traversal() {
        assert!(validate_preset_name("").is_err());
        assert!(validate_preset_name("a/b").is_err());
        assert!(validate_preset_name("a\\b").is_err());
        assert!(validate_preset_name("..secret").is_err());
        assert!(validate_preset_name(".hidden").is_err());
        assert!(validate_preset_name("nul\0l").is_err());
    }

    #[test]
    fn test_preset_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golden.yml");

        let mut params = GlowParameters::default_for(GlowStyle::GoldenHourGlow);
        params.grain = 12.0;
        let preset = GlowPreset::new("Golden Hour", params);

        save_preset(&preset, &path).unwrap();
        let loaded = load_preset(&path).unwrap();

        assert_eq!(loaded, preset);
        assert_eq!(loaded.style(), GlowStyle::GoldenHourGlow);
    }

    #[test]
    fn test_list_presets_finds_yaml_files_only() {
        let dir = tempdir().unwrap();
        let preset = GlowPreset::new("One", GlowParameters::default());
        save_preset(&preset, dir.path().join("one.yml")).unwrap();
        save_preset(&preset, dir.path().join("two.yaml")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let names = list_presets(dir.path()).unwrap();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn test_built_in_presets_serialize() {
        let dir = tempdir().unwrap();
        for preset in built_in_presets() {
            let path = dir.path().join(format!("{}.yml", preset.name.replace(' ', "-")));
            save_preset(&preset, &path).unwrap();
            assert_eq!(load_preset(&path).unwrap(), preset);
        }
    }
}
