//! Application settings and the global verbose flag.
//!
//! Settings load once per process from the first readable candidate file,
//! falling back to built-in defaults with a warning trail.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

use serde::{Deserialize, Serialize};

use crate::models::{ExportFormat, ExportResolution};

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["glowlab.yml", "glowlab.yaml"];

/// Preview cap when performance mode is on.
const PREVIEW_MAX_SIZE_FAST: u32 = 800;

/// Preview cap for full-quality interactive editing.
const PREVIEW_MAX_SIZE_QUALITY: u32 = 1200;

fn default_jpeg_quality() -> f32 {
    0.92
}

fn default_format() -> ExportFormat {
    ExportFormat::Jpeg
}

fn default_resolution() -> ExportResolution {
    ExportResolution::Px2048
}

fn default_false() -> bool {
    false
}

/// User-tunable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default export format.
    pub default_format: ExportFormat,

    /// Default export resolution cap.
    pub default_resolution: ExportResolution,

    /// JPEG encoder quality (0.0-1.0).
    pub jpeg_quality: f32,

    /// Render previews at a reduced cap for slower machines.
    pub performance_mode: bool,

    /// Emit per-stage debug statistics.
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            default_resolution: default_resolution(),
            jpeg_quality: default_jpeg_quality(),
            performance_mode: default_false(),
            debug: default_false(),
        }
    }
}

impl Settings {
    /// Longer-side cap for interactive preview renders.
    pub fn preview_max_size(&self) -> u32 {
        if self.performance_mode {
            PREVIEW_MAX_SIZE_FAST
        } else {
            PREVIEW_MAX_SIZE_QUALITY
        }
    }

    /// Pull obviously broken values back into range.
    fn sanitize(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(0.05, 1.0);
        self
    }
}

/// Loaded settings together with their source path and any warnings.
pub struct SettingsHandle {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl SettingsHandle {
    fn with_settings(settings: Settings, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            settings,
            source,
            warnings,
        }
    }
}

/// Load settings from disk, optionally forcing a specific path.
pub fn load_settings(custom_path: Option<&Path>) -> SettingsHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<Settings>(&contents) {
                Ok(settings) => {
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return SettingsHandle::with_settings(
                        settings.sanitize(),
                        Some(source),
                        warnings,
                    );
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse settings {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read settings {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No settings file found; using built-in defaults.".to_string());
    SettingsHandle::with_settings(Settings::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var("GLOWLAB_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("glowlab").join(name));
        }
    }

    candidates
}

static SETTINGS_HANDLE: OnceLock<SettingsHandle> = OnceLock::new();
static PRINT_CONFIG_ONCE: Once = Once::new();

/// Access the global settings (loaded once per process).
pub fn settings_handle() -> &'static SettingsHandle {
    SETTINGS_HANDLE.get_or_init(|| load_settings(None))
}

/// Print config source and warnings the first time it is requested (only in verbose mode).
pub fn log_config_usage() {
    PRINT_CONFIG_ONCE.call_once(|| {
        if !is_verbose() {
            return;
        }
        let handle = settings_handle();
        if let Some(source) = &handle.source {
            eprintln!("[glowlab] Loaded settings from {}", source.display());
        } else {
            eprintln!("[glowlab] Using built-in default settings");
        }

        for warning in &handle.warnings {
            eprintln!("[glowlab] Config warning: {}", warning);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_format, ExportFormat::Jpeg);
        assert_eq!(settings.default_resolution, ExportResolution::Px2048);
        assert!((settings.jpeg_quality - 0.92).abs() < 1e-6);
        assert!(!settings.performance_mode);
    }

    #[test]
    fn test_preview_cap_tracks_performance_mode() {
        let mut settings = Settings::default();
        assert_eq!(settings.preview_max_size(), 1200);
        settings.performance_mode = true;
        assert_eq!(settings.preview_max_size(), 800);
    }

    #[test]
    fn test_load_settings_from_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("glowlab.yml");
        std::fs::write(&path, "jpeg_quality: 0.8\nperformance_mode: true\n").unwrap();

        let handle = load_settings(Some(&path));
        assert!(handle.source.is_some());
        assert!((handle.settings.jpeg_quality - 0.8).abs() < 1e-6);
        assert!(handle.settings.performance_mode);
        // Unspecified fields keep their defaults.
        assert_eq!(handle.settings.default_format, ExportFormat::Jpeg);
    }

    #[test]
    fn test_malformed_settings_fall_back_with_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("glowlab.yml");
        std::fs::write(&path, "jpeg_quality: [not, a, number]\n").unwrap();

        let handle = load_settings(Some(&path));
        assert!(handle.source.is_none());
        assert!(handle
            .warnings
            .iter()
            .any(|w| w.contains("Failed to parse settings")));
    }

    #[test]
    fn test_sanitize_clamps_quality() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("glowlab.yml");
        std::fs::write(&path, "jpeg_quality: 9.0\n").unwrap();

        let handle = load_settings(Some(&path));
        assert!((handle.settings.jpeg_quality - 1.0).abs() < 1e-6);
    }
}
