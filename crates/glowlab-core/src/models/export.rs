//! Export output settings and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Encoded output format.
///
/// The mobile app also offered HEIF and fell back to JPEG whenever the
/// platform encoder declined; here only the two portable codecs remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Png => "PNG",
        }
    }
}

/// Output resolution cap applied at export time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportResolution {
    /// Keep the rendered resolution.
    Original,

    /// Cap the longer side at 2048 px.
    Px2048,

    /// Cap the longer side at 1080 px.
    Px1080,
}

impl ExportResolution {
    /// Longer-side cap in pixels, or `None` for native resolution.
    pub fn max_dimension(&self) -> Option<u32> {
        match self {
            ExportResolution::Original => None,
            ExportResolution::Px2048 => Some(2048),
            ExportResolution::Px1080 => Some(1080),
        }
    }
}

/// Result of a completed export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    /// Written image file.
    pub file_path: PathBuf,

    /// Companion thumbnail, when one could be written.
    pub thumbnail_path: Option<PathBuf>,

    /// Format label ("JPEG" or "PNG").
    pub format: String,

    /// Longer side of the written image in pixels.
    pub size_px: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_caps() {
        assert_eq!(ExportResolution::Original.max_dimension(), None);
        assert_eq!(ExportResolution::Px2048.max_dimension(), Some(2048));
        assert_eq!(ExportResolution::Px1080.max_dimension(), Some(1080));
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Png.extension(), "png");
    }
}
