//! Image exporters.
//!
//! Encode rendered images to JPEG or PNG, write a companion thumbnail, and
//! report fractional progress to the caller.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::image::RgbImage;
use crate::models::{ExportFormat, ExportResolution, ExportResult};

/// Longer side of the generated thumbnail in pixels.
const THUMBNAIL_MAX_SIZE: u32 = 256;

/// JPEG quality used for thumbnails.
const THUMBNAIL_QUALITY: f32 = 0.6;

/// Export a rendered image.
///
/// Downscales to the resolution cap when needed (never upscales), encodes
/// into `dir` under a unique name, and writes a JPEG thumbnail next to the
/// export. `progress` receives strictly increasing values ending at 1.0.
///
/// Exports run independently of preview renders and are not cancelable; a
/// caller wanting to abandon one simply discards the result.
pub fn export_image(
    image: &RgbImage,
    dir: &Path,
    format: ExportFormat,
    resolution: ExportResolution,
    jpeg_quality: f32,
    mut progress: impl FnMut(f32),
) -> Result<ExportResult, String> {
    if image.is_empty() {
        return Err("Cannot export a zero-area image".to_string());
    }

    progress(0.1);

    let output = match resolution.max_dimension() {
        Some(max) if image.longer_side() > max => image
            .scaled_to_fit(max)
            .ok_or_else(|| "Failed to scale image for export".to_string())?,
        _ => image.clone(),
    };

    progress(0.4);

    let size_px = output.longer_side();
    let stem = unique_export_stem();
    let file_path = dir.join(format!("{}.{}", stem, format.extension()));

    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create export directory: {}", e))?;

    progress(0.5);

    let bytes = to_rgb8(&output);

    progress(0.7);

    match format {
        ExportFormat::Jpeg => encode_jpeg(&bytes, output.width, output.height, jpeg_quality, &file_path)?,
        ExportFormat::Png => encode_png(&bytes, output.width, output.height, &file_path)?,
    }

    progress(0.9);

    let thumbnail_path = write_thumbnail(&output, dir, &stem);

    progress(1.0);

    Ok(ExportResult {
        file_path,
        thumbnail_path,
        format: format.label().to_string(),
        size_px,
    })
}

/// Convert an f32 image to packed 8-bit RGB, clamping out-of-range values.
fn to_rgb8(image: &RgbImage) -> Vec<u8> {
    image
        .data
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Unique file stem: wall clock plus a process-local counter so parallel
/// batch exports never collide.
fn unique_export_stem() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static EXPORT_COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = EXPORT_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("glow-{:x}-{:x}", nanos, seq)
}

fn encode_jpeg(
    bytes: &[u8],
    width: u32,
    height: u32,
    quality: f32,
    path: &Path,
) -> Result<(), String> {
    use std::fs::File;
    use std::io::BufWriter;

    let file = File::create(path).map_err(|e| format!("Failed to create JPEG file: {}", e))?;
    let writer = BufWriter::new(file);

    // Map the app's 0.0-1.0 quality to the encoder's 1-100 scale.
    let q = (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8;
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, q);
    encoder
        .encode(bytes, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| format!("Failed to encode JPEG: {}", e))
}

fn encode_png(bytes: &[u8], width: u32, height: u32, path: &Path) -> Result<(), String> {
    use std::fs::File;
    use std::io::BufWriter;

    let file = File::create(path).map_err(|e| format!("Failed to create PNG file: {}", e))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut png_writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    png_writer
        .write_image_data(bytes)
        .map_err(|e| format!("Failed to write PNG data: {}", e))
}

/// Write the companion thumbnail. Thumbnail failures degrade silently: the
/// export itself already succeeded.
fn write_thumbnail(image: &RgbImage, dir: &Path, stem: &str) -> Option<PathBuf> {
    let thumbs_dir = dir.join("thumbnails");
    std::fs::create_dir_all(&thumbs_dir).ok()?;

    let thumb = image.scaled_to_fit(THUMBNAIL_MAX_SIZE)?;
    let path = thumbs_dir.join(format!("{}_thumb.jpg", stem));
    let bytes = to_rgb8(&thumb);
    encode_jpeg(&bytes, thumb.width, thumb.height, THUMBNAIL_QUALITY, &path).ok()?;
    Some(path)
}

// ============================================================
// Export history
// ============================================================

/// One line in the export history file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Seconds since the Unix epoch at export time.
    pub created_at: u64,

    /// Written image file.
    pub file_path: PathBuf,

    /// Companion thumbnail, when one was written.
    pub thumbnail_path: Option<PathBuf>,

    /// Format label ("JPEG" or "PNG").
    pub format: String,

    /// Longer side of the written image in pixels.
    pub size_px: u32,
}

impl ExportRecord {
    /// Record for a completed export, stamped with the current time.
    pub fn from_result(result: &ExportResult) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            created_at,
            file_path: result.file_path.clone(),
            thumbnail_path: result.thumbnail_path.clone(),
            format: result.format.clone(),
            size_px: result.size_px,
        }
    }
}

/// Load the export history, newest last. A missing file is an empty history.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<Vec<ExportRecord>, String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read export history: {}", e))?;
    serde_json::from_str(&json).map_err(|e| format!("Failed to parse export history: {}", e))
}

/// Append one record to the export history file.
pub fn append_history<P: AsRef<Path>>(record: &ExportRecord, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let mut records = load_history(path)?;
    records.push(record.clone());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create history directory: {}", e))?;
    }

    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| format!("Failed to serialize export history: {}", e))?;
    std::fs::write(path, json).map_err(|e| format!("Failed to write export history: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_creates_file_and_reports_progress() {
        let dir = tempdir().unwrap();
        let image = RgbImage::solid(200, 200, [0.2, 0.4, 0.8]);

        let mut progress_values: Vec<f32> = Vec::new();
        let result = export_image(
            &image,
            dir.path(),
            ExportFormat::Jpeg,
            ExportResolution::Px1080,
            0.9,
            |p| progress_values.push(p),
        )
        .unwrap();

        assert!(result.file_path.exists());
        assert_eq!(result.format, "JPEG");
        assert!(result.size_px > 0);
        assert!(result.size_px <= 1080);

        assert!(!progress_values.is_empty());
        assert_eq!(*progress_values.last().unwrap(), 1.0);
        for pair in progress_values.windows(2) {
            assert!(pair[0] < pair[1], "progress not strictly increasing");
        }
    }

    #[test]
    fn test_export_downscales_to_resolution_cap() {
        let dir = tempdir().unwrap();
        let image = RgbImage::solid(2400, 1200, [0.5, 0.5, 0.5]);

        let result = export_image(
            &image,
            dir.path(),
            ExportFormat::Jpeg,
            ExportResolution::Px1080,
            0.9,
            |_| {},
        )
        .unwrap();

        assert_eq!(result.size_px, 1080);
    }

    #[test]
    fn test_export_never_upscales() {
        let dir = tempdir().unwrap();
        let image = RgbImage::solid(100, 60, [0.5, 0.5, 0.5]);

        let result = export_image(
            &image,
            dir.path(),
            ExportFormat::Png,
            ExportResolution::Px2048,
            0.9,
            |_| {},
        )
        .unwrap();

        assert_eq!(result.size_px, 100);
        assert_eq!(result.format, "PNG");
    }

    #[test]
    fn test_export_writes_thumbnail() {
        let dir = tempdir().unwrap();
        let image = RgbImage::solid(512, 512, [0.3, 0.3, 0.3]);

        let result = export_image(
            &image,
            dir.path(),
            ExportFormat::Png,
            ExportResolution::Original,
            0.9,
            |_| {},
        )
        .unwrap();

        let thumb = result.thumbnail_path.expect("thumbnail should exist");
        assert!(thumb.exists());
        assert!(thumb.to_string_lossy().contains("_thumb"));
    }

    #[test]
    fn test_export_rejects_empty_image() {
        let dir = tempdir().unwrap();
        let image = RgbImage::solid(0, 0, [0.0, 0.0, 0.0]);

        let result = export_image(
            &image,
            dir.path(),
            ExportFormat::Jpeg,
            ExportResolution::Original,
            0.9,
            |_| {},
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_history_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        assert!(load_history(&path).unwrap().is_empty());

        let record = ExportRecord {
            created_at: 1_700_000_000,
            file_path: PathBuf::from("/exports/a.jpg"),
            thumbnail_path: None,
            format: "JPEG".to_string(),
            size_px: 1080,
        };
        append_history(&record, &path).unwrap();
        append_history(&record, &path).unwrap();

        let records = load_history(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].size_px, 1080);
    }
}
