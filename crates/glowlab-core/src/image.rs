//! Pixel buffer types shared by the pipeline, decoders, and exporters.
//!
//! Images are interleaved f32 data in the 0.0-1.0 range. Transforms never
//! mutate their input; every stage produces a fresh buffer.

/// An RGB image: interleaved f32 data, 3 channels, 0.0-1.0 range.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGB data, `width * height * 3` values
    pub data: Vec<f32>,
}

impl RgbImage {
    /// Build an image from raw interleaved data, checking the length.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(format!(
                "RGB buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A solid-color image. Useful in tests and for flat backgrounds.
    pub fn solid(width: u32, height: u32, rgb: [f32; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * 3);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Longer side in pixels.
    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// True when the image has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Read one pixel. Panics on out-of-bounds access; intended for tests
    /// and small sampling loops, not hot paths.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Aspect-preserving resize with bilinear sampling.
    pub fn resized(&self, new_width: u32, new_height: u32) -> Option<RgbImage> {
        if self.is_empty() || new_width == 0 || new_height == 0 {
            return None;
        }
        let data = resize_bilinear(
            &self.data,
            self.width,
            self.height,
            3,
            new_width,
            new_height,
        );
        Some(RgbImage {
            width: new_width,
            height: new_height,
            data,
        })
    }

    /// Downscale so the longer side fits `max_dimension`, never upscaling.
    ///
    /// Returns a clone when the image already fits.
    pub fn scaled_to_fit(&self, max_dimension: u32) -> Option<RgbImage> {
        if self.is_empty() || max_dimension == 0 {
            return None;
        }
        let longer = self.longer_side() as f32;
        let scale = (max_dimension as f32 / longer).min(1.0);
        if scale >= 1.0 {
            return Some(self.clone());
        }
        let new_width = ((self.width as f32 * scale).round() as u32).max(1);
        let new_height = ((self.height as f32 * scale).round() as u32).max(1);
        self.resized(new_width.min(max_dimension), new_height.min(max_dimension))
    }
}

/// An RGBA image used for overlay textures. Straight (non-premultiplied)
/// alpha, f32 data in 0.0-1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGBA data, `width * height * 4` values
    pub data: Vec<f32>,
}

impl RgbaImage {
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(format!(
                "RGBA buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn resized(&self, new_width: u32, new_height: u32) -> Option<RgbaImage> {
        if self.is_empty() || new_width == 0 || new_height == 0 {
            return None;
        }
        let data = resize_bilinear(
            &self.data,
            self.width,
            self.height,
            4,
            new_width,
            new_height,
        );
        Some(RgbaImage {
            width: new_width,
            height: new_height,
            data,
        })
    }
}

/// Bilinear resample of an interleaved buffer with `channels` components.
fn resize_bilinear(
    src: &[f32],
    src_w: u32,
    src_h: u32,
    channels: usize,
    dst_w: u32,
    dst_h: u32,
) -> Vec<f32> {
    let sw = src_w as usize;
    let sh = src_h as usize;
    let dw = dst_w as usize;
    let dh = dst_h as usize;

    let mut dst = vec![0.0f32; dw * dh * channels];

    // Map destination pixel centers back into source space.
    let x_ratio = src_w as f32 / dst_w as f32;
    let y_ratio = src_h as f32 / dst_h as f32;

    for dy in 0..dh {
        let sy = (dy as f32 + 0.5) * y_ratio - 0.5;
        let y0 = sy.floor().max(0.0) as usize;
        let y1 = (y0 + 1).min(sh - 1);
        let fy = (sy - y0 as f32).clamp(0.0, 1.0);

        for dx in 0..dw {
            let sx = (dx as f32 + 0.5) * x_ratio - 0.5;
            let x0 = sx.floor().max(0.0) as usize;
            let x1 = (x0 + 1).min(sw - 1);
            let fx = (sx - x0 as f32).clamp(0.0, 1.0);

            let i00 = (y0 * sw + x0) * channels;
            let i10 = (y0 * sw + x1) * channels;
            let i01 = (y1 * sw + x0) * channels;
            let i11 = (y1 * sw + x1) * channels;
            let out = (dy * dw + dx) * channels;

            for c in 0..channels {
                let top = src[i00 + c] * (1.0 - fx) + src[i10 + c] * fx;
                let bottom = src[i01 + c] * (1.0 - fx) + src[i11 + c] * fx;
                dst[out + c] = top * (1.0 - fy) + bottom * fy;
            }
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_fills_every_pixel() {
        let img = RgbImage::solid(4, 3, [0.2, 0.4, 0.8]);
        assert_eq!(img.data.len(), 4 * 3 * 3);
        assert_eq!(img.pixel(0, 0), [0.2, 0.4, 0.8]);
        assert_eq!(img.pixel(3, 2), [0.2, 0.4, 0.8]);
    }

    #[test]
    fn test_from_data_rejects_bad_length() {
        let result = RgbImage::from_data(2, 2, vec![0.0; 5]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("size mismatch"));
    }

    #[test]
    fn test_scaled_to_fit_caps_longer_side() {
        let img = RgbImage::solid(400, 200, [0.5, 0.5, 0.5]);
        let scaled = img.scaled_to_fit(100).unwrap();
        assert_eq!(scaled.longer_side(), 100);
        assert_eq!(scaled.height, 50);
    }

    #[test]
    fn test_scaled_to_fit_never_upscales() {
        let img = RgbImage::solid(50, 30, [0.1, 0.2, 0.3]);
        let scaled = img.scaled_to_fit(1000).unwrap();
        assert_eq!(scaled.width, 50);
        assert_eq!(scaled.height, 30);
    }

    #[test]
    fn test_scaled_to_fit_rejects_empty() {
        let img = RgbImage::solid(0, 0, [0.0, 0.0, 0.0]);
        assert!(img.scaled_to_fit(100).is_none());
    }

    #[test]
    fn test_resize_preserves_solid_color() {
        let img = RgbImage::solid(16, 16, [0.3, 0.6, 0.9]);
        let resized = img.resized(7, 5).unwrap();
        for y in 0..5 {
            for x in 0..7 {
                let [r, g, b] = resized.pixel(x, y);
                assert!((r - 0.3).abs() < 1e-5);
                assert!((g - 0.6).abs() < 1e-5);
                assert!((b - 0.9).abs() < 1e-5);
            }
        }
    }
}
