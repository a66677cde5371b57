//! Overlay assets: light-leak textures and the procedural reflection.
//!
//! The editor ships eight pre-rendered light-leak textures. This library can
//! load them from a directory (`LightLeak1.png` .. `LightLeak8.png`) or fall
//! back to synthesizing a deterministic stand-in set, so the pipeline works
//! without bundled binaries.

use std::path::Path;

use crate::image::RgbaImage;

/// File stems of the bundled light-leak textures, indexed by leak number.
pub const LIGHT_LEAK_NAMES: [&str; 8] = [
    "LightLeak1",
    "LightLeak2",
    "LightLeak3",
    "LightLeak4",
    "LightLeak5",
    "LightLeak6",
    "LightLeak7",
    "LightLeak8",
];

/// Side length of synthesized leak textures.
const SYNTH_SIZE: u32 = 512;

/// Peak alpha of the procedural reflection at the image center (80/255).
const REFLECTION_PEAK_ALPHA: f32 = 80.0 / 255.0;

/// Normalized anchor position and tint for each synthesized leak. The
/// anchors spread the hot spot across different corners and edges so each
/// index reads as a distinct texture.
const LEAK_RECIPES: [([f32; 2], [f32; 3]); 8] = [
    ([0.0, 0.0], [1.0, 0.55, 0.25]),
    ([1.0, 0.15], [1.0, 0.75, 0.35]),
    ([0.5, 0.0], [1.0, 0.45, 0.45]),
    ([0.0, 1.0], [0.95, 0.6, 0.2]),
    ([1.0, 1.0], [1.0, 0.8, 0.5]),
    ([0.2, 0.5], [0.9, 0.5, 0.6]),
    ([0.85, 0.6], [1.0, 0.65, 0.3]),
    ([0.5, 1.0], [0.95, 0.7, 0.45]),
];

/// The set of light-leak overlay textures the pipeline draws from.
pub struct LightLeakSet {
    leaks: Vec<RgbaImage>,
}

impl LightLeakSet {
    /// Synthesize the built-in stand-in set. Deterministic: the same index
    /// always yields the same texture.
    pub fn procedural() -> Self {
        let leaks = (0..LEAK_RECIPES.len()).map(synthesize_leak).collect();
        Self { leaks }
    }

    /// Load `LightLeak1.png` .. `LightLeak8.png` from a directory. Every
    /// file must be present and decodable.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, String> {
        let dir = dir.as_ref();
        let mut leaks = Vec::with_capacity(LIGHT_LEAK_NAMES.len());
        for name in LIGHT_LEAK_NAMES {
            let path = dir.join(format!("{}.png", name));
            let image = crate::decoders::decode_png_rgba(&path)
                .map_err(|e| format!("Failed to load overlay {}: {}", path.display(), e))?;
            leaks.push(image);
        }
        Ok(Self { leaks })
    }

    /// Texture for a leak index, clamped into range like the original asset
    /// table (an out-of-range index falls back to the last texture).
    pub fn leak(&self, index: usize) -> Option<&RgbaImage> {
        if self.leaks.is_empty() {
            return None;
        }
        self.leaks.get(index.min(self.leaks.len() - 1))
    }

    pub fn len(&self) -> usize {
        self.leaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaks.is_empty()
    }
}

impl Default for LightLeakSet {
    fn default() -> Self {
        Self::procedural()
    }
}

/// Synthesize one leak texture: a tinted hot spot anchored per the recipe
/// table, alpha falling off quadratically with distance.
fn synthesize_leak(index: usize) -> RgbaImage {
    let (anchor, tint) = LEAK_RECIPES[index % LEAK_RECIPES.len()];
    let size = SYNTH_SIZE as usize;
    let ax = anchor[0] * (SYNTH_SIZE - 1) as f32;
    let ay = anchor[1] * (SYNTH_SIZE - 1) as f32;
    // Reach covers most of the texture so the leak bleeds across the frame.
    let reach = SYNTH_SIZE as f32 * 1.1;

    let mut data = Vec::with_capacity(size * size * 4);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - ax;
            let dy = y as f32 - ay;
            let t = ((dx * dx + dy * dy).sqrt() / reach).min(1.0);
            let falloff = (1.0 - t) * (1.0 - t);
            data.push(tint[0]);
            data.push(tint[1]);
            data.push(tint[2]);
            data.push(falloff * 0.9);
        }
    }

    RgbaImage {
        width: SYNTH_SIZE,
        height: SYNTH_SIZE,
        data,
    }
}

/// Synthesize the glass-reflection overlay for a target extent: a white
/// radial highlight whose alpha is `(1 - t^2) * 80/255`, where `t` is the
/// center distance normalized by the half-diagonal.
pub fn reflection_overlay(width: u32, height: u32) -> Option<RgbaImage> {
    if width == 0 || height == 0 {
        return None;
    }

    let w = width as usize;
    let h = height as usize;
    let center_x = (width as f32) / 2.0;
    let center_y = (height as f32) / 2.0;
    let half_diagonal =
        ((width as f32) * (width as f32) + (height as f32) * (height as f32)).sqrt() / 2.0;

    let mut data = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let t = ((dx * dx + dy * dy).sqrt() / half_diagonal).min(1.0);
            data.push(1.0);
            data.push(1.0);
            data.push(1.0);
            data.push((1.0 - t * t) * REFLECTION_PEAK_ALPHA);
        }
    }

    Some(RgbaImage {
        width,
        height,
        data,
    })
}
