//! GlowLab Core Library
//!
//! Core functionality for the glow photo effect: the rendering pipeline,
//! overlay assets, decoders and exporters, preset management, and the
//! debounced preview scheduler.

pub mod config;
pub mod decoders;
pub mod exporters;
pub mod history;
pub mod image;
pub mod models;
pub mod overlays;
pub mod pipeline;
pub mod presets;
pub mod preview;

// Re-export commonly used types
pub use history::EditHistory;
pub use image::{RgbImage, RgbaImage};
pub use models::{
    built_in_presets, overlay_kind, ExportFormat, ExportResolution, ExportResult, GlowParameters,
    GlowPreset, GlowStyle, OverlayKind, ALL_STYLES,
};
pub use pipeline::GlowRenderer;
pub use preview::{PreviewFrame, PreviewScheduler, DEFAULT_DEBOUNCE};
