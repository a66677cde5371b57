//! Data model for the glow pipeline and its callers.

mod export;
mod params;
mod preset;
mod style;

pub use export::{ExportFormat, ExportResolution, ExportResult};
pub use params::GlowParameters;
pub use preset::{built_in_presets, GlowPreset};
pub use style::{overlay_kind, GlowStyle, OverlayKind, ALL_STYLES};
