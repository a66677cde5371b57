//! Shared helpers for the glowlab command-line interface.

mod builders;
mod parsers;

pub use builders::{apply_override, build_parameters};
pub use parsers::{parse_format, parse_override, parse_resolution, parse_style};
