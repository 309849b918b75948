//! Raster backend for the statement renderer.
//!
//! Pages are painted into `tiny-skia` pixmaps at a chosen resolution. Text
//! uses glyph outlines from a TrueType face, either supplied by the caller or
//! looked up among the installed fonts with `fontdb`. Drawing text without a
//! face is an error.

mod font;
mod glyphs;
mod output;
mod surface;
mod system;

pub use font::RasterFont;
pub use surface::{DEFAULT_DPI, RasterSurface};
pub use system::SystemFonts;
