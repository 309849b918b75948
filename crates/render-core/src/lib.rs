//! Core rendering abstractions for statement generation.
//!
//! This crate provides the drawing contract the layout engine is written against:
//! - `RenderSurface` trait for the primitive operations every backend supports
//! - `FontSpec` describing the face and size of a text run
//! - Standard Helvetica metrics for backends that draw with the PDF base fonts
//! - `RecordingSurface`, a backend that records draw calls for tests and debugging

mod error;
pub mod metrics;
pub mod recording;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use metrics::{STANDARD_FAMILY, StandardMetrics};
pub use recording::{DrawCommand, RecordedPage, RecordingSurface};
pub use traits::{FontSpec, FontWeight, RenderSurface};
