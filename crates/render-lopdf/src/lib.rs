//! PDF backend for the statement renderer, built on `lopdf`.
//!
//! `LopdfSurface` turns draw calls into content-stream operators and streams
//! each finished page through `StreamingPdfWriter`. The writer is public so
//! other backends can package their pages as PDF too.

mod surface;
mod writer;

pub use surface::LopdfSurface;
pub use writer::StreamingPdfWriter;
