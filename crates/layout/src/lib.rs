use replica_render_core::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
    #[error("No page is open to draw on (composer state: {0:?})")]
    PageNotOpen(PageState),
    #[error("Page {0} is still open; seal it before starting another")]
    PageStillOpen(usize),
    #[error("Drawing failed: {0}")]
    Render(#[from] RenderError),
}

pub mod algorithms;
pub mod columns;
pub mod config;
pub(crate) mod engine;
pub mod row;
pub mod text;

pub use self::columns::ColumnLayout;
pub use self::config::{ColumnKind, ColumnSpec, LayoutConfig, Margins, Palette};
pub use self::engine::{
    LayoutCursor, LayoutEngine, PageComposer, PageState, PageSummary, PlacedRow, Placement,
    RowMetrics,
};
pub use self::row::row_height;
pub use self::text::{Segmentation, Segmenter, TemplateRule, segment};

// Re-export geometry types used by the engine to prevent type mismatches
pub use replica_types::{NormalizedRecord, Point, Rect, Size};

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod test_utils;
