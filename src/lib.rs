//! Renders bank-statement transaction tables as paginated documents.
//!
//! Records are loaded from CSV or JSON, normalized into display strings,
//! laid out page by page by `replica_layout`, and drawn by one of the render
//! backends: vector PDF through `lopdf`, or raster pages through `tiny-skia`.

pub mod error;
pub mod input;
pub mod pipeline;

pub use error::PipelineError;
pub use input::{InputError, InputFormat, load_records, read_csv, read_json};
pub use pipeline::{Backend, RenderedStatement, StatementPipeline};

pub use replica_layout::{LayoutConfig, LayoutEngine, PageSummary};
pub use replica_render_raster::RasterFont;
pub use replica_types::{CellValue, NormalizedRecord, TransactionRecord};
