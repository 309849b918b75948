pub mod color;
pub mod geometry;
pub mod record;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use record::{CellValue, NormalizedRecord, TransactionRecord};
