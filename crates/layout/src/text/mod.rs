pub mod segmenter;
pub mod templates;
pub mod wrapper;

pub use segmenter::{Segmentation, Segmenter, segment};
pub use templates::{TemplateRule, WordPool};
pub use wrapper::{wrap_text, wrap_words};
