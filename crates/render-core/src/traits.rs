use crate::error::RenderError;
use replica_types::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Face and size of a text run. The family is the PDF base font name
/// (e.g. `Helvetica`); backends derive the bold face from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub weight: FontWeight,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, weight: FontWeight, size: f32) -> Self {
        Self { family: family.into(), weight, size }
    }

    pub fn regular(family: impl Into<String>, size: f32) -> Self {
        Self::new(family, FontWeight::Regular, size)
    }

    pub fn bold(family: impl Into<String>, size: f32) -> Self {
        Self::new(family, FontWeight::Bold, size)
    }
}

/// The drawing primitives a page backend must provide.
///
/// Coordinates are in points with the origin at the top-left corner of the
/// current page and y growing downwards. A backend opens a page implicitly on
/// the first draw call after construction or after `finish_page`.
pub trait RenderSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Draws a single line of text whose box starts at `(x, y)`; the backend
    /// places the baseline below `y`.
    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &FontSpec,
        color: Color,
    ) -> Result<(), RenderError>;

    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32;

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    ) -> Result<(), RenderError>;

    /// Seals the current page. Subsequent draws start a new page.
    fn finish_page(&mut self) -> Result<(), RenderError>;

    /// Number of pages sealed so far.
    fn pages_finished(&self) -> usize;

    fn finish_document(self) -> Result<Vec<u8>, RenderError>
    where
        Self: Sized;
}
