//! A backend that keeps every draw call instead of producing pixels or PDF
//! operators. Layout tests assert against it; `finish_document` dumps the
//! recorded commands as text for debugging.

use crate::error::RenderError;
use crate::metrics::StandardMetrics;
use crate::traits::{FontSpec, RenderSurface};
use replica_types::{Color, Point, Rect};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    Text { x: f32, y: f32, text: String, font: FontSpec, color: Color },
    Line { from: Point, to: Point, color: Color, width: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPage {
    pub commands: Vec<DrawCommand>,
}

impl RecordedPage {
    pub fn texts(&self) -> impl Iterator<Item = (f32, f32, &str)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } => Some((from, to)),
            _ => None,
        })
    }

    /// The first text command whose content equals `needle`.
    pub fn find_text(&self, needle: &str) -> Option<(f32, f32)> {
        self.texts()
            .find(|(_, _, text)| *text == needle)
            .map(|(x, y, _)| (x, y))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.find_text(needle).is_some()
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pages: Vec<RecordedPage>,
    current: Option<RecordedPage>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages sealed so far; the page still being drawn is not included.
    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<RecordedPage> {
        self.pages
    }

    fn push(&mut self, command: DrawCommand) {
        self.current.get_or_insert_with(RecordedPage::default).commands.push(command);
    }
}

impl RenderSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &FontSpec,
        color: Color,
    ) -> Result<(), RenderError> {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            font: font.clone(),
            color,
        });
        Ok(())
    }

    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        StandardMetrics::text_width(text, font)
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    ) -> Result<(), RenderError> {
        self.push(DrawCommand::Line { from, to, color, width });
        Ok(())
    }

    fn finish_page(&mut self) -> Result<(), RenderError> {
        self.pages.push(self.current.take().unwrap_or_default());
        Ok(())
    }

    fn pages_finished(&self) -> usize {
        self.pages.len()
    }

    fn finish_document(mut self) -> Result<Vec<u8>, RenderError> {
        if self.current.is_some() {
            self.finish_page()?;
        }
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "page {}", i + 1);
            for cmd in &page.commands {
                let _ = match cmd {
                    DrawCommand::FillRect { rect, .. } => writeln!(
                        out,
                        "  rect {:.2} {:.2} {:.2} {:.2}",
                        rect.x, rect.y, rect.width, rect.height
                    ),
                    DrawCommand::Text { x, y, text, .. } => {
                        writeln!(out, "  text {:.2} {:.2} {:?}", x, y, text)
                    }
                    DrawCommand::Line { from, to, .. } => writeln!(
                        out,
                        "  line {:.2} {:.2} {:.2} {:.2}",
                        from.x, from.y, to.x, to.y
                    ),
                };
            }
        }
        Ok(out.into_bytes())
    }
}
