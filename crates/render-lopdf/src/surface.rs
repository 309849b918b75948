use crate::writer::StreamingPdfWriter;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, StringFormat, dictionary};
use replica_render_core::utils::{baseline_y, flip_y, get_styled_font_name, to_win_ansi};
use replica_render_core::{FontSpec, RenderError, RenderSurface, StandardMetrics};
use replica_types::{Color, Point, Rect, Size};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Vector backend: every page becomes a PDF content stream using the
/// standard Type1 base fonts, so no font program is embedded.
///
/// Text is measured with the built-in Helvetica metrics whatever family is
/// requested; the statement layout only ever asks for Helvetica.
pub struct LopdfSurface {
    writer: StreamingPdfWriter<Cursor<Vec<u8>>>,
    page_size: Size,
    /// Base font name to resource name (`Helvetica-Bold` -> `F2`).
    font_map: BTreeMap<String, String>,
    page: Option<PageContext>,
}

impl LopdfSurface {
    pub fn new(page_size: Size) -> Result<Self, RenderError> {
        let writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7")?;
        Ok(Self {
            writer,
            page_size,
            font_map: BTreeMap::new(),
            page: None,
        })
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    fn page(&mut self) -> &mut PageContext {
        let height = self.page_size.height;
        self.page.get_or_insert_with(|| PageContext::new(height))
    }

    /// Resource name for a font, registering the base font on first use.
    fn font_resource(&mut self, font: &FontSpec) -> String {
        let base = get_styled_font_name(&font.family, font.weight);
        let next = format!("F{}", self.font_map.len() + 1);
        self.font_map.entry(base).or_insert(next).clone()
    }

    fn font_resources(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for (base, name) in &self.font_map {
            fonts.set(
                name.as_bytes(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => Object::Name(base.as_bytes().to_vec()),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        dictionary! { "Font" => fonts }
    }
}

impl RenderSurface for LopdfSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.page().fill_rect(rect, color);
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
        if text.trim().is_empty() {
            return Ok(());
        }
        let resource = self.font_resource(font);
        self.page().draw_text(x, y, text, &resource, font.size, color);
        Ok(())
    }

    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        StandardMetrics::text_width(text, font)
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) -> Result<(), RenderError> {
        self.page().stroke_line(from, to, color, width);
        Ok(())
    }

    fn finish_page(&mut self) -> Result<(), RenderError> {
        let content = self.page.take().map(PageContext::finish)
            .unwrap_or_else(|| Content { operations: vec![] });
        let ops = content.operations.len();
        let content_id = self.writer.write_content_stream(content)?;
        self.writer.write_page(
            vec![content_id],
            self.page_size.width,
            self.page_size.height,
            None,
        )?;
        log::debug!(
            "Wrote PDF page {} ({} operations)",
            self.writer.page_count(),
            ops
        );
        Ok(())
    }

    fn pages_finished(&self) -> usize {
        self.writer.page_count()
    }

    fn finish_document(mut self) -> Result<Vec<u8>, RenderError> {
        if self.page.is_some() {
            self.finish_page()?;
        }
        let resources = self.font_resources();
        self.writer.set_shared_resources(resources);
        self.writer.set_info(dictionary! {
            "Producer" => Object::string_literal(concat!("replica ", env!("CARGO_PKG_VERSION"))),
        });
        let bytes = self.writer.finish()?.into_inner();
        log::info!("Finished vector PDF ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

#[derive(Default, Clone, PartialEq)]
struct GraphicsState {
    font: Option<(String, f32)>,
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
}

/// Accumulates the operators of one page and skips redundant state changes.
struct PageContext {
    page_height: f32,
    content: Content,
    state: GraphicsState,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: GraphicsState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
        if self.state.stroke != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke = Some(color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        let y = flip_y(rect.bottom(), self.page_height);
        self.push(
            "re",
            vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
        );
        self.push("f", vec![]);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.set_stroke(color, width);
        self.push("m", vec![from.x.into(), flip_y(from.y, self.page_height).into()]);
        self.push("l", vec![to.x.into(), flip_y(to.y, self.page_height).into()]);
        self.push("S", vec![]);
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, resource: &str, size: f32, color: Color) {
        self.push("BT", vec![]);
        let font = Some((resource.to_string(), size));
        if self.state.font != font {
            self.push("Tf", vec![Object::Name(resource.as_bytes().to_vec()), size.into()]);
            self.state.font = font;
        }
        self.set_fill_color(color);
        let pdf_y = flip_y(baseline_y(y, size), self.page_height);
        self.push("Td", vec![x.into(), pdf_y.into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(text), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }
}
