use crate::font::RasterFont;
use crate::glyphs;
use crate::output;
use crate::system::SystemFonts;
use replica_render_core::utils::baseline_y;
use replica_render_core::{FontSpec, FontWeight, RenderError, RenderSurface, StandardMetrics};
use replica_types::{Color, Point, Rect, Size};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

pub const DEFAULT_DPI: f32 = 150.0;

/// Raster backend. Each page is a white pixmap of `page_size` at `dpi`.
pub struct RasterSurface {
    page_size: Size,
    scale: f32,
    pixel_width: u32,
    pixel_height: u32,
    regular: Option<RasterFont>,
    bold: Option<RasterFont>,
    current: Option<Pixmap>,
    pages: Vec<Pixmap>,
}

impl RasterSurface {
    pub fn new(page_size: Size, dpi: f32) -> Result<Self, RenderError> {
        if !(dpi > 0.0) {
            return Err(RenderError::Other(format!("DPI must be positive, got {}", dpi)));
        }
        let scale = dpi / 72.0;
        let pixel_width = (page_size.width * scale).ceil() as u32;
        let pixel_height = (page_size.height * scale).ceil() as u32;
        if pixel_width == 0 || pixel_height == 0 {
            return Err(RenderError::InvalidPixmap(pixel_width, pixel_height));
        }
        Ok(Self {
            page_size,
            scale,
            pixel_width,
            pixel_height,
            regular: None,
            bold: None,
            current: None,
            pages: Vec::new(),
        })
    }

    /// Face used for all text, and for bold text when no bold face is set.
    pub fn with_font(mut self, font: RasterFont) -> Self {
        self.regular = Some(font);
        self
    }

    pub fn with_bold_font(mut self, font: RasterFont) -> Self {
        self.bold = Some(font);
        self
    }

    /// Fills in the faces not set explicitly from the installed fonts.
    /// A bold face is only looked up when the regular one came from `fonts` too.
    pub fn with_system_fonts(mut self, fonts: &SystemFonts, family: &str) -> Result<Self, RenderError> {
        if self.regular.is_none() {
            self.regular = Some(fonts.face(family, FontWeight::Regular)?);
            if self.bold.is_none() {
                self.bold = Some(fonts.face(family, FontWeight::Bold)?);
            }
        }
        Ok(self)
    }

    pub fn has_font(&self) -> bool {
        self.regular.is_some()
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    /// Sealed pages, in order.
    pub fn pages(&self) -> &[Pixmap] {
        &self.pages
    }

    /// Every sealed page encoded as PNG.
    pub fn page_pngs(&self) -> Result<Vec<Vec<u8>>, RenderError> {
        self.pages.iter().map(output::encode_png).collect()
    }

    fn ensure_page(&mut self) -> Result<(), RenderError> {
        if self.current.is_none() {
            let mut pixmap = Pixmap::new(self.pixel_width, self.pixel_height)
                .ok_or(RenderError::InvalidPixmap(self.pixel_width, self.pixel_height))?;
            pixmap.fill(tiny_skia::Color::WHITE);
            self.current = Some(pixmap);
        }
        Ok(())
    }

    fn page(&mut self) -> Result<&mut Pixmap, RenderError> {
        self.ensure_page()?;
        self.current
            .as_mut()
            .ok_or_else(|| RenderError::Other("no open page".into()))
    }
}

fn face_for<'a>(
    regular: &'a Option<RasterFont>,
    bold: &'a Option<RasterFont>,
    weight: FontWeight,
) -> Option<&'a RasterFont> {
    match weight {
        FontWeight::Bold => bold.as_ref().or(regular.as_ref()),
        FontWeight::Regular => regular.as_ref(),
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;
    paint
}

impl RenderSurface for RasterSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        let s = self.scale;
        let pixmap = self.page()?;
        if let Some(r) =
            tiny_skia::Rect::from_xywh(rect.x * s, rect.y * s, rect.width * s, rect.height * s)
        {
            pixmap.fill_rect(r, &paint(color), Transform::identity(), None);
        }
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
        self.ensure_page()?;
        let Some(face) = face_for(&self.regular, &self.bold, font.weight) else {
            return Err(RenderError::Font(format!(
                "No {:?} face loaded to rasterize {:?}",
                font.weight, text
            )));
        };
        let Some(pixmap) = self.current.as_mut() else { return Ok(()) };

        let s = self.scale;
        let px_per_unit = font.size * s / face.units_per_em() as f32;
        let missing = glyphs::fill_text(
            pixmap,
            face,
            text,
            x * s,
            baseline_y(y, font.size) * s,
            px_per_unit,
            &paint(color),
        );
        if missing > 0 {
            log::warn!("{} characters of {:?} have no glyph in the face", missing, text);
        }
        Ok(())
    }

    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        match face_for(&self.regular, &self.bold, font.weight) {
            Some(face) => face.text_width(text, font.size),
            None => StandardMetrics::text_width(text, font),
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) -> Result<(), RenderError> {
        let s = self.scale;
        let pixmap = self.page()?;
        let mut pb = PathBuilder::new();
        pb.move_to(from.x * s, from.y * s);
        pb.line_to(to.x * s, to.y * s);
        if let Some(path) = pb.finish() {
            // Hairlines thinner than a pixel still show up.
            let stroke = Stroke { width: (width * s).max(1.0), ..Stroke::default() };
            pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
        }
        Ok(())
    }

    fn finish_page(&mut self) -> Result<(), RenderError> {
        self.ensure_page()?;
        if let Some(pixmap) = self.current.take() {
            self.pages.push(pixmap);
        }
        log::debug!(
            "Rasterized page {} ({}x{} px)",
            self.pages.len(),
            self.pixel_width,
            self.pixel_height
        );
        Ok(())
    }

    fn pages_finished(&self) -> usize {
        self.pages.len()
    }

    fn finish_document(mut self) -> Result<Vec<u8>, RenderError> {
        if self.current.is_some() {
            self.finish_page()?;
        }
        output::image_pdf(&self.pages, self.page_size)
    }
}
