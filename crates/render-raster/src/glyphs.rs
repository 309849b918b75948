use crate::font::RasterFont;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use ttf_parser::{GlyphId, OutlineBuilder};

/// Collects glyph outlines into one device-space path. Font units are y-up;
/// `origin` is the pen position on the baseline in pixels.
pub(crate) struct GlyphPath {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphPath {
    pub(crate) fn new(origin_x: f32, origin_y: f32, scale: f32) -> Self {
        Self { builder: PathBuilder::new(), origin_x, origin_y, scale }
    }

    pub(crate) fn advance(&mut self, units: f32) {
        self.origin_x += units * self.scale;
    }

    fn x(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        self.origin_y - y * self.scale
    }

    pub(crate) fn fill(self, pixmap: &mut Pixmap, paint: &Paint) {
        if let Some(path) = self.builder.finish() {
            pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

impl OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.x(x), self.y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.x(x), self.y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder
            .quad_to(self.x(x1), self.y(y1), self.x(x), self.y(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.x(x1),
            self.y(y1),
            self.x(x2),
            self.y(y2),
            self.x(x),
            self.y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Paints `text` with its baseline starting at `(x, baseline)` in pixels.
/// Returns how many characters had no glyph in the face.
pub(crate) fn fill_text(
    pixmap: &mut Pixmap,
    font: &RasterFont,
    text: &str,
    x: f32,
    baseline: f32,
    px_per_unit: f32,
    paint: &Paint,
) -> usize {
    let Some(face) = font.face() else { return text.chars().count() };
    let mut path = GlyphPath::new(x, baseline, px_per_unit);
    let mut missing = 0;
    for c in text.chars() {
        let glyph = face.glyph_index(c).unwrap_or_else(|| {
            missing += 1;
            GlyphId(0)
        });
        face.outline_glyph(glyph, &mut path);
        path.advance(face.glyph_hor_advance(glyph).unwrap_or(0) as f32);
    }
    path.fill(pixmap, paint);
    missing
}
