use replica_render_core::RenderError;
use ttf_parser::{Face, GlyphId};

/// A TrueType or OpenType face held in memory.
///
/// Only the bytes are stored; `ttf_parser::Face` borrows them and is cheap
/// to re-create per call, which keeps the surface free of self-references.
#[derive(Clone)]
pub struct RasterFont {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    name: Option<String>,
}

impl std::fmt::Debug for RasterFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterFont")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl RasterFont {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, RenderError> {
        Self::from_collection(data, 0)
    }

    /// Face `index` of a font collection (`.ttc`); plain font files use 0.
    pub fn from_collection(data: Vec<u8>, index: u32) -> Result<Self, RenderError> {
        let face = Face::parse(&data, index)
            .map_err(|e| RenderError::Font(format!("Failed to parse font face {}: {}", index, e)))?;
        let units_per_em = face.units_per_em();
        let name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|n| n.to_string());
        log::debug!("Loaded font face {:?} ({} units/em)", name, units_per_em);
        Ok(Self { data, index, units_per_em, name })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub(crate) fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.index).ok()
    }

    /// Advance width of `text` at `size` points. Characters the face lacks
    /// advance by the `.notdef` glyph.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let Some(face) = self.face() else { return 0.0 };
        let units: u32 = text
            .chars()
            .map(|c| {
                let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
                face.glyph_hor_advance(glyph).unwrap_or(0) as u32
            })
            .sum();
        units as f32 * size / self.units_per_em as f32
    }
}
