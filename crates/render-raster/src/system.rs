use crate::font::RasterFont;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use replica_render_core::{FontWeight, RenderError};
use std::path::Path;

/// Families tried after the requested one, in order. `Family::SansSerif`
/// alone maps to Arial, which many Linux hosts lack.
const SANS_FALLBACKS: &[&str] = &[
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];

/// Installed fonts, indexed once and queried by family and weight.
pub struct SystemFonts {
    db: Database,
}

impl SystemFonts {
    /// Indexes the fonts installed on this machine.
    pub fn load() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Indexed {} system font faces", db.len());
        Self { db }
    }

    /// Indexes only the fonts under `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let mut db = Database::new();
        db.load_fonts_dir(dir);
        Self { db }
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// The closest face to `family` at `weight`, falling back through the
    /// common sans-serif families.
    pub fn face(&self, family: &str, weight: FontWeight) -> Result<RasterFont, RenderError> {
        let mut families = vec![Family::Name(family)];
        families.extend(SANS_FALLBACKS.iter().copied().map(Family::Name));
        families.push(Family::SansSerif);

        let query = Query {
            families: &families,
            weight: match weight {
                FontWeight::Regular => Weight::NORMAL,
                FontWeight::Bold => Weight::BOLD,
            },
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query).ok_or_else(|| {
            RenderError::Font(format!(
                "No sans-serif face for '{}' among {} installed faces; pass a font file",
                family,
                self.db.len()
            ))
        })?;

        let font = self
            .db
            .with_face_data(id, |data, index| RasterFont::from_collection(data.to_vec(), index))
            .ok_or_else(|| RenderError::Font(format!("Font data for '{}' could not be read", family)))??;
        log::info!("Using system font {:?} for {:?} text", font.name(), weight);
        Ok(font)
    }
}
