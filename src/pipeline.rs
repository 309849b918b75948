//! Ties the normalizer, the layout engine and a render backend together.

use crate::error::PipelineError;
use crate::input::{InputFormat, load_records};
use replica_layout::{LayoutConfig, LayoutEngine, PageSummary};
use replica_render_core::RenderSurface;
use replica_render_lopdf::LopdfSurface;
use replica_render_raster::{DEFAULT_DPI, RasterFont, RasterSurface, SystemFonts};
use replica_types::TransactionRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Which surface draws the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// PDF content streams with standard Type1 fonts.
    #[default]
    Vector,
    /// Rasterized pages, delivered as an image PDF or PNG files.
    Raster,
}

/// A finished document and the page layout that produced it.
#[derive(Debug)]
pub struct RenderedStatement {
    pub pdf: Vec<u8>,
    pub pages: Vec<PageSummary>,
}

/// Renders statements with one fixed configuration. Cheap to share; every
/// call builds its own surface and cursor.
pub struct StatementPipeline {
    engine: LayoutEngine,
    backend: Backend,
    font: Option<RasterFont>,
    bold_font: Option<RasterFont>,
    dpi: f32,
}

impl StatementPipeline {
    pub fn new(config: LayoutConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            engine: LayoutEngine::new(config)?,
            backend: Backend::default(),
            font: None,
            bold_font: None,
            dpi: DEFAULT_DPI,
        })
    }

    /// Reads a camelCase JSON layout configuration; missing fields keep their defaults.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LayoutConfig, PipelineError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path.display(), e),
            ))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// TrueType face for raster text. Ignored by the vector backend. Without
    /// one, raster rendering looks up an installed sans-serif face.
    pub fn with_font(mut self, font: RasterFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_bold_font(mut self, font: RasterFont) -> Self {
        self.bold_font = Some(font);
        self
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        self.engine.config()
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Normalizes `records` and lays them out on any surface.
    pub fn render_into<S: RenderSurface>(
        &self,
        records: &[TransactionRecord],
        surface: &mut S,
    ) -> Result<Vec<PageSummary>, PipelineError> {
        let normalized = replica_normalize::normalize_records(records);
        Ok(self.engine.paginate(&normalized, surface)?)
    }

    fn raster_surface(&self) -> Result<RasterSurface, PipelineError> {
        let mut surface = RasterSurface::new(self.config().page_size(), self.dpi)?;
        if let Some(font) = &self.font {
            surface = surface.with_font(font.clone());
        }
        if let Some(font) = &self.bold_font {
            surface = surface.with_bold_font(font.clone());
        }
        if !surface.has_font() {
            surface = surface.with_system_fonts(&SystemFonts::load(), &self.config().font_family)?;
        }
        Ok(surface)
    }

    /// Builds the whole document as PDF bytes with the configured backend.
    pub fn render(&self, records: &[TransactionRecord]) -> Result<RenderedStatement, PipelineError> {
        let (pdf, pages) = match self.backend {
            Backend::Vector => {
                let mut surface = LopdfSurface::new(self.config().page_size())?;
                let pages = self.render_into(records, &mut surface)?;
                (surface.finish_document()?, pages)
            }
            Backend::Raster => {
                let mut surface = self.raster_surface()?;
                let pages = self.render_into(records, &mut surface)?;
                (surface.finish_document()?, pages)
            }
        };
        log::info!(
            "Rendered {} records on {} pages with the {:?} backend",
            records.len(),
            pages.len(),
            self.backend
        );
        Ok(RenderedStatement { pdf, pages })
    }

    /// Rasterizes every page and returns them as PNG images, whatever the
    /// configured backend.
    pub fn render_pngs(&self, records: &[TransactionRecord]) -> Result<Vec<Vec<u8>>, PipelineError> {
        let mut surface = self.raster_surface()?;
        self.render_into(records, &mut surface)?;
        Ok(surface.page_pngs()?)
    }

    /// Loads a statement file and writes the result to `output`.
    ///
    /// An output ending in `.png` gets one file per page, numbered after the
    /// stem (`out-1.png`, `out-2.png`, ...). Returns the files written.
    pub fn generate_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        format: Option<InputFormat>,
        output: Q,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let records = load_records(input.as_ref(), format)?;
        let output = output.as_ref();

        let is_png = output
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            let rendered = self.render(&records)?;
            fs::write(output, &rendered.pdf)?;
            return Ok(vec![output.to_path_buf()]);
        }

        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("page")
            .to_string();
        let mut written = Vec::new();
        for (i, png) in self.render_pngs(&records)?.into_iter().enumerate() {
            let path = output.with_file_name(format!("{}-{}.png", stem, i + 1));
            fs::write(&path, png)?;
            written.push(path);
        }
        Ok(written)
    }
}
