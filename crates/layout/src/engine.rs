//! The page layout engine.
//!
//! `LayoutEngine` holds the immutable configuration; each document build
//! creates a `PageComposer` that owns the cursor and drives a `RenderSurface`
//! page by page. Nothing here is shared between builds, so several documents
//! can be laid out concurrently on separate surfaces.

use crate::LayoutError;
use crate::algorithms::pagination::check_row_fit;
use crate::columns::ColumnLayout;
use crate::config::{ColumnKind, LayoutConfig};
use crate::row::row_height;
use crate::text::Segmenter;
use replica_render_core::RenderSurface;
use replica_types::{NormalizedRecord, Point, Rect};

/// Where the composer is in the per-page cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// No page has been started yet.
    AwaitingHeader,
    RowsInProgress,
    /// The last page was handed to the surface; the next `begin_page` opens a new one.
    PageSealed,
}

/// Transient position of a document build.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutCursor {
    /// Y of the next row's top edge on the current page.
    pub y: f32,
    /// Global index of the next record to place.
    pub next_record: usize,
    /// 1-based number of the current (or last sealed) page.
    pub page_number: usize,
    pub rows_on_page: usize,
}

/// Outcome of offering a row to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed,
    /// The row is taller than an empty page; it was placed alone anyway.
    Forced,
    /// Nothing was drawn and the cursor did not move.
    DoesNotFit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowMetrics {
    pub lines: Vec<String>,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub record_index: usize,
    pub y: f32,
    pub height: f32,
    pub line_count: usize,
    pub forced: bool,
}

/// What ended up on one sealed page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub page_number: usize,
    pub header_top: f32,
    pub header_height: f32,
    pub usable_bottom: f32,
    pub rows: Vec<PlacedRow>,
}

impl PageSummary {
    pub fn rows_height(&self) -> f32 {
        self.rows.iter().map(|r| r.height).sum()
    }

    pub fn has_forced_row(&self) -> bool {
        self.rows.iter().any(|r| r.forced)
    }

}

pub struct LayoutEngine {
    config: LayoutConfig,
    columns: ColumnLayout,
    segmenter: Segmenter,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        let segmenter = Segmenter::new(config.known_parties.clone());
        Self::with_segmenter(config, segmenter)
    }

    pub fn with_segmenter(config: LayoutConfig, segmenter: Segmenter) -> Result<Self, LayoutError> {
        config.validate()?;
        let columns = ColumnLayout::new(&config);
        Ok(Self { config, columns, segmenter })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    /// Description lines and height of the row a record will occupy.
    pub fn measure_row(&self, record: &NormalizedRecord) -> RowMetrics {
        let lines = self
            .segmenter
            .segment(&record.description, self.config.max_line_chars)
            .lines;
        let height = row_height(
            lines.len(),
            self.config.line_spacing,
            self.config.base_row_height,
            self.config.row_padding(),
        );
        RowMetrics { lines, height }
    }

    pub fn composer<'a, S: RenderSurface>(&'a self, surface: &'a mut S) -> PageComposer<'a, S> {
        PageComposer::new(self, surface)
    }

    /// Lays out every record, sealing pages on the surface as they fill up.
    ///
    /// An empty record list still produces one page carrying the header band.
    pub fn paginate<S: RenderSurface>(
        &self,
        records: &[NormalizedRecord],
        surface: &mut S,
    ) -> Result<Vec<PageSummary>, LayoutError> {
        let mut composer = self.composer(surface);
        let mut pages = Vec::new();
        let mut remaining = records.iter().peekable();

        loop {
            composer.begin_page()?;
            while let Some(record) = remaining.peek() {
                if self
                    .config
                    .max_rows_per_page
                    .is_some_and(|cap| composer.cursor().rows_on_page >= cap)
                {
                    break;
                }
                match composer.try_place_row(record)? {
                    Placement::Placed => {
                        remaining.next();
                    }
                    Placement::Forced => {
                        remaining.next();
                        break;
                    }
                    Placement::DoesNotFit => break,
                }
            }
            pages.push(composer.end_page()?);
            if remaining.peek().is_none() {
                break;
            }
        }

        log::debug!(
            "Laid out {} records on {} pages",
            records.len(),
            pages.len()
        );
        Ok(pages)
    }
}

/// Builds pages one at a time on a surface. Owns the cursor for the duration
/// of one document build.
pub struct PageComposer<'a, S: RenderSurface> {
    engine: &'a LayoutEngine,
    surface: &'a mut S,
    cursor: LayoutCursor,
    state: PageState,
    header_top: f32,
    rows: Vec<PlacedRow>,
}

impl<'a, S: RenderSurface> PageComposer<'a, S> {
    fn new(engine: &'a LayoutEngine, surface: &'a mut S) -> Self {
        Self {
            engine,
            surface,
            cursor: LayoutCursor::default(),
            state: PageState::AwaitingHeader,
            header_top: engine.config.margins.top,
            rows: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &LayoutCursor {
        &self.cursor
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Starts a page: resets the cursor below the top margin and draws the header band.
    pub fn begin_page(&mut self) -> Result<(), LayoutError> {
        if self.state == PageState::RowsInProgress {
            return Err(LayoutError::PageStillOpen(self.cursor.page_number));
        }
        let engine = self.engine;
        let config = &engine.config;
        let columns = &engine.columns;

        self.cursor.page_number += 1;
        self.cursor.rows_on_page = 0;
        self.rows.clear();
        self.header_top = config.margins.top;

        let top = self.header_top;
        let height = config.header_height;
        let font = config.header_font();
        let palette = &config.palette;

        self.surface.fill_rect(
            Rect::new(columns.left(), top, columns.table_width(), height),
            palette.header_background,
        )?;
        let text_top = top + (height - font.size) / 2.0;
        for (i, col) in config.columns.iter().enumerate() {
            let width = self.surface.measure_text_width(&col.label, &font);
            let x = columns.column_left(i) + (columns.column_width(i) - width) / 2.0;
            self.surface
                .draw_text(x, text_top, &col.label, &font, palette.header_text)?;
        }
        self.draw_rules(top, height)?;
        self.horizontal_rule(top)?;
        self.horizontal_rule(top + height)?;

        self.cursor.y = top + height;
        self.state = PageState::RowsInProgress;
        log::trace!("Began page {}", self.cursor.page_number);
        Ok(())
    }

    /// Offers one record to the current page.
    ///
    /// Returns `DoesNotFit` without drawing or moving the cursor when the row
    /// would cross the usable bottom. A row that does not fit on an otherwise
    /// empty page is placed anyway and reported as `Forced`.
    pub fn try_place_row(&mut self, record: &NormalizedRecord) -> Result<Placement, LayoutError> {
        if self.state != PageState::RowsInProgress {
            return Err(LayoutError::PageNotOpen(self.state));
        }
        let engine = self.engine;
        let config = &engine.config;
        let metrics = engine.measure_row(record);
        let fit = check_row_fit(self.cursor.y, metrics.height, config.usable_bottom());

        let forced = fit.should_break && self.cursor.rows_on_page == 0;
        if fit.should_break && !forced {
            return Ok(Placement::DoesNotFit);
        }
        if forced {
            log::warn!(
                "Row {} needs {:.2}pt but only {:.2}pt are available; placing it alone on page {}",
                self.cursor.next_record,
                metrics.height,
                fit.remaining_height,
                self.cursor.page_number
            );
        }

        self.draw_row(record, &metrics)?;

        self.rows.push(PlacedRow {
            record_index: self.cursor.next_record,
            y: self.cursor.y,
            height: metrics.height,
            line_count: metrics.lines.len(),
            forced,
        });
        self.cursor.y += metrics.height;
        self.cursor.next_record += 1;
        self.cursor.rows_on_page += 1;

        Ok(if forced { Placement::Forced } else { Placement::Placed })
    }

    /// Closes the table border, prints the page number and seals the page.
    pub fn end_page(&mut self) -> Result<PageSummary, LayoutError> {
        if self.state != PageState::RowsInProgress {
            return Err(LayoutError::PageNotOpen(self.state));
        }
        let engine = self.engine;
        let config = &engine.config;
        let columns = &engine.columns;
        let rule = config.palette.rule;

        for x in [columns.left(), columns.right()] {
            self.surface.draw_line(
                Point::new(x, self.header_top),
                Point::new(x, self.cursor.y),
                rule,
                config.rule_width,
            )?;
        }
        self.horizontal_rule(self.cursor.y)?;

        let font = config.footer_font();
        let label = format!("{} {}", config.footer_label, self.cursor.page_number);
        let width = self.surface.measure_text_width(&label, &font);
        let x = config.page_width - config.margins.right - width;
        let y = config.usable_bottom() + config.footer_offset;
        self.surface
            .draw_text(x, y, &label, &font, config.palette.body_text)?;

        self.surface.finish_page()?;
        self.state = PageState::PageSealed;
        let summary = PageSummary {
            page_number: self.cursor.page_number,
            header_top: self.header_top,
            header_height: config.header_height,
            usable_bottom: config.usable_bottom(),
            rows: std::mem::take(&mut self.rows),
        };
        log::debug!(
            "Sealed page {} with {} rows ({:.2}pt of {:.2}pt)",
            summary.page_number,
            summary.rows.len(),
            summary.rows_height(),
            config.content_height()
        );
        Ok(summary)
    }

    fn draw_row(&mut self, record: &NormalizedRecord, metrics: &RowMetrics) -> Result<(), LayoutError> {
        let engine = self.engine;
        let config = &engine.config;
        let columns = &engine.columns;
        let top = self.cursor.y;
        let font = config.body_font();
        let color = config.palette.body_text;
        let pad_x = config.cell_padding_x;
        let text_top = top + config.cell_padding_y;

        // Alternation follows the document-wide row index, not the page-local one.
        if self.cursor.next_record % 2 == 0 {
            self.surface.fill_rect(
                Rect::new(columns.left(), top, columns.table_width(), metrics.height),
                config.palette.alternate_row,
            )?;
        }

        let cells: [&str; 6] = [
            &record.date,
            "",
            &record.reference,
            &record.debit,
            &record.credit,
            &record.balance,
        ];
        for (i, text) in cells.iter().enumerate() {
            if i == 1 {
                for (n, line) in metrics.lines.iter().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    let y = text_top + n as f32 * config.line_spacing;
                    self.surface
                        .draw_text(columns.column_left(i) + pad_x, y, line, &font, color)?;
                }
                continue;
            }
            if text.is_empty() {
                continue;
            }
            let x = match columns.kind(i) {
                ColumnKind::Text => columns.column_left(i) + pad_x,
                ColumnKind::Amount => {
                    columns.column_right(i) - pad_x - self.surface.measure_text_width(text, &font)
                }
            };
            self.surface.draw_text(x, text_top, text, &font, color)?;
        }

        self.draw_rules(top, metrics.height)?;
        self.horizontal_rule(top + metrics.height)?;
        log::trace!(
            "Placed row {} at y={:.2} ({} lines, {:.2}pt)",
            self.cursor.next_record,
            top,
            metrics.lines.len(),
            metrics.height
        );
        Ok(())
    }

    /// Vertical rules at every column edge between `top` and `top + height`.
    fn draw_rules(&mut self, top: f32, height: f32) -> Result<(), LayoutError> {
        let engine = self.engine;
        let config = &engine.config;
        for &x in engine.columns.edges() {
            self.surface.draw_line(
                Point::new(x, top),
                Point::new(x, top + height),
                config.palette.rule,
                config.rule_width,
            )?;
        }
        Ok(())
    }

    fn horizontal_rule(&mut self, y: f32) -> Result<(), LayoutError> {
        let engine = self.engine;
        let config = &engine.config;
        let columns = &engine.columns;
        self.surface.draw_line(
            Point::new(columns.left(), y),
            Point::new(columns.right(), y),
            config.palette.rule,
            config.rule_width,
        )?;
        Ok(())
    }
}
