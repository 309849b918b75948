use crate::LayoutError;
use replica_render_core::{FontSpec, STANDARD_FAMILY};
use replica_types::{Color, Size};
use serde::{Deserialize, Serialize};

/// Everything the engine needs to lay out one statement. All lengths are in
/// points. Deserializes from camelCase JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    /// Height of the column-label band repeated at the top of every page.
    pub header_height: f32,
    /// Space reserved above the bottom margin for the page number.
    pub footer_height: f32,
    /// Distance from the top of the footer band to the page-number text.
    pub footer_offset: f32,
    /// Minimum height of a row, whatever its line count.
    pub base_row_height: f32,
    /// Vertical advance between wrapped description lines.
    pub line_spacing: f32,
    pub cell_padding_x: f32,
    pub cell_padding_y: f32,
    /// Soft cap on rows per page; `None` lets the page height decide.
    pub max_rows_per_page: Option<usize>,
    /// Longest generic-wrapped description line, in characters.
    pub max_line_chars: usize,
    /// Must be `Helvetica`: layout measures with the standard Helvetica
    /// metrics and the vector backend names its base fonts after this family.
    pub font_family: String,
    pub header_font_size: f32,
    pub body_font_size: f32,
    pub footer_font_size: f32,
    pub palette: Palette,
    pub rule_width: f32,
    /// The six table columns, in order: date, description, reference, debit, credit, balance.
    pub columns: Vec<ColumnSpec>,
    /// Text printed before the page number.
    pub footer_label: String,
    /// Party names recognised inside templated descriptions.
    pub known_parties: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(36.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub header_background: Color,
    pub header_text: Color,
    pub body_text: Color,
    pub alternate_row: Color,
    pub rule: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            header_background: Color::gray(211),
            header_text: Color::BLACK,
            body_text: Color::BLACK,
            alternate_row: Color::gray(242),
            rule: Color::gray(128),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Left-aligned text.
    #[default]
    Text,
    /// Right-aligned monetary value.
    Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    /// Proportional width; weights are normalised over the usable page width.
    pub weight: f32,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>, weight: f32, kind: ColumnKind) -> Self {
        Self { label: label.into(), weight, kind }
    }
}

pub const COLUMN_COUNT: usize = 6;

pub const DEFAULT_KNOWN_PARTIES: &[&str] = &[
    "BBVA MEXICO",
    "BANCO AZTECA",
    "MERCADO PAGO",
    "BANORTE",
    "SANTANDER",
    "BANAMEX",
    "HSBC",
    "SCOTIABANK",
    "INBURSA",
    "BANREGIO",
    "BAJIO",
    "AFIRME",
    "STP",
];

fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Fecha", 0.09, ColumnKind::Text),
        ColumnSpec::new("Concepto", 0.34, ColumnKind::Text),
        ColumnSpec::new("Origen / Referencia", 0.21, ColumnKind::Text),
        ColumnSpec::new("Depósito", 0.12, ColumnKind::Amount),
        ColumnSpec::new("Retiro", 0.12, ColumnKind::Amount),
        ColumnSpec::new("Saldo", 0.12, ColumnKind::Amount),
    ]
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let page = Size::letter();
        Self {
            page_width: page.width,
            page_height: page.height,
            margins: Margins::default(),
            header_height: 20.0,
            footer_height: 24.0,
            footer_offset: 8.0,
            base_row_height: 18.0,
            line_spacing: 10.0,
            cell_padding_x: 4.0,
            cell_padding_y: 4.0,
            max_rows_per_page: None,
            max_line_chars: 30,
            font_family: STANDARD_FAMILY.to_string(),
            header_font_size: 8.5,
            body_font_size: 7.5,
            footer_font_size: 8.0,
            palette: Palette::default(),
            rule_width: 0.5,
            columns: default_columns(),
            footer_label: "Página".to_string(),
            known_parties: DEFAULT_KNOWN_PARTIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LayoutConfig {
    pub fn page_size(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    pub fn usable_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    /// Lowest Y a row may reach.
    pub fn usable_bottom(&self) -> f32 {
        self.page_height - self.margins.bottom - self.footer_height
    }

    /// Height available to rows below the header band.
    pub fn content_height(&self) -> f32 {
        self.usable_bottom() - self.margins.top - self.header_height
    }

    /// Padding added to the stacked line height of every row.
    pub fn row_padding(&self) -> f32 {
        self.cell_padding_y * 2.0
    }

    pub fn header_font(&self) -> FontSpec {
        FontSpec::bold(&self.font_family, self.header_font_size)
    }

    pub fn body_font(&self) -> FontSpec {
        FontSpec::regular(&self.font_family, self.body_font_size)
    }

    pub fn footer_font(&self) -> FontSpec {
        FontSpec::regular(&self.font_family, self.footer_font_size)
    }

    /// Rejects configurations the engine cannot lay out.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |msg: String| -> Result<(), LayoutError> { Err(LayoutError::InvalidConfig(msg)) };

        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return invalid(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            ));
        }
        if self.usable_width() <= 0.0 {
            return invalid("horizontal margins leave no room for the table".into());
        }
        if self.content_height() <= 0.0 {
            return invalid(format!(
                "margins, header and footer leave {:.2}pt for rows",
                self.content_height()
            ));
        }
        if self.line_spacing <= 0.0 || self.base_row_height <= 0.0 {
            return invalid("line spacing and base row height must be positive".into());
        }
        if self.max_line_chars == 0 {
            return invalid("max line chars must be at least 1".into());
        }
        if self.max_rows_per_page == Some(0) {
            return invalid("max rows per page must be at least 1".into());
        }
        if self.font_family != STANDARD_FAMILY {
            return invalid(format!(
                "font family '{}' is not supported; only {} has built-in metrics",
                self.font_family, STANDARD_FAMILY
            ));
        }
        if self.columns.len() != COLUMN_COUNT {
            return invalid(format!(
                "expected {} columns, got {}",
                COLUMN_COUNT,
                self.columns.len()
            ));
        }
        if let Some(col) = self.columns.iter().find(|c| !(c.weight > 0.0)) {
            return invalid(format!("column '{}' has non-positive weight {}", col.label, col.weight));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LayoutConfig::default();
        config.validate().unwrap();
        assert_eq!(config.usable_bottom(), 792.0 - 36.0 - 24.0);
        assert_eq!(config.content_height(), 792.0 - 36.0 - 24.0 - 36.0 - 20.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LayoutConfig = serde_json::from_str(
            r##"{ "maxRowsPerPage": 25, "palette": { "alternateRow": "#EEE" } }"##,
        )
        .unwrap();
        assert_eq!(config.max_rows_per_page, Some(25));
        assert_eq!(config.palette.alternate_row, Color::gray(0xEE));
        assert_eq!(config.palette.rule, Palette::default().rule);
        assert_eq!(config.columns.len(), COLUMN_COUNT);
    }

    #[test]
    fn rejects_broken_configs() {
        let mut config = LayoutConfig::default();
        config.columns.pop();
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));

        let mut config = LayoutConfig::default();
        config.header_height = 1000.0;
        assert!(config.validate().is_err());

        let mut config = LayoutConfig::default();
        config.max_rows_per_page = Some(0);
        assert!(config.validate().is_err());

        let mut config = LayoutConfig::default();
        config.columns[2].weight = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn only_the_measured_family_is_accepted() {
        for family in ["Times-Roman", "Courier", "helvetica", ""] {
            let config = LayoutConfig { font_family: family.into(), ..LayoutConfig::default() };
            assert!(
                matches!(config.validate(), Err(LayoutError::InvalidConfig(ref msg)) if msg.contains(family)),
                "{family:?} should be rejected"
            );
        }
        let config: LayoutConfig = serde_json::from_str(r#"{ "fontFamily": "Helvetica" }"#).unwrap();
        config.validate().unwrap();
    }
}
