//! Horizontal geometry of the six-column statement table.

use crate::config::{COLUMN_COUNT, ColumnKind, LayoutConfig};

/// Column boundaries in page coordinates. `edges[i]..edges[i + 1]` is column
/// `i`; the seven edges are also where the vertical rules are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    edges: [f32; COLUMN_COUNT + 1],
    kinds: [ColumnKind; COLUMN_COUNT],
}

impl ColumnLayout {
    /// Splits the usable width proportionally to the column weights. Every
    /// column but the last is rounded to hundredths of a point; the last one
    /// takes whatever remains so the table spans the usable width exactly.
    pub fn new(config: &LayoutConfig) -> Self {
        let usable = config.usable_width();
        let total_weight: f32 = config.columns.iter().map(|c| c.weight).sum();

        let mut edges = [config.margins.left; COLUMN_COUNT + 1];
        let mut kinds = [ColumnKind::Text; COLUMN_COUNT];
        let mut used = 0.0;
        for (i, col) in config.columns.iter().take(COLUMN_COUNT).enumerate() {
            let width = if i == COLUMN_COUNT - 1 {
                usable - used
            } else {
                round_hundredths(col.weight / total_weight * usable)
            };
            used += width;
            edges[i + 1] = edges[i] + width;
            kinds[i] = col.kind;
        }
        Self { edges, kinds }
    }

    pub fn edges(&self) -> &[f32] {
        &self.edges
    }

    pub fn left(&self) -> f32 {
        self.edges[0]
    }

    pub fn right(&self) -> f32 {
        self.edges[COLUMN_COUNT]
    }

    pub fn table_width(&self) -> f32 {
        self.right() - self.left()
    }

    pub fn column_left(&self, index: usize) -> f32 {
        self.edges[index]
    }

    pub fn column_right(&self, index: usize) -> f32 {
        self.edges[index + 1]
    }

    pub fn column_width(&self, index: usize) -> f32 {
        self.edges[index + 1] - self.edges[index]
    }

    pub fn kind(&self, index: usize) -> ColumnKind {
        self.kinds[index]
    }
}

fn round_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
