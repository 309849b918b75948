/// Height of a table row holding `line_count` stacked description lines.
///
/// The padding is added before clamping, so a row is never shorter than
/// `base_row_height` and grows by `line_spacing` per extra line once the
/// lines outgrow it. A row always holds at least one line.
pub fn row_height(line_count: usize, line_spacing: f32, base_row_height: f32, padding: f32) -> f32 {
    let lines = line_count.max(1) as f32;
    (lines * line_spacing + padding).max(base_row_height)
}
