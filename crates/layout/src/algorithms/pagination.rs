pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

// Use a small epsilon to handle floating point inaccuracies
const EPSILON: f32 = 0.01;

/// Centralized logic to check if a row fits above the usable bottom of the page.
///
/// * `cursor_y`: The current Y position on the page.
/// * `row_height`: The required height for the row.
/// * `usable_bottom`: The lowest Y a row may reach (page height minus bottom margin and footer).
pub fn check_row_fit(cursor_y: f32, row_height: f32, usable_bottom: f32) -> BreakAnalysis {
    let available = (usable_bottom - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: row_height > available + EPSILON,
        remaining_height: available,
    }
}
