use crate::traits::FontWeight;

/// Fraction of the font size between the top of a text box and its baseline.
pub const BASELINE_RATIO: f32 = 0.8;

/// Get PDF font name with weight suffix
pub fn get_styled_font_name(base_name: &str, weight: FontWeight) -> String {
    match weight {
        FontWeight::Bold => format!("{}-Bold", base_name),
        FontWeight::Regular => base_name.to_string(),
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Baseline of a text run whose box starts at `top`.
pub fn baseline_y(top: f32, font_size: f32) -> f32 {
    top + font_size * BASELINE_RATIO
}

/// Encodes text for a WinAnsi base font; characters outside Latin-1 become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_names() {
        assert_eq!(get_styled_font_name("Helvetica", FontWeight::Bold), "Helvetica-Bold");
        assert_eq!(get_styled_font_name("Helvetica", FontWeight::Regular), "Helvetica");
    }

    #[test]
    fn win_ansi_keeps_latin1() {
        assert_eq!(to_win_ansi("Página"), vec![b'P', 0xE1, b'g', b'i', b'n', b'a']);
        assert_eq!(to_win_ansi("€"), vec![b'?']);
    }
}
