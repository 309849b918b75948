/// Spanish month abbreviations as printed on the statements, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
];

/// Abbreviation for a 1-based month number.
pub fn abbreviation(month: u32) -> Option<&'static str> {
    MONTH_ABBREVIATIONS.get(month.checked_sub(1)? as usize).copied()
}

/// True when `word` is exactly a month abbreviation (case-insensitive).
pub fn is_month(word: &str) -> bool {
    MONTH_ABBREVIATIONS
        .iter()
        .any(|m| word.eq_ignore_ascii_case(m))
}

/// True when any month abbreviation occurs anywhere in `text`.
pub fn contains_month(text: &str) -> bool {
    let upper = text.to_uppercase();
    MONTH_ABBREVIATIONS.iter().any(|m| upper.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lookup() {
        assert_eq!(abbreviation(1), Some("ENE"));
        assert_eq!(abbreviation(12), Some("DIC"));
        assert_eq!(abbreviation(0), None);
        assert_eq!(abbreviation(13), None);
        assert!(is_month("nov"));
        assert!(!is_month("NOVIEMBRE"));
        assert!(contains_month("19 nov"));
        assert!(!contains_month("2024-12-02"));
    }
}
