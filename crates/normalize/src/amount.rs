use replica_types::CellValue;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// The result of normalizing a monetary cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountOutcome {
    /// Blank input or an amount of exactly zero. Displays as an empty string.
    Blank,
    /// A parsed amount rendered as `$#,##0.00` (negatives as `-$#,##0.00`).
    Formatted(String),
    /// Input that could not be parsed, shown as-is.
    Passthrough(String),
}

impl AmountOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            AmountOutcome::Blank => "",
            AmountOutcome::Formatted(s) | AmountOutcome::Passthrough(s) => s,
        }
    }

    pub fn into_display(self) -> String {
        match self {
            AmountOutcome::Blank => String::new(),
            AmountOutcome::Formatted(s) | AmountOutcome::Passthrough(s) => s,
        }
    }
}

pub fn normalize_amount(cell: &CellValue) -> AmountOutcome {
    if cell.is_blank() {
        return AmountOutcome::Blank;
    }
    let parsed = match cell {
        CellValue::Number(n) => Decimal::try_from(*n).ok(),
        CellValue::Text(s) => parse_amount_text(s),
        CellValue::Date(_) | CellValue::Empty => None,
    };
    match parsed.map(to_cents) {
        // Anything that rounds to zero cents displays blank, like a literal zero.
        Some(cents) if cents.is_zero() => AmountOutcome::Blank,
        Some(cents) => AmountOutcome::Formatted(currency(cents)),
        None => {
            let raw = cell.to_string();
            log::debug!("Amount cell {:?} is not numeric; passing it through", raw);
            AmountOutcome::Passthrough(raw)
        }
    }
}

/// String-level shorthand for [`normalize_amount`].
pub fn format_amount(raw: &str) -> String {
    normalize_amount(&CellValue::text(raw)).into_display()
}

fn parse_amount_text(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount already rounded to cents.
fn currency(cents: Decimal) -> String {
    let digits = format!("{:.2}", cents.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((&digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if cents.is_sign_negative() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}
