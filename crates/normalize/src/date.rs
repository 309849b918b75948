use crate::months;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use replica_types::CellValue;

/// The result of normalizing a date cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    Blank,
    /// Text that already carries a month abbreviation, upper-cased and trimmed.
    Abbreviated(String),
    /// A parsed calendar date rendered as `DD MON`.
    Formatted(String),
    /// Unrecognised input, upper-cased.
    Passthrough(String),
}

impl DateOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            DateOutcome::Blank => "",
            DateOutcome::Abbreviated(s) | DateOutcome::Formatted(s) | DateOutcome::Passthrough(s) => s,
        }
    }

    pub fn into_display(self) -> String {
        match self {
            DateOutcome::Blank => String::new(),
            DateOutcome::Abbreviated(s) | DateOutcome::Formatted(s) | DateOutcome::Passthrough(s) => s,
        }
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Largest serial a spreadsheet accepts (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

pub fn normalize_date(cell: &CellValue) -> DateOutcome {
    if cell.is_blank() {
        return DateOutcome::Blank;
    }
    match cell {
        CellValue::Date(d) => DateOutcome::Formatted(day_month(*d)),
        CellValue::Text(s) if months::contains_month(s) => {
            DateOutcome::Abbreviated(s.trim().to_uppercase())
        }
        CellValue::Text(s) => match parse_date_text(s.trim()) {
            Some(d) => DateOutcome::Formatted(day_month(d)),
            None => passthrough(cell),
        },
        CellValue::Number(n) => match from_serial(*n) {
            Some(d) => DateOutcome::Formatted(day_month(d)),
            None => passthrough(cell),
        },
        CellValue::Empty => DateOutcome::Blank,
    }
}

/// String-level shorthand for [`normalize_date`].
pub fn format_date(raw: &str) -> String {
    normalize_date(&CellValue::text(raw)).into_display()
}

fn passthrough(cell: &CellValue) -> DateOutcome {
    let raw = cell.to_string().trim().to_uppercase();
    log::debug!("Date cell {:?} is not a recognised date; passing it through", raw);
    DateOutcome::Passthrough(raw)
}

fn day_month(date: NaiveDate) -> String {
    // `month()` is always 1..=12, so the lookup cannot miss.
    let month = months::abbreviation(date.month()).unwrap_or("???");
    format!("{:02} {}", date.day(), month)
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Spreadsheet serial dates count days from 1899-12-30.
fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}
