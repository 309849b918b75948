//! Transaction rows as they arrive from a spreadsheet and as the layout engine consumes them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw spreadsheet cell. Readers produce whichever variant the source holds;
/// the normalizer decides how each one is displayed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    /// Builds a cell from a string, mapping the empty string to `Empty`.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { CellValue::Empty } else { CellValue::Text(s) }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Date(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// One input row of the statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: CellValue,
    pub description: CellValue,
    pub reference: CellValue,
    pub debit: CellValue,
    pub credit: CellValue,
    pub balance: CellValue,
}

impl TransactionRecord {
    pub fn new(
        date: impl Into<CellValue>,
        description: impl Into<CellValue>,
        reference: impl Into<CellValue>,
        debit: impl Into<CellValue>,
        credit: impl Into<CellValue>,
        balance: impl Into<CellValue>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            reference: reference.into(),
            debit: debit.into(),
            credit: credit.into(),
            balance: balance.into(),
        }
    }
}

/// A record whose cells have all been rewritten to display strings.
///
/// Monetary fields are either empty or `$#,##0.00` (negatives as `-$#,##0.00`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub date: String,
    pub description: String,
    pub reference: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}
