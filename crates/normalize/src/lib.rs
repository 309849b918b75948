//! Normalization of raw spreadsheet cells into the strings a statement displays.
//!
//! Every function here is total: malformed input never produces an error, it
//! produces a `Passthrough` outcome carrying a best-effort display string. The
//! outcome enums let callers (and tests) tell which path was taken.

mod amount;
mod date;
pub mod months;

pub use amount::{AmountOutcome, format_amount, normalize_amount};
pub use date::{DateOutcome, format_date, normalize_date};

use replica_types::{CellValue, NormalizedRecord, TransactionRecord};

/// Rewrites every cell of a record to its display form.
pub fn normalize_record(record: &TransactionRecord) -> NormalizedRecord {
    NormalizedRecord {
        date: normalize_date(&record.date).into_display(),
        description: plain_text(&record.description),
        reference: plain_text(&record.reference),
        debit: normalize_amount(&record.debit).into_display(),
        credit: normalize_amount(&record.credit).into_display(),
        balance: normalize_amount(&record.balance).into_display(),
    }
}

pub fn normalize_records(records: &[TransactionRecord]) -> Vec<NormalizedRecord> {
    records.iter().map(normalize_record).collect()
}

fn plain_text(cell: &CellValue) -> String {
    if cell.is_blank() {
        String::new()
    } else {
        cell.to_string().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_normalization_touches_every_column() {
        let record = TransactionRecord::new(
            "2024-01-01",
            "  PAGO A  ",
            1234567.0,
            100.0,
            "",
            "$900",
        );
        let n = normalize_record(&record);
        assert_eq!(n.date, "01 ENE");
        assert_eq!(n.description, "PAGO A");
        assert_eq!(n.reference, "1234567");
        assert_eq!(n.debit, "$100.00");
        assert_eq!(n.credit, "");
        assert_eq!(n.balance, "$900.00");
    }
}
