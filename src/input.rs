//! Loading transaction records from CSV and JSON statement exports.
//!
//! Both formats locate the six statement fields by name. Header matching
//! ignores case, accents and whitespace, and accepts the Spanish statement
//! headers as well as English aliases; extra columns are ignored.

use csv::{ReaderBuilder, Trim};
use replica_types::{CellValue, TransactionRecord};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("Record {row}: unsupported value for '{column}': {value}")]
    UnsupportedValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Expected a JSON array of records")]
    NotAnArray,

    #[error("Cannot tell the input format of '{0}'; pass it explicitly")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Format implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    Description,
    Reference,
    Debit,
    Credit,
    Balance,
}

const FIELDS: [Field; 6] = [
    Field::Date,
    Field::Description,
    Field::Reference,
    Field::Debit,
    Field::Credit,
    Field::Balance,
];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Date => "Fecha",
            Field::Description => "Concepto",
            Field::Reference => "Origen / Referencia",
            Field::Debit => "Depósito",
            Field::Credit => "Retiro",
            Field::Balance => "Saldo",
        }
    }

    /// Accepted header names, already folded.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Date => &["fecha", "date"],
            Field::Description => &["concepto", "descripcion", "description"],
            Field::Reference => &["origen/referencia", "referencia", "origen", "reference"],
            Field::Debit => &["deposito", "depositos", "debit"],
            Field::Credit => &["retiro", "retiros", "credit"],
            Field::Balance => &["saldo", "balance"],
        }
    }

    fn matches(self, header: &str) -> bool {
        let folded = fold_header(header);
        self.aliases().iter().any(|a| *a == folded)
    }
}

/// Lowercases, strips accents and drops whitespace (and a leading BOM).
fn fold_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Position of each field among the input's columns.
struct ColumnMap {
    positions: [usize; 6],
}

impl ColumnMap {
    fn from_headers<'a>(headers: impl Iterator<Item = &'a str> + Clone) -> Result<Self, InputError> {
        let mut positions = [0; 6];
        for (slot, field) in positions.iter_mut().zip(FIELDS) {
            *slot = headers
                .clone()
                .position(|h| field.matches(h))
                .ok_or(InputError::MissingColumn(field.label()))?;
        }
        Ok(Self { positions })
    }

    /// Builds a record by asking `cell` for each field at its column position.
    fn record<E>(
        &self,
        mut cell: impl FnMut(Field, usize) -> Result<CellValue, E>,
    ) -> Result<TransactionRecord, E> {
        let mut values = FIELDS.iter().zip(self.positions).map(|(&f, pos)| cell(f, pos));
        let mut next = || values.next().unwrap_or(Ok(CellValue::Empty));
        Ok(TransactionRecord {
            date: next()?,
            description: next()?,
            reference: next()?,
            debit: next()?,
            credit: next()?,
            balance: next()?,
        })
    }
}

/// Reads a CSV export with a header row. Every cell is taken as text; the
/// normalizer parses amounts and dates later.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, InputError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let map = ColumnMap::from_headers(headers.iter())?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let record = map.record(|_, i| Ok::<_, InputError>(CellValue::text(row.get(i).unwrap_or(""))))?;
        records.push(record);
    }
    log::debug!("Read {} records from CSV", records.len());
    Ok(records)
}

/// Reads a JSON array of objects keyed like the CSV headers. Values may be
/// strings, numbers or null.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, InputError> {
    let value: Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = value else {
        return Err(InputError::NotAnArray);
    };

    let mut records = Vec::with_capacity(items.len());
    for (row, item) in items.iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(InputError::UnsupportedValue {
                row,
                column: "record",
                value: item.to_string(),
            });
        };
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        let map = ColumnMap::from_headers(keys.iter().copied())?;

        let record = map.record(|field, pos| {
            let value = &object[keys[pos]];
            json_cell(value).ok_or_else(|| InputError::UnsupportedValue {
                row,
                column: field.label(),
                value: value.to_string(),
            })
        })?;
        records.push(record);
    }
    log::debug!("Read {} records from JSON", records.len());
    Ok(records)
}

fn json_cell(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Empty),
        Value::String(s) => Some(CellValue::text(s.as_str())),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Loads records from a file, inferring the format from its extension
/// unless one is given.
pub fn load_records(path: &Path, format: Option<InputFormat>) -> Result<Vec<TransactionRecord>, InputError> {
    let format = format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| InputError::UnknownFormat(path.display().to_string()))?;
    let reader = BufReader::new(File::open(path)?);
    match format {
        InputFormat::Csv => read_csv(reader),
        InputFormat::Json => read_json(reader),
    }
}
