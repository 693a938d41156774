use calamine::DataRef;
use chrono::{NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::ser::Serializer;
use serde::Serialize;
use std::fmt;

/// Largest magnitude at which a whole float is still reported as an integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single cell value as read from the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 rendering of a date/time cell.
    DateTime(String),
    /// Excel error literal such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => f.write_str(s),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => {
                serializer.serialize_str(s)
            }
            CellValue::Int(v) => serializer.serialize_i64(*v),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Bool(v) => serializer.serialize_bool(*v),
        }
    }
}

impl From<&DataRef<'_>> for CellValue {
    fn from(value: &DataRef<'_>) -> Self {
        #[allow(unreachable_patterns)]
        match value {
            DataRef::Empty => CellValue::Empty,
            DataRef::String(s) => CellValue::Text(s.clone()),
            DataRef::SharedString(s) => CellValue::Text((*s).to_string()),
            DataRef::Int(v) => CellValue::Int(*v),
            // xlsx stores every number as a float; whole values come back as integers
            DataRef::Float(v) if v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER => {
                CellValue::Int(*v as i64)
            }
            DataRef::Float(v) => CellValue::Float(*v),
            DataRef::Bool(v) => CellValue::Bool(*v),
            DataRef::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => CellValue::DateTime(iso_datetime(&naive)),
                None => CellValue::Float(dt.as_f64()),
            },
            DataRef::DateTimeIso(s) | DataRef::DurationIso(s) => CellValue::DateTime(s.clone()),
            DataRef::Error(e) => CellValue::Error(e.to_string()),
            _ => CellValue::Empty,
        }
    }
}

fn iso_datetime(value: &NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// One data row keyed by column label, in header order.
///
/// A label that repeats in the header keeps the slot of its first occurrence
/// and the value of its last one.
pub type Record = IndexMap<String, CellValue>;

/// Header plus the raw rows read after it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetWindow {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub products_count: usize,
    pub analysis_count: usize,
    pub month_count: usize,
    pub month_sheets: Vec<String>,
}
