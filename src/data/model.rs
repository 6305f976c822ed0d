use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an uploaded or produced table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what a spreadsheet can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Date/time rendered as `YYYY-MM-DD HH:MM:SS`.
    Date(String),
    Null,
}

impl CellValue {
    /// Canonical text used when comparing keys (MTS filter, PN join).
    ///
    /// Integral floats drop their fraction so that `100` typed in a
    /// spreadsheet and `100` read from CSV compare equal. Null has no key.
    pub fn key_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) | CellValue::Date(s) => Some(s.clone()),
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Float(v) => Some(format_float(*v)),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            other => write!(f, "{}", other.key_text().unwrap_or_default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – header plus rows, used for both inputs and the output
// ---------------------------------------------------------------------------

/// A rectangular table of named columns. Every row has `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Ordered column names (the header row).
    pub columns: Vec<String>,
    /// Data rows.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, padding or truncating rows to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Table { columns, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Names from `required` that are not present in the header, in order.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Iterate the values of one column.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().map(move |row| &row[index])
    }
}
