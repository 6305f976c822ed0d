use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Uploaded file
// ---------------------------------------------------------------------------

/// A file picked by the user, held in memory for one merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name including extension; used to pick the parser.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Read a picked file fully into memory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(UploadedFile { name, bytes })
    }

    fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an uploaded file into a [`Table`]. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first sheet, first row is the header
/// * `.csv` – header row followed by records
pub fn load_table(file: &UploadedFile) -> Result<Table> {
    let table = match file.extension().as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(&file.bytes),
        "csv" => load_csv(&file.bytes),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", file.name))?;

    if table.is_empty() {
        log::warn!("{} has a header row but no data rows", file.name);
    }
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.columns,
        file.name
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(bytes: &[u8]) -> Result<Table> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).context("opening workbook")?;

    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no sheets")?
        .context("reading first sheet")?;

    let mut rows = range.rows();
    let header = rows.next().context("first sheet is empty")?;
    let header: Vec<CellValue> = header.iter().map(cell_value).collect();

    let data = rows
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(CellValue::is_null))
        .collect();

    Ok(Table::new(header_names(&header), data))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => CellValue::Date(d.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Date(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one record per line.
/// Cell types are guessed per value, but only when the typed value prints back
/// as the exact source text.
fn load_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<CellValue> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(guess_cell_type)
        .collect();

    let mut data = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<CellValue> = record.iter().map(guess_cell_type).collect();
        if !row.iter().all(CellValue::is_null) {
            data.push(row);
        }
    }

    Ok(Table::new(header_names(&header), data))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    let guessed = if let Ok(i) = s.parse::<i64>() {
        CellValue::Integer(i)
    } else if let Ok(f) = s.parse::<f64>() {
        CellValue::Float(f)
    } else if s == "true" || s == "false" {
        CellValue::Bool(s == "true")
    } else {
        return CellValue::String(s.to_string());
    };

    // `007`, `1e3` or `2.50` would lose their spelling as numbers.
    if guessed.key_text().as_deref() == Some(s) {
        guessed
    } else {
        CellValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

/// Turn header cells into unique column names.
///
/// Blank cells become `Unnamed: <index>`; repeats get `.1`, `.2`, … suffixes.
fn header_names(cells: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell
                .key_text()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| format!("Unnamed: {i}"));
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}
