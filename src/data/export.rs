use anyhow::{Context, Result};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet};

use super::model::{CellValue, Table};

/// Sheet name used for the spreadsheet download.
pub const SHEET_NAME: &str = "Output";
pub const CSV_FILE_NAME: &str = "output.csv";
pub const XLSX_FILE_NAME: &str = "output.xlsx";

/// Both download payloads for one output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub csv: Vec<u8>,
    pub xlsx: Vec<u8>,
}

/// Serialise the table into both download formats.
pub fn export(table: &Table) -> Result<ExportBundle> {
    let csv = to_csv_bytes(table).context("writing CSV output")?;
    let xlsx = to_xlsx_bytes(table, SHEET_NAME).context("writing Excel output")?;
    log::info!(
        "Exported {} rows ({} CSV bytes, {} Excel bytes)",
        table.len(),
        csv.len(),
        xlsx.len()
    );
    Ok(ExportBundle { csv, xlsx })
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header row plus one record per row; nulls become empty fields, no index column.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

// ---------------------------------------------------------------------------
// Excel
// ---------------------------------------------------------------------------

/// One sheet with a bold header row, no index column.
///
/// The creation date is pinned so identical tables produce identical bytes.
pub fn to_xlsx_bytes(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Null => { /* Leave cell empty */ }
        CellValue::String(s) if s.is_empty() => {}
        CellValue::String(s) | CellValue::Date(s) => {
            ws.write_string(row, col, s)?;
        }
        CellValue::Integer(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        CellValue::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}
