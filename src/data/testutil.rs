//! Shared fixtures for unit tests.

use super::model::{CellValue, Table};
use super::schema::SchemaVariant;

pub fn s(v: &str) -> CellValue {
    CellValue::String(v.to_string())
}

/// Extended-layout BOM with one row per `(MTS, PN)` pair.
pub fn bom_table(rows: &[(&str, &str)]) -> Table {
    let columns: Vec<String> = SchemaVariant::Extended
        .required_bom_columns()
        .iter()
        .map(|c| c.to_string())
        .collect();

    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, (mts, pn))| {
            columns
                .iter()
                .map(|name| match name.as_str() {
                    "MTS" => s(mts),
                    "PN" => s(pn),
                    "Quantity" => CellValue::Integer(1),
                    "DefaultMinQuantity" => CellValue::Integer(0),
                    other => s(&format!("{other} {i}")),
                })
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

/// Life Cycle table with `PN` and `Limit` columns.
pub fn life_cycle_table(rows: &[(&str, CellValue)]) -> Table {
    Table::new(
        vec!["PN".into(), "Limit".into()],
        rows.iter().map(|(pn, limit)| vec![s(pn), limit.clone()]).collect(),
    )
}
