use std::collections::HashMap;

use log::{debug, info, warn};

use super::codes::FilterCodeSet;
use super::error::{MergeError, TableRole};
use super::filter::filtered_indices;
use super::model::{CellValue, Table};
use super::schema::{self, SchemaVariant, Source};

/// What to do when several Life Cycle rows share a PN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// One output row per matching Life Cycle row, in Life Cycle order.
    #[default]
    FanOut,
    /// Only the first matching Life Cycle row is used.
    FirstMatch,
}

impl JoinPolicy {
    pub const ALL: [JoinPolicy; 2] = [JoinPolicy::FanOut, JoinPolicy::FirstMatch];

    pub fn label(self) -> &'static str {
        match self {
            JoinPolicy::FanOut => "One row per match",
            JoinPolicy::FirstMatch => "First match only",
        }
    }
}

/// Output layout and join behaviour for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub variant: SchemaVariant,
    pub join_policy: JoinPolicy,
}

/// A BOM row paired with its Life Cycle match, if any.
pub type JoinedRow = (usize, Option<usize>);

/// Check both headers before touching any row.
pub fn validate_schema(bom: &Table, life_cycle: &Table, variant: SchemaVariant) -> Result<(), MergeError> {
    let missing = bom.missing_columns(&variant.required_bom_columns());
    if !missing.is_empty() {
        return Err(MergeError::Schema {
            table: TableRole::Bom,
            columns: missing,
        });
    }
    let missing = life_cycle.missing_columns(&variant.required_life_cycle_columns());
    if !missing.is_empty() {
        return Err(MergeError::Schema {
            table: TableRole::LifeCycle,
            columns: missing,
        });
    }
    Ok(())
}

/// Left outer join of the selected BOM rows against the Life Cycle table on key text.
///
/// Null keys never match. BOM order is kept; fan-out follows Life Cycle order.
pub fn left_join(
    bom: &Table,
    bom_rows: &[usize],
    bom_key: usize,
    life_cycle: &Table,
    life_cycle_key: usize,
    policy: JoinPolicy,
) -> Vec<JoinedRow> {
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, cell) in life_cycle.column_values(life_cycle_key).enumerate() {
        if let Some(key) = cell.key_text() {
            index.entry(key).or_default().push(i);
        }
    }

    let mut joined = Vec::with_capacity(bom_rows.len());
    for &row in bom_rows {
        let matches = bom.rows[row][bom_key]
            .key_text()
            .and_then(|key| index.get(&key));
        match (matches, policy) {
            (None, _) => joined.push((row, None)),
            (Some(found), JoinPolicy::FirstMatch) => joined.push((row, found.first().copied())),
            (Some(found), JoinPolicy::FanOut) => {
                if found.len() > 1 {
                    debug!("PN of BOM row {row} matches {} life cycle rows", found.len());
                }
                joined.extend(found.iter().map(|&lc| (row, Some(lc))));
            }
        }
    }
    joined
}

/// Project joined rows into the output layout. Assumes `validate_schema` passed.
pub fn project(bom: &Table, life_cycle: &Table, joined: &[JoinedRow], variant: SchemaVariant) -> Table {
    let columns = variant.output_columns();

    // Resolve names to positions once; validated headers make every lookup succeed.
    let sources: Vec<Source> = columns.iter().map(|c| c.source).collect();
    let positions: Vec<Option<usize>> = sources
        .iter()
        .map(|source| match source {
            Source::Blank => None,
            Source::Bom(name) => bom.column_index(name),
            Source::LifeCycle(name) => life_cycle.column_index(name),
        })
        .collect();

    let rows = joined
        .iter()
        .map(|&(bom_row, lc_row)| {
            sources
                .iter()
                .zip(&positions)
                .map(|(source, position)| match (source, position) {
                    (Source::Bom(_), Some(p)) => bom.rows[bom_row][*p].clone(),
                    (Source::LifeCycle(_), Some(p)) => lc_row
                        .map(|r| life_cycle.rows[r][*p].clone())
                        .unwrap_or(CellValue::Null),
                    (Source::Blank, _) => CellValue::String(String::new()),
                    (_, None) => CellValue::Null,
                })
                .collect()
        })
        .collect();

    Table::new(variant.headers(), rows)
}

/// Filter the BOM by code, join Life Cycle limits and project into the output layout.
pub fn merge(
    bom: &Table,
    life_cycle: &Table,
    codes: &FilterCodeSet,
    options: MergeOptions,
) -> Result<Table, MergeError> {
    validate_schema(bom, life_cycle, options.variant)?;

    let missing_key = |table: &Table, role: TableRole, name: &str| {
        table.column_index(name).ok_or_else(|| MergeError::Schema {
            table: role,
            columns: vec![name.to_string()],
        })
    };
    let filter_key = missing_key(bom, TableRole::Bom, schema::FILTER_KEY)?;
    let bom_key = missing_key(bom, TableRole::Bom, schema::JOIN_KEY)?;
    let life_cycle_key = missing_key(life_cycle, TableRole::LifeCycle, schema::JOIN_KEY)?;

    let selected = filtered_indices(bom, filter_key, codes);
    if selected.is_empty() {
        warn!("No BOM rows match {} MTS codes", codes.len());
        return Err(MergeError::EmptyResult { codes: codes.len() });
    }
    info!("{} of {} BOM rows match the MTS codes", selected.len(), bom.len());

    let joined = left_join(bom, &selected, bom_key, life_cycle, life_cycle_key, options.join_policy);
    let unmatched = joined.iter().filter(|(_, lc)| lc.is_none()).count();
    if unmatched > 0 {
        info!("{unmatched} output rows have no life cycle limit");
    }

    Ok(project(bom, life_cycle, &joined, options.variant))
}
