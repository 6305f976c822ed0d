use log::{error, info};

use super::codes::{FilterCodeSet, parse_codes};
use super::error::MergeError;
use super::loader::{UploadedFile, load_table};
use super::merge::{MergeOptions, merge};
use super::model::Table;

/// Everything the user supplies for one run.
#[derive(Debug, Clone, Default)]
pub struct MergeInputs {
    pub bom: Option<UploadedFile>,
    pub life_cycle: Option<UploadedFile>,
    pub codes_text: String,
}

/// Successful run: the output plus the counts shown to the user.
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub codes: FilterCodeSet,
    pub bom_rows: usize,
    pub life_cycle_rows: usize,
    pub output: Table,
}

/// Run the whole pipeline: check inputs, parse codes, load both tables, merge.
///
/// Missing files are an input error; blank code text is a validation error.
pub fn run(inputs: &MergeInputs, options: MergeOptions) -> Result<MergeReport, MergeError> {
    let result = run_stages(inputs, options);
    match &result {
        Ok(report) => info!(
            "Merge produced {} rows from {} BOM rows",
            report.output.len(),
            report.bom_rows
        ),
        Err(e) => error!("Merge failed: {e}"),
    }
    result
}

fn run_stages(inputs: &MergeInputs, options: MergeOptions) -> Result<MergeReport, MergeError> {
    let (bom_file, life_cycle_file) = require_inputs(inputs)?;

    let codes = parse_codes(&inputs.codes_text)?;
    info!("Filtering on {} MTS codes", codes.len());

    let bom = load_table(bom_file).map_err(MergeError::unclassified)?;
    let life_cycle = load_table(life_cycle_file).map_err(MergeError::unclassified)?;

    let output = merge(&bom, &life_cycle, &codes, options)?;

    Ok(MergeReport {
        codes,
        bom_rows: bom.len(),
        life_cycle_rows: life_cycle.len(),
        output,
    })
}

fn require_inputs(inputs: &MergeInputs) -> Result<(&UploadedFile, &UploadedFile), MergeError> {
    let mut missing = Vec::new();
    if inputs.bom.is_none() {
        missing.push("BOM file");
    }
    if inputs.life_cycle.is_none() {
        missing.push("Life Cycle file");
    }

    match (&inputs.bom, &inputs.life_cycle) {
        (Some(bom), Some(life_cycle)) => Ok((bom, life_cycle)),
        _ => Err(MergeError::InputMissing(missing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::TableRole;
    use crate::data::export::{export, to_xlsx_bytes};
    use crate::data::model::CellValue;
    use crate::data::testutil::{bom_table, life_cycle_table, s};

    fn workbook(name: &str, table: &Table) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            bytes: to_xlsx_bytes(table, "Sheet1").unwrap(),
        }
    }

    fn inputs(bom: &Table, life_cycle: &Table, codes: &str) -> MergeInputs {
        MergeInputs {
            bom: Some(workbook("bom.xlsx", bom)),
            life_cycle: Some(workbook("life_cycle.xlsx", life_cycle)),
            codes_text: codes.to_string(),
        }
    }

    #[test]
    fn end_to_end_single_match() {
        let bom = bom_table(&[("A1", "100"), ("B2", "200")]);
        let lc = life_cycle_table(&[("100", CellValue::Integer(5))]);
        let report = run(&inputs(&bom, &lc, "A1"), MergeOptions::default()).unwrap();

        assert_eq!(report.bom_rows, 2);
        assert_eq!(report.life_cycle_rows, 1);
        assert_eq!(report.output.len(), 1);
        let pn = report.output.column_index("PN").unwrap();
        let limit = report.output.column_index("Life Cycle Limit").unwrap();
        assert_eq!(report.output.rows[0][pn], s("100"));
        assert_eq!(report.output.rows[0][limit].to_string(), "5");

        let bundle = export(&report.output).unwrap();
        let text = String::from_utf8(bundle.csv).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("SW /HCA,Product Lines,StationTypes,MTS,"));
    }

    #[test]
    fn empty_code_text_is_validation_error() {
        let bom = bom_table(&[("A1", "100")]);
        let lc = life_cycle_table(&[]);
        let err = run(&inputs(&bom, &lc, ""), MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::Validation));
    }

    #[test]
    fn separators_only_is_validation_error() {
        let bom = bom_table(&[("A1", "100")]);
        let lc = life_cycle_table(&[]);
        let err = run(&inputs(&bom, &lc, " , ,"), MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::Validation));
    }

    #[test]
    fn missing_files_are_checked_before_codes() {
        let mut inputs = inputs(&bom_table(&[("A1", "100")]), &life_cycle_table(&[]), "");
        inputs.life_cycle = None;
        let err = run(&inputs, MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::InputMissing(ref m) if m == &["Life Cycle file"]));
    }

    #[test]
    fn lists_every_missing_input() {
        let err = run(&MergeInputs::default(), MergeOptions::default()).unwrap_err();
        match err {
            MergeError::InputMissing(missing) => {
                assert_eq!(missing, ["BOM file", "Life Cycle file"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unmatched_codes_warn_without_output() {
        let bom = bom_table(&[("A1", "100")]);
        let lc = life_cycle_table(&[("100", CellValue::Integer(5))]);
        let err = run(&inputs(&bom, &lc, "ZZ9"), MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::EmptyResult { codes: 1 }));
    }

    #[test]
    fn missing_column_in_uploaded_workbook() {
        let lc = life_cycle_table(&[("100", CellValue::Integer(5))]);
        let bom = Table::new(vec!["MTS".into(), "PN".into()], vec![vec![s("A1"), s("100")]]);
        let err = run(&inputs(&bom, &lc, "A1"), MergeOptions::default()).unwrap_err();
        match err {
            MergeError::Schema { table, columns } => {
                assert_eq!(table, TableRole::Bom);
                assert!(columns.contains(&"Group".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn corrupt_upload_is_unclassified() {
        let lc = life_cycle_table(&[("100", CellValue::Integer(5))]);
        let mut inputs = inputs(&bom_table(&[("A1", "100")]), &lc, "A1");
        inputs.bom = Some(UploadedFile {
            name: "bom.xlsx".into(),
            bytes: vec![0, 1, 2, 3],
        });
        let err = run(&inputs, MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::Unclassified(ref msg) if msg.contains("bom.xlsx")));
    }
}
