use std::collections::HashSet;

use super::codes::FilterCodeSet;
use super::model::Table;

// ---------------------------------------------------------------------------
// Filter predicate: keep BOM rows whose MTS is one of the requested codes
// ---------------------------------------------------------------------------

/// Return indices of rows whose `key_column` text is one of `codes`.
///
/// A row passes when:
/// * its key cell is not null, and
/// * the key text equals a code exactly (case-sensitive, no trimming of the cell)
///
/// Input order is preserved.
pub fn filtered_indices(table: &Table, key_column: usize, codes: &FilterCodeSet) -> Vec<usize> {
    let wanted: HashSet<&str> = codes.as_slice().iter().map(String::as_str).collect();

    table
        .column_values(key_column)
        .enumerate()
        .filter(|(_, cell)| {
            cell.key_text()
                .is_some_and(|key| wanted.contains(key.as_str()))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::codes::parse_codes;
    use crate::data::model::CellValue;

    fn mts_table(values: &[CellValue]) -> Table {
        Table::new(
            vec!["MTS".into()],
            values.iter().cloned().map(|v| vec![v]).collect(),
        )
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn keeps_exactly_the_member_rows_in_order() {
        let table = mts_table(&[s("A1"), s("B2"), s("A1"), s("C3"), CellValue::Null, s("B2")]);
        let codes = parse_codes("B2,A1,A1").unwrap();
        let kept = filtered_indices(&table, 0, &codes);
        assert_eq!(kept, vec![0, 1, 2, 5]);

        // Every kept row is a member and every member row is kept.
        for (i, row) in table.rows.iter().enumerate() {
            let member = row[0].key_text().is_some_and(|k| codes.as_slice().contains(&k));
            assert_eq!(member, kept.contains(&i), "row {i}");
        }
    }

    #[test]
    fn comparison_is_exact() {
        let table = mts_table(&[s("a1"), s(" A1"), s("A1 ")]);
        let codes = parse_codes("A1").unwrap();
        assert!(filtered_indices(&table, 0, &codes).is_empty());
    }

    #[test]
    fn numeric_codes_match_typed_cells() {
        let table = mts_table(&[CellValue::Float(1001.0), CellValue::Integer(1002), s("1003")]);
        let codes = parse_codes("1001\n1003").unwrap();
        assert_eq!(filtered_indices(&table, 0, &codes), vec![0, 2]);
    }
}
