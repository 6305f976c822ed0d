use std::fmt;

use thiserror::Error;

/// Which uploaded table a schema problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Bom,
    LifeCycle,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Bom => write!(f, "BOM"),
            TableRole::LifeCycle => write!(f, "Life Cycle"),
        }
    }
}

/// How a failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Everything that can stop a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Missing input: {}", .0.join(", "))]
    InputMissing(Vec<&'static str>),

    #[error("Please enter at least one MTS code")]
    Validation,

    #[error(
        "Column not found in {table} file: {}. Please check that your files have the expected columns.",
        quoted(.columns)
    )]
    Schema {
        table: TableRole,
        columns: Vec<String>,
    },

    #[error("No rows found matching the provided MTS codes ({codes} codes checked)")]
    EmptyResult { codes: usize },

    #[error("An error occurred: {0}")]
    Unclassified(String),
}

impl MergeError {
    pub fn severity(&self) -> Severity {
        match self {
            MergeError::EmptyResult { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Wrap any lower-level failure, keeping the full context chain.
    pub fn unclassified(err: anyhow::Error) -> Self {
        MergeError::Unclassified(format!("{err:#}"))
    }
}

fn quoted(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_every_missing_column() {
        let err = MergeError::Schema {
            table: TableRole::Bom,
            columns: vec!["Group".into(), "Vendor".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("BOM"));
        assert!(msg.contains("'Group'"));
        assert!(msg.contains("'Vendor'"));
    }

    #[test]
    fn only_empty_result_is_a_warning() {
        assert_eq!(MergeError::EmptyResult { codes: 2 }.severity(), Severity::Warning);
        assert_eq!(MergeError::Validation.severity(), Severity::Error);
        assert_eq!(
            MergeError::InputMissing(vec!["MTS list"]).severity(),
            Severity::Error
        );
    }

    #[test]
    fn unclassified_keeps_context_chain() {
        let err = anyhow::anyhow!("bad zip").context("reading BOM file");
        let msg = MergeError::unclassified(err).to_string();
        assert!(msg.contains("reading BOM file"));
        assert!(msg.contains("bad zip"));
    }
}
