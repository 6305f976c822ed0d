use super::error::MergeError;

/// Ordered MTS codes parsed from free-form text. Never empty, every code trimmed.
/// Duplicates are kept; the filter treats them as a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCodeSet(Vec<String>);

impl FilterCodeSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Split raw text into codes.
///
/// If the text contains a comma anywhere it is split on commas, otherwise on
/// line breaks. Pieces are trimmed and empty pieces dropped.
pub fn parse_codes(raw: &str) -> Result<FilterCodeSet, MergeError> {
    let separator = if raw.contains(',') { ',' } else { '\n' };
    let codes: Vec<String> = raw
        .split(separator)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect();

    if codes.is_empty() {
        return Err(MergeError::Validation);
    }
    Ok(FilterCodeSet(codes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &str) -> Vec<String> {
        parse_codes(raw).unwrap().as_slice().to_vec()
    }

    #[test]
    fn splits_on_newlines_without_commas() {
        assert_eq!(codes("MTS001\n MTS002 \r\n\nMTS003\n"), ["MTS001", "MTS002", "MTS003"]);
    }

    #[test]
    fn commas_win_over_newlines() {
        // A line break inside a comma list stays part of the piece and is trimmed away
        // only at the edges.
        assert_eq!(codes("A1, B2,\nC3"), ["A1", "B2", "C3"]);
        assert_eq!(codes("A1\nB2,C3"), ["A1\nB2", "C3"]);
    }

    #[test]
    fn comma_count_matches_plain_split() {
        for raw in ["a,b,c", " a , ,b,", ",,,x", "one,two\n,three"] {
            let expected = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).count();
            assert_eq!(parse_codes(raw).unwrap().len(), expected, "input {raw:?}");
        }
    }

    #[test]
    fn newline_count_matches_plain_split() {
        for raw in ["a\nb\nc", " a \n \nb\n", "\n\n\nx", "single"] {
            let expected = raw.split('\n').map(str::trim).filter(|s| !s.is_empty()).count();
            assert_eq!(parse_codes(raw).unwrap().len(), expected, "input {raw:?}");
        }
    }

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(codes("B,A,B"), ["B", "A", "B"]);
    }

    #[test]
    fn blank_input_is_a_validation_error() {
        for raw in ["", "   ", "\n\n", " , ,"] {
            assert!(matches!(parse_codes(raw), Err(MergeError::Validation)), "input {raw:?}");
        }
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(codes(" mts1 ,MTS1"), ["mts1", "MTS1"]);
    }
}
