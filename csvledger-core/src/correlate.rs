//! Re-attach source rows to the transactions the engine generated from them.
//!
//! The engine is opaque: the only link between an output transaction and its
//! source row is position. The engine must emit exactly one transaction per
//! row, in input order. That count is checked before anything is annotated.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::line::LinePair;

static TRANSACTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+").expect("transaction start pattern is valid"));

/// First annotation line written under every transaction header.
pub const ANNOTATION_MARKER: &str = "    ; CSV data:\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelationError {
    #[error(
        "engine produced {transactions} transaction(s) for {pairs} source row(s); \
         rows must map one-to-one and in order onto generated transactions"
    )]
    CountMismatch { transactions: usize, pairs: usize },
}

/// A transaction header starts with a digit (the posting date).
pub fn is_transaction_start(line: &str) -> bool {
    TRANSACTION_START.is_match(line)
}

pub fn count_transaction_starts(lines: &[String]) -> usize {
    lines.iter().filter(|line| is_transaction_start(line)).count()
}

/// Copy `output` and, after the i-th transaction header, add the provenance of `pairs[i]`.
///
/// Fails without producing anything when the number of transaction headers
/// differs from the number of pairs.
pub fn correlate(output: &[String], pairs: &[LinePair]) -> Result<Vec<String>, CorrelationError> {
    let transactions = count_transaction_starts(output);
    if transactions != pairs.len() {
        return Err(CorrelationError::CountMismatch {
            transactions,
            pairs: pairs.len(),
        });
    }

    let mut annotated = Vec::with_capacity(output.len() + 3 * pairs.len());
    let mut pending = pairs.iter();
    for line in output {
        if !is_transaction_start(line) {
            annotated.push(line.clone());
            continue;
        }
        annotated.push(terminated(line));
        if let Some(pair) = pending.next() {
            annotated.push(ANNOTATION_MARKER.to_string());
            annotated.push(format!("    ; from : {}\n", pair.rewritten.trim()));
            annotated.push(format!("    ; (raw): {}\n", pair.original.trim()));
        }
    }
    log::debug!("annotated {transactions} transaction(s)");
    Ok(annotated)
}

fn terminated(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{line}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_transaction_start_shape() {
        assert!(is_transaction_start("01/02 Cafe\n"));
        assert!(is_transaction_start("2024-01-02 * Cafe\n"));
        assert!(!is_transaction_start("    Expenses:Food  3.50\n"));
        assert!(!is_transaction_start("; comment\n"));
        assert!(!is_transaction_start("\n"));
    }

    #[test]
    fn test_single_transaction() {
        let output = lines(&[
            "01/02 Cafe\n",
            "    Expenses:Unknown  3.50\n",
            "    Assets:Bank\n",
            "\n",
        ]);
        let pairs = vec![LinePair::new("1,Coffee,-3.50\n", "1,Cafe,-3.50\n")];
        let annotated = correlate(&output, &pairs).unwrap();
        assert_eq!(
            annotated,
            lines(&[
                "01/02 Cafe\n",
                "    ; CSV data:\n",
                "    ; from : 1,Cafe,-3.50\n",
                "    ; (raw): 1,Coffee,-3.50\n",
                "    Expenses:Unknown  3.50\n",
                "    Assets:Bank\n",
                "\n",
            ])
        );
    }

    #[test]
    fn test_unterminated_last_header() {
        let annotated = correlate(&lines(&["01/02 Cafe"]), &[LinePair::unchanged("x")]).unwrap();
        assert_eq!(annotated[0], "01/02 Cafe\n");
        assert_eq!(annotated.len(), 4);
    }

    #[test]
    fn test_underrun_and_overrun() {
        let output = lines(&["01/02 A\n", "    x\n", "01/03 B\n", "    y\n"]);
        let one = vec![LinePair::unchanged("a")];
        assert_eq!(
            correlate(&output, &one),
            Err(CorrelationError::CountMismatch {
                transactions: 2,
                pairs: 1
            })
        );

        let three = vec![
            LinePair::unchanged("a"),
            LinePair::unchanged("b"),
            LinePair::unchanged("c"),
        ];
        assert_eq!(
            correlate(&output, &three),
            Err(CorrelationError::CountMismatch {
                transactions: 2,
                pairs: 3
            })
        );
    }

    #[test]
    fn test_empty_output_and_pairs() {
        assert_eq!(correlate(&[], &[]), Ok(Vec::new()));
    }
}
