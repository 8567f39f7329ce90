//! The full normalization pass over one input file.
//!
//! Stages run in a fixed order: sanitize, skip/replace header, ignore, rewrite.
//! The result carries everything later steps need: the engine input, the
//! (original, rewritten) pairs used for correlation, and the ignored lines.

use crate::filter::{filter, Filtered};
use crate::header::rewrite_header;
use crate::line::{split_lines, LinePair};
use crate::rewrite::{rewrite, Rewritten};
use crate::rules::{MatchRules, RewriteRules};
use crate::sanitize::sanitize_all;

/// Per-account settings the pipeline needs. `Default` is the identity pass.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub skip_lines: usize,
    pub header_replacement: Option<String>,
    pub ignore_rules: Option<MatchRules>,
    pub rewrite_rules: Option<RewriteRules>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Kept lines as they were before rewriting (sanitized, header already replaced).
    pub kept: Vec<String>,
    /// Kept lines after rewriting; this is what the engine reads.
    pub rewritten: Vec<String>,
    pub pairs: Vec<LinePair>,
    pub ignored: Vec<String>,
}

impl Normalized {
    /// The engine input as one text blob.
    pub fn engine_input(&self) -> String {
        self.rewritten.concat()
    }

    /// Pairs for the rows the engine turns into transactions.
    ///
    /// The engine reads the first row as its column header and skips blank
    /// rows, so neither of those produces a transaction.
    pub fn transaction_pairs(&self) -> Vec<LinePair> {
        self.pairs
            .iter()
            .skip(1)
            .filter(|pair| !pair.rewritten.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// Normalize the decoded contents of one input file.
pub fn normalize(text: &str, options: &NormalizeOptions) -> Normalized {
    normalize_lines(&split_lines(text), options)
}

pub fn normalize_lines(lines: &[String], options: &NormalizeOptions) -> Normalized {
    let sanitized = sanitize_all(lines);
    let headed = rewrite_header(
        &sanitized,
        options.skip_lines,
        options.header_replacement.as_deref(),
    );
    let Filtered { kept, ignored } = filter(&headed, options.ignore_rules.as_ref());
    let Rewritten { lines: rewritten, pairs } = rewrite(&kept, options.rewrite_rules.as_ref());

    log::info!(
        "normalized {} input line(s): {} kept, {} ignored",
        lines.len(),
        kept.len(),
        ignored.len()
    );

    Normalized {
        kept,
        rewritten,
        pairs,
        ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identity_options() {
        let out = normalize("a,b\n1,2\n", &NormalizeOptions::default());
        assert_eq!(out.kept, lines(&["a,b\n", "1,2\n"]));
        assert_eq!(out.rewritten, out.kept);
        assert!(out.ignored.is_empty());
    }

    #[test]
    fn test_stage_order_skip_ignore_rewrite() {
        // The skipped line would match the ignore rule; it must be gone before filtering.
        let options = NormalizeOptions {
            skip_lines: 1,
            header_replacement: Some("date,payee,amount".into()),
            ignore_rules: Some(MatchRules::new(["Saldo"]).unwrap()),
            rewrite_rules: Some(RewriteRules::from_pairs([(";", ",")]).unwrap()),
        };
        let text = "Saldo;100\n1;Coffee;-3.50\n2;Saldo;0\n";
        let out = normalize(text, &options);
        assert_eq!(out.ignored, lines(&["2;Saldo;0\n"]));
        assert_eq!(
            out.rewritten,
            lines(&["date,payee,amount\n", "1,Coffee,-3.50\n"])
        );
        assert_eq!(out.kept, lines(&["date,payee,amount\n", "1;Coffee;-3.50\n"]));
    }

    #[test]
    fn test_sanitizes_before_rules() {
        let options = NormalizeOptions {
            rewrite_rules: Some(RewriteRules::from_pairs([("Caf_", "Cafe")]).unwrap()),
            ..Default::default()
        };
        let out = normalize("1,Caf\u{e9},-3.50\n", &options);
        assert_eq!(out.rewritten, lines(&["1,Cafe,-3.50\n"]));
        assert_eq!(out.pairs[0].original, "1,Caf_,-3.50\n");
    }

    #[test]
    fn test_transaction_pairs_skip_header_and_blank_rows() {
        let options = NormalizeOptions {
            header_replacement: Some("date,payee,amount".into()),
            ..Default::default()
        };
        let out = normalize("1,Coffee,-3.50\n\n2,Tea,-2.00\n", &options);
        let pairs = out.transaction_pairs();
        assert_eq!(
            pairs,
            vec![
                LinePair::unchanged("1,Coffee,-3.50\n"),
                LinePair::unchanged("2,Tea,-2.00\n"),
            ]
        );
    }

    #[test]
    fn test_end_anchored_rules() {
        let options = NormalizeOptions {
            ignore_rules: Some(MatchRules::new([",0.00$", "^$"]).unwrap()),
            rewrite_rules: Some(RewriteRules::from_pairs([(r"-(\d+\.\d\d)$", r"\1")]).unwrap()),
            ..Default::default()
        };
        let out = normalize("1,Fee,0.00\n\n2,Coffee,-3.50\n", &options);
        assert_eq!(out.ignored, lines(&["1,Fee,0.00\n", "\n"]));
        assert_eq!(out.kept, lines(&["2,Coffee,-3.50\n"]));
        assert_eq!(out.rewritten, lines(&["2,Coffee,3.50\n"]));
    }

    #[test]
    fn test_engine_input() {
        let options = NormalizeOptions {
            header_replacement: Some("date,payee,amount".into()),
            ..Default::default()
        };
        let out = normalize("1,Coffee,-3.50\n", &options);
        assert_eq!(out.engine_input(), "date,payee,amount\n1,Coffee,-3.50\n");
    }
}
