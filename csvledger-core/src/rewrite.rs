//! Apply rewrite rules to kept lines and record what changed

use crate::line::LinePair;
use crate::rules::RewriteRules;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewritten {
    pub lines: Vec<String>,
    /// `pairs[i]` describes `lines[i]`.
    pub pairs: Vec<LinePair>,
}

/// Run every rule over every line; without rules the lines pass through unchanged.
pub fn rewrite(lines: &[String], rules: Option<&RewriteRules>) -> Rewritten {
    let pairs: Vec<LinePair> = match rules {
        None => lines.iter().map(LinePair::unchanged).collect(),
        Some(rules) => lines
            .iter()
            .map(|line| LinePair::new(line.clone(), rules.apply(line)))
            .collect(),
    };
    if let Some(rules) = rules {
        log::debug!(
            "rewrite rules: {} rule(s), {} of {} line(s) modified",
            rules.len(),
            pairs.iter().filter(|p| p.is_modified()).count(),
            pairs.len()
        );
    }
    Rewritten {
        lines: pairs.iter().map(|p| p.rewritten.clone()).collect(),
        pairs,
    }
}
