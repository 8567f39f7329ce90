//! Partition lines into kept and ignored by the ignore rules

use crate::rules::MatchRules;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filtered {
    pub kept: Vec<String>,
    pub ignored: Vec<String>,
}

/// A line is ignored iff any rule matches it. Without rules every line is kept.
///
/// Both outputs keep the input's relative order.
pub fn filter(lines: &[String], rules: Option<&MatchRules>) -> Filtered {
    let Some(rules) = rules else {
        return Filtered {
            kept: lines.to_vec(),
            ignored: Vec::new(),
        };
    };

    let (ignored, kept): (Vec<String>, Vec<String>) =
        lines.iter().cloned().partition(|line| rules.is_match(line));
    log::debug!(
        "ignore rules: {} pattern(s), {} kept, {} ignored",
        rules.len(),
        kept.len(),
        ignored.len()
    );
    Filtered { kept, ignored }
}
