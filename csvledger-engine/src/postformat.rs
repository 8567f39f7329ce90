//! Cosmetic fixes applied to engine output before it is annotated

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// An indented posting line ending in a bare number, e.g. `    Expenses:Food   -3.50`.
static BARE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s+.*\s+)([-0-9.]+)$").expect("bare amount pattern is valid"));

const UNKNOWN_CATEGORY: &str = "Expenses:Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFormat {
    /// Inserted in front of bare posting amounts.
    pub currency_symbol: Option<String>,
    /// Replaces the engine's `Expenses:Unknown` placeholder.
    pub unknown_category_label: Option<String>,
}

impl PostFormat {
    pub fn is_noop(&self) -> bool {
        self.currency_symbol.is_none() && self.unknown_category_label.is_none()
    }

    pub fn apply(&self, lines: &[String]) -> Vec<String> {
        lines.iter().map(|line| self.apply_line(line)).collect()
    }

    pub fn apply_line(&self, line: &str) -> String {
        let (body, terminator) = split_terminator(line);
        let mut body = body.to_string();
        if let Some(symbol) = &self.currency_symbol {
            body = BARE_AMOUNT
                .replace(&body, |caps: &Captures| format!("{}{symbol}{}", &caps[1], &caps[2]))
                .into_owned();
        }
        if let Some(label) = &self.unknown_category_label {
            body = body.replace(UNKNOWN_CATEGORY, label);
        }
        body.push_str(terminator);
        body
    }
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
