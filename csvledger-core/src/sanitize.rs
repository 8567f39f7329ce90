//! Character sanitization for raw input lines

use regex::Regex;
use std::sync::LazyLock;

static NON_ASCII_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("non-ASCII pattern is valid"));

/// Replace every maximal run of non-ASCII characters with a single `_`.
///
/// Line terminators are ASCII, so line boundaries never move.
pub fn sanitize(line: &str) -> String {
    NON_ASCII_RUN.replace_all(line, "_").into_owned()
}

pub fn sanitize_all(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| sanitize(line)).collect()
}
