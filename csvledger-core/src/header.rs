//! Leading-line removal and header replacement

/// Drop the first `skip` lines and, when given, put `replacement` in front.
///
/// `skip` is clamped to the number of lines. The replacement is prepended even
/// when nothing was skipped, and gets a `\n` terminator if it has none.
pub fn rewrite_header(lines: &[String], skip: usize, replacement: Option<&str>) -> Vec<String> {
    let skip = skip.min(lines.len());
    let mut out = Vec::with_capacity(lines.len() - skip + 1);
    if let Some(header) = replacement {
        out.push(terminated(header));
    }
    out.extend(lines[skip..].iter().cloned());
    out
}

fn terminated(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{line}\n")
    }
}
