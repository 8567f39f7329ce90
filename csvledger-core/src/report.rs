//! Ignored-lines report appended to the journal

/// Header line announcing the ignored rows of `source`.
pub fn attention_header(source: &str) -> String {
    format!("; Attention: The following lines from {source} were ignored:\n")
}

/// Append a commented list of `ignored` lines, or return `lines` unchanged if there are none.
pub fn append_ignored(lines: &[String], ignored: &[String], source: &str) -> Vec<String> {
    let mut out = lines.to_vec();
    if ignored.is_empty() {
        return out;
    }
    if out.last().is_some_and(|last| !last.ends_with('\n')) {
        out.push("\n".to_string());
    }
    out.push("\n".to_string());
    out.push(attention_header(source));
    out.extend(ignored.iter().map(|line| format!("; {}\n", line.trim())));
    out
}
