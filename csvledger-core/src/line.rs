//! Line-level representation of source files and engine output.

/// Split text into lines, keeping each line's `\n` terminator.
///
/// A final line without a terminator is kept as is. Empty input yields no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Split a line into its body and its `\r\n` or `\n` terminator (empty if none).
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Decode raw file bytes, replacing invalid UTF-8 with U+FFFD.
///
/// The replacement character is non-ASCII, so sanitization later folds it into `_`.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// One surviving source line before and after the rewrite rules ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePair {
    pub original: String,
    pub rewritten: String,
}

impl LinePair {
    pub fn new(original: impl Into<String>, rewritten: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            rewritten: rewritten.into(),
        }
    }

    /// A pair for a line no rule touched.
    pub fn unchanged(line: impl Into<String>) -> Self {
        let line = line.into();
        Self {
            original: line.clone(),
            rewritten: line,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.original != self.rewritten
    }
}
