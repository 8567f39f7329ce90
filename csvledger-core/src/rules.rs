//! Compiled ignore and rewrite rules.
//!
//! Patterns are compiled once when an account is loaded, so the pipeline
//! stages that use them cannot fail. Rules see a line without its terminator,
//! so `$` anchors at the end of the row text.

use regex::Regex;
use std::borrow::Cow;
use thiserror::Error;

use crate::line::split_terminator;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid replacement `{template}`: {reason}")]
    InvalidTemplate { template: String, reason: String },
}

fn compile(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// An ordered set of patterns; a line matches if any of them is found in it.
#[derive(Debug, Clone)]
pub struct MatchRules {
    patterns: Vec<Regex>,
}

impl MatchRules {
    pub fn new<I, S>(patterns: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Search semantics: the pattern may match anywhere in the line body.
    pub fn is_match(&self, line: &str) -> bool {
        let (body, _) = split_terminator(line);
        self.patterns.iter().any(|re| re.is_match(body))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A single find/replace rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    /// Template already translated to `regex` replacement syntax.
    replacement: String,
}

impl RewriteRule {
    /// `template` uses backslash group references (`\1`, `\g<name>`); `$` is literal.
    pub fn new(pattern: &str, template: &str) -> Result<Self, RuleError> {
        Ok(Self {
            pattern: compile(pattern)?,
            replacement: translate_template(template)?,
        })
    }

    /// Replace every occurrence in `text`.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

/// Rewrite rules applied in order, each to the output of the previous one.
#[derive(Debug, Clone, Default)]
pub struct RewriteRules {
    rules: Vec<RewriteRule>,
}

impl RewriteRules {
    pub fn from_pairs<I, P, T>(pairs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: AsRef<str>,
    {
        let rules = pairs
            .into_iter()
            .map(|(p, t)| RewriteRule::new(p.as_ref(), t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Rewrite the line body; the terminator is carried over untouched.
    pub fn apply(&self, line: &str) -> String {
        let (body, terminator) = split_terminator(line);
        let mut current = body.to_string();
        for rule in &self.rules {
            let changed = match rule.apply(&current) {
                Cow::Borrowed(_) => None,
                Cow::Owned(changed) => Some(changed),
            };
            if let Some(changed) = changed {
                current = changed;
            }
        }
        current.push_str(terminator);
        current
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Translate a backslash-style replacement template into `regex` syntax.
///
/// `\N` becomes `${N}`, `\g<name>` becomes `${name}`, `\\` is a backslash,
/// `\n` and `\t` are newline and tab, and a bare `$` stays literal.
/// Any other escape is kept verbatim. An unterminated or empty `\g<` group is an error.
pub fn translate_template(template: &str) -> Result<String, RuleError> {
    let invalid = |reason: &str| RuleError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    let mut group = String::new();
                    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                        group.push(d);
                        chars.next();
                    }
                    out.push_str(&format!("${{{group}}}"));
                }
                Some('g') => {
                    chars.next();
                    if chars.peek() == Some(&'<') {
                        chars.next();
                        let mut name = String::new();
                        let mut closed = false;
                        for c in chars.by_ref() {
                            if c == '>' {
                                closed = true;
                                break;
                            }
                            name.push(c);
                        }
                        if !closed {
                            return Err(invalid("missing `>` after group name"));
                        }
                        if name.is_empty() {
                            return Err(invalid("empty group name"));
                        }
                        out.push_str(&format!("${{{name}}}"));
                    } else {
                        out.push_str("\\g");
                    }
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                Some('n') => {
                    chars.next();
                    out.push('\n');
                }
                Some('t') => {
                    chars.next();
                    out.push('\t');
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    Ok(out)
}
