//! csvledger-core: line normalization and provenance correlation for CSV → journal conversion
//!
//! The pipeline runs skip → ignore → rewrite over the sanitized input lines.
//! The engine output is then walked by [`correlate`], which re-attaches each
//! source row to the transaction generated from it.

pub mod correlate;
pub mod filter;
pub mod header;
pub mod line;
pub mod pipeline;
pub mod report;
pub mod rewrite;
pub mod rules;
pub mod sanitize;

pub use correlate::{
    correlate, count_transaction_starts, is_transaction_start, CorrelationError, ANNOTATION_MARKER,
};
pub use filter::{filter, Filtered};
pub use header::rewrite_header;
pub use line::{decode_lossy, split_lines, split_terminator, LinePair};
pub use pipeline::{normalize, normalize_lines, NormalizeOptions, Normalized};
pub use report::{append_ignored, attention_header};
pub use rewrite::{rewrite, Rewritten};
pub use rules::{translate_template, MatchRules, RewriteRule, RewriteRules, RuleError};
pub use sanitize::{sanitize, sanitize_all};
