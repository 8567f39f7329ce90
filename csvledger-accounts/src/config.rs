//! Per-account settings, as stored and as validated.
//!
//! Stored option names follow the current vocabulary; the older names
//! (`ignored_header_lines`, `convert_header`, `ignore_transactions`,
//! `modify_transactions`, `currency`, `expenses_unknown`, `ledger_args`) are
//! accepted as aliases.

use csvledger_core::{MatchRules, NormalizeOptions, RewriteRules};
use serde::{Deserialize, Serialize};

use crate::error::AccountError;
use crate::name::AccountName;

/// A non-negative line count, written either as a number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkipLines {
    Count(i64),
    Text(String),
}

/// Engine passthrough arguments: a list, or one whitespace-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraArgs {
    List(Vec<String>),
    Line(String),
}

impl ExtraArgs {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ExtraArgs::List(args) => args,
            ExtraArgs::Line(line) => line.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// One registry entry exactly as written in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAccountConfig {
    #[serde(default, alias = "ignored_header_lines")]
    pub skip_lines: Option<SkipLines>,

    #[serde(default, alias = "convert_header")]
    pub header_replacement: Option<String>,

    #[serde(default, alias = "ignore_transactions")]
    pub ignore_rules: Option<Vec<String>>,

    /// `[pattern, replacement]` pairs, applied top to bottom.
    #[serde(default, alias = "modify_transactions")]
    pub rewrite_rules: Option<Vec<(String, String)>>,

    #[serde(default)]
    pub date_format: Option<String>,

    #[serde(default, alias = "currency")]
    pub currency_symbol: Option<String>,

    #[serde(default, alias = "expenses_unknown")]
    pub unknown_category_label: Option<String>,

    #[serde(default, alias = "ledger_args")]
    pub engine_extra_args: Option<ExtraArgs>,
}

/// Validated settings for one account. Loaded once per run and never modified.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub name: AccountName,
    /// Defaults to 0.
    pub skip_lines: usize,
    pub header_replacement: Option<String>,
    /// `None` keeps every line.
    pub ignore_rules: Option<MatchRules>,
    /// `None` leaves lines unchanged.
    pub rewrite_rules: Option<RewriteRules>,
    pub date_format: String,
    pub currency_symbol: Option<String>,
    pub unknown_category_label: Option<String>,
    pub engine_extra_args: Vec<String>,
}

impl AccountConfig {
    pub fn from_raw(name: AccountName, raw: RawAccountConfig) -> Result<Self, AccountError> {
        let malformed = |field: &'static str, reason: String| AccountError::MalformedField {
            account: name.clone(),
            field,
            reason,
        };

        let skip_lines = match raw.skip_lines {
            None => 0,
            Some(SkipLines::Count(n)) => usize::try_from(n)
                .map_err(|_| malformed("skip_lines", format!("must not be negative, got {n}")))?,
            Some(SkipLines::Text(text)) => text.trim().parse::<usize>().map_err(|_| {
                malformed(
                    "skip_lines",
                    format!("must be a non-negative integer, got {text:?}"),
                )
            })?,
        };

        let date_format = raw
            .date_format
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| malformed("date_format", "is required".to_string()))?;

        let ignore_rules = raw
            .ignore_rules
            .map(MatchRules::new)
            .transpose()
            .map_err(|e| malformed("ignore_rules", e.to_string()))?;

        let rewrite_rules = raw
            .rewrite_rules
            .map(RewriteRules::from_pairs)
            .transpose()
            .map_err(|e| malformed("rewrite_rules", e.to_string()))?;

        Ok(Self {
            name,
            skip_lines,
            header_replacement: raw.header_replacement,
            ignore_rules,
            rewrite_rules,
            date_format,
            currency_symbol: raw.currency_symbol.filter(|s| !s.is_empty()),
            unknown_category_label: raw.unknown_category_label.filter(|s| !s.is_empty()),
            engine_extra_args: raw
                .engine_extra_args
                .map(ExtraArgs::into_vec)
                .unwrap_or_default(),
        })
    }

    /// The subset of settings the normalization pipeline runs on.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            skip_lines: self.skip_lines,
            header_replacement: self.header_replacement.clone(),
            ignore_rules: self.ignore_rules.clone(),
            rewrite_rules: self.rewrite_rules.clone(),
        }
    }
}
