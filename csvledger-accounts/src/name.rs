//! Account identifiers and their storage encoding.
//!
//! Registry keys may spell the `:` namespace separator as `___` so they stay
//! plain identifiers in formats that dislike colons in keys.

use std::fmt;

pub const ENCODED_SEPARATOR: &str = "___";

/// An account identifier in canonical colon form, e.g. `Assets:Bank:Checking`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountName(String);

impl AccountName {
    /// Accepts either spelling; `Assets___Bank` and `Assets:Bank` are the same account.
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().replace(ENCODED_SEPARATOR, ":"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
