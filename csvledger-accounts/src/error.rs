use std::path::PathBuf;
use thiserror::Error;

use crate::name::AccountName;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("cannot find registry file {}", .0.display())]
    RegistryMissing(PathBuf),

    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("account {name} is defined twice in the registry (as `{first}` and `{second}`)")]
    DuplicateAccount {
        name: AccountName,
        first: String,
        second: String,
    },

    #[error(
        "cannot find account {name} in {}. Did you define the correct account? \
         Registry keys may spell each colon as 3 underscores (___). Known accounts: {known}",
        .path.display()
    )]
    AccountNotFound {
        name: AccountName,
        path: PathBuf,
        known: String,
    },

    #[error("account {account}: {reason}")]
    Malformed { account: AccountName, reason: String },

    #[error("account {account}: field `{field}` {reason}")]
    MalformedField {
        account: AccountName,
        field: &'static str,
        reason: String,
    },
}
