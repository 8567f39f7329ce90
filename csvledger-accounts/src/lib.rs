//! csvledger-accounts: the account registry and per-account conversion settings

pub mod config;
pub mod error;
pub mod name;
pub mod registry;

pub use config::{AccountConfig, ExtraArgs, RawAccountConfig, SkipLines};
pub use error::AccountError;
pub use name::{AccountName, ENCODED_SEPARATOR};
pub use registry::{Registry, RegistryFormat, DEFAULT_REGISTRY_FILE};
