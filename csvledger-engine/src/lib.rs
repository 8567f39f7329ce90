//! csvledger-engine: the boundary to the external CSV → journal converter

pub mod engine;
pub mod ledger;
pub mod postformat;

pub use engine::{ConversionEngine, ConversionRequest, EngineError};
pub use ledger::{LedgerCli, DEFAULT_JOURNAL_FILE, DEFAULT_LEDGER_BIN};
pub use postformat::PostFormat;
