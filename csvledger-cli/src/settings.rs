//! Tool settings: where the registry and journal live and which engine to run.
//!
//! Read from `csvledger.toml` in the working directory when present; command
//! line flags override individual values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use csvledger_accounts::DEFAULT_REGISTRY_FILE;
use csvledger_engine::{DEFAULT_JOURNAL_FILE, DEFAULT_LEDGER_BIN};

pub const SETTINGS_FILE: &str = "csvledger.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Account registry (YAML, or TOML by extension).
    pub registry: PathBuf,
    /// Journal passed to the engine with `-f`.
    pub journal: PathBuf,
    pub ledger_bin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry: PathBuf::from(DEFAULT_REGISTRY_FILE),
            journal: PathBuf::from(DEFAULT_JOURNAL_FILE),
            ledger_bin: DEFAULT_LEDGER_BIN.to_string(),
        }
    }
}

impl Settings {
    pub fn with_overrides(
        mut self,
        registry: Option<PathBuf>,
        journal: Option<PathBuf>,
        ledger_bin: Option<String>,
    ) -> Self {
        if let Some(registry) = registry {
            self.registry = registry;
        }
        if let Some(journal) = journal {
            self.journal = journal;
        }
        if let Some(ledger_bin) = ledger_bin {
            self.ledger_bin = ledger_bin;
        }
        self
    }
}

/// Missing file means defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    log::debug!("settings from {}: {settings:?}", path.display());
    Ok(settings)
}
