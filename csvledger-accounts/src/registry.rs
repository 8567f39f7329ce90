//! The account registry file: account identifier → conversion settings.
//!
//! YAML is the default format; a `.toml` extension selects TOML. Entries are
//! kept undecoded until looked up, so one broken account does not stop the
//! others from being used.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{AccountConfig, RawAccountConfig};
use crate::error::AccountError;
use crate::name::AccountName;

pub const DEFAULT_REGISTRY_FILE: &str = "bankaccounts.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    Yaml,
    Toml,
}

impl RegistryFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => RegistryFormat::Toml,
            _ => RegistryFormat::Yaml,
        }
    }
}

#[derive(Debug, Clone)]
enum RawEntry {
    Yaml(serde_yaml::Value),
    Toml(toml::Value),
}

impl RawEntry {
    fn decode(&self) -> Result<RawAccountConfig, String> {
        match self {
            RawEntry::Yaml(value) => {
                serde_yaml::from_value(value.clone()).map_err(|e| e.to_string())
            }
            RawEntry::Toml(value) => value
                .clone()
                .try_into()
                .map_err(|e: toml::de::Error| e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    /// The key as written in the file.
    key: String,
    raw: RawEntry,
}

#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    entries: BTreeMap<AccountName, Entry>,
}

impl Registry {
    pub fn load(path: &Path) -> Result<Self, AccountError> {
        if !path.exists() {
            return Err(AccountError::RegistryMissing(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| AccountError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_text(&text, RegistryFormat::from_path(path), path)?;
        log::info!(
            "loaded {} account(s) from {}",
            registry.entries.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse registry text; `origin` is only used in messages.
    pub fn from_text(
        text: &str,
        format: RegistryFormat,
        origin: &Path,
    ) -> Result<Self, AccountError> {
        let parse_error = |reason: String| AccountError::Parse {
            path: origin.to_path_buf(),
            reason,
        };
        let raw: Vec<(String, RawEntry)> = match format {
            RegistryFormat::Yaml if text.trim().is_empty() => Vec::new(),
            RegistryFormat::Yaml => {
                let map: Option<BTreeMap<String, serde_yaml::Value>> =
                    serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
                map.unwrap_or_default()
                    .into_iter()
                    .map(|(key, value)| (key, RawEntry::Yaml(value)))
                    .collect()
            }
            RegistryFormat::Toml => {
                let map: BTreeMap<String, toml::Value> =
                    toml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
                map.into_iter()
                    .map(|(key, value)| (key, RawEntry::Toml(value)))
                    .collect()
            }
        };

        let mut entries: BTreeMap<AccountName, Entry> = BTreeMap::new();
        for (key, raw) in raw {
            let name = AccountName::parse(&key);
            if let Some(existing) = entries.get(&name) {
                return Err(AccountError::DuplicateAccount {
                    name,
                    first: existing.key.clone(),
                    second: key,
                });
            }
            entries.insert(name, Entry { key, raw });
        }

        Ok(Self {
            path: origin.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn account_names(&self) -> impl Iterator<Item = &AccountName> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find and validate an account; `query` may use `:` or `___`.
    pub fn lookup(&self, query: &str) -> Result<AccountConfig, AccountError> {
        let name = AccountName::parse(query);
        let Some(entry) = self.entries.get(&name) else {
            return Err(AccountError::AccountNotFound {
                name,
                path: self.path.clone(),
                known: self.known_accounts(),
            });
        };
        log::debug!("account {} found under key `{}`", name, entry.key);
        let raw = entry.raw.decode().map_err(|reason| AccountError::Malformed {
            account: name.clone(),
            reason,
        })?;
        AccountConfig::from_raw(name, raw)
    }

    fn known_accounts(&self) -> String {
        if self.entries.is_empty() {
            return "(none)".to_string();
        }
        self.entries
            .keys()
            .map(AccountName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
Assets___Bank___Checking:
  ignored_header_lines: 4
  convert_header: "date,,payee,amount"
  ignore_transactions:
    - "^#"
    - "Opening balance"
  modify_transactions:
    - ["AMZN Mktp", "Amazon"]
    - ['(\d\d)\.(\d\d)\.(\d{4})', '\3/\2/\1']
  date_format: "%Y/%m/%d"
  currency: "EUR "
  expenses_unknown: "Expenses:Uncategorized"
  ledger_args: "--invert"

"Liabilities:Visa":
  skip_lines: "1"
  date_format: "%m/%d/%Y"
  engine_extra_args: ["--rich-data"]

Broken:
  ignore_rules: "not a list"
  date_format: "%d"
"#;

    fn yaml() -> Registry {
        Registry::from_text(YAML, RegistryFormat::Yaml, Path::new("bankaccounts.yml")).unwrap()
    }

    #[test]
    fn test_lookup_in_either_spelling() {
        let registry = yaml();
        let by_colon = registry.lookup("Assets:Bank:Checking").unwrap();
        let by_underscore = registry.lookup("Assets___Bank___Checking").unwrap();
        assert_eq!(by_colon.name, by_underscore.name);
        assert_eq!(by_colon.name.as_str(), "Assets:Bank:Checking");

        let visa = registry.lookup("Liabilities___Visa").unwrap();
        assert_eq!(visa.skip_lines, 1);
        assert_eq!(visa.engine_extra_args, vec!["--rich-data"]);
    }

    #[test]
    fn test_legacy_option_names() {
        let config = yaml().lookup("Assets:Bank:Checking").unwrap();
        assert_eq!(config.skip_lines, 4);
        assert_eq!(config.header_replacement.as_deref(), Some("date,,payee,amount"));
        assert_eq!(config.ignore_rules.as_ref().map(|r| r.len()), Some(2));
        let rewrite = config.rewrite_rules.as_ref().unwrap();
        assert_eq!(rewrite.apply("24.12.2023,AMZN Mktp\n"), "2023/12/24,Amazon\n");
        assert_eq!(config.currency_symbol.as_deref(), Some("EUR "));
        assert_eq!(
            config.unknown_category_label.as_deref(),
            Some("Expenses:Uncategorized")
        );
        assert_eq!(config.engine_extra_args, vec!["--invert"]);
    }

    #[test]
    fn test_unknown_account_hints_at_encoding() {
        let err = yaml().lookup("Assets:Cash").unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, AccountError::AccountNotFound { .. }));
        assert!(message.contains("Assets:Cash"));
        assert!(message.contains("___"));
        assert!(message.contains("Liabilities:Visa"));
    }

    #[test]
    fn test_broken_entry_only_fails_its_own_lookup() {
        let registry = yaml();
        assert!(matches!(
            registry.lookup("Broken"),
            Err(AccountError::Malformed { .. })
        ));
        assert!(registry.lookup("Liabilities:Visa").is_ok());
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let text = "A___B:\n  date_format: x\n\"A:B\":\n  date_format: y\n";
        let err = Registry::from_text(text, RegistryFormat::Yaml, Path::new("r.yml")).unwrap_err();
        assert!(matches!(err, AccountError::DuplicateAccount { .. }));
    }

    #[test]
    fn test_empty_yaml() {
        let registry = Registry::from_text("", RegistryFormat::Yaml, Path::new("r.yml")).unwrap();
        assert!(registry.is_empty());
        assert!(registry.lookup("X").unwrap_err().to_string().contains("(none)"));
    }

    #[test]
    fn test_toml_registry() {
        let text = r#"
[Assets___Bank]
skip_lines = 1
header_replacement = "date,payee,amount"
rewrite_rules = [["Coffee", "Cafe"]]
date_format = "%d.%m.%Y"
currency_symbol = "$"
"#;
        let registry =
            Registry::from_text(text, RegistryFormat::Toml, Path::new("accounts.toml")).unwrap();
        let config = registry.lookup("Assets:Bank").unwrap();
        assert_eq!(config.skip_lines, 1);
        assert_eq!(config.date_format, "%d.%m.%Y");
        assert_eq!(config.currency_symbol.as_deref(), Some("$"));
        assert_eq!(
            config.rewrite_rules.unwrap().apply("1,Coffee,-3.50\n"),
            "1,Cafe,-3.50\n"
        );
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(RegistryFormat::from_path(Path::new("a.toml")), RegistryFormat::Toml);
        assert_eq!(RegistryFormat::from_path(Path::new("a.yml")), RegistryFormat::Yaml);
        assert_eq!(RegistryFormat::from_path(Path::new("accounts")), RegistryFormat::Yaml);
    }
}
