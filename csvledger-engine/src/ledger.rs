//! `ledger convert` as the conversion engine.
//!
//! The engine input goes to a temporary file that lives exactly as long as
//! the call; stdout is captured in full.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::engine::{ConversionEngine, ConversionRequest, EngineError};

pub const DEFAULT_LEDGER_BIN: &str = "ledger";
/// Journal `ledger` reads its account and payee declarations from.
pub const DEFAULT_JOURNAL_FILE: &str = "csv2journal.txt";

#[derive(Debug, Clone)]
pub struct LedgerCli {
    program: PathBuf,
    journal: PathBuf,
}

impl LedgerCli {
    pub fn new(program: impl Into<PathBuf>, journal: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            journal: journal.into(),
        }
    }

    /// `-f <journal> convert <input> --input-date-format <fmt> --account <acct>
    /// --generated <extra…>`
    pub fn arguments(&self, input: &Path, request: &ConversionRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.journal.clone().into(),
            "convert".into(),
            input.into(),
            "--input-date-format".into(),
            request.date_format.into(),
            "--account".into(),
            request.account.into(),
            "--generated".into(),
        ];
        args.extend(request.extra_args.iter().map(OsString::from));
        args
    }
}

impl ConversionEngine for LedgerCli {
    fn convert(&self, request: &ConversionRequest<'_>) -> Result<String, EngineError> {
        let mut input = tempfile::Builder::new()
            .prefix("csvledger-")
            .suffix(".csv")
            .tempfile()?;
        input.write_all(request.input.as_bytes())?;
        input.flush()?;

        let program = self.program.display().to_string();
        let args = self.arguments(input.path(), request);
        log::debug!("running {program} {args:?}");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| EngineError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(EngineError::Failed {
                program,
                status: output.status,
                stderr,
            });
        }
        if !stderr.is_empty() {
            log::warn!("{program}: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
