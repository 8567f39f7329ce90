//! `csvledger convert`: normalize → engine → post-format → annotate → ignored report

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use csvledger_accounts::{AccountConfig, Registry};
use csvledger_core::{append_ignored, correlate, decode_lossy, normalize, split_lines, Normalized};
use csvledger_engine::{ConversionEngine, ConversionRequest, LedgerCli, PostFormat};

use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct ConvertJob {
    /// Account identifier, `:` or `___` separated.
    pub account: String,
    pub input: PathBuf,
    /// Print the normalized engine input instead of running the engine.
    pub dry_run: bool,
}

pub fn run(settings: &Settings, job: &ConvertJob, out: &mut impl Write) -> Result<()> {
    // Everything that can be checked up front is checked before the engine runs.
    let registry = Registry::load(&settings.registry)?;
    let program = if job.dry_run {
        None
    } else {
        if !settings.journal.exists() {
            bail!("Cannot find expected file {}", settings.journal.display());
        }
        let program = which::which(&settings.ledger_bin).with_context(|| {
            format!("cannot find the conversion engine `{}`", settings.ledger_bin)
        })?;
        Some(program)
    };
    if !job.input.exists() {
        bail!("Cannot find input file {}", job.input.display());
    }
    let account = registry.lookup(&job.account)?;

    let bytes = fs::read(&job.input).with_context(|| format!("read {}", job.input.display()))?;
    let normalized = normalize(&decode_lossy(&bytes), &account.normalize_options());
    let source = job.input.display().to_string();

    let lines = match program {
        None => append_ignored(&normalized.rewritten, &normalized.ignored, &source),
        Some(program) => {
            let engine = LedgerCli::new(program, &settings.journal);
            build_journal(&engine, &account, &normalized, &source)?
        }
    };

    out.write_all(lines.concat().as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Run the engine over already normalized input and fuse its output with the source rows.
pub fn build_journal(
    engine: &impl ConversionEngine,
    account: &AccountConfig,
    normalized: &Normalized,
    source: &str,
) -> Result<Vec<String>> {
    let input = normalized.engine_input();
    let request = ConversionRequest {
        input: &input,
        account: account.name.as_str(),
        date_format: &account.date_format,
        extra_args: &account.engine_extra_args,
    };
    let output = engine
        .convert(&request)
        .with_context(|| format!("converting {source} for account {}", account.name))?;

    let post_format = PostFormat {
        currency_symbol: account.currency_symbol.clone(),
        unknown_category_label: account.unknown_category_label.clone(),
    };
    let mut output = split_lines(&output);
    if !post_format.is_noop() {
        output = post_format.apply(&output);
    }

    let pairs = normalized.transaction_pairs();
    let annotated = correlate(&output, &pairs)
        .with_context(|| format!("attaching {source} rows to the generated transactions"))?;
    log::info!(
        "{} transaction(s) annotated, {} line(s) ignored",
        pairs.len(),
        normalized.ignored.len()
    );

    Ok(append_ignored(&annotated, &normalized.ignored, source))
}
