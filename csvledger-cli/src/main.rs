use anyhow::Result;
use clap::{Parser, Subcommand};
use csvledger_accounts::Registry;
use log::LevelFilter;
use std::io;
use std::path::{Path, PathBuf};

mod convert;
mod reports;
mod settings;

use convert::ConvertJob;
use settings::{load_settings, Settings, SETTINGS_FILE};

#[derive(Parser, Debug)]
#[command(
    name = "csvledger",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CSVLEDGER_BUILD_SHA"), ")"),
    about = "Convert bank CSV exports to ledger journal entries annotated with their source rows"
)]
struct Cli {
    /// Increase log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Account registry (default: bankaccounts.yml, or `registry` in csvledger.toml)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a CSV export and print the annotated journal to stdout
    Convert {
        /// Account identifier; `Assets:Bank` and `Assets___Bank` are equivalent
        account: String,

        /// CSV file exported from the bank
        input: PathBuf,

        /// Journal passed to ledger with -f (default: csv2journal.txt)
        #[arg(long)]
        journal: Option<PathBuf>,

        /// Ledger executable (default: ledger)
        #[arg(long)]
        ledger_bin: Option<String>,

        /// Print the normalized CSV that would be handed to ledger, then stop
        #[arg(long)]
        dry_run: bool,
    },

    /// Page through the report commands in a reports file
    Reports {
        /// Reports file (default: reports.txt)
        file: Option<PathBuf>,
    },

    /// List the accounts defined in the registry
    Accounts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let base = load_settings(Path::new(SETTINGS_FILE))?;

    match cli.command {
        Command::Convert {
            account,
            input,
            journal,
            ledger_bin,
            dry_run,
        } => {
            let settings = base.with_overrides(cli.registry, journal, ledger_bin);
            let job = ConvertJob {
                account,
                input,
                dry_run,
            };
            convert::run(&settings, &job, &mut io::stdout().lock())?;
        }

        Command::Reports { file } => {
            let path = file.unwrap_or_else(|| PathBuf::from(reports::DEFAULT_REPORTS_FILE));
            let reports = reports::load_reports(&path)?;
            reports::run_pager(&reports, io::stdin().lock(), io::stdout().lock())?;
        }

        Command::Accounts => {
            let settings = base.with_overrides(cli.registry, None, None);
            list_accounts(&settings)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn list_accounts(settings: &Settings) -> Result<()> {
    let registry = Registry::load(&settings.registry)?;
    if registry.is_empty() {
        println!("(no accounts in {})", registry.path().display());
    }
    for name in registry.account_names() {
        println!("{name}");
    }
    Ok(())
}
