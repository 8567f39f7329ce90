//! Runs `LedgerCli` against stand-in shell scripts instead of a real `ledger`.
#![cfg(unix)]

use csvledger_core::{correlate, normalize, split_lines, NormalizeOptions, RewriteRules};
use csvledger_engine::{ConversionEngine, ConversionRequest, EngineError, LedgerCli, PostFormat};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn request<'a>(input: &'a str, extra: &'a [String]) -> ConversionRequest<'a> {
    ConversionRequest {
        input,
        account: "Assets:Bank",
        date_format: "%m/%d",
        extra_args: extra,
    }
}

/// Stand-in engine: one transaction per data row of the input file ($4), in order.
const FAKE_CONVERT: &str = r#"tail -n +2 "$4" | while IFS=, read -r date payee amount; do
  printf '%s %s\n    Expenses:Unknown  %s\n    Assets:Bank\n\n' "$date" "$payee" "$amount"
done"#;

#[test]
fn test_arguments_reach_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let engine = script(dir.path(), "ledger", r#"printf '%s\n' "$@""#);
    let ledger = LedgerCli::new(&engine, "books.txt");
    let extra = vec!["--invert".to_string()];

    let out = ledger.convert(&request("h\n", &extra)).unwrap();
    let args: Vec<&str> = out.lines().collect();
    assert_eq!(args[0], "-f");
    assert_eq!(args[1], "books.txt");
    assert_eq!(args[2], "convert");
    assert!(args[3].ends_with(".csv"));
    assert_eq!(
        &args[4..],
        &[
            "--input-date-format",
            "%m/%d",
            "--account",
            "Assets:Bank",
            "--generated",
            "--invert"
        ]
    );
}

#[test]
fn test_temp_input_is_removed_after_success_and_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ok = script(dir.path(), "ok", r#"cat "$4" >/dev/null; echo "$4""#);
    let out = LedgerCli::new(&ok, "j").convert(&request("h\n", &[])).unwrap();
    let input_path = PathBuf::from(out.trim());
    assert!(!input_path.exists());

    let failing = script(dir.path(), "fail", r#"echo "$4"; echo "bad date" >&2; exit 3"#);
    let err = LedgerCli::new(&failing, "j")
        .convert(&request("h\n", &[]))
        .unwrap_err();
    match err {
        EngineError::Failed { status, stderr, .. } => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "bad date");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_engine_reads_the_normalized_input() {
    let dir = tempfile::tempdir().unwrap();
    let engine = script(dir.path(), "ledger", FAKE_CONVERT);
    let options = NormalizeOptions {
        header_replacement: Some("date,payee,amount".to_string()),
        rewrite_rules: Some(RewriteRules::from_pairs([("Coffee", "Cafe")]).unwrap()),
        ..Default::default()
    };
    let normalized = normalize("01/02,Coffee,3.50\n01/03,Tea,2.00\n", &options);
    let input = normalized.engine_input();

    let output = LedgerCli::new(&engine, "j").convert(&request(&input, &[])).unwrap();
    let formatted = PostFormat {
        currency_symbol: Some("$".to_string()),
        unknown_category_label: Some("Expenses:Drinks".to_string()),
    }
    .apply(&split_lines(&output));
    let annotated = correlate(&formatted, &normalized.transaction_pairs()).unwrap();

    assert_eq!(annotated[0], "01/02 Cafe\n");
    assert_eq!(annotated[2], "    ; from : 01/02,Cafe,3.50\n");
    assert_eq!(annotated[3], "    ; (raw): 01/02,Coffee,3.50\n");
    assert_eq!(annotated[4], "    Expenses:Drinks  $3.50\n");
    assert!(annotated.contains(&"    ; (raw): 01/03,Tea,2.00\n".to_string()));
}
