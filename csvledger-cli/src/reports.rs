//! `csvledger reports`: page through saved report commands.
//!
//! A reports file starts with two header lines. After that, `#` lines describe
//! the next report and the first other non-blank line is its command.

use anyhow::{bail, Context, Result};
use crossterm::{cursor::MoveTo, execute, terminal::Clear, terminal::ClearType};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

pub const DEFAULT_REPORTS_FILE: &str = "reports.txt";

const HEADER_LINES: usize = 2;
const PROMPT: &str = "h = previous report, l = next report, q = quit [h/l/q] ? ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub explanation: String,
    pub command: String,
}

pub fn parse_reports(text: &str) -> Vec<Report> {
    let mut reports = Vec::new();
    let mut explanation = String::new();
    for line in text.lines().skip(HEADER_LINES) {
        if line.starts_with('#') {
            explanation.push_str(line);
            explanation.push('\n');
            continue;
        }
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        reports.push(Report {
            explanation: explanation.trim().to_string(),
            command: command.to_string(),
        });
        explanation.clear();
    }
    reports
}

pub fn load_reports(path: &Path) -> Result<Vec<Report>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let reports = parse_reports(&text);
    if reports.is_empty() {
        bail!("No reports found in {}", path.display());
    }
    Ok(reports)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Previous,
    Next,
    Quit,
    Redraw,
}

impl Action {
    fn parse(input: &str) -> Self {
        match input.trim() {
            "h" => Action::Previous,
            "l" => Action::Next,
            "q" => Action::Quit,
            _ => Action::Redraw,
        }
    }
}

/// Interactive loop over `reports`; `h` and `l` wrap around, `q` or end of input quits.
pub fn run_pager(reports: &[Report], mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    if reports.is_empty() {
        bail!("No reports to show");
    }
    let mut index = 0;
    loop {
        show(&mut out, &reports[index])?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        index = match Action::parse(&answer) {
            Action::Previous => (index + reports.len() - 1) % reports.len(),
            Action::Next => (index + 1) % reports.len(),
            Action::Quit => return Ok(()),
            Action::Redraw => index,
        };
    }
}

fn show(out: &mut impl Write, report: &Report) -> Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "{}", report.explanation)?;
    writeln!(out, "{}", report.command)?;
    Ok(())
}
