use std::process::ExitStatus;
use thiserror::Error;

/// Everything the engine needs for one conversion.
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    /// Normalized CSV text; the first row is the column header.
    pub input: &'a str,
    /// Account the generated postings are booked against, in colon form.
    pub account: &'a str,
    pub date_format: &'a str,
    pub extra_args: &'a [String],
}

/// Turns a normalized CSV stream into journal text.
///
/// Implementations must emit one transaction per data row, in input order.
pub trait ConversionEngine {
    fn convert(&self, request: &ConversionRequest<'_>) -> Result<String, EngineError>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("preparing engine input: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}
