use std::io;

use thiserror::Error;

use crate::selection::SelectionError;

/// Exit status for a bad invocation, detected before any input is read.
pub const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", usage_summary(.0))]
    Usage(#[from] clap::Error),
    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(e) => e.exit_code(),
            Error::InvalidSelection(_) => USAGE_EXIT_CODE,
            Error::Io(_) => 1,
        }
    }

    /// A closed stdout (e.g. `scut ... | head`) is a normal way to stop.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

/// Condenses a `clap` report to its first paragraph on one line, leaving out
/// the usage block and tips that follow it.
fn usage_summary(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let summary = rendered
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    summary.strip_prefix("error: ").unwrap_or(&summary).to_string()
}
