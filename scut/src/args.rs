use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::error::Error;
use crate::extract::DelimiterMode;
use crate::reader::DEFAULT_MAX_LINE_BYTES;
use crate::selection::{self, ColumnSet};

/// Print selected columns of each line read from stdin.
///
/// Selections are comma-separated columns or inclusive ranges, counted from 1,
/// e.g. `1,3-5,8`.
#[derive(Parser, Debug)]
#[command(name = "scut", version, about)]
struct Cli {
    #[command(flatten)]
    mode: ModeFlags,

    /// Columns to keep, e.g. `1-2,7-15`
    #[arg(value_name = "SELECTION")]
    selection: String,

    /// Longest line kept, in bytes; longer lines are truncated
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_LINE_BYTES,
        value_parser = parse_line_bound
    )]
    max_line_bytes: usize,
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
struct ModeFlags {
    /// Columns are single characters
    #[arg(short = 'l', long = "chars")]
    chars: bool,

    /// Columns are fields separated by spaces
    #[arg(short = 'w', long = "words")]
    words: bool,

    /// Columns are fields separated by ','
    #[arg(short = 'c', long = "csv")]
    csv: bool,
}

impl ModeFlags {
    /// `None` unless exactly one flag is set, which the group enforces.
    fn mode(&self) -> Option<DelimiterMode> {
        match (self.chars, self.words, self.csv) {
            (true, false, false) => Some(DelimiterMode::FixedWidth),
            (false, true, false) => Some(DelimiterMode::Whitespace),
            (false, false, true) => Some(DelimiterMode::CommaSeparated),
            _ => None,
        }
    }
}

fn parse_line_bound(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(bytes) => Ok(bytes),
        Err(e) => Err(e.to_string()),
    }
}

pub struct Args {
    pub mode: DelimiterMode,
    pub columns: ColumnSet,
    pub max_line_bytes: usize,
}

impl Args {
    /// Parses the command line, including the selection, before any input
    /// is touched.
    pub fn build<I, T>(argv: I) -> Result<Args, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(argv)?;
        let mode = cli.mode.mode().ok_or_else(|| {
            Cli::command().error(
                ErrorKind::ArgumentConflict,
                "exactly one of -l, -w or -c is required",
            )
        })?;
        let columns = selection::parse(&cli.selection)?;

        Ok(Args {
            mode,
            columns,
            max_line_bytes: cli.max_line_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionError;

    fn build(argv: &[&str]) -> Result<Args, Error> {
        Args::build(std::iter::once("scut").chain(argv.iter().copied()))
    }

    #[test]
    fn test_modes() {
        assert_eq!(build(&["-l", "1"]).unwrap().mode, DelimiterMode::FixedWidth);
        assert_eq!(build(&["-w", "1"]).unwrap().mode, DelimiterMode::Whitespace);
        assert_eq!(
            build(&["-c", "1"]).unwrap().mode,
            DelimiterMode::CommaSeparated
        );
        assert_eq!(
            build(&["--csv", "1"]).unwrap().mode,
            DelimiterMode::CommaSeparated
        );
    }

    #[test]
    fn test_columns_and_defaults() {
        let args = build(&["-c", "1,3-5"]).unwrap();
        assert_eq!(args.columns.iter().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
        assert_eq!(args.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
    }

    #[test]
    fn test_max_line_bytes() {
        let args = build(&["-l", "1", "--max-line-bytes", "128"]).unwrap();
        assert_eq!(args.max_line_bytes, 128);

        let err = build(&["-l", "1", "--max-line-bytes", "0"]).err().unwrap();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn test_wrong_argument_count() {
        for argv in [&[][..], &["-l"][..], &["-l", "1", "2"][..]] {
            let err = build(argv).err().unwrap();
            assert!(matches!(err, Error::Usage(_)));
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_unknown_mode() {
        let err = build(&["-x", "1"]).err().unwrap();
        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_or_duplicate_mode() {
        assert!(matches!(build(&["1"]).err().unwrap(), Error::Usage(_)));
        assert!(matches!(
            build(&["-l", "-w", "1"]).err().unwrap(),
            Error::Usage(_)
        ));
    }

    #[test]
    fn test_mode_flags() {
        let flags = |chars, words, csv| ModeFlags { chars, words, csv }.mode();
        assert_eq!(flags(true, false, false), Some(DelimiterMode::FixedWidth));
        assert_eq!(flags(false, true, false), Some(DelimiterMode::Whitespace));
        assert_eq!(flags(false, false, true), Some(DelimiterMode::CommaSeparated));
        assert_eq!(flags(false, false, false), None);
        assert_eq!(flags(true, false, true), None);
    }

    #[test]
    fn test_flag_order_and_long_names() {
        let args = build(&["1-3", "-l"]).unwrap();
        assert_eq!(args.mode, DelimiterMode::FixedWidth);
        assert_eq!(build(&["--words", "2"]).unwrap().mode, DelimiterMode::Whitespace);
    }

    #[test]
    fn test_invalid_selection() {
        let err = build(&["-l", "5a"]).err().unwrap();
        assert!(matches!(
            err,
            Error::InvalidSelection(SelectionError::TrailingNonDigit('a'))
        ));
        assert_eq!(err.exit_code(), 2);
    }
}
