//! Selection parsing: turns a compact list such as `1-2,7-15` into the
//! concrete, ascending set of 1-based columns to keep.

use thiserror::Error;
use tracing::debug;

/// Largest column index a selection may name.
pub const MAX_COLUMN: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("the selection is empty")]
    Empty,
    #[error("the selection must start with a digit, found '{0}'")]
    LeadingNonDigit(char),
    #[error("the selection must end with a digit, found '{0}'")]
    TrailingNonDigit(char),
    #[error("unexpected character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },
    #[error("malformed term at position {position}")]
    MalformedTerm { position: usize },
    #[error("columns are numbered from 1, 0 is not a column")]
    ZeroColumn,
    #[error("range {start}-{end} is reversed")]
    ReversedRange { start: usize, end: usize },
    #[error("column index at position {position} exceeds the maximum of {max}", max = MAX_COLUMN)]
    ColumnTooLarge { position: usize },
}

/// Ascending, duplicate-free list of the columns a selection names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<usize>,
}

impl ColumnSet {
    /// Expands inclusive `(start, end)` ranges in ascending order. Columns
    /// covered by an earlier range are skipped, so at most `MAX_COLUMN`
    /// columns are ever pushed whatever the number of ranges.
    fn from_ranges(mut ranges: Vec<(usize, usize)>) -> ColumnSet {
        ranges.sort_unstable();

        let mut columns: Vec<usize> = Vec::new();
        for (start, end) in ranges {
            let from = match columns.last() {
                Some(&last) if last >= start => last + 1,
                _ => start,
            };
            if from <= end {
                columns.extend(from..=end);
            }
        }
        ColumnSet { columns }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

/// Character-class check only: non-empty, starts and ends with a digit, and
/// holds nothing but digits, `,` and `-` in between.
pub fn validate(selection: &str) -> Result<(), SelectionError> {
    let count = selection.chars().count();
    if count == 0 {
        return Err(SelectionError::Empty);
    }

    for (index, ch) in selection.chars().enumerate() {
        if ch.is_ascii_digit() {
            continue;
        }
        let position = index + 1;
        if position == 1 {
            return Err(SelectionError::LeadingNonDigit(ch));
        }
        if position == count {
            return Err(SelectionError::TrailingNonDigit(ch));
        }
        if ch != ',' && ch != '-' {
            return Err(SelectionError::InvalidCharacter { ch, position });
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum State {
    /// Reading a single column, or the start of a range.
    AccumulatingDigits { value: Option<usize> },
    /// A `-` was seen; reading the inclusive end of the range.
    AwaitingRangeEnd { start: usize, value: Option<usize> },
}

pub fn parse(selection: &str) -> Result<ColumnSet, SelectionError> {
    validate(selection)?;

    let mut ranges = Vec::new();
    let mut state = State::AccumulatingDigits { value: None };
    let mut position = 0;

    for ch in selection.chars() {
        position += 1;
        state = match (state, ch) {
            (State::AccumulatingDigits { value }, '0'..='9') => State::AccumulatingDigits {
                value: Some(push_digit(value, ch, position)?),
            },
            (State::AwaitingRangeEnd { start, value }, '0'..='9') => State::AwaitingRangeEnd {
                start,
                value: Some(push_digit(value, ch, position)?),
            },
            (State::AccumulatingDigits { value: Some(start) }, '-') => {
                State::AwaitingRangeEnd { start, value: None }
            }
            (state, ',') => {
                finish_term(state, position, &mut ranges)?;
                State::AccumulatingDigits { value: None }
            }
            _ => return Err(SelectionError::MalformedTerm { position }),
        };
    }
    finish_term(state, position, &mut ranges)?;

    let set = ColumnSet::from_ranges(ranges);
    debug!(selection, columns = set.len(), "parsed selection");
    Ok(set)
}

fn push_digit(value: Option<usize>, ch: char, position: usize) -> Result<usize, SelectionError> {
    let digit = ch.to_digit(10).unwrap_or(0) as usize;
    // value <= MAX_COLUMN, so this cannot overflow
    let value = value.unwrap_or(0) * 10 + digit;
    if value > MAX_COLUMN {
        return Err(SelectionError::ColumnTooLarge { position });
    }
    Ok(value)
}

fn finish_term(
    state: State,
    position: usize,
    ranges: &mut Vec<(usize, usize)>,
) -> Result<(), SelectionError> {
    match state {
        State::AccumulatingDigits { value: Some(0) } => Err(SelectionError::ZeroColumn),
        State::AccumulatingDigits { value: Some(column) } => {
            ranges.push((column, column));
            Ok(())
        }
        State::AwaitingRangeEnd {
            start: 0,
            value: Some(_),
        } => Err(SelectionError::ZeroColumn),
        State::AwaitingRangeEnd {
            start,
            value: Some(end),
        } => {
            if start > end {
                return Err(SelectionError::ReversedRange { start, end });
            }
            ranges.push((start, end));
            Ok(())
        }
        _ => Err(SelectionError::MalformedTerm { position }),
    }
}
