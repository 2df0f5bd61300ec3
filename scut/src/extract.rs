use std::slice::Chunks;

use crate::selection::ColumnSet;

/// Separator written between two emitted columns, whatever the mode.
const OUTPUT_SEPARATOR: u8 = b' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterMode {
    /// One byte is one column.
    FixedWidth,
    /// Fields are split on single spaces.
    Whitespace,
    /// Fields are split on `,`.
    CommaSeparated,
}

impl DelimiterMode {
    /// Splits `line` into the columns this mode addresses, in order.
    pub fn columns(self, line: &[u8]) -> Columns<'_> {
        match self {
            DelimiterMode::FixedWidth => Columns::Chars(line.chunks(1)),
            DelimiterMode::Whitespace => Columns::Fields(Fields::new(line, b' ')),
            DelimiterMode::CommaSeparated => Columns::Fields(Fields::new(line, b',')),
        }
    }
}

pub enum Columns<'a> {
    Chars(Chunks<'a, u8>),
    Fields(Fields<'a>),
}

impl<'a> Iterator for Columns<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Columns::Chars(chars) => chars.next(),
            Columns::Fields(fields) => fields.next(),
        }
    }
}

/// Naive split on a single delimiter byte: two adjacent delimiters enclose an
/// empty field, and a line always holds at least one (possibly empty) field.
pub struct Fields<'a> {
    rest: Option<&'a [u8]>,
    delimiter: u8,
}

impl<'a> Fields<'a> {
    fn new(line: &'a [u8], delimiter: u8) -> Fields<'a> {
        Fields {
            rest: Some(line),
            delimiter,
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.iter().position(|&b| b == self.delimiter) {
            Some(boundary) => {
                self.rest = Some(&rest[boundary + 1..]);
                Some(&rest[..boundary])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Appends the selected columns of `line` to `out`, one separator between
/// each pair, then a single `\n`. `line` must not contain its terminator.
///
/// Columns past the end of the line are silently absent.
pub fn extract(mode: DelimiterMode, line: &[u8], columns: &ColumnSet, out: &mut Vec<u8>) {
    let mut wanted = columns.iter().peekable();
    let mut emitted = false;

    for (index, column) in (1..).zip(mode.columns(line)) {
        let Some(&next) = wanted.peek() else {
            break;
        };
        if index != next {
            continue;
        }
        if emitted {
            out.push(OUTPUT_SEPARATOR);
        }
        out.extend_from_slice(column);
        emitted = true;
        wanted.next();
    }

    out.push(b'\n');
}
