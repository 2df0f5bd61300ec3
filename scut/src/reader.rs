use std::io::{self, BufRead};

/// Default bound on the number of bytes kept from a single line.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Complete,
    /// The line was longer than the bound; `dropped` bytes were discarded.
    Truncated { dropped: usize },
}

/// Reads `\n`-terminated lines into a caller-owned buffer, keeping at most
/// `max_line_bytes` of each and discarding the rest up to the terminator.
pub struct LineReader<R> {
    inner: R,
    max_line_bytes: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> LineReader<R> {
        LineReader {
            inner,
            max_line_bytes,
        }
    }

    /// Fills `line` with the next line, without its terminator (`\n` or
    /// `\r\n`). Returns `None` at end of stream.
    pub fn read_line(&mut self, line: &mut Vec<u8>) -> io::Result<Option<LineStatus>> {
        line.clear();
        let mut dropped = 0;
        let mut read_any = false;
        let mut last_byte = None;

        loop {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            read_any = true;

            let (content, used, terminated) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => (&available[..end], end + 1, true),
                None => (available, available.len(), false),
            };

            if let Some(&b) = content.last() {
                last_byte = Some(b);
            }

            let room = self.max_line_bytes.saturating_sub(line.len());
            if content.len() > room {
                line.extend_from_slice(&content[..room]);
                dropped += content.len() - room;
            } else {
                line.extend_from_slice(content);
            }

            self.inner.consume(used);
            if terminated {
                break;
            }
        }

        if !read_any {
            return Ok(None);
        }

        if last_byte == Some(b'\r') {
            if dropped > 0 {
                dropped -= 1;
            } else {
                line.pop();
            }
        }

        Ok(Some(if dropped == 0 {
            LineStatus::Complete
        } else {
            LineStatus::Truncated { dropped }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &[u8], max: usize) -> Vec<(Vec<u8>, LineStatus)> {
        let mut reader = LineReader::new(Cursor::new(input.to_vec()), max);
        let mut line = Vec::new();
        let mut lines = Vec::new();
        while let Some(status) = reader.read_line(&mut line).unwrap() {
            lines.push((line.clone(), status));
        }
        lines
    }

    #[test]
    fn test_empty_stream() {
        assert!(read_all(b"", 16).is_empty());
    }

    #[test]
    fn test_lines() {
        let lines = read_all(b"one\ntwo\n", 16);
        assert_eq!(
            lines,
            vec![
                (b"one".to_vec(), LineStatus::Complete),
                (b"two".to_vec(), LineStatus::Complete),
            ]
        );
    }

    #[test]
    fn test_last_line_without_terminator() {
        let lines = read_all(b"one\ntwo", 16);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].0, b"two");
    }

    #[test]
    fn test_empty_lines() {
        let lines = read_all(b"\n\nx\n", 16);
        let contents: Vec<Vec<u8>> = lines.into_iter().map(|(l, _)| l).collect();
        assert_eq!(contents, vec![b"".to_vec(), b"".to_vec(), b"x".to_vec()]);
    }

    #[test]
    fn test_crlf() {
        let lines = read_all(b"a,b\r\nc\r\n", 16);
        assert_eq!(lines[0].0, b"a,b");
        assert_eq!(lines[1].0, b"c");
    }

    #[test]
    fn test_truncation() {
        let lines = read_all(b"abcdefgh\nxy\n", 4);
        assert_eq!(
            lines,
            vec![
                (b"abcd".to_vec(), LineStatus::Truncated { dropped: 4 }),
                (b"xy".to_vec(), LineStatus::Complete),
            ]
        );
    }

    #[test]
    fn test_exact_bound_is_complete() {
        let lines = read_all(b"abcd\n", 4);
        assert_eq!(lines, vec![(b"abcd".to_vec(), LineStatus::Complete)]);
    }

    #[test]
    fn test_truncation_across_buffer_refills() {
        let input = b"0123456789abcdef\nz\n".to_vec();
        let buffered = io::BufReader::with_capacity(3, Cursor::new(input));
        let mut reader = LineReader::new(buffered, 5);
        let mut line = Vec::new();

        let status = reader.read_line(&mut line).unwrap();
        assert_eq!(status, Some(LineStatus::Truncated { dropped: 11 }));
        assert_eq!(line, b"01234");

        let status = reader.read_line(&mut line).unwrap();
        assert_eq!(status, Some(LineStatus::Complete));
        assert_eq!(line, b"z");

        assert_eq!(reader.read_line(&mut line).unwrap(), None);
    }
}
