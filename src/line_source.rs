//! Forward-only line supplier for DES input.
//!
//! DES files are written in a single-byte encoding. Every byte is decoded to
//! the code point of the same value (ISO-8859-1), so arbitrary bytes never
//! fail to decode.

use crate::error::Result;
use std::io::BufRead;

pub struct LineSource<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
        }
    }

    /// Next raw line without its line terminator, or `None` once exhausted
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }

        Ok(Some(self.buffer.iter().map(|&byte| byte as char).collect()))
    }

    /// 1-based number of the line most recently returned
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Normalize a raw line: trim, drop a leading comment marker, trim again.
///
/// The marker is a literal, case-sensitive token: it is only removed when the
/// line ends after it or whitespace follows, so `COMMON` is left intact.
/// Without a marker the line is just trimmed.
pub fn normalize_line<'a>(raw: &'a str, comment_marker: Option<&str>) -> &'a str {
    let trimmed = raw.trim();
    let Some(marker) = comment_marker else {
        return trimmed;
    };

    match trimmed.strip_prefix(marker) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => trimmed,
    }
}
