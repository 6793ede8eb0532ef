//! Pull-based record scanner over a GEDCOM line stream.

use std::io::BufRead;
use std::sync::OnceLock;

use regex::Regex;

use super::{Record, Tag};
use crate::error::{GedtreeError, Result};

/// `LEVEL [@XREF@] TAG [VALUE]`
fn line_regex() -> &'static Regex {
    static LINE: OnceLock<Regex> = OnceLock::new();
    LINE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\s+(?:@([^@\s]+)@\s+)?(\S+)(?: (.*))?$")
            .expect("Invalid record line pattern")
    })
}

/// Decode one non-blank line into a [`Record`].
pub fn parse_line(line_no: usize, line: &str) -> Result<Record> {
    let caps = line_regex().captures(line).ok_or_else(|| {
        GedtreeError::malformed(line_no, format!("expected `LEVEL [@XREF@] TAG [VALUE]`, got {:?}", line))
    })?;

    let level = caps[1]
        .parse::<usize>()
        .map_err(|e| GedtreeError::malformed(line_no, format!("bad level: {}", e)))?;
    let tag = Tag::from_token(&caps[3]);
    let mut pointer = caps.get(2).map(|m| m.as_str().to_string());
    let mut value = caps
        .get(4)
        .map(|m| m.as_str().trim_end().to_string())
        .filter(|v| !v.is_empty());

    // Link records (`1 FAMS @F1@`) carry their pointer in the value slot.
    if pointer.is_none() {
        if let Some(xref) = value.as_deref().and_then(strip_delimiters) {
            pointer = Some(xref.to_string());
            value = None;
        }
    }

    Ok(Record {
        line: line_no,
        level,
        pointer,
        tag,
        value,
    })
}

/// `@I1@` -> `I1`; anything that is not a single delimited token -> None
fn strip_delimiters(token: &str) -> Option<&str> {
    let inner = token.strip_prefix('@')?.strip_suffix('@')?;
    if inner.is_empty() || inner.contains('@') || inner.contains(char::is_whitespace) {
        None
    } else {
        Some(inner)
    }
}

/// Record cursor with one record of lookahead.
///
/// The scanner does not interpret levels. Callers use [`RecordScanner::peek`]
/// to find where an entity's sub-record block ends.
pub struct RecordScanner<R> {
    reader: R,
    line_no: usize,
    peeked: Option<Record>,
}

impl<R: BufRead> RecordScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            peeked: None,
        }
    }

    /// Number of lines consumed from the underlying reader so far
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Next raw line without its terminator; a line that is not UTF-8 is
    /// reported with its line number
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let line_no = self.line_no;

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| {
                GedtreeError::malformed(
                    line_no,
                    format!(
                        "invalid UTF-8 at byte {}; re-export the file as UTF-8",
                        e.utf8_error().valid_up_to()
                    ),
                )
            })
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        while let Some(line) = self.read_line()? {
            let text = if self.line_no == 1 {
                line.trim_start_matches('\u{feff}')
            } else {
                line.as_str()
            };
            let text = text.trim_end_matches('\r');
            if text.trim().is_empty() {
                continue;
            }

            return parse_line(self.line_no, text).map(Some);
        }
        Ok(None)
    }

    /// Look at the next record without consuming it
    pub fn peek(&mut self) -> Result<Option<&Record>> {
        if self.peeked.is_none() {
            self.peeked = self.read_record()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Consume the next record. `Ok(None)` is end of input.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        match self.peeked.take() {
            Some(record) => Ok(Some(record)),
            None => self.read_record(),
        }
    }

    /// Consume the next record only if it is a `tag` record nested deeper than `level`
    pub fn next_if_child(&mut self, level: usize, tag: &Tag) -> Result<Option<Record>> {
        let matches = matches!(self.peek()?, Some(r) if r.level > level && &r.tag == tag);
        if matches {
            self.next_record()
        } else {
            Ok(None)
        }
    }

    /// True when the next record starts a new top-level block (or input is done)
    pub fn at_block_end(&mut self) -> Result<bool> {
        Ok(self.peek()?.map_or(true, Record::is_top_level))
    }

    /// Drop sub-records until the next level-0 record
    pub fn skip_block(&mut self) -> Result<usize> {
        let mut skipped = 0;
        while !self.at_block_end()? {
            self.next_record()?;
            skipped += 1;
        }
        Ok(skipped)
    }
}

impl<R: BufRead> Iterator for RecordScanner<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
