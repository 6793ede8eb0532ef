//! GEDCOM ingestion: line scanner and graph builder.
//!
//! Turns the level/tag line format into a populated [`Store`]. Only the
//! `INDI` and `FAM` blocks are interpreted; every other top-level block is
//! skipped.

mod builder;
mod scanner;

pub use builder::GraphBuilder;
pub use scanner::{parse_line, RecordScanner};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{GedtreeError, Result};
use crate::store::Store;

/// Semantic kind of a record, decoded from its tag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Individual,
    Family,
    Name,
    SpouseFamily,
    ChildFamily,
    Birth,
    Death,
    Marriage,
    Husband,
    Wife,
    Child,
    Date,
    Place,
    Other(String),
}

impl Tag {
    pub fn from_token(token: &str) -> Self {
        match token {
            "INDI" => Tag::Individual,
            "FAM" => Tag::Family,
            "NAME" => Tag::Name,
            "FAMS" => Tag::SpouseFamily,
            "FAMC" => Tag::ChildFamily,
            "BIRT" => Tag::Birth,
            "DEAT" => Tag::Death,
            "MARR" => Tag::Marriage,
            "HUSB" => Tag::Husband,
            "WIFE" => Tag::Wife,
            "CHIL" => Tag::Child,
            "DATE" => Tag::Date,
            "PLAC" => Tag::Place,
            other => Tag::Other(other.to_string()),
        }
    }
}

/// One decoded line: level, optional pointer (without `@`), tag, optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based source line
    pub line: usize,
    pub level: usize,
    pub pointer: Option<String>,
    pub tag: Tag,
    pub value: Option<String>,
}

impl Record {
    pub fn is_top_level(&self) -> bool {
        self.level == 0
    }

    /// Pointer this record must carry, or a malformed-record error
    pub fn require_pointer(&self) -> Result<&str> {
        self.pointer.as_deref().ok_or_else(|| {
            GedtreeError::malformed(self.line, format!("{:?} record without a pointer", self.tag))
        })
    }

    /// Free-text value, empty when absent
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Build a store from any buffered line source
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Store> {
    GraphBuilder::new(RecordScanner::new(reader)).build()
}

/// Build a store from in-memory GEDCOM text
pub fn parse_str(text: &str) -> Result<Store> {
    parse_reader(text.as_bytes())
}

/// Open and parse a GEDCOM file
pub fn load_file(path: &Path) -> Result<Store> {
    log::info!("Loading GEDCOM file {}", path.display());
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}
