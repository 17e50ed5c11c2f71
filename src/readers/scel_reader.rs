//! Reader for Sogou scel cell dictionaries.
//!
//! A scel file is laid out at fixed offsets:
//!
//! | offset   | content                                                   |
//! |----------|-----------------------------------------------------------|
//! | `0x0000` | 12 byte magic                                             |
//! | `0x0130` | dictionary name, UTF-16LE                                 |
//! | `0x0338` | category, UTF-16LE                                        |
//! | `0x0540` | description, UTF-16LE                                     |
//! | `0x0D40` | sample words, UTF-16LE                                    |
//! | `0x1540` | 4 byte sub-magic                                          |
//! | `0x1544` | 413 phonetic table entries: `index`, `len`, `len` bytes   |
//! | `0x2628` | record stream up to the end of the file                   |
//!
//! Each record is `same`, `pysize`, `pysize / 2` table indices, then `same`
//! words, each followed by an extra info block that is skipped. All integers
//! are little-endian `u16`.
//!
//! # Examples
//!
//! ```no_run
//! use scel2pyim::readers::ScelReader;
//! use scel2pyim::storage::WordOrder;
//!
//! # fn main() -> scel2pyim::Result<()> {
//! let data = std::fs::read("dict.scel")?;
//! let mut reader = ScelReader::new(&data)?;
//! let mut out = Vec::new();
//! let lines = reader.write_pyim(&mut out, WordOrder::Reversed)?;
//! println!("{}: {} lines", reader.header.name, lines);
//! # Ok(())
//! # }
//! ```

use std::io::Write;

use log::{debug, info};

use crate::storage::phonetic_table::{PhoneticTable, PHONETIC_TABLE_SLOTS};
use crate::storage::reader_helper::{utf16_units_to_string, utf16le_bytes_to_string, ByteCursor};
use crate::storage::scel_entry::{ScelEntry, WordOrder};
use crate::{Result, ScelError};

pub const SCEL_MAGIC: [u8; 12] = [0x40, 0x15, 0x00, 0x00, 0x44, 0x43, 0x53, 0x01, 0x01, 0x00, 0x00, 0x00];
pub const SUB_MAGIC_OFFSET: usize = 0x1540;
pub const SUB_MAGIC: [u8; 4] = [0x9d, 0x01, 0x00, 0x00];
pub const PHONETIC_TABLE_OFFSET: u64 = 0x1544;
pub const RECORD_STREAM_OFFSET: u64 = 0x2628;

const NAME_RANGE: (usize, usize) = (0x130, 0x338);
const CATEGORY_RANGE: (usize, usize) = (0x338, 0x540);
const DESCRIPTION_RANGE: (usize, usize) = (0x540, 0xd40);
const SAMPLES_RANGE: (usize, usize) = (0xd40, SUB_MAGIC_OFFSET);

/// Descriptive strings from the scel header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScelHeader {
    pub name: String,
    pub category: String,
    pub description: String,
    pub samples: String,
}

fn header_field(data: &[u8], (start, end): (usize, usize)) -> String {
    let end = end.min(data.len());
    if start >= end {
        return String::new();
    }
    utf16le_bytes_to_string(&data[start..end])
}

impl ScelHeader {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            name: header_field(data, NAME_RANGE),
            category: header_field(data, CATEGORY_RANGE),
            description: header_field(data, DESCRIPTION_RANGE),
            samples: header_field(data, SAMPLES_RANGE),
        }
    }
}

/// Checks the leading magic and the sub-magic at 0x1540.
pub fn validate_magic(data: &[u8]) -> Result<()> {
    if data.get(..SCEL_MAGIC.len()) != Some(&SCEL_MAGIC[..]) {
        return Err(ScelError::invalid_format("header magic mismatch"));
    }
    if data.get(SUB_MAGIC_OFFSET..SUB_MAGIC_OFFSET + SUB_MAGIC.len()) != Some(&SUB_MAGIC[..]) {
        return Err(ScelError::invalid_format(format!(
            "sub-magic mismatch at {:#x}",
            SUB_MAGIC_OFFSET
        )));
    }
    Ok(())
}

/// Reads the 413 phonetic table entries starting at 0x1544.
pub fn read_phonetic_table(data: &[u8]) -> Result<PhoneticTable> {
    let mut cursor = ByteCursor::at(data, PHONETIC_TABLE_OFFSET)?;
    let mut table = PhoneticTable::new();
    for _ in 0..PHONETIC_TABLE_SLOTS {
        let entry_offset = cursor.position();
        let index = cursor.read_u16()?;
        let len = cursor.read_u16()?;
        let units = cursor.read_u16_units(len)?;
        if index as usize >= PHONETIC_TABLE_SLOTS {
            return Err(ScelError::corrupt_record(
                entry_offset,
                format!("phonetic table index {} out of range", index),
            ));
        }
        table.insert(index, utf16_units_to_string(&units))?;
    }
    debug!("Phonetic table ends at {:#x} with {} syllables", cursor.position(), table.len());
    Ok(table)
}

/// Decoder over one in-memory scel file.
pub struct ScelReader<'a> {
    pub header: ScelHeader,
    table: PhoneticTable,
    cursor: ByteCursor<'a>,
    failed: bool,
    records_read: u64,
    empty_records: u64,
    lines_written: u64,
}

impl<'a> ScelReader<'a> {
    /// Validates the file and builds its phonetic table.
    ///
    /// The returned reader is positioned at the start of the record stream.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        validate_magic(data)?;
        let header = ScelHeader::from_bytes(data);
        let table = read_phonetic_table(data)?;
        let cursor = ByteCursor::at(data, RECORD_STREAM_OFFSET)?;
        info!(
            "Opened scel dictionary \"{}\" ({}), {} bytes of records",
            header.name,
            header.category,
            cursor.remaining()
        );
        Ok(Self {
            header,
            table,
            cursor,
            failed: false,
            records_read: 0,
            empty_records: 0,
            lines_written: 0,
        })
    }

    pub fn phonetic_table(&self) -> &PhoneticTable {
        &self.table
    }

    /// Records decoded so far, including ones without words.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Records that declared zero words and produced no line.
    pub fn empty_records(&self) -> u64 {
        self.empty_records
    }

    /// Lines emitted through [`ScelReader::write_pyim`] so far.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn read_record(&mut self) -> Result<ScelEntry> {
        let same = self.cursor.read_u16()?;
        let pysize = self.cursor.read_u16()?;
        let codes_offset = self.cursor.position();
        let codes = self.cursor.read_u16_units(pysize)?;
        let phonetic_key = self.table.resolve_key(&codes, codes_offset)?;

        let mut words = Vec::with_capacity(same as usize);
        for _ in 0..same {
            let word_len = self.cursor.read_u16()?;
            let units = self.cursor.read_u16_units(word_len)?;
            words.push(utf16_units_to_string(&units));
            let extra_len = self.cursor.read_u16()?;
            self.cursor.skip_u16_units(extra_len)?;
        }
        Ok(ScelEntry::new(phonetic_key, words))
    }

    /// Decodes the next record that carries at least one word.
    ///
    /// Returns `Ok(None)` at the end of the data. After an error every further
    /// call returns `Ok(None)`.
    pub fn next_entry(&mut self) -> Result<Option<ScelEntry>> {
        loop {
            if self.failed || self.cursor.is_empty() {
                return Ok(None);
            }
            let record_offset = self.cursor.position();
            let entry = match self.read_record() {
                Ok(entry) => entry,
                Err(e) => {
                    self.failed = true;
                    return Err(e);
                }
            };
            self.records_read += 1;
            if entry.words.is_empty() {
                self.empty_records += 1;
                debug!("Record at {:#x} ({}) has no words", record_offset, entry.phonetic_key);
                continue;
            }
            return Ok(Some(entry));
        }
    }

    pub fn entries(self) -> ScelEntries<'a> {
        ScelEntries { reader: self }
    }

    /// Writes one pyim line per record to `out` and returns the number of lines.
    ///
    /// Lines are written whole. When a record turns out to be corrupt the error
    /// is returned and everything written before it stays in `out`.
    pub fn write_pyim<W: Write>(&mut self, out: &mut W, order: WordOrder) -> Result<u64> {
        let mut lines = 0u64;
        while let Some(entry) = self.next_entry()? {
            out.write_all(entry.to_line(order).as_bytes())?;
            lines += 1;
            self.lines_written += 1;
        }
        Ok(lines)
    }
}

/// Iterator over the entries of a [`ScelReader`]; stops after the first error.
pub struct ScelEntries<'a> {
    reader: ScelReader<'a>,
}

impl Iterator for ScelEntries<'_> {
    type Item = Result<ScelEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_entry().transpose()
    }
}
