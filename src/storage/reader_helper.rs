//! Helper functions for reading and decoding scel data.
//!
//! This module provides:
//! - [`ByteCursor`], a bounds-checked little-endian cursor over an in-memory file
//! - UTF-16 to UTF-8 transcoding with the control-unit filtering scel text needs
//!
//! Every read checks the remaining length first and reports a
//! [`ScelError::CorruptRecord`] carrying the offset where the read started.

use std::io::{Cursor, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{Result, ScelError};

/// Highest code unit treated as a droppable control character (0x01..=0x13).
pub const MAX_CONTROL_UNIT: u16 = 0x13;

/// Little-endian cursor over an immutable byte slice.
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { inner: Cursor::new(data) }
    }

    /// Creates a cursor positioned at `offset`, which must lie inside `data`.
    pub fn at(data: &'a [u8], offset: u64) -> Result<Self> {
        let mut cursor = Self::new(data);
        cursor.seek_to(offset)?;
        Ok(cursor)
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    #[inline]
    pub fn total_len(&self) -> usize {
        self.inner.get_ref().len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.total_len().saturating_sub(self.position() as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        if offset > self.total_len() as u64 {
            return Err(ScelError::corrupt_record(
                offset,
                format!("offset is past the end of data ({} bytes)", self.total_len()),
            ));
        }
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(ScelError::corrupt_record(
                self.position(),
                format!("unexpected end of data: need {} bytes, {} left", needed, self.remaining()),
            ));
        }
        Ok(())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.inner.read_u16::<LittleEndian>()?)
    }

    /// Borrows the next `len` bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let start = self.position() as usize;
        let data: &'a [u8] = *self.inner.get_ref();
        self.inner.set_position((start + len) as u64);
        Ok(&data[start..start + len])
    }

    /// Reads `byte_len / 2` UTF-16 code units. An odd trailing byte is left unread.
    pub fn read_u16_units(&mut self, byte_len: u16) -> Result<Vec<u16>> {
        let count = (byte_len / 2) as usize;
        self.ensure(count * 2)?;
        let mut units = vec![0u16; count];
        self.inner.read_u16_into::<LittleEndian>(&mut units)?;
        Ok(units)
    }

    /// Skips a block whose size is given in bytes, rounded down to whole code units.
    pub fn skip_u16_units(&mut self, byte_len: u16) -> Result<()> {
        let len = (byte_len / 2) as usize * 2;
        self.read_bytes(len).map(|_| ())
    }
}

#[inline]
fn is_control_unit(unit: u16) -> bool {
    (1..=MAX_CONTROL_UNIT).contains(&unit)
}

/// Transcodes UTF-16 code units to a UTF-8 string.
///
/// A zero unit ends the string and units in 0x01..=0x13 are dropped. Unpaired
/// surrogates become U+FFFD.
///
/// # Examples
///
/// ```
/// use scel2pyim::storage::reader_helper::utf16_units_to_string;
///
/// let units = [0x4f60, 0x0005, 0x597d, 0x0000, 0x0041];
/// assert_eq!(utf16_units_to_string(&units), "你好");
/// ```
pub fn utf16_units_to_string(units: &[u16]) -> String {
    let filtered = units
        .iter()
        .copied()
        .take_while(|&unit| unit != 0)
        .filter(|&unit| !is_control_unit(unit));
    char::decode_utf16(filtered)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Same as [`utf16_units_to_string`] for raw little-endian bytes.
pub fn utf16le_bytes_to_string(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    utf16_units_to_string(&units)
}
