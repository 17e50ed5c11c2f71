//! The pinyin syllable table stored at the start of every scel file.
//!
//! Records refer to syllables by a small integer index. The table has a fixed
//! number of slots; the file decides which slot each entry lands in, so slots
//! may be skipped, overwritten, or left unset.

use crate::{Result, ScelError};

/// Number of slots in a scel phonetic table.
pub const PHONETIC_TABLE_SLOTS: usize = 413;

/// Separator between syllables of a phonetic key.
pub const SYLLABLE_SEPARATOR: char = '-';

#[derive(Debug, Clone)]
pub struct PhoneticTable {
    slots: Vec<Option<String>>,
}

impl Default for PhoneticTable {
    fn default() -> Self {
        Self { slots: vec![None; PHONETIC_TABLE_SLOTS] }
    }
}

impl PhoneticTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `syllable` at `index`. A later entry for the same index replaces the earlier one.
    pub fn insert(&mut self, index: u16, syllable: String) -> Result<()> {
        let slot = self.slots.get_mut(index as usize).ok_or_else(|| {
            ScelError::invalid_parameter(format!(
                "phonetic table index {} out of range (max {})",
                index,
                PHONETIC_TABLE_SLOTS - 1
            ))
        })?;
        *slot = Some(syllable);
        Ok(())
    }

    pub fn get(&self, index: u16) -> Option<&str> {
        self.slots.get(index as usize).and_then(|s| s.as_deref())
    }

    /// Number of slots that hold a syllable.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves a list of indices into a `-` joined phonetic key.
    ///
    /// Fails with `CorruptRecord` at `offset` when the list is empty or any
    /// index is out of range or unset.
    pub fn resolve_key(&self, codes: &[u16], offset: u64) -> Result<String> {
        if codes.is_empty() {
            return Err(ScelError::corrupt_record(offset, "record has no pinyin syllables"));
        }
        let mut key = String::with_capacity(codes.len() * 6);
        for (i, &code) in codes.iter().enumerate() {
            if code as usize >= PHONETIC_TABLE_SLOTS {
                return Err(ScelError::corrupt_record(offset, format!("pinyin index {} out of range", code)));
            }
            let syllable = self.get(code).ok_or_else(|| {
                ScelError::corrupt_record(offset, format!("pinyin index {} is not defined by the table", code))
            })?;
            if i > 0 {
                key.push(SYLLABLE_SEPARATOR);
            }
            key.push_str(syllable);
        }
        Ok(key)
    }
}
