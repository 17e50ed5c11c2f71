// Core data structures for decoding scel dictionaries
//
// This module provides the byte cursor and UTF-16 helpers, the phonetic
// syllable table, and the decoded record type.

pub mod reader_helper;
pub mod phonetic_table;
pub mod scel_entry;

pub use reader_helper::{ByteCursor, utf16_units_to_string, utf16le_bytes_to_string};
pub use phonetic_table::{PhoneticTable, PHONETIC_TABLE_SLOTS, SYLLABLE_SEPARATOR};
pub use scel_entry::{ScelEntry, WordOrder};
