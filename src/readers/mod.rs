// Readers for scel dictionary files
//
// This module provides the scel decoder: header validation, phonetic table
// construction and the record stream.

pub mod scel_reader;

pub use scel_reader::{ScelEntries, ScelHeader, ScelReader};
