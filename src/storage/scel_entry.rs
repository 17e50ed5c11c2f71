//! Decoded scel records and their pyim text form.

use serde::{Deserialize, Serialize};

/// Order in which the words of a multi-word record are joined on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WordOrder {
    /// Last declared word first.
    #[default]
    Reversed,
    /// Words in the order the file declares them.
    Declared,
}

/// One record of the scel record stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScelEntry {
    /// Syllables joined with `-`, e.g. `ni-hao`.
    pub phonetic_key: String,
    /// Candidate words in declared order.
    pub words: Vec<String>,
}

impl ScelEntry {
    pub fn new(phonetic_key: String, words: Vec<String>) -> Self {
        Self { phonetic_key, words }
    }

    pub fn syllables(&self) -> impl Iterator<Item = &str> {
        self.phonetic_key.split(crate::storage::SYLLABLE_SEPARATOR)
    }

    /// Renders the pyim line for this record, newline included.
    ///
    /// # Examples
    ///
    /// ```
    /// use scel2pyim::storage::{ScelEntry, WordOrder};
    ///
    /// let entry = ScelEntry::new("ni-hao".to_string(), vec!["你好".to_string(), "拟好".to_string()]);
    /// assert_eq!(entry.to_line(WordOrder::Declared), "ni-hao 你好 拟好\n");
    /// assert_eq!(entry.to_line(WordOrder::Reversed), "ni-hao 拟好 你好\n");
    /// ```
    pub fn to_line(&self, order: WordOrder) -> String {
        let mut line = String::with_capacity(
            self.phonetic_key.len() + self.words.iter().map(|w| w.len() + 1).sum::<usize>() + 1,
        );
        line.push_str(&self.phonetic_key);
        let mut push_word = |word: &String| {
            line.push(' ');
            line.push_str(word);
        };
        match order {
            WordOrder::Reversed => self.words.iter().rev().for_each(&mut push_word),
            WordOrder::Declared => self.words.iter().for_each(&mut push_word),
        }
        line.push('\n');
        line
    }
}
