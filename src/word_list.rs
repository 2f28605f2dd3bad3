use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::Path;

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::MAX_SLOT_LENGTH;

/// An identifier for a given word, based on its index in the `WordList`'s `words` field.
pub type WordId = usize;

/// A struct representing a word that can be chosen for a given slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    pub fn new(string: &str) -> Word {
        Word {
            string: string.to_string(),
            glyphs: string.chars().collect(),
        }
    }

    /// Length in characters, which is what slot lengths are measured in.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The vocabulary available to the solver. Words are unique and kept in lexicographic order, so
/// a `WordId` also fixes the order in which candidates are enumerated.
#[derive(Clone)]
pub struct WordList {
    words: Vec<Word>,
}

impl Debug for WordList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordList")
            .field("words", &format!("({} entries)", self.words.len()))
            .finish()
    }
}

impl WordList {
    /// Build a word list from the given strings, dropping duplicates and empty strings. Words
    /// are compared exactly, so callers are responsible for normalizing case.
    pub fn new<I, S>(words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_string())
            .filter(|word| !word.is_empty())
            .collect();

        WordList {
            words: unique.iter().map(|word| Word::new(word)).collect(),
        }
    }

    /// Parse a word list with one word per line. Lines are trimmed and upper-cased, and blank
    /// lines are skipped.
    pub fn from_string(contents: &str) -> Result<WordList> {
        let word_list = WordList::new(
            contents
                .lines()
                .map(|line| line.trim().to_uppercase())
                .filter(|line| !line.is_empty()),
        );

        if word_list.is_empty() {
            return Err(Error::EmptyWordList);
        }

        Ok(word_list)
    }

    /// Read and parse a word list file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<WordList> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|err| Error::FileReadingError(err, path.display().to_string()))?;

        WordList::from_string(&contents)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    /// Look up the id of a word, if it's in the list.
    pub fn find(&self, string: &str) -> Option<WordId> {
        self.words
            .binary_search_by(|word| word.string.as_str().cmp(string))
            .ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }
}
