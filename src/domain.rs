use std::fmt::{Debug, Formatter};

use bit_set::BitSet;

use crate::crossword::{Crossword, VariableId};
use crate::word_list::WordId;

/// A position in the trail that a branch can later be rolled back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Iterator over one variable's candidates. `bit_set::Iter` can report an upper size bound below
/// the number of items it actually yields, which std adapters are allowed to trust, so it isn't
/// exposed directly and no size hint is forwarded.
pub struct Candidates<'a> {
    inner: bit_set::Iter<'a, u32>,
}

impl Iterator for Candidates<'_> {
    type Item = WordId;

    fn next(&mut self) -> Option<WordId> {
        self.inner.next()
    }
}

/// The live candidate sets for every variable. Each removal is pushed onto a trail so that a
/// failed branch can put back exactly what it took out.
#[derive(Clone)]
pub struct Domains {
    /// Indexed by VariableId; each set holds WordIds from the crossword's word list.
    sets: Vec<BitSet>,

    /// Every (variable, word) removal since the last `commit`, oldest first.
    trail: Vec<(VariableId, WordId)>,
}

impl Debug for Domains {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Domains")
            .field("sizes", &self.sets.iter().map(BitSet::len).collect::<Vec<_>>())
            .field("trail_length", &self.trail.len())
            .finish()
    }
}

impl Domains {
    /// Start every variable off with the full word list.
    pub fn new(crossword: &Crossword) -> Domains {
        let word_count = crossword.words().len();
        let mut full = BitSet::with_capacity(word_count);
        for word_id in 0..word_count {
            full.insert(word_id);
        }

        Domains {
            sets: (0..crossword.variable_count()).map(|_| full.clone()).collect(),
            trail: vec![],
        }
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.sets[variable_id].len()
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.sets[variable_id].is_empty()
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.sets[variable_id].contains(word_id)
    }

    /// The remaining candidates for a variable, in WordId order.
    pub fn iter(&self, variable_id: VariableId) -> Candidates<'_> {
        Candidates {
            inner: self.sets[variable_id].iter(),
        }
    }

    /// Snapshot of a variable's candidates, for callers that need to mutate while iterating.
    pub fn word_ids(&self, variable_id: VariableId) -> Vec<WordId> {
        self.iter(variable_id).collect()
    }

    /// Remove a word from a variable's domain, recording it on the trail. Returns whether the word
    /// was present.
    pub fn remove(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        let removed = self.sets[variable_id].remove(word_id);
        if removed {
            self.trail.push((variable_id, word_id));
        }
        removed
    }

    /// Narrow a variable's domain down to a single word.
    pub fn restrict_to(&mut self, variable_id: VariableId, word_id: WordId) {
        for other_word_id in self.word_ids(variable_id) {
            if other_word_id != word_id {
                self.remove(variable_id, other_word_id);
            }
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Put back every removal made since `checkpoint`, newest first.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        let Checkpoint(length) = checkpoint;
        assert!(length <= self.trail.len(), "Restoring to a checkpoint past the end of the trail?");

        while self.trail.len() > length {
            if let Some((variable_id, word_id)) = self.trail.pop() {
                self.sets[variable_id].insert(word_id);
            }
        }
    }

    /// Forget the trail, making every removal so far permanent.
    pub fn commit(&mut self) {
        self.trail.clear();
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}
