use std::collections::HashSet;

use crate::crossword::{Crossword, VariableId};
use crate::word_list::{Word, WordId};

/// A partial mapping from variables to the words chosen for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Indexed by VariableId.
    word_ids: Vec<Option<WordId>>,
}

impl Assignment {
    /// An assignment with no variables filled.
    pub fn new(crossword: &Crossword) -> Assignment {
        Assignment {
            word_ids: vec![None; crossword.variable_count()],
        }
    }

    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.word_ids[variable_id]
    }

    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.word_ids[variable_id].is_some()
    }

    /// Fill a variable. Filling a variable that's already filled means the search lost track of
    /// its own state, so it panics.
    pub fn assign(&mut self, variable_id: VariableId, word_id: WordId) {
        if let Some(existing) = self.word_ids[variable_id] {
            panic!(
                "Assigning word {} to variable {}, which already holds word {}",
                word_id, variable_id, existing
            );
        }
        self.word_ids[variable_id] = Some(word_id);
    }

    /// Clear a variable, returning the word it held.
    pub fn unassign(&mut self, variable_id: VariableId) -> Option<WordId> {
        self.word_ids[variable_id].take()
    }

    pub fn len(&self) -> usize {
        self.word_ids.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Does every variable have a word?
    pub fn is_complete(&self) -> bool {
        self.word_ids.iter().all(Option::is_some)
    }

    /// The filled variables and their words, in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.word_ids
            .iter()
            .enumerate()
            .filter_map(|(variable_id, word_id)| word_id.map(|word_id| (variable_id, word_id)))
    }

    /// Look up the word placed in a variable.
    pub fn word<'a>(&self, crossword: &'a Crossword, variable_id: VariableId) -> Option<&'a Word> {
        self.get(variable_id).map(|word_id| crossword.words().word(word_id))
    }

    /// Check every filled variable against the puzzle's constraints: no word is used twice, every
    /// word fits its slot, and crossing words agree on their shared letter. The whole assignment is
    /// checked, not just the most recent choice.
    pub fn is_consistent(&self, crossword: &Crossword) -> bool {
        let mut seen: HashSet<WordId> = HashSet::with_capacity(self.word_ids.len());

        for (variable_id, word_id) in self.iter() {
            if !seen.insert(word_id) {
                return false;
            }

            let word = crossword.words().word(word_id);
            if word.len() != crossword.variable(variable_id).length {
                return false;
            }

            for neighbor_id in crossword.neighbors(variable_id) {
                let Some(neighbor_word) = self.word(crossword, neighbor_id) else {
                    continue;
                };
                let Some(overlap) = crossword.overlap(variable_id, neighbor_id) else {
                    continue;
                };

                if word.glyphs.get(overlap.0) != neighbor_word.glyphs.get(overlap.1) {
                    return false;
                }
            }
        }

        true
    }

    /// Project the assignment onto the grid: each cell holds the letter placed there, or `None` if
    /// no filled variable covers it (including blocked cells).
    pub fn letter_grid(&self, crossword: &Crossword) -> Vec<Vec<Option<char>>> {
        let structure = crossword.structure();
        let mut letters = vec![vec![None; structure.width()]; structure.height()];

        for (variable_id, word_id) in self.iter() {
            let word = crossword.words().word(word_id);
            let cells = crossword.variable(variable_id).cells();

            for (&(row, col), &glyph) in cells.iter().zip(word.glyphs.iter()) {
                letters[row][col] = Some(glyph);
            }
        }

        letters
    }

    /// Build an assignment from word strings, for tests and for checking solutions produced
    /// elsewhere. Returns `None` if any word isn't in the crossword's word list, or if a variable
    /// is missing from the crossword or listed twice.
    pub fn from_strings(
        crossword: &Crossword,
        strings: &[(VariableId, &str)],
    ) -> Option<Assignment> {
        let mut assignment = Assignment::new(crossword);
        for &(variable_id, string) in strings {
            if variable_id >= crossword.variable_count() || assignment.contains(variable_id) {
                return None;
            }
            assignment.assign(variable_id, crossword.words().find(string)?);
        }
        Some(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::Assignment;
    use crate::crossword::Crossword;
    use crate::structure::Structure;
    use crate::word_list::WordList;

    /// ___
    /// #_#
    /// #_#
    fn crossword() -> Crossword {
        Crossword::new(
            Structure::from_template("___\n#_#\n#_#").unwrap(),
            WordList::new(["ANT", "CAT", "DOG", "HI"]),
        )
    }

    #[test]
    fn test_completeness() {
        let crossword = crossword();
        let mut assignment = Assignment::new(&crossword);
        assert!(assignment.is_empty());
        assert!(!assignment.is_complete());

        assignment.assign(0, 1);
        assert!(!assignment.is_complete());
        assignment.assign(1, 0);
        assert!(assignment.is_complete());
        assert_eq!(assignment.len(), 2);

        assert_eq!(assignment.unassign(1), Some(0));
        assert!(!assignment.is_complete());
    }

    #[test]
    fn test_consistent_crossing() {
        let crossword = crossword();
        let assignment = Assignment::from_strings(&crossword, &[(0, "CAT"), (1, "ANT")]).unwrap();

        assert!(assignment.is_consistent(&crossword));
    }

    #[test]
    fn test_mismatched_crossing_is_inconsistent() {
        let crossword = crossword();
        let assignment = Assignment::from_strings(&crossword, &[(0, "CAT"), (1, "DOG")]).unwrap();

        assert!(!assignment.is_consistent(&crossword));
    }

    #[test]
    fn test_repeated_word_is_inconsistent() {
        let crossword = Crossword::new(
            Structure::from_template("___\n###\n___").unwrap(),
            WordList::new(["CAT"]),
        );
        let assignment = Assignment::from_strings(&crossword, &[(0, "CAT"), (1, "CAT")]).unwrap();

        assert!(!assignment.is_consistent(&crossword));
    }

    #[test]
    fn test_wrong_length_is_inconsistent() {
        let crossword = crossword();
        let assignment = Assignment::from_strings(&crossword, &[(0, "HI")]).unwrap();

        assert!(!assignment.is_consistent(&crossword));
    }

    #[test]
    #[should_panic]
    fn test_reassigning_a_filled_variable_panics() {
        let crossword = crossword();
        let mut assignment = Assignment::new(&crossword);

        assignment.assign(0, 1);
        assignment.assign(0, 2);
    }

    #[test]
    fn test_from_strings_rejects_bad_variables() {
        let crossword = crossword();

        assert!(Assignment::from_strings(&crossword, &[(0, "CAT"), (0, "DOG")]).is_none());
        assert!(Assignment::from_strings(&crossword, &[(2, "CAT")]).is_none());
        assert!(Assignment::from_strings(&crossword, &[(0, "EEL")]).is_none());
    }

    #[test]
    fn test_letter_grid() {
        let crossword = crossword();
        let assignment = Assignment::from_strings(&crossword, &[(0, "CAT"), (1, "ANT")]).unwrap();

        assert_eq!(
            assignment.letter_grid(&crossword),
            vec![
                vec![Some('C'), Some('A'), Some('T')],
                vec![None, Some('N'), None],
                vec![None, Some('T'), None],
            ]
        );
    }
}
