use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use smallvec::{smallvec, SmallVec};

use crate::structure::{GridCoord, Structure};
use crate::word_list::WordList;
use crate::MAX_SLOT_LENGTH;

/// An identifier for a given variable, based on its index in the Crossword's `variables` field.
pub type VariableId = usize;

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A slot in the grid that needs to be filled with a single word. Equality is structural: two
/// variables are the same if they start at the same cell, face the same way and have the same
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub i: usize,
    pub j: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(i: usize, j: usize, direction: Direction, length: usize) -> Variable {
        Variable { i, j, direction, length }
    }

    /// Generate the coords for each cell of this variable, in word order.
    pub fn cells(&self) -> SmallVec<[GridCoord; MAX_SLOT_LENGTH]> {
        (0..self.length)
            .map(|cell_idx| match self.direction {
                Direction::Across => (self.i, self.j + cell_idx),
                Direction::Down => (self.i + cell_idx, self.j),
            })
            .collect()
    }
}

/// The shared cell between two crossing variables: the word placed in the first variable must
/// have the same letter at index `.0` as the word placed in the second has at index `.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap(pub usize, pub usize);

impl Overlap {
    pub fn reversed(self) -> Overlap {
        Overlap(self.1, self.0)
    }
}

/// A struct representing the aspects of a puzzle that are static during solving: the structure,
/// the vocabulary, the variables derived from the structure and the overlaps between them.
pub struct Crossword {
    structure: Structure,
    words: WordList,
    variables: Vec<Variable>,

    /// Square table indexed by `[x][y]`. Symmetric up to `Overlap::reversed`.
    overlaps: Vec<Vec<Option<Overlap>>>,
}

impl Debug for Crossword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crossword")
            .field("height", &self.structure.height())
            .field("width", &self.structure.width())
            .field("variables", &self.variables)
            .field("words", &self.words)
            .finish()
    }
}

impl Crossword {
    /// Derive the variables and overlap table for a structure.
    ///
    /// The structure must be well-formed: two variables may share at most one cell. This isn't
    /// checked in release builds.
    pub fn new(structure: Structure, words: WordList) -> Crossword {
        let variables = derive_variables(&structure);

        // Build a map from cell location to the variables running through it, which we can then
        // use to calculate overlaps.
        let mut entries_by_cell: HashMap<GridCoord, SmallVec<[(VariableId, usize); 2]>> =
            HashMap::new();
        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, loc) in variable.cells().into_iter().enumerate() {
                entries_by_cell
                    .entry(loc)
                    .or_insert_with(|| smallvec![])
                    .push((variable_id, cell_idx));
            }
        }

        let mut overlaps: Vec<Vec<Option<Overlap>>> =
            variables.iter().map(|_| vec![None; variables.len()]).collect();

        for entries in entries_by_cell.values() {
            debug_assert!(entries.len() <= 2, "More than two variables crossing in cell?");

            if let &[(x, x_idx), (y, y_idx)] = entries.as_slice() {
                debug_assert!(overlaps[x][y].is_none(), "Variables share more than one cell?");

                overlaps[x][y] = Some(Overlap(x_idx, y_idx));
                overlaps[y][x] = Some(Overlap(y_idx, x_idx));
            }
        }

        Crossword {
            structure,
            words,
            variables,
            overlaps,
        }
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Find the id of a variable by value.
    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.variables.iter().position(|v| v == variable)
    }

    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps[x][y]
    }

    /// The variables that cross `x`, in id order.
    pub fn neighbors(&self, x: VariableId) -> impl Iterator<Item = VariableId> + '_ {
        self.overlaps[x]
            .iter()
            .enumerate()
            .filter_map(|(y, overlap)| overlap.map(|_| y))
    }

    /// How many variables cross `x`?
    pub fn degree(&self, x: VariableId) -> usize {
        self.neighbors(x).count()
    }

    /// Every ordered pair of crossing variables.
    pub fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        (0..self.variables.len())
            .flat_map(|x| self.neighbors(x).map(move |y| (x, y)))
            .collect()
    }
}

/// Scan the structure for maximal runs of at least two letter cells, in row-major order of their
/// starting cell with across before down.
fn derive_variables(structure: &Structure) -> Vec<Variable> {
    let mut variables = vec![];

    for i in 0..structure.height() {
        for j in 0..structure.width() {
            if !structure.is_open((i, j)) {
                continue;
            }

            // A run starts here if the previous cell in that direction is blocked or off the grid.
            if j == 0 || !structure.is_open((i, j - 1)) {
                let length = (j..structure.width())
                    .take_while(|&k| structure.is_open((i, k)))
                    .count();
                if length > 1 {
                    variables.push(Variable::new(i, j, Direction::Across, length));
                }
            }

            if i == 0 || !structure.is_open((i - 1, j)) {
                let length = (i..structure.height())
                    .take_while(|&k| structure.is_open((k, j)))
                    .count();
                if length > 1 {
                    variables.push(Variable::new(i, j, Direction::Down, length));
                }
            }
        }
    }

    variables
}

#[cfg(test)]
mod tests {
    use super::{Crossword, Direction, Overlap, Variable};
    use crate::structure::Structure;
    use crate::word_list::WordList;

    fn crossword(template: &str) -> Crossword {
        Crossword::new(Structure::from_template(template).unwrap(), WordList::new(["CAT"]))
    }

    /// #___#
    /// #_##_
    /// #_##_
    /// #_##_
    /// #____
    #[test]
    fn test_variables_are_derived_in_row_major_order() {
        let crossword = crossword(include_str!("../data/structure0.txt"));

        assert_eq!(
            crossword.variables(),
            &[
                Variable::new(0, 1, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 5),
                Variable::new(1, 4, Direction::Down, 4),
                Variable::new(4, 1, Direction::Across, 4),
            ]
        );
    }

    #[test]
    fn test_single_cells_are_not_variables() {
        let crossword = crossword(
            "
            _#_
            ###
            _#_
            ",
        );

        assert_eq!(crossword.variable_count(), 0);
        assert!(crossword.arcs().is_empty());
    }

    #[test]
    fn test_overlaps_are_symmetric() {
        let crossword = crossword(include_str!("../data/structure0.txt"));

        for x in 0..crossword.variable_count() {
            for y in 0..crossword.variable_count() {
                assert_eq!(
                    crossword.overlap(x, y),
                    crossword.overlap(y, x).map(Overlap::reversed),
                );
            }
        }

        assert_eq!(crossword.overlap(0, 1), Some(Overlap(0, 0)));
        assert_eq!(crossword.overlap(1, 3), Some(Overlap(4, 0)));
        assert_eq!(crossword.overlap(3, 2), Some(Overlap(3, 3)));
        assert_eq!(crossword.overlap(0, 2), None);
        assert_eq!(crossword.overlap(0, 3), None);
    }

    #[test]
    fn test_neighbors_and_arcs() {
        let crossword = crossword(include_str!("../data/structure0.txt"));

        assert_eq!(crossword.neighbors(1).collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(crossword.degree(3), 2);
        assert_eq!(crossword.degree(2), 1);
        assert_eq!(crossword.arcs(), vec![(0, 1), (1, 0), (1, 3), (2, 3), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_parallel_runs_do_not_overlap() {
        let crossword = crossword(
            "
            ___
            ###
            ___
            ",
        );

        assert_eq!(crossword.variable_count(), 2);
        assert_eq!(crossword.overlap(0, 1), None);
        assert_eq!(
            crossword.variable_id(&Variable::new(2, 0, Direction::Across, 3)),
            Some(1)
        );
    }
}
