//! Fill a crossword grid from a word list by treating it as a constraint satisfaction problem:
//! each slot is a variable, each word a value, and crossing slots must agree on the letter they
//! share. Domains are pruned with node and arc consistency before a backtracking search.

pub mod assignment;
pub mod consistency;
pub mod crossword;
pub mod domain;
pub mod error;
pub mod picture;
pub mod render;
pub mod search;
pub mod structure;
pub mod word_list;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

pub use assignment::Assignment;
pub use crossword::{Crossword, Direction, Overlap, Variable, VariableId};
pub use error::{Error, Result};
pub use picture::{load_font, render_image, save_image};
pub use render::render_grid;
pub use search::{solve, FillFailure, FillResult, FillSuccess, Solver, SolverOptions, Statistics};
pub use structure::Structure;
pub use word_list::{Word, WordId, WordList};
