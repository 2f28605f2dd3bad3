//! Backtracking search. Variables are chosen by minimum remaining values with ties going to the
//! variable with the most crossings, and values are tried least-constraining first. After each
//! tentative choice we can optionally re-run AC-3 from the chosen variable's neighbors; every
//! domain change that makes is undone through the trail if the branch fails.

use std::cmp::Reverse;

use instant::{Duration, Instant};
use log::{debug, info};

use crate::assignment::Assignment;
use crate::consistency::{ac3, enforce_node_consistency, Arc, ArcConsistencyFailure};
use crate::crossword::{Crossword, Variable, VariableId};
use crate::domain::Domains;
use crate::word_list::WordId;

/// Knobs for a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    /// Re-establish arc consistency after each tentative assignment.
    pub inference: bool,

    /// Give up once this much time has passed. Checked once per search state.
    pub deadline: Option<Duration>,
}

impl Default for SolverOptions {
    fn default() -> SolverOptions {
        SolverOptions {
            inference: true,
            deadline: None,
        }
    }
}

/// A struct tracking statistics about the solving process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub inference_failures: u64,
    pub node_eliminations: usize,
    pub initial_arc_eliminations: usize,
    pub duration: Duration,
}

/// A struct representing the results of a successful solve.
#[derive(Debug, Clone)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillFailure {
    /// The initial arc consistency pass emptied this variable's domain, so search never ran.
    ArcInconsistent(Variable),

    /// The search tried every candidate on every branch.
    NoSolution,

    /// The configured deadline passed before the search finished.
    DeadlineExceeded,
}

pub type FillResult = Result<FillSuccess, FillFailure>;

/// Solves a single crossword. Domains are owned by the solver and mutated in place; everything
/// the search removes is restored before it returns from a failed branch.
#[derive(Debug)]
pub struct Solver<'a> {
    crossword: &'a Crossword,
    domains: Domains,
    options: SolverOptions,
    statistics: Statistics,
    start: Instant,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword, options: SolverOptions) -> Solver<'a> {
        Solver {
            crossword,
            domains: Domains::new(crossword),
            options,
            statistics: Statistics::default(),
            start: Instant::now(),
        }
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Enforce node consistency, then arc consistency, then search for a complete assignment.
    pub fn solve(&mut self) -> FillResult {
        self.start = Instant::now();

        self.statistics.node_eliminations =
            enforce_node_consistency(self.crossword, &mut self.domains);

        match ac3(self.crossword, &mut self.domains, None) {
            Ok(success) => {
                self.statistics.initial_arc_eliminations = success.eliminations;
            }
            Err(ArcConsistencyFailure { emptied_variable_id }) => {
                let variable = *self.crossword.variable(emptied_variable_id);
                info!("Arc consistency emptied the domain of {:?}", variable);
                self.statistics.duration = self.start.elapsed();
                return Err(FillFailure::ArcInconsistent(variable));
            }
        }

        // Nothing backtracks past the initial pruning.
        self.domains.commit();

        debug!(
            "Starting search over {} variables: {:?}",
            self.crossword.variable_count(),
            self.domains
        );

        let mut assignment = Assignment::new(self.crossword);
        let found = self.backtrack(&mut assignment);
        self.statistics.duration = self.start.elapsed();

        info!(
            "Search finished after {} states and {} backtracks in {:?}",
            self.statistics.states, self.statistics.backtracks, self.statistics.duration
        );

        if found? {
            Ok(FillSuccess {
                statistics: self.statistics.clone(),
                assignment,
            })
        } else {
            Err(FillFailure::NoSolution)
        }
    }

    /// Extend `assignment` to a complete, consistent assignment if possible. On `Ok(true)` the
    /// assignment holds the solution; on `Ok(false)` it's back in the state it was passed in,
    /// and so are the domains.
    fn backtrack(&mut self, assignment: &mut Assignment) -> Result<bool, FillFailure> {
        if assignment.is_complete() {
            return Ok(true);
        }

        self.statistics.states += 1;
        if let Some(deadline) = self.options.deadline {
            if self.start.elapsed() >= deadline {
                return Err(FillFailure::DeadlineExceeded);
            }
        }

        let variable_id = self
            .select_unassigned_variable(assignment)
            .expect("An incomplete assignment has an unassigned variable");

        for word_id in self.order_domain_values(variable_id, assignment) {
            assignment.assign(variable_id, word_id);

            if assignment.is_consistent(self.crossword) {
                let checkpoint = self.domains.checkpoint();

                if self.infer(variable_id, word_id) {
                    if self.backtrack(assignment)? {
                        return Ok(true);
                    }
                } else {
                    self.statistics.inference_failures += 1;
                }

                self.domains.restore(checkpoint);
            }

            assignment.unassign(variable_id);
        }

        self.statistics.backtracks += 1;
        Ok(false)
    }

    /// Propagate a tentative choice by narrowing the chosen variable's domain and re-running AC-3
    /// from its neighbors. Returns false if some domain was emptied. Does nothing (and succeeds)
    /// when inference is disabled.
    fn infer(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        if !self.options.inference {
            return true;
        }

        self.domains.restrict_to(variable_id, word_id);

        let arcs: Vec<Arc> = self
            .crossword
            .neighbors(variable_id)
            .map(|neighbor_id| (neighbor_id, variable_id))
            .collect();

        ac3(self.crossword, &mut self.domains, Some(&arcs)).is_ok()
    }

    /// Choose the unassigned variable with the fewest remaining values, then the most crossings,
    /// then the lowest id.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<VariableId> {
        (0..self.crossword.variable_count())
            .filter(|&variable_id| !assignment.contains(variable_id))
            .min_by_key(|&variable_id| {
                (
                    self.domains.len(variable_id),
                    Reverse(self.crossword.degree(variable_id)),
                    variable_id,
                )
            })
    }

    /// The values in a variable's domain, ordered by how many values each would rule out among
    /// the unassigned neighbors. Ties keep word list order.
    pub fn order_domain_values(
        &self,
        variable_id: VariableId,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        let words = self.crossword.words();
        let mut values = self.domains.word_ids(variable_id);

        values.sort_by_cached_key(|&word_id| {
            let word = words.word(word_id);

            self.crossword
                .neighbors(variable_id)
                .filter(|&neighbor_id| !assignment.contains(neighbor_id))
                .map(|neighbor_id| {
                    let overlap = self
                        .crossword
                        .overlap(variable_id, neighbor_id)
                        .expect("Neighbors always overlap");
                    let glyph = word.glyphs.get(overlap.0);

                    self.domains
                        .iter(neighbor_id)
                        .filter(|&other_word_id| {
                            words.word(other_word_id).glyphs.get(overlap.1) != glyph
                        })
                        .count()
                })
                .sum::<usize>()
        });

        values
    }
}

/// Solve a crossword with the given options.
pub fn solve(crossword: &Crossword, options: SolverOptions) -> FillResult {
    Solver::new(crossword, options).solve()
}
