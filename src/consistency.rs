//! Node and arc consistency. Node consistency handles the unary constraint (a word must be as
//! long as its slot); arc consistency handles the binary one (crossing slots must agree on the
//! shared letter), using the AC-3 worklist algorithm.

use std::collections::{HashSet, VecDeque};

use log::trace;

use crate::crossword::{Crossword, VariableId};
use crate::domain::Domains;

/// An ordered pair of crossing variables: `(x, y)` means "make `x` consistent with `y`".
pub type Arc = (VariableId, VariableId);

/// Data structure used in `ac3` to track which arcs we still need to visit. An arc that's already
/// waiting in the queue isn't enqueued a second time.
#[derive(Debug)]
struct ConsistencyQueue {
    queue: VecDeque<Arc>,
    pending: HashSet<Arc>,
}

impl ConsistencyQueue {
    fn with_initial_queue<Items>(items: Items) -> ConsistencyQueue
    where
        Items: IntoIterator<Item = Arc>,
    {
        let mut queue = ConsistencyQueue {
            queue: VecDeque::new(),
            pending: HashSet::new(),
        };
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.pending.remove(&arc);
        Some(arc)
    }

    fn enqueue(&mut self, arc: Arc) {
        if self.pending.insert(arc) {
            self.queue.push_back(arc);
        }
    }
}

/// Results from a call to `ac3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArcConsistencySuccess {
    /// How many times `revise` ran.
    pub revisions: usize,

    /// How many words were removed across all domains.
    pub eliminations: usize,
}

/// Returned by `ac3` when a variable's domain runs out of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub emptied_variable_id: VariableId,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Remove every word whose length doesn't match its variable's length. Returns the number of
/// words removed.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) -> usize {
    let mut eliminations = 0;

    for (variable_id, variable) in crossword.variables().iter().enumerate() {
        for word_id in domains.word_ids(variable_id) {
            if crossword.words().word(word_id).len() != variable.length {
                domains.remove(variable_id, word_id);
                eliminations += 1;
            }
        }
    }

    eliminations
}

/// Make `x` arc consistent with `y` by removing every word in `x`'s domain that doesn't agree with
/// at least one word in `y`'s domain at their shared cell. Returns the number of words removed;
/// variables that don't cross are left alone.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: VariableId, y: VariableId) -> usize {
    let Some(overlap) = crossword.overlap(x, y) else {
        return 0;
    };
    let words = crossword.words();

    // Which letters can `y` still put in the shared cell?
    let supported: HashSet<char> = domains
        .iter(y)
        .filter_map(|word_id| words.word(word_id).glyphs.get(overlap.1).copied())
        .collect();

    let mut eliminations = 0;
    for word_id in domains.word_ids(x) {
        let glyph = words.word(word_id).glyphs.get(overlap.0);

        if !glyph.map(|glyph| supported.contains(glyph)).unwrap_or(false) {
            domains.remove(x, word_id);
            eliminations += 1;
        }
    }

    eliminations
}

/// Run AC-3. If `arcs` is `None`, start from every arc in the puzzle; otherwise start from the
/// given arcs (used to propagate a single change during search).
///
/// Gives up as soon as any domain is emptied. Removals are recorded on the domains' trail, so a
/// caller can roll back a failed run with `Domains::restore`.
pub fn ac3(
    crossword: &Crossword,
    domains: &mut Domains,
    arcs: Option<&[Arc]>,
) -> ArcConsistencyResult {
    let mut queue = match arcs {
        Some(arcs) => ConsistencyQueue::with_initial_queue(arcs.iter().copied()),
        None => ConsistencyQueue::with_initial_queue(crossword.arcs()),
    };
    let mut result = ArcConsistencySuccess::default();

    while let Some((x, y)) = queue.pop_front() {
        result.revisions += 1;

        let eliminations = revise(crossword, domains, x, y);
        if eliminations == 0 {
            continue;
        }
        result.eliminations += eliminations;

        trace!("revise({}, {}) removed {} words", x, y, eliminations);

        if domains.is_empty(x) {
            return Err(ArcConsistencyFailure { emptied_variable_id: x });
        }

        // Shrinking `x` may have removed the only support some word in a neighbor had.
        for z in crossword.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    Ok(result)
}
