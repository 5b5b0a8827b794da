use crate::formula::{ClauseIdx, Formula, Literal};
use crate::solver::Assignment;
use log::{debug, trace};
use std::collections::VecDeque;

/// For every literal, the clauses currently watching it. Each clause watches exactly one literal
/// at a time, and that literal is never false under the current assignment (except for the one
/// clause found contradicted, until its variable is unassigned).
///
/// Watches are never moved back when a variable is unassigned: unassigning only turns a false
/// or true literal into an undecided one, which can still be watched.
#[derive(Debug, Clone)]
pub struct WatchTable {
    watches: Vec<VecDeque<ClauseIdx>>,
}

impl WatchTable {
    /// Every clause starts out watching its first literal.
    pub fn new(formula: &Formula) -> Self {
        let mut watches = vec![VecDeque::new(); 2 * formula.num_variables()];
        for (idx, clause) in formula.clauses().enumerate() {
            let literal = clause.first().expect("can't watch an empty clause");
            watches[literal.code()].push_back(ClauseIdx(idx));
        }
        Self { watches }
    }

    /// Called after `false_literal` became false. Moves every clause watching it to some other
    /// literal that isn't false. Returns false as soon as a clause has no such literal, leaving
    /// the remaining watches where they are.
    pub fn update(&mut self, formula: &Formula, false_literal: Literal, assignment: &[Assignment]) -> bool {
        while let Some(&idx) = self.watches[false_literal.code()].front() {
            let clause = formula.clause(idx);
            let alternative = clause
                .literals()
                .find(|l| l.value(assignment) != Assignment::False);

            match alternative {
                Some(&alternative) => {
                    trace!(
                        "clause {} moves watch {} -> {}",
                        idx.0,
                        formula.literal_to_string(false_literal),
                        formula.literal_to_string(alternative)
                    );
                    self.watches[false_literal.code()].pop_front();
                    self.watches[alternative.code()].push_back(idx);
                }
                None => {
                    debug!(
                        "Current assignment: {}",
                        formula.assignment_to_string(assignment, false, "")
                    );
                    debug!("Clause {} contradicted.", formula.clause_to_string(clause));
                    return false;
                }
            }
        }
        true
    }

    /// Clauses watching `literal`, in queue order.
    pub fn watching(&self, literal: Literal) -> impl Iterator<Item = ClauseIdx> + '_ {
        self.watches[literal.code()].iter().copied()
    }

    /// Every `(watched literal, clause)` pair in the table.
    pub fn watches(&self) -> impl Iterator<Item = (Literal, ClauseIdx)> + '_ {
        self.watches
            .iter()
            .enumerate()
            .flat_map(|(code, queue)| queue.iter().map(move |&idx| (Literal::from_code(code), idx)))
    }
}
