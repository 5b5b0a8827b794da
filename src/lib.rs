pub mod formula;
mod solver;
mod watch;

#[cfg(test)]
mod brute_force;

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable,
    Unsatisfiable,
}

pub use formula::{Clause, ClauseIdx, Formula, Literal, Variable};
pub use solver::{Assignment, Model, Models, Solver};
pub use watch::WatchTable;
