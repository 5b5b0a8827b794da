use crate::formula::{Formula, Literal, Variable};
use crate::watch::WatchTable;
use crate::SatResult;
use log::{debug, trace};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assignment {
    True,
    False,
    Undecided,
}

impl Assignment {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Assignment::True => Some(true),
            Assignment::False => Some(false),
            Assignment::Undecided => None,
        }
    }
}

/// A complete satisfying assignment, indexed by variable.
pub type Model = Vec<bool>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    /// Enter the next depth: either every variable is decided, or push a frame for the next one.
    Descend,
    /// Try the next value for the deepest decided variable, or pop it if both have been tried.
    Trial,
    Exhausted,
}

/// Enumerates every satisfying assignment of a formula, depth first, trying `false` before `true`
/// for each variable in index order.
///
/// The search is resumable: each call to [`Solver::next_model`] picks up where the last one left
/// off. The stack of decisions is `assignment[..depth]`; the value currently held by the deepest
/// variable says which trial comes next.
pub struct Solver<'f> {
    formula: &'f Formula,
    watches: WatchTable,
    assignment: Vec<Assignment>,
    depth: usize,
    state: State,
}

impl<'f> Solver<'f> {
    pub fn new(formula: &'f Formula) -> Self {
        Self {
            formula,
            watches: WatchTable::new(formula),
            assignment: vec![Assignment::Undecided; formula.num_variables()],
            depth: 0,
            state: State::Descend,
        }
    }

    pub fn formula(&self) -> &'f Formula {
        self.formula
    }

    /// Advances to the next satisfying assignment. The returned slice is the solver's own
    /// assignment, so it has to be released (or copied) before the search can continue.
    pub fn next_model(&mut self) -> Option<&[Assignment]> {
        loop {
            match self.state {
                State::Exhausted => return None,
                State::Descend => {
                    self.state = State::Trial;
                    if self.depth == self.formula.num_variables() {
                        trace!(
                            "model {}",
                            self.formula.assignment_to_string(&self.assignment, false, "")
                        );
                        return Some(&self.assignment);
                    }
                    self.depth += 1;
                }
                State::Trial => {
                    if self.depth == 0 {
                        self.state = State::Exhausted;
                        continue;
                    }
                    let variable = Variable(self.depth - 1);
                    let value = match self.assignment[variable.0] {
                        Assignment::Undecided => Assignment::False,
                        Assignment::False => Assignment::True,
                        Assignment::True => {
                            self.assignment[variable.0] = Assignment::Undecided;
                            self.depth -= 1;
                            continue;
                        }
                    };
                    if self.assign(variable, value) {
                        self.state = State::Descend;
                    }
                }
            }
        }
    }

    /// Gives `variable` the value `value` and checks that no clause became contradicted.
    fn assign(&mut self, variable: Variable, value: Assignment) -> bool {
        debug!(
            "Trying {} = {}",
            self.formula.variable_name(variable),
            if value == Assignment::True { 1 } else { 0 }
        );
        self.assignment[variable.0] = value;

        // the literal this value falsifies has the same polarity bit as the value
        let false_literal = Literal::new(variable, value == Assignment::True);
        self.watches.update(self.formula, false_literal, &self.assignment)
    }

    pub fn solve(&mut self) -> SatResult {
        match self.next_model() {
            Some(_) => SatResult::Satisfiable,
            None => SatResult::Unsatisfiable,
        }
    }

    /// Copies out every model, in search order.
    pub fn models(self) -> Models<'f> {
        Models { solver: self }
    }
}

pub struct Models<'f> {
    solver: Solver<'f>,
}

impl<'f> Iterator for Models<'f> {
    type Item = Model;

    fn next(&mut self) -> Option<Model> {
        self.solver
            .next_model()
            .map(|assignment| assignment.iter().filter_map(Assignment::as_bool).collect())
    }
}
