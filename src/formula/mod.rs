pub mod dimacs;

use crate::solver::Assignment;
use std::collections::HashMap;
use std::fmt::Debug;
use std::fmt::{self, Formatter};
use std::ops::Not;

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

/// A variable together with a polarity, packed as `(index << 1) | negated`.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Literal(usize);

impl Literal {
    pub fn new(variable: Variable, negated: bool) -> Self {
        Literal((variable.0 << 1) | negated as usize)
    }

    pub fn from_code(code: usize) -> Self {
        Literal(code)
    }

    /// The raw encoding, usable as a dense index in `[0, 2n)`.
    pub fn code(&self) -> usize {
        self.0
    }

    pub fn variable(&self) -> Variable {
        Variable(self.0 >> 1)
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn is_negated(&self) -> bool {
        self.0 & 1 == 1
    }

    pub fn is_positive(&self) -> bool {
        !self.is_negated()
    }

    pub fn decode(&self) -> (Variable, bool) {
        (self.variable(), self.is_negated())
    }

    /// The complementary literal: same variable, opposite polarity.
    pub fn negated(&self) -> Self {
        Literal(self.0 ^ 1)
    }

    /// Value of this literal under a (partial) assignment. A literal is false exactly when its
    /// variable's value equals the polarity bit.
    pub fn value(&self, assignment: &[Assignment]) -> Assignment {
        match assignment[self.idx()] {
            Assignment::Undecided => Assignment::Undecided,
            Assignment::True if self.is_positive() => Assignment::True,
            Assignment::False if self.is_negated() => Assignment::True,
            _ => Assignment::False,
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

#[derive(Clone, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Builds a clause, dropping repeated literals. The first occurrence of each literal keeps its
    /// position, so the first literal given is always the first literal of the clause.
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: Vec<Literal> = vec![];
        for literal in disjuncts {
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }
        Self { literals }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn first(&self) -> Option<Literal> {
        self.literals.first().copied()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_satisfied(&self, assignment: &[Assignment]) -> bool {
        self.literals.iter().any(|l| l.value(assignment) == Assignment::True)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClauseIdx(pub usize);

/// A CNF formula over named variables. Variables are numbered densely in the order their names
/// are first seen.
#[derive(Clone, Default)]
pub struct Formula {
    variables: Vec<String>,
    variable_table: HashMap<String, Variable>,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the variable called `name`, allocating the next index if it hasn't been seen yet.
    pub fn declare_variable(&mut self, name: &str) -> Variable {
        if let Some(&variable) = self.variable_table.get(name) {
            return variable;
        }
        let variable = Variable(self.variables.len());
        self.variables.push(name.to_string());
        self.variable_table.insert(name.to_string(), variable);
        variable
    }

    /// Adds a clause given as variable names, each optionally prefixed with `-` for negation.
    pub fn add_clause<I, S>(&mut self, tokens: I) -> ClauseIdx
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let literals = tokens
            .into_iter()
            .map(|token| {
                let token = token.as_ref();
                let (name, negated) = match token.strip_prefix('-') {
                    Some(name) => (name, true),
                    None => (token, false),
                };
                Literal::new(self.declare_variable(name), negated)
            })
            .collect::<Vec<_>>();
        let clause = Clause::new(literals);
        assert!(!clause.is_empty(), "can't add an empty clause");

        self.clauses.push(clause);
        ClauseIdx(self.clauses.len() - 1)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn clause(&self, idx: ClauseIdx) -> &Clause {
        &self.clauses[idx.0]
    }

    /// Variable names, in index order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn variable_name(&self, variable: Variable) -> &str {
        &self.variables[variable.0]
    }

    pub fn lookup(&self, name: &str) -> Option<Variable> {
        self.variable_table.get(name).copied()
    }

    pub fn literal_to_string(&self, literal: Literal) -> String {
        let sign = if literal.is_negated() { "-" } else { "" };
        format!("{}{}", sign, self.variable_name(literal.variable()))
    }

    pub fn clause_to_string(&self, clause: &Clause) -> String {
        clause
            .literals()
            .map(|&l| self.literal_to_string(l))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders an assignment as the literals it makes true, restricted to variables whose name
    /// starts with `starting_with`. Unless `brief`, false variables are listed negated.
    /// Undecided variables are skipped.
    pub fn assignment_literals(&self, assignment: &[Assignment], brief: bool, starting_with: &str) -> Vec<String> {
        self.variables
            .iter()
            .zip(assignment)
            .filter(|(name, _)| name.starts_with(starting_with))
            .filter_map(|(name, value)| match value {
                Assignment::True => Some(name.clone()),
                Assignment::False if !brief => Some(format!("-{}", name)),
                _ => None,
            })
            .collect()
    }

    pub fn assignment_to_string(&self, assignment: &[Assignment], brief: bool, starting_with: &str) -> String {
        self.assignment_literals(assignment, brief, starting_with).join(" ")
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.literals.len() > 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in &clause.literals {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                f.write_str(&self.literal_to_string(*literal))?;
            }
            if clause.literals.len() > 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::new(Variable(x), false)
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::new(Variable(x), true)
}

/// Random formulas over variables `x0..x{n}`, with clauses of one to three literals. Every
/// variable is declared up front, so some may not appear in any clause.
#[cfg(test)]
pub(crate) fn formula_strategy(max_vars: usize, max_clauses: usize) -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1..=max_vars).prop_flat_map(move |num_vars| {
        let literal = (0..num_vars, any::<bool>());
        let clause = proptest::collection::vec(literal, 1..=3);
        proptest::collection::vec(clause, 0..=max_clauses).prop_map(move |clauses| {
            let mut f = Formula::new();
            for v in 0..num_vars {
                f.declare_variable(&format!("x{}", v));
            }
            for clause in clauses {
                f.add_clause(
                    clause
                        .into_iter()
                        .map(|(v, negated)| format!("{}x{}", if negated { "-" } else { "" }, v)),
                );
            }
            f
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn literal_encoding() {
        assert_eq!(p(0).code(), 0);
        assert_eq!(n(0).code(), 1);
        assert_eq!(p(3).code(), 6);
        assert_eq!(n(3).code(), 7);
        assert_eq!(n(3).decode(), (Variable(3), true));
        assert_eq!(p(3).negated(), n(3));
        assert_eq!(!n(3), p(3));
    }

    #[test]
    fn literal_value() {
        use crate::solver::Assignment::*;
        let assignment = vec![True, False, Undecided];
        assert_eq!(p(0).value(&assignment), True);
        assert_eq!(n(0).value(&assignment), False);
        assert_eq!(p(1).value(&assignment), False);
        assert_eq!(n(1).value(&assignment), True);
        assert_eq!(p(2).value(&assignment), Undecided);
        assert_eq!(n(2).value(&assignment), Undecided);
    }

    #[test]
    fn add_clause_allocates_in_first_seen_order() {
        let mut f = Formula::new();
        f.add_clause(&["b", "-a"]);
        f.add_clause(&["-c", "a", "b"]);

        assert_eq!(f.num_variables(), 3);
        assert_eq!(f.variables(), &["b", "a", "c"]);
        assert_eq!(f.lookup("a"), Some(Variable(1)));
        assert_eq!(f.lookup("d"), None);
        assert_eq!(
            f.clause(ClauseIdx(1)).literals().cloned().collect::<Vec<_>>(),
            vec![n(2), p(1), p(0)]
        );
    }

    #[test]
    fn add_clause_dedups_keeping_first_occurrence() {
        let mut f = Formula::new();
        let idx = f.add_clause(&["-y", "x", "-y", "x", "y"]);

        assert_eq!(
            f.clause(idx).literals().cloned().collect::<Vec<_>>(),
            vec![n(0), p(1), p(0)]
        );
        assert_eq!(f.clause(idx).first(), Some(n(0)));
    }

    #[test]
    #[should_panic]
    fn add_clause_rejects_empty() {
        let mut f = Formula::new();
        f.add_clause(Vec::<String>::new());
    }

    #[test]
    fn declare_variable_is_idempotent() {
        let mut f = Formula::new();
        assert_eq!(f.declare_variable("x"), Variable(0));
        assert_eq!(f.declare_variable("y"), Variable(1));
        assert_eq!(f.declare_variable("x"), Variable(0));
        assert_eq!(f.num_clauses(), 0);
    }

    #[test]
    fn to_string() {
        let mut f = Formula::new();
        let idx = f.add_clause(&["x", "-y"]);
        f.add_clause(&["-x"]);

        assert_eq!(f.literal_to_string(n(1)), "-y");
        assert_eq!(f.clause_to_string(f.clause(idx)), "x -y");
        assert_eq!(format!("{:?}", f), "(x | -y) & -x");
    }

    #[test]
    fn assignment_to_string() {
        use crate::solver::Assignment::*;
        let mut f = Formula::new();
        f.add_clause(&["a1", "b1", "a2", "a3"]);
        let assignment = vec![True, False, False, Undecided];

        assert_eq!(f.assignment_to_string(&assignment, false, ""), "a1 -b1 -a2");
        assert_eq!(f.assignment_to_string(&assignment, true, ""), "a1");
        assert_eq!(f.assignment_to_string(&assignment, false, "a"), "a1 -a2");
        assert_eq!(f.assignment_literals(&assignment, true, "b"), Vec::<String>::new());
    }

    proptest! {
        #[test]
        fn encoding_bijection(index in 0usize..1 << 20, negated in any::<bool>()) {
            let literal = Literal::new(Variable(index), negated);
            prop_assert_eq!(literal.decode(), (Variable(index), negated));
            prop_assert_eq!(Literal::from_code(literal.code()), literal);
            prop_assert_eq!(literal.negated().negated(), literal);
            prop_assert_ne!(literal.negated(), literal);
            prop_assert_eq!(literal.negated().variable(), literal.variable());
        }
    }
}
