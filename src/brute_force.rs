use crate::*;

// Truth-table enumeration, for checking the solver in tests. Models come out in the solver's
// order: variable 0 is the most significant choice and false comes before true.
pub(crate) fn solve_brute_force_all(f: &Formula) -> Vec<Model> {
    let num_variables = f.num_variables();
    assert!(num_variables <= 15); // just for safety

    fn assignment_for(assignment: u32, num_variables: usize, x: usize) -> bool {
        assignment & (1 << (num_variables - 1 - x)) != 0
    }

    let mut models = vec![];
    'search: for assignment in 0..2u32.pow(num_variables as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment_for(assignment, num_variables, literal.idx()) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied
        models.push((0..num_variables).map(|x| assignment_for(assignment, num_variables, x)).collect());
    }
    models
}

pub(crate) fn solve_brute_force(f: &Formula) -> SatResult {
    if solve_brute_force_all(f).is_empty() {
        SatResult::Unsatisfiable
    } else {
        SatResult::Satisfiable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(clauses: &[&[&str]]) -> Formula {
        let mut f = Formula::new();
        for clause in clauses {
            f.add_clause(clause.iter());
        }
        f
    }

    #[test]
    fn solve_bcp_sat() {
        let f = formula(&[&["x", "y"], &["-x"]]);

        assert_eq!(solve_brute_force(&f), SatResult::Satisfiable);
        assert_eq!(solve_brute_force_all(&f), vec![vec![false, true]]);
    }

    #[test]
    fn solve_bcp_unsat() {
        let f = formula(&[&["x", "y"], &["-x"], &["-y"]]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_conflict_unsat() {
        let f = formula(&[&["x"], &["-x"]]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn enumeration_order() {
        let mut f = Formula::new();
        f.declare_variable("a");
        f.declare_variable("b");

        assert_eq!(
            solve_brute_force_all(&f),
            vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
                vec![true, true]
            ]
        );
    }
}
