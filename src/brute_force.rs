use crate::*;

// Simple brute-force implementation for use in property tests
pub(crate) fn solve_brute_force(f: &Formula) -> SatResult {
    let variables = f.variables().into_iter().collect::<Vec<_>>();
    assert!(variables.len() <= 15); // just for safety

    'search: for assignment in 0..2u32.pow(variables.len() as u32) {
        let env = variables
            .iter()
            .enumerate()
            .fold(Environment::new(), |env, (i, v)| {
                if assignment & (1 << i) == 0 {
                    env.put_true(*v)
                } else {
                    env.put_false(*v)
                }
            });
        for clause in f.clauses() {
            if !clause.is_satisfied_by(&env) {
                // this assignment is bogus
                continue 'search;
            }
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        return SatResult::Satisfiable(env);
    }
    // no assignment is valid
    SatResult::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn brute_force_sat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let f = Formula::new(vec![c1, c2]);

        let result = solve_brute_force(&f);
        assert!(f.is_satisfied_by(result.model().unwrap()));
    }

    #[test]
    fn brute_force_unsat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let c3 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn brute_force_empty_clause() {
        let f = Formula::new(vec![Clause::empty()]);
        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }
}
