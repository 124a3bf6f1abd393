pub mod env;
pub mod formula;
pub mod output;
pub mod solver;

#[cfg(test)]
mod brute_force;

pub use env::{Assignment, Environment};
pub use formula::{Clause, Formula, Literal, Variable};
pub use solver::{solve, Solver, SolverStats};

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Environment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    /// The satisfying assignment, if there is one.
    pub fn model(&self) -> Option<&Environment> {
        match self {
            SatResult::Satisfiable(env) => Some(env),
            SatResult::Unsatisfiable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use test_env_log::test;

    fn a() -> Literal {
        p(1)
    }
    fn b() -> Literal {
        p(2)
    }

    #[test]
    fn unit_clause() {
        let f = Formula::new(vec![Clause::new(vec![a()])]);
        let env = Environment::new().put_true(Variable(1));
        assert_eq!(solve(&f), SatResult::Satisfiable(env));
    }

    #[test]
    fn negated_unit_clause() {
        let f = Formula::new(vec![Clause::new(vec![a().negated()])]);
        let result = solve(&f);
        assert_eq!(result.model().unwrap().get(Variable(1)), Assignment::False);
    }

    #[test]
    fn contradictory_units() {
        let f = Formula::new(vec![Clause::new(vec![a()]), Clause::new(vec![a().negated()])]);
        assert_eq!(solve(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn single_disjunction() {
        let f = Formula::new(vec![Clause::new(vec![a(), b()])]);
        let result = solve(&f);
        let env = result.model().unwrap();
        assert!(
            env.get(Variable(1)) == Assignment::True || env.get(Variable(2)) == Assignment::True
        );
    }

    #[test]
    fn three_binary_clauses() {
        let f = Formula::new(vec![
            Clause::new(vec![a(), b()]),
            Clause::new(vec![a().negated(), b()]),
            Clause::new(vec![a(), b().negated()]),
        ]);
        let result = solve(&f);
        let env = result.model().unwrap();
        assert!(f.is_satisfied_by(env));
        // first literal of the first smallest clause is tried first
        assert_eq!(env.get(Variable(1)), Assignment::True);
        assert_eq!(env.get(Variable(2)), Assignment::True);
    }

    #[test]
    fn empty_formula() {
        let f = Formula::default();
        assert_eq!(solve(&f), SatResult::Satisfiable(Environment::new()));
    }

    #[test]
    fn empty_clause() {
        let f = Formula::new(vec![Clause::new(vec![p(0), n(1)]), Clause::empty()]);
        assert_eq!(solve(&f), SatResult::Unsatisfiable);
    }

    fn random_3sat<R: Rng>(rng: &mut R, num_variables: usize, num_clauses: usize) -> Formula {
        Formula::new((0..num_clauses).map(|_| {
            Clause::new((0..3).map(|_| {
                let var = Variable(rng.gen_range(1, num_variables + 1));
                if rng.gen() {
                    Literal::Positive(var)
                } else {
                    Literal::Negative(var)
                }
            }))
        }))
    }

    #[test]
    fn random_3sat_sound_and_deterministic() {
        let mut rng = StdRng::seed_from_u64(0x5a7);
        for _ in 0..20 {
            // clause/variable ratio near the 3-SAT phase transition
            let f = random_3sat(&mut rng, 40, 170);
            let first = solve(&f);
            if let Some(model) = first.model() {
                assert!(f.is_satisfied_by(model));
            }
            assert_eq!(first, solve(&f));
        }
    }
}
