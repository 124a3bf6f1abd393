use crate::env::Environment;
use crate::formula::{Clause, Formula, Literal};
use crate::SatResult;
use log::{debug, trace};

/// Counters describing how much work a search did.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SolverStats {
    /// Branching decisions on clauses with two or more literals.
    pub decisions: u64,
    /// Assignments forced by unit clauses.
    pub propagations: u64,
    /// Empty clauses derived.
    pub conflicts: u64,
}

pub struct Solver {
    clauses: Vec<Clause>,
    stats: SolverStats,
}

/// What the current clause set says to do next.
#[derive(PartialEq, Eq, Debug)]
enum Selection {
    /// No clauses left: every constraint is satisfied.
    Satisfied,
    /// Some clause was reduced to nothing.
    Conflict,
    /// The smallest clause is a unit clause, so its literal must be true.
    Forced(Literal),
    /// The smallest clause has several literals; branch on this one.
    Decide(Literal),
}

/// The untried half of a branch: the clause set and environment from before the decision,
/// and the literal to set true when we come back to it.
struct Backtrack {
    clauses: Vec<Clause>,
    env: Environment,
    literal: Literal,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self {
            clauses: formula.into_clauses(),
            stats: SolverStats::default(),
        }
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Run DPLL search over the formula.
    ///
    /// The search is depth-first and always tries a decision literal as true before false. The
    /// pending false branches live on an explicit stack rather than the call stack, so deep
    /// searches do not overflow, but states are visited in the same order a recursive search would
    /// visit them.
    pub fn solve(&mut self) -> SatResult {
        self.stats = SolverStats::default();

        let mut backtracks: Vec<Backtrack> = vec![];
        let mut clauses = self.clauses.clone();
        let mut env = Environment::new();

        let result = loop {
            match select(&clauses) {
                Selection::Satisfied => break SatResult::Satisfiable(env),
                Selection::Conflict => {
                    self.stats.conflicts += 1;
                    match backtracks.pop() {
                        None => break SatResult::Unsatisfiable,
                        Some(backtrack) => {
                            trace!(
                                "backtrack: {} at depth {}",
                                backtrack.literal,
                                backtracks.len()
                            );
                            env = backtrack.env.assign(&backtrack.literal);
                            clauses = substitute(&backtrack.clauses, &backtrack.literal);
                        }
                    }
                }
                Selection::Forced(literal) => {
                    self.stats.propagations += 1;
                    trace!("implied {}", literal);
                    env = env.assign(&literal);
                    clauses = substitute(&clauses, &literal);
                }
                Selection::Decide(literal) => {
                    self.stats.decisions += 1;
                    trace!("decision {} at depth {}", literal, backtracks.len());
                    let next = substitute(&clauses, &literal);
                    backtracks.push(Backtrack {
                        clauses,
                        env: env.clone(),
                        literal: literal.negated(),
                    });
                    env = env.assign(&literal);
                    clauses = next;
                }
            }
        };

        debug!(
            "search finished: {} decisions, {} propagations, {} conflicts",
            self.stats.decisions, self.stats.propagations, self.stats.conflicts
        );
        result
    }
}

/// Solve a formula without keeping the solver around.
pub fn solve(formula: &Formula) -> SatResult {
    Solver::new(formula.clone()).solve()
}

/// Scan the clause set for an empty clause, and otherwise pick the first literal of the smallest
/// clause. Ties between equally small clauses go to the one that comes first.
fn select(clauses: &[Clause]) -> Selection {
    let mut smallest: Option<&Clause> = None;
    for clause in clauses {
        if clause.is_empty() {
            return Selection::Conflict;
        }
        if smallest.map_or(true, |s| clause.size() < s.size()) {
            smallest = Some(clause);
        }
    }

    match smallest.and_then(|clause| Some((clause.choose_literal()?, clause.is_unit()))) {
        None => Selection::Satisfied,
        Some((literal, true)) => Selection::Forced(literal),
        Some((literal, false)) => Selection::Decide(literal),
    }
}

/// The clause set that results from setting `literal` to true. Clauses containing `literal` are
/// satisfied and dropped; clauses containing its negation lose that literal; everything else is
/// kept as is. Relative order is preserved.
pub(crate) fn substitute(clauses: &[Clause], literal: &Literal) -> Vec<Clause> {
    let falsified = literal.negated();
    clauses
        .iter()
        .filter(|clause| !clause.contains(literal))
        .map(|clause| {
            if clause.contains(&falsified) {
                clause.reduce(literal)
            } else {
                clause.clone()
            }
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{formula_3sat_strategy, formula_strategy, literal_strategy};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn proptest_solve(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f);
            let solver = solve(&f);
            log::trace!("result = {:?}", solver);
            prop_assert_eq!(solver.is_satisfiable(), brute_force.is_satisfiable());
            if let Some(model) = solver.model() {
                prop_assert!(f.is_satisfied_by(model));
            }
        }

        #[test]
        fn proptest_solve_mixed_sizes(f in formula_strategy()) {
            let brute_force = solve_brute_force(&f);
            let solver = solve(&f);
            prop_assert_eq!(solver.is_satisfiable(), brute_force.is_satisfiable());
            if let Some(model) = solver.model() {
                prop_assert!(f.is_satisfied_by(model));
                prop_assert!(model.len() <= f.num_variables());
            }
        }

        #[test]
        fn proptest_substitute(f in formula_strategy(), literal in literal_strategy(8)) {
            let clauses = f.into_clauses();
            let out = substitute(&clauses, &literal);
            let falsified = literal.negated();

            // satisfied clauses drop out and the rest keep their relative order
            let kept = clauses.iter().filter(|c| !c.contains(&literal)).collect::<Vec<_>>();
            prop_assert_eq!(out.len(), kept.len());

            for (before, after) in kept.into_iter().zip(&out) {
                prop_assert!(!after.contains(&literal));
                prop_assert!(!after.contains(&falsified));
                if before.contains(&falsified) {
                    // exactly the falsified literal is gone, nothing else
                    prop_assert_eq!(after.size(), before.size() - 1);
                    prop_assert!(after.literals().all(|l| before.contains(l)));
                    prop_assert!(before.literals().all(|l| *l == falsified || after.contains(l)));
                } else {
                    prop_assert_eq!(after, before);
                }
            }
        }
    }
}
