pub mod dimacs;

use crate::env::{Assignment, Environment};
use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) => *v,
            Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// Value of this literal under a (partial) environment.
    pub fn evaluate(&self, env: &Environment) -> Assignment {
        match (env.get(self.variable()), self) {
            (Assignment::Undecided, _) => Assignment::Undecided,
            (value, Literal::Positive(_)) => value,
            (value, Literal::Negative(_)) => value.negated(),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(Variable(x)) => write!(f, "{}", x),
            Literal::Negative(Variable(x)) => write!(f, "!{}", x),
        }
    }
}

/// A disjunction of distinct literals.
///
/// Literals keep the order in which they were first added; [`Clause::choose_literal`] depends on
/// that order, which makes the solver's branching reproducible. The literal storage is shared, so
/// cloning a clause into a new clause set is cheap.
#[derive(Clone, Debug)]
pub struct Clause {
    literals: Rc<[Literal]>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut seen = HashSet::new();
        let literals: Vec<Literal> = disjuncts.into_iter().filter(|l| seen.insert(*l)).collect();
        Self {
            literals: literals.into(),
        }
    }

    /// The empty clause, i.e. a derived contradiction.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn is_unit(&self) -> bool {
        self.size() == 1
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// The first literal of the clause, or `None` if the clause is empty.
    pub fn choose_literal(&self) -> Option<Literal> {
        self.literals.first().copied()
    }

    /// The clause obtained by setting `literal` to true: its negation drops out of the
    /// disjunction. A clause that contains `literal` itself is satisfied and must be discarded by
    /// the caller instead of reduced.
    pub fn reduce(&self, literal: &Literal) -> Self {
        debug_assert!(!self.contains(literal), "reducing satisfied clause {} by {}", self, literal);
        let falsified = literal.negated();
        Self {
            literals: self.literals().filter(|l| **l != falsified).copied().collect(),
        }
    }

    pub fn is_satisfied_by(&self, env: &Environment) -> bool {
        self.literals().any(|l| l.evaluate(env) == Assignment::True)
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.literals().all(|l| other.contains(l))
    }
}

impl Eq for Clause {}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("()");
        }
        if self.size() > 1 {
            f.write_str("(")?;
        }
        let mut first_literal = true;
        for literal in self.literals() {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" | ")?;
            }
            write!(f, "{}", literal)?;
        }
        if self.size() > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn add_clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Distinct variables mentioned by the formula, in ascending order.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals().map(|literal| literal.variable()))
            .collect()
    }

    pub fn num_variables(&self) -> usize {
        self.variables().len()
    }

    pub fn is_satisfied_by(&self, env: &Environment) -> bool {
        self.clauses.iter().all(|clause| clause.is_satisfied_by(env))
    }

    pub(crate) fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
pub(crate) fn literal_strategy(
    num_variables: usize,
) -> impl proptest::strategy::Strategy<Value = Literal> {
    use proptest::prelude::*;
    (0..num_variables, any::<bool>()).prop_map(|(v, positive)| {
        if positive {
            p(v)
        } else {
            n(v)
        }
    })
}

/// Random formulas over at most 8 variables, small enough for the brute-force oracle.
#[cfg(test)]
pub(crate) fn formula_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;
    let clause = prop::collection::vec(literal_strategy(8), 1..=4)
        .prop_map(|literals| Clause::new(literals));
    prop::collection::vec(clause, 0..24).prop_map(|clauses| Formula::new(clauses))
}

#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;
    let clause = prop::collection::vec(literal_strategy(8), 3)
        .prop_map(|literals| Clause::new(literals));
    prop::collection::vec(clause, 1..40).prop_map(|clauses| Formula::new(clauses))
}
