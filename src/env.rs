use crate::formula::{Literal, Variable};
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assignment {
    True,
    False,
    Undecided,
}

impl Assignment {
    pub fn negated(self) -> Self {
        match self {
            Assignment::True => Assignment::False,
            Assignment::False => Assignment::True,
            Assignment::Undecided => Assignment::Undecided,
        }
    }
}

impl From<bool> for Assignment {
    fn from(value: bool) -> Self {
        if value {
            Assignment::True
        } else {
            Assignment::False
        }
    }
}

struct Binding {
    variable: Variable,
    value: bool,
    next: Option<Rc<Binding>>,
}

/// An immutable partial assignment of variables to truth values.
///
/// Extending an environment returns a new one that shares all existing bindings with its parent,
/// so environments on abandoned search branches stay valid and cost nothing to keep around.
#[derive(Clone, Default)]
pub struct Environment {
    head: Option<Rc<Binding>>,
    len: usize,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn put_true(&self, variable: Variable) -> Self {
        self.put(variable, true)
    }

    #[must_use]
    pub fn put_false(&self, variable: Variable) -> Self {
        self.put(variable, false)
    }

    /// Bind the literal's variable so that the literal is true.
    #[must_use]
    pub fn assign(&self, literal: &Literal) -> Self {
        self.put(literal.variable(), literal.is_positive())
    }

    fn put(&self, variable: Variable, value: bool) -> Self {
        match self.get(variable) {
            Assignment::Undecided => Self {
                head: Some(Rc::new(Binding {
                    variable,
                    value,
                    next: self.head.clone(),
                })),
                len: self.len + 1,
            },
            current => {
                assert_eq!(
                    current,
                    Assignment::from(value),
                    "conflicting binding for {}",
                    variable
                );
                self.clone()
            }
        }
    }

    pub fn get(&self, variable: Variable) -> Assignment {
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            if binding.variable == variable {
                return binding.value.into();
            }
            node = binding.next.as_deref();
        }
        Assignment::Undecided
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All bindings in ascending variable order.
    pub fn bindings(&self) -> Vec<(Variable, bool)> {
        let mut bindings = Vec::with_capacity(self.len);
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            bindings.push((binding.variable, binding.value));
            node = binding.next.as_deref();
        }
        bindings.sort_unstable_by_key(|(variable, _)| *variable);
        bindings
    }
}

// A long chain would otherwise be freed recursively, one stack frame per binding.
impl Drop for Environment {
    fn drop(&mut self) {
        let mut node = self.head.take();
        while let Some(binding) = node {
            match Rc::try_unwrap(binding) {
                Ok(mut binding) => node = binding.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.bindings() == other.bindings()
    }
}

impl Eq for Environment {}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for (variable, value) in self.bindings() {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}->{}", variable, if value { "TRUE" } else { "FALSE" })?;
        }
        f.write_str("]")
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Environment{}", self)
    }
}
