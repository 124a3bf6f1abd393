use crate::formula::{Clause, Formula, Literal, Variable};
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Read a formula in DIMACS CNF format.
///
/// Clauses may span several lines and end at a `0`. The `p cnf` header is optional but must be
/// well-formed if present, and a `%` line ends the input early.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut clause = vec![];
    let mut num_clauses = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            if num_clauses.is_some() {
                return Err(DimacsParseError::format(line_number, "duplicate 'p' line"));
            }
            num_clauses = Some(parse_header(line, line_number)?);
            continue;
        }

        for token in line.split_whitespace() {
            match parse_literal(token, line_number)? {
                Some(l) => clause.push(l),
                None => clauses.push(Clause::new(clause.drain(..))),
            }
        }
    }

    if !clause.is_empty() {
        warn!("last clause is missing its terminating 0");
        clauses.push(Clause::new(clause));
    }

    if let Some(num_clauses) = num_clauses {
        if num_clauses != clauses.len() {
            warn!("header declares {} clauses but found {}", num_clauses, clauses.len());
        }
    }

    Ok(Formula::new(clauses))
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

/// Returns the declared clause count.
fn parse_header(line: &str, line_number: usize) -> Result<usize, DimacsParseError> {
    let mut line = line.split_whitespace();
    if line.next() != Some("p") {
        return Err(DimacsParseError::format(line_number, "invalid 'p' line"));
    }
    if line.next() != Some("cnf") {
        return Err(DimacsParseError::format(line_number, "missing 'cnf'"));
    }

    let _num_variables = line
        .next()
        .and_then(|c| c.parse::<usize>().ok())
        .ok_or_else(|| DimacsParseError::format(line_number, "invalid num_variables"))?;

    line.next()
        .and_then(|c| c.parse::<usize>().ok())
        .ok_or_else(|| DimacsParseError::format(line_number, "invalid num_clauses"))
}

fn parse_literal(s: &str, line_number: usize) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::format(line_number, format!("invalid literal '{}'", s)))?;
    let v = Variable(l.unsigned_abs());
    if l > 0 {
        Ok(Some(Literal::Positive(v)))
    } else if l < 0 {
        Ok(Some(Literal::Negative(v)))
    } else {
        Ok(None)
    }
}

#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },
}

impl DimacsParseError {
    fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}
