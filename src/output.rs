use crate::env::Environment;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write one `<variable>:TRUE` or `<variable>:FALSE` line per binding, in variable order.
pub fn write_assignment<W: Write>(env: &Environment, mut out: W) -> io::Result<()> {
    for (variable, value) in env.bindings() {
        writeln!(out, "{}:{}", variable, if value { "TRUE" } else { "FALSE" })?;
    }
    out.flush()
}

pub fn write_assignment_file<P: AsRef<Path>>(env: &Environment, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    write_assignment(env, BufWriter::new(file))
}

/// The model as a DIMACS solution line, e.g. `v 1 -2 3 0`.
pub fn model_line(env: &Environment) -> String {
    let mut line = String::from("v");
    for (variable, value) in env.bindings() {
        line.push(' ');
        if !value {
            line.push('-');
        }
        line.push_str(&variable.to_string());
    }
    line.push_str(" 0");
    line
}
