use clap::{crate_version, App, Arg};
use dpllsat::formula::dimacs::{parse, parse_file};
use dpllsat::output::{model_line, write_assignment_file};
use dpllsat::*;
use log::info;
use std::time::Instant;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .version(crate_version!())
        .about("DPLL satisfiability solver for DIMACS CNF formulas")
        .arg(Arg::with_name("INPUT").help("input file (in CNF); reads stdin if omitted").index(1))
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .takes_value(true)
                .help("write the satisfying assignment to FILE"),
        )
        .arg(Arg::with_name("model").long("model").help("print the model as a DIMACS 'v' line"))
        .get_matches();

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_file(path)
    } else {
        parse(std::io::stdin())
    };

    let f = match f {
        Ok(f) => f,
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    };
    info!("read {} clauses over {} variables", f.len(), f.num_variables());

    let started = Instant::now();
    let mut solver = Solver::new(f);
    let result = solver.solve();
    let elapsed = started.elapsed();

    let exit_code = match &result {
        SatResult::Satisfiable(env) => {
            println!("SATISFIABLE");
            if matches.is_present("model") {
                println!("{}", model_line(env));
            }
            if let Some(path) = matches.value_of("output") {
                if let Err(e) = write_assignment_file(env, path) {
                    eprintln!("failed to write {}: {}", path, e);
                    std::process::exit(-1);
                }
                info!("assignment written to {}", path);
            }
            0
        }
        SatResult::Unsatisfiable => {
            println!("UNSATISFIABLE");
            1
        }
    };
    let stats = solver.stats();
    println!("time: {:.3}ms", elapsed.as_secs_f64() * 1000.0);
    info!(
        "{} decisions, {} propagations, {} conflicts",
        stats.decisions, stats.propagations, stats.conflicts
    );
    std::process::exit(exit_code);
}
