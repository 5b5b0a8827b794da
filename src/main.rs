use clap::{App, Arg};
use log::LevelFilter;
use watchsat::formula::dimacs::{parse, parse_from_file};
use watchsat::*;

fn main() {
    let matches = App::new("watchsat")
        .about("Enumerates every satisfying assignment of a CNF formula")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("log every trial and contradiction to stderr"),
        )
        .arg(
            Arg::with_name("count")
                .short("n")
                .long("count")
                .takes_value(true)
                .value_name("N")
                .help("stop after N assignments"),
        )
        .arg(
            Arg::with_name("brief")
                .short("b")
                .long("brief")
                .help("only print the true literals of each assignment"),
        )
        .arg(
            Arg::with_name("starting-with")
                .short("s")
                .long("starting-with")
                .takes_value(true)
                .value_name("PREFIX")
                .help("only print variables whose name starts with PREFIX"),
        )
        .get_matches();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if matches.is_present("verbose") {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let count = match matches.value_of("count").map(str::parse::<usize>) {
        None => None,
        Some(Ok(n)) => Some(n),
        Some(Err(e)) => {
            eprintln!("invalid count: {}", e);
            std::process::exit(-1);
        }
    };
    let brief = matches.is_present("brief");
    let starting_with = matches.value_of("starting-with").unwrap_or("");

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_from_file(path)
    } else {
        parse(std::io::stdin())
    };

    match f {
        Ok(f) => {
            log::info!("{} variables, {} clauses", f.num_variables(), f.num_clauses());
            let mut solver = Solver::new(&f);

            let mut found = 0;
            while count.map_or(true, |n| found < n) {
                match solver.next_model() {
                    Some(assignment) => println!("{}", f.assignment_to_string(assignment, brief, starting_with)),
                    None => break,
                }
                found += 1;
            }

            let exit_code = match count {
                Some(n) if found < n => 1,
                _ => 0,
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {:?}", e);
            std::process::exit(-1);
        }
    }
}
