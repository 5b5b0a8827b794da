use crate::formula::Formula;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads a DIMACS-style CNF. Variables may be any whitespace-free name, not just numbers; a
/// leading `-` negates. A clause ends at a `0` token or at the end of its line.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut formula = Formula::new();

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                let _num_clauses = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;
            }
            Some(_) => {
                let mut clause = vec![];
                for x in line {
                    if x == "0" {
                        if !clause.is_empty() {
                            formula.add_clause(clause.drain(..));
                        }
                        continue;
                    }
                    if x == "-" {
                        return Err(DimacsParseError::Format("literal with no variable name".into()));
                    }
                    clause.push(x);
                }
                if !clause.is_empty() {
                    formula.add_clause(clause);
                }
            }
        }
    }

    Ok(formula)
}

pub fn parse_from_file<P: AsRef<Path>>(path: P) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
