//! Sigil CLI
//!
//! Usage:
//!   sigil [OPTIONS] [FILE]
//!
//! Expands a template file (or stdin) against assignment values. With
//! --templates the input is a TOML table of named templates and the
//! result is the resolved "." entry.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use sigil::{parse_template, parse_templates, Assignments};

#[derive(Parser)]
#[command(name = "sigil")]
#[command(about = "Nested-variable template expansion")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Bind a single value; repeatable
    #[arg(short, long, value_name = "KEY=VALUE")]
    assign: Vec<String>,

    /// TOML table of assignment values
    #[arg(short = 'f', long, value_name = "FILE")]
    assignments: Option<PathBuf>,

    /// Treat the input as a TOML table of named templates and resolve "."
    #[arg(short, long)]
    templates: bool,

    /// Print the position-annotated parse tree to stderr
    #[arg(short, long)]
    debug: bool,

    /// Emit the Graphviz graph of the parsed input instead of executing
    #[arg(long)]
    dot: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            if io::stdin().is_terminal() {
                eprintln!("Error: no input file and stdin is a terminal (try --help)");
                process::exit(1);
            }
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let mut assignments = Assignments::new();
    if let Some(path) = &cli.assignments {
        let table = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| text.parse::<toml::Table>().map_err(|e| e.to_string()));
        match table {
            Ok(table) => assign_toml(&mut assignments, table),
            Err(e) => {
                eprintln!("Error loading assignments '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
    }
    for pair in &cli.assign {
        match pair.split_once('=') {
            Some((key, value)) => assignments.assign(key, value),
            None => {
                eprintln!("Error: --assign expects KEY=VALUE, got '{pair}'");
                process::exit(1);
            }
        }
    }

    if cli.templates {
        let table: BTreeMap<String, String> = match toml::from_str(&source) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error parsing template table: {e}");
                process::exit(1);
            }
        };
        let templates = parse_templates(table);
        if cli.dot {
            print!("{}", templates.dot());
            return;
        }
        if cli.debug {
            eprint!("{}", templates.annotated());
        }
        let (result, resolved) = templates.execute(&mut assignments);
        if cli.debug {
            eprint!("{}", resolved.annotated());
        }
        println!("{result}");
        return;
    }

    let template = parse_template(&source);
    if cli.dot {
        print!("{}", template.dot());
        return;
    }
    if cli.debug {
        eprint!("{}", template.annotated());
    }
    let (result, resolved) = template.execute(&mut assignments);
    if cli.debug {
        eprint!("{}", resolved.annotated());
    }
    println!("{result}");
}

fn assign_toml(assignments: &mut Assignments, table: toml::Table) {
    for (key, value) in table {
        match value {
            toml::Value::String(s) => assignments.assign(key, s),
            toml::Value::Integer(i) => assignments.assign(key, i),
            toml::Value::Float(f) => assignments.assign(key, f),
            toml::Value::Boolean(b) => assignments.assign(key, b),
            other => assignments.assign(key, other.to_string()),
        }
    }
}
