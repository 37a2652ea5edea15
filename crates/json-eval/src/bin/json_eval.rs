//! `json-eval` — evaluate expressions against a JSON document.
//!
//! Usage:
//!   json-eval <json-file> <expression>
//!   json-eval -k <json-file>
//!
//! In `-k` mode the document is parsed once and expressions are read from
//! stdin until `-x` is entered.

use json_eval::Document;
use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("-k") if args.len() == 3 => interactive(&args[2]),
        Some(path) if args.len() == 3 => run_once(path, &args[2]),
        _ => usage(),
    }
}

fn usage() -> ! {
    eprintln!(
        "Usage: json-eval <json-file> <expression>\n\
         \x20      json-eval -k <json-file>\n\
         Example: json-eval test.json \"a.b[1]\""
    );
    std::process::exit(1);
}

fn load(path: &str) -> Document {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Could not open {path}: {e}");
            std::process::exit(1);
        }
    };
    match Document::parse(&text) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run_once(path: &str, expression: &str) {
    let doc = load(path);
    match doc.evaluate(expression) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Re-read expressions from stdin against one already-parsed document.
fn interactive(path: &str) {
    let doc = load(path);
    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
        let expression = line.trim();
        if expression.is_empty() {
            continue;
        }
        if expression == "-x" {
            break;
        }
        match doc.evaluate(expression) {
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        }
    }
}
