//! Print the tokens of stdin, one per line.
//!
//! Usage: cargo run --example tokens [bytes|runes|lines|words|sexp] < input
//!
//! Set RUST_LOG=trace to watch the driver step through every token.

use std::io::{self, Write};
use std::process::ExitCode;

use stream_core::{run, split, Collect, Collected, Consume, Scanner, Split};

type Rule = for<'a> fn(&'a [u8], bool) -> io::Result<Split<'a>>;

fn main() -> ExitCode {
    env_logger::init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "sexp".to_string());
    let rule: Rule = match name.as_str() {
        "bytes" => split::bytes,
        "runes" => split::runes,
        "lines" => split::lines,
        "words" => split::words,
        "sexp" => split::sexp,
        other => {
            eprintln!("unknown split rule: {}", other);
            return ExitCode::FAILURE;
        }
    };

    let tokens = Collected::new();
    let scanner = Scanner::new(io::stdin().lock(), rule);
    if let Err(err) = run(scanner, Collect::new(tokens.clone()).into_consumer()) {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }

    let mut out = io::stdout().lock();
    for token in tokens.take() {
        let _ = writeln!(out, "{:?}", String::from_utf8_lossy(&token));
    }
    ExitCode::SUCCESS
}
