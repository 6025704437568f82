//! Check that each argument is a single balanced s-expression.
//!
//! Usage: cargo run --example balance -- "(a (b c))" "(()" ")("

use std::process::ExitCode;

use stream_core::combinator::{eof, seq};
use stream_core::{run, split, Consume, Error, Result, Scanner, Transition};

/// Accepts one parenthesized group, atoms included.
#[derive(Debug, Clone)]
struct Balance(usize);

impl Consume for Balance {
    fn finalize(&self) -> Result<()> {
        Err(Error::expected("\")\""))
    }

    fn transition(self, token: &[u8]) -> Result<Transition> {
        match (token, self.0) {
            (b"(", depth) => Ok(Transition::advance(Balance(depth + 1).into_consumer())),
            (b")", 0) => Err(Error::expected("\"(\"")),
            (b")", 1) => Ok(Transition::complete()),
            (b")", depth) => Ok(Transition::advance(Balance(depth - 1).into_consumer())),
            (_, 0) => Err(Error::expected("\"(\"")),
            _ => Ok(Transition::advance(self.into_consumer())),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut status = ExitCode::SUCCESS;
    for arg in std::env::args().skip(1) {
        let scanner = Scanner::new(arg.as_bytes(), split::sexp);
        match run(scanner, seq([Balance(0).into_consumer(), eof()])) {
            Ok(()) => println!("{:<24} ok", arg),
            Err(err) => {
                println!("{:<24} {}", arg, err);
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
