//! Test harness for running tokenizer fixtures with stochastic variations

use crate::common::{Gen, TestCase};
use std::io::{self, Read};
use stream_core::{run, split, Collect, Collected, Consume, Limits, Scanner, Split};

type Rule = for<'a> fn(&'a [u8], bool) -> io::Result<Split<'a>>;

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: Vec<u8>,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

fn rule_by_name(name: &str) -> Rule {
    match name {
        "bytes" => split::bytes,
        "runes" => split::runes,
        "lines" => split::lines,
        "words" => split::words,
        "sexp" => split::sexp,
        other => panic!("unknown split rule {:?}", other),
    }
}

/// Tokenize by driving a Collect consumer over a scanner
pub fn collect_tokens<R: Read>(reader: R, rule: &str, limits: Limits) -> Result<Vec<String>, String> {
    let out = Collected::new();
    let scanner = Scanner::with_limits(reader, rule_by_name(rule), limits);
    run(scanner, Collect::new(out.clone()).into_consumer()).map_err(|e| e.to_string())?;
    Ok(out.to_strings())
}

fn compare(expected: &[String], actual: Result<Vec<String>, String>) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let actual = match actual {
        Ok(tokens) => tokens,
        Err(e) => {
            errors.push(format!("Unexpected error: {}", e));
            Vec::new()
        }
    };
    if actual.len() != expected.len() {
        errors.push(format!(
            "Token count mismatch: expected {}, got {}",
            expected.len(),
            actual.len()
        ));
    }
    for (i, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
        if act != exp {
            errors.push(format!("Token {}: expected {:?}, got {:?}", i, exp, act));
        }
    }
    (actual, errors)
}

/// Run a single test case (canonical, whole input in one read)
pub fn run_test(case: &TestCase) -> TestResult {
    let input = case.input.as_bytes();
    let result = collect_tokens(input, &case.split, Limits::default());
    let (actual, errors) = compare(&case.tokens, result);

    TestResult {
        passed: errors.is_empty(),
        input: input.to_vec(),
        expected: case.tokens.clone(),
        actual,
        seed: 0,
        errors,
    }
}

/// Run test with stochastic variations
///
/// Applies independent variations:
/// - Input delivered in geometric-sized reads, sometimes interrupted
/// - Tiny initial buffer (1-8 bytes) so tokens straddle buffer growth
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let input = case.input.as_bytes();
    let reader = gen.chunked(input);
    let limits = Limits::new(1 + gen.geometric(0.7).min(7), Limits::default().max_token_size);

    let result = collect_tokens(reader, &case.split, limits);
    let (actual, errors) = compare(&case.tokens, result);

    TestResult {
        passed: errors.is_empty(),
        input: input.to_vec(),
        expected: case.tokens.clone(),
        actual,
        seed: gen.seed,
        errors,
    }
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set STREAM_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{:?}", String::from_utf8_lossy(&self.input));
        eprintln!("\nExpected tokens:");
        for (i, t) in self.expected.iter().enumerate() {
            eprintln!("  {}: {:?}", i, t);
        }
        eprintln!("\nActual tokens:");
        for (i, t) in self.actual.iter().enumerate() {
            eprintln!("  {}: {:?}", i, t);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
