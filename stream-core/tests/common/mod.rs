//! Test infrastructure for stream-core
//!
//! Provides fixture loading, stochastic read chunking, and the tokenizer harness.

#![allow(dead_code)]

mod generators;
mod harness;
mod loader;

pub use generators::{ChunkedReader, Gen};
pub use harness::{collect_tokens, run_test, run_with_variations, TestResult};
pub use loader::{load_fixtures_by_name, TestCase};

/// Install a test logger; `RUST_LOG=stream_core=trace` shows every driver step.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
