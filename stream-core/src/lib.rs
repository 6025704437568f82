//! Stream Core
//!
//! Push-style, incremental parsing over a stream of byte tokens. A grammar
//! is a [`Consumer`]: one state of a state machine that takes one token at a
//! time and answers with the next state. A [`Driver`] pulls tokens from a
//! [`Source`] and feeds them in until the consumer completes, fails, or
//! input runs out. No parse tree is built and nothing is backtracked.
//!
//! # Architecture
//!
//! - **consumer.rs** - Consumer sum type, Transition, Consume extension trait
//! - **combinator.rs** - literal, eof, skip, skip_while, seq, then, star, plus
//! - **collect.rs** - token-collecting consumer
//! - **driver.rs** - Source trait, Driver loop, in-memory source
//! - **scanner.rs** - buffered source over `io::Read`
//! - **split.rs** - split rules (plain and stateful) and built-in rules
//! - **error.rs** - Error and ScanError
//! - **token.rs** - Lexeme, an owned token copy
//!
//! # Example
//!
//! ```
//! use stream_core::combinator::{eof, literal, seq, star};
//! use stream_core::{run, split, Scanner};
//!
//! let grammar = seq([
//!     star(seq([literal("a"), literal("b"), star(literal("c"))])),
//!     literal("x"),
//!     eof(),
//! ]);
//! let source = Scanner::new(&b"ababcabccx"[..], split::bytes);
//! assert!(run(source, grammar).is_ok());
//! ```

pub mod collect;
pub mod combinator;
pub mod consumer;
pub mod driver;
pub mod error;
pub mod scanner;
pub mod split;
pub mod token;

pub use collect::{Collect, Collected};
pub use consumer::{Consume, Consumer, Transition};
pub use driver::{run, Driver, IterSource, Source};
pub use error::{Error, Result, ScanError};
pub use scanner::{Limits, Scanner};
pub use split::{Split, SplitState, Splitter, Stateful};
pub use token::Lexeme;
