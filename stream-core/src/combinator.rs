//! Constructors for composing consumers.
//!
//! ```
//! use stream_core::combinator::{eof, literal, seq, star};
//!
//! // (ab c*)* x <end>
//! let grammar = seq([
//!     star(seq([literal("a"), literal("b"), star(literal("c"))])),
//!     literal("x"),
//!     eof(),
//! ]);
//! ```

use std::rc::Rc;

use crate::consumer::{Consumer, Sequence};
use crate::token::Lexeme;

/// One token equal to `lit`.
pub fn literal(lit: impl Into<Lexeme>) -> Consumer {
    Consumer::Match(lit.into())
}

/// Asserts that no input remains.
#[inline]
pub fn eof() -> Consumer {
    Consumer::Eof
}

/// Any single token.
#[inline]
pub fn skip() -> Consumer {
    Consumer::Skip
}

/// Zero or more tokens equal to `lit`.
pub fn skip_while(lit: impl Into<Lexeme>) -> Consumer {
    Consumer::SkipWhile(lit.into())
}

/// Each item to completion, in order.
pub fn seq(items: impl IntoIterator<Item = Consumer>) -> Consumer {
    Consumer::Sequence(Sequence::new(items))
}

/// `head` to completion, then `tail`.
pub fn then(head: Consumer, tail: Consumer) -> Consumer {
    Consumer::Then(Box::new(head), Box::new(tail))
}

/// Zero or more repetitions of `inner`.
///
/// Never fails: a repetition whose first token `inner` rejects ends the
/// loop, and that token is left for whatever follows. Once a repetition is
/// underway its errors propagate as usual.
pub fn star(inner: Consumer) -> Consumer {
    Consumer::Star(Rc::new(inner))
}

/// One or more repetitions of `inner`.
pub fn plus(inner: Consumer) -> Consumer {
    seq([inner.clone(), star(inner)])
}
