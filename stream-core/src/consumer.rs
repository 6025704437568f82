//! Consumers: one state of a token-driven state machine.
//!
//! A consumer receives tokens one at a time and answers with a [`Transition`]:
//! the state to continue with (or none, when it has completed) and whether
//! the token was used up. A token that was not consumed is replayed against
//! whatever state comes next, which is how lookahead works without a
//! backtracking buffer.
//!
//! # Variants
//!
//! ```text
//! Match(lit)          one token equal to lit
//! Eof                 no token at all
//! Skip                any one token
//! SkipWhile(lit)      zero or more tokens equal to lit
//! Sequence[c0..cn]    each element to completion, in order
//! Then(head, tail)    head to completion, then tail
//! Star(inner)         zero or more repetitions of inner
//! Repeat{body,inner}  a Star repetition in progress
//! Custom              any user type implementing Consume
//! ```
//!
//! Transitions take the consumer by value: a step supersedes the state it
//! was given. Sub-grammars that repetition copies (Star templates, sequence
//! elements, literals) are reference counted so that copies stay cheap.

use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::error::{Error, Result};
use crate::token::Lexeme;

/// Outcome of feeding one token to a consumer.
#[derive(Debug, Clone)]
pub struct Transition {
    /// State to continue with, `None` once the consumer has completed.
    pub next: Option<Consumer>,
    /// Whether the token was used up. If not, it is replayed against `next`
    /// (or against whatever follows a completed consumer).
    pub consumed: bool,
}

impl Transition {
    #[inline]
    pub fn new(next: Option<Consumer>, consumed: bool) -> Self {
        Self { next, consumed }
    }

    /// The token completed the consumer and was consumed.
    #[inline]
    pub fn complete() -> Self {
        Self::new(None, true)
    }

    /// The consumer completed without touching the token.
    #[inline]
    pub fn pass() -> Self {
        Self::new(None, false)
    }

    /// The token was consumed, continue with `next`.
    #[inline]
    pub fn advance(next: Consumer) -> Self {
        Self::new(Some(next), true)
    }

    /// Continue with `next` and hand it the same token again.
    #[inline]
    pub fn replay(next: Consumer) -> Self {
        Self::new(Some(next), false)
    }

    /// True if the consumer has completed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }
}

/// Extension point for user-defined grammar states.
///
/// Implementors behave exactly like the built-in variants: `finalize` is
/// called when input runs out while the state is current, `transition` for
/// every token delivered to it. Accumulating states may update their own
/// fields and return themselves via [`Consume::into_consumer`].
///
/// `Clone` is required because a state used inside [`Consumer::Star`] is
/// copied for every repetition.
pub trait Consume: fmt::Debug + Clone + 'static {
    /// Check that this state is a valid place for input to end.
    fn finalize(&self) -> Result<()>;

    /// Feed one token.
    fn transition(self, token: &[u8]) -> Result<Transition>;

    /// Wrap the state as a [`Consumer`].
    fn into_consumer(self) -> Consumer {
        Consumer::Custom(Extension(Box::new(self)))
    }
}

// Object-safe mirror of Consume, implemented for every Consume type.
trait DynConsume: fmt::Debug {
    fn finalize(&self) -> Result<()>;
    fn transition(self: Box<Self>, token: &[u8]) -> Result<Transition>;
    fn clone_box(&self) -> Box<dyn DynConsume>;
}

impl<C: Consume> DynConsume for C {
    fn finalize(&self) -> Result<()> {
        Consume::finalize(self)
    }

    fn transition(self: Box<Self>, token: &[u8]) -> Result<Transition> {
        Consume::transition(*self, token)
    }

    fn clone_box(&self) -> Box<dyn DynConsume> {
        Box::new(self.clone())
    }
}

/// A boxed user-defined state.
pub struct Extension(Box<dyn DynConsume>);

impl Clone for Extension {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// The elements of a sequence that have not completed yet.
///
/// Elements are shared with every copy of the sequence; advancing only moves
/// the start position.
#[derive(Clone)]
pub struct Sequence {
    items: Rc<[Consumer]>,
    pos: usize,
}

impl Sequence {
    /// Build a sequence, flattening directly nested sequences.
    pub fn new(items: impl IntoIterator<Item = Consumer>) -> Self {
        let mut flat = Vec::new();
        for item in items {
            match item {
                Consumer::Sequence(inner) => flat.extend_from_slice(inner.remaining()),
                other => flat.push(other),
            }
        }
        Self {
            items: flat.into(),
            pos: 0,
        }
    }

    /// Elements still to run, in order.
    #[inline]
    pub fn remaining(&self) -> &[Consumer] {
        &self.items[self.pos..]
    }

    /// Check if every element has completed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.items.len()
    }

    // Everything after the head, collapsed to the simplest consumer.
    fn tail(&self) -> Option<Consumer> {
        match self.remaining() {
            [] | [_] => None,
            [_, last] => Some(last.clone()),
            _ => Some(Consumer::Sequence(Self {
                items: Rc::clone(&self.items),
                pos: self.pos + 1,
            })),
        }
    }

    fn finalize(&self) -> Result<()> {
        self.remaining().iter().try_for_each(Consumer::finalize)
    }

    fn transition(self, token: &[u8]) -> Result<Transition> {
        let Some(head) = self.items.get(self.pos) else {
            return Ok(Transition::pass());
        };
        let Transition { next, consumed } = head.clone().transition(token)?;
        let tail = self.tail();
        let next = match (next, tail) {
            (Some(next), Some(tail)) => Some(Consumer::Then(Box::new(next), Box::new(tail))),
            (Some(next), None) => Some(next),
            (None, tail) => tail,
        };
        Ok(Transition::new(next, consumed))
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.remaining()).finish()
    }
}

/// A grammar state.
///
/// Build consumers with the constructors in [`crate::combinator`] rather
/// than the variants directly; the constructors keep sequences flat and
/// share repetition templates.
#[derive(Debug, Clone)]
pub enum Consumer {
    /// Exactly one token equal to the literal.
    Match(Lexeme),
    /// End of input; any token is trailing input.
    Eof,
    /// Any single token.
    Skip,
    /// Zero or more tokens equal to the literal.
    SkipWhile(Lexeme),
    Sequence(Sequence),
    /// Run the first consumer to completion, then the second.
    Then(Box<Consumer>, Box<Consumer>),
    /// Zero or more repetitions of the template.
    Star(Rc<Consumer>),
    /// A repetition of `inner` in progress.
    ///
    /// Acts as `Then(body, Star(inner))`. `consumed` records whether this
    /// repetition has used up any token yet; a repetition that completes
    /// without consuming anything ends the Star instead of looping.
    Repeat {
        body: Box<Consumer>,
        inner: Rc<Consumer>,
        consumed: bool,
    },
    Custom(Extension),
}

impl Consumer {
    /// Called once when input is exhausted while this consumer is current.
    pub fn finalize(&self) -> Result<()> {
        match self {
            Self::Match(lit) => Err(Error::expected(lit.to_string())),
            Self::Eof | Self::SkipWhile(_) | Self::Star(_) => Ok(()),
            Self::Skip => Err(Error::expected("a token")),
            Self::Sequence(seq) => seq.finalize(),
            Self::Then(head, tail) => {
                head.finalize()?;
                tail.finalize()
            }
            Self::Repeat { body, .. } => body.finalize(),
            Self::Custom(ext) => ext.0.finalize(),
        }
    }

    /// Feed one token.
    pub fn transition(self, token: &[u8]) -> Result<Transition> {
        match self {
            Self::Match(lit) => {
                if lit == *token {
                    Ok(Transition::complete())
                } else {
                    Err(Error::Mismatch {
                        expected: lit,
                        got: Lexeme::new(token),
                    })
                }
            }
            Self::Eof => Err(Error::TrailingInput(Lexeme::new(token))),
            Self::Skip => Ok(Transition::complete()),
            Self::SkipWhile(lit) => {
                if lit == *token {
                    Ok(Transition::advance(Self::SkipWhile(lit)))
                } else {
                    Ok(Transition::pass())
                }
            }
            Self::Sequence(seq) => seq.transition(token),
            Self::Then(head, tail) => {
                let Transition { next, consumed } = (*head).transition(token)?;
                let next = match next {
                    Some(head) => Self::Then(Box::new(head), tail),
                    None => *tail,
                };
                Ok(Transition::new(Some(next), consumed))
            }
            Self::Star(inner) => match (*inner).clone().transition(token) {
                Err(err) => {
                    trace!("repetition ended: {}", err);
                    Ok(Transition::pass())
                }
                Ok(Transition { next: Some(body), consumed }) => Ok(Transition::new(
                    Some(Self::Repeat {
                        body: Box::new(body),
                        inner,
                        consumed,
                    }),
                    consumed,
                )),
                Ok(Transition { next: None, consumed: true }) => Ok(Transition::advance(Self::Star(inner))),
                Ok(Transition { next: None, consumed: false }) => Ok(Transition::pass()),
            },
            Self::Repeat {
                body,
                inner,
                consumed: progressed,
            } => {
                let Transition { next, consumed } = (*body).transition(token)?;
                let progressed = progressed || consumed;
                Ok(match next {
                    Some(body) => Transition::new(
                        Some(Self::Repeat {
                            body: Box::new(body),
                            inner,
                            consumed: progressed,
                        }),
                        consumed,
                    ),
                    None if progressed => Transition::new(Some(Self::Star(inner)), consumed),
                    None => Transition::pass(),
                })
            }
            Self::Custom(ext) => ext.0.transition(token),
        }
    }
}
