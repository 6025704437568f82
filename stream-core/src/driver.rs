//! The driver: feeds tokens from a source into the current consumer.
//!
//! # Step
//!
//! ```text
//!   must_advance? ──yes──▶ source.advance() ──exhausted──▶ consumer.finalize()
//!        │no                     │token
//!        ▼                       ▼
//!   consumer.transition(token) ──▶ (next, consumed) | error
//!        │
//!        └── must_advance = consumed; continue with next, stop when None
//! ```
//!
//! A token that was not consumed stays current in the source and is handed
//! to the next consumer without advancing.

use log::{debug, trace};

use crate::consumer::{Consumer, Transition};
use crate::error::{Result, ScanError};

/// A pull-based token source.
pub trait Source {
    /// Move to the next token. Returns `false` once input is exhausted.
    fn advance(&mut self) -> std::result::Result<bool, ScanError>;

    /// The current token, valid until the next call to `advance`.
    fn token(&self) -> &[u8];
}

impl<S: Source + ?Sized> Source for &mut S {
    #[inline]
    fn advance(&mut self) -> std::result::Result<bool, ScanError> {
        (**self).advance()
    }

    #[inline]
    fn token(&self) -> &[u8] {
        (**self).token()
    }
}

/// A source over tokens that are already in memory.
#[derive(Debug, Clone)]
pub struct IterSource<I: Iterator> {
    iter: I,
    current: Option<I::Item>,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: tokens.into_iter(),
            current: None,
        }
    }
}

impl<I> Source for IterSource<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    fn advance(&mut self) -> std::result::Result<bool, ScanError> {
        self.current = self.iter.next();
        Ok(self.current.is_some())
    }

    fn token(&self) -> &[u8] {
        match &self.current {
            Some(token) => token.as_ref(),
            None => &[],
        }
    }
}

/// Runs consumers against a token source.
#[derive(Debug)]
pub struct Driver<S> {
    source: S,
    // true iff the source must advance before the current token is read
    must_advance: bool,
}

impl<S: Source> Driver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            must_advance: true,
        }
    }

    /// Perform one step. Returns the next consumer, or `None` when the run
    /// has ended successfully (the consumer completed, or input ran out at a
    /// valid stopping point).
    pub fn step(&mut self, consumer: Consumer) -> Result<Option<Consumer>> {
        trace!("enter {:?}", consumer);
        if self.must_advance && !self.source.advance()? {
            trace!("end of input");
            consumer.finalize()?;
            return Ok(None);
        }
        let token = self.source.token();
        let result = consumer.transition(token);
        match result {
            Ok(Transition { next, consumed }) => {
                trace!("token {:?}; consumed {}", String::from_utf8_lossy(token), consumed);
                self.must_advance = consumed;
                trace!("leave {:?}", next);
                Ok(next)
            }
            Err(err) => Err(err.at(token)),
        }
    }

    /// Step until the consumer completes or fails.
    pub fn run(&mut self, mut consumer: Consumer) -> Result<()> {
        loop {
            match self.step(consumer) {
                Ok(Some(next)) => consumer = next,
                Ok(None) => {
                    debug!("run completed");
                    return Ok(());
                }
                Err(err) => {
                    debug!("run failed: {}", err);
                    return Err(err);
                }
            }
        }
    }

    /// Check if the next step will read a new token from the source.
    #[inline]
    pub fn must_advance(&self) -> bool {
        self.must_advance
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

/// Run `consumer` to completion against `source`.
pub fn run<S: Source>(source: S, consumer: Consumer) -> Result<()> {
    Driver::new(source).run(consumer)
}
