//! Buffered token source over any reader.
//!
//! The scanner reads input into a growable buffer and asks its split rule
//! to cut tokens out of the unconsumed part. Tokens are copied out of the
//! buffer before delivery, so a split rule may also return bytes that are
//! not part of the input (e.g. a rewritten token).
//!
//! # Buffer Management
//!
//! ```text
//! buf:  [ consumed | unconsumed  | free ]
//!       0        start          end    len
//! ```
//!
//! When the split rule needs more data, unconsumed bytes are shifted to the
//! front (once at least half the buffer has been consumed, or the buffer is
//! full) and the buffer grows by doubling up to `Limits::max_token_size`.

use std::io::{self, Read};

use log::{debug, trace};

use crate::driver::Source;
use crate::error::ScanError;
use crate::split::{Split, Splitter};

/// Initial buffer size.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Largest token the scanner accepts by default.
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 64 * 1024;

// Consecutive empty tokens without progress before giving up.
const MAX_EMPTY_TOKENS: usize = 100;

/// Buffer limits of a [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Size of the first buffer allocation.
    pub initial_capacity: usize,
    /// Upper bound for the buffer, and therefore for a single token.
    pub max_token_size: usize,
}

impl Limits {
    pub fn new(initial_capacity: usize, max_token_size: usize) -> Self {
        Self {
            initial_capacity,
            max_token_size,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_TOKEN_SIZE)
    }
}

/// Splits a byte stream into tokens.
#[derive(Debug)]
pub struct Scanner<R, S> {
    reader: R,
    splitter: S,
    limits: Limits,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    token: Vec<u8>,
    empties: usize,
    /// Reader has reported end of input
    eof: bool,
    /// No more tokens will be delivered
    done: bool,
}

impl<R: Read, S: Splitter> Scanner<R, S> {
    /// Create a scanner with default limits.
    pub fn new(reader: R, splitter: S) -> Self {
        Self::with_limits(reader, splitter, Limits::default())
    }

    pub fn with_limits(reader: R, splitter: S, limits: Limits) -> Self {
        Self {
            reader,
            splitter,
            limits,
            buf: Vec::new(),
            start: 0,
            end: 0,
            token: Vec::new(),
            empties: 0,
            eof: false,
            done: false,
        }
    }

    /// Move to the next token.
    ///
    /// Returns `Ok(false)` when input is exhausted. After an error or a
    /// final token every further call returns `Ok(false)`.
    pub fn advance(&mut self) -> Result<bool, ScanError> {
        if self.done {
            return Ok(false);
        }
        let result = self.scan();
        if !matches!(result, Ok(true)) {
            self.done = true;
        }
        result
    }

    /// The current token.
    #[inline]
    pub fn token(&self) -> &[u8] {
        &self.token
    }

    pub fn splitter(&self) -> &S {
        &self.splitter
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn scan(&mut self) -> Result<bool, ScanError> {
        loop {
            if self.end > self.start || self.eof {
                let available = self.end - self.start;
                let Split { advance, token, last } = self
                    .splitter
                    .split(&self.buf[self.start..self.end], self.eof)
                    .map_err(ScanError::Split)?;
                if advance > available {
                    return Err(ScanError::AdvanceTooFar { advance, available });
                }
                let produced = match token {
                    Some(token) => {
                        self.token.clear();
                        self.token.extend_from_slice(token);
                        true
                    }
                    None => false,
                };
                self.start += advance;

                if produced {
                    if advance > 0 {
                        self.empties = 0;
                    } else {
                        self.empties += 1;
                        if self.empties > MAX_EMPTY_TOKENS {
                            return Err(ScanError::NoProgress);
                        }
                    }
                    if last {
                        debug!("final token");
                        self.done = true;
                    }
                    return Ok(true);
                }
                if advance > 0 {
                    continue;
                }
                if self.eof {
                    debug!("input exhausted");
                    return Ok(false);
                }
            }
            self.fill()?;
        }
    }

    // Make room in the buffer and read more input.
    fn fill(&mut self) -> Result<(), ScanError> {
        let len = self.buf.len();
        if self.start > 0 && (self.end == len || self.start > len / 2) {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        if self.end == len {
            let max = self.limits.max_token_size;
            if len >= max {
                return Err(ScanError::TokenTooLong { limit: max });
            }
            let grown = if len == 0 {
                self.limits.initial_capacity.max(1)
            } else {
                len * 2
            };
            let grown = grown.min(max);
            trace!("buffer {} -> {} bytes", len, grown);
            self.buf.resize(grown, 0);
        }

        loop {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    trace!("read {} bytes", n);
                    self.end += n;
                    return Ok(());
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ScanError::Io(err)),
            }
        }
    }
}

impl<R: Read, S: Splitter> Source for Scanner<R, S> {
    #[inline]
    fn advance(&mut self) -> Result<bool, ScanError> {
        Scanner::advance(self)
    }

    #[inline]
    fn token(&self) -> &[u8] {
        Scanner::token(self)
    }
}

/// Owned copies of the remaining tokens.
impl<R: Read, S: Splitter> Iterator for Scanner<R, S> {
    type Item = Result<Vec<u8>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        match Scanner::advance(self) {
            Ok(true) => Some(Ok(self.token.clone())),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
