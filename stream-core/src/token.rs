//! Owned token copies.
//!
//! Tokens are delivered to consumers as `&[u8]` borrowed from the source's
//! buffer and are only valid during the call that receives them. Anything
//! that outlives the call (error values, collected output) keeps a `Lexeme`.

use std::fmt;
use std::sync::Arc;

/// An owned, immutable copy of a token.
///
/// Cloning is cheap: the bytes are reference counted, so literals can be
/// shared between the many copies of a grammar that repetition creates.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Lexeme(Arc<[u8]>);

impl Lexeme {
    /// Copy `bytes` into a new lexeme.
    pub fn new(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }

    /// The token bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the token is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq<[u8]> for Lexeme {
    fn eq(&self, other: &[u8]) -> bool {
        *self.0 == *other
    }
}

impl PartialEq<&str> for Lexeme {
    fn eq(&self, other: &&str) -> bool {
        *self.0 == *other.as_bytes()
    }
}

impl AsRef<[u8]> for Lexeme {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Lexeme {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for Lexeme {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<Vec<u8>> for Lexeme {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<String> for Lexeme {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

// Quoted string when the token is UTF-8, raw bytes otherwise.
impl fmt::Debug for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{:?}", s),
            Err(_) => write!(f, "{:?}", &self.0[..]),
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
