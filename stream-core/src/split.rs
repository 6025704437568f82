//! Split rules: how a byte stream is cut into tokens.
//!
//! A split rule looks at the unconsumed part of the scanner's buffer and
//! decides how far to advance and which token (if any) to emit:
//!
//! ```text
//! data = b"  (ab cd)"         at_eof = false
//!          ^^^                advance 3, token "("
//! data = b"ab cd)"
//!          ^^^                advance 3, token "ab"
//! data = b"cd"                at_eof = false
//!                             advance 0, no token: need more data
//! ```
//!
//! Rules are plain functions (anything `FnMut(&[u8], bool) -> io::Result<Split>`)
//! or types implementing [`Splitter`]. Context-sensitive rules implement
//! [`SplitState`], which returns the next state explicitly on every call,
//! and are adapted with [`Stateful`].

use std::io;

/// Decision of a split rule for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Number of bytes of input to consume.
    pub advance: usize,
    /// Token to deliver, if one is complete.
    pub token: Option<&'a [u8]>,
    /// Stop scanning after this token.
    pub last: bool,
}

impl<'a> Split<'a> {
    /// Nothing to emit yet; ask for more data.
    #[inline]
    pub fn more() -> Self {
        Self::skip(0)
    }

    /// Drop `advance` bytes without emitting a token.
    #[inline]
    pub fn skip(advance: usize) -> Self {
        Self {
            advance,
            token: None,
            last: false,
        }
    }

    /// Consume `advance` bytes and emit `token`.
    #[inline]
    pub fn token(advance: usize, token: &'a [u8]) -> Self {
        Self {
            advance,
            token: Some(token),
            last: false,
        }
    }

    /// Emit `token` and end the stream after it.
    #[inline]
    pub fn last(advance: usize, token: &'a [u8]) -> Self {
        Self {
            advance,
            token: Some(token),
            last: true,
        }
    }
}

/// A split rule.
pub trait Splitter {
    /// Split the unconsumed `data`. `at_eof` is true when no more input will
    /// arrive; `data` may then be empty.
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> io::Result<Split<'a>>;
}

impl<F> Splitter for F
where
    F: for<'a> FnMut(&'a [u8], bool) -> io::Result<Split<'a>>,
{
    #[inline]
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> io::Result<Split<'a>> {
        self(data, at_eof)
    }
}

/// A split rule whose behavior depends on a state carried across calls.
///
/// The state is consumed by every call and returned anew, even when the
/// call fails.
pub trait SplitState: Sized {
    fn next<'a>(self, data: &'a [u8], at_eof: bool) -> (Self, io::Result<Split<'a>>);
}

/// Adapts a [`SplitState`] into a [`Splitter`].
#[derive(Debug, Clone)]
pub struct Stateful<S> {
    state: Option<S>,
}

impl<S: SplitState> Stateful<S> {
    pub fn new(initial: S) -> Self {
        Self { state: Some(initial) }
    }

    /// The current state.
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }
}

impl<S: SplitState> Splitter for Stateful<S> {
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> io::Result<Split<'a>> {
        let Some(state) = self.state.take() else {
            return Err(io::Error::other("split state lost"));
        };
        let (state, result) = state.next(data, at_eof);
        self.state = Some(state);
        result
    }
}

/// Tokens separated by a single delimiter byte. The delimiter is dropped and
/// a final unterminated token is emitted at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimited(pub u8);

impl Splitter for Delimited {
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> io::Result<Split<'a>> {
        if let Some(i) = memchr::memchr(self.0, data) {
            return Ok(Split::token(i + 1, &data[..i]));
        }
        if at_eof && !data.is_empty() {
            return Ok(Split::token(data.len(), data));
        }
        Ok(Split::more())
    }
}

/// Every byte is a token.
pub fn bytes(data: &[u8], _at_eof: bool) -> io::Result<Split<'_>> {
    if data.is_empty() {
        return Ok(Split::more());
    }
    Ok(Split::token(1, &data[..1]))
}

/// Every UTF-8 encoded character is a token. Bytes that do not start a
/// valid encoding are emitted one at a time.
pub fn runes(data: &[u8], at_eof: bool) -> io::Result<Split<'_>> {
    let Some(&first) = data.first() else {
        return Ok(Split::more());
    };
    let width = utf8_width(first);
    if width <= 1 {
        return Ok(Split::token(1, &data[..1]));
    }
    if data.len() < width {
        if at_eof {
            return Ok(Split::token(1, &data[..1]));
        }
        return Ok(Split::more());
    }
    match std::str::from_utf8(&data[..width]) {
        Ok(_) => Ok(Split::token(width, &data[..width])),
        Err(_) => Ok(Split::token(1, &data[..1])),
    }
}

/// Every line is a token, without its `\n` or `\r\n` terminator. The last
/// line may be unterminated; an empty last line is not a token.
pub fn lines(data: &[u8], at_eof: bool) -> io::Result<Split<'_>> {
    if let Some(i) = memchr::memchr(b'\n', data) {
        return Ok(Split::token(i + 1, drop_cr(&data[..i])));
    }
    if at_eof && !data.is_empty() {
        return Ok(Split::token(data.len(), drop_cr(data)));
    }
    Ok(Split::more())
}

/// Runs of non-whitespace bytes are tokens.
pub fn words(data: &[u8], at_eof: bool) -> io::Result<Split<'_>> {
    let Some(start) = data.iter().position(|&b| !is_space(b)) else {
        return Ok(Split::skip(data.len()));
    };
    match data[start..].iter().position(|&b| is_space(b)) {
        Some(len) => Ok(Split::token(start + len + 1, &data[start..start + len])),
        None if at_eof => Ok(Split::token(data.len(), &data[start..])),
        None => Ok(Split::skip(start)),
    }
}

/// S-expression tokens: `(`, `)`, and atoms separated by whitespace or
/// parentheses.
pub fn sexp(data: &[u8], at_eof: bool) -> io::Result<Split<'_>> {
    let Some(start) = data.iter().position(|&b| !is_space(b)) else {
        return Ok(Split::skip(data.len()));
    };
    if is_paren(data[start]) {
        return Ok(Split::token(start + 1, &data[start..start + 1]));
    }
    match data[start..].iter().position(|&b| is_space(b) || is_paren(b)) {
        Some(len) => {
            let end = start + len;
            // a delimiting space goes with the atom, a paren is the next token
            let advance = if is_space(data[end]) { end + 1 } else { end };
            Ok(Split::token(advance, &data[start..end]))
        }
        None if at_eof => Ok(Split::token(data.len(), &data[start..])),
        None => Ok(Split::skip(start)),
    }
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

#[inline]
fn is_paren(b: u8) -> bool {
    b == b'(' || b == b')'
}

#[inline]
fn drop_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[inline]
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}
