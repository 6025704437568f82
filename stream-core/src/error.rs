// std imports
use std::borrow::Cow;
use std::io;

// third-party imports
use thiserror::Error;

// local imports
use crate::token::Lexeme;

/// Error is an error which may occur while driving a consumer over a token stream.
#[derive(Error, Debug)]
pub enum Error {
    /// Something was still required when input ended or a token was rejected.
    #[error("expected {0}")]
    Expected(Cow<'static, str>),
    #[error("expected {expected}, got {got}")]
    Mismatch { expected: Lexeme, got: Lexeme },
    #[error("trailing input token {0}")]
    TrailingInput(Lexeme),
    #[error("unexpected token {0}")]
    Unexpected(Lexeme),
    #[error(transparent)]
    Source(#[from] ScanError),
    /// A transition error annotated with the token that triggered it.
    #[error("token {token}: {source}")]
    Token {
        token: Lexeme,
        #[source]
        source: Box<Error>,
    },
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Returns a new Expected error with the given description.
    pub fn expected(what: impl Into<Cow<'static, str>>) -> Self {
        Self::Expected(what.into())
    }

    /// Wraps the error with the token that caused it.
    pub fn at(self, token: &[u8]) -> Self {
        Self::Token {
            token: Lexeme::new(token),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through token annotations.
    pub fn root(&self) -> &Error {
        match self {
            Self::Token { source, .. } => source.root(),
            _ => self,
        }
    }

    /// Returns the token the error was reported at, if any.
    pub fn token(&self) -> Option<&Lexeme> {
        match self {
            Self::Token { token, .. } => Some(token),
            _ => None,
        }
    }
}

/// ScanError is an error which may occur while reading tokens from a source.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("split rule failed: {0}")]
    Split(#[source] io::Error),
    #[error("token too long, limit is {limit} bytes")]
    TokenTooLong { limit: usize },
    #[error("split rule advanced {advance} bytes with only {available} available")]
    AdvanceTooFar { advance: usize, available: usize },
    #[error("too many empty tokens or reads without progressing")]
    NoProgress,
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;
