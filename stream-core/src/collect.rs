//! Token collection.

use std::cell::RefCell;
use std::rc::Rc;

use crate::consumer::{Consume, Transition};
use crate::error::Result;

/// Shared output of a [`Collect`] consumer.
///
/// The consumer is moved into the driver and superseded on every step, so
/// collected tokens land here where the caller can still reach them.
#[derive(Debug, Clone, Default)]
pub struct Collected(Rc<RefCell<Vec<Vec<u8>>>>);

impl Collected {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens collected so far.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copy of the tokens collected so far.
    pub fn to_vec(&self) -> Vec<Vec<u8>> {
        self.0.borrow().clone()
    }

    /// Take the collected tokens, leaving the sink empty.
    pub fn take(&self) -> Vec<Vec<u8>> {
        self.0.take()
    }

    /// Collected tokens as (lossy) strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .map(|t| String::from_utf8_lossy(t).into_owned())
            .collect()
    }

    fn push(&self, token: &[u8]) {
        self.0.borrow_mut().push(token.to_vec());
    }
}

/// Copies every token it receives into a [`Collected`] sink.
///
/// Never completes on its own; any point is a valid end of input.
#[derive(Debug, Clone)]
pub struct Collect {
    sink: Collected,
}

impl Collect {
    pub fn new(sink: Collected) -> Self {
        Self { sink }
    }
}

impl Consume for Collect {
    fn finalize(&self) -> Result<()> {
        Ok(())
    }

    fn transition(self, token: &[u8]) -> Result<Transition> {
        self.sink.push(token);
        Ok(Transition::advance(self.into_consumer()))
    }
}
