//! Parse failures.
//!
//! Failures travel through the `Err` side of [`PResult`](crate::PResult)
//! as [`Failure`] values, which keep the state at which parsing stopped.
//! Once a run is over, [`ParseError`] is the owned error handed to callers.

use core::fmt;
use std::borrow::Cow;

use crate::state::{Position, State};

/// Why a parser failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A primitive did not match at the cursor, or [`fail`](crate::fail) was reached.
    Mismatch,
    /// Every branch of an [`any`](crate::any) failed.
    ExhaustedAlternatives,
    /// The parser succeeded without consuming the whole text.
    TrailingInput,
}

/// A parser failure, together with the state at which it was detected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure<'a, C> {
    pub kind: FailureKind,
    pub message: Cow<'static, str>,
    pub state: State<'a, C>,
}

impl<'a, C> Failure<'a, C> {
    pub fn new(message: impl Into<Cow<'static, str>>, state: State<'a, C>) -> Self {
        Self {
            kind: FailureKind::Mismatch,
            message: message.into(),
            state,
        }
    }

    /// Combine the messages of all failed alternatives, one per line.
    pub(crate) fn exhausted(messages: Vec<Cow<'static, str>>, state: State<'a, C>) -> Self {
        Self {
            kind: FailureKind::ExhaustedAlternatives,
            message: Cow::Owned(messages.join("\n")),
            state,
        }
    }

    pub(crate) fn trailing(state: State<'a, C>) -> Self {
        Self {
            kind: FailureKind::TrailingInput,
            message: Cow::Borrowed("Expected end of file"),
            state,
        }
    }

    pub fn position(&self) -> Position {
        self.state.position()
    }
}

impl<C> fmt::Display for Failure<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position())
    }
}

/// Failure of a complete run, detached from the source text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {position}")]
pub struct ParseError {
    pub kind: FailureKind,
    pub message: String,
    pub position: Position,
}

impl<C> From<Failure<'_, C>> for ParseError {
    fn from(failure: Failure<'_, C>) -> Self {
        Self {
            kind: failure.kind,
            position: failure.position(),
            message: failure.message.into_owned(),
        }
    }
}
