//! Parse states and successful parse outcomes.

use core::fmt;

use crate::error::Failure;

/// A snapshot of the parser: the whole source text, the cursor, and a user context.
///
/// The text is borrowed once per run and shared by every state derived from it.
/// The context is owned: combinators never mutate it in place,
/// they produce a new state carrying a new context instead
/// (see [`State::with_context`] and [`State::map_context`]).
///
/// The cursor is a byte offset into the text.
/// It always lies on a `char` boundary and never exceeds the text length.
///
/// ~~~
/// # use statecomb::State;
/// let state = State::new("let x", ());
/// assert_eq!(state.index(), 0);
/// let state = state.advance(3);
/// assert_eq!(state.rest(), " x");
/// assert_eq!(state.peek(), Some(' '));
/// assert_eq!(state.prev(), Some('t'));
/// ~~~
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State<'a, C = ()> {
    text: &'a str,
    index: usize,
    context: C,
}

impl<'a, C> State<'a, C> {
    /// Start a parse of `text` at its beginning.
    pub fn new(text: &'a str, context: C) -> Self {
        Self {
            text,
            index: 0,
            context,
        }
    }

    /// The complete source text, independent of the cursor.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// The text that has not been consumed yet.
    pub fn rest(&self) -> &'a str {
        &self.text[self.index..]
    }

    pub fn is_at_end(&self) -> bool {
        self.index == self.text.len()
    }

    /// The character right after the cursor.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character right before the cursor.
    pub fn prev(&self) -> Option<char> {
        self.text[..self.index].chars().next_back()
    }

    /// Move the cursor `len` bytes forward.
    ///
    /// # Panics
    ///
    /// If the cursor would end up past the end of the text or inside a character.
    pub fn advance(self, len: usize) -> Self {
        let index = self.index + len;
        assert!(
            self.text.is_char_boundary(index),
            "cannot advance to byte {index}: not a char boundary of the text"
        );
        Self { index, ..self }
    }

    /// Replace the context.
    pub fn with_context<D>(self, context: D) -> State<'a, D> {
        State {
            text: self.text,
            index: self.index,
            context,
        }
    }

    /// Replace the context by a function of the old one.
    pub fn map_context<D>(self, f: impl FnOnce(C) -> D) -> State<'a, D> {
        State {
            text: self.text,
            index: self.index,
            context: f(self.context),
        }
    }

    /// Line and column of the cursor.
    pub fn position(&self) -> Position {
        Position::locate(self.text, self.index)
    }
}

/// Human-oriented location of a byte offset in a text.
///
/// Lines and columns start at 1; columns count characters, not bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    fn locate(text: &str, offset: usize) -> Self {
        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Output of a successful parser: its value and the state to resume from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Success<'a, C, T> {
    pub state: State<'a, C>,
    pub value: T,
}

impl<'a, C, T> Success<'a, C, T> {
    pub fn new(state: State<'a, C>, value: T) -> Self {
        Self { state, value }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Success<'a, C, U> {
        Success {
            state: self.state,
            value: f(self.value),
        }
    }
}

/// What every parser returns.
pub type PResult<'a, C, T> = Result<Success<'a, C, T>, Failure<'a, C>>;
