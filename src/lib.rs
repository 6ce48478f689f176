//! Parser combinators over text that thread a user context through every step.
//!
//! A parser takes a [`State`], consisting of the source text, a cursor,
//! and a context value of your choosing, and either succeeds with a value and
//! a new state, or fails with a message and the state where it got stuck.
//! Larger parsers are built from smaller ones with the functions in this crate
//! and the methods of the [`Combinator`] trait.
//!
//! ~~~
//! use statecomb::{keyword, run_parser, whitespace, Combinator};
//!
//! let greeting = || keyword("hello").then_ignore(whitespace()).then(keyword("world"));
//! assert_eq!(run_parser(greeting(), "hello  world"), Ok(("hello", "world")));
//! assert!(run_parser(greeting(), "hello worldwide").is_err());
//! ~~~
//!
//! # Contexts
//!
//! The context is carried *by value*:
//! a parser that wants to record something, say a declared name,
//! returns a state whose context has been replaced by [`modify_state`].
//! When an alternative fails, its context changes disappear with it,
//! because [`any`] restarts every branch from the original state.
//! Persistent collections (such as those of the `im` crate)
//! make such contexts cheap to copy.
//!
//! ~~~
//! use statecomb::{identifier, keyword_spaces, run_parser_with, string, Combinator};
//!
//! let decl = || {
//!     let name = identifier().modify_state(|mut names: Vec<String>, name: &&str| {
//!         names.push(name.to_string());
//!         names
//!     });
//!     keyword_spaces("let").ignore_then(name).then_ignore(string(";"))
//! };
//! let (name, names) = run_parser_with(decl(), "let x;", Vec::new()).unwrap();
//! assert_eq!(name, "x");
//! assert_eq!(names, ["x"]);
//! ~~~
#![forbid(unsafe_code)]

pub mod combinator;
pub mod error;
pub mod primitive;
pub mod run;
pub mod state;
pub mod str;

#[doc(inline)]
pub use combinator::{
    all, any, between, bind, combine_left, combine_right, combine_with, many, many1, modify_state,
    Combinator,
};
pub use error::{Failure, FailureKind, ParseError};
pub use primitive::{context, end, fail, succeed, when};
pub use run::{run_parser, run_parser_with, try_run_parser, try_run_parser_with};
pub use state::{PResult, Position, State, Success};
pub use str::{
    identifier, identifier_spaces, keyword, keyword_spaces, many_char, many_char1, spaces, string,
    string_spaces, whitespace, whitespace_char, word_boundary,
};

/// A parser reads from a state and yields a value of type [`Self::O`].
///
/// `'a` is the lifetime of the source text and `C` the type of the context.
///
/// Parsing takes `&self`, so the same parser can be run any number of times,
/// including concurrently from several threads when it is [`Sync`].
/// All of its configuration is fixed when it is constructed;
/// the only thing that changes from run to run is the state passed in.
///
/// Expected failures are never signalled by panicking,
/// but by returning [`Err`] with a [`Failure`].
pub trait Parser<'a, C> {
    type O;

    /// Parse a value of type [`Self::O`].
    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O>;
}

impl<'a, C, P: Parser<'a, C> + ?Sized> Parser<'a, C> for &P {
    type O = P::O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        (**self).parse(state)
    }
}

/// Construct a parser from a function.
///
/// This is the way to write a parser from scratch when
/// no combination of existing parsers fits.
///
/// ~~~
/// # use statecomb::{from_fn, Failure, Parser, State, Success};
/// // consume one ASCII digit and yield its value
/// let digit = from_fn(|state| match state.peek().and_then(|c| c.to_digit(10)) {
///     Some(d) => Ok(Success::new(state.advance(1), d)),
///     None => Err(Failure::new("Expected digit", state)),
/// });
/// let out = digit.parse(State::new("7up", ())).unwrap();
/// assert_eq!((out.value, out.state.rest()), (7, "up"));
/// ~~~
pub fn from_fn<'a, C, O, F>(f: F) -> FromFn<F>
where
    F: Fn(State<'a, C>) -> PResult<'a, C, O>,
{
    FromFn(f)
}

/// A parser that calls its function `F` on the state.
///
/// This is returned by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<'a, C, O, F> Parser<'a, C> for FromFn<F>
where
    F: Fn(State<'a, C>) -> PResult<'a, C, O>,
{
    type O = O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        (self.0)(state)
    }
}

/// Construct a parser from a function only when it is run.
///
/// The main use is to define recursive grammars.
/// A grammar function cannot simply call itself,
/// because its return type would then contain itself.
/// `lazy!(f)` hides the type of `f()` behind a closure:
///
/// ~~~
/// # use statecomb::{any, lazy, run_parser, string, Combinator, Parser};
/// // balanced parentheses, yielding the nesting depth
/// fn depth<'a>() -> impl Parser<'a, (), O = usize> {
///     any((lazy!(parens), string("").map(|_| 0)))
/// }
///
/// fn parens<'a>() -> impl Parser<'a, (), O = usize> {
///     lazy!(depth).delimited_by(string("("), string(")")).map(|d| d + 1)
/// }
///
/// assert_eq!(run_parser(depth(), "((()))"), Ok(3));
/// assert!(run_parser(depth(), "(()").is_err());
/// ~~~
///
/// As a side effect, `lazy!` also keeps the types of large grammars small,
/// which helps compile times.
#[macro_export]
macro_rules! lazy {
    ($p:expr) => {
        $crate::from_fn(move |state| $crate::Parser::parse(&$p(), state))
    };
}

/// Construct a parser from a function only when it is run.
///
/// Unlike [`lazy!`], this cannot be used for recursion,
/// because the type of the constructed parser appears in [`Lazy`].
pub fn lazy<'a, C, P: Parser<'a, C>, F: Fn() -> P>(f: F) -> Lazy<F> {
    Lazy(f)
}

/// A parser constructed on every run.
///
/// This is returned by [`lazy()`].
#[derive(Clone)]
pub struct Lazy<F>(F);

impl<'a, C, P: Parser<'a, C>, F: Fn() -> P> Parser<'a, C> for Lazy<F> {
    type O = P::O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        (self.0)().parse(state)
    }
}
