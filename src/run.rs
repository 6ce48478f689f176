//! Running parsers on whole texts.
//!
//! A parser on its own is happy to stop in the middle of the text,
//! which is what makes it usable inside larger parsers.
//! The functions here run a parser from the beginning of a text
//! and additionally demand that it consumes all of it;
//! if it stops early, they fail with `Expected end of file`
//! at the place where it stopped.

use crate::{Failure, PResult, ParseError, Parser, State, Success};

/// Run a parser on the whole text with the given initial context.
///
/// On success, the returned state holds the final context.
///
/// ~~~
/// # use statecomb::{string, try_run_parser_with, FailureKind};
/// let out = try_run_parser_with(string("ab"), "ab", 'c').unwrap();
/// assert_eq!((out.value, out.state.context()), ("ab", &'c'));
///
/// let err = try_run_parser_with(string("ab"), "abc", 'c').unwrap_err();
/// assert_eq!(err.kind, FailureKind::TrailingInput);
/// assert_eq!(err.state.rest(), "c");
/// ~~~
pub fn try_run_parser_with<'a, C, P>(parser: P, text: &'a str, context: C) -> PResult<'a, C, P::O>
where
    P: Parser<'a, C>,
{
    let success = parser.parse(State::new(text, context))?;
    if success.state.is_at_end() {
        Ok(success)
    } else {
        Err(Failure::trailing(success.state))
    }
}

/// Run a parser on the whole text without context.
pub fn try_run_parser<'a, P>(parser: P, text: &'a str) -> PResult<'a, (), P::O>
where
    P: Parser<'a, ()>,
{
    try_run_parser_with(parser, text, ())
}

/// Run a parser on the whole text and return its value.
///
/// ~~~
/// # use statecomb::{keyword, run_parser, FailureKind};
/// assert_eq!(run_parser(keyword("if"), "if"), Ok("if"));
///
/// let err = run_parser(keyword("if"), "if\nelse").unwrap_err();
/// assert_eq!(err.kind, FailureKind::TrailingInput);
/// assert_eq!(err.to_string(), "Expected end of file at 1:3");
/// ~~~
pub fn run_parser<'a, P>(parser: P, text: &'a str) -> Result<P::O, ParseError>
where
    P: Parser<'a, ()>,
{
    Ok(try_run_parser(parser, text)?.value)
}

/// Run a parser on the whole text with the given initial context,
/// and return its value together with the final context.
pub fn run_parser_with<'a, C, P>(
    parser: P,
    text: &'a str,
    context: C,
) -> Result<(P::O, C), ParseError>
where
    P: Parser<'a, C>,
{
    let Success { state, value } = try_run_parser_with(parser, text, context)?;
    Ok((value, state.into_context()))
}
