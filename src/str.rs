//! Parsers for text.
//!
//! All of these are specialisations of [`when`]:
//! each one inspects the state and decides how many bytes to consume.
//! Character classes follow the Unicode-aware predicates of [`char`]:
//! [`char::is_whitespace`] for whitespace and
//! [`char::is_alphanumeric`] for letters and digits.

use crate::{when, Combinator, Parser, State};

/// Consume exactly `s`.
///
/// The comparison is case-sensitive and byte-for-byte.
/// On success, yields `s`; otherwise, fails with `Expected "<s>"`.
///
/// ~~~
/// # use statecomb::{string, run_parser};
/// assert_eq!(run_parser(string("abc"), "abc"), Ok("abc"));
/// assert_eq!(
///     run_parser(string("abc"), "abd").unwrap_err().message,
///     "Expected \"abc\"",
/// );
/// ~~~
pub fn string<'a, C>(s: &'a str) -> impl Parser<'a, C, O = &'a str> + Clone {
    let predicate = move |state: &State<'a, C>| state.rest().starts_with(s).then_some(s.len());
    when(predicate, format!("Expected \"{}\"", s)).map(move |()| s)
}

/// Succeed without consuming anything if the cursor is at a word boundary.
///
/// That is the case at the start and at the end of the text,
/// and between two characters of which exactly one is a letter or digit.
pub fn word_boundary<'a, C>() -> impl Parser<'a, C, O = ()> + Clone {
    let predicate = |state: &State<'a, C>| match (state.prev(), state.peek()) {
        (Some(prev), Some(next)) => {
            let changes = prev.is_alphanumeric() != next.is_alphanumeric();
            changes.then_some(0)
        }
        _ => Some(0),
    };
    when(predicate, "Expected word boundary")
}

/// Consume as much whitespace as possible.
///
/// This never fails: when there is no whitespace at the cursor,
/// it succeeds without consuming anything.
pub fn whitespace<'a, C>() -> impl Parser<'a, C, O = ()> + Clone {
    let predicate = |state: &State<'a, C>| {
        let len: usize = state
            .rest()
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        Some(len)
    };
    when(predicate, "Expected whitespace")
}

/// Consume a single whitespace character.
pub fn whitespace_char<'a, C>() -> impl Parser<'a, C, O = ()> + Clone {
    let predicate = |state: &State<'a, C>| {
        state
            .peek()
            .filter(|c| c.is_whitespace())
            .map(char::len_utf8)
    };
    when(predicate, "Expected whitespace")
}

/// Consume a character satisfying `initial`, followed by
/// as many characters satisfying `rest` as possible.
///
/// Yields the consumed part of the text.
/// Fails with `Expected character` at the end of the text or
/// when `initial` does not hold for the character at the cursor.
///
/// ~~~
/// # use statecomb::{many_char1, Parser, State};
/// let ident = many_char1(|c| c == '_' || c.is_alphabetic(), |c| c == '_' || c.is_alphanumeric());
/// let out = ident.parse(State::new("_x1 + 2", ())).unwrap();
/// assert_eq!((out.value, out.state.rest()), ("_x1", " + 2"));
/// assert!(ident.parse(State::new("1x", ())).is_err());
/// ~~~
pub fn many_char1<'a, C, I, R>(initial: I, rest: R) -> impl Parser<'a, C, O = &'a str> + Clone
where
    I: Fn(char) -> bool + Clone,
    R: Fn(char) -> bool + Clone,
{
    let predicate = move |state: &State<'a, C>| {
        let mut chars = state.rest().chars();
        let first = chars.next().filter(|c| initial(*c))?;
        let tail: usize = chars.take_while(|c| rest(*c)).map(char::len_utf8).sum();
        Some(first.len_utf8() + tail)
    };
    when(predicate, "Expected character")
        .with_str()
        .map(|((), s)| s)
}

/// Consume one or more characters satisfying `pred`.
///
/// Unlike [`many`](crate::many), this fails when not even one character matches.
/// It is [`many_char1`] with the same predicate for all characters.
pub fn many_char<'a, C, F>(pred: F) -> impl Parser<'a, C, O = &'a str> + Clone
where
    F: Fn(char) -> bool + Clone,
{
    many_char1(pred.clone(), pred)
}

/// Consume a letter followed by letters and digits.
pub fn identifier<'a, C>() -> impl Parser<'a, C, O = &'a str> + Clone {
    many_char1(char::is_alphabetic, char::is_alphanumeric).label("Expected identifier")
}

/// Consume exactly `s`, which must not be followed by
/// another letter or digit if it ends with one.
///
/// ~~~
/// # use statecomb::{keyword, Parser, State};
/// assert!(keyword("if").parse(State::new("if x", ())).is_ok());
/// assert!(keyword("if").parse(State::new("if", ())).is_ok());
/// assert!(keyword("if").parse(State::new("ifx", ())).is_err());
/// ~~~
pub fn keyword<'a, C>(s: &'a str) -> impl Parser<'a, C, O = &'a str> + Clone {
    string(s).then_ignore(word_boundary())
}

/// Run `p`, then consume any whitespace following it.
pub fn spaces<'a, C, P>(p: P) -> impl Parser<'a, C, O = P::O> + Clone
where
    P: Parser<'a, C> + Clone,
{
    p.then_ignore(whitespace())
}

/// [`string`] followed by optional whitespace.
pub fn string_spaces<'a, C>(s: &'a str) -> impl Parser<'a, C, O = &'a str> + Clone {
    spaces(string(s))
}

/// [`keyword`] followed by optional whitespace.
pub fn keyword_spaces<'a, C>(s: &'a str) -> impl Parser<'a, C, O = &'a str> + Clone {
    spaces(keyword(s))
}

/// [`identifier`] followed by optional whitespace.
pub fn identifier_spaces<'a, C>() -> impl Parser<'a, C, O = &'a str> + Clone {
    spaces(identifier())
}
