//! Create new parsers by combining existing ones.
//!
//! There are two flavours of combinators in statecomb:
//!
//! * Methods of the [`Combinator`] trait, which every [`Parser`] implements.
//!   These take a fixed number of parsers; for example,
//!   [`Combinator::opt`] takes one parser and
//!   [`Combinator::then`] takes two parsers.
//! * Free functions. Most of them are another spelling of a method
//!   ([`combine_left`] is [`Combinator::then_ignore`], for example),
//!   while [`any`] and [`all`] take tuples, arrays, or vectors of parsers.
//!
//! # Overview
//!
//! Here, `a`, `b`, and `c` are parsers recognising the languages of the same name.
//!
//! | Language             | Parser
//! | :------------------- | :----------------------
//! | `ab`                 | [`a.then(b)`](Combinator::then)
//! | `abc`                | [`all((a, b, c))`](all)
//! | <code>a\|b</code>    | [`a.or(b)`](Combinator::or)
//! | <code>a\|b\|c</code> | [`any((a, b, c))`](any)
//! | `a?`                 | [`a.opt()`](Combinator::opt)
//! | `a*`                 | [`a.many()`](Combinator::many) or [`many(a)`](many)
//! | `a+`                 | [`a.many1()`](Combinator::many1) or [`many1(a)`](many1)
//! | `(a(ba)*)?`          | [`a.separated_by(b)`](Combinator::separated_by)
//!
//! Combinators that throw away results:
//!
//! Parser                                             | Yields
//! :------------------------------------------------- | :-----------------
//! [`a.then_ignore(b)`](Combinator::then_ignore), [`combine_left(a, b)`](combine_left)   | value of `a`
//! [`a.ignore_then(b)`](Combinator::ignore_then), [`combine_right(a, b)`](combine_right) | value of `b`
//! [`b.delimited_by(a, c)`](Combinator::delimited_by), [`between(b, a, c)`](between)     | value of `b`
//!
//! Combinators that work on values and contexts:
//!
//! Parser                                          | Yields
//! :---------------------------------------------- | :-----------------
//! [`a.map(f)`](Combinator::map)                   | `f(x)` for the value `x` of `a`
//! [`a.map_with(f)`](Combinator::map_with)         | `f(x, &ctx)`
//! [`a.then_with(b, f)`](Combinator::then_with)    | `f(x, y)` for the values of `a` and `b`
//! [`a.bind(f)`](Combinator::bind)                 | value of the parser `f(x)`, run after `a`
//! [`a.modify_state(f)`](Combinator::modify_state) | `x`, and replaces the context by `f(ctx, &x)`
//!
//! Whenever a combinator has to try a parser and possibly resume from before it
//! ([`any`], [`many`], [`Combinator::opt`], ...), it keeps a copy of the state,
//! which is why these require `C: Clone`.
use std::borrow::Cow;

use crate::{Failure, PResult, Parser, State, Success};

/// A combinator combines parsers to form new ones.
///
/// Every [`Parser`] implements the [`Combinator`] trait.
/// To use the [`Combinator`] trait, import it as follows:
///
/// ~~~
/// use statecomb::Combinator;
/// ~~~
pub trait Combinator<'a, C>: Parser<'a, C>
where
    Self: Sized,
{
    /// If both parsers succeed one after the other, return the pair of their values.
    ///
    /// `p0.then(p1)` is equivalent to `all((p0, p1))`.
    /// Chaining more than two parsers with `then` yields nested pairs;
    /// in that case, using [`all`] directly is preferable.
    fn then<P: Parser<'a, C>>(self, other: P) -> All<(Self, P)> {
        All((self, other))
    }

    /// If the first parser succeeds, return its result, otherwise
    /// run the second parser on the same state.
    ///
    /// `p0.or(p1)` is equivalent to `any((p0, p1))`.
    fn or<P: Parser<'a, C, O = Self::O>>(self, other: P) -> Any<(Self, P)>
    where
        C: Clone,
    {
        Any((self, other))
    }

    /// Apply a function to the value of the parser.
    fn map<U, F: Fn(Self::O) -> U>(self, f: F) -> Map<Self, F> {
        Map(self, f)
    }

    /// Apply a function to the value of the parser and the context it left behind.
    fn map_with<U, F: Fn(Self::O, &C) -> U>(self, f: F) -> MapWith<Self, F> {
        MapWith(self, f)
    }

    /// Run the parser, make a second parser from its value, and run that.
    ///
    /// This is the monadic bind: it fails as soon as either parser fails.
    fn bind<P: Parser<'a, C>, F: Fn(Self::O) -> P>(self, f: F) -> Bind<Self, F> {
        Bind(self, f)
    }

    /// Run two parsers in sequence and discard the value of the second one.
    fn then_ignore<P: Parser<'a, C>>(self, other: P) -> ThenMap<Self, P, Self::O, P::O, Self::O> {
        self.then(other).map(|(l, _r): (Self::O, P::O)| l)
    }

    /// Run two parsers in sequence and discard the value of the first one.
    fn ignore_then<P: Parser<'a, C>>(self, other: P) -> ThenMap<Self, P, Self::O, P::O, P::O> {
        self.then(other).map(|(_l, r): (Self::O, P::O)| r)
    }

    /// Run two parsers in sequence and merge their values with `f`.
    fn then_with<P, U, F>(self, other: P, f: F) -> ThenWith<Self, P, F>
    where
        P: Parser<'a, C>,
        F: Fn(Self::O, P::O) -> U,
    {
        ThenWith(self, other, f)
    }

    /// Run parsers `l`, `self`, and `r` in sequence and return only the value of `self`.
    fn delimited_by<L, R>(self, l: L, r: R) -> DelimitedBy<L, Self, R, L::O, Self::O, R::O>
    where
        L: Parser<'a, C>,
        R: Parser<'a, C>,
    {
        all((l, self, r)).map(|(_l, m, _r)| m)
    }

    /// Apply the parser as often as possible and collect its values.
    ///
    /// See [`many`].
    fn many(self) -> Many<Self>
    where
        C: Clone,
    {
        Many(self)
    }

    /// Like [`Combinator::many`], but the parser has to succeed at least once.
    fn many1(self) -> Many1<Self>
    where
        C: Clone,
    {
        Many1(self)
    }

    /// Apply the parser as often as possible, separated by `sep`.
    ///
    /// `a.separated_by(b)` corresponds to the regular expression `(a(ba)*)?`.
    /// The values of `b` are discarded.
    /// A trailing `b` that is not followed by an `a` is not consumed.
    fn separated_by<Sep: Parser<'a, C>>(self, sep: Sep) -> SeparatedBy<Self, Sep>
    where
        C: Clone,
    {
        SeparatedBy(self, sep)
    }

    /// If the parser succeeds, wrap its value in `Some`, else return `None`
    /// without consuming anything.
    fn opt(self) -> Opt<Self>
    where
        C: Clone,
    {
        Opt(self)
    }

    /// Run the parser, then replace the context by `f(context, &value)`.
    ///
    /// ~~~
    /// # use statecomb::{identifier, try_run_parser_with, Combinator};
    /// let count = identifier().modify_state(|n: usize, _: &&str| n + 1);
    /// let out = try_run_parser_with(count.many(), "abc", 10).unwrap();
    /// assert_eq!(out.state.context(), &11);
    /// ~~~
    fn modify_state<F: Fn(C, &Self::O) -> C>(self, f: F) -> ModifyState<Self, F> {
        ModifyState(self, f)
    }

    /// Replace the message of any failure of the parser.
    fn label(self, message: impl Into<Cow<'static, str>>) -> Label<Self> {
        Label(self, message.into())
    }

    /// Also return the part of the text that the parser consumed.
    fn with_str(self) -> WithStr<Self> {
        WithStr(self)
    }
}

impl<'a, C, T: Parser<'a, C>> Combinator<'a, C> for T {}

/// Sequence a parser with a parser made from its value.
///
/// This is the free-function form of [`Combinator::bind`].
///
/// ~~~
/// # use statecomb::{bind, identifier, run_parser, string, Combinator};
/// // `x=x` is fine, `x=y` is not
/// let same = || bind(identifier(), |name| string("=").ignore_then(string(name)));
/// assert_eq!(run_parser(same(), "x=x"), Ok("x"));
/// assert!(run_parser(same(), "x=y").is_err());
/// ~~~
pub fn bind<'a, C, P, Q, F>(parser: P, f: F) -> Bind<P, F>
where
    P: Parser<'a, C>,
    Q: Parser<'a, C>,
    F: Fn(P::O) -> Q,
{
    Bind(parser, f)
}

/// Run `l` then `r` and keep the value of `l`.
pub fn combine_left<'a, C, L, R>(l: L, r: R) -> ThenMap<L, R, L::O, R::O, L::O>
where
    L: Parser<'a, C>,
    R: Parser<'a, C>,
{
    l.then_ignore(r)
}

/// Run `l` then `r` and keep the value of `r`.
pub fn combine_right<'a, C, L, R>(l: L, r: R) -> ThenMap<L, R, L::O, R::O, R::O>
where
    L: Parser<'a, C>,
    R: Parser<'a, C>,
{
    l.ignore_then(r)
}

/// Run `l` then `r` and merge their values with `f`.
pub fn combine_with<'a, C, L, R, U, F>(l: L, r: R, f: F) -> ThenWith<L, R, F>
where
    L: Parser<'a, C>,
    R: Parser<'a, C>,
    F: Fn(L::O, R::O) -> U,
{
    l.then_with(r, f)
}

/// Run `left`, `middle`, and `right` in sequence and keep the value of `middle`.
pub fn between<'a, C, M, L, R>(
    middle: M,
    left: L,
    right: R,
) -> DelimitedBy<L, M, R, L::O, M::O, R::O>
where
    M: Parser<'a, C>,
    L: Parser<'a, C>,
    R: Parser<'a, C>,
{
    middle.delimited_by(left, right)
}

/// Run `parser`, then replace the context by `f(context, &value)`.
pub fn modify_state<'a, C, P, F>(parser: P, f: F) -> ModifyState<P, F>
where
    P: Parser<'a, C>,
    F: Fn(C, &P::O) -> C,
{
    parser.modify_state(f)
}

/// A parser returned by [`all`] and [`Combinator::then`].
#[derive(Clone)]
pub struct All<T>(T);

/// Return the values of all given parsers, if they all succeed one after the other.
///
/// This function takes a tuple of parsers,
/// which may all return different types of values.
///
/// ~~~
/// use statecomb::{all, many_char, Parser, State};
/// let digits = || many_char(|c| c.is_ascii_digit());
/// let alpha = || many_char(|c| c.is_ascii_alphabetic());
/// let parser = all((digits(), alpha(), digits()));
/// let out = parser.parse(State::new("123abc456 rest", ())).unwrap();
/// assert_eq!(out.value, ("123", "abc", "456"));
/// assert_eq!(out.state.rest(), " rest");
/// assert!(parser.parse(State::new("???", ())).is_err());
/// ~~~
pub fn all<T>(t: T) -> All<T> {
    All(t)
}

/// A parser returned by [`any`] and [`Combinator::or`].
#[derive(Clone)]
pub struct Any<T>(T);

/// Return the result of the first given parser that succeeds.
///
/// Every alternative is run on the original state, in order,
/// so the first success wins even if a later alternative would consume more.
/// If all alternatives fail, the failure is reported at the original state
/// and its message lists the messages of all alternatives, one per line.
///
/// This function takes a tuple, an array, or a [`Vec`] of parsers,
/// which all have to return the same type of value.
///
/// ~~~
/// use statecomb::{any, string, try_run_parser, FailureKind, Parser, State};
/// let parser = any((string("a"), string("ab")));
/// let out = parser.parse(State::new("ab", ())).unwrap();
/// assert_eq!((out.value, out.state.rest()), ("a", "b"));
///
/// let err = try_run_parser(parser, "c").unwrap_err();
/// assert_eq!(err.kind, FailureKind::ExhaustedAlternatives);
/// assert_eq!(err.message, "Expected \"a\"\nExpected \"ab\"");
/// ~~~
pub fn any<T>(t: T) -> Any<T> {
    Any(t)
}

fn first_success<'a, C: Clone, P: Parser<'a, C>>(
    parsers: &[P],
    state: State<'a, C>,
) -> PResult<'a, C, P::O> {
    let mut messages = Vec::with_capacity(parsers.len());
    for p in parsers {
        match p.parse(state.clone()) {
            Ok(success) => return Ok(success),
            Err(failure) => messages.push(failure.message),
        }
    }
    Err(Failure::exhausted(messages, state))
}

impl<'a, C: Clone, P: Parser<'a, C>, const N: usize> Parser<'a, C> for Any<[P; N]> {
    type O = P::O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        first_success(&self.0, state)
    }
}

impl<'a, C: Clone, P: Parser<'a, C>> Parser<'a, C> for Any<Vec<P>> {
    type O = P::O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        first_success(&self.0, state)
    }
}

/// Generate `impl`s for `Any<(P0, P1, ..., Pn)>` and `All<(P0, P1, ..., Pn)>`.
///
/// `All` threads the state from one parser to the next;
/// `Any` gives every parser a copy of the same state.
macro_rules! impl_all_any {
    ($($acc:ident)+; $head:ident $($tail:ident)*) => {
        impl_all_any!($($acc)+      ;          );
        impl_all_any!($($acc)+ $head; $($tail)*);
    };
    ($($parser:ident)+;) => {
        #[allow(non_snake_case)]
        impl<'a, C, $($parser: Parser<'a, C>),+> Parser<'a, C> for All<($($parser),+,)> {
            type O = ($($parser::O),+,);

            #[inline(always)]
            fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
                let Self(($($parser),+,)) = self;
                $(let Success { state, value: $parser } = $parser.parse(state)?;)+
                Ok(Success::new(state, ($($parser),+,)))
            }
        }

        #[allow(non_snake_case)]
        impl<'a, C: Clone, O, $($parser: Parser<'a, C, O = O>),+> Parser<'a, C> for Any<($($parser),+,)> {
            type O = O;

            #[inline(always)]
            fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
                let Self(($($parser),+,)) = self;
                let mut messages = Vec::new();
                $(match $parser.parse(state.clone()) {
                    Ok(success) => return Ok(success),
                    Err(failure) => messages.push(failure.message),
                })+
                Err(Failure::exhausted(messages, state))
            }
        }
    }
}
impl_all_any!(P1; P2 P3 P4 P5 P6 P7 P8 P9);

/// A parser returned by [`Combinator::map`].
#[derive(Clone)]
pub struct Map<P, F>(P, F);

impl<'a, C, P: Parser<'a, C>, U, F: Fn(P::O) -> U> Parser<'a, C> for Map<P, F> {
    type O = U;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        self.0.parse(state).map(|success| success.map(&self.1))
    }
}

/// A parser returned by [`Combinator::map_with`].
#[derive(Clone)]
pub struct MapWith<P, F>(P, F);

impl<'a, C, P: Parser<'a, C>, U, F: Fn(P::O, &C) -> U> Parser<'a, C> for MapWith<P, F> {
    type O = U;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let Success { state, value } = self.0.parse(state)?;
        let value = (self.1)(value, state.context());
        Ok(Success::new(state, value))
    }
}

/// A parser returned by [`Combinator::bind`] and [`bind`].
#[derive(Clone)]
pub struct Bind<P, F>(P, F);

impl<'a, C, P1, P2, F> Parser<'a, C> for Bind<P1, F>
where
    P1: Parser<'a, C>,
    P2: Parser<'a, C>,
    F: Fn(P1::O) -> P2,
{
    type O = P2::O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let Success { state, value } = self.0.parse(state)?;
        (self.1)(value).parse(state)
    }
}

/// A parser returned by [`Combinator::then_with`] and [`combine_with`].
#[derive(Clone)]
pub struct ThenWith<L, R, F>(L, R, F);

impl<'a, C, L, R, U, F> Parser<'a, C> for ThenWith<L, R, F>
where
    L: Parser<'a, C>,
    R: Parser<'a, C>,
    F: Fn(L::O, R::O) -> U,
{
    type O = U;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let Success { state, value: l } = self.0.parse(state)?;
        let Success { state, value: r } = self.1.parse(state)?;
        Ok(Success::new(state, (self.2)(l, r)))
    }
}

type ThenMap<P1, P2, O1, O2, O> = Map<All<(P1, P2)>, fn((O1, O2)) -> O>;
type DelimitedBy<L, M, R, LO, MO, RO> = Map<All<(L, M, R)>, fn((LO, MO, RO)) -> MO>;

/// A parser returned by [`Combinator::opt`].
#[derive(Clone)]
pub struct Opt<P>(P);

impl<'a, C: Clone, P: Parser<'a, C>> Parser<'a, C> for Opt<P> {
    type O = Option<P::O>;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        Ok(match self.0.parse(state.clone()) {
            Ok(success) => success.map(Some),
            Err(_) => Success::new(state, None),
        })
    }
}

/// Apply a parser as often as possible.
///
/// The parser is retried from where its last success stopped until it fails;
/// the failed attempt is discarded, including any context it produced.
/// There is no backtracking into what was already consumed.
/// `many` itself never fails: zero matches yield an empty vector.
///
/// A success that consumes nothing ends the repetition,
/// because repeating it would yield the same result forever.
///
/// ~~~
/// # use statecomb::{many, many_char, string, Combinator, Parser, State};
/// let digit = || many_char(|c| c.is_ascii_digit()).then_ignore(string(","));
/// let out = many(digit()).parse(State::new("1,22,x", ())).unwrap();
/// assert_eq!((out.value, out.state.rest()), (vec!["1", "22"], "x"));
/// ~~~
pub fn many<P>(p: P) -> Many<P> {
    Many(p)
}

/// Apply a parser as often as possible, but at least once.
///
/// If the first application fails, this fails with the same failure.
pub fn many1<P>(p: P) -> Many1<P> {
    Many1(p)
}

fn repeat<'a, C: Clone, P: Parser<'a, C>>(
    p: &P,
    mut state: State<'a, C>,
    mut values: Vec<P::O>,
) -> Success<'a, C, Vec<P::O>> {
    while let Ok(Success { state: next, value }) = p.parse(state.clone()) {
        let progressed = next.index() != state.index();
        values.push(value);
        state = next;
        if !progressed {
            break;
        }
    }
    Success::new(state, values)
}

/// A parser returned by [`many`] and [`Combinator::many`].
#[derive(Clone)]
pub struct Many<P>(P);

impl<'a, C: Clone, P: Parser<'a, C>> Parser<'a, C> for Many<P> {
    type O = Vec<P::O>;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        Ok(repeat(&self.0, state, Vec::new()))
    }
}

/// A parser returned by [`many1`] and [`Combinator::many1`].
#[derive(Clone)]
pub struct Many1<P>(P);

impl<'a, C: Clone, P: Parser<'a, C>> Parser<'a, C> for Many1<P> {
    type O = Vec<P::O>;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let start = state.index();
        let Success { state, value } = self.0.parse(state)?;
        let values = vec![value];
        if state.index() == start {
            return Ok(Success::new(state, values));
        }
        Ok(repeat(&self.0, state, values))
    }
}

/// A parser returned by [`Combinator::separated_by`].
#[derive(Clone)]
pub struct SeparatedBy<P, Sep>(P, Sep);

impl<'a, C: Clone, P: Parser<'a, C>, Sep: Parser<'a, C>> Parser<'a, C> for SeparatedBy<P, Sep> {
    type O = Vec<P::O>;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let Self(p, sep) = self;
        let (mut state, mut values) = match p.parse(state.clone()) {
            Ok(Success { state, value }) => (state, vec![value]),
            Err(_) => return Ok(Success::new(state, Vec::new())),
        };

        while let Ok(Success { state: rest, .. }) = sep.parse(state.clone()) {
            match p.parse(rest) {
                Ok(Success { state: next, value }) => {
                    values.push(value);
                    state = next;
                }
                Err(_) => break,
            }
        }
        Ok(Success::new(state, values))
    }
}

/// A parser returned by [`Combinator::modify_state`] and [`modify_state`].
#[derive(Clone)]
pub struct ModifyState<P, F>(P, F);

impl<'a, C, P: Parser<'a, C>, F: Fn(C, &P::O) -> C> Parser<'a, C> for ModifyState<P, F> {
    type O = P::O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let Success { state, value } = self.0.parse(state)?;
        let state = state.map_context(|context| (self.1)(context, &value));
        Ok(Success::new(state, value))
    }
}

/// A parser returned by [`Combinator::label`].
#[derive(Clone)]
pub struct Label<P>(P, Cow<'static, str>);

impl<'a, C, P: Parser<'a, C>> Parser<'a, C> for Label<P> {
    type O = P::O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        self.0.parse(state).map_err(|failure| Failure {
            message: self.1.clone(),
            ..failure
        })
    }
}

/// A parser returned by [`Combinator::with_str`].
#[derive(Clone)]
pub struct WithStr<P>(P);

impl<'a, C, P: Parser<'a, C>> Parser<'a, C> for WithStr<P> {
    type O = (P::O, &'a str);

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let (text, start) = (state.text(), state.index());
        let success = self.0.parse(state)?;
        let consumed = text.get(start..success.state.index()).unwrap_or_default();
        Ok(success.map(|value| (value, consumed)))
    }
}
