//! Parsers that do not wrap other parsers.
//!
//! [`when`] is the only parser in the crate that moves the cursor;
//! all text parsers in [`crate::str`] are built on top of it.

use core::fmt;
use core::marker::PhantomData;
use std::borrow::Cow;

use crate::{Failure, PResult, Parser, State, Success};

/// Yield a constant value without consuming anything.
///
/// This is the `return` of the parser monad:
/// [`bind`](crate::bind)`(succeed(v), f)` behaves like `f(v)`,
/// and `bind(p, succeed)` behaves like `p`.
pub fn succeed<T: Clone>(value: T) -> Succeed<T> {
    Succeed(value)
}

/// A parser returned by [`succeed`].
#[derive(Clone, Debug)]
pub struct Succeed<T>(T);

impl<'a, C, T: Clone> Parser<'a, C> for Succeed<T> {
    type O = T;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        Ok(Success::new(state, self.0.clone()))
    }
}

/// Fail with the given message without consuming anything.
///
/// ~~~
/// # use statecomb::{fail, try_run_parser};
/// let err = try_run_parser(fail::<()>("no way"), "text").unwrap_err();
/// assert_eq!(err.message, "no way");
/// assert_eq!(err.state.index(), 0);
/// ~~~
pub fn fail<O>(message: impl Into<Cow<'static, str>>) -> Fail<O> {
    Fail(message.into(), PhantomData)
}

/// A parser returned by [`fail`].
pub struct Fail<O>(Cow<'static, str>, PhantomData<fn() -> O>);

impl<O> Clone for Fail<O> {
    fn clone(&self) -> Self {
        Fail(self.0.clone(), PhantomData)
    }
}

impl<O> fmt::Debug for Fail<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fail").field(&self.0).finish()
    }
}

impl<'a, C, O> Parser<'a, C> for Fail<O> {
    type O = O;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        Err(Failure::new(self.0.clone(), state))
    }
}

/// Consume as many bytes as `predicate` says, or fail with `message`.
///
/// The predicate looks at the current state and returns
/// either `Some(len)`, which moves the cursor `len` bytes forward
/// (zero is fine for assertions that do not consume anything),
/// or `None`, which makes the parser fail at the current state.
/// The context is passed on unchanged.
///
/// The returned length must keep the cursor inside the text and on a `char` boundary.
///
/// # Panics
///
/// When run, the parser panics if the predicate breaks this rule.
///
/// ~~~
/// # use statecomb::{when, Parser, State};
/// let two = when(|s: &State<'_>| s.rest().get(..2).map(|_| 2), "Expected two bytes");
/// assert_eq!(two.parse(State::new("abc", ())).unwrap().state.rest(), "c");
/// assert!(two.parse(State::new("a", ())).is_err());
/// ~~~
pub fn when<'a, C, F>(predicate: F, message: impl Into<Cow<'static, str>>) -> When<F>
where
    F: Fn(&State<'a, C>) -> Option<usize>,
{
    When(predicate, message.into())
}

/// A parser returned by [`when`].
#[derive(Clone)]
pub struct When<F>(F, Cow<'static, str>);

impl<'a, C, F> Parser<'a, C> for When<F>
where
    F: Fn(&State<'a, C>) -> Option<usize>,
{
    type O = ();

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        match (self.0)(&state) {
            Some(len) => {
                assert!(
                    state.rest().is_char_boundary(len),
                    "`when` predicate returned length {len}, which is past the end of the text \
                     or inside a character"
                );
                Ok(Success::new(state.advance(len), ()))
            }
            None => Err(Failure::new(self.1.clone(), state)),
        }
    }
}

/// Succeed without consuming anything if the whole text has been consumed.
pub fn end<'a, C>() -> impl Parser<'a, C, O = ()> + Clone {
    when(
        |state: &State<'a, C>| state.is_at_end().then_some(0),
        "Expected end of file",
    )
}

/// Yield a copy of the current context.
///
/// Together with [`bind`](crate::bind), this lets later parsers
/// depend on what earlier ones recorded.
pub fn context<C: Clone>() -> Context<C> {
    Context(PhantomData)
}

/// A parser returned by [`context`].
pub struct Context<C>(PhantomData<fn() -> C>);

impl<C> Clone for Context<C> {
    fn clone(&self) -> Self {
        Context(PhantomData)
    }
}

impl<'a, C: Clone> Parser<'a, C> for Context<C> {
    type O = C;

    fn parse(&self, state: State<'a, C>) -> PResult<'a, C, Self::O> {
        let context = state.context().clone();
        Ok(Success::new(state, context))
    }
}
