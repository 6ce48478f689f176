//! Threading of user contexts through parsers.

use im::{HashSet, Vector};
use statecomb::{
    any, bind, context, fail, identifier, keyword_spaces, modify_state, run_parser_with,
    string_spaces, succeed, try_run_parser_with, when, whitespace, Combinator, FailureKind, Parser,
    State,
};

type Names = HashSet<String>;

/// Words separated by whitespace, each one appended to the context.
fn words<'a>() -> impl Parser<'a, Vector<String>, O = Vec<&'a str>> {
    let word = modify_state(identifier(), |mut seen: Vector<String>, w: &&str| {
        seen.push_back(w.to_string());
        seen
    });
    word.then_ignore(whitespace()).many()
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn runs_with_different_contexts_are_independent() {
    let parser = words();
    let first = Vector::unit("zero".to_string());
    let second = Vector::new();

    let (_, first_out) = run_parser_with(&parser, "a b", first.clone()).unwrap();
    let (_, second_out) = run_parser_with(&parser, "c", second.clone()).unwrap();

    assert_eq!(first_out, Vector::from(owned(&["zero", "a", "b"])));
    assert_eq!(second_out, Vector::unit("c".to_string()));
    // inputs are values, so the caller's copies stay untouched
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn failed_alternative_leaves_no_trace() {
    // the first branch records its words, then fails
    let noisy = words().then_ignore(fail::<()>("Nope"));
    let quiet = words().map(|w| w.into_iter().rev().collect::<Vec<_>>());
    let either = any((noisy, quiet));
    let out = try_run_parser_with(either, "x y", Vector::new()).unwrap();
    assert_eq!(out.value, ["y", "x"]);
    assert_eq!(out.state.context().len(), 2);
}

#[test]
fn failed_repetition_leaves_no_trace() {
    // the last attempt records `c`, then fails on the missing semicolon
    let stmts = words().then_ignore(string_spaces(";")).many();
    let out = stmts.parse(State::new("a; b; c", Vector::new())).unwrap();
    assert_eq!(out.value.len(), 2);
    assert_eq!(out.state.rest(), "c");
    assert_eq!(out.state.context().len(), 2);
}

#[test]
fn context_can_steer_parsing() {
    let size = bind(context(), |names: Names| succeed(names.len()));
    let names: Names = owned(&["a", "b"]).into_iter().collect();
    assert_eq!(run_parser_with(&size, "", names.clone()), Ok((2, names)));
}

/// `let x;` declares `x`, `use x;` requires `x` to be declared.
fn statement<'a>() -> impl Parser<'a, Names, O = ()> {
    let declare = keyword_spaces("let")
        .ignore_then(identifier())
        .modify_state(|names: Names, name: &&str| names.update(name.to_string()));
    let declared = |name: &'a str| {
        let known = move |state: &State<'a, Names>| state.context().contains(name).then_some(0);
        when(known, format!("Use of undeclared name {name}"))
    };
    let usage = keyword_spaces("use").ignore_then(identifier().bind(declared));
    any((declare.map(|_| ()), usage))
        .then_ignore(whitespace())
        .then_ignore(string_spaces(";"))
}

fn program<'a>() -> impl Parser<'a, Names, O = usize> {
    let stmts = whitespace().ignore_then(statement().many());
    stmts.map(|stmts| stmts.len())
}

#[test]
fn declarations_are_visible_to_later_statements() {
    let text = "let x; use x; let y; use y; use x;";
    let (count, names) = run_parser_with(program(), text, Names::new()).unwrap();
    assert_eq!(count, 5);
    assert_eq!(names, owned(&["x", "y"]).into_iter().collect());
}

#[test]
fn undeclared_use_is_rejected() {
    let state = State::new("use y;", Names::new());
    let err = statement().parse(state).unwrap_err();
    assert_eq!(err.kind, FailureKind::ExhaustedAlternatives);
    assert_eq!(err.message, "Expected \"let\"\nUse of undeclared name y");
    assert_eq!(err.state.index(), 0);

    // `many` stops before the bad statement, so the driver reports what is left
    let text = "let x; use y;";
    let err = run_parser_with(program(), text, Names::new()).unwrap_err();
    assert_eq!(err.kind, FailureKind::TrailingInput);
    assert_eq!(err.position.offset, 7);
}
