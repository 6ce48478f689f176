//! Behaviour of the individual combinators on small inputs.

use rstest::rstest;
use statecomb::{
    all, any, between, combine_left, combine_right, combine_with, context, end, fail, keyword, many,
    many1, many_char, string, try_run_parser, whitespace, Combinator, FailureKind, Parser, State,
    Success,
};

/// Parse `text` from its beginning and return the value and the unconsumed rest.
fn parse<'a, P: Parser<'a, ()>>(p: P, text: &'a str) -> Option<(P::O, &'a str)> {
    p.parse(State::new(text, ()))
        .ok()
        .map(|Success { state, value }| (value, state.rest()))
}

fn digit<'a>() -> impl Parser<'a, (), O = &'a str> + Clone {
    statecomb::many_char1(|c| c.is_ascii_digit(), |_| false)
}

#[rstest]
#[case("if ", Some(" "))]
#[case("if", Some(""))]
#[case("if(", Some("("))]
#[case("ifx", None)]
#[case("if2", None)]
#[case("i", None)]
fn keyword_needs_boundary(#[case] text: &str, #[case] rest: Option<&str>) {
    assert_eq!(parse(keyword("if"), text).map(|(_, rest)| rest), rest);
}

#[test]
fn first_alternative_wins() {
    assert_eq!(
        parse(any((string("a"), string("ab"))), "ab"),
        Some(("a", "b"))
    );
    assert_eq!(
        parse(any((string("ab"), string("a"))), "ab"),
        Some(("ab", ""))
    );
    assert_eq!(parse(string("x").or(string("ab")), "ab"), Some(("ab", "")));
}

#[test]
fn exhausted_alternatives_report_at_start() {
    let parser = string("let ").ignore_then(any([string("a"), string("b"), string("c")]));
    let err = parser.parse(State::new("let d", ())).unwrap_err();
    assert_eq!(err.kind, FailureKind::ExhaustedAlternatives);
    assert_eq!(
        err.message,
        "Expected \"a\"\nExpected \"b\"\nExpected \"c\""
    );
    assert_eq!(err.state.index(), 4);
}

#[test]
fn any_of_nothing_fails() {
    let none: Vec<statecomb::primitive::Fail<()>> = Vec::new();
    let err = try_run_parser(any(none), "").unwrap_err();
    assert_eq!(err.kind, FailureKind::ExhaustedAlternatives);
    assert_eq!(err.message, "");
}

#[rstest]
#[case("", vec![], "")]
#[case("1", vec!["1"], "")]
#[case("123x", vec!["1", "2", "3"], "x")]
#[case("x1", vec![], "x1")]
fn many_collects(#[case] text: &str, #[case] values: Vec<&str>, #[case] rest: &str) {
    assert_eq!(parse(many(digit()), text), Some((values, rest)));
}

#[rstest]
#[case("", None)]
#[case("x1", None)]
#[case("12", Some((vec!["1", "2"], "")))]
fn many1_needs_one(#[case] text: &str, #[case] expected: Option<(Vec<&str>, &str)>) {
    assert_eq!(parse(many1(digit()), text), expected);
    assert_eq!(parse(digit().many1(), text), expected);
}

#[test]
fn many_on_empty_text_keeps_state() {
    let out = many(digit()).parse(State::new("", ())).unwrap();
    assert!(out.value.is_empty());
    assert_eq!(out.state, State::new("", ()));
}

#[test]
fn many_stops_on_success_without_progress() {
    let out = parse(many(whitespace()), "  x").unwrap();
    assert_eq!(out.1, "x");
    assert_eq!(parse(many(string("")), "abc"), Some((vec![""], "abc")));
}

#[rstest]
#[case("abc", "abc")]
#[case(" \tabc", "abc")]
#[case("", "")]
fn whitespace_never_fails(#[case] text: &str, #[case] rest: &str) {
    assert_eq!(parse(whitespace(), text), Some(((), rest)));
}

#[rstest]
#[case("1,2,3", vec!["1", "2", "3"], "")]
#[case("1,2,", vec!["1", "2"], ",")]
#[case("1", vec!["1"], "")]
#[case("", vec![], "")]
#[case(",1", vec![], ",1")]
fn separated_by_leaves_trailing_separator(
    #[case] text: &str,
    #[case] values: Vec<&str>,
    #[case] rest: &str,
) {
    let list = digit().separated_by(string(","));
    assert_eq!(parse(list, text), Some((values, rest)));
}

#[test]
fn sequencing() {
    let digits = || many_char(|c| c.is_ascii_digit());
    assert_eq!(
        parse(all((digits(), string("+"), digits())), "1+23"),
        Some((("1", "+", "23"), ""))
    );
    assert_eq!(
        parse(combine_left(digits(), string(";")), "42;"),
        Some(("42", ""))
    );
    assert_eq!(
        parse(combine_right(string("-"), digits()), "-42"),
        Some(("42", ""))
    );
    assert_eq!(
        parse(between(digits(), string("("), string(")")), "(7)"),
        Some(("7", ""))
    );

    let sum = combine_with(digits(), string("+").ignore_then(digits()), |l, r| {
        l.parse::<u32>().unwrap_or(0) + r.parse::<u32>().unwrap_or(0)
    });
    assert_eq!(parse(sum, "20+22!"), Some((42, "!")));
}

#[test]
fn sequencing_fails_where_the_failing_part_starts() {
    let err = string("ab")
        .then(string("cd"))
        .parse(State::new("abce", ()))
        .unwrap_err();
    assert_eq!(err.message, "Expected \"cd\"");
    assert_eq!(err.state.index(), 2);
}

#[test]
fn optional_parts() {
    let sign = || string("-").opt();
    assert_eq!(parse(sign(), "-1"), Some((Some("-"), "1")));
    assert_eq!(parse(sign(), "1"), Some((None, "1")));
}

#[test]
fn label_replaces_only_the_message() {
    let number = digit().label("Expected number");
    let err = string("x")
        .ignore_then(number)
        .parse(State::new("xy", ()))
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Mismatch);
    assert_eq!(err.message, "Expected number");
    assert_eq!(err.state.index(), 1);
}

#[test]
fn with_str_returns_consumed_text() {
    let number = all((digit(), string("."), digit()));
    let parser = number.with_str().map(|(_, s)| s);
    assert_eq!(parse(parser, "1.5 m"), Some(("1.5", " m")));
}

#[test]
fn failing_and_ending() {
    let err = try_run_parser(fail::<()>("Nope"), "abc").unwrap_err();
    assert_eq!((err.kind, &*err.message), (FailureKind::Mismatch, "Nope"));

    assert_eq!(parse(string("a").then_ignore(end()), "a"), Some(("a", "")));
    let err = string("a")
        .then_ignore(end())
        .parse(State::new("ab", ()))
        .unwrap_err();
    assert_eq!(err.message, "Expected end of file");
}

#[test]
fn map_with_sees_context() {
    let digits = many_char(|c| c.is_ascii_digit());
    let parser = digits.map_with(|d, base: &u32| u32::from_str_radix(d, *base).ok());
    let out = parser.parse(State::new("7", 8)).unwrap();
    assert_eq!(out.value, Some(7));
    let out = parser.parse(State::new("9", 8)).unwrap();
    assert_eq!(out.value, None);

    let out = context().parse(State::new("", 'c')).unwrap();
    assert_eq!(out.value, 'c');
}

#[test]
fn recursion_through_lazy() {
    use statecomb::lazy;

    /// Nested lists like `[[], [[]]]`, yielding the number of lists.
    fn list<'a>() -> impl Parser<'a, (), O = usize> {
        lazy!(list)
            .separated_by(string(",").then(whitespace()))
            .delimited_by(string("["), string("]"))
            .map(|inner| 1 + inner.iter().sum::<usize>())
    }

    assert_eq!(parse(list(), "[]"), Some((1, "")));
    assert_eq!(parse(list(), "[[], [[]]]"), Some((4, "")));
    assert_eq!(parse(list(), "[[], [[]]"), None);
}

#[test]
fn one_parser_many_threads() {
    let word = many_char(char::is_alphabetic).separated_by(whitespace_char_or_comma());
    std::thread::scope(|scope| {
        let a = scope.spawn(|| parse(&word, "alpha beta,gamma"));
        let b = scope.spawn(|| parse(&word, "one,two"));
        assert_eq!(
            a.join().ok().flatten(),
            Some((vec!["alpha", "beta", "gamma"], ""))
        );
        assert_eq!(b.join().ok().flatten(), Some((vec!["one", "two"], "")));
    });
}

fn whitespace_char_or_comma<'a>() -> impl Parser<'a, (), O = ()> + Clone {
    statecomb::whitespace_char().or(string(",").map(|_| ()))
}
