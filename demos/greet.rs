//! Line-by-line parsing of two toy grammars.
//!
//! ~~~ text
//! $ printf 'fzoo <3\nfzoo </3\n' | cargo run --example greet
//! $ printf 'let x;\nuse x;\nuse y;\n' | cargo run --example greet -- --grammar declarations
//! ~~~

use std::fmt;

use clap::{Parser as CliParser, ValueEnum};
use statecomb::str::{identifier, identifier_spaces, keyword, keyword_spaces, string_spaces};
use statecomb::{any, combine_with, run_parser, run_parser_with, try_run_parser};
use statecomb::{try_run_parser_with, when, whitespace, Combinator, Parser, State};

/// Symbol table threaded through the declarations grammar.
type Names = im::HashSet<String>;

#[derive(Debug, CliParser)]
#[command(name = "greet", about = "Parse every line of standard input.")]
struct Args {
    /// The grammar that every line has to match.
    #[arg(long, value_enum, default_value_t = Grammar::Greeting)]
    grammar: Grammar,
    /// Print only values and error messages instead of full parse results.
    #[arg(long)]
    strict: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Grammar {
    /// `fzoo <3`
    Greeting,
    /// `let <name>;` and `use <name>;`
    Declarations,
}

#[derive(Debug)]
enum Stmt<'a> {
    Let(&'a str),
    Use(&'a str),
}

impl fmt::Display for Stmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let(name) => write!(f, "declared {name}"),
            Self::Use(name) => write!(f, "used {name}"),
        }
    }
}

fn greeting<'a>() -> impl Parser<'a, (), O = (&'a str, &'a str)> {
    let fzoo = keyword("fzoo").then_ignore(whitespace());
    combine_with(fzoo, keyword("<3"), |l, r| (l, r))
}

fn declaration<'a>() -> impl Parser<'a, Names, O = Stmt<'a>> {
    keyword_spaces("let")
        .ignore_then(identifier_spaces())
        .then_ignore(string_spaces(";"))
        .modify_state(|names: Names, name: &&str| names.update(name.to_string()))
        .map(Stmt::Let)
}

fn usage<'a>() -> impl Parser<'a, Names, O = Stmt<'a>> {
    let declared = |name: &'a str| {
        let known = move |state: &State<'a, Names>| state.context().contains(name).then_some(0);
        when(known, format!("Use of undeclared name {name}")).map(move |()| name)
    };
    keyword_spaces("use")
        .ignore_then(identifier().bind(declared))
        .then_ignore(whitespace())
        .then_ignore(string_spaces(";"))
        .map(Stmt::Use)
}

fn statement<'a>() -> impl Parser<'a, Names, O = Stmt<'a>> {
    whitespace().ignore_then(any((declaration(), usage())))
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let mut names = Names::new();
    for line in std::io::stdin().lines() {
        let line = line?;
        match (args.grammar, args.strict) {
            (Grammar::Greeting, true) => match run_parser(greeting(), &line) {
                Ok(value) => println!("{value:?}"),
                Err(e) => println!("error: {e}"),
            },
            (Grammar::Greeting, false) => println!("{:?}", try_run_parser(greeting(), &line)),
            (Grammar::Declarations, true) => {
                match run_parser_with(statement(), &line, names.clone()) {
                    Ok((stmt, next)) => {
                        println!("{stmt}");
                        names = next;
                    }
                    Err(e) => println!("error: {e}"),
                }
            }
            (Grammar::Declarations, false) => {
                let result = try_run_parser_with(statement(), &line, names.clone());
                if let Ok(success) = &result {
                    names = success.state.context().clone();
                }
                println!("{result:?}");
            }
        }
    }
    Ok(())
}
