//! Line-oriented reader for grammars written as `S -> AB | a | _`.
//!
//! Each non-blank line holds one left-hand side nonterminal, the literal
//! `" -> "`, and one or more alternatives separated by `" | "`. An
//! alternative is either two nonterminals (`AB`) or a single terminal
//! (`a`, or `_` for the empty string on the start symbol's lines).
//! Parsing stops at the first error and reports its line.

use crate::config::Limits;
use crate::error::{GrammarError, GrammarErrorKind};
use crate::grammar::builder::GrammarBuilder;
use crate::grammar::model::Grammar;
use crate::grammar::rule::Production;
use crate::grammar::symbol::{Nonterminal, Symbol, EPSILON_CHAR};
use std::str::Chars;

const ARROW: &str = " -> ";

/// Parses grammar source lines with the default limits.
pub fn parse_grammar<I, S>(lines: I) -> Result<Grammar, GrammarError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_grammar_with(lines, &Limits::default())
}

/// Parses grammar source lines, enforcing `limits`.
///
/// Line numbers in errors are 1-based and count blank lines.
pub fn parse_grammar_with<I, S>(lines: I, limits: &Limits) -> Result<Grammar, GrammarError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GrammarBuilder::with_limits(*limits);
    let mut line_count = 0;

    for (index, raw) in lines.into_iter().enumerate() {
        line_count = index + 1;
        let line = raw.as_ref().trim_end_matches(|c: char| c == '\n' || c == '\r');

        if line.chars().count() > limits.max_line_length {
            return Err(GrammarError::new(
                line_count,
                GrammarErrorKind::LineTooLong { max: limits.max_line_length },
            ));
        }
        if line.trim().is_empty() {
            continue;
        }

        log::debug!("Parsing grammar line {}: {}", line_count, line);
        parse_rule_line(line.trim_end(), &mut builder)
            .map_err(|kind| GrammarError::new(line_count, kind))?;
    }

    let grammar = builder
        .build()
        .map_err(|kind| GrammarError::new(line_count, kind))?;
    log::info!(
        "Loaded grammar with start symbol {}, {} nonterminals, {} productions",
        grammar.start(),
        grammar.nonterminals().count(),
        grammar.production_count()
    );
    Ok(grammar)
}

/// Parses one non-blank rule line into `builder`.
pub fn parse_rule_line(line: &str, builder: &mut GrammarBuilder) -> Result<(), GrammarErrorKind> {
    let mut cursor = Cursor::new(line);

    let lhs = cursor
        .next()
        .and_then(Nonterminal::from_char)
        .ok_or(GrammarErrorKind::MalformedRule)?;
    if !cursor.eat(ARROW) {
        return Err(GrammarErrorKind::MalformedRule);
    }
    builder.begin_rule(lhs)?;

    // An epsilon anywhere on a non-start line is reported ahead of any
    // other problem on that line.
    if builder.start() != Some(lhs) && cursor.rest().contains(EPSILON_CHAR) {
        return Err(GrammarErrorKind::EpsilonNotOnStart);
    }

    loop {
        let production = read_alternative(&mut cursor)?;
        builder.validate(lhs, &production)?;

        let last = cursor.is_at_end();
        if !last {
            read_separator(&mut cursor, &production)?;
        }
        builder.add_production(lhs, production)?;
        if last {
            return Ok(());
        }
    }
}

fn read_alternative(cursor: &mut Cursor<'_>) -> Result<Production, GrammarErrorKind> {
    let first = cursor.next().ok_or(GrammarErrorKind::MissingAlternative)?;
    match Symbol::from_char(first) {
        Some(Symbol::Nonterminal(a)) => {
            let b = cursor
                .next()
                .and_then(Nonterminal::from_char)
                .ok_or(GrammarErrorKind::NotPair)?;
            Ok(Production::Binary(a, b))
        }
        Some(Symbol::Terminal(t)) => Ok(Production::Terminal(t)),
        None => Err(GrammarErrorKind::UnexpectedSymbol(first)),
    }
}

/// Consumes `" | "` and requires another alternative to follow it.
fn read_separator(cursor: &mut Cursor<'_>, previous: &Production) -> Result<(), GrammarErrorKind> {
    if cursor.next() != Some(' ') {
        return Err(match previous {
            Production::Binary(..) => GrammarErrorKind::SpaceExpected,
            Production::Terminal(_) => GrammarErrorKind::NotSingleTerminal,
        });
    }
    if cursor.next() != Some('|') {
        return Err(GrammarErrorKind::SeparatorExpected);
    }
    match cursor.next() {
        Some(' ') => {}
        Some(_) => return Err(GrammarErrorKind::SpaceExpected),
        None => return Err(GrammarErrorKind::MissingAlternative),
    }
    if cursor.is_at_end() {
        return Err(GrammarErrorKind::MissingAlternative);
    }
    Ok(())
}

struct Cursor<'a> {
    chars: Chars<'a>,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Cursor { chars: line.chars() }
    }

    fn next(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    fn is_at_end(&self) -> bool {
        self.rest().is_empty()
    }

    fn eat(&mut self, expected: &str) -> bool {
        match self.rest().strip_prefix(expected) {
            Some(rest) => {
                self.chars = rest.chars();
                true
            }
            None => false,
        }
    }
}
