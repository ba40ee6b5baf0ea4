use crate::config::Limits;
use crate::error::GrammarErrorKind;
use crate::grammar::model::Grammar;
use crate::grammar::rule::{Production, Rule};
use crate::grammar::symbol::{Nonterminal, NonterminalSet};
use std::collections::BTreeMap;

/// Accumulates productions while a grammar source is scanned and enforces
/// the semantic restrictions on each one as it arrives.
#[derive(Debug)]
pub struct GrammarBuilder {
    // Set by the first rule line and never changed afterwards.
    start: Option<Nonterminal>,
    rules: BTreeMap<Nonterminal, Rule>,
    // Every nonterminal seen so far, on either side of an arrow.
    seen: NonterminalSet,
    limits: Limits,
}

impl GrammarBuilder {
    /// Creates a builder with the default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        GrammarBuilder {
            start: None,
            rules: BTreeMap::new(),
            seen: NonterminalSet::new(),
            limits,
        }
    }

    pub fn start(&self) -> Option<Nonterminal> {
        self.start
    }

    /// Registers the left-hand side of a rule line. The first one becomes the start symbol.
    pub fn begin_rule(&mut self, lhs: Nonterminal) -> Result<(), GrammarErrorKind> {
        if self.start.is_none() {
            log::debug!("Start symbol is {}", lhs);
            self.start = Some(lhs);
        }
        self.note_nonterminal(lhs)
    }

    /// Checks the symbols of a production for `lhs` without adding it:
    /// the start symbol may not appear on the right-hand side and only the
    /// start symbol may produce epsilon.
    pub fn validate(&self, lhs: Nonterminal, production: &Production) -> Result<(), GrammarErrorKind> {
        let start = self.start.unwrap_or(lhs);
        match production.operands() {
            Some((a, b)) if a == start || b == start => Err(GrammarErrorKind::StartSymbolOnRhs),
            None if production.is_epsilon() && lhs != start => Err(GrammarErrorKind::EpsilonNotOnStart),
            _ => Ok(()),
        }
    }

    /// Adds one production for `lhs`.
    ///
    /// Checks run in a fixed order: start symbol on the right-hand side,
    /// epsilon outside the start rule, nonterminal count, production count,
    /// then duplicates.
    pub fn add_production(&mut self, lhs: Nonterminal, production: Production) -> Result<(), GrammarErrorKind> {
        self.begin_rule(lhs)?;
        self.validate(lhs, &production)?;
        if let Some((a, b)) = production.operands() {
            self.note_nonterminal(a)?;
            self.note_nonterminal(b)?;
        }

        let max = self.limits.max_productions_per_nonterminal;
        self.rules
            .entry(lhs)
            .or_insert_with(|| Rule::new(lhs))
            .add(production, max)
    }

    fn note_nonterminal(&mut self, nt: Nonterminal) -> Result<(), GrammarErrorKind> {
        if !self.seen.contains(nt) && self.seen.len() >= self.limits.max_nonterminals {
            return Err(GrammarErrorKind::TooManyNonterminals {
                max: self.limits.max_nonterminals,
            });
        }
        self.seen.insert(nt);
        Ok(())
    }

    /// Finishes the grammar. Fails with `EmptyGrammar` if no rule line was seen.
    pub fn build(self) -> Result<Grammar, GrammarErrorKind> {
        let start = self.start.ok_or(GrammarErrorKind::EmptyGrammar)?;
        Ok(Grammar {
            start,
            rules: self.rules,
        })
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::symbol::Terminal;

    fn nt(c: char) -> Nonterminal {
        Nonterminal::from_char(c).unwrap()
    }

    #[test]
    fn test_first_rule_sets_start_symbol() {
        let mut builder = GrammarBuilder::new();
        builder.begin_rule(nt('X')).unwrap();
        builder.begin_rule(nt('A')).unwrap();
        assert_eq!(builder.start(), Some(nt('X')));
    }

    #[test]
    fn test_start_symbol_on_rhs_rejected() {
        let mut builder = GrammarBuilder::new();
        builder.begin_rule(nt('S')).unwrap();
        builder.begin_rule(nt('A')).unwrap();

        assert_eq!(
            builder.add_production(nt('A'), Production::Binary(nt('S'), nt('B'))),
            Err(GrammarErrorKind::StartSymbolOnRhs)
        );
        assert_eq!(
            builder.add_production(nt('A'), Production::Binary(nt('B'), nt('S'))),
            Err(GrammarErrorKind::StartSymbolOnRhs)
        );
    }

    #[test]
    fn test_epsilon_only_on_start() {
        let mut builder = GrammarBuilder::new();
        builder.begin_rule(nt('S')).unwrap();
        builder
            .add_production(nt('S'), Production::Terminal(Terminal::Epsilon))
            .unwrap();

        assert_eq!(
            builder.add_production(nt('A'), Production::Terminal(Terminal::Epsilon)),
            Err(GrammarErrorKind::EpsilonNotOnStart)
        );
    }

    #[test]
    fn test_too_many_nonterminals() {
        let limits = Limits {
            max_nonterminals: 2,
            ..Limits::default()
        };
        let mut builder = GrammarBuilder::with_limits(limits);
        builder.begin_rule(nt('S')).unwrap();

        assert_eq!(
            builder.add_production(nt('S'), Production::Binary(nt('A'), nt('B'))),
            Err(GrammarErrorKind::TooManyNonterminals { max: 2 })
        );
    }

    #[test]
    fn test_build_empty_grammar_fails() {
        assert_eq!(
            GrammarBuilder::new().build(),
            Err(GrammarErrorKind::EmptyGrammar)
        );
    }
}
