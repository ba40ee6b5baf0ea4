use crate::error::{GrammarError, GrammarErrorKind};
use crate::grammar::builder::GrammarBuilder;
use crate::grammar::parser::parse_grammar;
use crate::grammar::rule::{Production, Rule};
use crate::grammar::symbol::Nonterminal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A CNF grammar: productions grouped by left-hand side plus the start symbol.
///
/// Grammars are immutable once built. Every constructor goes through
/// `GrammarBuilder` (deserialization replays the productions through it),
/// so the load-time invariants hold for every value of this type:
/// - only the start symbol may produce the empty string,
/// - the start symbol never appears on a right-hand side,
/// - no nonterminal owns the same production twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GrammarSource")]
pub struct Grammar {
    /// The left-hand side of the first rule line.
    pub(crate) start: Nonterminal,

    /// Rules keyed by left-hand side, iterated in alphabet order.
    pub(crate) rules: BTreeMap<Nonterminal, Rule>,
}

impl Grammar {
    pub fn start(&self) -> Nonterminal {
        self.start
    }

    pub fn rule(&self, lhs: Nonterminal) -> Option<&Rule> {
        self.rules.get(&lhs)
    }

    /// Rules in nonterminal enumeration order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Nonterminals that own at least one production.
    pub fn nonterminals(&self) -> impl Iterator<Item = Nonterminal> + '_ {
        self.rules.keys().copied()
    }

    /// True if the grammar accepts the empty string (`S -> _`).
    pub fn derives_epsilon(&self) -> bool {
        self.rule(self.start)
            .map_or(false, |r| r.productions.iter().any(Production::is_epsilon))
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(Rule::len).sum()
    }
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_grammar(s.lines())
    }
}

/// Serialized shape of a `Grammar`, before validation.
#[derive(Deserialize)]
struct GrammarSource {
    start: Nonterminal,
    rules: BTreeMap<Nonterminal, RuleSource>,
}

#[derive(Deserialize)]
struct RuleSource {
    lhs: Nonterminal,
    productions: Vec<Production>,
}

impl TryFrom<GrammarSource> for Grammar {
    type Error = GrammarErrorKind;

    fn try_from(source: GrammarSource) -> Result<Self, Self::Error> {
        let mut builder = GrammarBuilder::new();
        builder.begin_rule(source.start)?;
        for (key, rule) in source.rules {
            if key != rule.lhs {
                return Err(GrammarErrorKind::MalformedRule);
            }
            builder.begin_rule(rule.lhs)?;
            for production in rule.productions {
                builder.add_production(rule.lhs, production)?;
            }
        }
        builder.build()
    }
}
