use crate::error::GrammarErrorKind;
use crate::grammar::symbol::{Nonterminal, Terminal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The right-hand side of one CNF production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Production {
    /// `X -> AB`
    Binary(Nonterminal, Nonterminal),
    /// `X -> a`, or `S -> _` for the start symbol.
    Terminal(Terminal),
}

impl Production {
    /// Returns true if `other` has the same variant and operands.
    pub fn matches(&self, other: &Production) -> bool {
        self == other
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Production::Terminal(Terminal::Epsilon))
    }

    /// Nonterminals referenced on the right-hand side.
    pub fn operands(&self) -> Option<(Nonterminal, Nonterminal)> {
        match self {
            Production::Binary(a, b) => Some((*a, *b)),
            Production::Terminal(_) => None,
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Production::Binary(a, b) => write!(f, "{}{}", a, b),
            Production::Terminal(t) => write!(f, "{}", t),
        }
    }
}

/// All productions owned by one nonterminal, in the order they were declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub lhs: Nonterminal,
    pub productions: Vec<Production>,
}

impl Rule {
    pub fn new(lhs: Nonterminal) -> Self {
        Rule {
            lhs,
            productions: Vec::new(),
        }
    }

    /// Appends a production, rejecting duplicates and enforcing `max_productions`.
    pub fn add(&mut self, production: Production, max_productions: usize) -> Result<(), GrammarErrorKind> {
        if self.productions.len() >= max_productions {
            return Err(GrammarErrorKind::TooManyProductions { max: max_productions });
        }
        if self.contains(&production) {
            return Err(GrammarErrorKind::DuplicateProduction);
        }
        self.productions.push(production);
        Ok(())
    }

    pub fn contains(&self, production: &Production) -> bool {
        self.productions.iter().any(|p| p.matches(production))
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alternatives: Vec<String> = self.productions.iter().map(|p| p.to_string()).collect();
        write!(f, "{} -> {}", self.lhs, alternatives.join(" | "))
    }
}
