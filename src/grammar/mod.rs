pub mod builder;
pub mod model;
pub mod parser;
pub mod rule;
pub mod symbol;

// Export core types for anyone importing the grammar module
pub use crate::grammar::builder::GrammarBuilder;
pub use crate::grammar::model::Grammar;
pub use crate::grammar::parser::{parse_grammar, parse_grammar_with};
pub use crate::grammar::rule::{Production, Rule};
pub use crate::grammar::symbol::{Letter, Nonterminal, NonterminalSet, Symbol, Terminal};
