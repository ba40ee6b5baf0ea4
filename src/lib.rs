// Declare the library modules
pub mod args;
pub mod config;
pub mod cyk;
pub mod error;
pub mod grammar;
pub mod io;
pub mod shell;

pub use crate::config::Limits;
pub use crate::cyk::{derives, derives_with, producers_for};
pub use crate::error::{GrammarError, GrammarErrorKind, QueryError};
pub use crate::grammar::{parse_grammar, parse_grammar_with, Grammar};
