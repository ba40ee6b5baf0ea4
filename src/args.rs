use crate::config::{Config, Limits};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

const GRAMMAR_FORMAT_HELP: &str = "\
GRAMMAR FORMAT:
  The grammar must be context-free and in Chomsky normal form.
  Nonterminals: A-Z   terminals: a-z   empty string: _
  Rules look like \"S -> AB | BB | a\", one nonterminal per line.
  The first rule's nonterminal is the start symbol. It may produce _,
  but no rule may use it on the right-hand side.";

/// cyk: tests strings against a context-free grammar in Chomsky normal form.
///
/// Loads a grammar file, then answers whether each given string can be
/// derived from the grammar's start symbol using the Cocke-Younger-Kasami
/// algorithm. Without --query, strings are read interactively.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, after_help = GRAMMAR_FORMAT_HELP)]
pub struct CykArgs {
    /// Path to the grammar file.
    #[clap(value_parser)]
    pub grammar: PathBuf,

    /// Strings to test without starting the interactive prompt.
    ///
    /// May be given several times. Exit status is 0 only if every
    /// string is derivable.
    #[clap(short, long, value_parser)]
    pub query: Vec<String>,

    /// Print the filled CYK table after each answer.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub show_table: bool,

    /// Print the loaded grammar before answering queries.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub print_grammar: bool,

    /// Write the grammar (and, with --query, every table) as JSON to this file.
    #[clap(short = 'j', long, value_parser)]
    pub output_json: Option<PathBuf>,

    /// Write the grammar in its text format to this file.
    #[clap(long, value_parser)]
    pub output_text: Option<PathBuf>,

    /// JSON file overriding the default size limits.
    #[clap(long, value_parser)]
    pub limits: Option<PathBuf>,

    /// Maximum length of a tested string.
    #[clap(long, value_parser)]
    pub max_string_length: Option<usize>,
}

impl CykArgs {
    /// Resolves limits (file first, then explicit overrides) into a Config.
    pub fn to_config(&self) -> Result<Config> {
        let limits = Limits::resolve(self.limits.as_deref(), self.max_string_length)?;
        Ok(Config::new(
            self.grammar.clone(),
            limits,
            self.show_table,
            self.output_json.clone(),
        ))
    }
}
