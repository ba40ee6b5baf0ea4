use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Size bounds shared by the grammar loader and the CYK engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of distinct nonterminals in one grammar.
    pub max_nonterminals: usize,
    /// Maximum number of productions owned by a single nonterminal.
    pub max_productions_per_nonterminal: usize,
    /// Maximum visible length of a grammar line (terminator excluded).
    pub max_line_length: usize,
    /// Maximum length of a query string.
    pub max_string_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nonterminals: 25,
            max_productions_per_nonterminal: 10,
            max_line_length: 52,
            max_string_length: 80,
        }
    }
}

impl Limits {
    /// Loads limits from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open limits file: {}", path.display()))?;
        let limits = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse limits file: {}", path.display()))?;
        Ok(limits)
    }

    /// Resolves limits from an optional JSON file and an optional query
    /// length override, in that order.
    pub fn resolve(path: Option<&Path>, max_string_length: Option<usize>) -> Result<Self> {
        let mut limits = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        if let Some(max) = max_string_length {
            limits = limits.with_max_string_length(max);
        }
        Ok(limits)
    }

    /// Overrides the query length bound.
    pub fn with_max_string_length(mut self, max_string_length: usize) -> Self {
        self.max_string_length = max_string_length;
        self
    }
}

/// Configuration settings derived from CLI arguments.
#[derive(Debug)]
pub struct Config {
    pub grammar_path: PathBuf,
    pub limits: Limits,
    pub show_table: bool,
    pub output_json_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config instance from validated arguments.
    pub fn new(
        grammar_path: PathBuf,
        limits: Limits,
        show_table: bool,
        output_json_path: Option<PathBuf>,
    ) -> Self {
        Config {
            grammar_path,
            limits,
            show_table,
            output_json_path,
        }
    }
}
