use crate::config::Limits;
use crate::grammar::model::Grammar;
use crate::grammar::parser::parse_grammar_with;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads and validates a grammar file.
///
/// A rejected grammar is returned as a `GrammarError` wrapped in the file
/// name, so `{:#}` formats it as `<file>: line N: <reason>`.
pub fn read_grammar_file(path: &Path, limits: &Limits) -> Result<Grammar> {
    log::debug!("Reading grammar file: {}", path.display());

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grammar file: {}", path.display()))?;
    let grammar = parse_grammar_with(contents.lines(), limits)
        .with_context(|| path.display().to_string())?;
    Ok(grammar)
}

/// Reads query strings, one per line. Surrounding whitespace is dropped and
/// blank lines are skipped.
pub fn read_query_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open query file: {}", path.display()))?;

    let mut queries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| {
            format!("Failed to read line {} of {}", index + 1, path.display())
        })?;
        let query = line.trim();
        if !query.is_empty() {
            queries.push(query.to_string());
        }
    }

    log::info!("Read {} queries from {}", queries.len(), path.display());
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GrammarError, GrammarErrorKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_grammar_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("grammar.txt");
        fs::write(&path, "S -> AB\nA -> a\nB -> b\n")?;

        let grammar = read_grammar_file(&path, &Limits::default())?;
        assert_eq!(grammar.production_count(), 3);
        Ok(())
    }

    #[test]
    fn test_grammar_error_keeps_file_and_line() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("bad.txt");
        fs::write(&path, "S -> AB\nA -> _\n")?;

        let err = read_grammar_file(&path, &Limits::default()).unwrap_err();
        let grammar_error = err.downcast_ref::<GrammarError>().unwrap();
        assert_eq!(
            grammar_error,
            &GrammarError::new(2, GrammarErrorKind::EpsilonNotOnStart)
        );
        assert_eq!(
            format!("{:#}", err),
            format!(
                "{}: line 2: only the start symbol may produce the empty string",
                path.display()
            )
        );
        Ok(())
    }

    #[test]
    fn test_missing_grammar_file() {
        let result = read_grammar_file(Path::new("/nonexistent/grammar.txt"), &Limits::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_read_query_file_skips_blank_lines() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("queries.txt");
        fs::write(&path, "ab\n\n  aabb  \nba\n")?;

        assert_eq!(read_query_file(&path)?, vec!["ab", "aabb", "ba"]);
        Ok(())
    }
}
