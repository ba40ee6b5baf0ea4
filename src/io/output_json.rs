use crate::cyk::engine::Recognition;
use crate::error::QueryError;
use crate::grammar::model::Grammar;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the grammar to a JSON file.
pub fn write_grammar_json(path: &Path, grammar: &Grammar) -> Result<()> {
    write_json(path, &grammar_to_json(grammar))?;
    log::info!("Wrote grammar JSON to {}", path.display());
    Ok(())
}

/// Writes the grammar together with one entry per answered query.
pub fn write_report_json(path: &Path, grammar: &Grammar, queries: &[Value]) -> Result<()> {
    let report = json!({
        "grammar": grammar_to_json(grammar),
        "queries": queries,
    });
    write_json(path, &report)?;
    log::info!("Wrote {} query reports to {}", queries.len(), path.display());
    Ok(())
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let json_str = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    writer
        .write_all(json_str.as_bytes())
        .context("Failed to write to file")?;
    writer.flush().context("Failed to flush JSON output")?;
    Ok(())
}

/// Convert the grammar to a JSON value, one string per production.
pub fn grammar_to_json(grammar: &Grammar) -> Value {
    let rules: serde_json::Map<String, Value> = grammar
        .rules()
        .map(|rule| {
            let productions: Vec<String> = rule.productions.iter().map(|p| p.to_string()).collect();
            (rule.lhs.to_string(), json!(productions))
        })
        .collect();

    json!({
        "start": grammar.start().to_string(),
        "derives_epsilon": grammar.derives_epsilon(),
        "production_count": grammar.production_count(),
        "rules": rules,
    })
}

/// Summarizes one query: the input, the verdict and the filled table rows.
pub fn recognition_to_json(input: &str, recognition: &Recognition) -> Value {
    json!({
        "input": input,
        "derivable": recognition.accepted,
        "unproduced_position": recognition.unproduced,
        "table": recognition.table,
    })
}

/// Summarizes a query that was rejected before its table was built.
pub fn query_error_to_json(input: &str, error: &QueryError) -> Value {
    json!({
        "input": input,
        "derivable": Value::Null,
        "error": error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::cyk::engine::recognize;

    fn grammar() -> Grammar {
        "S -> AB | _\nA -> a\nB -> b".parse().unwrap()
    }

    #[test]
    fn test_grammar_to_json() {
        let value = grammar_to_json(&grammar());

        assert_eq!(value["start"], "S");
        assert_eq!(value["derives_epsilon"], true);
        assert_eq!(value["production_count"], 4);
        assert_eq!(value["rules"]["S"], json!(["AB", "_"]));
        assert_eq!(value["rules"]["A"], json!(["a"]));
    }

    #[test]
    fn test_recognition_to_json() {
        let recognition = recognize(&grammar(), "ab", &Limits::default()).unwrap();
        let value = recognition_to_json("ab", &recognition);

        assert_eq!(value["derivable"], true);
        assert_eq!(value["unproduced_position"], Value::Null);
        assert_eq!(value["table"], json!([[["A"], ["B"]], [["S"]]]));
    }

    #[test]
    fn test_query_error_to_json() {
        let error = QueryError::InvalidAlphabet { ch: '1', position: 1 };
        let value = query_error_to_json("a1", &error);

        assert_eq!(value["input"], "a1");
        assert_eq!(value["derivable"], Value::Null);
        assert_eq!(value["error"], "character '1' at position 1 is not a terminal (a-z)");
    }

    #[test]
    fn test_write_grammar_json() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("grammar.json");
        write_grammar_json(&path, &grammar())?;

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(written, grammar_to_json(&grammar()));
        Ok(())
    }

    #[test]
    fn test_write_report_json() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("report.json");
        let g = grammar();
        let recognition = recognize(&g, "ba", &Limits::default()).unwrap();
        write_report_json(&path, &g, &[recognition_to_json("ba", &recognition)])?;

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(written["grammar"]["start"], "S");
        assert_eq!(written["queries"][0]["input"], "ba");
        assert_eq!(written["queries"][0]["derivable"], false);
        Ok(())
    }
}
