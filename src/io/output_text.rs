use crate::grammar::model::Grammar;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Formats the grammar the way it is written in source files, preceded by
/// the start symbol. Rules appear in nonterminal order.
pub fn grammar_to_text(grammar: &Grammar) -> String {
    let mut text = format!("Start symbol: {}\n", grammar.start());
    for rule in grammar.rules() {
        text.push_str(&rule.to_string());
        text.push('\n');
    }
    text
}

/// Writes the grammar in its human-readable text format.
pub fn write_grammar_text(grammar: &Grammar, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create text output file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(grammar_to_text(grammar).as_bytes())
        .context("Failed to write grammar text")?;
    writer.flush().context("Failed to flush grammar text")?;

    log::info!("Wrote grammar text to {}", output_path.display());
    Ok(())
}
