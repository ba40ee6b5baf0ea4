use crate::config::Limits;
use crate::cyk::engine::recognize;
use crate::cyk::render::render_table;
use crate::error::QueryError;
use crate::grammar::model::Grammar;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Input that ends the session.
pub const QUIT_COMMAND: &str = "q";

const PROMPT: &str = "Enter a string or q to quit: ";

/// Reads candidate strings and answers whether the grammar derives them.
pub struct Shell<'g> {
    grammar: &'g Grammar,
    limits: Limits,
    show_table: bool,
}

impl<'g> Shell<'g> {
    pub fn new(grammar: &'g Grammar, limits: Limits) -> Self {
        Shell {
            grammar,
            limits,
            show_table: false,
        }
    }

    /// Print the filled table after every answer.
    pub fn with_table(mut self, show_table: bool) -> Self {
        self.show_table = show_table;
        self
    }

    /// Runs until `q` or end of input. Rejected strings are reported and
    /// the prompt repeats; only I/O failures end the loop early.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<()> {
        let mut lines = reader.lines();
        loop {
            write!(writer, "{}", PROMPT).context("Failed to write prompt")?;
            writer.flush().context("Failed to flush prompt")?;

            let line = match lines.next() {
                Some(line) => line.context("Failed to read input")?,
                None => {
                    writeln!(writer)?;
                    return Ok(());
                }
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input == QUIT_COMMAND {
                return Ok(());
            }

            self.answer(input, &mut writer)?;
        }
    }

    /// Answers a single string.
    pub fn answer<W: Write>(&self, input: &str, writer: &mut W) -> Result<()> {
        match recognize(self.grammar, input, &self.limits) {
            Ok(recognition) => {
                if self.show_table {
                    write!(writer, "{}", render_table(&recognition.table))?;
                }
                let verdict = if recognition.accepted { "yes" } else { "no" };
                writeln!(writer, "Derivable: {}.\n", verdict)?;
            }
            Err(QueryError::InvalidAlphabet { .. }) => {
                log::warn!("Rejected query '{}': not a string over a-z", input);
                writeln!(writer, "Strings may only contain letters a-z.\n")?;
            }
            Err(e) => {
                log::warn!("Rejected query '{}': {}", input, e);
                writeln!(writer, "{}.\n", capitalize(&e.to_string()))?;
            }
        }
        Ok(())
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
