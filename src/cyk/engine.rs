use crate::config::Limits;
use crate::cyk::table::CykTable;
use crate::error::QueryError;
use crate::grammar::model::Grammar;
use crate::grammar::rule::Production;
use crate::grammar::symbol::{NonterminalSet, Terminal};
use serde::Serialize;

/// Outcome of running CYK over one string.
#[derive(Debug, Clone, Serialize)]
pub struct Recognition {
    /// The filled table. Rows above the base row stay empty when the
    /// base row short-circuits.
    pub table: CykTable,
    /// True if the start symbol derives the whole string.
    pub accepted: bool,
    /// First position whose terminal no nonterminal produces.
    pub unproduced: Option<usize>,
}

/// Nonterminals owning `target` as one of their productions, in
/// enumeration order.
pub fn producers_for(grammar: &Grammar, target: &Production) -> NonterminalSet {
    grammar
        .rules()
        .filter(|rule| rule.contains(target))
        .map(|rule| rule.lhs)
        .collect()
}

/// Tests whether `input` derives from the grammar's start symbol, using
/// the default limits.
pub fn derives(grammar: &Grammar, input: &str) -> Result<bool, QueryError> {
    derives_with(grammar, input, &Limits::default())
}

pub fn derives_with(grammar: &Grammar, input: &str, limits: &Limits) -> Result<bool, QueryError> {
    recognize(grammar, input, limits).map(|r| r.accepted)
}

/// Validates `input` and fills its CYK table.
///
/// The empty string is accepted exactly when the start symbol has the
/// epsilon production.
pub fn recognize(grammar: &Grammar, input: &str, limits: &Limits) -> Result<Recognition, QueryError> {
    let terminals = to_terminals(input, limits)?;
    let n = terminals.len();
    let mut table = CykTable::new(n)?;

    if n == 0 {
        return Ok(Recognition {
            table,
            accepted: grammar.derives_epsilon(),
            unproduced: None,
        });
    }

    // Base row: single terminals.
    for (i, terminal) in terminals.iter().enumerate() {
        let producers = producers_for(grammar, &Production::Terminal(*terminal));
        if producers.is_empty() {
            log::debug!("No nonterminal produces '{}' at position {}", terminal, i);
            return Ok(Recognition {
                table,
                accepted: false,
                unproduced: Some(i),
            });
        }
        *table.cell_mut(i, 0) = producers;
    }

    for k in 1..n {
        for i in 0..n - k {
            let cell = calculate_cell(grammar, &table, i, k);
            log::trace!("cell ({}, {}) = {{{}}}", i, k, cell);
            *table.cell_mut(i, k) = cell;
        }
    }

    let accepted = table.cell(0, n - 1).contains(grammar.start());
    log::debug!("'{}' {} by the grammar", input, if accepted { "accepted" } else { "rejected" });
    Ok(Recognition {
        table,
        accepted,
        unproduced: None,
    })
}

/// Computes cell `(i, k)` from the shorter spans below it.
///
/// For every split `j` the left part is cell `(i, j)` (length `j + 1`)
/// and the right part is cell `(i + j + 1, k - j - 1)` (length `k - j`).
/// Every pair from their cartesian product contributes its producers.
pub fn calculate_cell(grammar: &Grammar, table: &CykTable, i: usize, k: usize) -> NonterminalSet {
    let mut target = NonterminalSet::new();
    for j in 0..k {
        let left = table.cell(i, j);
        let right = table.cell(i + j + 1, k - j - 1);
        for x in left.iter() {
            for y in right.iter() {
                target.union_with(&producers_for(grammar, &Production::Binary(x, y)));
            }
        }
    }
    target
}

fn to_terminals(input: &str, limits: &Limits) -> Result<Vec<Terminal>, QueryError> {
    let len = input.chars().count();
    if len > limits.max_string_length {
        return Err(QueryError::StringTooLong {
            len,
            max: limits.max_string_length,
        });
    }
    input
        .chars()
        .enumerate()
        .map(|(position, ch)| Terminal::letter(ch).ok_or(QueryError::InvalidAlphabet { ch, position }))
        .collect()
}
