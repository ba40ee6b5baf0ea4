use crate::cyk::table::CykTable;

/// Renders the table as a triangle: one line per span, shortest spans
/// first, each column padded to its widest cell. Empty cells print as `-`.
pub fn render_table(table: &CykTable) -> String {
    let n = table.string_len();
    let mut widths = vec![1; n];
    for row in table.rows() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut output = String::new();
    for row in table.rows() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let text = if cell.is_empty() { "-".to_string() } else { cell.to_string() };
                format!("{:<width$}", text, width = widths[i])
            })
            .collect();
        output.push_str(line.join(" ").trim_end());
        output.push('\n');
    }
    output
}

/// Lists every cell in storage order with its `(i, k)` coordinates.
pub fn dump_table(table: &CykTable) -> String {
    let n = table.string_len();
    let mut output = String::new();
    let mut offset = 0;
    for k in 0..n {
        for i in 0..n - k {
            let cell = table.cell(i, k);
            output.push_str(&format!("[{:04}] ({}, {}) {}\n", offset, i, k, cell));
            offset += 1;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::cyk::engine::recognize;
    use crate::grammar::model::Grammar;

    #[test]
    fn test_render_accepted_table() {
        let grammar: Grammar = "S -> AB | AX\nX -> AB\nA -> a\nB -> b".parse().unwrap();
        let recognition = recognize(&grammar, "ab", &Limits::default()).unwrap();

        assert_eq!(render_table(&recognition.table), "A  B\nSX\n");
    }

    #[test]
    fn test_render_marks_empty_cells() {
        let grammar: Grammar = "S -> AB\nA -> a\nB -> b".parse().unwrap();
        let recognition = recognize(&grammar, "ba", &Limits::default()).unwrap();

        assert_eq!(render_table(&recognition.table), "B A\n-\n");
    }

    #[test]
    fn test_dump_lists_every_cell() {
        let grammar: Grammar = "S -> AB\nA -> a\nB -> b".parse().unwrap();
        let recognition = recognize(&grammar, "ab", &Limits::default()).unwrap();
        let dump = dump_table(&recognition.table);

        assert_eq!(dump, "[0000] (0, 0) A\n[0001] (1, 0) B\n[0002] (0, 1) S\n");
    }
}
