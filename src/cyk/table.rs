use crate::error::QueryError;
use crate::grammar::symbol::NonterminalSet;
use serde::{Serialize, Serializer};

/// Number of cells in the triangular table for a string of length `n`.
pub fn cell_count(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Triangular CYK table for one query.
///
/// Cell `(i, k)` holds the nonterminals deriving the substring of length
/// `k + 1` that starts at offset `i`. Cells are stored row by row (span
/// 0 first) in one flat vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CykTable {
    n: usize,
    cells: Vec<NonterminalSet>,
}

impl CykTable {
    /// Allocates an all-empty table for a string of length `n`.
    pub fn new(n: usize) -> Result<Self, QueryError> {
        let count = cell_count(n);
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(count)
            .map_err(|_| QueryError::TableAllocation { cells: count })?;
        cells.resize(count, NonterminalSet::new());
        Ok(CykTable { n, cells })
    }

    /// Length of the string this table was built for.
    pub fn string_len(&self) -> usize {
        self.n
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn offset(&self, i: usize, k: usize) -> usize {
        k * (self.n - k) + k * (k + 1) / 2 + i
    }

    fn in_bounds(&self, i: usize, k: usize) -> bool {
        k < self.n && i < self.n - k
    }

    /// Returns cell `(i, k)`, or `None` outside the triangle.
    pub fn get(&self, i: usize, k: usize) -> Option<&NonterminalSet> {
        if self.in_bounds(i, k) {
            self.cells.get(self.offset(i, k))
        } else {
            None
        }
    }

    /// Returns cell `(i, k)`.
    ///
    /// Panics if `(i, k)` lies outside the triangle.
    pub fn cell(&self, i: usize, k: usize) -> &NonterminalSet {
        assert!(self.in_bounds(i, k), "cell ({}, {}) outside table of length {}", i, k, self.n);
        &self.cells[self.offset(i, k)]
    }

    /// Mutable access to cell `(i, k)`.
    ///
    /// Panics if `(i, k)` lies outside the triangle.
    pub fn cell_mut(&mut self, i: usize, k: usize) -> &mut NonterminalSet {
        assert!(self.in_bounds(i, k), "cell ({}, {}) outside table of length {}", i, k, self.n);
        let offset = self.offset(i, k);
        &mut self.cells[offset]
    }

    /// The cell spanning the whole string.
    pub fn root(&self) -> Option<&NonterminalSet> {
        self.n.checked_sub(1).and_then(|k| self.get(0, k))
    }

    /// All cells of span `k`, ordered by start offset.
    pub fn row(&self, k: usize) -> &[NonterminalSet] {
        if k >= self.n {
            return &[];
        }
        let start = self.offset(0, k);
        &self.cells[start..start + self.n - k]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[NonterminalSet]> + '_ {
        (0..self.n).map(move |k| self.row(k))
    }

    /// Flat view in storage order.
    pub fn cells(&self) -> &[NonterminalSet] {
        &self.cells
    }
}

impl Serialize for CykTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::symbol::Nonterminal;
    use std::collections::HashSet;

    #[test]
    fn test_every_cell_has_a_unique_offset() {
        for n in 1..=12 {
            let table = CykTable::new(n).unwrap();
            let mut seen = HashSet::new();
            for k in 0..n {
                for i in 0..n - k {
                    let offset = table.offset(i, k);
                    assert!(offset < cell_count(n), "offset {} out of range for n={}", offset, n);
                    assert!(seen.insert(offset), "offset {} reused for n={}", offset, n);
                }
            }
            assert_eq!(seen.len(), cell_count(n));
        }
    }

    #[test]
    fn test_rows_shrink_by_one() {
        let table = CykTable::new(4).unwrap();
        let widths: Vec<usize> = table.rows().map(|row| row.len()).collect();
        assert_eq!(widths, vec![4, 3, 2, 1]);
        assert_eq!(table.cell_count(), 10);
    }

    #[test]
    fn test_cell_access() {
        let mut table = CykTable::new(3).unwrap();
        let a = Nonterminal::from_char('A').unwrap();
        table.cell_mut(1, 1).insert(a);

        assert!(table.cell(1, 1).contains(a));
        assert!(table.row(1)[1].contains(a));
        assert!(table.get(2, 1).is_none());
        assert!(table.get(0, 3).is_none());
        assert!(table.root().unwrap().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_cell_outside_triangle_panics() {
        let table = CykTable::new(2).unwrap();
        table.cell(1, 1);
    }

    #[test]
    fn test_empty_table() {
        let table = CykTable::new(0).unwrap();
        assert_eq!(table.cell_count(), 0);
        assert!(table.root().is_none());
        assert_eq!(table.rows().count(), 0);
    }
}
