use bit_set::BitSet;
use itertools::iproduct;
use std::fmt;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};


/// Fixed size, row major matrix of flags that can only ever be switched on.
///
/// A matrix may have zero rows or zero columns, e.g. the vertical walls of a maze that is one
/// cell wide.
#[derive(Clone, PartialEq, Eq)]
pub struct BoolMatrix {
    rows: usize,
    columns: usize,
    bits: BitSet,
}

impl BoolMatrix {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> BoolMatrix {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        BoolMatrix {
            rows,
            columns,
            bits: BitSet::with_capacity(rows * columns),
        }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    /// Number of entries, true or false.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read an entry. Anything outside the matrix reads as false.
    pub fn get(&self, row: RowIndex, column: ColumnIndex) -> bool {
        self.bit_index(row, column)
            .map_or(false, |index| self.bits.contains(index))
    }

    /// Switch an entry on.
    /// Returns false, leaving the matrix untouched, if the position is outside the matrix.
    pub fn set(&mut self, row: RowIndex, column: ColumnIndex) -> bool {
        if let Some(index) = self.bit_index(row, column) {
            let _ = self.bits.insert(index);
            true
        } else {
            false
        }
    }

    /// How many entries are true.
    #[inline]
    pub fn count_true(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn all(&self) -> bool {
        self.count_true() == self.len()
    }

    /// Positions of the true entries in row major order.
    pub fn iter_true(&self) -> impl Iterator<Item = (RowIndex, ColumnIndex)> + '_ {
        let columns = self.columns;
        self.bits
            .iter()
            .map(move |index| (RowIndex(index / columns), ColumnIndex(index % columns)))
    }

    /// Positions of the false entries in row major order.
    pub fn iter_false(&self) -> impl Iterator<Item = (RowIndex, ColumnIndex)> + '_ {
        iproduct!(0..self.rows, 0..self.columns)
            .map(|(row, column)| (RowIndex(row), ColumnIndex(column)))
            .filter(move |&(row, column)| !self.get(row, column))
    }

    /// Plain nested `Vec` copy, outer index is the row.
    pub fn to_nested_vec(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|row| {
                (0..self.columns)
                    .map(|column| self.get(RowIndex(row), ColumnIndex(column)))
                    .collect()
            })
            .collect()
    }

    #[inline]
    fn bit_index(&self, row: RowIndex, column: ColumnIndex) -> Option<usize> {
        let (RowIndex(r), ColumnIndex(c)) = (row, column);
        if r < self.rows && c < self.columns {
            Some(r * self.columns + c)
        } else {
            None
        }
    }
}

impl fmt::Debug for BoolMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BoolMatrix {}x{} :: {:?}", self.rows, self.columns, self.to_nested_vec())
    }
}
