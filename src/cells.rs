use std::convert::From;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};


/// A cell position in a maze. Rows grow downwards, columns grow rightwards.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: usize,
    pub column: usize,
}

/// The four sides of a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Every direction, in the order a cell lists its neighbours before they are shuffled.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl CellCoordinate {
    pub fn new(row: usize, column: usize) -> CellCoordinate {
        CellCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> CellCoordinate {
        let ColumnsCount(width) = columns;
        CellCoordinate::new(index / width, index % width)
    }

    #[inline]
    pub fn row_major_index(&self, columns: ColumnsCount) -> usize {
        self.row * columns.0 + self.column
    }

    #[inline]
    pub fn indices(&self) -> (RowIndex, ColumnIndex) {
        (RowIndex(self.row), ColumnIndex(self.column))
    }

    /// Is the coordinate inside a `rows` by `columns` grid?
    #[inline]
    pub fn is_within(&self, rows: RowsCount, columns: ColumnsCount) -> bool {
        self.row < rows.0 && self.column < columns.0
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if that would step off the top or left edge, i.e. below zero.
    pub fn offset(&self, direction: Direction) -> Option<CellCoordinate> {
        let (row, column) = (self.row, self.column);
        match direction {
            Direction::Up => {
                if row > 0 {
                    Some(CellCoordinate { row: row - 1, column })
                } else {
                    None
                }
            }
            Direction::Right => Some(CellCoordinate { row, column: column + 1 }),
            Direction::Down => Some(CellCoordinate { row: row + 1, column }),
            Direction::Left => {
                if column > 0 {
                    Some(CellCoordinate { row, column: column - 1 })
                } else {
                    None
                }
            }
        }
    }

    /// The adjacent cell in `direction` if it lies inside a `rows` by `columns` grid.
    pub fn neighbour(&self,
                     direction: Direction,
                     rows: RowsCount,
                     columns: ColumnsCount)
                     -> Option<CellCoordinate> {
        self.offset(direction)
            .filter(|coord| coord.is_within(rows, columns))
    }
}

impl From<(usize, usize)> for CellCoordinate {
    fn from(row_column_pair: (usize, usize)) -> CellCoordinate {
        CellCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}
