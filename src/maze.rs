use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{CellCoordinate, Direction};
use crate::matrix::BoolMatrix;
use crate::units::{ColumnIndex, ColumnsCount, PassagesCount, RowIndex, RowsCount};

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;

/// The three matrices produced by a maze generator: visited cells, vertical walls and
/// horizontal walls. A `true` wall entry means the wall was removed (an open passage).
pub type MazeParts = (BoolMatrix, BoolMatrix, BoolMatrix);


/// A generated maze on a rectangular grid.
///
/// `vertical_walls[r][c]` is the wall between cell (r, c) and (r, c + 1), so there are
/// `columns - 1` of them per row. `horizontal_walls[r][c]` is the wall between cell (r, c) and
/// (r + 1, c), so there are `rows - 1` rows of them. Once handed out by a generator the maze
/// is read only.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze {
    visited: BoolMatrix,
    vertical_walls: BoolMatrix,
    horizontal_walls: BoolMatrix,
    start: CellCoordinate,
}

impl Maze {
    /// A maze with every wall in place and no cell visited yet.
    /// Callers must have validated that `rows` and `columns` are at least 1.
    pub(crate) fn new_walled(rows: RowsCount, columns: ColumnsCount, start: CellCoordinate) -> Maze {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        Maze {
            visited: BoolMatrix::new(rows, columns),
            vertical_walls: BoolMatrix::new(rows, ColumnsCount(c - 1)),
            horizontal_walls: BoolMatrix::new(RowsCount(r - 1), columns),
            start,
        }
    }

    /// Mark a cell as entered. Returns false if it had already been visited.
    pub(crate) fn visit(&mut self, coord: CellCoordinate) -> bool {
        let (row, column) = coord.indices();
        if self.visited.get(row, column) {
            false
        } else {
            self.visited.set(row, column)
        }
    }

    /// Remove the wall between `coord` and its neighbour in `direction`.
    /// Returns false if there is no such neighbour inside the grid.
    pub(crate) fn open_passage(&mut self, coord: CellCoordinate, direction: Direction) -> bool {
        if coord.neighbour(direction, self.rows(), self.columns()).is_none() {
            return false;
        }
        let (matrix, row, column) = wall_position(coord, direction);
        match matrix {
            WallMatrix::Vertical => self.vertical_walls.set(row, column),
            WallMatrix::Horizontal => self.horizontal_walls.set(row, column),
        }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.visited.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.visited.columns()
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.visited.len()
    }

    /// The cell the generator started its traversal from.
    #[inline]
    pub fn start(&self) -> CellCoordinate {
        self.start
    }

    #[inline]
    pub fn visited(&self) -> &BoolMatrix {
        &self.visited
    }

    #[inline]
    pub fn vertical_walls(&self) -> &BoolMatrix {
        &self.vertical_walls
    }

    #[inline]
    pub fn horizontal_walls(&self) -> &BoolMatrix {
        &self.horizontal_walls
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        coord.is_within(self.rows(), self.columns())
    }

    pub fn is_visited(&self, coord: CellCoordinate) -> bool {
        let (row, column) = coord.indices();
        self.visited.get(row, column)
    }

    /// Can we pass from `coord` to its neighbour in `direction`?
    /// The outer boundary of the grid is always closed.
    pub fn is_passage_open(&self, coord: CellCoordinate, direction: Direction) -> bool {
        if !self.is_valid_coordinate(coord) ||
           coord.neighbour(direction, self.rows(), self.columns()).is_none() {
            return false;
        }
        let (matrix, row, column) = wall_position(coord, direction);
        match matrix {
            WallMatrix::Vertical => self.vertical_walls.get(row, column),
            WallMatrix::Horizontal => self.horizontal_walls.get(row, column),
        }
    }

    /// Cells that are joined to a particular cell by an open passage.
    /// None if the coordinate is outside the maze.
    pub fn links(&self, coord: CellCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked = Direction::ALL
            .iter()
            .filter(|dir| self.is_passage_open(coord, **dir))
            .filter_map(|dir| coord.offset(*dir))
            .collect();
        Some(linked)
    }

    #[inline]
    pub fn passages_count(&self) -> PassagesCount {
        PassagesCount(self.vertical_walls.count_true() + self.horizontal_walls.count_true())
    }

    /// Every open passage once, as the pair of cells it joins. Passages through vertical walls
    /// (left - right neighbours) come first, then those through horizontal walls.
    pub fn iter_passages(&self) -> impl Iterator<Item = (CellCoordinate, CellCoordinate)> + '_ {
        let across = self.vertical_walls
            .iter_true()
            .map(|(RowIndex(r), ColumnIndex(c))| {
                (CellCoordinate::new(r, c), CellCoordinate::new(r, c + 1))
            });
        let down = self.horizontal_walls
            .iter_true()
            .map(|(RowIndex(r), ColumnIndex(c))| {
                (CellCoordinate::new(r, c), CellCoordinate::new(r + 1, c))
            });
        across.chain(down)
    }

    /// The maze as an undirected graph: one node per cell, in row major order, and one edge
    /// per open passage.
    pub fn passage_graph(&self) -> UnGraph<CellCoordinate, ()> {
        let columns = self.columns();
        let PassagesCount(edges) = self.passages_count();
        let mut graph = UnGraph::<CellCoordinate, ()>::with_capacity(self.size(), edges);
        for index in 0..self.size() {
            let _ = graph.add_node(CellCoordinate::from_row_major_index(index, columns));
        }
        for (a, b) in self.iter_passages() {
            let _ = graph.add_edge(NodeIndex::new(a.row_major_index(columns)),
                                   NodeIndex::new(b.row_major_index(columns)),
                                   ());
        }
        graph
    }

    /// Give up the maze's matrices as `(visited, vertical_walls, horizontal_walls)`.
    pub fn into_parts(self) -> MazeParts {
        (self.visited, self.vertical_walls, self.horizontal_walls)
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: rows: {:?}, columns: {:?}, start: {:?}, passages: {:?}",
               self.rows(), self.columns(), self.start, self.passages_count())
    }
}

#[derive(Copy, Clone, Debug)]
enum WallMatrix {
    Vertical,
    Horizontal,
}

/// Which wall matrix entry separates `coord` from its neighbour in `direction`.
/// The neighbour must exist.
fn wall_position(coord: CellCoordinate, direction: Direction) -> (WallMatrix, RowIndex, ColumnIndex) {
    let (r, c) = (coord.row, coord.column);
    match direction {
        Direction::Left => (WallMatrix::Vertical, RowIndex(r), ColumnIndex(c - 1)),
        Direction::Right => (WallMatrix::Vertical, RowIndex(r), ColumnIndex(c)),
        Direction::Up => (WallMatrix::Horizontal, RowIndex(r - 1), ColumnIndex(c)),
        Direction::Down => (WallMatrix::Horizontal, RowIndex(r), ColumnIndex(c)),
    }
}
