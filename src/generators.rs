use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::{debug, trace};

use crate::cells::{CellCoordinate, Direction};
use crate::errors::*;
use crate::maze::{Maze, MazeParts};
use crate::units::{ColumnsCount, RowsCount};


/// Where the maze generators get their randomness from.
///
/// Every `rand::Rng` is a `RandomSource`, so a seeded generator can be swapped in for repeatable
/// mazes.
pub trait RandomSource {
    /// A uniformly random index in `[0, upper)`. `upper` is at least 1.
    fn gen_index(&mut self, upper: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn gen_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// A fast, non cryptographic generator seeded from the operating system.
pub fn entropy_rng() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

/// A fast, non cryptographic generator that always produces the same mazes for the same seed.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Fisher-Yates shuffle. Walks down from the end of the slice swapping the last unshuffled
/// element with a uniformly chosen one from the unshuffled prefix (possibly itself).
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
    where R: RandomSource + ?Sized
{
    let mut counter = items.len();
    while counter > 0 {
        let index = rng.gen_index(counter);
        counter -= 1;
        items.swap(counter, index);
    }
}

/// Generate a maze and hand back its `(visited, vertical_walls, horizontal_walls)` matrices.
pub fn generate<R>(rows: usize, columns: usize, rng: &mut R) -> Result<MazeParts>
    where R: RandomSource + ?Sized
{
    recursive_backtracker(RowsCount(rows), ColumnsCount(columns), rng).map(Maze::into_parts)
}

/// Apply the recursive backtracker maze generation algorithm to a fresh grid.
///
/// Starting from a random cell it performs a depth first traversal: on entering a cell it
/// shuffles the cell's four neighbours, then carves a passage into each neighbour that is in
/// the grid and not yet visited, fully exploring from that neighbour before trying the next
/// one. When a cell runs out of neighbours the traversal backs up to the cell it came from.
/// Every cell gets visited exactly once, so exactly `rows * columns - 1` passages are carved
/// and the maze is perfect: there is one path between any two cells.
///
/// The traversal keeps its own stack of partly explored cells, so very long corridors do not
/// grow the call stack. The cells are visited, and random numbers drawn, in exactly the same
/// order as the plainly recursive version.
pub fn recursive_backtracker<R>(rows: RowsCount,
                                columns: ColumnsCount,
                                rng: &mut R)
                                -> Result<Maze>
    where R: RandomSource + ?Sized
{
    validate_dimensions(rows, columns)?;

    let start = CellCoordinate::new(rng.gen_index(rows.0), rng.gen_index(columns.0));
    debug!(rows = rows.0, columns = columns.0, start = ?start, "generating maze");

    let mut maze = Maze::new_walled(rows, columns, start);
    let mut stack: Vec<Frame> = Vec::new();
    enter_cell(&mut maze, &mut stack, start, rng);

    loop {
        let step = match stack.last_mut() {
            Some(frame) => frame.next_direction().map(|direction| (frame.cell, direction)),
            None => break,
        };

        if let Some((cell, direction)) = step {
            let next_cell = match cell.neighbour(direction, rows, columns) {
                Some(neighbour) => neighbour,
                None => continue,
            };
            if maze.is_visited(next_cell) {
                continue;
            }
            let opened = maze.open_passage(cell, direction);
            debug_assert!(opened, "no wall between {:?} and {:?}", cell, next_cell);
            trace!(from = ?cell, to = ?next_cell, "carved passage");
            enter_cell(&mut maze, &mut stack, next_cell, rng);
        } else {
            // All neighbours tried, back up to the previous cell.
            let _ = stack.pop();
        }
    }

    debug!(passages = maze.passages_count().0, "maze generated");
    Ok(maze)
}

fn validate_dimensions(rows: RowsCount, columns: ColumnsCount) -> Result<()> {
    let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
    if r == 0 || c == 0 || r.checked_mul(c).is_none() {
        return Err(ErrorKind::InvalidGridDimensions(r, c).into());
    }
    Ok(())
}

/// A cell on the traversal stack and the neighbour directions it has still to try.
#[derive(Debug, Copy, Clone)]
struct Frame {
    cell: CellCoordinate,
    neighbours: [Direction; 4],
    cursor: usize,
}

impl Frame {
    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.neighbours.get(self.cursor).cloned();
        if direction.is_some() {
            self.cursor += 1;
        }
        direction
    }
}

fn enter_cell<R>(maze: &mut Maze, stack: &mut Vec<Frame>, cell: CellCoordinate, rng: &mut R)
    where R: RandomSource + ?Sized
{
    if !maze.visit(cell) {
        return;
    }
    let mut neighbours = Direction::ALL;
    shuffle(&mut neighbours, rng);
    stack.push(Frame {
        cell,
        neighbours,
        cursor: 0,
    });
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnIndex, PassagesCount, RowIndex};
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::quickcheck;
    use std::collections::VecDeque;

    /// Replays scripted draws, then always picks the last index. Picking the last index makes
    /// `shuffle` leave the neighbours in their natural up, right, down, left order.
    struct ScriptedSource {
        script: VecDeque<usize>,
    }

    impl ScriptedSource {
        fn new(script: &[usize]) -> ScriptedSource {
            ScriptedSource { script: script.iter().cloned().collect() }
        }
    }

    impl RandomSource for ScriptedSource {
        fn gen_index(&mut self, upper: usize) -> usize {
            self.script.pop_front().unwrap_or(upper - 1)
        }
    }

    fn seeded_maze(rows: usize, columns: usize, seed: u64) -> Maze {
        recursive_backtracker(RowsCount(rows), ColumnsCount(columns), &mut seeded_rng(seed))
            .expect("valid dimensions")
    }

    fn is_perfect_maze(maze: &Maze) -> bool {
        let graph = maze.passage_graph();
        maze.visited().all() &&
        maze.passages_count() == PassagesCount(maze.size() - 1) &&
        connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    #[test]
    fn single_cell_maze() {
        let (visited, verticals, horizontals) = generate(1, 1, &mut seeded_rng(7)).unwrap();
        assert_eq!(visited.to_nested_vec(), vec![vec![true]]);
        assert!(verticals.is_empty());
        assert_eq!(verticals.count_true(), 0);
        assert!(horizontals.is_empty());
        assert_eq!(horizontals.count_true(), 0);
    }

    #[test]
    fn single_row_is_one_corridor() {
        for seed in 0..20 {
            let maze = seeded_maze(1, 9, seed);
            assert_eq!(maze.horizontal_walls().rows(), RowsCount(0));
            assert_eq!(maze.vertical_walls().to_nested_vec(), vec![vec![true; 8]]);
            assert!(maze.visited().all());
        }
    }

    #[test]
    fn single_column_is_one_corridor() {
        let maze = seeded_maze(6, 1, 3);
        assert!(maze.vertical_walls().is_empty());
        assert_eq!(maze.horizontal_walls().to_nested_vec(), vec![vec![true]; 5]);
    }

    #[test]
    fn fixed_neighbour_order_from_top_left() {
        // start at (0, 0) then no reordering of up, right, down, left
        let mut source = ScriptedSource::new(&[0, 0]);
        let maze = recursive_backtracker(RowsCount(2), ColumnsCount(2), &mut source).unwrap();

        assert_eq!(maze.start(), CellCoordinate::new(0, 0));
        assert_eq!(maze.passages_count(), PassagesCount(3));
        assert!(maze.visited().all());
        // right from (0,0), down from (0,1), left from (1,1)
        assert_eq!(maze.vertical_walls().to_nested_vec(), vec![vec![true], vec![true]]);
        assert_eq!(maze.horizontal_walls().to_nested_vec(), vec![vec![false, true]]);
    }

    #[test]
    fn start_cell_is_drawn_row_then_column() {
        let mut source = ScriptedSource::new(&[2, 1]);
        let maze = recursive_backtracker(RowsCount(3), ColumnsCount(4), &mut source).unwrap();
        assert_eq!(maze.start(), CellCoordinate::new(2, 1));
        assert!(is_perfect_maze(&maze));
    }

    #[test]
    fn random_start_is_inside_the_grid() {
        let mut rng = seeded_rng(11);
        for _ in 0..200 {
            let maze = recursive_backtracker(RowsCount(3), ColumnsCount(5), &mut rng).unwrap();
            assert!(maze.is_valid_coordinate(maze.start()));
        }
    }

    #[test]
    fn rejects_empty_dimensions() {
        let mut rng = seeded_rng(1);
        for &(rows, columns) in &[(0, 3), (3, 0), (0, 0), (usize::max_value(), 2)] {
            let err = generate(rows, columns, &mut rng).expect_err("dimensions should be rejected");
            match *err.kind() {
                ErrorKind::InvalidGridDimensions(r, c) => {
                    assert_eq!((r, c), (rows, columns));
                }
                _ => panic!("unexpected error kind {:?}", err.kind()),
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(12, 17, &mut seeded_rng(42)).unwrap();
        let b = generate(12, 17, &mut seeded_rng(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.1.to_nested_vec(), b.1.to_nested_vec());
        assert_eq!(a.2.to_nested_vec(), b.2.to_nested_vec());
    }

    #[test]
    fn different_seeds_different_mazes() {
        assert_ne!(seeded_maze(10, 10, 1), seeded_maze(10, 10, 2));
    }

    #[test]
    fn repeated_generation_is_independent() {
        let mut rng = seeded_rng(5);
        let first = recursive_backtracker(RowsCount(8), ColumnsCount(8), &mut rng).unwrap();
        let second = recursive_backtracker(RowsCount(8), ColumnsCount(8), &mut rng).unwrap();
        assert!(is_perfect_maze(&first));
        assert!(is_perfect_maze(&second));
    }

    #[test]
    fn perfect_maze_on_rectangular_grids() {
        for &(rows, columns) in &[(2, 2), (3, 7), (7, 7), (16, 4), (25, 40)] {
            let maze = seeded_maze(rows, columns, (rows * columns) as u64);
            assert!(is_perfect_maze(&maze), "{}x{} maze is not perfect", rows, columns);
        }
    }

    #[test]
    fn long_corridors_do_not_overflow_the_stack() {
        // A fixed neighbour order winds the traversal through every cell as one corridor,
        // so the stack gets as deep as the grid is big.
        let mut source = ScriptedSource::new(&[0, 0]);
        let maze = recursive_backtracker(RowsCount(300), ColumnsCount(300), &mut source).unwrap();
        assert!(maze.visited().all());
        assert_eq!(maze.passages_count(), PassagesCount(300 * 300 - 1));
    }

    #[test]
    fn quickcheck_spanning_tree() {
        fn prop(rows: u8, columns: u8, seed: u64) -> bool {
            let rows = (rows % 20) as usize + 1;
            let columns = (columns % 20) as usize + 1;
            is_perfect_maze(&seeded_maze(rows, columns, seed))
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn quickcheck_every_passage_joins_neighbours() {
        fn prop(rows: u8, columns: u8, seed: u64) -> bool {
            let maze = seeded_maze((rows % 12) as usize + 1, (columns % 12) as usize + 1, seed);
            let all_adjacent = maze.iter_passages().all(|(a, b)| {
                let (dr, dc) = (b.row - a.row, b.column - a.column);
                (dr, dc) == (0, 1) || (dr, dc) == (1, 0)
            });
            all_adjacent
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = seeded_rng(9);
        for _ in 0..100 {
            let mut dirs = Direction::ALL;
            shuffle(&mut dirs, &mut rng);
            for dir in Direction::ALL.iter() {
                assert_eq!(dirs.iter().filter(|d| *d == dir).count(), 1);
            }
        }
    }

    #[test]
    fn shuffle_with_last_index_is_identity() {
        let mut dirs = Direction::ALL;
        shuffle(&mut dirs, &mut ScriptedSource::new(&[]));
        assert_eq!(dirs, Direction::ALL);
    }

    #[test]
    fn shuffle_empty_and_single() {
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut seeded_rng(1));
        let mut one = [7u8];
        shuffle(&mut one, &mut seeded_rng(1));
        assert_eq!(one, [7]);
    }

    #[test]
    fn shuffle_first_element_is_uniform() {
        const RUNS: usize = 40_000;
        let mut rng = seeded_rng(2024);
        let mut first_counts = [0usize; 4];
        let mut last_counts = [0usize; 4];
        for _ in 0..RUNS {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            first_counts[items[0]] += 1;
            last_counts[items[3]] += 1;
        }
        // Expect 10_000 each; 5% either way is several standard deviations.
        let expected = RUNS / 4;
        let tolerance = expected / 20;
        for count in first_counts.iter().chain(last_counts.iter()) {
            assert!(*count > expected - tolerance && *count < expected + tolerance,
                    "skewed shuffle: {:?} {:?}", first_counts, last_counts);
        }
    }

    #[test]
    fn walls_only_opened_between_visited_cells() {
        let maze = seeded_maze(9, 6, 77);
        for (RowIndex(r), ColumnIndex(c)) in maze.vertical_walls().iter_true() {
            assert!(maze.is_visited(CellCoordinate::new(r, c)));
            assert!(maze.is_visited(CellCoordinate::new(r, c + 1)));
        }
    }
}
