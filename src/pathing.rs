use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::cells::CellCoordinate;
use crate::maze::Maze;


/// Step counts from a start cell to every cell reachable through open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: CellCoordinate,
    distances: FnvHashMap<CellCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate`.
    /// Returns None if the start is not a cell of the maze.
    pub fn new(maze: &Maze, start_coordinate: CellCoordinate) -> Option<Distances> {

        if !maze.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::with_capacity_and_hasher(maze.size(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every link is one step, so the first time a cell is reached is by a shortest route.
        // The map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = maze.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: CellCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Every cell at the maximum distance, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[CellCoordinate; 8]> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[CellCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back from `end_point` towards the start of `distances_from_start`, always stepping to
/// a linked neighbour that is one step closer.
/// Returns the path from start to end inclusive, or None if the end is unreachable.
pub fn shortest_path(maze: &Maze,
                     distances_from_start: &Distances,
                     end_point: CellCoordinate)
                     -> Option<Vec<CellCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let closest_to_start = maze.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord)
                    .map(|distance| (*coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // Not getting any closer, the distances must belong to another maze.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in the maze.
///
/// The cell furthest from any point is one end of a longest path in a perfect maze, and the
/// cell furthest from that is the other end.
pub fn longest_path(maze: &Maze) -> Option<Vec<CellCoordinate>> {
    let first_distances = Distances::new(maze, CellCoordinate::new(0, 0))?;
    let long_path_start = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(maze, long_path_start)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(maze, &distances_from_start, end_point)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::{recursive_backtracker, seeded_rng};
    use crate::units::{ColumnsCount, RowsCount};
    use quickcheck::quickcheck;

    static OUT_OF_GRID_COORDINATE: CellCoordinate = CellCoordinate {
        row: usize::MAX,
        column: usize::MAX,
    };

    fn maze(rows: usize, columns: usize, seed: u64) -> Maze {
        recursive_backtracker(RowsCount(rows), ColumnsCount(columns), &mut seeded_rng(seed))
            .expect("valid dimensions")
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let m = maze(3, 3, 1);
        assert!(Distances::new(&m, OUT_OF_GRID_COORDINATE).is_none());
        assert!(Distances::new(&m, CellCoordinate::new(3, 0)).is_none());
    }

    #[test]
    fn start() {
        let m = maze(3, 3, 1);
        let start_coordinate = CellCoordinate::new(1, 1);
        let distances = Distances::new(&m, start_coordinate).unwrap();
        assert_eq!(start_coordinate, distances.start());
        assert_eq!(distances.distance_from_start_to(start_coordinate), Some(0));
    }

    #[test]
    fn distance_to_invalid_coordinate_is_none() {
        let m = maze(3, 3, 1);
        let distances = Distances::new(&m, CellCoordinate::new(0, 0)).unwrap();
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn corridor_distances() {
        let m = maze(1, 6, 4);
        let distances = Distances::new(&m, CellCoordinate::new(0, 0)).unwrap();
        for column in 0..6 {
            assert_eq!(distances.distance_from_start_to(CellCoordinate::new(0, column)),
                       Some(column as u32));
        }
        assert_eq!(distances.max(), 5);
        assert_eq!(&*distances.furthest_points_on_grid(), &[CellCoordinate::new(0, 5)]);
    }

    #[test]
    fn every_cell_reachable_in_a_perfect_maze() {
        let m = maze(9, 13, 21);
        let distances = Distances::new(&m, CellCoordinate::new(4, 4)).unwrap();
        for r in 0..9 {
            for c in 0..13 {
                assert!(distances.distance_from_start_to(CellCoordinate::new(r, c)).is_some());
            }
        }
    }

    #[test]
    fn corridor_longest_path() {
        let m = maze(4, 1, 8);
        let path = longest_path(&m).unwrap();
        assert_eq!(path.len(), 4);
        let ends = [path[0], path[3]];
        assert!(ends.contains(&CellCoordinate::new(0, 0)));
        assert!(ends.contains(&CellCoordinate::new(3, 0)));
    }

    #[test]
    fn path_to_self() {
        let m = maze(3, 3, 2);
        let corner = CellCoordinate::new(2, 2);
        let distances = Distances::new(&m, corner).unwrap();
        assert_eq!(shortest_path(&m, &distances, corner), Some(vec![corner]));
    }

    #[test]
    fn distances_from_another_maze_give_no_path() {
        let wide = maze(1, 8, 3);
        let narrow = maze(8, 1, 3);
        let distances = Distances::new(&wide, CellCoordinate::new(0, 0)).unwrap();
        assert_eq!(shortest_path(&narrow, &distances, CellCoordinate::new(0, 5)), None);
    }

    #[test]
    fn quickcheck_paths_step_through_open_passages() {
        fn prop(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = ((rows % 15) as usize + 1, (columns % 15) as usize + 1);
            let m = maze(rows, columns, seed);
            let start = CellCoordinate::new(0, 0);
            let goal = CellCoordinate::new(rows - 1, columns - 1);
            let distances = Distances::new(&m, start).unwrap();
            let path = match shortest_path(&m, &distances, goal) {
                Some(p) => p,
                None => return false,
            };
            let expected_length = distances.distance_from_start_to(goal).unwrap() as usize + 1;
            path.first() == Some(&start) && path.last() == Some(&goal) &&
            path.len() == expected_length &&
            path.windows(2).all(|pair| {
                m.links(pair[0]).map_or(false, |links| links.contains(&pair[1]))
            })
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool)
    }
}
