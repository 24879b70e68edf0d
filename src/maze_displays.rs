use fnv::FnvHashSet;
use std::fmt;

use crate::cells::{CellCoordinate, Direction};
use crate::maze::Maze;
use crate::pathing::Distances;
use crate::units::{ColumnsCount, RowsCount};


pub trait CellDisplay {
    /// Render the contents of a maze cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: CellCoordinate) -> String {
        String::from("   ")
    }
}

impl CellDisplay for Distances {
    fn render_cell_body(&self, coord: CellCoordinate) -> String {
        match self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            Some(d) if d <= MAX_DISPLAYED_DISTANCE => format!("{:^3x}", d),
            Some(_) => String::from("###"),
            None => String::from("   "),
        }
    }
}

/// Largest distance that fits in a cell body as three hex digits.
const MAX_DISPLAYED_DISTANCE: u32 = 0xfff;


#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<CellCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[CellCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl CellDisplay for PathDisplay {
    fn render_cell_body(&self, coord: CellCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}


/// Marks where the ball starts (`S`) and where the goal is (`E`).
#[derive(Debug)]
pub struct StartGoalDisplay {
    start: CellCoordinate,
    goal: CellCoordinate,
}
impl StartGoalDisplay {
    pub fn new(start: CellCoordinate, goal: CellCoordinate) -> StartGoalDisplay {
        StartGoalDisplay { start, goal }
    }
}
impl CellDisplay for StartGoalDisplay {
    fn render_cell_body(&self, coord: CellCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.goal {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}


/// Box drawing text view of a maze, optionally filling in the cell bodies.
pub struct TextRender<'a> {
    maze: &'a Maze,
    cell_display: Option<&'a dyn CellDisplay>,
}

impl<'a> TextRender<'a> {
    pub fn new(maze: &'a Maze) -> TextRender<'a> {
        TextRender {
            maze,
            cell_display: None,
        }
    }

    pub fn with_display(mut self, cell_display: &'a dyn CellDisplay) -> TextRender<'a> {
        self.cell_display = Some(cell_display);
        self
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&TextRender::new(self), f)
    }
}

impl<'a> fmt::Display for TextRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let maze = self.maze;
        let ColumnsCount(columns_count) = maze.columns();
        let RowsCount(rows_count) = maze.rows();
        let is_open = |coord: CellCoordinate, direction| maze.is_passage_open(coord, direction);

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            output.push_str(WALL_LR_3);
            if is_open(CellCoordinate::new(0, column), Direction::Right) {
                output.push_str(WALL_LR);
            } else if column == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for row in 0..rows_count {

            let is_last_row = row == rows_count - 1;

            // Starts off by special case rendering the west most boundary of the row.
            // The top section of the cell is done by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for column in 0..columns_count {

                let cell_coord = CellCoordinate::new(row, column);
                let is_first_column = column == 0;
                let is_last_column = column == columns_count - 1;
                let east_open = is_open(cell_coord, Direction::Right);
                let south_open = is_open(cell_coord, Direction::Down);

                // Each cell uses the southern wall of the cell above it as its own northern
                // wall, so we only draw the cell's body, its eastern boundary ('|') and its
                // southern boundary ('---+') minus the south west corner.
                if let Some(displayer) = self.cell_display {
                    row_middle_section_render.push_str(&displayer.render_cell_body(cell_coord));
                } else {
                    row_middle_section_render.push_str(&default_cell_body);
                }
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            is_open(CellCoordinate::new(row, column + 1), Direction::Down);
                        let access_se_from_south =
                            is_open(CellCoordinate::new(row + 1, column), Direction::Right);
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
