//! Static level geometry for a physics host.
//!
//! A host engine turns a maze into a playable level by placing a barrier for every wall still
//! standing, four bounding walls around the viewport, a goal in the bottom right cell and a
//! ball in the top left cell. This module works out where all of those go; simulating and
//! drawing them is the host's business.

use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::cells::CellCoordinate;
use crate::errors::*;
use crate::maze::Maze;
use crate::units::{ColumnIndex, ColumnsCount, Height, RowIndex, RowsCount, Width};


#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Thickness of the barrier placed for each closed wall between two cells.
    pub wall_thickness: f64,
    /// Thickness of the four walls around the whole viewport.
    pub boundary_thickness: f64,
    /// Goal marker size as a fraction of the cell size.
    pub goal_scale: f64,
    /// The ball radius is the smaller cell side divided by this.
    pub ball_radius_divisor: f64,
}

impl LayoutConfig {
    /// Every setting is a size or a ratio, so each must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        let settings = [("wall_thickness", self.wall_thickness),
                        ("boundary_thickness", self.boundary_thickness),
                        ("goal_scale", self.goal_scale),
                        ("ball_radius_divisor", self.ball_radius_divisor)];
        for &(setting, value) in &settings {
            if !(value.is_finite() && value > 0.0) {
                return Err(ErrorKind::InvalidLayoutConfig(setting, value).into());
            }
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> LayoutConfig {
        LayoutConfig {
            wall_thickness: 3.0,
            boundary_thickness: 1.0,
            goal_scale: 0.75,
            ball_radius_divisor: 2.5,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyLabel {
    Boundary,
    Wall,
    Goal,
    Ball,
}

/// Shapes are positioned by their centre.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub label: BodyLabel,
    /// Static bodies never move. The ball is the only dynamic body.
    pub is_static: bool,
    pub shape: Shape,
}

impl Body {
    fn fixed_rectangle(label: BodyLabel, x: f64, y: f64, width: f64, height: f64) -> Body {
        Body {
            label,
            is_static: true,
            shape: Shape::Rectangle { x, y, width, height },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub width: f64,
    pub height: f64,
    /// Width of one cell.
    pub unit_x: f64,
    /// Height of one cell.
    pub unit_y: f64,
    pub bodies: Vec<Body>,
}

/// The cell the ball starts in.
pub fn ball_cell() -> CellCoordinate {
    CellCoordinate::new(0, 0)
}

/// The cell holding the goal: the corner diagonally opposite the ball.
pub fn goal_cell(maze: &Maze) -> CellCoordinate {
    let (RowsCount(rows), ColumnsCount(columns)) = (maze.rows(), maze.columns());
    CellCoordinate::new(rows - 1, columns - 1)
}

impl LevelLayout {
    /// Lay out `maze` over a `width` by `height` viewport. Each cell gets an equal share of the
    /// viewport along each axis.
    pub fn new(maze: &Maze, width: Width, height: Height, config: &LayoutConfig) -> Result<LevelLayout> {
        let (Width(w), Height(h)) = (width, height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ErrorKind::InvalidViewport(w, h).into());
        }
        config.validate()?;

        let (RowsCount(rows), ColumnsCount(columns)) = (maze.rows(), maze.columns());
        let unit_x = w / columns as f64;
        let unit_y = h / rows as f64;

        let closed_horizontal = maze.horizontal_walls().len() - maze.horizontal_walls().count_true();
        let closed_vertical = maze.vertical_walls().len() - maze.vertical_walls().count_true();
        let mut bodies = Vec::with_capacity(4 + closed_horizontal + closed_vertical + 2);

        let t = config.boundary_thickness;
        bodies.push(Body::fixed_rectangle(BodyLabel::Boundary, w / 2.0, 0.0, w, t));
        bodies.push(Body::fixed_rectangle(BodyLabel::Boundary, w / 2.0, h, w, t));
        bodies.push(Body::fixed_rectangle(BodyLabel::Boundary, 0.0, h / 2.0, t, h));
        bodies.push(Body::fixed_rectangle(BodyLabel::Boundary, w, h / 2.0, t, h));

        // A closed horizontal wall sits along the bottom edge of its cell.
        for (RowIndex(r), ColumnIndex(c)) in maze.horizontal_walls().iter_false() {
            bodies.push(Body::fixed_rectangle(BodyLabel::Wall,
                                              c as f64 * unit_x + unit_x / 2.0,
                                              r as f64 * unit_y + unit_y,
                                              unit_x,
                                              config.wall_thickness));
        }

        // A closed vertical wall sits along the right edge of its cell.
        for (RowIndex(r), ColumnIndex(c)) in maze.vertical_walls().iter_false() {
            bodies.push(Body::fixed_rectangle(BodyLabel::Wall,
                                              c as f64 * unit_x + unit_x,
                                              r as f64 * unit_y + unit_y / 2.0,
                                              config.wall_thickness,
                                              unit_y));
        }

        let goal = goal_cell(maze);
        bodies.push(Body::fixed_rectangle(BodyLabel::Goal,
                                          goal.column as f64 * unit_x + unit_x / 2.0,
                                          goal.row as f64 * unit_y + unit_y / 2.0,
                                          unit_x * config.goal_scale,
                                          unit_y * config.goal_scale));

        let ball = ball_cell();
        bodies.push(Body {
            label: BodyLabel::Ball,
            is_static: false,
            shape: Shape::Circle {
                x: ball.column as f64 * unit_x + unit_x / 2.0,
                y: ball.row as f64 * unit_y + unit_y / 2.0,
                radius: unit_x.min(unit_y) / config.ball_radius_divisor,
            },
        });

        debug!(bodies = bodies.len(), unit_x, unit_y, "level laid out");

        Ok(LevelLayout {
            width: w,
            height: h,
            unit_x,
            unit_y,
            bodies,
        })
    }

    pub fn bodies_labelled(&self, label: BodyLabel) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(move |body| body.label == label)
    }

    pub fn goal(&self) -> Option<&Body> {
        self.bodies_labelled(BodyLabel::Goal).next()
    }

    pub fn ball(&self) -> Option<&Body> {
        self.bodies_labelled(BodyLabel::Ball).next()
    }
}
