//! **maze_walls** generates perfect mazes as wall matrices and lays them out as static level
//! geometry for a physics driven ball-and-goal game.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod layout;
pub mod matrix;
pub mod maze;
pub mod maze_displays;
pub mod pathing;
pub mod units;
