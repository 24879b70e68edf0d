// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything
// `error_chain!` creates.
use error_chain::*;

error_chain! {

    errors {
        InvalidGridDimensions(rows: usize, columns: usize) {
            description("invalid maze grid dimensions")
            display("A maze grid needs at least one row and one column, got {} rows by {} columns",
                    rows, columns)
        }

        InvalidViewport(width: f64, height: f64) {
            description("invalid layout viewport")
            display("A layout viewport must have a positive size, got {} by {}", width, height)
        }

        InvalidLayoutConfig(setting: &'static str, value: f64) {
            description("invalid layout configuration")
            display("Layout setting {} must be positive and finite, got {}", setting, value)
        }
    }
}
