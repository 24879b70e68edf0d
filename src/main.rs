use docopt::Docopt;
use serde_derive::Deserialize;
use maze_walls::{
    generators,
    layout::{self, LayoutConfig, LevelLayout},
    maze::Maze,
    maze_displays::{PathDisplay, StartGoalDisplay, TextRender},
    pathing,
    units::{ColumnsCount, Height, RowsCount, Width},
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Maze Walls

Usage:
    mazes_driver -h | --help
    mazes_driver [--rows=<n>] [--columns=<n>] [--seed=<s>] [--show-path] [--text-out=<path>] [--layout-out=<path>] [--viewport-width=<w>] [--viewport-height=<h>] [--wall-thickness=<t>] [--save-edges=<path>]

Options:
    -h --help               Show this screen.
    --rows=<n>              Number of cell rows in the maze [default: 7].
    --columns=<n>           Number of cell columns in the maze [default: 7].
    --seed=<s>              Seed the random generator to get a repeatable maze.
    --show-path             Mark the route from the ball's cell (top left) to the goal cell (bottom right).
    --text-out=<path>       Output file path for a textual rendering of the maze instead of printing it.
    --layout-out=<path>     Write the static level geometry (walls, goal, ball) as JSON.
    --viewport-width=<w>    Width of the level viewport [default: 800].
    --viewport-height=<h>   Height of the level viewport [default: 600].
    --wall-thickness=<t>    Thickness of the barrier for each closed wall [default: 3].
    --save-edges=<path>     Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_text_out: String,
    flag_layout_out: String,
    flag_viewport_width: f64,
    flag_viewport_height: f64,
    flag_wall_thickness: f64,
    flag_save_edges: String,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_walls::errors::Error, ::maze_walls::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maze_walls=info,mazes_driver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        // docopt handles --help and usage errors with its own exit codes and messages
        if let ErrorKind::DocOptFailure(ref docopt_error) = *e.kind() {
            docopt_error.exit();
        }
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let maze = generate_maze(&args)?;
    info!(rows = args.flag_rows, columns = args.flag_columns, start = ?maze.start(), "maze ready");

    let text = render_maze_text(&maze, &args);
    if args.flag_text_out.is_empty() {
        println!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        info!(path = %args.flag_text_out, "wrote maze text");
    }

    if !args.flag_layout_out.is_empty() {
        save_level_layout(&maze, &args)?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    Ok(())
}

fn generate_maze(args: &MazeArgs) -> Result<Maze> {
    let rows = RowsCount(args.flag_rows);
    let columns = ColumnsCount(args.flag_columns);

    let maze = if let Some(seed) = args.flag_seed {
        generators::recursive_backtracker(rows, columns, &mut generators::seeded_rng(seed))?
    } else {
        generators::recursive_backtracker(rows, columns, &mut generators::entropy_rng())?
    };
    Ok(maze)
}

fn render_maze_text(maze: &Maze, args: &MazeArgs) -> String {
    let start = layout::ball_cell();
    let goal = layout::goal_cell(maze);

    if args.flag_show_path {
        let path = pathing::Distances::new(maze, start)
            .and_then(|distances| pathing::shortest_path(maze, &distances, goal));
        if let Some(path) = path {
            let display = PathDisplay::new(&path);
            return format!("{}", TextRender::new(maze).with_display(&display));
        }
        // Only a broken maze has no route from the ball to the goal.
        warn!(?start, ?goal, "no path between ball and goal");
    }

    let display = StartGoalDisplay::new(start, goal);
    format!("{}", TextRender::new(maze).with_display(&display))
}

fn save_level_layout(maze: &Maze, args: &MazeArgs) -> Result<()> {
    let config = LayoutConfig {
        wall_thickness: args.flag_wall_thickness,
        ..LayoutConfig::default()
    };
    let level = LevelLayout::new(maze,
                                 Width(args.flag_viewport_width),
                                 Height(args.flag_viewport_height),
                                 &config)?;

    let file = File::create(&args.flag_layout_out)
        .chain_err(|| format!("Failed to create layout file {}", args.flag_layout_out))?;
    serde_json::to_writer_pretty(io::BufWriter::new(file), &level)?;
    info!(path = %args.flag_layout_out, bodies = level.bodies.len(), "wrote level layout");
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let columns = maze.columns();
    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze.size(), maze.passages_count().0));

    for (src, dst) in maze.iter_passages() {
        let src_as_1_based_index = src.row_major_index(columns) + 1;
        let dst_as_1_based_index = dst.row_major_index(columns) + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!(path = %file_path, "wrote maze graph");

    Ok(())
}
