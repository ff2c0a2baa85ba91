use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;
use std::rc::Rc;

use docopt::Docopt;
use error_chain::bail;
use itertools::Itertools;
use serde_derive::Deserialize;

use mazer::cells::CoordinateSmallVec;
use mazer::grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay};
use mazer::maze::Maze;
use mazer::renderers::{ImageRenderer, NullRenderer, Renderer};
use mazer::units::{CellHeight, CellWidth, ColumnsCount, OffsetX, OffsetY, RowsCount};

const USAGE: &str = "Mazer

Usage:
    mazer_driver -h | --help
    mazer_driver [--grid-width=<w> --grid-height=<h>] [--cell-pixels=<n>] [--seed=<s>] [--text-out=<path>] [--image-out=<path>] [--no-solve] [--mark-start-end] [--show-route]

Options:
    -h --help            Show this screen.
    --grid-width=<w>     The grid width in cells [default: 20].
    --grid-height=<h>    The grid height in cells [default: 20].
    --cell-pixels=<n>    Pixel count to render one cell side [default: 10].
    --seed=<s>           Seed the generator so the same maze is reproduced on every run.
    --text-out=<path>    Output file path for a textual rendering of the maze.
    --image-out=<path>   Output file path for an image rendering of the maze. Always PNG format.
    --no-solve           Generate only, skipping the depth-first solve.
    --mark-start-end     Mark the entrance and exit cells instead of the solved path.
    --show-route         Also print the solved route as a coordinate list.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_cell_pixels: u32,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_image_out: String,
    flag_no_solve: bool,
    flag_mark_start_end: bool,
    flag_show_route: bool,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types.
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageWriteFailure(::image::ImageError);
            Io(::std::io::Error);
            GridFailure(::mazer::grid::GridError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut image_renderer = if args.flag_image_out.is_empty() {
        None
    } else {
        // The driver draws at origin (0,0), so the image needs one extra
        // pixel row/column for the far boundary walls.
        Some(ImageRenderer::new(args.flag_grid_width as u32 * args.flag_cell_pixels + 1,
                                args.flag_grid_height as u32 * args.flag_cell_pixels + 1))
    };
    let mut null_renderer = NullRenderer;
    let renderer: &mut dyn Renderer = match image_renderer {
        Some(ref mut r) => r,
        None => &mut null_renderer,
    };

    let mut maze = Maze::generate(OffsetX(0),
                                  OffsetY(0),
                                  RowsCount(args.flag_grid_height),
                                  ColumnsCount(args.flag_grid_width),
                                  CellWidth(args.flag_cell_pixels),
                                  CellHeight(args.flag_cell_pixels),
                                  args.flag_seed,
                                  renderer)?;

    if !args.flag_no_solve && !maze.solve(renderer) {
        // Cannot happen on a freshly carved perfect maze.
        bail!("no path from entrance to exit");
    }

    set_maze_griddisplay(&mut maze, &args);

    let rendered_text = format!("{}", maze.grid());
    if args.flag_text_out.is_empty() {
        println!("{}", rendered_text);
    } else {
        write_text_to_file(&rendered_text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if args.flag_show_route {
        if let Some(path) = maze.solution() {
            println!("route ({} cells): {}",
                     path.len(),
                     path.iter().map(|coord| format!("({},{})", coord.x, coord.y)).join(" -> "));
        }
    }

    if let Some(ref renderer) = image_renderer {
        renderer.save(Path::new(&args.flag_image_out))
            .chain_err(|| format!("Failed to write maze image to {}", args.flag_image_out))?;
    }

    Ok(())
}

/// Decide what the textual grid rendering shows inside the cells: the solved
/// path when there is one, otherwise the entrance/exit markers.
fn set_maze_griddisplay(maze: &mut Maze, args: &MazeArgs) {
    let path = maze.solution().map(|p| p.to_vec());

    match path {
        Some(ref path) if !args.flag_mark_start_end => {
            let display = Rc::new(PathDisplay::new(path));
            maze.grid_mut().set_grid_display(Some(display as Rc<dyn GridDisplay>));
        }
        _ => {
            let starts: CoordinateSmallVec = [maze.grid().entrance()].iter().cloned().collect();
            let ends: CoordinateSmallVec = [maze.grid().exit()].iter().cloned().collect();
            let display = Rc::new(StartEndPointsDisplay::new(starts, ends));
            maze.grid_mut().set_grid_display(Some(display as Rc<dyn GridDisplay>));
        }
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
