use std::path::Path;

use image::{ImageError, Rgb, RgbImage};

use crate::cells::Cell;
use crate::grid::Grid;

pub const BACKGROUND_COLOUR: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
pub const WALL_COLOUR: Rgb<u8> = Rgb([0, 0, 0]);
pub const MOVE_COLOUR: Rgb<u8> = Rgb([0xff, 0, 0]);
pub const UNDO_MOVE_COLOUR: Rgb<u8> = Rgb([0x80, 0x80, 0x80]);

/// Sink for the draw events emitted while generating and solving a maze.
///
/// The events are synchronous notifications: the algorithms call straight
/// into the renderer after each wall break or solver move and never depend
/// on what the renderer does with them. `tick` is a pacing hook for drivers
/// that want to throttle a live visualisation.
pub trait Renderer {
    /// A cell's walls are final for this frame - draw all four sides.
    fn draw_cell(&mut self, cell: &Cell);

    /// The solver advanced from one cell into another, or with `undo` set,
    /// backtracked out of a dead end.
    fn draw_move(&mut self, from_cell: &Cell, to_cell: &Cell, undo: bool);

    fn tick(&mut self) {}
}

/// Renderer that ignores every event. Keeps the algorithms headless in tests.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_cell(&mut self, _: &Cell) {}
    fn draw_move(&mut self, _: &Cell, _: &Cell, _: bool) {}
}

/// Draws the maze into an RGB image buffer, one axis-aligned line per wall
/// side and one centre-to-centre line per solver move. Walls are drawn in
/// black, erased in the background colour when broken, moves in red and
/// undone moves in gray.
pub struct ImageRenderer {
    image: RgbImage,
}

impl ImageRenderer {
    pub fn new(pixel_width: u32, pixel_height: u32) -> ImageRenderer {
        ImageRenderer { image: RgbImage::from_pixel(pixel_width, pixel_height, BACKGROUND_COLOUR) }
    }

    /// An image sized to fit the grid with a border matching the grid's origin offset.
    pub fn fitted_to(grid: &Grid) -> ImageRenderer {
        let top_left = grid.cell(grid.entrance()).expect("grid has an entrance cell");
        let bottom_right = grid.cell(grid.exit()).expect("grid has an exit cell");
        ImageRenderer::new(bottom_right.x2 + top_left.x1 + 1,
                           bottom_right.y2 + top_left.y1 + 1)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn save(&self, path: &Path) -> Result<(), ImageError> {
        self.image.save(path)
    }

    // All wall and move lines are axis aligned so a general line rasteriser
    // is unnecessary. Out of bounds pixels are clipped.
    fn draw_line(&mut self, from: (u32, u32), to: (u32, u32), colour: Rgb<u8>) {
        let (x1, y1) = (from.0.min(to.0), from.1.min(to.1));
        let (x2, y2) = (from.0.max(to.0), from.1.max(to.1));
        for x in x1..=x2 {
            for y in y1..=y2 {
                if x < self.image.width() && y < self.image.height() {
                    self.image.put_pixel(x, y, colour);
                }
            }
        }
    }
}

impl Renderer for ImageRenderer {
    fn draw_cell(&mut self, cell: &Cell) {
        let wall_or_gap = |present| if present { WALL_COLOUR } else { BACKGROUND_COLOUR };
        let (x1, y1, x2, y2) = (cell.x1, cell.y1, cell.x2, cell.y2);
        self.draw_line((x1, y1), (x2, y1), wall_or_gap(cell.has_north_wall));
        self.draw_line((x1, y2), (x2, y2), wall_or_gap(cell.has_south_wall));
        self.draw_line((x1, y1), (x1, y2), wall_or_gap(cell.has_west_wall));
        self.draw_line((x2, y1), (x2, y2), wall_or_gap(cell.has_east_wall));
    }

    fn draw_move(&mut self, from_cell: &Cell, to_cell: &Cell, undo: bool) {
        let colour = if undo { UNDO_MOVE_COLOUR } else { MOVE_COLOUR };
        self.draw_line(from_cell.centre(), to_cell.centre(), colour);
    }
}
