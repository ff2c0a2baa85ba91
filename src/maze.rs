use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::cells::Cartesian2DCoordinate;
use crate::generators;
use crate::grid::{Grid, GridError};
use crate::pathing;
use crate::renderers::Renderer;
use crate::units::{CellHeight, CellWidth, ColumnsCount, OffsetX, OffsetY, RowsCount};

/// A generated maze plus its solve state.
///
/// `generate` carves the maze up front, streaming draw events as it goes;
/// `solve` then runs the depth-first search, streaming move events. The
/// `Maze` exclusively owns its grid for the whole generate-then-solve
/// lifecycle.
pub struct Maze {
    grid: Grid,
    solution: Option<Vec<Cartesian2DCoordinate>>,
}

impl Maze {
    /// Build a grid at the given origin, draw its initial fully-walled
    /// cells, open the entrance and exit, and carve a perfect maze with the
    /// recursive backtracker.
    ///
    /// With `Some(seed)` the same seed and dimensions always reproduce an
    /// identical maze; with `None` the generator is seeded from entropy.
    #[allow(clippy::too_many_arguments)]
    pub fn generate(offset_x: OffsetX,
                    offset_y: OffsetY,
                    rows: RowsCount,
                    columns: ColumnsCount,
                    cell_width: CellWidth,
                    cell_height: CellHeight,
                    seed: Option<u64>,
                    renderer: &mut dyn Renderer)
                    -> Result<Maze, GridError> {

        let mut grid = Grid::new(offset_x, offset_y, columns, rows, cell_width, cell_height)?;

        for coord in grid.iter() {
            let cell = *grid.cell(coord).expect("iterator coordinates are in bounds");
            renderer.draw_cell(&cell);
            renderer.tick();
        }

        generators::open_entrance_and_exit(&mut grid, renderer);

        let mut rng = match seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };
        generators::recursive_backtracker(&mut grid, &mut rng, renderer);

        Ok(Maze {
            grid,
            solution: None,
        })
    }

    /// Depth-first search from entrance to exit. Returns whether a path was
    /// found; the path itself is kept for `solution()`. On a freshly
    /// generated maze this is always true.
    pub fn solve(&mut self, renderer: &mut dyn Renderer) -> bool {
        self.solution = pathing::dfs_solve(&mut self.grid, renderer);
        self.solution.is_some()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn solution(&self) -> Option<&[Cartesian2DCoordinate]> {
        self.solution.as_deref()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Cell;
    use crate::renderers::NullRenderer;

    fn generate(columns: usize, rows: usize, seed: u64) -> Maze {
        Maze::generate(OffsetX(0),
                       OffsetY(0),
                       RowsCount(rows),
                       ColumnsCount(columns),
                       CellWidth(10),
                       CellHeight(10),
                       Some(seed),
                       &mut NullRenderer)
            .expect("valid test dimensions")
    }

    #[test]
    fn zero_dimensions_abort_generation() {
        let result = Maze::generate(OffsetX(0),
                                    OffsetY(0),
                                    RowsCount(0),
                                    ColumnsCount(5),
                                    CellWidth(10),
                                    CellHeight(10),
                                    Some(1),
                                    &mut NullRenderer);
        assert_eq!(result.err(), Some(GridError::InvalidDimension));
    }

    #[test]
    fn generated_five_by_five_has_clean_visited_flags() {
        let maze = generate(5, 5, 99);
        let grid = maze.grid();
        assert_eq!(grid.size(), 25);
        assert!(grid.iter().all(|coord| !grid.cell(coord).unwrap().visited));
    }

    #[test]
    fn generation_opens_the_boundary() {
        let maze = generate(6, 4, 100);
        let grid = maze.grid();
        assert!(!grid.cell(grid.entrance()).unwrap().has_north_wall);
        assert!(!grid.cell(grid.exit()).unwrap().has_south_wall);
    }

    #[test]
    fn solve_finds_a_path_and_records_it() {
        let mut maze = generate(10, 8, 101);
        assert!(maze.solution().is_none());
        assert!(maze.solve(&mut NullRenderer));

        let path = maze.solution().expect("solve succeeded");
        assert_eq!(*path.first().unwrap(), maze.grid().entrance());
        assert_eq!(*path.last().unwrap(), maze.grid().exit());
    }

    #[test]
    fn identical_seed_and_dimensions_reproduce_the_maze() {
        let first = generate(11, 7, 4242);
        let second = generate(11, 7, 4242);
        assert_eq!(format!("{}", first.grid()), format!("{}", second.grid()));
    }

    #[test]
    fn every_cell_is_drawn_at_least_once_during_generation() {
        struct CellDrawCounter(usize);
        impl Renderer for CellDrawCounter {
            fn draw_cell(&mut self, _: &Cell) {
                self.0 += 1;
            }
            fn draw_move(&mut self, _: &Cell, _: &Cell, _: bool) {}
        }

        let mut counter = CellDrawCounter(0);
        let maze = Maze::generate(OffsetX(0),
                                  OffsetY(0),
                                  RowsCount(4),
                                  ColumnsCount(4),
                                  CellWidth(10),
                                  CellHeight(10),
                                  Some(1),
                                  &mut counter)
            .unwrap();
        // Initial draw of every cell, then redraws per wall break.
        assert!(counter.0 >= maze.grid().size());
    }

    #[test]
    fn origin_offset_shifts_cell_geometry() {
        let maze = Maze::generate(OffsetX(50),
                                  OffsetY(50),
                                  RowsCount(3),
                                  ColumnsCount(3),
                                  CellWidth(20),
                                  CellHeight(20),
                                  Some(1),
                                  &mut NullRenderer)
            .unwrap();
        let cell = maze.grid().cell(Cartesian2DCoordinate::new(1, 2)).unwrap();
        assert_eq!((cell.x1, cell.y1, cell.x2, cell.y2), (70, 90, 90, 110));
    }
}
