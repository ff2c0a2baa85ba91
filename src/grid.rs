use std::error;
use std::fmt;
use std::rc::Rc;

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, Cell, CompassPrimary,
                   CoordinateOptionSmallVec, CoordinateSmallVec, COMPASS_PRIMARIES};
use crate::grid_displays::GridDisplay;
use crate::units::{CellHeight, CellWidth, ColumnsCount, OffsetX, OffsetY, RowsCount};

/// A rectangular grid of `Cell`s, stored row-major.
///
/// The grid maintains the bidirectional wall invariant: whenever a wall is
/// broken between two adjacent cells, both facing flags are cleared in the
/// same call. Walls are only ever mutated through `break_wall_between` (and
/// the entrance/exit openings in the generators module, which touch boundary
/// sides that face no neighbouring cell).
pub struct Grid {
    cells: Vec<Cell>,
    rows: RowsCount,
    columns: ColumnsCount,
    cell_width: CellWidth,
    cell_height: CellHeight,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    /// A grid dimension of zero rows or zero columns was requested.
    InvalidDimension,
    /// Wall breaking was requested between cells that are not in-bounds
    /// neighbours. This is a caller contract violation, not a condition
    /// that arises from well formed input.
    InvalidAdjacency,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::InvalidDimension => write!(f, "grid dimensions must be at least 1x1"),
            GridError::InvalidAdjacency => {
                write!(f, "wall breaking requires two adjacent in-bounds cells")
            }
        }
    }
}

impl error::Error for GridError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, passages: {:?}",
               self.rows,
               self.columns,
               self.passages_count())
    }
}

impl Grid {
    /// Build a grid of `columns` x `rows` closed cells. Each cell's pixel
    /// bounding box is derived from the origin offset and the cell size;
    /// it carries no algorithmic meaning.
    pub fn new(offset_x: OffsetX,
               offset_y: OffsetY,
               columns: ColumnsCount,
               rows: RowsCount,
               cell_width: CellWidth,
               cell_height: CellHeight)
               -> Result<Grid, GridError> {

        let (ColumnsCount(columns_count), RowsCount(rows_count)) = (columns, rows);
        if columns_count < 1 || rows_count < 1 {
            return Err(GridError::InvalidDimension);
        }

        let (OffsetX(x_start), OffsetY(y_start)) = (offset_x, offset_y);
        let (CellWidth(w), CellHeight(h)) = (cell_width, cell_height);

        let mut cells = Vec::with_capacity(columns_count * rows_count);
        for row in 0..rows_count {
            for column in 0..columns_count {
                let x1 = x_start + column as u32 * w;
                let y1 = y_start + row as u32 * h;
                cells.push(Cell::closed(x1, y1, x1 + w, y1 + h));
            }
        }

        Ok(Grid {
            cells,
            rows,
            columns,
            cell_width,
            cell_height,
            grid_display: None,
        })
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.columns.0 * self.rows.0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn cell_width(&self) -> CellWidth {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> CellHeight {
        self.cell_height
    }

    /// The cell every carve and solve starts from.
    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The goal cell of the solver, diagonally opposite the entrance.
    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.columns.0 as u32 - 1, self.rows.0 as u32 - 1)
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(move |index| &self.cells[index])
    }

    #[inline]
    pub fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut Cell> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// The adjacent coordinate in the given direction, or None at the grid
    /// boundary. A missing neighbour is a normal condition, not an error.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, direction)
            .filter(|&neighbour_coord| self.is_valid_coordinate(neighbour_coord))
    }

    /// In-bounds cells adjacent to a coordinate, in fixed N, S, E, W order.
    /// The discovery order is deliberately deterministic: generator
    /// randomness applies to the choice among candidates only.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        COMPASS_PRIMARIES
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|&direction| self.neighbour_at_direction(coord, direction))
            .collect()
    }

    /// Clear the pair of facing wall flags between two adjacent cells.
    /// Both flags change in the same call, which is what maintains the
    /// bidirectional wall invariant.
    pub fn break_wall_between(&mut self,
                              a: Cartesian2DCoordinate,
                              b: Cartesian2DCoordinate)
                              -> Result<(), GridError> {
        let direction = self.direction_between(a, b).ok_or(GridError::InvalidAdjacency)?;

        self.cell_mut(a).expect("adjacency check kept coordinate a in bounds").remove_wall(direction);
        self.cell_mut(b)
            .expect("adjacency check kept coordinate b in bounds")
            .remove_wall(direction.opposite());
        Ok(())
    }

    /// The direction from `a` to `b` when they are adjacent in-bounds cells.
    pub fn direction_between(&self,
                             a: Cartesian2DCoordinate,
                             b: Cartesian2DCoordinate)
                             -> Option<CompassPrimary> {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return None;
        }
        COMPASS_PRIMARIES
            .iter()
            .cloned()
            .find(|&dir| offset_coordinate(a, dir) == Some(b))
    }

    /// Is the given side of the cell open (no wall)? False for invalid coordinates.
    pub fn is_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.cell(coord).map_or(false, |cell| !cell.is_wall(direction))
    }

    /// Are two adjacent cells connected by a passage?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        self.direction_between(a, b).map_or(false, |dir| self.is_open(a, dir))
    }

    /// Count of broken interior walls - the edges of the carved passage graph.
    /// Each passage is counted once by scanning only east and south sides.
    pub fn passages_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                let east = self.neighbour_at_direction(coord, CompassPrimary::East)
                    .map_or(0, |_| !self.cell(coord).unwrap().has_east_wall as usize);
                let south = self.neighbour_at_direction(coord, CompassPrimary::South)
                    .map_or(0, |_| !self.cell(coord).unwrap().has_south_wall as usize);
                east + south
            })
            .sum()
    }

    /// Clear every cell's `visited` flag. Called between the carving and
    /// solving phases so the solver starts from a clean slate.
    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_length: self.columns.0,
            cells_count: self.size(),
        }
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Row,
            current_index: 0,
            rows: self.rows.0,
            columns: self.columns.0,
        }
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Column,
            current_index: 0,
            rows: self.rows.0,
            columns: self.columns.0,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_CORNER: char = '+';
        const WALL_HORIZONTAL: &str = "---";
        const GAP_HORIZONTAL: &str = "   ";
        const WALL_VERTICAL: char = '|';
        const GAP_VERTICAL: char = ' ';

        let render_cell_body = |coord: Cartesian2DCoordinate| -> String {
            if let Some(ref display) = self.grid_display {
                display.render_cell_body(coord)
            } else {
                String::from(GAP_HORIZONTAL)
            }
        };

        let mut output = String::new();
        for row in self.iter_row() {

            // Each cell renders its own north and west walls. The shared
            // south/east sides come out right because of the bidirectional
            // wall invariant.
            let mut top_line = String::new();
            let mut middle_line = String::new();
            for &coord in &row {
                let cell = self.cell(coord).expect("iterator coordinates are in bounds");
                top_line.push(WALL_CORNER);
                top_line.push_str(if cell.has_north_wall {
                    WALL_HORIZONTAL
                } else {
                    GAP_HORIZONTAL
                });
                middle_line.push(if cell.has_west_wall {
                    WALL_VERTICAL
                } else {
                    GAP_VERTICAL
                });
                middle_line.push_str(&render_cell_body(coord));
            }
            let row_end = *row.last().expect("grid rows are never empty");
            top_line.push(WALL_CORNER);
            middle_line.push(if self.cell(row_end).unwrap().has_east_wall {
                WALL_VERTICAL
            } else {
                GAP_VERTICAL
            });

            output.push_str(&top_line);
            output.push('\n');
            output.push_str(&middle_line);
            output.push('\n');
        }

        // Bottom boundary from the last row's south walls.
        let last_row_y = self.rows.0 as u32 - 1;
        for x in 0..self.columns.0 as u32 {
            let cell = self.cell(Cartesian2DCoordinate::new(x, last_row_y)).unwrap();
            output.push(WALL_CORNER);
            output.push_str(if cell.has_south_wall {
                WALL_HORIZONTAL
            } else {
                GAP_HORIZONTAL
            });
        }
        output.push(WALL_CORNER);
        output.push('\n');

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_length: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let x = self.current_cell_number % self.row_length;
            let y = self.current_cell_number / self.row_length;
            self.current_cell_number += 1;
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = Cartesian2DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    rows: usize,
    columns: usize,
}

impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let (batches, batch_length) = match self.iter_type {
            BatchIterType::Row => (self.rows, self.columns),
            BatchIterType::Column => (self.columns, self.rows),
        };
        if self.current_index < batches {
            let coords = (0..batch_length)
                .map(|i| {
                    if let BatchIterType::Row = self.iter_type {
                        Cartesian2DCoordinate::new(i as u32, self.current_index as u32)
                    } else {
                        Cartesian2DCoordinate::new(self.current_index as u32, i as u32)
                    }
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let batches = match self.iter_type {
            BatchIterType::Row => self.rows,
            BatchIterType::Column => self.columns,
        };
        let lower_bound = batches - self.current_index;
        (lower_bound, Some(lower_bound))
    }
}
