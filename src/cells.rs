use std::convert::From;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, RowIndex};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const COMPASS_PRIMARIES: [CompassPrimary; 4] = [
    CompassPrimary::North,
    CompassPrimary::South,
    CompassPrimary::East,
    CompassPrimary::West,
];

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Creates a new `Cartesian2DCoordinate` offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable (u32 underflow).
/// Callers still need a grid to decide whether the offset coordinate is in bounds.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::South => Some(Cartesian2DCoordinate { x, y: y + 1 }),
        CompassPrimary::East => Some(Cartesian2DCoordinate { x: x + 1, y }),
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

/// One square cell of the maze: four independent wall flags, a visited marker
/// shared (serially) by the carving and solving phases, and the pixel bounding
/// box used only for rendering.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub has_north_wall: bool,
    pub has_south_wall: bool,
    pub has_east_wall: bool,
    pub has_west_wall: bool,
    pub visited: bool,
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Cell {
    /// A fresh cell with all four walls up and `visited` clear.
    pub fn closed(x1: u32, y1: u32, x2: u32, y2: u32) -> Cell {
        Cell {
            has_north_wall: true,
            has_south_wall: true,
            has_east_wall: true,
            has_west_wall: true,
            visited: false,
            x1,
            y1,
            x2,
            y2,
        }
    }

    pub fn is_wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.has_north_wall,
            CompassPrimary::South => self.has_south_wall,
            CompassPrimary::East => self.has_east_wall,
            CompassPrimary::West => self.has_west_wall,
        }
    }

    pub fn remove_wall(&mut self, dir: CompassPrimary) {
        match dir {
            CompassPrimary::North => self.has_north_wall = false,
            CompassPrimary::South => self.has_south_wall = false,
            CompassPrimary::East => self.has_east_wall = false,
            CompassPrimary::West => self.has_west_wall = false,
        }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    pub fn centre(&self) -> (u32, u32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }
}
