//! Literal Game of Life starting patterns.

use crate::grid::Grid;
use ca_core::{Cell, Dimensions, Error, PatternKind, Position, Result};

/// A set of live cells relative to a top-left origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    cells: Vec<Position>,
}

const BLOCK: &[(i32, i32)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

const BLINKER: &[(i32, i32)] = &[(1, 0), (1, 1), (1, 2)];

// Travels one cell down and one cell right every 4 generations
const GLIDER: &[(i32, i32)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

// Gosper glider gun
#[rustfmt::skip]
const GLIDER_GUN: &[(i32, i32)] = &[
    (5, 1), (5, 2), (6, 1), (6, 2),
    (5, 11), (6, 11), (7, 11), (4, 12), (8, 12), (3, 13), (9, 13), (3, 14), (9, 14),
    (6, 15), (4, 16), (8, 16), (5, 17), (6, 17), (7, 17), (6, 18),
    (3, 21), (4, 21), (5, 21), (3, 22), (4, 22), (5, 22), (2, 23), (6, 23),
    (1, 25), (2, 25), (6, 25), (7, 25),
    (3, 35), (4, 35), (3, 36), (4, 36),
];

impl Pattern {
    fn from_coords(name: &'static str, coords: &[(i32, i32)]) -> Self {
        Self {
            name,
            cells: coords
                .iter()
                .map(|&(row, col)| Position::new(row, col))
                .collect(),
        }
    }

    pub fn of(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Block => Self::from_coords("block", BLOCK),
            PatternKind::Blinker => Self::from_coords("blinker", BLINKER),
            PatternKind::Glider => Self::from_coords("glider", GLIDER),
            PatternKind::GliderGun => Self::from_coords("glider_gun", GLIDER_GUN),
        }
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Smallest box containing the pattern when anchored at (0, 0)
    pub fn extent(&self) -> Dimensions {
        let rows = self.cells.iter().map(|pos| pos.row + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|pos| pos.col + 1).max().unwrap_or(0);
        Dimensions::new(rows as usize, cols as usize)
    }

    /// Set the pattern's cells alive with their offsets taken from `origin`.
    ///
    /// Positions wrap around the grid edges. The pattern must fit inside the
    /// grid so that wrapping never folds it onto itself.
    pub fn place(&self, grid: &mut Grid, origin: Position) -> Result<()> {
        let extent = self.extent();
        if extent.rows > grid.rows() || extent.cols > grid.cols() {
            return Err(Error::Validation(format!(
                "pattern {} needs {} cells but the grid is {}",
                self.name,
                extent,
                grid.dimensions()
            )));
        }
        // Offsets are smaller than the grid, so adding them to a wrapped
        // origin cannot overflow
        let origin = origin.wrap(grid.rows() as i32, grid.cols() as i32);
        for pos in &self.cells {
            grid.set(origin.add(pos.row, pos.col), Cell::Alive);
        }
        Ok(())
    }

    /// A dead grid with the pattern placed at `origin`
    pub fn to_grid(&self, dimensions: Dimensions, origin: Position) -> Result<Grid> {
        dimensions.validate()?;
        let mut grid = Grid::new(dimensions);
        self.place(&mut grid, origin)?;
        Ok(grid)
    }
}
