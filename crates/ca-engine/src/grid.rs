//! 2D grid for the Game of Life.

use ca_core::{Cell, Dimensions, Direction, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A 2D toroidal grid of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-dead grid
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![Cell::Dead; dimensions.area()],
        }
    }

    pub(crate) fn from_cells(dimensions: Dimensions, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), dimensions.area());
        Self { dimensions, cells }
    }

    /// Build a grid from rows of 0/1 values; all rows must have the same length
    pub fn from_bits(rows: &[Vec<u8>]) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map(Vec::len).unwrap_or(0);
        let dimensions = Dimensions::new(num_rows, num_cols);
        dimensions.validate()?;

        let mut cells = Vec::with_capacity(dimensions.area());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != num_cols {
                return Err(Error::Validation(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    num_cols
                )));
            }
            for &bit in row.iter() {
                cells.push(Cell::from_bit(bit)?);
            }
        }

        Ok(Self { dimensions, cells })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    pub fn cols(&self) -> usize {
        self.dimensions.cols
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set cell at position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.pos_to_index(pos);
        self.cells[index] = cell;
    }

    pub fn toggle(&mut self, pos: Position) {
        let index = self.pos_to_index(pos);
        self.cells[index] = self.cells[index].toggled();
    }

    /// The 8 Moore neighbors of a position, wrapped onto the torus.
    ///
    /// On grids narrower than 3 cells the same wrapped cell can appear more
    /// than once, and a cell can be its own neighbor.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Direction::all().into_iter().map(move |direction| {
            let (drow, dcol) = direction.to_delta();
            let neighbor_pos = self.wrap(pos.add(drow, dcol));
            (neighbor_pos, self.get(neighbor_pos))
        })
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    fn wrap(&self, pos: Position) -> Position {
        pos.wrap(self.dimensions.rows as i32, self.dimensions.cols as i32)
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = self.wrap(pos);
        wrapped.row as usize * self.dimensions.cols + wrapped.col as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let row = (index / self.dimensions.cols) as i32;
        let col = (index % self.dimensions.cols) as i32;
        Position::new(row, col)
    }

    /// Iterator over all positions, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Iterator over the rows as cell slices
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.dimensions.cols)
    }

    /// The cell-state matrix handed to raster displays
    pub fn to_bit_matrix(&self) -> Vec<Vec<u8>> {
        self.row_slices()
            .map(|row| row.iter().map(Cell::bit).collect())
            .collect()
    }
}
