//! Conway's Game of Life on a torus.

use crate::grid::Grid;
use ca_core::{Cell, Dimensions, LifeConfig, Position, Result, UpdateMode};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// B3/S23: a live cell survives with 2 or 3 live neighbors, a dead cell is
/// born with exactly 3, every other cell is dead in the next generation.
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2 | 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Synchronous Game of Life over a fixed-size toroidal grid
#[derive(Debug, Clone)]
pub struct GameOfLifeEngine {
    dimensions: Dimensions,
}

impl GameOfLifeEngine {
    pub fn new(dimensions: Dimensions) -> Result<Self> {
        dimensions.validate()?;
        Ok(Self { dimensions })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Live cells among the 8 wrapped neighbors of `pos`
    pub fn live_neighbors(&self, grid: &Grid, pos: Position) -> u8 {
        grid.neighbors(pos)
            .filter(|(_, cell)| cell.is_alive())
            .count() as u8
    }

    /// Compute the next generation from a frozen snapshot.
    ///
    /// # Panics
    ///
    /// Panics if `current` does not have the engine's dimensions.
    pub fn advance(&self, current: &Grid) -> Grid {
        self.check_dimensions(current);

        let cells = current
            .iter()
            .map(|(pos, cell)| next_state(cell, self.live_neighbors(current, pos)))
            .collect();

        Grid::from_cells(self.dimensions, cells)
    }

    /// Update cells one at a time in a random order.
    ///
    /// Works on a copy of `current`; each cell sees the updates made before
    /// it in the visit order. The order used is returned alongside the grid.
    ///
    /// # Panics
    ///
    /// Panics if `current` does not have the engine's dimensions.
    pub fn advance_async(&self, current: &Grid, rng: &mut ChaCha8Rng) -> AsyncStep {
        self.check_dimensions(current);

        let mut grid = current.clone();
        let mut visit_order: Vec<Position> = grid.positions().collect();
        visit_order.shuffle(rng);

        for &pos in &visit_order {
            let next = next_state(grid.get(pos), self.live_neighbors(&grid, pos));
            grid.set(pos, next);
        }

        AsyncStep { grid, visit_order }
    }

    fn check_dimensions(&self, grid: &Grid) {
        assert_eq!(
            grid.dimensions(),
            self.dimensions,
            "grid dimensions do not match the engine"
        );
    }
}

/// Result of one asynchronous update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncStep {
    pub grid: Grid,
    /// Order in which cells were updated
    pub visit_order: Vec<Position>,
}

/// An engine bound to one update mode
pub struct LifeStepper {
    engine: GameOfLifeEngine,
    mode: UpdateMode,
    rng: Option<ChaCha8Rng>,
    last_visit_order: Option<Vec<Position>>,
}

impl LifeStepper {
    pub fn new(engine: GameOfLifeEngine, mode: UpdateMode) -> Self {
        let rng = match mode {
            UpdateMode::Synchronous => None,
            UpdateMode::Asynchronous { seed } => Some(ChaCha8Rng::seed_from_u64(seed)),
        };
        Self {
            engine,
            mode,
            rng,
            last_visit_order: None,
        }
    }

    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            GameOfLifeEngine::new(config.dimensions)?,
            config.update_mode,
        ))
    }

    pub fn engine(&self) -> &GameOfLifeEngine {
        &self.engine
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Visit order of the latest asynchronous step
    pub fn last_visit_order(&self) -> Option<&[Position]> {
        self.last_visit_order.as_deref()
    }

    pub fn step(&mut self, current: &Grid) -> Grid {
        match self.rng.as_mut() {
            None => self.engine.advance(current),
            Some(rng) => {
                let AsyncStep { grid, visit_order } = self.engine.advance_async(current, rng);
                trace!(cells = visit_order.len(), "Asynchronous step");
                self.last_visit_order = Some(visit_order);
                grid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Pattern;
    use ca_core::PatternKind;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn engine(rows: usize, cols: usize) -> GameOfLifeEngine {
        GameOfLifeEngine::new(Dimensions::new(rows, cols)).unwrap()
    }

    fn grid_with(dims: Dimensions, live: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(dims);
        for &(row, col) in live {
            grid.set(Position::new(row, col), Cell::Alive);
        }
        grid
    }

    #[test]
    fn test_rule() {
        for n in 0..=8 {
            let expected_alive = n == 2 || n == 3;
            assert_eq!(next_state(Cell::Alive, n).is_alive(), expected_alive, "alive, {}", n);
            assert_eq!(next_state(Cell::Dead, n).is_alive(), n == 3, "dead, {}", n);
        }
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let grid = Grid::new(Dimensions::square(3));
        assert_eq!(engine(3, 3).advance(&grid), grid);
    }

    #[test]
    fn test_single_cell_dies() {
        let grid = grid_with(Dimensions::square(5), &[(2, 2)]);
        let next = engine(5, 5).advance(&grid);
        assert!(next.is_empty());
    }

    #[test]
    fn test_block_is_still_life() {
        let grid = grid_with(Dimensions::square(6), &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let engine = engine(6, 6);
        for pos in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            assert_eq!(engine.live_neighbors(&grid, Position::new(pos.0, pos.1)), 3);
        }
        assert_eq!(engine.advance(&grid), grid);
    }

    #[test]
    fn test_block_across_torus_seam() {
        // Block split over all four corners
        let grid = grid_with(Dimensions::new(5, 7), &[(0, 0), (0, 6), (4, 0), (4, 6)]);
        assert_eq!(engine(5, 7).advance(&grid), grid);
    }

    #[test]
    fn test_blinker_oscillates() {
        let engine = engine(5, 5);
        let horizontal = grid_with(Dimensions::square(5), &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid_with(Dimensions::square(5), &[(1, 2), (2, 2), (3, 2)]);

        let next = engine.advance(&horizontal);
        assert_eq!(next, vertical);
        assert_eq!(engine.advance(&next), horizontal);
    }

    #[test]
    fn test_glider_translates() {
        let dims = Dimensions::square(8);
        let engine = engine(8, 8);
        let glider = Pattern::of(PatternKind::Glider);
        let start = glider.to_grid(dims, Position::new(0, 0)).unwrap();

        let mut grid = start.clone();
        for _ in 0..4 {
            grid = engine.advance(&grid);
        }
        assert_eq!(grid, glider.to_grid(dims, Position::new(1, 1)).unwrap());

        // Full lap around the torus
        for _ in 4..32 {
            grid = engine.advance(&grid);
        }
        assert_eq!(grid, start);
    }

    #[test]
    fn test_wrap_at_edges_and_corners() {
        let dims = Dimensions::new(6, 8);
        let engine = engine(6, 8);

        // Vertical blinker crossing the top/bottom seam in column 3
        let grid = grid_with(dims, &[(5, 3), (0, 3), (1, 3)]);
        let expected = grid_with(dims, &[(0, 2), (0, 3), (0, 4)]);
        assert_eq!(engine.advance(&grid), expected);

        // Horizontal blinker crossing the left/right seam in row 2
        let grid = grid_with(dims, &[(2, 7), (2, 0), (2, 1)]);
        let expected = grid_with(dims, &[(1, 0), (2, 0), (3, 0)]);
        assert_eq!(engine.advance(&grid), expected);

        // Blinker through the corner, centred on (0, 0)
        let grid = grid_with(dims, &[(0, 7), (0, 0), (0, 1)]);
        let expected = grid_with(dims, &[(5, 0), (0, 0), (1, 0)]);
        assert_eq!(engine.advance(&grid), expected);

        // Each corner sees the other three corners as neighbors
        let grid = grid_with(dims, &[(0, 0), (0, 7), (5, 0), (5, 7)]);
        for &(row, col) in &[(0, 0), (0, 7), (5, 0), (5, 7)] {
            assert_eq!(engine.live_neighbors(&grid, Position::new(row, col)), 3);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let grid = grid_with(Dimensions::square(5), &[(2, 1), (2, 2), (2, 3)]);
        let snapshot = grid.clone();
        let engine = engine(5, 5);
        let first = engine.advance(&grid);
        let second = engine.advance(&grid);
        assert_eq!(first, second);
        assert_eq!(grid, snapshot);
    }

    #[test]
    #[should_panic(expected = "grid dimensions do not match the engine")]
    fn test_wrong_dimensions_panics() {
        engine(5, 5).advance(&Grid::new(Dimensions::new(5, 6)));
    }

    #[test]
    fn test_engine_rejects_empty_dimensions() {
        assert!(GameOfLifeEngine::new(Dimensions::new(0, 4)).is_err());
    }

    #[test]
    fn test_async_visit_order_is_permutation() {
        let dims = Dimensions::new(4, 5);
        let grid = grid_with(dims, &[(1, 1), (1, 2), (2, 2)]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let step = engine(4, 5).advance_async(&grid, &mut rng);
        let visited: HashSet<Position> = step.visit_order.iter().copied().collect();
        assert_eq!(step.visit_order.len(), 20);
        assert_eq!(visited.len(), 20);
        assert_eq!(step.grid.dimensions(), dims);
    }

    #[test]
    fn test_async_is_reproducible_with_seed() {
        let grid = crate::seeding::random_grid(Dimensions::square(10), 0.4, Some(5)).unwrap();
        let engine = engine(10, 10);

        let a = engine.advance_async(&grid, &mut ChaCha8Rng::seed_from_u64(7));
        let b = engine.advance_async(&grid, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_async_keeps_dead_grid_dead_and_block_stable() {
        let engine = engine(6, 6);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let dead = Grid::new(Dimensions::square(6));
        assert_eq!(engine.advance_async(&dead, &mut rng).grid, dead);

        // No cell of a still life changes, whatever the order
        let block = grid_with(Dimensions::square(6), &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(engine.advance_async(&block, &mut rng).grid, block);
    }

    #[test]
    fn test_stepper_modes() {
        let grid = grid_with(Dimensions::square(5), &[(2, 1), (2, 2), (2, 3)]);

        let mut sync = LifeStepper::new(engine(5, 5), UpdateMode::Synchronous);
        assert_eq!(sync.step(&grid), engine(5, 5).advance(&grid));
        assert!(sync.last_visit_order().is_none());

        let mut stepper = LifeStepper::new(engine(5, 5), UpdateMode::Asynchronous { seed: 11 });
        let next = stepper.step(&grid);
        assert_eq!(stepper.last_visit_order().map(|order| order.len()), Some(25));

        let expected = engine(5, 5).advance_async(&grid, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(next, expected.grid);
        assert_eq!(stepper.last_visit_order(), Some(expected.visit_order.as_slice()));
    }

    proptest! {
        #[test]
        fn test_advance_preserves_dimensions(
            rows in 1usize..12,
            cols in 1usize..12,
            seed: u64,
        ) {
            let dims = Dimensions::new(rows, cols);
            let grid = crate::seeding::random_grid(dims, 0.3, Some(seed)).unwrap();
            let engine = GameOfLifeEngine::new(dims).unwrap();
            let first = engine.advance(&grid);
            prop_assert_eq!(first.dimensions(), dims);
            prop_assert_eq!(first, engine.advance(&grid));
        }

        #[test]
        fn test_advance_matches_cellwise_rule(seed: u64) {
            let dims = Dimensions::new(7, 9);
            let grid = crate::seeding::random_grid(dims, 0.35, Some(seed)).unwrap();
            let engine = GameOfLifeEngine::new(dims).unwrap();
            let next = engine.advance(&grid);
            for (pos, cell) in grid.iter() {
                let expected = next_state(cell, engine.live_neighbors(&grid, pos));
                prop_assert_eq!(next.get(pos), expected);
            }
        }
    }
}
