//! Initial states for the engines.
//!
//! Random rows and grids come from a `ChaCha8Rng` so that a given seed always
//! reproduces the same starting state.

use crate::elementary::Row;
use crate::grid::Grid;
use crate::patterns::Pattern;
use ca_core::{Cell, Dimensions, ElementaryConfig, Error, InitialPattern, LifeConfig, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Seeded generator, or one seeded from entropy when `seed` is absent
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Each cell alive with probability 1/2
pub fn random_row(num_cells: usize, seed: Option<u64>) -> Row {
    let mut rng = rng_from_seed(seed);
    let cells = (0..num_cells).map(|_| Cell::from(rng.gen::<bool>())).collect();
    Row::from_cells(cells)
}

/// Each cell alive with probability `live_probability`
pub fn random_grid(dimensions: Dimensions, live_probability: f64, seed: Option<u64>) -> Result<Grid> {
    dimensions.validate()?;
    if !(0.0..=1.0).contains(&live_probability) {
        return Err(Error::Validation(format!(
            "live_probability must be within [0, 1], got {}",
            live_probability
        )));
    }

    let mut rng = rng_from_seed(seed);
    let cells = (0..dimensions.area())
        .map(|_| Cell::from(rng.gen_bool(live_probability)))
        .collect();
    Ok(Grid::from_cells(dimensions, cells))
}

/// Row 0 for an elementary run
pub fn initial_row(config: &ElementaryConfig) -> Row {
    random_row(config.num_cells, config.seed)
}

/// Grid 0 for a Game of Life run
pub fn initial_grid(config: &LifeConfig) -> Result<Grid> {
    let grid = match &config.initial_pattern {
        InitialPattern::Random { live_probability } => {
            random_grid(config.dimensions, *live_probability, config.seed)?
        }
        InitialPattern::Literal { pattern, origin } => {
            Pattern::of(*pattern).to_grid(config.dimensions, *origin)?
        }
    };
    debug!(
        dimensions = %config.dimensions,
        population = grid.population(),
        "Generated initial grid"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_core::{PatternKind, Position};

    #[test]
    fn test_random_row_is_reproducible() {
        let a = random_row(200, Some(42));
        let b = random_row(200, Some(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 200);

        // Roughly half the cells should be alive
        let population = a.population();
        assert!(population > 60 && population < 140, "population {}", population);
    }

    #[test]
    fn test_random_grid_density() {
        let grid = random_grid(Dimensions::square(50), 0.1, Some(23)).unwrap();
        assert_eq!(grid.dimensions(), Dimensions::square(50));

        let population = grid.population();
        assert!(population > 150 && population < 350, "population {}", population);
        assert_eq!(grid, random_grid(Dimensions::square(50), 0.1, Some(23)).unwrap());
    }

    #[test]
    fn test_random_grid_extremes() {
        let dims = Dimensions::new(4, 7);
        assert!(random_grid(dims, 0.0, Some(1)).unwrap().is_empty());
        assert_eq!(random_grid(dims, 1.0, Some(1)).unwrap().population(), 28);
        assert!(random_grid(dims, -0.1, Some(1)).is_err());
        assert!(random_grid(Dimensions::new(0, 3), 0.5, Some(1)).is_err());
    }

    #[test]
    fn test_initial_grid_literal() {
        let config = LifeConfig {
            dimensions: Dimensions::square(8),
            initial_pattern: InitialPattern::Literal {
                pattern: PatternKind::Glider,
                origin: Position::new(2, 2),
            },
            ..Default::default()
        };
        let grid = initial_grid(&config).unwrap();
        assert_eq!(grid.population(), 5);
        assert_eq!(grid.get(Position::new(2, 3)), Cell::Alive);
    }

    #[test]
    fn test_initial_grid_literal_far_origin() {
        let config = LifeConfig {
            dimensions: Dimensions::square(8),
            initial_pattern: InitialPattern::Literal {
                pattern: PatternKind::Glider,
                origin: Position::new(i32::MAX, 0),
            },
            ..Default::default()
        };
        let grid = initial_grid(&config).unwrap();
        assert_eq!(grid.population(), 5);
        // Glider cell (0, 1) lands on row i32::MAX mod 8 = 7
        assert_eq!(grid.get(Position::new(7, 1)), Cell::Alive);
    }

    #[test]
    fn test_initial_row_uses_config() {
        let config = ElementaryConfig {
            num_cells: 32,
            seed: Some(9),
            ..Default::default()
        };
        assert_eq!(initial_row(&config), random_row(32, Some(9)));
    }
}
