//! Elementary (1-D) cellular automaton with a circular boundary.

use ca_core::{Cell, ElementaryConfig, Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::trace;

/// Next state for each of the 8 neighborhood patterns.
///
/// Pattern `p` is `4 * left + 2 * center + right`, so index 0 is `000` and
/// index 7 is `111`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    next_states: [Cell; 8],
}

impl RuleTable {
    /// Build from explicit next-state bits, e.g. `[0, 1, 1, 0, 1, 0, 1, 0]`
    pub fn from_next_states(bits: &[u8]) -> Result<Self> {
        if bits.len() != 8 {
            return Err(Error::Validation(format!(
                "rule table needs 8 next states, got {}",
                bits.len()
            )));
        }
        let mut next_states = [Cell::Dead; 8];
        for (slot, &bit) in next_states.iter_mut().zip(bits) {
            *slot = Cell::from_bit(bit)?;
        }
        Ok(Self { next_states })
    }

    /// Build from a Wolfram rule number; bit `p` is the next state of pattern `p`
    pub fn from_wolfram(rule: u8) -> Self {
        let mut next_states = [Cell::Dead; 8];
        for (pattern, slot) in next_states.iter_mut().enumerate() {
            *slot = Cell::from((rule >> pattern) & 1 == 1);
        }
        Self { next_states }
    }

    pub fn wolfram_number(&self) -> u8 {
        self.next_states
            .iter()
            .enumerate()
            .fold(0u8, |acc, (pattern, cell)| acc | (cell.bit() << pattern))
    }

    pub fn next_state(&self, pattern: u8) -> Cell {
        self.next_states[(pattern & 0b111) as usize]
    }

    /// Neighborhood pattern with the left neighbor as the most significant bit
    pub fn pattern(left: Cell, center: Cell, right: Cell) -> u8 {
        (left.bit() << 2) | (center.bit() << 1) | right.bit()
    }

    pub fn next_states(&self) -> [u8; 8] {
        self.next_states.map(|cell| cell.bit())
    }
}

/// One generation of the 1-D automaton
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// An all-dead row
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![Cell::Dead; len],
        }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        let cells = bits
            .iter()
            .map(|&bit| Cell::from_bit(bit))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub fn toggle(&mut self, index: usize) {
        self.cells[index] = self.cells[index].toggled();
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn bits(&self) -> Vec<u8> {
        self.cells.iter().map(Cell::bit).collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }
}

impl Index<usize> for Row {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

/// Every generation of a run, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    rows: Vec<Row>,
}

impl History {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&Row> {
        self.rows.get(step)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    pub fn num_cells(&self) -> usize {
        self.rows.first().map(Row::len).unwrap_or(0)
    }

    /// Time-by-cell matrix of 0/1 values for a space-time raster
    pub fn to_bit_matrix(&self) -> Vec<Vec<u8>> {
        self.rows.iter().map(Row::bits).collect()
    }
}

/// Synchronous elementary automaton over a fixed number of cells
#[derive(Debug, Clone)]
pub struct ElementaryEngine {
    rule: RuleTable,
    num_cells: usize,
}

impl ElementaryEngine {
    pub fn new(rule: RuleTable, num_cells: usize) -> Result<Self> {
        if num_cells < 3 {
            return Err(Error::Validation(format!(
                "elementary automaton needs at least 3 cells, got {}",
                num_cells
            )));
        }
        Ok(Self { rule, num_cells })
    }

    /// Engine for the configured rule and width; `num_steps` is left to the
    /// caller driving the run
    pub fn from_config(config: &ElementaryConfig) -> Result<Self> {
        Self::new(RuleTable::from_next_states(&config.next_states)?, config.num_cells)
    }

    pub fn rule(&self) -> &RuleTable {
        &self.rule
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Compute the next row from a frozen current row.
    ///
    /// Cell 0 takes cell N-1 as its left neighbor and cell N-1 takes cell 0
    /// as its right neighbor.
    ///
    /// # Panics
    ///
    /// Panics if `current` does not have the engine's number of cells.
    pub fn advance(&self, current: &Row) -> Row {
        assert_eq!(
            current.len(),
            self.num_cells,
            "row length does not match the engine"
        );

        let n = self.num_cells;
        let cells = (0..n)
            .map(|j| {
                let left = current[(j + n - 1) % n];
                let right = current[(j + 1) % n];
                self.rule
                    .next_state(RuleTable::pattern(left, current[j], right))
            })
            .collect();

        Row::from_cells(cells)
    }

    /// Run from `initial` and keep every generation.
    ///
    /// The history holds `num_steps` rows with `initial` at index 0. A
    /// `num_steps` of 0 still records the initial row.
    pub fn run(&self, initial: Row, num_steps: usize) -> History {
        assert_eq!(
            initial.len(),
            self.num_cells,
            "row length does not match the engine"
        );

        let mut rows = Vec::with_capacity(num_steps.max(1));
        let mut current = initial;

        for step in 1..num_steps {
            let next = self.advance(&current);
            trace!(step, population = next.population(), "Advanced row");
            rows.push(std::mem::replace(&mut current, next));
        }
        rows.push(current);

        History { rows }
    }
}
