//! Run drivers that connect the engines to seeding and to a display.

use crate::elementary::{ElementaryEngine, History, Row};
use crate::grid::Grid;
use crate::life::LifeStepper;
use crate::seeding;
use ca_core::{ElementaryConfig, LifeConfig, Result};
use tracing::{debug, info, instrument};

/// Something the display collaborator can draw
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    /// One Game of Life generation
    Grid(&'a Grid),
    /// A full elementary run, drawn as a space-time raster
    History(&'a History),
}

/// Display collaborator; the engines never depend on how frames are shown
pub trait FrameSink {
    fn display_frame(&mut self, frame: Frame<'_>, step: usize) -> Result<()>;
}

/// Owned copy of a displayed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedFrame {
    Grid(Grid),
    History(History),
}

/// Keeps every frame it is given
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<(usize, RecordedFrame)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for RecordingSink {
    fn display_frame(&mut self, frame: Frame<'_>, step: usize) -> Result<()> {
        let recorded = match frame {
            Frame::Grid(grid) => RecordedFrame::Grid(grid.clone()),
            Frame::History(history) => RecordedFrame::History(history.clone()),
        };
        self.frames.push((step, recorded));
        Ok(())
    }
}

/// Outcome of an elementary run
#[derive(Debug, Clone)]
pub struct ElementaryRun {
    /// Rows computed, including row 0
    pub steps: usize,
    pub history: History,
    pub final_population: usize,
}

/// Outcome of a Game of Life run
#[derive(Debug, Clone)]
pub struct LifeRun {
    pub steps: usize,
    pub final_grid: Grid,
    pub final_population: usize,
}

/// Seed row 0, run the configured steps, then show the whole history once.
#[instrument(skip(config, sink), fields(num_cells = config.num_cells, num_steps = config.num_steps))]
pub fn run_elementary<S: FrameSink + ?Sized>(config: &ElementaryConfig, sink: &mut S) -> Result<ElementaryRun> {
    config.validate()?;
    let engine = ElementaryEngine::from_config(config)?;
    let initial = seeding::initial_row(config);
    run_elementary_from(&engine, initial, config.num_steps, sink)
}

/// Same as [`run_elementary`] with an explicit engine and initial row
pub fn run_elementary_from<S: FrameSink + ?Sized>(
    engine: &ElementaryEngine,
    initial: Row,
    num_steps: usize,
    sink: &mut S,
) -> Result<ElementaryRun> {
    info!(
        rule = engine.rule().wolfram_number(),
        initial_population = initial.population(),
        "Starting elementary automaton"
    );

    let history = engine.run(initial, num_steps);
    sink.display_frame(Frame::History(&history), history.len().saturating_sub(1))?;

    let final_population = history.last().map(Row::population).unwrap_or(0);
    info!(
        event = "elementary_complete",
        rows = history.len(),
        final_population,
        "Elementary automaton finished"
    );

    Ok(ElementaryRun {
        steps: history.len(),
        history,
        final_population,
    })
}

/// Show each generation with its 1-based step index, then advance.
#[instrument(skip(config, sink), fields(dimensions = %config.dimensions, num_steps = config.num_steps))]
pub fn run_life<S: FrameSink + ?Sized>(config: &LifeConfig, sink: &mut S) -> Result<LifeRun> {
    let mut stepper = LifeStepper::from_config(config)?;
    let initial = seeding::initial_grid(config)?;
    run_life_from(&mut stepper, initial, config.num_steps, config.log_interval, sink)
}

/// Same as [`run_life`] with an explicit stepper and initial grid
pub fn run_life_from<S: FrameSink + ?Sized>(
    stepper: &mut LifeStepper,
    initial: Grid,
    num_steps: usize,
    log_interval: usize,
    sink: &mut S,
) -> Result<LifeRun> {
    info!(
        mode = ?stepper.mode(),
        initial_population = initial.population(),
        "Starting Game of Life"
    );

    let mut grid = initial;
    for step in 1..=num_steps {
        sink.display_frame(Frame::Grid(&grid), step)?;
        grid = stepper.step(&grid);

        if log_interval > 0 && step % log_interval == 0 {
            info!(step, num_steps, population = grid.population(), "Game of Life progress");
        } else {
            debug!(step, population = grid.population(), "Advanced grid");
        }
    }

    let final_population = grid.population();
    info!(
        event = "life_complete",
        steps = num_steps,
        final_population,
        "Game of Life finished"
    );

    Ok(LifeRun {
        steps: num_steps,
        final_grid: grid,
        final_population,
    })
}
