//! Terminal viewer for the elementary automaton and the Game of Life.

mod render;
mod telemetry;

use anyhow::{Context, Result};
use ca_core::RunConfig;
use ca_engine::simulation::{run_elementary, run_life};
use render::TerminalRenderer;
use std::io;
use tracing::info;

fn main() -> Result<()> {
    // Initialize telemetry
    telemetry::init_telemetry()?;

    // Load configuration
    let config = RunConfig::load().context("failed to load configuration")?;
    info!(
        num_cells = config.elementary.num_cells,
        grid = %config.life.dimensions,
        "Starting cellular automata viewer"
    );

    let stdout = io::stdout();
    let mut renderer = TerminalRenderer::new(stdout.lock(), config.render.clone());

    let elementary = run_elementary(&config.elementary, &mut renderer)
        .context("elementary automaton run failed")?;
    info!(
        steps = elementary.steps,
        final_population = elementary.final_population,
        "Elementary run complete"
    );

    let life = run_life(&config.life, &mut renderer).context("Game of Life run failed")?;
    info!(
        steps = life.steps,
        final_population = life.final_population,
        "Game of Life run complete"
    );

    Ok(())
}
