//! Text rendering of automaton frames.

use ca_core::{Cell, Error, RenderConfig, Result};
use ca_engine::{Frame, FrameSink, Grid, History};
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::trace;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn glyph(cell: Cell, config: &RenderConfig) -> char {
    if cell.is_alive() {
        config.alive_char
    } else {
        config.dead_char
    }
}

/// One line per row, no title
pub fn render_grid(grid: &Grid, config: &RenderConfig) -> String {
    let mut out = String::with_capacity(grid.dimensions().area() + grid.rows());
    for row in grid.row_slices() {
        out.extend(row.iter().map(|&cell| glyph(cell, config)));
        out.push('\n');
    }
    out
}

/// Space-time raster: one line per time step, time running downward
pub fn render_history(history: &History, config: &RenderConfig) -> String {
    let mut out = String::with_capacity(history.len() * (history.num_cells() + 1));
    for row in history.rows() {
        out.extend(row.cells().iter().map(|&cell| glyph(cell, config)));
        out.push('\n');
    }
    out
}

/// Draws frames to a writer, pausing after the elementary raster and
/// between Game of Life frames
pub struct TerminalRenderer<W: Write> {
    out: W,
    config: RenderConfig,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, config: RenderConfig) -> Self {
        Self { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    fn display_frame(&mut self, frame: Frame<'_>, step: usize) -> Result<()> {
        match frame {
            Frame::History(history) => {
                if history.is_empty() {
                    return Err(Error::Render("nothing to draw in an empty history".to_string()));
                }
                writeln!(
                    self.out,
                    "Elementary CA: {} cells, {} time steps (time runs downward)",
                    history.num_cells(),
                    history.len()
                )?;
                self.out.write_all(render_history(history, &self.config).as_bytes())?;
                self.out.flush()?;

                // Keep the raster readable before a grid frame clears it
                if self.config.history_hold_ms > 0 {
                    thread::sleep(Duration::from_millis(self.config.history_hold_ms));
                }
            }
            Frame::Grid(grid) => {
                if self.config.clear_screen {
                    self.out.write_all(CLEAR_SCREEN.as_bytes())?;
                }
                writeln!(self.out, "Timestep: {}", step)?;
                self.out.write_all(render_grid(grid, &self.config).as_bytes())?;
                self.out.flush()?;

                if self.config.frame_delay_ms > 0 {
                    thread::sleep(Duration::from_millis(self.config.frame_delay_ms));
                }
            }
        }
        trace!(step, "Frame drawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_engine::{ElementaryEngine, Row, RuleTable};
    use std::time::Instant;

    fn quiet_config() -> RenderConfig {
        RenderConfig {
            frame_delay_ms: 0,
            clear_screen: false,
            history_hold_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_grid() {
        let grid = Grid::from_bits(&[vec![0, 1, 0], vec![1, 1, 0]]).unwrap();
        assert_eq!(render_grid(&grid, &quiet_config()), ".#.\n##.\n");
    }

    #[test]
    fn test_render_history() {
        let engine = ElementaryEngine::new(RuleTable::from_wolfram(90), 5).unwrap();
        let history = engine.run(Row::from_bits(&[0, 0, 1, 0, 0]).unwrap(), 3);
        assert_eq!(
            render_history(&history, &quiet_config()),
            "..#..\n.#.#.\n#...#\n"
        );
    }

    #[test]
    fn test_terminal_renderer_grid_frame() {
        let grid = Grid::from_bits(&[vec![1, 0], vec![0, 1]]).unwrap();
        let mut renderer = TerminalRenderer::new(Vec::new(), quiet_config());
        renderer.display_frame(Frame::Grid(&grid), 7).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "Timestep: 7\n#.\n.#\n");
    }

    #[test]
    fn test_terminal_renderer_clears_screen() {
        let grid = Grid::from_bits(&[vec![1]]).unwrap();
        let config = RenderConfig {
            frame_delay_ms: 0,
            history_hold_ms: 0,
            ..Default::default()
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), config);
        renderer.display_frame(Frame::Grid(&grid), 1).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with(CLEAR_SCREEN));
    }

    #[test]
    fn test_terminal_renderer_history_frame() {
        let engine = ElementaryEngine::new(RuleTable::from_wolfram(90), 3).unwrap();
        let history = engine.run(Row::from_bits(&[0, 1, 0]).unwrap(), 2);
        let mut renderer = TerminalRenderer::new(Vec::new(), quiet_config());
        renderer.display_frame(Frame::History(&history), 1).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Elementary CA: 3 cells, 2 time steps"));
        assert_eq!(lines[1], ".#.");
        assert_eq!(lines[2], "#.#");
    }

    #[test]
    fn test_history_is_held_before_first_grid_clear() {
        let engine = ElementaryEngine::new(RuleTable::from_wolfram(90), 3).unwrap();
        let history = engine.run(Row::from_bits(&[0, 1, 0]).unwrap(), 2);
        let grid = Grid::from_bits(&[vec![1]]).unwrap();
        let config = RenderConfig {
            frame_delay_ms: 0,
            clear_screen: true,
            history_hold_ms: 50,
            ..Default::default()
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), config);

        let start = Instant::now();
        renderer.display_frame(Frame::History(&history), 1).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
        renderer.display_frame(Frame::Grid(&grid), 1).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let header = text.find("Elementary CA: 3 cells").unwrap();
        let raster = text.find(".#.\n#.#\n").unwrap();
        let clear = text.find(CLEAR_SCREEN).unwrap();
        assert!(header < raster && raster < clear);
        assert!(text[clear..].starts_with(&format!("{}Timestep: 1\n#\n", CLEAR_SCREEN)));
    }
}
