//! Cellular automaton engines.
//!
//! Two independent cores live here: a 1-D elementary automaton with a circular
//! boundary and Conway's Game of Life on a torus. Both compute each new
//! generation from a frozen snapshot of the previous one. The `simulation`
//! drivers connect them to seeding and to a display collaborator.

pub mod elementary;
pub mod grid;
pub mod life;
pub mod patterns;
pub mod seeding;
pub mod simulation;

pub use elementary::{ElementaryEngine, History, Row, RuleTable};
pub use grid::Grid;
pub use life::{AsyncStep, GameOfLifeEngine, LifeStepper};
pub use patterns::Pattern;
pub use simulation::{Frame, FrameSink, RecordingSink};
