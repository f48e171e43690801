//! 2-D incompressible Navier-Stokes channel flow around an embedded
//! obstacle: an explicit finite-difference velocity update coupled to an
//! iterative pressure-Poisson correction on a fixed grid.
//!
//! The crate is the numerical core only. Rendering (contours, quivers,
//! streamlines, animation frames) is an external collaborator consuming
//! [`FieldSnapshot`] values; no file formats are defined here.

pub mod config;
pub mod error;
pub mod grid;
pub mod solver;
pub mod state;

pub use config::Config;
pub use error::{ConfigError, SimError};
pub use grid::{Grid, ObstacleMask, Shape};
pub use solver::{run, Simulation, SolverParams};
pub use state::{FieldSnapshot, FlowState};
