mod boundary;
pub mod diagnostics;
mod params;
mod pressure;
mod velocity;

pub use boundary::{apply_pressure_bounds, apply_velocity_bounds};
pub use params::SolverParams;
pub use pressure::relax;
pub use velocity::advance;

use crate::config::Config;
use crate::error::{ConfigError, SimError};
use crate::grid::{Grid, ObstacleMask, Shape};
use crate::state::{FieldSnapshot, FlowState};

/// One sub-step: explicit velocity update, then pressure relaxation.
/// Returns the number of pressure sweeps performed.
pub fn sub_step(
    state: &mut FlowState,
    grid: &Grid,
    mask: &ObstacleMask,
    params: &SolverParams,
) -> usize {
    velocity::advance(state, grid, mask, params);
    pressure::relax(state, grid, params)
}

/// Owns the grid, obstacle mask, parameters, and field state for one run.
///
/// Each outer step performs `sub_steps` repetitions of
/// {velocity sub-step; pressure relax}; the loop is purely sequential with
/// no branching on field contents and no early termination. `Simulation`
/// is a finite iterator of snapshots, terminal after `outer_steps`;
/// restartable from scratch only.
pub struct Simulation {
    grid: Grid,
    mask: ObstacleMask,
    params: SolverParams,
    state: FlowState,
    sub_steps: usize,
    outer_steps: usize,
    completed: usize,
}

impl Simulation {
    /// Build a simulation from a validated configuration, with zeroed
    /// fields. All configuration errors surface here, before stepping.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let g = &config.grid;
        let grid = Grid::new(g.nx, g.ny, g.lx, g.ly)?;
        let shape = config.obstacle.to_shape()?;
        let params = SolverParams {
            rho: config.physics.rho,
            nu: config.physics.kinematic_viscosity(),
            dt: config.physics.dt,
            u_in: config.physics.inflow,
            pressure_iter: config.run.pressure_iter,
            pressure_tol: config.run.pressure_tol,
        };
        Self::from_parts(grid, shape, params, config.run.sub_steps, config.run.outer_steps)
    }

    /// Assemble a simulation directly from core types.
    pub fn from_parts(
        grid: Grid,
        shape: Option<Shape>,
        params: SolverParams,
        sub_steps: usize,
        outer_steps: usize,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        if sub_steps == 0 {
            return Err(ConfigError::TooSmall { field: "sub_steps", min: 1, value: 0 });
        }
        if let Some(ref shape) = shape {
            shape.validate()?;
        }
        let mask = ObstacleMask::from_shape(&grid, shape.as_ref());
        let state = FlowState::new(&grid);
        Ok(Self { grid, mask, params, state, sub_steps, outer_steps, completed: 0 })
    }

    /// Advance one outer step (`sub_steps` velocity/pressure sub-steps).
    pub fn outer_step(&mut self) {
        for _ in 0..self.sub_steps {
            sub_step(&mut self.state, &self.grid, &self.mask, &self.params);
        }
        self.completed += 1;
    }

    /// Owned copy of the current field triple for the external renderer.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            step: self.completed,
            time: self.time(),
            nx: self.grid.nx,
            ny: self.grid.ny,
            u: self.state.u.clone(),
            v: self.state.v.clone(),
            p: self.state.p.clone(),
        }
    }

    /// Simulated time elapsed: `completed * sub_steps * dt`.
    pub fn time(&self) -> f64 {
        (self.completed * self.sub_steps) as f64 * self.params.dt
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.outer_steps
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mask(&self) -> &ObstacleMask {
        &self.mask
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Zero the fields and rewind the step counter. Parameter changes
    /// require exactly this: there is no mid-run reconfiguration.
    pub fn reset(&mut self) {
        self.state.reset();
        self.completed = 0;
    }
}

impl Iterator for Simulation {
    type Item = FieldSnapshot;

    fn next(&mut self) -> Option<FieldSnapshot> {
        if self.is_done() {
            return None;
        }
        self.outer_step();
        Some(self.snapshot())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.outer_steps - self.completed.min(self.outer_steps);
        (remaining, Some(remaining))
    }
}

/// Run a configured simulation to completion and collect every outer-step
/// snapshot. With `detect_divergence` set, a post-step finite-value check
/// surfaces blow-up as an error; otherwise NaN/Inf propagate silently,
/// matching the documented behavior of the scheme.
pub fn run(config: &Config) -> Result<Vec<FieldSnapshot>, SimError> {
    let detect = config.run.detect_divergence;
    let mut sim = Simulation::new(config)?;
    let mut snapshots = Vec::with_capacity(config.run.outer_steps);
    while !sim.is_done() {
        sim.outer_step();
        if detect {
            let s = sim.state();
            if !diagnostics::all_finite(&[&s.u, &s.v, &s.p]) {
                return Err(SimError::DivergenceDetected { step: sim.completed() });
            }
        }
        snapshots.push(sim.snapshot());
    }
    Ok(snapshots)
}
