use crate::grid::Grid;
use crate::state::{idx, FlowState};

use super::boundary::apply_pressure_bounds;
use super::params::SolverParams;

/// Relax `p` toward the discrete pressure-Poisson equation for the current
/// velocity field. Pure Jacobi: every interior node is computed from the
/// previous iterate `pn`, never from partially-updated values. The sweep
/// count is fixed (deterministic, bounded cost) rather than tolerance-driven;
/// an optional tolerance enables early exit but is off by default.
///
/// Returns the number of sweeps performed.
pub fn relax(state: &mut FlowState, grid: &Grid, params: &SolverParams) -> usize {
    let nx = grid.nx;
    let ny = grid.ny;
    let dx = grid.dx;
    let dy = grid.dy;
    let dx2 = dx * dx;
    let dy2 = dy * dy;
    let denom = 2.0 * (dx2 + dy2);
    let rhs_coef = params.rho * dx2 * dy2 / (denom * params.dt);

    let FlowState { u, v, p, p0, .. } = state;
    let un: &[f64] = u;
    let vn: &[f64] = v;

    let mut sweeps = 0;
    for _ in 0..params.pressure_iter {
        p0.copy_from_slice(p);
        let pn: &[f64] = p0;
        let mut max_delta: f64 = 0.0;

        for j in 1..(ny - 1) {
            for i in 1..(nx - 1) {
                let c = idx(i, j, nx);
                let l = idx(i - 1, j, nx);
                let r = idx(i + 1, j, nx);
                let b = idx(i, j - 1, nx);
                let t = idx(i, j + 1, nx);

                let div = (un[r] - un[l]) / (2.0 * dx) + (vn[t] - vn[b]) / (2.0 * dy);
                let next = ((pn[r] + pn[l]) * dy2 + (pn[t] + pn[b]) * dx2) / denom
                    - rhs_coef * div;
                max_delta = max_delta.max((next - pn[c]).abs());
                p[c] = next;
            }
        }

        apply_pressure_bounds(p, nx, ny);
        sweeps += 1;

        if let Some(tol) = params.pressure_tol {
            if max_delta <= tol {
                break;
            }
        }
    }
    sweeps
}
