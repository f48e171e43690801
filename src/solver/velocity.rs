use crate::grid::{Grid, ObstacleMask};
use crate::state::{idx, FlowState};

use super::boundary::apply_velocity_bounds;
use super::params::SolverParams;

/// One explicit velocity sub-step: upwind advection, central pressure
/// gradient, and central viscous diffusion, all read from the pre-update
/// snapshot so the sweep is not order-dependent. Boundary and obstacle
/// conditions are re-imposed afterward.
///
/// No CFL correction: an oversized `dt` relative to grid spacing and
/// viscosity silently propagates NaN/Inf.
pub fn advance(state: &mut FlowState, grid: &Grid, mask: &ObstacleMask, params: &SolverParams) {
    let nx = grid.nx;
    let ny = grid.ny;
    let dx = grid.dx;
    let dy = grid.dy;
    let dt = params.dt;
    let rho = params.rho;
    let nu = params.nu;

    let FlowState { u, v, p, u0, v0, .. } = state;
    u0.copy_from_slice(u);
    v0.copy_from_slice(v);
    let un: &[f64] = u0;
    let vn: &[f64] = v0;

    for j in 1..(ny - 1) {
        for i in 1..(nx - 1) {
            let c = idx(i, j, nx);
            let l = idx(i - 1, j, nx);
            let r = idx(i + 1, j, nx);
            let b = idx(i, j - 1, nx);
            let t = idx(i, j + 1, nx);

            let adv_u = un[c] * (un[c] - un[l]) / dx + vn[c] * (un[c] - un[b]) / dy;
            let lap_u = (un[r] - 2.0 * un[c] + un[l]) / (dx * dx)
                + (un[t] - 2.0 * un[c] + un[b]) / (dy * dy);
            u[c] = un[c] - dt * adv_u - dt / (2.0 * rho * dx) * (p[r] - p[l]) + nu * dt * lap_u;

            let adv_v = un[c] * (vn[c] - vn[l]) / dx + vn[c] * (vn[c] - vn[b]) / dy;
            let lap_v = (vn[r] - 2.0 * vn[c] + vn[l]) / (dx * dx)
                + (vn[t] - 2.0 * vn[c] + vn[b]) / (dy * dy);
            v[c] = vn[c] - dt * adv_v - dt / (2.0 * rho * dy) * (p[t] - p[b]) + nu * dt * lap_v;
        }
    }

    apply_velocity_bounds(u, v, mask, params.u_in, nx, ny);
}
