use crate::grid::Grid;
use crate::state::idx;

/// Maximum speed `sqrt(u^2 + v^2)` over all nodes.
pub fn max_speed(u: &[f64], v: &[f64]) -> f64 {
    u.iter()
        .zip(v.iter())
        .map(|(ui, vi)| (ui * ui + vi * vi).sqrt())
        .fold(0.0_f64, f64::max)
}

/// Mean absolute central-difference divergence over interior nodes.
/// Drifts upward when the pressure correction is losing to the explicit
/// update; a crude but useful health signal.
pub fn divergence_l1(u: &[f64], v: &[f64], grid: &Grid) -> f64 {
    let nx = grid.nx;
    let ny = grid.ny;
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..(ny - 1) {
        for i in 1..(nx - 1) {
            let div = (u[idx(i + 1, j, nx)] - u[idx(i - 1, j, nx)]) / (2.0 * grid.dx)
                + (v[idx(i, j + 1, nx)] - v[idx(i, j - 1, nx)]) / (2.0 * grid.dy);
            sum += div.abs();
            count += 1;
        }
    }
    if count > 0 { sum / count as f64 } else { 0.0 }
}

/// (min, max) over a pressure field.
pub fn pressure_range(p: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &val in p {
        min = min.min(val);
        max = max.max(val);
    }
    (min, max)
}

/// Whether every value in every given field is finite. Backs the opt-in
/// divergence detection; the scheme itself never checks.
pub fn all_finite(fields: &[&[f64]]) -> bool {
    fields.iter().all(|f| f.iter().all(|x| x.is_finite()))
}
