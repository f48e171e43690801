use crate::grid::Grid;

/// Row-major flat index for a `ny x nx` field: row `j`, column `i`.
#[inline(always)]
pub const fn idx(i: usize, j: usize, nx: usize) -> usize {
    j * nx + i
}

/// Mutable simulation state: the (u, v, p) field triple plus scratch
/// buffers for the pre-update velocity snapshot and the previous pressure
/// iterate. Scratch buffers are pre-allocated so stepping never allocates.
pub struct FlowState {
    pub nx: usize,
    pub ny: usize,
    /// x-velocity at each grid node.
    pub u: Vec<f64>,
    /// y-velocity at each grid node.
    pub v: Vec<f64>,
    /// Pressure at each grid node.
    pub p: Vec<f64>,
    /// Pre-update snapshot of `u` for the explicit sweep.
    pub(crate) u0: Vec<f64>,
    /// Pre-update snapshot of `v` for the explicit sweep.
    pub(crate) v0: Vec<f64>,
    /// Previous pressure iterate for the Jacobi sweep.
    pub(crate) p0: Vec<f64>,
}

impl FlowState {
    /// Zero-initialized fields matching the grid dimensions.
    pub fn new(grid: &Grid) -> Self {
        let n = grid.len();
        Self {
            nx: grid.nx,
            ny: grid.ny,
            u: vec![0.0; n],
            v: vec![0.0; n],
            p: vec![0.0; n],
            u0: vec![0.0; n],
            v0: vec![0.0; n],
            p0: vec![0.0; n],
        }
    }

    /// Reset all fields to zero. Changing physical parameters requires
    /// resetting and restarting; there is no checkpoint/resume concept.
    pub fn reset(&mut self) {
        for buf in [
            &mut self.u,
            &mut self.v,
            &mut self.p,
            &mut self.u0,
            &mut self.v0,
            &mut self.p0,
        ] {
            buf.fill(0.0);
        }
    }
}

/// Owned copy of the field triple handed to the external renderer after an
/// outer step. The core defines no file formats; conversion to plots or
/// frames is the renderer's concern.
#[derive(Debug, Clone)]
pub struct FieldSnapshot {
    /// Outer steps completed when this snapshot was taken.
    pub step: usize,
    /// Simulated time: `step * sub_steps * dt`.
    pub time: f64,
    pub nx: usize,
    pub ny: usize,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub p: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_zeroed() {
        let grid = Grid::new(20, 10, 2.0, 1.0).unwrap();
        let state = FlowState::new(&grid);
        assert_eq!(state.u.len(), 200);
        assert!(state.u.iter().all(|&x| x == 0.0));
        assert!(state.v.iter().all(|&x| x == 0.0));
        assert!(state.p.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_reset_clears_fields() {
        let grid = Grid::new(5, 5, 1.0, 1.0).unwrap();
        let mut state = FlowState::new(&grid);
        state.u[idx(2, 2, 5)] = 3.0;
        state.p[idx(1, 3, 5)] = -1.0;
        state.reset();
        assert!(state.u.iter().all(|&x| x == 0.0));
        assert!(state.p.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_idx_row_major() {
        assert_eq!(idx(0, 0, 20), 0);
        assert_eq!(idx(3, 0, 20), 3);
        assert_eq!(idx(0, 1, 20), 20);
        assert_eq!(idx(5, 2, 20), 45);
    }
}
