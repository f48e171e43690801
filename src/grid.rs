use crate::error::ConfigError;
use crate::state::idx;

/// Fixed rectangular discretization of the flow domain.
/// Immutable once constructed; spacings are derived from the extents.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
    pub lx: f64,
    pub ly: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Grid {
    /// Build a grid of `nx x ny` nodes over a `lx x ly` domain.
    /// The stencil plus the Neumann mirrors need at least 3 nodes per axis.
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64) -> Result<Self, ConfigError> {
        if nx < 3 {
            return Err(ConfigError::TooSmall { field: "nx", min: 3, value: nx });
        }
        if ny < 3 {
            return Err(ConfigError::TooSmall { field: "ny", min: 3, value: ny });
        }
        if lx <= 0.0 {
            return Err(ConfigError::NotPositive { field: "lx", value: lx });
        }
        if ly <= 0.0 {
            return Err(ConfigError::NotPositive { field: "ly", value: ly });
        }
        Ok(Self { nx, ny, lx, ly, dx: lx / nx as f64, dy: ly / ny as f64 })
    }

    /// Physical x coordinate of grid column `i`.
    #[inline]
    pub fn x(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }

    /// Physical y coordinate of grid row `j`.
    #[inline]
    pub fn y(&self, j: usize) -> f64 {
        j as f64 * self.dy
    }

    /// Total node count (`nx * ny`), the length of every field buffer.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Embedded solid footprint, evaluated per grid node against a closed-form
/// membership predicate. Sizes and centers are in physical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { cx: f64, cy: f64, radius: f64 },
    Square { cx: f64, cy: f64, side: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
}

impl Shape {
    /// Whether the point `(x, y)` lies inside the footprint.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match *self {
            Shape::Circle { cx, cy, radius } => {
                let dx = x - cx;
                let dy = y - cy;
                dx * dx + dy * dy < radius * radius
            }
            Shape::Square { cx, cy, side } => {
                (x - cx).abs() < side / 2.0 && (y - cy).abs() < side / 2.0
            }
            Shape::Ellipse { cx, cy, rx, ry } => {
                let dx = (x - cx) / rx;
                let dy = (y - cy) / ry;
                dx * dx + dy * dy < 1.0
            }
        }
    }

    /// Reject non-positive size parameters before any stepping starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Shape::Circle { radius, .. } if radius <= 0.0 => {
                Err(ConfigError::NotPositive { field: "obstacle.radius", value: radius })
            }
            Shape::Square { side, .. } if side <= 0.0 => {
                Err(ConfigError::NotPositive { field: "obstacle.side", value: side })
            }
            Shape::Ellipse { rx, .. } if rx <= 0.0 => {
                Err(ConfigError::NotPositive { field: "obstacle.semi_axes[0]", value: rx })
            }
            Shape::Ellipse { ry, .. } if ry <= 0.0 => {
                Err(ConfigError::NotPositive { field: "obstacle.semi_axes[1]", value: ry })
            }
            _ => Ok(()),
        }
    }
}

/// Boolean obstacle field plus the flat index list of covered cells,
/// computed once and used every sub-step to re-zero velocity.
#[derive(Debug, Clone)]
pub struct ObstacleMask {
    solid: Vec<bool>,
    cells: Vec<usize>,
    nx: usize,
}

impl ObstacleMask {
    /// Evaluate the shape predicate over the full coordinate mesh.
    /// `None` produces an empty mask (unobstructed channel).
    pub fn from_shape(grid: &Grid, shape: Option<&Shape>) -> Self {
        let mut solid = vec![false; grid.len()];
        let mut cells = Vec::new();
        if let Some(shape) = shape {
            for j in 0..grid.ny {
                for i in 0..grid.nx {
                    if shape.contains(grid.x(i), grid.y(j)) {
                        let c = idx(i, j, grid.nx);
                        solid[c] = true;
                        cells.push(c);
                    }
                }
            }
        }
        Self { solid, cells, nx: grid.nx }
    }

    pub fn empty(grid: &Grid) -> Self {
        Self::from_shape(grid, None)
    }

    #[inline]
    pub fn is_solid(&self, i: usize, j: usize) -> bool {
        self.solid[idx(i, j, self.nx)]
    }

    /// Flat indices of all covered cells, for fast zeroing.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_20x10() -> Grid {
        Grid::new(20, 10, 2.0, 1.0).unwrap()
    }

    #[test]
    fn test_grid_spacing() {
        let g = grid_20x10();
        assert_eq!(g.dx, 0.1);
        assert_eq!(g.dy, 0.1);
        assert_eq!(g.len(), 200);
    }

    #[test]
    fn test_grid_mesh_coordinates() {
        let g = grid_20x10();
        assert_eq!(g.x(0), 0.0);
        assert_eq!(g.y(0), 0.0);
        assert!((g.x(5) - 0.5).abs() < 1e-12);
        assert!((g.y(3) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_grid_rejects_degenerate_dimensions() {
        assert!(Grid::new(2, 10, 2.0, 1.0).is_err());
        assert!(Grid::new(20, 0, 2.0, 1.0).is_err());
        assert!(Grid::new(20, 10, 0.0, 1.0).is_err());
        assert!(Grid::new(20, 10, 2.0, -1.0).is_err());
    }

    #[test]
    fn test_circle_membership() {
        let s = Shape::Circle { cx: 1.0, cy: 0.5, radius: 0.1 };
        assert!(s.contains(1.0, 0.5), "Center should be inside");
        assert!(s.contains(1.05, 0.5), "Point within radius should be inside");
        assert!(!s.contains(1.1, 0.5), "Boundary point is outside (strict inequality)");
        assert!(!s.contains(0.0, 0.0), "Far point should be outside");
    }

    #[test]
    fn test_square_membership() {
        let s = Shape::Square { cx: 0.5, cy: 0.5, side: 0.2 };
        assert!(s.contains(0.5, 0.5));
        assert!(s.contains(0.59, 0.59));
        assert!(!s.contains(0.61, 0.5), "Outside half-side in x");
        assert!(!s.contains(0.5, 0.61), "Outside half-side in y");
    }

    #[test]
    fn test_ellipse_membership() {
        let s = Shape::Ellipse { cx: 0.5, cy: 0.5, rx: 0.2, ry: 0.1 };
        assert!(s.contains(0.5, 0.5));
        assert!(s.contains(0.65, 0.5), "Inside wide axis");
        assert!(!s.contains(0.5, 0.65), "Outside narrow axis");
        assert!(!s.contains(0.71, 0.5));
    }

    #[test]
    fn test_shape_validate_rejects_nonpositive_sizes() {
        assert!(Shape::Circle { cx: 0.5, cy: 0.5, radius: 0.0 }.validate().is_err());
        assert!(Shape::Square { cx: 0.5, cy: 0.5, side: -0.2 }.validate().is_err());
        assert!(Shape::Ellipse { cx: 0.5, cy: 0.5, rx: 0.2, ry: 0.0 }.validate().is_err());
        assert!(Shape::Circle { cx: 0.5, cy: 0.5, radius: 0.1 }.validate().is_ok());
    }

    #[test]
    fn test_mask_matches_predicate() {
        let g = grid_20x10();
        let s = Shape::Circle { cx: 1.0, cy: 0.5, radius: 0.15 };
        let mask = ObstacleMask::from_shape(&g, Some(&s));
        assert!(!mask.is_empty(), "Circle of radius 0.15 should cover some nodes");
        for j in 0..g.ny {
            for i in 0..g.nx {
                assert_eq!(
                    mask.is_solid(i, j),
                    s.contains(g.x(i), g.y(j)),
                    "Mask should match predicate at ({}, {})",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_mask_cells_list_consistent() {
        let g = grid_20x10();
        let s = Shape::Square { cx: 1.0, cy: 0.5, side: 0.3 };
        let mask = ObstacleMask::from_shape(&g, Some(&s));
        let count = (0..g.ny)
            .flat_map(|j| (0..g.nx).map(move |i| (i, j)))
            .filter(|&(i, j)| mask.is_solid(i, j))
            .count();
        assert_eq!(mask.cells().len(), count, "Index list should match mask population");
    }

    #[test]
    fn test_empty_mask() {
        let g = grid_20x10();
        let mask = ObstacleMask::empty(&g);
        assert!(mask.is_empty());
        assert_eq!(mask.cells().len(), 0);
    }
}
