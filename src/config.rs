use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::Shape;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub physics: PhysicsConfig,
    pub obstacle: ObstacleConfig,
    pub run: RunConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub nx: usize,
    pub ny: usize,
    pub lx: f64,
    pub ly: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Primary viscosity input: nu = 1/reynolds under unit density and
    /// unit length scale.
    pub reynolds: f64,
    /// Explicit kinematic viscosity; overrides `reynolds` when set.
    pub viscosity: Option<f64>,
    pub rho: f64,
    pub dt: f64,
    /// Inlet velocity magnitude imposed on the left column.
    pub inflow: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// One of "circle", "square", "ellipse", or "none".
    pub shape: String,
    pub center: (f64, f64),
    /// Circle radius.
    pub radius: f64,
    /// Square side length.
    pub side: f64,
    /// Ellipse semi-axes (rx, ry).
    pub semi_axes: (f64, f64),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub outer_steps: usize,
    pub sub_steps: usize,
    pub pressure_iter: usize,
    /// Optional early exit for the pressure relaxation on max |p - pn|.
    /// Off by default: the fixed iteration count is the documented behavior.
    pub pressure_tol: Option<f64>,
    /// Opt-in finite-value check after each outer step in `run()`.
    pub detect_divergence: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Renderer-facing toggle, carried through untouched by the solver.
    pub show_streamlines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            physics: PhysicsConfig::default(),
            obstacle: ObstacleConfig::default(),
            run: RunConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { nx: 200, ny: 100, lx: 2.0, ly: 1.0 }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { reynolds: 100.0, viscosity: None, rho: 1.0, dt: 1e-4, inflow: 1.0 }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            shape: "circle".to_string(),
            center: (0.5, 0.5),
            radius: 0.1,
            side: 0.2,
            semi_axes: (0.15, 0.1),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            outer_steps: 200,
            sub_steps: 10,
            pressure_iter: 50,
            pressure_tol: None,
            detect_divergence: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { show_streamlines: true }
    }
}

impl PhysicsConfig {
    /// Effective kinematic viscosity: the explicit override when present,
    /// otherwise 1/Re.
    pub fn kinematic_viscosity(&self) -> f64 {
        match self.viscosity {
            Some(nu) => nu,
            None => 1.0 / self.reynolds,
        }
    }
}

impl ObstacleConfig {
    /// Resolve the shape name into a membership predicate. Unrecognized
    /// names are a caller configuration error, not a numerical fault.
    pub fn to_shape(&self) -> Result<Option<Shape>, ConfigError> {
        let (cx, cy) = self.center;
        let shape = match self.shape.as_str() {
            "none" | "" => return Ok(None),
            "circle" => Shape::Circle { cx, cy, radius: self.radius },
            "square" => Shape::Square { cx, cy, side: self.side },
            "ellipse" => {
                let (rx, ry) = self.semi_axes;
                Shape::Ellipse { cx, cy, rx, ry }
            }
            other => return Err(ConfigError::InvalidShape { name: other.to_string() }),
        };
        shape.validate()?;
        Ok(Some(shape))
    }
}

impl Config {
    /// Strict load: a missing or unparsable file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Reject invalid parameter values before any stepping occurs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        if p.rho <= 0.0 {
            return Err(ConfigError::NotPositive { field: "physics.rho", value: p.rho });
        }
        if p.dt <= 0.0 {
            return Err(ConfigError::NotPositive { field: "physics.dt", value: p.dt });
        }
        if let Some(nu) = p.viscosity {
            if nu <= 0.0 {
                return Err(ConfigError::NotPositive { field: "physics.viscosity", value: nu });
            }
        } else if p.reynolds <= 0.0 {
            return Err(ConfigError::NotPositive { field: "physics.reynolds", value: p.reynolds });
        }
        if p.inflow < 0.0 {
            return Err(ConfigError::Negative { field: "physics.inflow", value: p.inflow });
        }
        if self.run.sub_steps == 0 {
            return Err(ConfigError::TooSmall { field: "run.sub_steps", min: 1, value: 0 });
        }
        if self.run.pressure_iter == 0 {
            return Err(ConfigError::TooSmall { field: "run.pressure_iter", min: 1, value: 0 });
        }
        if let Some(tol) = self.run.pressure_tol {
            if tol <= 0.0 {
                return Err(ConfigError::NotPositive { field: "run.pressure_tol", value: tol });
            }
        }
        self.obstacle.to_shape()?;
        Ok(())
    }
}
