use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors. All of these are raised before any stepping
/// begins; once a run starts there are no recoverable error conditions.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unrecognized obstacle shape {name:?} (expected circle, square, ellipse, or none)")]
    InvalidShape { name: String },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be at least {min}, got {value}")]
    TooSmall { field: &'static str, min: usize, value: usize },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Simulation errors surfaced by the convenience `run()` driver.
///
/// The explicit scheme has no stability guard: with an oversized `dt` the
/// fields blow up silently. `DivergenceDetected` only appears when the
/// opt-in `detect_divergence` flag is set.
#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("numerical divergence detected at outer step {step}")]
    DivergenceDetected { step: usize },
}
