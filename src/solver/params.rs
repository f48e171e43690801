use crate::error::ConfigError;

/// Physical and iteration parameters, constant for the duration of a run.
/// Changing them requires resetting the fields and restarting.
#[derive(Debug, Clone)]
pub struct SolverParams {
    /// Density.
    pub rho: f64,
    /// Kinematic viscosity.
    pub nu: f64,
    /// Sub-step size.
    pub dt: f64,
    /// Inlet velocity magnitude.
    pub u_in: f64,
    /// Fixed Jacobi sweep count for the pressure relaxation.
    pub pressure_iter: usize,
    /// Optional early exit on max |p - pn|; `None` keeps the fixed count.
    pub pressure_tol: Option<f64>,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            nu: 0.01,
            dt: 1e-4,
            u_in: 1.0,
            pressure_iter: 50,
            pressure_tol: None,
        }
    }
}

impl SolverParams {
    /// Parameters from a Reynolds number: nu = 1/Re under unit density and
    /// unit length scale.
    pub fn from_reynolds(re: f64) -> Self {
        Self { nu: 1.0 / re, ..Self::default() }
    }

    /// Reject degenerate values before stepping; the scheme itself has no
    /// stability guard and would just propagate NaN/Inf.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rho <= 0.0 {
            return Err(ConfigError::NotPositive { field: "rho", value: self.rho });
        }
        if self.nu <= 0.0 {
            return Err(ConfigError::NotPositive { field: "nu", value: self.nu });
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::NotPositive { field: "dt", value: self.dt });
        }
        if self.u_in < 0.0 {
            return Err(ConfigError::Negative { field: "u_in", value: self.u_in });
        }
        if self.pressure_iter == 0 {
            return Err(ConfigError::TooSmall { field: "pressure_iter", min: 1, value: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SolverParams::default();
        assert_eq!(params.rho, 1.0);
        assert_eq!(params.nu, 0.01);
        assert_eq!(params.dt, 1e-4);
        assert_eq!(params.u_in, 1.0);
        assert_eq!(params.pressure_iter, 50);
        assert!(params.pressure_tol.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_from_reynolds() {
        let params = SolverParams::from_reynolds(500.0);
        assert!((params.nu - 0.002).abs() < 1e-15, "nu should be 1/Re, got {}", params.nu);
        assert_eq!(params.rho, 1.0);
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        assert!(SolverParams { rho: 0.0, ..Default::default() }.validate().is_err());
        assert!(SolverParams { nu: -0.01, ..Default::default() }.validate().is_err());
        assert!(SolverParams { dt: 0.0, ..Default::default() }.validate().is_err());
        assert!(SolverParams { u_in: -1.0, ..Default::default() }.validate().is_err());
        assert!(SolverParams { pressure_iter: 0, ..Default::default() }.validate().is_err());
    }

    #[test]
    fn test_zero_inflow_allowed() {
        assert!(SolverParams { u_in: 0.0, ..Default::default() }.validate().is_ok());
    }
}
