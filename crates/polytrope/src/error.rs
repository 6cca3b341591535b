//! Solver error types.

use crate::ode::IntegrationError;

/// Errors produced by the polytropic solve pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PolytropeError {
    /// A model parameter failed validation before integration started.
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// θ never reached zero before ξ_max; no finite stellar surface exists
    /// for this configuration (e.g. n ≥ 5).
    #[error("theta did not reach zero before xi_max = {xi_max}; no finite surface")]
    NoSurface {
        /// Upper integration bound that was reached
        xi_max: f64,
    },

    /// The adaptive integrator failed.
    #[error("integration failed: {0}")]
    Integration(#[from] IntegrationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PolytropeError::InvalidParameter {
            name: "rho_c",
            value: -1.0,
            reason: "central density must be positive",
        };
        assert!(err.to_string().contains("rho_c"));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_no_surface_display() {
        let err = PolytropeError::NoSurface { xi_max: 30.0 };
        assert!(err.to_string().contains("30"));
    }
}
