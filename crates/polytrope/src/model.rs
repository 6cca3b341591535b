//! Model configuration for a polytropic solve.

use serde::{Deserialize, Serialize};
use units::Density;

use crate::error::PolytropeError;
use crate::lane_emden::XI_0;

/// Parameters defining a polytropic stellar model.
///
/// Immutable once supplied to [`crate::solve`]. Defaults correspond to a
/// white-dwarf-like configuration: ρc = 10⁶ g/cm³ and the degenerate
/// equation-of-state constant K = 1.0036 × 10¹³ (cgs).
///
/// # Examples
///
/// ```rust
/// use polytrope::ModelParameters;
/// use units::Density;
///
/// let params = ModelParameters::new(1.5)
///     .with_central_density(Density::from_g_per_cm3(1e7))
///     .with_tolerances(1e-10, 1e-10);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ModelParameters {
    /// Polytropic index n ≥ 0
    pub n: f64,
    /// Central density ρc
    pub rho_c: Density,
    /// Equation-of-state constant K in P = K·ρ^((n+1)/n), cgs
    pub k: f64,
    /// Upper bound on the dimensionless radius ξ
    pub xi_max: f64,
    /// Relative integration tolerance
    pub rtol: f64,
    /// Absolute integration tolerance
    pub atol: f64,
}

impl ModelParameters {
    /// Creates parameters for the given polytropic index with default
    /// central density, equation-of-state constant, bound, and tolerances.
    pub fn new(n: f64) -> Self {
        Self {
            n,
            rho_c: Density::from_g_per_cm3(1e6),
            k: 1.0036e13,
            xi_max: 30.0,
            rtol: 1e-10,
            atol: 1e-10,
        }
    }

    /// Sets the central density.
    pub fn with_central_density(mut self, rho_c: Density) -> Self {
        self.rho_c = rho_c;
        self
    }

    /// Sets the equation-of-state constant K (cgs).
    pub fn with_eos_constant(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Sets the upper integration bound ξ_max.
    pub fn with_xi_max(mut self, xi_max: f64) -> Self {
        self.xi_max = xi_max;
        self
    }

    /// Sets the relative and absolute integration tolerances.
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    /// Validates the parameters.
    ///
    /// Runs before any integration step; a failed validation never reaches
    /// the integrator. Negative polytropic indices are rejected outright
    /// (no physical polytrope has n < 0); n = 0 is a supported special
    /// case in the unit conversion.
    pub fn validate(&self) -> Result<(), PolytropeError> {
        if !self.n.is_finite() || self.n < 0.0 {
            return Err(PolytropeError::InvalidParameter {
                name: "n",
                value: self.n,
                reason: "polytropic index must be finite and non-negative",
            });
        }
        let rho_c = self.rho_c.to_g_per_cm3();
        if !rho_c.is_finite() || rho_c <= 0.0 {
            return Err(PolytropeError::InvalidParameter {
                name: "rho_c",
                value: rho_c,
                reason: "central density must be positive",
            });
        }
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(PolytropeError::InvalidParameter {
                name: "k",
                value: self.k,
                reason: "equation-of-state constant must be positive",
            });
        }
        if !self.xi_max.is_finite() || self.xi_max <= XI_0 {
            return Err(PolytropeError::InvalidParameter {
                name: "xi_max",
                value: self.xi_max,
                reason: "integration bound must exceed the starting offset",
            });
        }
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(PolytropeError::InvalidParameter {
                name: "rtol",
                value: self.rtol,
                reason: "relative tolerance must be positive",
            });
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(PolytropeError::InvalidParameter {
                name: "atol",
                value: self.atol,
                reason: "absolute tolerance must be positive",
            });
        }
        Ok(())
    }
}
