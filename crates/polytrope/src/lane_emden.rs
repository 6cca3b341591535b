//! The Lane-Emden equation as a first-order ODE system.
//!
//! The second-order equation
//!
//! ```text
//! (1/ξ²) d/dξ (ξ² dθ/dξ) = −θⁿ
//! ```
//!
//! is written as the two-variable system y = [θ, dθ/dξ] with
//!
//! ```text
//! dθ/dξ  = y[1]
//! d²θ/dξ² = −θⁿ − (2/ξ)·dθ/dξ
//! ```
//!
//! The equation is singular at ξ = 0, so integration starts at a small
//! offset ξ₀ with initial conditions from the Taylor expansion about the
//! center, which absorbs the 2/ξ term analytically.

use crate::ode::{EventConfig, EventDirection, EventFunction, OdeSystem};

/// Offset from the coordinate origin at which integration starts.
///
/// Small enough that the truncated Taylor expansion's error is far below
/// the integration tolerance; the O(ξ⁶) term dropped from θ is ∼1e-32 here.
pub const XI_0: f64 = 1e-5;

/// The Lane-Emden system for a given polytropic index.
#[derive(Debug, Clone, Copy)]
pub struct LaneEmden {
    /// Polytropic index n
    pub n: f64,
}

impl LaneEmden {
    /// Taylor-series initial conditions at a small ξ₀ > 0:
    ///
    /// ```text
    /// θ(ξ₀)     = 1 − ξ₀²/6 + n·ξ₀⁴/120
    /// dθ/dξ(ξ₀) = −ξ₀/3 + n·ξ₀³/30
    /// ```
    pub fn initial_conditions(&self, xi_0: f64) -> [f64; 2] {
        let theta = 1.0 - xi_0.powi(2) / 6.0 + self.n * xi_0.powi(4) / 120.0;
        let dtheta = -xi_0 / 3.0 + self.n * xi_0.powi(3) / 30.0;
        [theta, dtheta]
    }
}

impl OdeSystem<2> for LaneEmden {
    fn rhs(&self, xi: f64, y: &[f64; 2], dydt: &mut [f64; 2]) {
        // Floating-point error can push θ slightly negative near the
        // surface; clamp before the fractional power to stay in the
        // real domain.
        let theta = y[0].max(0.0);

        dydt[0] = y[1];
        dydt[1] = -theta.powf(self.n) - (2.0 / xi) * y[1];
    }
}

/// Surface event: θ reaching zero marks the edge of the star.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceEvent;

impl EventFunction<2> for SurfaceEvent {
    fn eval(&self, _xi: f64, y: &[f64; 2]) -> f64 {
        y[0]
    }
}

impl SurfaceEvent {
    /// Event descriptor for the surface: terminal, and only a descending
    /// crossing counts — θ recovering upward from a transient numerical
    /// excursion below zero is not a surface.
    pub fn config() -> EventConfig {
        EventConfig {
            direction: EventDirection::Falling,
            terminal: true,
            root_tol: 1e-12,
        }
    }
}
