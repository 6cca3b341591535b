//! The solve pipeline: integration to the surface and physical conversion.

use serde::{Deserialize, Serialize};
use units::{Length, Mass};

use crate::constants::{G, PI};
use crate::error::PolytropeError;
use crate::lane_emden::{LaneEmden, SurfaceEvent, XI_0};
use crate::model::ModelParameters;
use crate::ode::{Dopri5, IntegrationOutcome, Tolerances};

/// Initial step size handed to the error controller; it adapts from there.
const H_0: f64 = 1e-4;

/// Step-size cap. The surface is localized on a cubic Hermite interpolant
/// whose error grows as h⁴; the cap keeps that error well below the
/// integration tolerance even where the local error estimate would allow
/// much larger steps.
const H_MAX: f64 = 0.1;

/// Dimensionless boundary values at the stellar surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SurfaceBoundary {
    /// First ξ where θ crosses zero, descending
    pub xi_1: f64,
    /// dθ/dξ at ξ₁
    pub dtheta_dxi_1: f64,
}

/// Physical properties derived from the dimensionless surface solution.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PhysicalProperties {
    /// Length scale α converting ξ to physical radius
    pub alpha: Length,
    /// Total stellar radius R = α·ξ₁
    pub radius: Length,
    /// Total stellar mass M = 4πα³ρc·(−ξ₁²·θ′(ξ₁))
    pub mass: Mass,
}

/// An equilibrium polytropic stellar model.
///
/// Produced by [`solve`]; immutable. Exposes the dimensionless boundary
/// solution and the physical properties derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PolytropicStar {
    boundary: SurfaceBoundary,
    properties: PhysicalProperties,
}

impl PolytropicStar {
    /// Dimensionless radius of the surface.
    pub fn xi_1(&self) -> f64 {
        self.boundary.xi_1
    }

    /// Slope dθ/dξ at the surface.
    pub fn dtheta_dxi_1(&self) -> f64 {
        self.boundary.dtheta_dxi_1
    }

    /// Length scale α.
    pub fn alpha(&self) -> Length {
        self.properties.alpha
    }

    /// Total stellar radius.
    pub fn radius(&self) -> Length {
        self.properties.radius
    }

    /// Total stellar mass.
    pub fn mass(&self) -> Mass {
        self.properties.mass
    }

    /// The dimensionless surface boundary.
    pub fn boundary(&self) -> SurfaceBoundary {
        self.boundary
    }

    /// The derived physical properties.
    pub fn properties(&self) -> PhysicalProperties {
        self.properties
    }
}

/// Solves the Lane-Emden equation for the given model and converts the
/// surface solution into physical units.
///
/// Validates the parameters, builds the Taylor-series initial conditions at
/// ξ₀, integrates toward ξ_max watching for the descending zero crossing of
/// θ, and converts the localized crossing into a physical radius and mass.
/// Reaching ξ_max without a crossing (no finite surface exists, e.g. n ≥ 5)
/// is reported as [`PolytropeError::NoSurface`], never as a boundary at the
/// last integrated point.
///
/// # Examples
///
/// ```rust
/// use polytrope::{solve, ModelParameters};
///
/// // n = 0: the analytic solution is θ = 1 − ξ²/6, surface at √6
/// let star = solve(&ModelParameters::new(0.0)).unwrap();
/// assert!((star.xi_1() - 6.0f64.sqrt()).abs() < 1e-6);
/// ```
pub fn solve(params: &ModelParameters) -> Result<PolytropicStar, PolytropeError> {
    params.validate()?;

    let system = LaneEmden { n: params.n };
    let y0 = system.initial_conditions(XI_0);

    let mut solver = Dopri5::new(Tolerances::new(params.atol, params.rtol));
    solver.set_step_limits(1e-14, H_MAX);
    let outcome = solver.integrate_to_event(
        &system,
        &SurfaceEvent,
        &SurfaceEvent::config(),
        XI_0,
        &y0,
        params.xi_max,
        H_0,
    )?;

    match outcome {
        IntegrationOutcome::Event(ev) => {
            let boundary = SurfaceBoundary {
                xi_1: ev.t,
                dtheta_dxi_1: ev.y[1],
            };
            let properties = physical_properties(params, &boundary);
            Ok(PolytropicStar {
                boundary,
                properties,
            })
        }
        IntegrationOutcome::Completed { .. } => Err(PolytropeError::NoSurface {
            xi_max: params.xi_max,
        }),
    }
}

/// Converts the dimensionless surface solution into cgs quantities.
///
/// The density exponent in the length scale is (1/n) − 1; n = 0 is the
/// defined special value −1 (the incompressible limit), not a
/// division-by-zero fallback.
fn physical_properties(params: &ModelParameters, boundary: &SurfaceBoundary) -> PhysicalProperties {
    let exponent = if params.n == 0.0 {
        -1.0
    } else {
        1.0 / params.n - 1.0
    };

    let rho_c = params.rho_c.to_g_per_cm3();
    let alpha_cm =
        ((params.n + 1.0) * params.k / (4.0 * PI * G) * params.rho_c.powf(exponent)).sqrt();

    let r_cgs = alpha_cm * boundary.xi_1;
    let m_cgs =
        4.0 * PI * alpha_cm.powi(3) * rho_c * (-boundary.xi_1.powi(2) * boundary.dtheta_dxi_1);

    PhysicalProperties {
        alpha: Length::from_cm(alpha_cm),
        radius: Length::from_cm(r_cgs),
        mass: Mass::from_grams(m_cgs),
    }
}
