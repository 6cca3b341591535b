//! Lane-Emden solver for polytropic stellar models.
//!
//! Solves the dimensionless Lane-Emden equation
//!
//! ```text
//! d²θ/dξ² = −θⁿ − (2/ξ)·dθ/dξ
//! ```
//!
//! for a polytropic index n, locates the stellar surface (the first zero of
//! θ), and converts the boundary solution into a physical radius and mass in
//! cgs and solar units.
//!
//! # Example
//!
//! ```rust
//! use polytrope::{solve, ModelParameters};
//!
//! // Non-relativistic degenerate matter (white dwarf core)
//! let params = ModelParameters::new(1.5);
//! let star = solve(&params).unwrap();
//!
//! println!("xi_1 = {}", star.xi_1());
//! println!("R = {} R_sun", star.radius().to_solar_radii());
//! println!("M = {} M_sun", star.mass().to_solar_masses());
//! ```

pub mod constants;
pub mod error;
pub mod lane_emden;
pub mod model;
pub mod ode;
pub mod star;


pub use error::PolytropeError;
pub use lane_emden::{LaneEmden, SurfaceEvent, XI_0};
pub use model::ModelParameters;
pub use star::{solve, PhysicalProperties, PolytropicStar, SurfaceBoundary};
