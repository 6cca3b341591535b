//! Physical unit quantities for stellar-interior calculations.
//!
//! All base units are cgs (centimeters, grams, g/cm³), the natural system
//! for stellar-structure work, with conversions to solar units for output.

pub mod density;
pub mod length;
pub mod mass;


pub use density::Density;
pub use length::{Length, SOLAR_RADIUS_CM};
pub use mass::{Mass, SOLAR_MASS_G};
