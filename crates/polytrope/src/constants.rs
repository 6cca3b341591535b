//! Physical constants in cgs units.

/// Gravitational constant (cm³/(g·s²))
pub const G: f64 = 6.67430e-8;

/// Pi
pub const PI: f64 = std::f64::consts::PI;
