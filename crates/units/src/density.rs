use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// A mass density quantity in g/cm³.
///
/// Central densities of polytropic models span many orders of magnitude
/// (∼1 g/cm³ for low-mass stars up to ∼10⁹ g/cm³ for massive white dwarfs),
/// all comfortably within f64 range in cgs.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Density(f64); // Base unit: g/cm³

impl Density {
    /// Creates a new `Density` from a value in g/cm³.
    pub fn from_g_per_cm3(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Density` from a value in kg/m³.
    pub fn from_kg_per_m3(value: f64) -> Self {
        Self(value * 1e-3)
    }

    /// Returns the density in g/cm³.
    pub fn to_g_per_cm3(&self) -> f64 {
        self.0
    }

    /// Converts the density to kg/m³.
    pub fn to_kg_per_m3(&self) -> f64 {
        self.0 * 1e3
    }

    /// Raise to an arbitrary real power (returns dimensionless f64)
    pub fn powf(&self, n: f64) -> f64 {
        self.0.powf(n)
    }
}

impl Mul<f64> for Density {
    type Output = Density;

    fn mul(self, rhs: f64) -> Density {
        Density(self.0 * rhs)
    }
}

impl Div<f64> for Density {
    type Output = Density;

    fn div(self, rhs: f64) -> Density {
        Density(self.0 / rhs)
    }
}

/// Division of Density by Density returns a dimensionless ratio
impl Div for Density {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}
