use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Solar radius in centimeters (6.957 × 10¹⁰ cm)
pub const SOLAR_RADIUS_CM: f64 = 6.957e10;

/// Centimeters per kilometer
pub const CM_PER_KM: f64 = 1e5;

/// Centimeters per meter
pub const CM_PER_M: f64 = 1e2;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with centimeters as the base
/// unit. Stellar-interior quantities (the Lane-Emden length scale α and the
/// stellar radius built from it) come out of the equations in cgs, so cgs is
/// the natural choice here; solar radii are provided for output.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let radius = Length::from_solar_radii(1.0);
/// let radius_cm = radius.to_cm();
///
/// let core = Length::from_km(1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: cm

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in centimeters.
    pub fn from_cm(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_meters(value: f64) -> Self {
        Self(value * CM_PER_M)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value * CM_PER_KM)
    }

    /// Creates a new `Length` from a value in solar radii.
    pub fn from_solar_radii(value: f64) -> Self {
        Self(value * SOLAR_RADIUS_CM)
    }

    /// Returns the length in centimeters.
    pub fn to_cm(&self) -> f64 {
        self.0
    }

    /// Converts the length to meters.
    pub fn to_m(&self) -> f64 {
        self.0 / CM_PER_M
    }

    /// Converts the length to kilometers.
    pub fn to_km(&self) -> f64 {
        self.0 / CM_PER_KM
    }

    /// Converts the length to solar radii.
    pub fn to_solar_radii(&self) -> f64 {
        self.0 / SOLAR_RADIUS_CM
    }

    /// Raise to integer power (returns dimensionless f64 for dimensional consistency)
    pub fn powi(&self, n: i32) -> f64 {
        self.0.powi(n)
    }

    /// Square root
    pub fn sqrt(&self) -> f64 {
        self.0.sqrt()
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
