//! Dormand-Prince 5(4) Butcher tableau.
//!
//! The 7-stage embedded pair of Dormand & Prince (1980). The fifth-order
//! solution is propagated; the difference weights `B_ERR` give the
//! fourth-order error estimate. The last stage is evaluated at the step
//! endpoint on the fifth-order solution (FSAL), so `K[6]` is the state
//! derivative at the right end of an accepted step.
//!
//! Reference: Dormand, J.R. & Prince, P.J. (1980). "A family of embedded
//! Runge-Kutta formulae". J. Comp. Appl. Math., 6(1), 19-26.

/// Number of stages
pub(crate) const STAGES: usize = 7;

/// Nodes c_i (fractions of the step)
pub(crate) const C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

/// Stage coupling coefficients a_ij (strictly lower triangular)
pub(crate) const A: [[f64; STAGES]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
        0.0,
    ],
];

/// Fifth-order solution weights b_i
pub(crate) const B: [f64; STAGES] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];

/// Error weights b_i − b̂_i (fifth minus fourth order)
pub(crate) const B_ERR: [f64; STAGES] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];
