//! Adaptive Dormand-Prince 5(4) integration with event detection.
//!
//! A general-purpose embedded Runge-Kutta integrator over fixed-size state
//! vectors, with scaled-error step control and direction-sensitive zero
//! crossing ("event") localization. The event is found to sub-step precision
//! by bisection on a cubic Hermite interpolant of the accepted step, so the
//! reported crossing is far more accurate than the step boundary.

mod coefficients;
mod events;
mod solver;

#[cfg(test)]
mod events_test;
#[cfg(test)]
mod solver_test;

pub use events::{EventConfig, EventDirection, EventFunction, EventResult};
pub use solver::{
    Dopri5, IntegrationError, IntegrationOutcome, OdeSystem, Stats, StepController, StepResult,
    Tolerances,
};
