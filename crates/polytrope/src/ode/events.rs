//! Event detection for the adaptive integrator.
//!
//! An event is a zero crossing of a scalar function g(t, y) of the solution.
//! The integrator watches g on every accepted step and, when a crossing in
//! the configured direction is bracketed, refines its location inside the
//! step before deciding whether to halt.

/// Which zero crossings of the event function count as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventDirection {
    /// g passes from negative to non-negative
    Rising,
    /// g passes from positive to non-positive
    Falling,
    /// Either direction
    #[default]
    Any,
}

/// Declarative event descriptor passed to the integrator.
///
/// Combines the crossing direction, whether the event terminates the
/// integration, and how tightly the crossing is localized on the t axis.
#[derive(Debug, Clone, Copy)]
pub struct EventConfig {
    /// Crossing direction filter
    pub direction: EventDirection,
    /// Halt the integration at the event if true; otherwise record the
    /// event and keep stepping from the end of the bracketing step.
    pub terminal: bool,
    /// Bisection tolerance on the independent variable
    pub root_tol: f64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            direction: EventDirection::Any,
            terminal: true,
            root_tol: 1e-12,
        }
    }
}

/// Scalar event function g(t, y) monitored during integration.
pub trait EventFunction<const N: usize> {
    /// Evaluate the event function at the given time and state.
    fn eval(&self, t: f64, y: &[f64; N]) -> f64;
}

/// A localized event: the refined crossing time and the interpolated state.
#[derive(Debug, Clone, Copy)]
pub struct EventResult<const N: usize> {
    /// Time of the crossing
    pub t: f64,
    /// State at the crossing
    pub y: [f64; N],
}

/// Returns true when g moved through zero in the configured direction
/// between two consecutive accepted states.
pub(crate) fn sign_change_detected(g_prev: f64, g_new: f64, direction: EventDirection) -> bool {
    match direction {
        EventDirection::Falling => g_prev > 0.0 && g_new <= 0.0,
        EventDirection::Rising => g_prev < 0.0 && g_new >= 0.0,
        EventDirection::Any => {
            (g_prev > 0.0 && g_new <= 0.0) || (g_prev < 0.0 && g_new >= 0.0)
        }
    }
}
