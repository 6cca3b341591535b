//! Dormand-Prince 5(4) adaptive integrator.
//!
//! The fifth-order solution is propagated; the embedded fourth-order
//! solution provides the error estimate for step-size control. Events are
//! localized inside accepted steps by bisection on a cubic Hermite
//! interpolant built from the state and derivative at both step endpoints.

use crate::ode::coefficients::{A, B, B_ERR, C, STAGES};
use crate::ode::events::{
    sign_change_detected, EventConfig, EventFunction, EventResult,
};

/// System of ordinary differential equations: dy/dt = f(t, y)
pub trait OdeSystem<const N: usize> {
    /// Evaluate the right-hand side of the ODE system
    ///
    /// # Arguments
    /// * `t` - Current value of the independent variable
    /// * `y` - Current state vector
    /// * `dydt` - Output: derivative dy/dt
    fn rhs(&self, t: f64, y: &[f64; N], dydt: &mut [f64; N]);
}

/// Integration result from a single step
#[derive(Debug, Clone)]
pub struct StepResult<const N: usize> {
    /// New state after the step (fifth-order solution)
    pub y: [f64; N],
    /// New value of the independent variable
    pub t: f64,
    /// Normalized error estimate (≤ 1.0 for acceptance)
    pub error: f64,
    /// Suggested step size for the next step
    pub h_next: f64,
    /// Whether the step was accepted
    pub accepted: bool,
}

/// Integration statistics for diagnostics
#[derive(Debug, Clone, Default)]
pub struct Stats {
    /// Total number of right-hand-side evaluations
    pub fn_evals: u64,
    /// Number of accepted steps
    pub accepted_steps: u64,
    /// Number of rejected steps
    pub rejected_steps: u64,
}

/// Step-size controller using an I-controller
///
/// h_new = safety * h * error^(-1/(p+1)) with p = 4 for the embedded
/// fourth-order error estimate.
#[derive(Clone)]
pub struct StepController {
    /// Safety factor
    pub safety: f64,
    /// Maximum growth factor per step
    pub max_factor: f64,
    /// Minimum reduction factor per step
    pub min_factor: f64,
    exponent: f64,
}

impl Default for StepController {
    fn default() -> Self {
        Self {
            safety: 0.9,
            max_factor: 5.0,
            min_factor: 0.2,
            exponent: 1.0 / 5.0,
        }
    }
}

impl StepController {
    /// Compute the step size adjustment factor
    pub fn compute_factor(&self, error: f64) -> f64 {
        if error == 0.0 {
            return self.max_factor;
        }

        let factor = self.safety * error.powf(-self.exponent);
        factor.clamp(self.min_factor, self.max_factor)
    }
}

/// Tolerance specification for error control
///
/// Error is computed as: |y5 - y4| / (atol + rtol * |y5|)
#[derive(Debug, Clone)]
pub struct Tolerances<const N: usize> {
    /// Absolute tolerance per component
    pub atol: [f64; N],
    /// Relative tolerance per component
    pub rtol: [f64; N],
}

impl<const N: usize> Tolerances<N> {
    /// Create tolerances with uniform values
    pub fn new(atol: f64, rtol: f64) -> Self {
        Self {
            atol: [atol; N],
            rtol: [rtol; N],
        }
    }

    /// Create tolerances with per-component values
    pub fn with_components(atol: [f64; N], rtol: [f64; N]) -> Self {
        Self { atol, rtol }
    }
}

/// Integration failures.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// Malformed integration inputs
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// NaN or infinity appeared in the state
    #[error("state became non-finite at t = {t}")]
    NonFiniteState {
        /// Value of the independent variable when detected
        t: f64,
    },

    /// Step-count guard tripped
    #[error("exceeded the maximum of {max_steps} integration steps")]
    MaxStepsExceeded {
        /// The configured bound
        max_steps: u64,
    },

    /// The controller pinned the step at its minimum without progress
    #[error("step size {h} at t = {t} fell below the minimum step size")]
    StepSizeTooSmall {
        /// Value of the independent variable when detected
        t: f64,
        /// Offending step size
        h: f64,
    },
}

/// Outcome of an integration run with event monitoring.
#[derive(Debug, Clone)]
pub enum IntegrationOutcome<const N: usize> {
    /// A terminal event fired; integration stopped at the refined crossing.
    Event(EventResult<N>),
    /// The endpoint was reached without a terminal event.
    Completed {
        /// Final value of the independent variable
        t: f64,
        /// Final state
        y: [f64; N],
    },
}

/// Dormand-Prince 5(4) integrator
///
/// # Type Parameters
/// * `N` - Dimension of the state vector
pub struct Dopri5<const N: usize> {
    /// Tolerance specification
    tol: Tolerances<N>,
    /// Step-size controller
    controller: StepController,
    /// Minimum step size
    pub h_min: f64,
    /// Maximum step size
    pub h_max: f64,
    /// Maximum number of integration steps before error
    pub max_steps: u64,
    /// Stage evaluations (pre-allocated workspace)
    k: [[f64; N]; STAGES],
    /// Integration statistics
    pub stats: Stats,
    /// Events localized during `integrate_to_event` with a non-terminal
    /// config. Cleared at the start of each `integrate_to_event` call.
    pub collected_events: Vec<EventResult<N>>,
}

impl<const N: usize> Dopri5<N> {
    /// Create a new solver with the given tolerances
    pub fn new(tol: Tolerances<N>) -> Self {
        Self {
            tol,
            controller: StepController::default(),
            h_min: 1e-14,
            h_max: f64::INFINITY,
            max_steps: 1_000_000,
            k: [[0.0; N]; STAGES],
            stats: Stats::default(),
            collected_events: Vec::new(),
        }
    }

    /// Set minimum and maximum step sizes
    pub fn set_step_limits(&mut self, h_min: f64, h_max: f64) {
        self.h_min = h_min;
        self.h_max = h_max;
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Perform a single integration step
    ///
    /// Computes the seven stages, forms the fifth-order solution, estimates
    /// the error against the embedded fourth-order solution, and determines
    /// whether the step is accepted. After the call, `k[0]` holds the state
    /// derivative at the left endpoint and `k[6]` the derivative at the
    /// right endpoint (the last stage is evaluated on the new solution).
    pub fn step<S: OdeSystem<N>>(
        &mut self,
        sys: &S,
        t: f64,
        y: &[f64; N],
        h: f64,
    ) -> StepResult<N> {
        let h = h.signum() * h.abs().clamp(self.h_min, self.h_max);

        self.compute_stages(sys, t, y, h);

        let y5 = self.compute_solution(y, h);
        let error = self.compute_error(&y5, h);
        let accepted = error <= 1.0;

        let factor = self.controller.compute_factor(error);
        let h_next = (h.abs() * factor).clamp(self.h_min, self.h_max);

        self.stats.fn_evals += STAGES as u64;
        if accepted {
            self.stats.accepted_steps += 1;
        } else {
            self.stats.rejected_steps += 1;
        }

        StepResult {
            y: y5,
            t: t + h,
            error,
            h_next,
            accepted,
        }
    }

    /// Integrate from t0 to tf
    ///
    /// # Arguments
    /// * `sys` - The ODE system to integrate
    /// * `t0` - Initial value of the independent variable
    /// * `y0` - Initial state
    /// * `tf` - Final value of the independent variable
    /// * `h0` - Initial step size guess
    pub fn integrate<S: OdeSystem<N>>(
        &mut self,
        sys: &S,
        t0: f64,
        y0: &[f64; N],
        tf: f64,
        h0: f64,
    ) -> Result<(f64, [f64; N]), IntegrationError> {
        if t0 == tf {
            return Ok((t0, *y0));
        }
        self.validate_inputs(t0, y0, tf, h0)?;

        let mut t = t0;
        let mut y = *y0;
        let mut h = h0;

        let direction = (tf - t0).signum();
        let mut step_count = 0u64;

        while (tf - t) * direction > self.h_min {
            // Don't overshoot the endpoint
            if (t + h - tf) * direction > 0.0 {
                h = tf - t;
            }

            let result = self.step(sys, t, &y, h);

            if result.accepted {
                t = result.t;
                y = result.y;
                if !y.iter().all(|v| v.is_finite()) {
                    return Err(IntegrationError::NonFiniteState { t });
                }
            }

            h = result.h_next * direction;

            step_count += 1;
            if step_count > self.max_steps {
                return Err(IntegrationError::MaxStepsExceeded {
                    max_steps: self.max_steps,
                });
            }

            // A rejected step already pinned at h_min cannot make progress
            if !result.accepted && result.h_next <= self.h_min && (tf - t) * direction > self.h_min
            {
                return Err(IntegrationError::StepSizeTooSmall {
                    t,
                    h: result.h_next,
                });
            }
        }

        Ok((t, y))
    }

    /// Integrate until an event occurs or the endpoint is reached.
    ///
    /// The event function g(t, y) is evaluated on every accepted step. When
    /// a sign change in the configured direction is bracketed, the crossing
    /// is refined by bisection on a cubic Hermite interpolant of the step,
    /// so the reported event location is accurate to `config.root_tol` on
    /// the t axis rather than to the step size.
    ///
    /// # Returns
    /// * `Ok(IntegrationOutcome::Event(..))` - a terminal event fired
    /// * `Ok(IntegrationOutcome::Completed { .. })` - reached tf
    /// * `Err(IntegrationError)` - integration failed
    #[allow(clippy::too_many_arguments)]
    pub fn integrate_to_event<S, E>(
        &mut self,
        sys: &S,
        event: &E,
        config: &EventConfig,
        t0: f64,
        y0: &[f64; N],
        tf: f64,
        h0: f64,
    ) -> Result<IntegrationOutcome<N>, IntegrationError>
    where
        S: OdeSystem<N>,
        E: EventFunction<N>,
    {
        if t0 == tf {
            return Ok(IntegrationOutcome::Completed { t: t0, y: *y0 });
        }
        self.validate_inputs(t0, y0, tf, h0)?;
        self.collected_events.clear();

        let mut t = t0;
        let mut y = *y0;
        let mut h = h0;

        let direction = (tf - t0).signum();
        let mut g_prev = event.eval(t, &y);
        let mut step_count = 0u64;

        while (tf - t) * direction > self.h_min {
            if (t + h - tf) * direction > 0.0 {
                h = tf - t;
            }

            let result = self.step(sys, t, &y, h);

            if result.accepted {
                if !result.y.iter().all(|v| v.is_finite()) {
                    return Err(IntegrationError::NonFiniteState { t: result.t });
                }

                let g_new = event.eval(result.t, &result.y);

                if sign_change_detected(g_prev, g_new, config.direction) {
                    let event_result =
                        self.refine_event(event, t, &y, result.t, &result.y, g_prev, config);

                    if config.terminal {
                        return Ok(IntegrationOutcome::Event(event_result));
                    }
                    self.collected_events.push(event_result);
                }

                t = result.t;
                y = result.y;
                g_prev = g_new;
            }

            h = result.h_next * direction;

            step_count += 1;
            if step_count > self.max_steps {
                return Err(IntegrationError::MaxStepsExceeded {
                    max_steps: self.max_steps,
                });
            }

            if !result.accepted && result.h_next <= self.h_min && (tf - t) * direction > self.h_min
            {
                return Err(IntegrationError::StepSizeTooSmall {
                    t,
                    h: result.h_next,
                });
            }
        }

        Ok(IntegrationOutcome::Completed { t, y })
    }

    /// Bisect the bracketing step down to `config.root_tol` using the
    /// Hermite interpolant. `k[0]`/`k[6]` must hold the endpoint derivatives
    /// of the step being refined, which is the case immediately after an
    /// accepted `step`.
    fn refine_event<E: EventFunction<N>>(
        &self,
        event: &E,
        t0: f64,
        y0: &[f64; N],
        t1: f64,
        y1: &[f64; N],
        g0: f64,
        config: &EventConfig,
    ) -> EventResult<N> {
        let mut a = t0;
        let mut b = t1;
        let mut g_a = g0;

        let mut iterations = 0;
        while (b - a).abs() > config.root_tol && iterations < 128 {
            let mid = 0.5 * (a + b);
            let y_mid = self.hermite_interpolate(t0, y0, t1, y1, mid);
            let g_mid = event.eval(mid, &y_mid);

            if (g_mid > 0.0) == (g_a > 0.0) {
                a = mid;
                g_a = g_mid;
            } else {
                b = mid;
            }
            iterations += 1;
        }

        let t_event = 0.5 * (a + b);
        let y_event = self.hermite_interpolate(t0, y0, t1, y1, t_event);

        EventResult {
            t: t_event,
            y: y_event,
        }
    }

    /// Cubic Hermite interpolation across one accepted step, using the
    /// endpoint states and the endpoint derivatives stored in `k`.
    fn hermite_interpolate(
        &self,
        t0: f64,
        y0: &[f64; N],
        t1: f64,
        y1: &[f64; N],
        t: f64,
    ) -> [f64; N] {
        let h = t1 - t0;
        let s = (t - t0) / h;

        let h00 = (1.0 + 2.0 * s) * (1.0 - s) * (1.0 - s);
        let h10 = s * (1.0 - s) * (1.0 - s);
        let h01 = s * s * (3.0 - 2.0 * s);
        let h11 = s * s * (s - 1.0);

        let mut y = [0.0; N];
        for n in 0..N {
            y[n] = h00 * y0[n] + h10 * h * self.k[0][n] + h01 * y1[n] + h11 * h * self.k[6][n];
        }
        y
    }

    /// Compute all seven stages
    #[allow(clippy::needless_range_loop)]
    fn compute_stages<S: OdeSystem<N>>(&mut self, sys: &S, t: f64, y: &[f64; N], h: f64) {
        let mut y_temp = [0.0; N];

        // Stage 0: k[0] = f(t, y)
        sys.rhs(t, y, &mut self.k[0]);

        // Stages 1-6
        for i in 1..STAGES {
            // y_temp = y + h * sum_{j=0}^{i-1} a[i][j] * k[j]
            for n in 0..N {
                let mut sum = 0.0;
                for j in 0..i {
                    sum += A[i][j] * self.k[j][n];
                }
                y_temp[n] = y[n] + h * sum;
            }

            // k[i] = f(t + c[i]*h, y_temp)
            sys.rhs(t + C[i] * h, &y_temp, &mut self.k[i]);
        }
    }

    /// Compute the fifth-order solution from the stages
    #[allow(clippy::needless_range_loop)]
    fn compute_solution(&self, y: &[f64; N], h: f64) -> [f64; N] {
        let mut y_new = [0.0; N];

        for n in 0..N {
            let mut sum = 0.0;
            for i in 0..STAGES {
                sum += B[i] * self.k[i][n];
            }
            y_new[n] = y[n] + h * sum;
        }

        y_new
    }

    /// Compute the normalized error estimate
    ///
    /// Infinity norm of the scaled embedded-pair difference:
    /// error = max_n( |h * sum_i (b[i] - b_hat[i]) * k[i][n]| / scale[n] )
    /// where scale[n] = atol[n] + rtol[n] * |y5[n]|
    #[allow(clippy::needless_range_loop)]
    fn compute_error(&self, y5: &[f64; N], h: f64) -> f64 {
        let mut max_err: f64 = 0.0;

        for n in 0..N {
            let mut err_n = 0.0;
            for i in 0..STAGES {
                err_n += B_ERR[i] * self.k[i][n];
            }
            err_n *= h;

            let scale = self.tol.atol[n] + self.tol.rtol[n] * y5[n].abs();
            let scaled_err = err_n.abs() / scale;

            max_err = max_err.max(scaled_err);
        }

        max_err
    }

    /// Validate integration inputs
    fn validate_inputs(
        &self,
        t0: f64,
        y0: &[f64; N],
        tf: f64,
        h0: f64,
    ) -> Result<(), IntegrationError> {
        if !t0.is_finite() || !tf.is_finite() || !h0.is_finite() {
            return Err(IntegrationError::InvalidInput(
                "t0, tf, and h0 must be finite".to_string(),
            ));
        }
        if h0 == 0.0 {
            return Err(IntegrationError::InvalidInput(
                "h0 must be non-zero".to_string(),
            ));
        }
        let direction = tf - t0;
        if direction != 0.0 && h0.signum() != direction.signum() {
            return Err(IntegrationError::InvalidInput(
                "h0 sign must match integration direction (tf - t0)".to_string(),
            ));
        }
        for (i, &val) in y0.iter().enumerate() {
            if !val.is_finite() {
                return Err(IntegrationError::InvalidInput(format!(
                    "y0[{}] is not finite",
                    i
                )));
            }
        }
        for (i, (&a, &r)) in self.tol.atol.iter().zip(self.tol.rtol.iter()).enumerate() {
            if !a.is_finite() || a <= 0.0 {
                return Err(IntegrationError::InvalidInput(format!(
                    "atol[{}] must be positive and finite",
                    i
                )));
            }
            if !r.is_finite() || r < 0.0 {
                return Err(IntegrationError::InvalidInput(format!(
                    "rtol[{}] must be non-negative and finite",
                    i
                )));
            }
        }
        Ok(())
    }
}
