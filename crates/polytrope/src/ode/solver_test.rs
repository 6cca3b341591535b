mod tests {
    use approx::assert_relative_eq;

    use crate::ode::events::{EventConfig, EventDirection, EventFunction};
    use crate::ode::solver::{
        Dopri5, IntegrationError, IntegrationOutcome, OdeSystem, StepController, Tolerances,
    };

    /// du/dt = -u, exact solution u(t) = u0 * exp(-t)
    struct ExponentialDecay;

    impl OdeSystem<1> for ExponentialDecay {
        fn rhs(&self, _t: f64, y: &[f64; 1], dydt: &mut [f64; 1]) {
            dydt[0] = -y[0];
        }
    }

    /// y'' = -y, i.e. y(t) = cos(t), y'(t) = -sin(t) for y0 = [1, 0]
    struct HarmonicOscillator;

    impl OdeSystem<2> for HarmonicOscillator {
        fn rhs(&self, _t: f64, y: &[f64; 2], dydt: &mut [f64; 2]) {
            dydt[0] = y[1];
            dydt[1] = -y[0];
        }
    }

    /// Fires when the first state component crosses zero
    struct ZeroCrossing;

    impl EventFunction<2> for ZeroCrossing {
        fn eval(&self, _t: f64, y: &[f64; 2]) -> f64 {
            y[0]
        }
    }

    #[test]
    fn test_exponential_decay_accuracy() {
        let mut solver = Dopri5::new(Tolerances::new(1e-10, 1e-10));
        let (tf, yf) = solver
            .integrate(&ExponentialDecay, 0.0, &[1.0], 1.0, 1e-3)
            .unwrap();

        assert_relative_eq!(tf, 1.0, epsilon = 1e-12);
        assert_relative_eq!(yf[0], (-1.0f64).exp(), epsilon = 1e-8);
        assert!(solver.stats.accepted_steps > 0);
        assert!(solver.stats.fn_evals >= 7 * solver.stats.accepted_steps);
    }

    #[test]
    fn test_accuracy_improves_with_tolerance() {
        let exact = (-1.0f64).exp();

        let mut loose = Dopri5::new(Tolerances::new(1e-4, 1e-4));
        let (_, y_loose) = loose
            .integrate(&ExponentialDecay, 0.0, &[1.0], 1.0, 1e-3)
            .unwrap();

        let mut tight = Dopri5::new(Tolerances::new(1e-12, 1e-12));
        let (_, y_tight) = tight
            .integrate(&ExponentialDecay, 0.0, &[1.0], 1.0, 1e-3)
            .unwrap();

        let err_loose = (y_loose[0] - exact).abs();
        let err_tight = (y_tight[0] - exact).abs();
        assert!(err_tight < err_loose);
        assert!(tight.stats.accepted_steps > loose.stats.accepted_steps);
    }

    #[test]
    fn test_terminal_event_localization() {
        // cos(t) falls through zero at t = pi/2, where y' = -sin(pi/2) = -1
        let mut solver = Dopri5::new(Tolerances::new(1e-10, 1e-10));
        let config = EventConfig {
            direction: EventDirection::Falling,
            terminal: true,
            root_tol: 1e-12,
        };

        let outcome = solver
            .integrate_to_event(
                &HarmonicOscillator,
                &ZeroCrossing,
                &config,
                0.0,
                &[1.0, 0.0],
                10.0,
                1e-3,
            )
            .unwrap();

        match outcome {
            IntegrationOutcome::Event(ev) => {
                assert_relative_eq!(ev.t, std::f64::consts::FRAC_PI_2, epsilon = 1e-7);
                assert_relative_eq!(ev.y[1], -1.0, epsilon = 1e-6);
                assert!(ev.y[0].abs() < 1e-6);
            }
            IntegrationOutcome::Completed { .. } => panic!("expected an event before tf"),
        }
    }

    #[test]
    fn test_non_terminal_event_collection() {
        // cos(t) crosses zero at pi/2, 3pi/2, 5pi/2 within [0, 10]
        let mut solver = Dopri5::new(Tolerances::new(1e-10, 1e-10));
        let config = EventConfig {
            direction: EventDirection::Any,
            terminal: false,
            root_tol: 1e-12,
        };

        let outcome = solver
            .integrate_to_event(
                &HarmonicOscillator,
                &ZeroCrossing,
                &config,
                0.0,
                &[1.0, 0.0],
                10.0,
                1e-3,
            )
            .unwrap();

        assert!(matches!(outcome, IntegrationOutcome::Completed { .. }));
        assert_eq!(solver.collected_events.len(), 3);

        let expected = [1.0, 3.0, 5.0].map(|m| m * std::f64::consts::FRAC_PI_2);
        for (ev, exp) in solver.collected_events.iter().zip(expected.iter()) {
            assert_relative_eq!(ev.t, *exp, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_event_never_firing_completes() {
        // Decaying exponential stays positive; a zero crossing never happens
        struct Positive;
        impl EventFunction<1> for Positive {
            fn eval(&self, _t: f64, y: &[f64; 1]) -> f64 {
                y[0]
            }
        }

        let mut solver = Dopri5::new(Tolerances::new(1e-10, 1e-10));
        let config = EventConfig {
            direction: EventDirection::Falling,
            terminal: true,
            root_tol: 1e-12,
        };

        let outcome = solver
            .integrate_to_event(&ExponentialDecay, &Positive, &config, 0.0, &[1.0], 5.0, 1e-3)
            .unwrap();

        match outcome {
            IntegrationOutcome::Completed { t, y } => {
                assert_relative_eq!(t, 5.0, epsilon = 1e-10);
                assert_relative_eq!(y[0], (-5.0f64).exp(), epsilon = 1e-8);
            }
            IntegrationOutcome::Event(_) => panic!("event should never fire"),
        }
    }

    #[test]
    fn test_max_steps_guard() {
        let mut solver = Dopri5::new(Tolerances::new(1e-10, 1e-10));
        solver.max_steps = 10;
        solver.set_step_limits(1e-14, 1.0);

        let result = solver.integrate(&ExponentialDecay, 0.0, &[1.0], 100.0, 1e-3);
        assert!(matches!(
            result,
            Err(IntegrationError::MaxStepsExceeded { max_steps: 10 })
        ));
    }

    #[test]
    fn test_input_validation() {
        let mut solver = Dopri5::new(Tolerances::new(1e-10, 1e-10));

        // Zero initial step
        let result = solver.integrate(&ExponentialDecay, 0.0, &[1.0], 1.0, 0.0);
        assert!(matches!(result, Err(IntegrationError::InvalidInput(_))));

        // Step direction opposing the integration direction
        let result = solver.integrate(&ExponentialDecay, 0.0, &[1.0], 1.0, -1e-3);
        assert!(matches!(result, Err(IntegrationError::InvalidInput(_))));

        // Non-finite initial state
        let result = solver.integrate(&ExponentialDecay, 0.0, &[f64::NAN], 1.0, 1e-3);
        assert!(matches!(result, Err(IntegrationError::InvalidInput(_))));

        // Degenerate interval is a no-op
        let (t, y) = solver.integrate(&ExponentialDecay, 2.0, &[0.5], 2.0, 1e-3).unwrap();
        assert_relative_eq!(t, 2.0);
        assert_relative_eq!(y[0], 0.5);
    }

    #[test]
    fn test_step_controller_factor_bounds() {
        let controller = StepController::default();

        // Zero error grows at the cap
        assert_relative_eq!(controller.compute_factor(0.0), controller.max_factor);
        // Huge error shrinks at the floor
        assert_relative_eq!(controller.compute_factor(1e12), controller.min_factor);
        // Error at the acceptance boundary shrinks by the safety factor
        assert_relative_eq!(controller.compute_factor(1.0), controller.safety);
    }

    #[test]
    fn test_determinism() {
        let config = EventConfig {
            direction: EventDirection::Falling,
            terminal: true,
            root_tol: 1e-12,
        };

        let run = || {
            let mut solver = Dopri5::new(Tolerances::new(1e-10, 1e-10));
            match solver
                .integrate_to_event(
                    &HarmonicOscillator,
                    &ZeroCrossing,
                    &config,
                    0.0,
                    &[1.0, 0.0],
                    10.0,
                    1e-3,
                )
                .unwrap()
            {
                IntegrationOutcome::Event(ev) => (ev.t, ev.y),
                IntegrationOutcome::Completed { .. } => panic!("expected event"),
            }
        };

        let (t1, y1) = run();
        let (t2, y2) = run();
        assert_eq!(t1, t2);
        assert_eq!(y1, y2);
    }
}
