mod tests {
    use crate::ode::events::{sign_change_detected, EventConfig, EventDirection};

    #[test]
    fn test_falling_direction_filter() {
        // Positive to negative fires
        assert!(sign_change_detected(1.0, -1.0, EventDirection::Falling));
        // Landing exactly on zero fires
        assert!(sign_change_detected(1.0, 0.0, EventDirection::Falling));
        // Negative to positive does not
        assert!(!sign_change_detected(-1.0, 1.0, EventDirection::Falling));
        // No crossing at all
        assert!(!sign_change_detected(2.0, 1.0, EventDirection::Falling));
        // A transient negative excursion recovering upward must not fire
        assert!(!sign_change_detected(-1e-14, 0.5, EventDirection::Falling));
    }

    #[test]
    fn test_rising_direction_filter() {
        assert!(sign_change_detected(-1.0, 1.0, EventDirection::Rising));
        assert!(sign_change_detected(-1.0, 0.0, EventDirection::Rising));
        assert!(!sign_change_detected(1.0, -1.0, EventDirection::Rising));
    }

    #[test]
    fn test_any_direction_filter() {
        assert!(sign_change_detected(1.0, -1.0, EventDirection::Any));
        assert!(sign_change_detected(-1.0, 1.0, EventDirection::Any));
        assert!(!sign_change_detected(1.0, 2.0, EventDirection::Any));
        assert!(!sign_change_detected(-2.0, -1.0, EventDirection::Any));
    }

    #[test]
    fn test_event_config_default() {
        let config = EventConfig::default();
        assert_eq!(config.direction, EventDirection::Any);
        assert!(config.terminal);
        assert!(config.root_tol > 0.0);
    }
}
