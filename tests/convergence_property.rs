//! Property tests for the convergence engine and parameter sampling.

use bifurcate::{compute_point, Logistic, Outcome, SweepConfig};
use proptest::prelude::*;

fn engine_config(initial_population: f64, max_iterations: u32) -> SweepConfig {
    SweepConfig {
        initial_population,
        max_iterations,
        stability_threshold: 1e-7,
        ..SweepConfig::default()
    }
}

proptest! {
    /// Property: identical inputs give bit-identical points
    #[test]
    fn prop_compute_point_is_deterministic(
        parameter in 0.0f64..4.0,
        n0 in 0.0f64..=1.0,
        max_iterations in 1u32..2_000,
    ) {
        let config = engine_config(n0, max_iterations);
        let first = compute_point(&Logistic, parameter, &config);
        let second = compute_point(&Logistic, parameter, &config);

        prop_assert_eq!(first.value.to_bits(), second.value.to_bits());
        prop_assert_eq!(first.iterations, second.iterations);
        prop_assert_eq!(first.outcome, second.outcome);
    }

    /// Property: the iteration count stays within `[1, max_iterations]`
    #[test]
    fn prop_iterations_within_budget(
        parameter in 0.0f64..4.0,
        n0 in 0.0f64..=1.0,
        max_iterations in 1u32..2_000,
    ) {
        let point = compute_point(&Logistic, parameter, &engine_config(n0, max_iterations));

        prop_assert!(point.iterations >= 1);
        prop_assert!(point.iterations <= max_iterations);
        if point.outcome == Outcome::Exhausted {
            prop_assert_eq!(point.iterations, max_iterations);
        }
    }

    /// Property: the logistic map keeps values inside the unit interval
    #[test]
    fn prop_logistic_stays_in_unit_interval(
        parameter in 0.0f64..=4.0,
        n0 in 0.0f64..=1.0,
    ) {
        let point = compute_point(&Logistic, parameter, &engine_config(n0, 500));

        prop_assert!(point.value.is_finite());
        prop_assert!((0.0..=1.0).contains(&point.value), "value {}", point.value);
        prop_assert!((point.parameter - parameter).abs() < f64::EPSILON);
    }

    /// Property: sampling covers `[start, end)` in strictly increasing steps
    #[test]
    fn prop_parameters_cover_half_open_range(
        start in -2.0f64..2.0,
        span in 0.01f64..3.0,
        step in 0.001f64..0.5,
    ) {
        let config = SweepConfig {
            range_start: start,
            range_end: start + span,
            step_size: step,
            ..SweepConfig::default()
        };
        let samples: Vec<f64> = config.parameters().collect();

        let mut walked = 0usize;
        while (walked as f64).mul_add(step, start) < config.range_end {
            walked += 1;
        }

        prop_assert!(config.validate().is_ok());
        prop_assert!(!samples.is_empty());
        prop_assert_eq!(samples.len(), walked);
        prop_assert_eq!(config.sample_count(), walked);
        prop_assert!((samples[0] - start).abs() < f64::EPSILON);
        prop_assert!(samples.iter().all(|&p| p >= start && p < config.range_end));
        for pair in samples.windows(2) {
            prop_assert!(pair[1] > pair[0]);
            prop_assert!((pair[1] - pair[0] - step).abs() < 1e-9);
        }
    }
}
