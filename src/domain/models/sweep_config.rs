//! Sweep configuration.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{SweepError, SweepResult};

/// Immutable description of one parameter sweep.
///
/// Created once and handed to the scheduler, which keeps it behind an `Arc`
/// for the rest of its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SweepConfig {
    /// First parameter value (inclusive)
    #[serde(default = "default_range_start")]
    pub range_start: f64,

    /// Upper bound of the parameter domain (exclusive)
    #[serde(default = "default_range_end")]
    pub range_end: f64,

    /// Distance between consecutive parameter samples
    #[serde(default = "default_step_size")]
    pub step_size: f64,

    /// Starting value of the recurrence
    #[serde(default = "default_initial_population")]
    pub initial_population: f64,

    /// Convergence is declared once successive iterates differ by less than this
    #[serde(default = "default_stability_threshold")]
    pub stability_threshold: f64,

    /// Iteration budget per parameter
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Maximum number of concurrent convergence computations (K)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Capacity of the bounded point channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

const fn default_range_start() -> f64 {
    0.0
}

const fn default_range_end() -> f64 {
    4.0
}

const fn default_step_size() -> f64 {
    0.001
}

const fn default_initial_population() -> f64 {
    0.4
}

const fn default_stability_threshold() -> f64 {
    1e-7
}

const fn default_max_iterations() -> u32 {
    1_000_000
}

const fn default_max_concurrency() -> usize {
    16
}

/// Design capacity of the point channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

const fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            range_start: default_range_start(),
            range_end: default_range_end(),
            step_size: default_step_size(),
            initial_population: default_initial_population(),
            stability_threshold: default_stability_threshold(),
            max_iterations: default_max_iterations(),
            max_concurrency: default_max_concurrency(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl SweepConfig {
    /// Check the structural invariants of the configuration.
    ///
    /// Recurrence-specific checks on `initial_population` are done by the
    /// scheduler, which knows the recurrence.
    pub fn validate(&self) -> SweepResult<()> {
        let finite = [
            ("range_start", self.range_start),
            ("range_end", self.range_end),
            ("step_size", self.step_size),
            ("initial_population", self.initial_population),
            ("stability_threshold", self.stability_threshold),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SweepError::NonFinite(field));
            }
        }

        if self.range_start >= self.range_end {
            return Err(SweepError::InvalidRange {
                start: self.range_start,
                end: self.range_end,
            });
        }
        if self.step_size <= 0.0 {
            return Err(SweepError::InvalidStepSize(self.step_size));
        }
        // The largest magnitude in the range sits at one of its ends
        let magnitude = self.range_start.abs().max(self.range_end.abs());
        if self.step_size <= ulp(magnitude) {
            return Err(SweepError::StepBelowResolution {
                step: self.step_size,
                magnitude,
            });
        }
        if self.stability_threshold <= 0.0 {
            return Err(SweepError::InvalidStabilityThreshold(
                self.stability_threshold,
            ));
        }
        if self.max_iterations == 0 {
            return Err(SweepError::InvalidMaxIterations(self.max_iterations));
        }
        if self.max_concurrency == 0 {
            return Err(SweepError::InvalidMaxConcurrency(self.max_concurrency));
        }
        if self.channel_capacity == 0 {
            return Err(SweepError::InvalidChannelCapacity(self.channel_capacity));
        }

        Ok(())
    }

    /// Width of the parameter domain.
    pub fn span(&self) -> f64 {
        self.range_end - self.range_start
    }

    /// Iterate the parameter samples in `[range_start, range_end)`.
    pub fn parameters(&self) -> ParameterSweep {
        ParameterSweep {
            start: self.range_start,
            step: self.step_size,
            index: 0,
            count: self.sample_count(),
        }
    }

    /// Number of samples `parameters()` yields.
    ///
    /// Computed from the span rather than by walking the samples, then
    /// nudged so that exactly the samples below `range_end` are counted.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample_count(&self) -> usize {
        let (start, end, step) = (self.range_start, self.range_end, self.step_size);
        if step.is_nan() || step <= 0.0 || start.is_nan() || end.is_nan() || start >= end {
            return 0;
        }

        let estimate = ((end - start) / step).ceil();
        // Float-to-int `as` saturates, so an infinite estimate caps at usize::MAX
        let mut count = if estimate.is_nan() { 0 } else { estimate as usize };
        while count > 0 && sample_at(start, step, count - 1) >= end {
            count -= 1;
        }
        while count < usize::MAX && sample_at(start, step, count) < end {
            count += 1;
        }
        count
    }
}

fn sample_at(start: f64, step: f64, index: usize) -> f64 {
    (index as f64).mul_add(step, start)
}

/// Distance from `x` (finite, non-negative) to the next larger `f64`.
fn ulp(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1) - x
}

/// Iterator over the sampled parameter values.
///
/// Each sample is `start + index * step`, so rounding error does not build up
/// across a long sweep the way repeated addition would.
#[derive(Debug, Clone)]
pub struct ParameterSweep {
    start: f64,
    step: f64,
    index: usize,
    count: usize,
}

impl Iterator for ParameterSweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let value = sample_at(self.start, self.step, self.index);
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ParameterSweep {}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: f64, end: f64, step: f64) -> SweepConfig {
        SweepConfig {
            range_start: start,
            range_end: end,
            step_size: step,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SweepConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.channel_capacity, 1024);
        assert_eq!(config.max_concurrency, 16);
    }

    #[test]
    fn test_parameters_half_step() {
        let params: Vec<f64> = config(0.0, 1.0, 0.5).parameters().collect();
        assert_eq!(params, vec![0.0, 0.5]);
    }

    #[test]
    fn test_parameters_end_is_exclusive() {
        let params: Vec<f64> = config(1.0, 2.0, 0.25).parameters().collect();
        assert_eq!(params, vec![1.0, 1.25, 1.5, 1.75]);
    }

    #[test]
    fn test_sample_count_dense_sweep() {
        // 0.1 is not exactly representable; index stepping keeps the count stable
        let count = config(0.0, 4.0, 0.001).sample_count();
        assert!((3999..=4001).contains(&count), "count = {count}");
        assert_eq!(config(0.0, 1.0, 0.1).sample_count(), 10);
    }

    #[test]
    fn test_sample_count_matches_walk() {
        for (start, end, step) in [
            (0.0, 4.0, 0.001),
            (2.8, 4.0, 0.01),
            (0.0, 2.35, 0.1),
            (-1.5, 1.5, 0.3),
            (1.0, 1.000_001, 1e-7),
        ] {
            let mut walked = 0usize;
            while sample_at(start, step, walked) < end {
                walked += 1;
            }
            let c = config(start, end, step);
            assert_eq!(c.sample_count(), walked, "{start}..{end} by {step}");
            assert_eq!(c.parameters().len(), walked);
        }
    }

    #[test]
    fn test_sample_count_tiny_step_is_immediate() {
        let c = config(0.0, 1.0, 1e-12);
        assert!(c.validate().is_ok());
        let count = c.sample_count();
        assert!(count.abs_diff(1_000_000_000_000) <= 1, "count = {count}");

        let mut params = c.parameters();
        assert_eq!(params.next(), Some(0.0));
        assert_eq!(params.len(), count - 1);
    }

    #[test]
    fn test_validate_step_below_resolution() {
        assert!(matches!(
            config(1e20, 1e20 + 1e6, 1.0).validate(),
            Err(SweepError::StepBelowResolution { step, .. }) if step == 1.0
        ));
        assert!(matches!(
            config(-3.0, 1e17, 8.0).validate(),
            Err(SweepError::StepBelowResolution { .. })
        ));
        // Just above the spacing of doubles near 1e20 is accepted
        assert!(config(1e20, 1e20 + 1e6, 32_768.0).validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_range() {
        let result = config(2.0, 1.0, 0.1).validate();
        assert!(matches!(
            result,
            Err(SweepError::InvalidRange { start, end }) if start == 2.0 && end == 1.0
        ));
    }

    #[test]
    fn test_validate_empty_range() {
        assert!(matches!(
            config(1.0, 1.0, 0.1).validate(),
            Err(SweepError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_validate_step_size() {
        assert_eq!(
            config(0.0, 1.0, 0.0).validate(),
            Err(SweepError::InvalidStepSize(0.0))
        );
        assert_eq!(
            config(0.0, 1.0, -0.5).validate(),
            Err(SweepError::InvalidStepSize(-0.5))
        );
    }

    #[test]
    fn test_validate_non_finite() {
        let result = config(0.0, f64::INFINITY, 0.1).validate();
        assert_eq!(result, Err(SweepError::NonFinite("range_end")));

        let mut c = SweepConfig::default();
        c.stability_threshold = f64::NAN;
        assert_eq!(
            c.validate(),
            Err(SweepError::NonFinite("stability_threshold"))
        );
    }

    #[test]
    fn test_validate_counts() {
        let mut c = SweepConfig::default();
        c.max_concurrency = 0;
        assert_eq!(c.validate(), Err(SweepError::InvalidMaxConcurrency(0)));

        let mut c = SweepConfig::default();
        c.max_iterations = 0;
        assert_eq!(c.validate(), Err(SweepError::InvalidMaxIterations(0)));

        let mut c = SweepConfig::default();
        c.channel_capacity = 0;
        assert_eq!(c.validate(), Err(SweepError::InvalidChannelCapacity(0)));

        let mut c = SweepConfig::default();
        c.stability_threshold = 0.0;
        assert_eq!(c.validate(), Err(SweepError::InvalidStabilityThreshold(0.0)));
    }

    #[test]
    fn test_yaml_parsing_with_defaults() {
        let yaml = r"
range_start: 2.5
range_end: 4.0
max_concurrency: 4
";
        let config: SweepConfig = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert!((config.range_start - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.max_concurrency, 4);
        assert!((config.step_size - 0.001).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 1_000_000);
    }
}
