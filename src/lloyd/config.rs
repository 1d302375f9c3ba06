//! Relocation engine configuration.

use std::error::Error;
use std::fmt;

/// Invalid configuration or input, reported before any iteration runs.
///
/// Carries a human-readable message describing the rejected parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The rejection message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error for ConfigError {}

/// Configuration for the relocation engine.
///
/// Defaults match a small siting study: 3 facilities, 20 iterations,
/// convergence at 0.1 coordinate units.
///
/// # Examples
///
/// ```
/// use u_locate::lloyd::LloydConfig;
///
/// let config = LloydConfig::default()
///     .with_num_facilities(5)
///     .with_max_iterations(50)
///     .with_convergence_threshold(0.01)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LloydConfig {
    /// Number of facilities to site. Must not exceed the number of
    /// demand points handed to the runner.
    pub num_facilities: usize,

    /// Hard upper bound on iterations. Reaching it without convergence
    /// is a normal outcome, not an error.
    pub max_iterations: usize,

    /// Convergence threshold in coordinate units: the run stops once no
    /// facility moves this far or farther in a single update step.
    pub convergence_threshold: f64,

    /// Seed for the initial facility draw.
    ///
    /// `None` uses a fixed default seed, so two runs over identical
    /// input always produce identical traces either way.
    pub seed: Option<u64>,

    /// Evaluate the assignment step in parallel.
    ///
    /// Requires the `parallel` feature; without it the flag is ignored
    /// and assignment stays sequential. The result is identical in both
    /// modes.
    pub parallel: bool,
}

impl Default for LloydConfig {
    fn default() -> Self {
        Self {
            num_facilities: 3,
            max_iterations: 20,
            convergence_threshold: 0.1,
            seed: None,
            parallel: false,
        }
    }
}

impl LloydConfig {
    /// Sets the number of facilities to site.
    pub fn with_num_facilities(mut self, n: usize) -> Self {
        self.num_facilities = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the convergence threshold in coordinate units.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Sets the seed for the initial facility draw.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel assignment.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_facilities == 0 {
            return Err(ConfigError::new("num_facilities must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::new("max_iterations must be at least 1"));
        }
        if self.convergence_threshold < 0.0 {
            return Err(ConfigError::new(format!(
                "convergence_threshold must be non-negative, got {}",
                self.convergence_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LloydConfig::default();
        assert_eq!(config.num_facilities, 3);
        assert_eq!(config.max_iterations, 20);
        assert!((config.convergence_threshold - 0.1).abs() < 1e-12);
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
    }

    #[test]
    fn test_validate_ok() {
        assert!(LloydConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_threshold_ok() {
        let config = LloydConfig::default().with_convergence_threshold(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_facilities() {
        let config = LloydConfig::default().with_num_facilities(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = LloydConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_threshold() {
        let config = LloydConfig::default().with_convergence_threshold(-0.5);
        let err = config.validate().unwrap_err();
        assert!(err.message().contains("convergence_threshold"));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::new("num_facilities must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: num_facilities must be at least 1"
        );
    }
}
