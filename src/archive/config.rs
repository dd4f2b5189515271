//! Archive configuration.
//!
//! [`ArchiveConfig`] holds the parameters fixed at archive construction.

use crate::error::{ArchiveError, Result};

/// Configuration for a bounded archive.
///
/// # Defaults
///
/// ```
/// use u_moea::ArchiveConfig;
///
/// let config = ArchiveConfig::default();
/// assert_eq!(config.capacity, 100);
/// assert_eq!(config.num_objectives, 2);
/// assert_eq!(config.tolerance, 0.0);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::ArchiveConfig;
///
/// let config = ArchiveConfig::new(50, 3)
///     .with_tolerance(1e-9)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveConfig {
    /// Maximum number of members.
    pub capacity: usize,

    /// Number of objectives every candidate must carry.
    pub num_objectives: usize,

    /// Per-objective tolerance for duplicate detection (0.0 = exact).
    pub tolerance: f64,

    /// Random seed for selection.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            num_objectives: 2,
            tolerance: 0.0,
            seed: None,
        }
    }
}

impl ArchiveConfig {
    /// Creates a configuration with the given capacity and objective count.
    pub fn new(capacity: usize, num_objectives: usize) -> Self {
        Self {
            capacity,
            num_objectives,
            ..Self::default()
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of objectives.
    pub fn with_num_objectives(mut self, m: usize) -> Self {
        self.num_objectives = m;
        self
    }

    /// Sets the duplicate tolerance. Negative values are clamped to zero.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ArchiveError::invalid_config("capacity must be at least 1"));
        }
        if self.num_objectives == 0 {
            return Err(ArchiveError::invalid_config(
                "num_objectives must be at least 1",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ArchiveError::invalid_config(
                "tolerance must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
