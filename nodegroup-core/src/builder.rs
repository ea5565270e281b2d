//! Builder utilities for configuring [`InventoryPipeline`] runs.

use std::num::NonZeroUsize;

use crate::{Result, error::PipelineError, pipeline::InventoryPipeline};

/// Default sanity-check threshold: a healthy inventory yields well over this
/// many distinct configurations.
pub const DEFAULT_MIN_GROUPS: usize = 100;

/// Configures and constructs [`InventoryPipeline`] instances.
///
/// # Examples
/// ```
/// use nodegroup_core::PipelineBuilder;
///
/// let pipeline = PipelineBuilder::new()
///     .with_min_groups(8)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(pipeline.min_groups().get(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    min_groups: usize,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            min_groups: DEFAULT_MIN_GROUPS,
        }
    }
}

impl PipelineBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_core::PipelineBuilder;
    ///
    /// assert_eq!(PipelineBuilder::new().min_groups(), 100);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the minimum number of groups a run must produce.
    #[must_use]
    pub fn with_min_groups(mut self, min_groups: usize) -> Self {
        self.min_groups = min_groups;
        self
    }

    /// Returns the configured minimum number of groups.
    #[must_use]
    pub fn min_groups(&self) -> usize {
        self.min_groups
    }

    /// Validates the configuration and constructs an [`InventoryPipeline`].
    ///
    /// # Errors
    /// Returns [`PipelineError::InvalidMinGroups`] when the threshold is zero.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_core::{PipelineBuilder, PipelineError};
    ///
    /// let err = PipelineBuilder::new().with_min_groups(0).build().unwrap_err();
    /// assert_eq!(err, PipelineError::InvalidMinGroups { got: 0 });
    /// ```
    pub fn build(self) -> Result<InventoryPipeline> {
        let min_groups = NonZeroUsize::new(self.min_groups).ok_or(
            PipelineError::InvalidMinGroups {
                got: self.min_groups,
            },
        )?;
        Ok(InventoryPipeline::new(min_groups))
    }
}
