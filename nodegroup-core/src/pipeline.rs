//! Orchestration of the enrich, filter, group, and format stages.

use std::num::NonZeroUsize;

use tracing::{info, instrument, warn};

use crate::{
    Result,
    display::{CpuDisplayMap, DisplayRow},
    enrich::{left_join_notes, retain_active},
    error::PipelineError,
    group::group_nodes,
    source::InventorySource,
};

/// Entry point for turning an inventory into display rows.
///
/// # Examples
/// ```
/// use nodegroup_core::{CpuLink, InventorySource, NodeRecord, NoteEntry, PipelineBuilder};
///
/// struct Inline(Vec<NodeRecord>);
///
/// impl InventorySource for Inline {
///     fn name(&self) -> &str { "inline" }
///     fn nodes(&self) -> &[NodeRecord] { &self.0 }
///     fn notes(&self) -> &[NoteEntry] { &[] }
///     fn cpu_links(&self) -> &[CpuLink] { &[] }
/// }
///
/// let node = NodeRecord {
///     status: Some("Active".into()),
///     processor_type: Some("CPU1".into()),
///     cores: Some(4),
///     memory: Some("16".into()),
///     scratch: Some("100".into()),
///     eth_speed: Some("10".into()),
///     gpus: Some(0),
///     flag: Some("S".into()),
///     cpu_arch: Some("x86_64".into()),
///     ..NodeRecord::new("a01")
/// };
/// let pipeline = PipelineBuilder::new().with_min_groups(1).build()?;
/// let rows = pipeline.run(&Inline(vec![node]))?;
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].flag(), "Shared");
/// # Ok::<(), nodegroup_core::PipelineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct InventoryPipeline {
    min_groups: NonZeroUsize,
}

impl InventoryPipeline {
    pub(crate) fn new(min_groups: NonZeroUsize) -> Self {
        Self { min_groups }
    }

    /// Returns the sanity-check threshold.
    #[must_use]
    pub fn min_groups(&self) -> NonZeroUsize {
        self.min_groups
    }

    /// Runs every stage against `source` and returns one row per group in
    /// ascending group-key order.
    ///
    /// # Errors
    /// Returns [`PipelineError::SanityCheckFailed`] when fewer than
    /// [`Self::min_groups`] groups result.
    #[instrument(
        name = "core.run",
        err,
        skip(self, source),
        fields(
            source = %source.name(),
            nodes = source.nodes().len(),
            min_groups = %self.min_groups,
        ),
    )]
    pub fn run<S: InventorySource>(&self, source: &S) -> Result<Vec<DisplayRow>> {
        if source.is_empty() {
            warn!(source = source.name(), "inventory contains no nodes");
        }

        let enriched = left_join_notes(source.nodes(), source.notes());
        let active = retain_active(enriched);
        let active_count = active.len();
        let groups = group_nodes(active);

        if groups.len() < self.min_groups.get() {
            return Err(PipelineError::SanityCheckFailed {
                source_name: source.name().to_owned(),
                groups: groups.len(),
                min_groups: self.min_groups,
            });
        }

        let cpus = CpuDisplayMap::from_links(source.cpu_links());
        let rows: Vec<DisplayRow> = groups
            .iter()
            .map(|group| DisplayRow::from_group(group, &cpus))
            .collect();
        info!(
            active = active_count,
            groups = rows.len(),
            cpu_links = cpus.len(),
            "grouped inventory"
        );
        Ok(rows)
    }
}
