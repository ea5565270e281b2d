//! Inventory source abstraction consumed by the pipeline.

use crate::record::{CpuLink, NodeRecord, NoteEntry};

/// Abstraction over the three tables the pipeline reads.
///
/// Providers load the tables from wherever they live and hand them to
/// [`crate::InventoryPipeline::run`] through this trait.
///
/// # Examples
/// ```
/// use nodegroup_core::{CpuLink, InventorySource, NodeRecord, NoteEntry};
///
/// struct Fixed(Vec<NodeRecord>);
///
/// impl InventorySource for Fixed {
///     fn name(&self) -> &str { "fixed" }
///     fn nodes(&self) -> &[NodeRecord] { &self.0 }
///     fn notes(&self) -> &[NoteEntry] { &[] }
///     fn cpu_links(&self) -> &[CpuLink] { &[] }
/// }
///
/// let source = Fixed(vec![NodeRecord::new("a01")]);
/// assert_eq!(source.nodes().len(), 1);
/// assert!(!source.is_empty());
/// ```
pub trait InventorySource {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the node inventory rows in file order.
    fn nodes(&self) -> &[NodeRecord];

    /// Returns the auxiliary notes rows in file order.
    fn notes(&self) -> &[NoteEntry];

    /// Returns the CPU link rows in file order.
    fn cpu_links(&self) -> &[CpuLink];

    /// Returns whether the inventory holds no nodes.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }
}
