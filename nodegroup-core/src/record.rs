//! Typed rows loaded from the inventory, notes, and CPU-link tables.

/// Sentinel written wherever a value is missing after enrichment.
pub const NONE_SENTINEL: &str = "None";

/// Status value a node must carry to be published.
pub const ACTIVE_STATUS: &str = "Active";

/// One physical host from the node inventory.
///
/// Only `host` is guaranteed; every other attribute mirrors a nullable CSV
/// cell and is `None` when the cell held a missing-value marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRecord {
    /// Host identifier, used as the join key for notes.
    pub host: String,
    /// Lifecycle status recorded in the inventory (`netbox_status`).
    pub status: Option<String>,
    /// Processor model identifier, the lookup key for CPU links.
    pub processor_type: Option<String>,
    /// Physical core count.
    pub cores: Option<u32>,
    /// Installed memory, kept as the raw inventory text.
    pub memory: Option<String>,
    /// Local scratch storage size.
    pub scratch: Option<String>,
    /// Network link speed.
    pub eth_speed: Option<String>,
    /// GPU model name.
    pub gpu_type: Option<String>,
    /// Number of GPUs.
    pub gpus: Option<u32>,
    /// Billing category code (`S`, `B`, ...).
    pub flag: Option<String>,
    /// CPU architecture string.
    pub cpu_arch: Option<String>,
    /// CUDA compute capability.
    pub gpu_cc: Option<String>,
    /// Per-GPU memory in gigabytes.
    pub gpu_mem: Option<String>,
}

impl NodeRecord {
    /// Creates a record for `host` with every other attribute missing.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_core::NodeRecord;
    ///
    /// let node = NodeRecord::new("scc-a01");
    /// assert_eq!(node.host, "scc-a01");
    /// assert!(node.status.is_none());
    /// ```
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Returns whether the record's status is exactly [`ACTIVE_STATUS`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(ACTIVE_STATUS)
    }
}

/// Free-text note attached to a host by the auxiliary notes table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    /// Host the note belongs to.
    pub host: String,
    /// Note text; `None` when the cell was empty.
    pub notes: Option<String>,
}

/// Maps a processor model to the name and reference page shown on the
/// display page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuLink {
    /// Processor identifier as it appears in the inventory.
    pub model: String,
    /// Human-readable processor name.
    pub display_name: String,
    /// Reference URL for the processor.
    pub url: String,
}
