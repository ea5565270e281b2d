use nodegroup_core::{CpuLink, InventorySource, NodeRecord, NoteEntry};

#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    pub nodes: Vec<NodeRecord>,
    pub notes: Vec<NoteEntry>,
    pub cpu_links: Vec<CpuLink>,
}

impl InMemoryInventory {
    #[must_use]
    pub fn new(nodes: Vec<NodeRecord>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }
}

impl InventorySource for InMemoryInventory {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    fn notes(&self) -> &[NoteEntry] {
        &self.notes
    }

    fn cpu_links(&self) -> &[CpuLink] {
        &self.cpu_links
    }
}

/// Active CPU-only shared node with the attributes from the reference example.
#[must_use]
pub fn active_node(host: &str) -> NodeRecord {
    NodeRecord {
        status: Some("Active".into()),
        processor_type: Some("CPU1".into()),
        cores: Some(4),
        memory: Some("16".into()),
        scratch: Some("100".into()),
        eth_speed: Some("10".into()),
        gpu_type: Some("None".into()),
        gpus: Some(0),
        flag: Some("S".into()),
        cpu_arch: Some("x86_64".into()),
        ..NodeRecord::new(host)
    }
}

/// `count` active nodes with distinct core counts, one group each.
#[must_use]
pub fn distinct_nodes(count: u32) -> Vec<NodeRecord> {
    (1..=count)
        .map(|index| NodeRecord {
            cores: Some(index),
            ..active_node(&format!("n{index:03}"))
        })
        .collect()
}
