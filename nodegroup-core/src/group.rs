//! Grouping of active nodes by hardware configuration.
//!
//! A [`GroupKey`] is the full hardware and billing tuple. Nodes sharing a key
//! collapse into one [`GroupRecord`]; groups come out in ascending key order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::enrich::EnrichedNode;
use crate::record::{NONE_SENTINEL, NodeRecord};

/// Fixed tuple of attributes that identifies a hardware configuration.
///
/// Field order is the comparison order. `cores` and `gpus` compare as
/// integers; `memory`, `scratch` and `eth_speed` compare by numeric value
/// when they parse as numbers; everything else compares lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Processor model identifier.
    pub processor_type: String,
    /// Physical core count.
    pub cores: u32,
    /// Installed memory.
    pub memory: String,
    /// Scratch storage size.
    pub scratch: String,
    /// Network link speed.
    pub eth_speed: String,
    /// GPU model, `"None"` for CPU-only nodes.
    pub gpu_type: String,
    /// Number of GPUs.
    pub gpus: u32,
    /// Raw billing flag code.
    pub flag: String,
    /// CPU architecture.
    pub cpu_arch: String,
    /// Formatted compute-capability label or `"None"`.
    pub gpu_cc: String,
    /// Formatted GPU memory label or `"None"`.
    pub gpu_mem: String,
}

impl GroupKey {
    /// Builds the key for `node`, formatting the GPU attributes.
    ///
    /// Missing GPU type, compute capability, and memory become `"None"`.
    /// Returns `None` when any other key attribute is missing.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_core::{GroupKey, NodeRecord};
    ///
    /// let node = NodeRecord {
    ///     processor_type: Some("CPU1".into()),
    ///     cores: Some(4),
    ///     memory: Some("16".into()),
    ///     scratch: Some("100".into()),
    ///     eth_speed: Some("10".into()),
    ///     gpus: Some(1),
    ///     flag: Some("S".into()),
    ///     cpu_arch: Some("x86_64".into()),
    ///     gpu_type: Some("A100".into()),
    ///     gpu_cc: Some("8.0".into()),
    ///     gpu_mem: Some("80".into()),
    ///     ..NodeRecord::new("a01")
    /// };
    /// let key = GroupKey::from_node(&node).expect("all attributes present");
    /// assert_eq!(key.gpu_cc, "Cuda GPU Compute Capability: 8.0");
    /// assert_eq!(key.gpu_mem, "GPU Memory: 80GB");
    /// ```
    #[must_use]
    pub fn from_node(node: &NodeRecord) -> Option<Self> {
        Some(Self {
            processor_type: node.processor_type.clone()?,
            cores: node.cores?,
            memory: node.memory.clone()?,
            scratch: node.scratch.clone()?,
            eth_speed: node.eth_speed.clone()?,
            gpu_type: node
                .gpu_type
                .clone()
                .unwrap_or_else(|| NONE_SENTINEL.to_owned()),
            gpus: node.gpus?,
            flag: node.flag.clone()?,
            cpu_arch: node.cpu_arch.clone()?,
            gpu_cc: format_compute_capability(node.gpu_cc.as_deref()),
            gpu_mem: format_gpu_memory(node.gpu_mem.as_deref()),
        })
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.processor_type
            .cmp(&other.processor_type)
            .then(self.cores.cmp(&other.cores))
            .then_with(|| compare_quantity(&self.memory, &other.memory))
            .then_with(|| compare_quantity(&self.scratch, &other.scratch))
            .then_with(|| compare_quantity(&self.eth_speed, &other.eth_speed))
            .then_with(|| self.gpu_type.cmp(&other.gpu_type))
            .then(self.gpus.cmp(&other.gpus))
            .then_with(|| self.flag.cmp(&other.flag))
            .then_with(|| self.cpu_arch.cmp(&other.cpu_arch))
            .then_with(|| self.gpu_cc.cmp(&other.gpu_cc))
            .then_with(|| self.gpu_mem.cmp(&other.gpu_mem))
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders numeric text by value, numbers before anything else. Equal values
/// with different spellings fall back to text order so the ordering stays
/// consistent with equality.
fn compare_quantity(left: &str, right: &str) -> Ordering {
    let parse = |text: &str| text.trim().parse::<f64>().ok().filter(|value| value.is_finite());
    match (parse(left), parse(right)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| left.cmp(right))
}

/// Formats a compute capability for display, keeping `"None"` as is.
#[must_use]
pub fn format_compute_capability(value: Option<&str>) -> String {
    match value {
        Some(cc) if cc != NONE_SENTINEL => format!("Cuda GPU Compute Capability: {cc}"),
        _ => NONE_SENTINEL.to_owned(),
    }
}

/// Formats a GPU memory size for display, keeping `"None"` as is.
#[must_use]
pub fn format_gpu_memory(value: Option<&str>) -> String {
    match value {
        Some(mem) if mem != NONE_SENTINEL => format!("GPU Memory: {mem}GB"),
        _ => NONE_SENTINEL.to_owned(),
    }
}

/// Hosts sharing one [`GroupKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    key: GroupKey,
    hostnames: Vec<String>,
    notes: Vec<String>,
}

impl GroupRecord {
    /// Returns the configuration shared by the group.
    #[must_use]
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Returns the number of hosts in the group.
    #[must_use]
    pub fn quantity(&self) -> usize {
        self.hostnames.len()
    }

    /// Returns the hostnames, sorted ascending.
    #[must_use]
    pub fn hostnames(&self) -> &[String] {
        &self.hostnames
    }

    /// Returns every note attached to the group's hosts, sorted ascending.
    /// Hosts without notes contribute `"None"`.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

#[derive(Default)]
struct Accumulator {
    hostnames: Vec<String>,
    notes: Vec<String>,
}

/// Groups `nodes` by [`GroupKey`].
///
/// Nodes missing a key attribute are skipped. A host with several groupable
/// rows keeps the first of them only.
///
/// # Examples
/// ```
/// use nodegroup_core::{NodeRecord, group_nodes, left_join_notes};
///
/// let base = NodeRecord {
///     processor_type: Some("CPU1".into()),
///     cores: Some(4),
///     memory: Some("16".into()),
///     scratch: Some("100".into()),
///     eth_speed: Some("10".into()),
///     gpus: Some(0),
///     flag: Some("S".into()),
///     cpu_arch: Some("x86_64".into()),
///     ..NodeRecord::new("a02")
/// };
/// let other = NodeRecord { host: "a01".into(), ..base.clone() };
/// let nodes = vec![base, other];
/// let groups = group_nodes(left_join_notes(&nodes, &[]));
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].hostnames(), ["a01", "a02"]);
/// ```
#[must_use]
pub fn group_nodes(nodes: Vec<EnrichedNode<'_>>) -> Vec<GroupRecord> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(nodes.len());
    let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
    let mut incomplete = 0_usize;

    for EnrichedNode { node, notes } in nodes {
        let Some(key) = GroupKey::from_node(node) else {
            debug!(host = %node.host, "node is missing a grouping attribute, skipping");
            incomplete += 1;
            continue;
        };
        if !seen.insert(node.host.as_str()) {
            warn!(host = %node.host, "host listed more than once, keeping first row");
            continue;
        }
        let entry = groups.entry(key).or_default();
        entry.hostnames.push(node.host.clone());
        entry.notes.extend(notes);
    }

    if incomplete > 0 {
        debug!(skipped = incomplete, "nodes without a complete grouping key");
    }

    groups
        .into_iter()
        .map(|(key, mut acc)| {
            acc.hostnames.sort();
            acc.notes.sort();
            GroupRecord {
                key,
                hostnames: acc.hostnames,
                notes: acc.notes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::{fixture, rstest};

    use crate::enrich::left_join_notes;
    use crate::record::NoteEntry;

    #[fixture]
    fn complete() -> NodeRecord {
        NodeRecord {
            status: Some("Active".into()),
            processor_type: Some("CPU1".into()),
            cores: Some(4),
            memory: Some("16".into()),
            scratch: Some("100".into()),
            eth_speed: Some("10".into()),
            gpus: Some(0),
            flag: Some("S".into()),
            cpu_arch: Some("x86_64".into()),
            ..NodeRecord::new("a01")
        }
    }

    #[rstest]
    #[case::missing(None, "None")]
    #[case::sentinel(Some("None"), "None")]
    #[case::present(Some("7.5"), "Cuda GPU Compute Capability: 7.5")]
    fn compute_capability_labels(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_compute_capability(raw), expected);
    }

    #[rstest]
    #[case::missing(None, "None")]
    #[case::present(Some("24.0"), "GPU Memory: 24.0GB")]
    fn gpu_memory_labels(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_gpu_memory(raw), expected);
    }

    #[rstest]
    fn from_node_defaults_gpu_fields(complete: NodeRecord) {
        let key = GroupKey::from_node(&complete).expect("complete node must have a key");
        assert_eq!(key.gpu_type, "None");
        assert_eq!(key.gpu_cc, "None");
        assert_eq!(key.gpu_mem, "None");
    }

    #[rstest]
    fn from_node_requires_core_attributes(complete: NodeRecord) {
        let without_flag = NodeRecord {
            flag: None,
            ..complete.clone()
        };
        let without_cores = NodeRecord {
            cores: None,
            ..complete
        };
        assert!(GroupKey::from_node(&without_flag).is_none());
        assert!(GroupKey::from_node(&without_cores).is_none());
    }

    #[rstest]
    fn flags_split_otherwise_identical_nodes(complete: NodeRecord) {
        let buy_in = NodeRecord {
            host: "a02".into(),
            flag: Some("B".into()),
            ..complete.clone()
        };
        let nodes = vec![complete, buy_in];
        let groups = group_nodes(left_join_notes(&nodes, &[]));
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|group| group.quantity() == 1));
        assert_eq!(groups[0].key().flag, "B");
        assert_eq!(groups[1].key().flag, "S");
    }

    #[rstest]
    fn groups_sort_hosts_and_notes(complete: NodeRecord) {
        let nodes = vec![
            NodeRecord {
                host: "c03".into(),
                ..complete.clone()
            },
            complete.clone(),
            NodeRecord {
                host: "b02".into(),
                ..complete
            },
        ];
        let notes = vec![
            NoteEntry {
                host: "c03".into(),
                notes: Some("Zeta".into()),
            },
            NoteEntry {
                host: "a01".into(),
                notes: Some("Alpha".into()),
            },
        ];
        let groups = group_nodes(left_join_notes(&nodes, &notes));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].hostnames(), ["a01", "b02", "c03"]);
        assert_eq!(groups[0].notes(), ["Alpha", "None", "Zeta"]);
        assert_eq!(groups[0].quantity(), 3);
    }

    #[rstest]
    fn duplicate_hosts_are_counted_once(complete: NodeRecord) {
        let nodes = vec![complete.clone(), complete];
        let groups = group_nodes(left_join_notes(&nodes, &[]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].hostnames(), ["a01"]);
    }

    #[rstest]
    fn cores_order_numerically(complete: NodeRecord) {
        let nodes = vec![
            NodeRecord {
                host: "big".into(),
                cores: Some(128),
                ..complete.clone()
            },
            NodeRecord {
                host: "small".into(),
                cores: Some(16),
                ..complete
            },
        ];
        let groups = group_nodes(left_join_notes(&nodes, &[]));
        let cores: Vec<u32> = groups.iter().map(|group| group.key().cores).collect();
        assert_eq!(cores, [16, 128]);
    }

    #[rstest]
    fn incomplete_first_row_does_not_hide_later_complete_row(complete: NodeRecord) {
        let incomplete = NodeRecord {
            memory: None,
            ..complete.clone()
        };
        let nodes = vec![incomplete, complete];
        let groups = group_nodes(left_join_notes(&nodes, &[]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].hostnames(), ["a01"]);
        assert_eq!(groups[0].key().memory, "16");
    }

    #[rstest]
    fn memory_orders_by_value(complete: NodeRecord) {
        let sizes = ["128", "64", "1024", "256"];
        let nodes: Vec<NodeRecord> = sizes
            .iter()
            .map(|memory| NodeRecord {
                host: format!("m{memory}"),
                memory: Some((*memory).to_owned()),
                ..complete.clone()
            })
            .collect();
        let groups = group_nodes(left_join_notes(&nodes, &[]));
        let memory: Vec<&str> = groups.iter().map(|group| group.key().memory.as_str()).collect();
        assert_eq!(memory, ["64", "128", "256", "1024"]);
    }

    #[rstest]
    #[case::numeric("64", "128", Ordering::Less)]
    #[case::fraction("64", "64.5", Ordering::Less)]
    #[case::number_before_text("1024", "unknown", Ordering::Less)]
    #[case::text("a", "b", Ordering::Less)]
    #[case::equal("25", "25", Ordering::Equal)]
    fn quantities_compare_numerically_then_textually(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_quantity(left, right), expected);
        assert_eq!(compare_quantity(right, left), expected.reverse());
    }
}
