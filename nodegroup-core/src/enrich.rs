//! Notes join and status filtering.

use std::collections::HashMap;

use tracing::debug;

use crate::record::{NONE_SENTINEL, NodeRecord, NoteEntry};

/// A node paired with the notes recorded against its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedNode<'a> {
    /// Inventory row.
    pub node: &'a NodeRecord,
    /// Notes for the host, `["None"]` when the notes table has no entry.
    pub notes: Vec<String>,
}

/// Left-joins `notes` onto `nodes` by host.
///
/// Every node is kept. Hosts without a notes row, and notes rows with an
/// empty cell, contribute the [`NONE_SENTINEL`]. A host with several notes
/// rows keeps all of them in file order.
///
/// # Examples
/// ```
/// use nodegroup_core::{NodeRecord, NoteEntry, left_join_notes};
///
/// let nodes = vec![NodeRecord::new("a01"), NodeRecord::new("a02")];
/// let notes = vec![NoteEntry { host: "a02".into(), notes: Some("Infiniband".into()) }];
/// let joined = left_join_notes(&nodes, &notes);
/// assert_eq!(joined[0].notes, ["None"]);
/// assert_eq!(joined[1].notes, ["Infiniband"]);
/// ```
#[must_use]
pub fn left_join_notes<'a>(nodes: &'a [NodeRecord], notes: &[NoteEntry]) -> Vec<EnrichedNode<'a>> {
    let mut by_host: HashMap<&str, Vec<String>> = HashMap::new();
    for entry in notes {
        let text = entry.notes.as_deref().unwrap_or(NONE_SENTINEL);
        by_host
            .entry(entry.host.as_str())
            .or_default()
            .push(text.to_owned());
    }

    nodes
        .iter()
        .map(|node| EnrichedNode {
            node,
            notes: by_host
                .get(node.host.as_str())
                .cloned()
                .unwrap_or_else(|| vec![NONE_SENTINEL.to_owned()]),
        })
        .collect()
}

/// Keeps only nodes whose status is `"Active"`.
#[must_use]
pub fn retain_active(nodes: Vec<EnrichedNode<'_>>) -> Vec<EnrichedNode<'_>> {
    let total = nodes.len();
    let active: Vec<_> = nodes
        .into_iter()
        .filter(|enriched| enriched.node.is_active())
        .collect();
    debug!(
        total,
        active = active.len(),
        "filtered inventory to active nodes"
    );
    active
}
