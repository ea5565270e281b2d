//! Formatting of groups into rows for the display page.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::group::GroupRecord;
use crate::record::{CpuLink, NONE_SENTINEL};

/// Lookup from processor model to the HTML anchor shown in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuDisplayMap {
    anchors: HashMap<String, String>,
}

impl CpuDisplayMap {
    /// Builds the lookup from CPU link rows. A model listed twice keeps its
    /// last row.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_core::{CpuDisplayMap, CpuLink};
    ///
    /// let map = CpuDisplayMap::from_links(&[CpuLink {
    ///     model: "E5-2680v4".into(),
    ///     display_name: "Xeon E5-2680 v4".into(),
    ///     url: "https://example.com/e5".into(),
    /// }]);
    /// assert_eq!(
    ///     map.anchor("E5-2680v4"),
    ///     Some(r#"<a href="https://example.com/e5" target="_blank">Xeon E5-2680 v4</a>"#),
    /// );
    /// assert_eq!(map.anchor("unknown"), None);
    /// ```
    #[must_use]
    pub fn from_links(links: &[CpuLink]) -> Self {
        let anchors = links
            .iter()
            .map(|link| {
                (
                    link.model.clone(),
                    format!(
                        "<a href=\"{}\" target=\"_blank\">{}</a>",
                        link.url, link.display_name
                    ),
                )
            })
            .collect();
        Self { anchors }
    }

    /// Returns the anchor for `model`, if one is known.
    #[must_use]
    pub fn anchor(&self, model: &str) -> Option<&str> {
        self.anchors.get(model).map(String::as_str)
    }

    /// Returns the number of known models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns whether no models are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Renders the processor cell: anchor (or the raw model when unmapped),
    /// a line break, then the architecture.
    #[must_use]
    pub fn processor_display(&self, model: &str, arch: &str) -> String {
        let label = self.anchor(model).unwrap_or_else(|| {
            warn!(processor_type = model, "no CPU link for processor, showing raw model");
            model
        });
        format!("{label}<br>{arch}")
    }
}

/// Maps a billing flag code to its display label.
///
/// `S` and `B` have fixed labels; any other code is shown as is.
///
/// # Examples
/// ```
/// use nodegroup_core::flag_label;
///
/// assert_eq!(flag_label("S"), "Shared");
/// assert_eq!(flag_label("B"), "Buy In");
/// assert_eq!(flag_label("X"), "X");
/// ```
#[must_use]
pub fn flag_label(code: &str) -> &str {
    match code {
        "S" => "Shared",
        "B" => "Buy In",
        other => {
            warn!(flag = other, "unrecognised flag code, passing through");
            other
        }
    }
}

/// One row of the display table, serialised as a JSON array in column order:
/// hostnames, processor, cores, memory, GPU type, GPU count, flag, extra info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow(
    pub Vec<String>,
    pub String,
    pub u32,
    pub String,
    pub String,
    pub u32,
    pub String,
    pub Vec<String>,
);

impl DisplayRow {
    /// Formats `group` using `cpus` for the processor cell.
    #[must_use]
    pub fn from_group(group: &GroupRecord, cpus: &CpuDisplayMap) -> Self {
        let key = group.key();
        let extra_info = [key.gpu_cc.as_str(), key.gpu_mem.as_str()]
            .into_iter()
            .chain(group.notes().iter().map(String::as_str))
            .filter(|value| *value != NONE_SENTINEL)
            .map(str::to_owned)
            .collect();
        Self(
            group.hostnames().to_vec(),
            cpus.processor_display(&key.processor_type, &key.cpu_arch),
            key.cores,
            key.memory.clone(),
            key.gpu_type.clone(),
            key.gpus,
            flag_label(&key.flag).to_owned(),
            extra_info,
        )
    }

    /// Returns the sorted hostnames.
    #[must_use]
    pub fn hostnames(&self) -> &[String] {
        &self.0
    }

    /// Returns the processor cell.
    #[must_use]
    pub fn processor(&self) -> &str {
        &self.1
    }

    /// Returns the flag label.
    #[must_use]
    pub fn flag(&self) -> &str {
        &self.6
    }

    /// Returns the extra-info list.
    #[must_use]
    pub fn extra_info(&self) -> &[String] {
        &self.7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::enrich::left_join_notes;
    use crate::group::group_nodes;
    use crate::record::{NodeRecord, NoteEntry};

    fn gpu_node() -> NodeRecord {
        NodeRecord {
            status: Some("Active".into()),
            processor_type: Some("Gold6242".into()),
            cores: Some(32),
            memory: Some("192".into()),
            scratch: Some("1000".into()),
            eth_speed: Some("25".into()),
            gpu_type: Some("V100".into()),
            gpus: Some(4),
            flag: Some("B".into()),
            cpu_arch: Some("cascadelake".into()),
            gpu_cc: Some("7.0".into()),
            gpu_mem: Some("32".into()),
            ..NodeRecord::new("scc-x01")
        }
    }

    fn links() -> Vec<CpuLink> {
        vec![
            CpuLink {
                model: "Gold6242".into(),
                display_name: "Old".into(),
                url: "https://old".into(),
            },
            CpuLink {
                model: "Gold6242".into(),
                display_name: "Xeon Gold 6242".into(),
                url: "https://ark/6242".into(),
            },
        ]
    }

    #[rstest]
    fn later_links_override_earlier_ones() {
        let map = CpuDisplayMap::from_links(&links());
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.processor_display("Gold6242", "cascadelake"),
            "<a href=\"https://ark/6242\" target=\"_blank\">Xeon Gold 6242</a><br>cascadelake"
        );
    }

    #[rstest]
    fn unmapped_processor_falls_back_to_model() {
        let map = CpuDisplayMap::default();
        assert!(map.is_empty());
        assert_eq!(map.processor_display("Mystery", "arm64"), "Mystery<br>arm64");
    }

    #[rstest]
    fn row_carries_columns_in_display_order() {
        let nodes = vec![gpu_node()];
        let notes = vec![NoteEntry {
            host: "scc-x01".into(),
            notes: Some("NVLink".into()),
        }];
        let groups = group_nodes(left_join_notes(&nodes, &notes));
        let row = DisplayRow::from_group(&groups[0], &CpuDisplayMap::from_links(&links()));
        assert_eq!(row.hostnames(), ["scc-x01"]);
        assert!(row.processor().ends_with("<br>cascadelake"));
        assert_eq!(row.2, 32);
        assert_eq!(row.3, "192");
        assert_eq!(row.4, "V100");
        assert_eq!(row.5, 4);
        assert_eq!(row.flag(), "Buy In");
        assert_eq!(
            row.extra_info(),
            [
                "Cuda GPU Compute Capability: 7.0",
                "GPU Memory: 32GB",
                "NVLink"
            ]
        );
    }

    #[rstest]
    fn extra_info_drops_none_entries() {
        let node = NodeRecord {
            gpu_type: None,
            gpu_cc: None,
            gpu_mem: None,
            gpus: Some(0),
            ..gpu_node()
        };
        let nodes = vec![node];
        let groups = group_nodes(left_join_notes(&nodes, &[]));
        let row = DisplayRow::from_group(&groups[0], &CpuDisplayMap::default());
        assert_eq!(row.4, "None");
        assert!(row.extra_info().is_empty());
    }

    #[rstest]
    fn row_serialises_as_array() {
        let row = DisplayRow(
            vec!["a01".into()],
            "CPU1<br>x86_64".into(),
            4,
            "16".into(),
            "None".into(),
            0,
            "Shared".into(),
            vec![],
        );
        let json = serde_json::to_string(&row).expect("row must serialise");
        assert_eq!(
            json,
            r#"[["a01"],"CPU1<br>x86_64",4,"16","None",0,"Shared",[]]"#
        );
    }
}
