//! Builders for the CSV inputs the tool reads.
//!
//! Tests describe inventories as typed rows and render them to CSV text, so
//! each case states only the attributes it cares about.

/// Header row of the node inventory, in the column order upstream exports use.
pub const INVENTORY_HEADER: &[&str] = &[
    "host",
    "netbox_status",
    "processor_type",
    "cores",
    "memory",
    "scratch",
    "eth_speed",
    "gpu_type",
    "gpus",
    "flag",
    "cpu_arch",
    "gpu_cc",
    "gpu_mem",
];

/// One inventory row. Every cell is raw CSV text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    /// Host identifier.
    pub host: String,
    /// `netbox_status` cell.
    pub status: String,
    /// `processor_type` cell.
    pub processor_type: String,
    /// `cores` cell.
    pub cores: String,
    /// `memory` cell.
    pub memory: String,
    /// `scratch` cell.
    pub scratch: String,
    /// `eth_speed` cell.
    pub eth_speed: String,
    /// `gpu_type` cell.
    pub gpu_type: String,
    /// `gpus` cell.
    pub gpus: String,
    /// `flag` cell.
    pub flag: String,
    /// `cpu_arch` cell.
    pub cpu_arch: String,
    /// `gpu_cc` cell.
    pub gpu_cc: String,
    /// `gpu_mem` cell.
    pub gpu_mem: String,
}

impl InventoryRow {
    /// Creates an active CPU-only shared node.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_test_support::fixtures::InventoryRow;
    ///
    /// let row = InventoryRow::active("a01").with_flag("B");
    /// assert_eq!(row.status, "Active");
    /// assert_eq!(row.flag, "B");
    /// ```
    #[must_use]
    pub fn active(host: &str) -> Self {
        Self {
            host: host.to_owned(),
            status: "Active".to_owned(),
            processor_type: "CPU1".to_owned(),
            cores: "4".to_owned(),
            memory: "16".to_owned(),
            scratch: "100".to_owned(),
            eth_speed: "10".to_owned(),
            gpu_type: "None".to_owned(),
            gpus: "0".to_owned(),
            flag: "S".to_owned(),
            cpu_arch: "x86_64".to_owned(),
            gpu_cc: "NaN".to_owned(),
            gpu_mem: "NaN".to_owned(),
        }
    }

    /// Overrides the status cell.
    #[must_use]
    pub fn with_status(mut self, status: &str) -> Self {
        status.clone_into(&mut self.status);
        self
    }

    /// Overrides the flag cell.
    #[must_use]
    pub fn with_flag(mut self, flag: &str) -> Self {
        flag.clone_into(&mut self.flag);
        self
    }

    /// Overrides the cores cell.
    #[must_use]
    pub fn with_cores(mut self, cores: &str) -> Self {
        cores.clone_into(&mut self.cores);
        self
    }

    /// Overrides the memory cell.
    #[must_use]
    pub fn with_memory(mut self, memory: &str) -> Self {
        memory.clone_into(&mut self.memory);
        self
    }

    /// Overrides the processor cell.
    #[must_use]
    pub fn with_processor(mut self, processor_type: &str) -> Self {
        processor_type.clone_into(&mut self.processor_type);
        self
    }

    /// Sets the GPU cells.
    #[must_use]
    pub fn with_gpu(mut self, gpu_type: &str, gpus: &str, gpu_cc: &str, gpu_mem: &str) -> Self {
        gpu_type.clone_into(&mut self.gpu_type);
        gpus.clone_into(&mut self.gpus);
        gpu_cc.clone_into(&mut self.gpu_cc);
        gpu_mem.clone_into(&mut self.gpu_mem);
        self
    }

    fn cells(&self) -> [&str; 13] {
        [
            &self.host,
            &self.status,
            &self.processor_type,
            &self.cores,
            &self.memory,
            &self.scratch,
            &self.eth_speed,
            &self.gpu_type,
            &self.gpus,
            &self.flag,
            &self.cpu_arch,
            &self.gpu_cc,
            &self.gpu_mem,
        ]
    }
}

/// Node inventory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryCsv {
    rows: Vec<InventoryRow>,
}

impl InventoryCsv {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `count` active nodes named `<prefix>NNN`, each with a distinct
    /// core count so every node forms its own group.
    ///
    /// # Examples
    /// ```
    /// use nodegroup_test_support::fixtures::InventoryCsv;
    ///
    /// let csv = InventoryCsv::distinct_groups("n", 3).render();
    /// assert_eq!(csv.lines().count(), 4);
    /// assert!(csv.contains("n002,Active,CPU1,2,"));
    /// ```
    #[must_use]
    pub fn distinct_groups(prefix: &str, count: usize) -> Self {
        let rows = (1..=count)
            .map(|index| {
                InventoryRow::active(&format!("{prefix}{index:03}")).with_cores(&index.to_string())
            })
            .collect();
        Self { rows }
    }

    /// Appends `row`.
    #[must_use]
    pub fn with_row(mut self, row: InventoryRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Renders the table as CSV text with a header row.
    #[must_use]
    pub fn render(&self) -> String {
        render_table(
            INVENTORY_HEADER,
            self.rows.iter().map(|row| row.cells().to_vec()),
        )
    }
}

/// Renders a notes table from `(host, notes)` pairs.
///
/// # Examples
/// ```
/// use nodegroup_test_support::fixtures::notes_csv;
///
/// assert_eq!(notes_csv(&[("a01", "GPU, NVLink")]), "host,notes\na01,\"GPU, NVLink\"\n");
/// ```
#[must_use]
pub fn notes_csv(entries: &[(&str, &str)]) -> String {
    render_table(
        &["host", "notes"],
        entries.iter().map(|(host, notes)| vec![*host, *notes]),
    )
}

/// Renders a CPU-links table from `(model, display name, url)` triples.
#[must_use]
pub fn cpu_links_csv(entries: &[(&str, &str, &str)]) -> String {
    render_table(
        &["cpu_model", "cpu_display_name", "cpu_url"],
        entries
            .iter()
            .map(|(model, name, url)| vec![*model, *name, *url]),
    )
}

fn render_table<'a>(header: &[&str], rows: impl Iterator<Item = Vec<&'a str>>) -> String {
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = row.into_iter().map(quote).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn quote(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}
