//! CSV-backed inventory provider.
use std::{fs::File, io::Read, path::Path};

use nodegroup_core::{CpuLink, InventorySource, NodeRecord, NoteEntry};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::errors::CsvProviderError;
use crate::ingest::{normalize_cell, normalize_quantity, parse_count, read_table, require_value};

pub(crate) const INVENTORY_TABLE: &str = "inventory";
pub(crate) const NOTES_TABLE: &str = "notes";
pub(crate) const CPU_LINKS_TABLE: &str = "cpu links";

const INVENTORY_COLUMNS: &[&str] = &[
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
const NOTES_COLUMNS: &[&str] = &["host", "notes"];
const CPU_LINKS_COLUMNS: &[&str] = &["cpu_model", "cpu_display_name", "cpu_url"];

#[derive(Debug, Deserialize)]
struct RawNode {
    host: Option<String>,
    netbox_status: Option<String>,
    processor_type: Option<String>,
    cores: Option<String>,
    memory: Option<String>,
    scratch: Option<String>,
    eth_speed: Option<String>,
    gpu_type: Option<String>,
    gpus: Option<String>,
    flag: Option<String>,
    cpu_arch: Option<String>,
    gpu_cc: Option<String>,
    gpu_mem: Option<String>,
}

impl RawNode {
    fn into_record(self, row: usize) -> Result<NodeRecord, CsvProviderError> {
        Ok(NodeRecord {
            host: require_value(INVENTORY_TABLE, row, "host", self.host)?,
            status: normalize_cell(self.netbox_status),
            processor_type: normalize_cell(self.processor_type),
            cores: parse_count(INVENTORY_TABLE, row, "cores", self.cores)?,
            memory: normalize_quantity(self.memory),
            scratch: normalize_quantity(self.scratch),
            eth_speed: normalize_quantity(self.eth_speed),
            gpu_type: normalize_cell(self.gpu_type),
            gpus: parse_count(INVENTORY_TABLE, row, "gpus", self.gpus)?,
            flag: normalize_cell(self.flag),
            cpu_arch: normalize_cell(self.cpu_arch),
            gpu_cc: normalize_cell(self.gpu_cc),
            gpu_mem: normalize_quantity(self.gpu_mem),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawNote {
    host: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCpuLink {
    cpu_model: Option<String>,
    cpu_display_name: Option<String>,
    cpu_url: Option<String>,
}

impl RawCpuLink {
    fn into_link(self, row: usize) -> Result<CpuLink, CsvProviderError> {
        Ok(CpuLink {
            model: require_value(CPU_LINKS_TABLE, row, "cpu_model", self.cpu_model)?,
            display_name: require_value(
                CPU_LINKS_TABLE,
                row,
                "cpu_display_name",
                self.cpu_display_name,
            )?,
            url: require_value(CPU_LINKS_TABLE, row, "cpu_url", self.cpu_url)?,
        })
    }
}

/// Inventory tables loaded from CSV.
#[derive(Debug)]
pub struct CsvInventoryProvider {
    name: String,
    nodes: Vec<NodeRecord>,
    notes: Vec<NoteEntry>,
    cpu_links: Vec<CpuLink>,
}

impl CsvInventoryProvider {
    /// Loads the three tables from files.
    #[instrument(
        name = "providers.csv.load",
        err,
        skip_all,
        fields(inventory = %inventory.display()),
    )]
    pub fn try_from_paths(
        name: impl Into<String>,
        inventory: &Path,
        notes: &Path,
        cpu_links: &Path,
    ) -> Result<Self, CsvProviderError> {
        let provider = Self::try_from_readers(
            name,
            open(INVENTORY_TABLE, inventory)?,
            open(NOTES_TABLE, notes)?,
            open(CPU_LINKS_TABLE, cpu_links)?,
        )?;
        info!(
            nodes = provider.nodes.len(),
            notes = provider.notes.len(),
            cpu_links = provider.cpu_links.len(),
            "loaded inventory tables"
        );
        Ok(provider)
    }

    /// Loads the three tables from readers.
    pub fn try_from_readers(
        name: impl Into<String>,
        inventory: impl Read,
        notes: impl Read,
        cpu_links: impl Read,
    ) -> Result<Self, CsvProviderError> {
        Ok(Self {
            name: name.into(),
            nodes: read_nodes(inventory)?,
            notes: read_notes(notes)?,
            cpu_links: read_cpu_links(cpu_links)?,
        })
    }
}

impl InventorySource for CsvInventoryProvider {
    fn name(&self) -> &str {
        &self.name
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

fn open(table: &'static str, path: &Path) -> Result<File, CsvProviderError> {
    File::open(path).map_err(|source| CsvProviderError::Io {
        table,
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_nodes(reader: impl Read) -> Result<Vec<NodeRecord>, CsvProviderError> {
    read_table::<_, RawNode>(INVENTORY_TABLE, reader, INVENTORY_COLUMNS)?
        .into_iter()
        .map(|(row, raw)| raw.into_record(row))
        .collect()
}

pub(crate) fn read_notes(reader: impl Read) -> Result<Vec<NoteEntry>, CsvProviderError> {
    let rows = read_table::<_, RawNote>(NOTES_TABLE, reader, NOTES_COLUMNS)?;
    Ok(rows
        .into_iter()
        .filter_map(|(row, raw)| {
            let Some(host) = normalize_cell(raw.host) else {
                debug!(row, "notes row without host, skipping");
                return None;
            };
            Some(NoteEntry {
                host,
                notes: normalize_cell(raw.notes),
            })
        })
        .collect())
}

pub(crate) fn read_cpu_links(reader: impl Read) -> Result<Vec<CpuLink>, CsvProviderError> {
    read_table::<_, RawCpuLink>(CPU_LINKS_TABLE, reader, CPU_LINKS_COLUMNS)?
        .into_iter()
        .map(|(row, raw)| raw.into_link(row))
        .collect()
}
