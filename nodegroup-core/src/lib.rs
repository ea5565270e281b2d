//! Nodegroup core library.
//!
//! Turns a cluster node inventory into the rows of the hardware display
//! table: notes are joined by host, inactive nodes dropped, the rest grouped
//! by hardware configuration, and each group formatted for display.

mod builder;
mod display;
mod enrich;
mod error;
mod group;
mod output;
mod pipeline;
mod record;
mod source;

pub use crate::{
    builder::{DEFAULT_MIN_GROUPS, PipelineBuilder},
    display::{CpuDisplayMap, DisplayRow, flag_label},
    enrich::{EnrichedNode, left_join_notes, retain_active},
    error::{PipelineError, PipelineErrorCode, Result},
    group::{GroupKey, GroupRecord, format_compute_capability, format_gpu_memory, group_nodes},
    output::write_data_literal,
    pipeline::InventoryPipeline,
    record::{ACTIVE_STATUS, CpuLink, NONE_SENTINEL, NodeRecord, NoteEntry},
    source::InventorySource,
};
