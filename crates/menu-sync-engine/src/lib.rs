pub mod dom;
pub mod filter;
pub mod io;
pub mod localization;
pub mod menu;
pub mod pipeline;
pub mod reconcile;
pub mod records;
pub mod render;
pub mod snapshot;
pub mod tabular;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dom::{DocumentTree, Markup, NodeId, page_skeleton, to_html};
pub use filter::{FilterSelection, FilterSummary, apply_filters, apply_selection};
pub use io::*;
pub use localization::{Label, Language};
pub use menu::{CategoryGroup, MenuItem, TakeawayItems, normalize};
pub use pipeline::{MenuPipeline, PipelineConfig};
pub use reconcile::{
    CycleReport, Delay, NoDelay, Outcome, Phase, PhaseTiming, ReconcileOptions, RecordingDelay,
    StatusPhases, ThreadSleep, reconcile_root,
};
pub use records::{Record, map_records};
pub use snapshot::{LocalizedView, Snapshot, SnapshotFields};
pub use tabular::{Row, parse_rows, write_rows};
