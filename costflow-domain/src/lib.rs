//! Domain logic: turn cost export rows into a deterministic three-stage flow diagram.
//!
//! This crate owns *which* categories are shown and *what* each flow costs. Reading the export is
//! `costflow-ingest`'s job and turning the diagram into text is `costflow-render`'s.

mod aggregate;
mod emitter;
mod error;
mod labels;
mod normalize;
mod planner;
mod selector;

pub use aggregate::{FlowTotals, cost_order};
pub use emitter::emit_flows;
pub use error::{CostDefect, FlowError};
pub use labels::{DEFAULT_LABELS, LabelMap};
pub use normalize::{CostRecord, merge_umbrella, normalize_cost, normalize_rows};
pub use planner::{DEFAULT_TOP_CATEGORIES, FlowPlanner, PlannerConfig};
pub use selector::{
    CategorySet, GroupedRecord, apply_grouping, category_totals, reservation_categories,
};
