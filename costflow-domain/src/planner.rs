use crate::aggregate::FlowTotals;
use crate::emitter::emit_flows;
use crate::error::FlowError;
use crate::labels::LabelMap;
use crate::normalize::{CostRecord, normalize_rows};
use crate::selector::{CategorySet, apply_grouping, category_totals, reservation_categories};
use costflow_types::flow::{FlowDiagram, FlowSummary};
use costflow_types::row::CostRow;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Number of middle-column nodes shown when nothing else is configured, `Others` included.
pub const DEFAULT_TOP_CATEGORIES: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub top_categories: usize,
    pub labels: LabelMap,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            top_categories: DEFAULT_TOP_CATEGORIES,
            labels: LabelMap::default(),
        }
    }
}

pub struct FlowPlanner {
    config: PlannerConfig,
}

impl Default for FlowPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl FlowPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self, rows: &[CostRow]) -> Result<FlowDiagram, FlowError> {
        let records = normalize_rows(rows)?;

        let totals = category_totals(&records);
        let mandatory = reservation_categories(&records);
        let selection = CategorySet::select(&totals, &mandatory, self.config.top_categories);

        debug!(
            categories = totals.len(),
            kept = ?selection.kept(),
            folded = selection.folded().len(),
            "selected categories"
        );
        if selection.has_others() && selection.len() + 1 > self.config.top_categories {
            warn!(
                reservation_categories = mandatory.len(),
                top_categories = self.config.top_categories,
                "reservation categories exceed the category cap; keeping all of them"
            );
        }

        let grouped = apply_grouping(&records, &selection);
        let flow_totals = FlowTotals::from_records(&grouped);

        let mut diagram = emit_flows(&flow_totals, &self.config.labels);
        diagram.summary = summarize(&records, &totals, &selection);
        Ok(diagram)
    }
}

fn summarize(
    records: &[CostRecord],
    totals: &BTreeMap<String, u64>,
    selection: &CategorySet,
) -> FlowSummary {
    let total_cost = records.iter().fold(0u64, |acc, r| acc.saturating_add(r.cost));
    let others_cost = selection.has_others().then(|| {
        selection
            .folded()
            .iter()
            .filter_map(|c| totals.get(c))
            .fold(0u64, |acc, c| acc.saturating_add(*c))
    });

    FlowSummary {
        total_cost,
        categories_total: totals.len() as u64,
        categories_kept: selection.kept().iter().cloned().collect(),
        others_cost,
    }
}
