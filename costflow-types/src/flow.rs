use serde::{Deserialize, Serialize};
use std::fmt;

/// One rendered Sankey line: `<source> [<cost>] <target>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub cost: u64,
    pub target: String,
}

impl FlowEdge {
    pub fn new(source: impl Into<String>, cost: u64, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            cost,
            target: target.into(),
        }
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.source, self.cost, self.target)
    }
}

/// The three fixed flow stages, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDiagram {
    /// Pricing model → (grouped) category.
    #[serde(default)]
    pub pricing_to_category: Vec<FlowEdge>,

    /// Category → `TotalMonthly`.
    #[serde(default)]
    pub category_to_total: Vec<FlowEdge>,

    /// `TotalMonthly` → environment.
    #[serde(default)]
    pub total_to_environment: Vec<FlowEdge>,

    pub summary: FlowSummary,
}

impl FlowDiagram {
    pub fn blocks(&self) -> [&[FlowEdge]; 3] {
        [
            &self.pricing_to_category,
            &self.category_to_total,
            &self.total_to_environment,
        ]
    }

    pub fn edge_count(&self) -> usize {
        self.blocks().iter().map(|b| b.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSummary {
    /// Sum of every normalized cost in the export.
    pub total_cost: u64,

    /// Distinct categories after the umbrella merge.
    pub categories_total: u64,

    /// Raw category names kept as their own node, sorted by name.
    #[serde(default)]
    pub categories_kept: Vec<String>,

    /// Cost folded into `Others`; absent when no bucket was needed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others_cost: Option<u64>,
}
