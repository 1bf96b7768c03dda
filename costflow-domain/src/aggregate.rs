use crate::selector::GroupedRecord;
use costflow_types::row::PricingModel;
use std::collections::BTreeMap;

/// Cost sums for every grouping the emitter walks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowTotals {
    pub by_category: BTreeMap<String, u64>,
    pub by_environment: BTreeMap<String, u64>,
    pub by_pricing_category: BTreeMap<PricingModel, BTreeMap<String, u64>>,
}

impl FlowTotals {
    pub fn from_records(records: &[GroupedRecord]) -> Self {
        let mut totals = FlowTotals::default();
        for g in records {
            let cost = g.record.cost;
            add(&mut totals.by_category, &g.grouped_category, cost);
            add(&mut totals.by_environment, &g.record.environment, cost);
            add(
                totals
                    .by_pricing_category
                    .entry(g.record.pricing_model.clone())
                    .or_default(),
                &g.grouped_category,
                cost,
            );
        }
        totals
    }

    /// Grouped categories, costliest first.
    pub fn category_order(&self) -> Vec<(&str, u64)> {
        cost_order(&self.by_category)
    }

    /// Environments, costliest first.
    pub fn environment_order(&self) -> Vec<(&str, u64)> {
        cost_order(&self.by_environment)
    }

    /// Cost of records priced by `model` that landed in `category`.
    pub fn pricing_cost(&self, model: &PricingModel, category: &str) -> u64 {
        self.by_pricing_category
            .get(model)
            .and_then(|m| m.get(category))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.by_category
            .values()
            .fold(0u64, |acc, c| acc.saturating_add(*c))
    }
}

fn add(sums: &mut BTreeMap<String, u64>, key: &str, cost: u64) {
    let sum = sums.entry(key.to_string()).or_default();
    *sum = sum.saturating_add(cost);
}

/// Order groups by cost descending, then by name ascending.
pub fn cost_order(sums: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
    let mut order: Vec<(&str, u64)> = sums.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    order.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    order
}
