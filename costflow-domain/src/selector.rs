use crate::aggregate::cost_order;
use crate::normalize::CostRecord;
use costflow_types::nodes;
use std::collections::{BTreeMap, BTreeSet};

/// Categories that keep their own node; everything else is drawn as `Others`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    kept: BTreeSet<String>,
    folded: BTreeSet<String>,
}

impl CategorySet {
    /// Pick the visible categories.
    ///
    /// - `top_categories` counts the `Others` node, so only `top_categories - 1` slots remain for
    ///   named categories once anything has to be folded.
    /// - Every category in `mandatory` is kept, even when there are more of them than slots. In
    ///   that case the cap is exceeded on purpose.
    /// - Free slots go to the costliest remaining categories, ties broken by name.
    pub fn select(
        totals: &BTreeMap<String, u64>,
        mandatory: &BTreeSet<String>,
        top_categories: usize,
    ) -> Self {
        let kept: BTreeSet<String> = if totals.len() <= top_categories {
            totals.keys().cloned().collect()
        } else {
            let slots = top_categories.saturating_sub(1);
            if mandatory.len() >= slots {
                mandatory.clone()
            } else {
                let free = slots - mandatory.len();
                let fillers = cost_order(totals)
                    .into_iter()
                    .filter(|(name, _)| !mandatory.contains(*name))
                    .take(free)
                    .map(|(name, _)| name.to_string());
                mandatory.iter().cloned().chain(fillers).collect()
            }
        };

        let folded = totals
            .keys()
            .filter(|name| !kept.contains(*name))
            .cloned()
            .collect();

        Self { kept, folded }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.kept.contains(category)
    }

    /// Node name a record of `category` is drawn under.
    pub fn group_of<'a>(&self, category: &'a str) -> &'a str {
        if self.contains(category) {
            category
        } else {
            nodes::OTHERS
        }
    }

    pub fn kept(&self) -> &BTreeSet<String> {
        &self.kept
    }

    /// Categories collapsed into `Others`.
    pub fn folded(&self) -> &BTreeSet<String> {
        &self.folded
    }

    pub fn has_others(&self) -> bool {
        !self.folded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

/// A record tagged with the node it is drawn under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedRecord {
    pub record: CostRecord,
    pub grouped_category: String,
}

/// Total cost per (umbrella-merged) category.
pub fn category_totals(records: &[CostRecord]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for r in records {
        let sum: &mut u64 = totals.entry(r.category.clone()).or_default();
        *sum = sum.saturating_add(r.cost);
    }
    totals
}

/// Categories with at least one reservation-priced record.
pub fn reservation_categories(records: &[CostRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter(|r| r.pricing_model.is_reservation())
        .map(|r| r.category.clone())
        .collect()
}

pub fn apply_grouping(records: &[CostRecord], selection: &CategorySet) -> Vec<GroupedRecord> {
    records
        .iter()
        .map(|r| GroupedRecord {
            grouped_category: selection.group_of(&r.category).to_string(),
            record: r.clone(),
        })
        .collect()
}
