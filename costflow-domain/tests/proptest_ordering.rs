//! Property-based tests for flow planning.
//!
//! These tests verify that:
//! - Every block carries the same total cost
//! - Row order never changes the diagram
//! - Reservation categories always keep their own node
//! - `Others` appears only when the category count exceeds the cap

use costflow_domain::{FlowPlanner, LabelMap, PlannerConfig};
use costflow_types::flow::{FlowDiagram, FlowEdge};
use costflow_types::row::CostRow;
use proptest::prelude::*;
use std::collections::BTreeSet;

const CATEGORIES: &[&str] = &[
    "Backup", "Cache", "Compute", "Monitoring", "Network", "Queues", "Search", "Storage",
];
const MODELS: &[&str] = &["SavingsPlan", "Reservation", "OnDemand"];
const ENVIRONMENTS: &[&str] = &["dev", "prod", "test"];

/// Strategy to generate cost rows with whole, non-zero costs.
fn arb_rows() -> impl Strategy<Value = Vec<CostRow>> {
    prop::collection::vec(
        (
            prop::sample::select(CATEGORIES),
            prop::sample::select(MODELS),
            prop::sample::select(ENVIRONMENTS),
            1u64..10_000,
        )
            .prop_map(|(c, m, e, cost)| CostRow::new(c, m, e, cost.to_string())),
        0..40,
    )
}

fn plan(rows: &[CostRow], top_categories: usize) -> FlowDiagram {
    FlowPlanner::new(PlannerConfig {
        top_categories,
        labels: LabelMap::empty(),
    })
    .plan(rows)
    .expect("generated rows are well formed")
}

fn block_sum(edges: &[FlowEdge]) -> u64 {
    edges.iter().map(|e| e.cost).sum()
}

proptest! {
    /// All three blocks account for the same money.
    #[test]
    fn blocks_conserve_cost(rows in arb_rows(), cap in 0usize..10) {
        let diagram = plan(&rows, cap);
        let total: u64 = rows.iter().map(|r| r.monthly_cost.parse::<u64>().unwrap()).sum();

        prop_assert_eq!(block_sum(&diagram.pricing_to_category), total);
        prop_assert_eq!(block_sum(&diagram.category_to_total), total);
        prop_assert_eq!(block_sum(&diagram.total_to_environment), total);
        prop_assert_eq!(diagram.summary.total_cost, total);
    }

    /// Shuffling the export yields the identical diagram.
    #[test]
    fn row_order_is_irrelevant(rows in arb_rows(), cap in 0usize..10) {
        let mut reversed = rows.clone();
        reversed.reverse();
        prop_assert_eq!(plan(&rows, cap), plan(&reversed, cap));
    }

    /// Categories with any reservation spend are never folded.
    #[test]
    fn reservation_categories_are_kept(rows in arb_rows(), cap in 0usize..10) {
        let diagram = plan(&rows, cap);
        let middle: BTreeSet<&str> =
            diagram.category_to_total.iter().map(|e| e.source.as_str()).collect();

        for row in rows.iter().filter(|r| r.pricing_model == "Reservation") {
            prop_assert!(middle.contains(row.category.as_str()), "{} folded", row.category);
        }
    }

    /// Kept and folded categories partition the input; `Others` shows up iff something folded.
    #[test]
    fn selection_partitions_categories(rows in arb_rows(), cap in 0usize..10) {
        let diagram = plan(&rows, cap);
        let distinct: BTreeSet<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        let middle: Vec<&str> =
            diagram.category_to_total.iter().map(|e| e.source.as_str()).collect();
        let has_others = middle.contains(&"Others");
        let reservations: BTreeSet<&str> = rows
            .iter()
            .filter(|r| r.pricing_model == "Reservation")
            .map(|r| r.category.as_str())
            .collect();

        prop_assert_eq!(diagram.summary.categories_total, distinct.len() as u64);
        // Nothing folds when every category is a reservation category.
        prop_assert_eq!(has_others, distinct.len() > cap && reservations != distinct);
        prop_assert_eq!(diagram.summary.others_cost.is_some(), has_others);

        if has_others {
            prop_assert!(middle.len() <= cap.max(reservations.len() + 1));
        } else {
            prop_assert_eq!(middle.len(), distinct.len());
        }
    }

    /// Middle column is sorted costliest first, ties by name.
    #[test]
    fn middle_column_is_ordered(rows in arb_rows(), cap in 0usize..10) {
        let diagram = plan(&rows, cap);
        for pair in diagram.category_to_total.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.cost > b.cost || (a.cost == b.cost && a.source < b.source));
        }
    }
}
