use crate::aggregate::FlowTotals;
use crate::labels::LabelMap;
use costflow_types::flow::{FlowDiagram, FlowEdge};
use costflow_types::nodes;
use costflow_types::row::PricingModel;

/// Walk the three stages in display order and emit one edge per non-zero flow.
///
/// Labels are applied to category and environment nodes only; pricing models and `TotalMonthly`
/// are printed as-is. The returned diagram carries a default summary.
pub fn emit_flows(totals: &FlowTotals, labels: &LabelMap) -> FlowDiagram {
    let category_order = totals.category_order();

    let mut pricing_to_category = Vec::new();
    for model in &PricingModel::DISPLAY_ORDER {
        for (category, _) in &category_order {
            let cost = totals.pricing_cost(model, category);
            if cost > 0 {
                pricing_to_category.push(FlowEdge::new(
                    model.as_str(),
                    cost,
                    labels.resolve(category),
                ));
            }
        }
    }

    let category_to_total = category_order
        .iter()
        .filter(|(_, cost)| *cost > 0)
        .map(|(category, cost)| FlowEdge::new(labels.resolve(category), *cost, nodes::TOTAL_MONTHLY))
        .collect();

    let total_to_environment = totals
        .environment_order()
        .into_iter()
        .filter(|(_, cost)| *cost > 0)
        .map(|(env, cost)| FlowEdge::new(nodes::TOTAL_MONTHLY, cost, labels.resolve(env)))
        .collect();

    FlowDiagram {
        pricing_to_category,
        category_to_total,
        total_to_environment,
        summary: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::CostRecord;
    use crate::selector::GroupedRecord;

    fn grouped(group: &str, model: PricingModel, env: &str, cost: u64) -> GroupedRecord {
        GroupedRecord {
            record: CostRecord {
                category: group.to_string(),
                pricing_model: model,
                environment: env.to_string(),
                cost,
            },
            grouped_category: group.to_string(),
        }
    }

    fn lines(edges: &[FlowEdge]) -> Vec<String> {
        edges.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn pricing_block_walks_fixed_model_order() {
        let totals = FlowTotals::from_records(&[
            grouped("Storage", PricingModel::OnDemand, "prod", 40),
            grouped("Compute", PricingModel::SavingsPlan, "prod", 70),
            grouped("Compute", PricingModel::OnDemand, "dev", 5),
            grouped("Storage", PricingModel::Reservation, "dev", 10),
        ]);
        let diagram = emit_flows(&totals, &LabelMap::empty());

        assert_eq!(
            lines(&diagram.pricing_to_category),
            vec![
                "SavingsPlan [70] Compute",
                "Reservation [10] Storage",
                "OnDemand [5] Compute",
                "OnDemand [40] Storage",
            ]
        );
        assert_eq!(
            lines(&diagram.category_to_total),
            vec!["Compute [75] TotalMonthly", "Storage [50] TotalMonthly"]
        );
        assert_eq!(
            lines(&diagram.total_to_environment),
            vec!["TotalMonthly [110] prod", "TotalMonthly [15] dev"]
        );
    }

    #[test]
    fn zero_cost_flows_are_skipped() {
        let totals = FlowTotals::from_records(&[
            grouped("Free", PricingModel::OnDemand, "sandbox", 0),
            grouped("Paid", PricingModel::OnDemand, "prod", 3),
        ]);
        let diagram = emit_flows(&totals, &LabelMap::empty());

        assert_eq!(lines(&diagram.pricing_to_category), vec!["OnDemand [3] Paid"]);
        assert_eq!(lines(&diagram.category_to_total), vec!["Paid [3] TotalMonthly"]);
        assert_eq!(lines(&diagram.total_to_environment), vec!["TotalMonthly [3] prod"]);
    }

    #[test]
    fn unknown_pricing_models_only_feed_later_blocks() {
        let totals = FlowTotals::from_records(&[grouped(
            "Storage",
            PricingModel::Other("Spot".to_string()),
            "prod",
            8,
        )]);
        let diagram = emit_flows(&totals, &LabelMap::empty());

        assert!(diagram.pricing_to_category.is_empty());
        assert_eq!(lines(&diagram.category_to_total), vec!["Storage [8] TotalMonthly"]);
    }

    #[test]
    fn labels_apply_to_categories_and_environments() {
        let labels = LabelMap::empty().with_overrides([
            ("Storage".to_string(), "Disks".to_string()),
            ("prod".to_string(), "Production".to_string()),
            ("OnDemand".to_string(), "never used".to_string()),
        ]);
        let totals =
            FlowTotals::from_records(&[grouped("Storage", PricingModel::OnDemand, "prod", 2)]);
        let diagram = emit_flows(&totals, &labels);

        assert_eq!(lines(&diagram.pricing_to_category), vec!["OnDemand [2] Disks"]);
        assert_eq!(lines(&diagram.category_to_total), vec!["Disks [2] TotalMonthly"]);
        assert_eq!(
            lines(&diagram.total_to_environment),
            vec!["TotalMonthly [2] Production"]
        );
    }
}
