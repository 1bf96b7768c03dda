use crate::error::{CostDefect, FlowError};
use costflow_types::nodes;
use costflow_types::row::{CostRow, PricingModel};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// A cleaned line item: umbrella merge applied, cost rounded to a whole unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRecord {
    pub category: String,
    pub pricing_model: PricingModel,
    pub environment: String,
    pub cost: u64,
}

/// Parse a locale-formatted amount such as `"1,234.56"` into whole units.
///
/// Grouping commas are dropped and the value is rounded half-to-even, so `"999.5"` becomes `1000`
/// and `"998.5"` becomes `998`. Plain and scientific notation are both accepted.
pub fn normalize_cost(raw: &str) -> Result<u64, CostDefect> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(CostDefect::Empty);
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| CostDefect::NotANumber)?;

    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    if rounded.is_zero() {
        return Ok(0);
    }
    if rounded.is_sign_negative() {
        return Err(CostDefect::Negative);
    }
    rounded.to_u64().ok_or(CostDefect::OutOfRange)
}

/// Map a raw category onto its umbrella category, if it has one.
pub fn merge_umbrella(category: &str) -> &str {
    if nodes::ETL_TOOLS_MEMBERS.contains(&category) {
        nodes::ETL_TOOLS
    } else {
        category
    }
}

/// Clean every row of the export. The first malformed cost aborts the whole batch.
pub fn normalize_rows(rows: &[CostRow]) -> Result<Vec<CostRecord>, FlowError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let cost =
                normalize_cost(&row.monthly_cost).map_err(|defect| FlowError::MalformedCost {
                    row: i + 1,
                    value: row.monthly_cost.clone(),
                    defect,
                })?;
            Ok(CostRecord {
                category: merge_umbrella(&row.category).to_string(),
                pricing_model: PricingModel::parse(&row.pricing_model),
                environment: row.environment.clone(),
                cost,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_grouping_separators() {
        assert_eq!(normalize_cost("1,234"), Ok(1234));
        assert_eq!(normalize_cost("1,234,567.4"), Ok(1_234_567));
        assert_eq!(normalize_cost("  42 "), Ok(42));
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(normalize_cost("999.5"), Ok(1000));
        assert_eq!(normalize_cost("998.5"), Ok(998));
        assert_eq!(normalize_cost("0.5"), Ok(0));
        assert_eq!(normalize_cost("1.5"), Ok(2));
        assert_eq!(normalize_cost("1,234.6"), Ok(1235));
        assert_eq!(normalize_cost("2.49"), Ok(2));
    }

    #[test]
    fn accepts_scientific_notation() {
        assert_eq!(normalize_cost("1.5e3"), Ok(1500));
    }

    #[test]
    fn tiny_negative_rounds_to_zero() {
        assert_eq!(normalize_cost("-0.4"), Ok(0));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(normalize_cost(""), Err(CostDefect::Empty));
        assert_eq!(normalize_cost(" , "), Err(CostDefect::Empty));
        assert_eq!(normalize_cost("abc"), Err(CostDefect::NotANumber));
        assert_eq!(normalize_cost("nan"), Err(CostDefect::NotANumber));
        assert_eq!(normalize_cost("12.3.4"), Err(CostDefect::NotANumber));
        assert_eq!(normalize_cost("-5"), Err(CostDefect::Negative));
        assert_eq!(
            normalize_cost("99999999999999999999999"),
            Err(CostDefect::OutOfRange)
        );
    }

    #[test]
    fn umbrella_merges_known_members_only() {
        assert_eq!(merge_umbrella("Azure Data Factory v2"), "ETL Tools");
        assert_eq!(merge_umbrella("Azure Synapse Analytics"), "ETL Tools");
        assert_eq!(merge_umbrella("Azure Data Factory"), "Azure Data Factory");
        assert_eq!(merge_umbrella("Storage"), "Storage");
    }

    #[test]
    fn normalize_rows_applies_both_cleanups() {
        let rows = vec![
            CostRow::new("Azure Synapse Analytics", "Reservation", "prod", "1,000.5"),
            CostRow::new("Storage", "Spot", "dev", "3"),
        ];
        let records = normalize_rows(&rows).unwrap();
        assert_eq!(
            records,
            vec![
                CostRecord {
                    category: "ETL Tools".to_string(),
                    pricing_model: PricingModel::Reservation,
                    environment: "prod".to_string(),
                    cost: 1000,
                },
                CostRecord {
                    category: "Storage".to_string(),
                    pricing_model: PricingModel::Other("Spot".to_string()),
                    environment: "dev".to_string(),
                    cost: 3,
                },
            ]
        );
    }

    #[test]
    fn normalize_rows_reports_first_bad_row() {
        let rows = vec![
            CostRow::new("Storage", "OnDemand", "prod", "1"),
            CostRow::new("Storage", "OnDemand", "prod", "n/a"),
            CostRow::new("Storage", "OnDemand", "prod", ""),
        ];
        let err = normalize_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            FlowError::MalformedCost {
                row: 2,
                value: "n/a".to_string(),
                defect: CostDefect::NotANumber,
            }
        );
    }
}
