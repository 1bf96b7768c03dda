//! Shared DTOs for the costflow workspace.
//!
//! # Design constraints
//! - Rows mirror the cost export as found; cleaning happens in `costflow-domain`.
//! - Flow types are serialized for `--format json`, so prefer adding fields over changing them.

pub mod flow;
pub mod row;

/// Node names and column headers with fixed meaning.
pub mod nodes {
    /// Synthetic bucket absorbing every category not selected for display.
    pub const OTHERS: &str = "Others";

    /// Middle node every category flows into and every environment flows out of.
    pub const TOTAL_MONTHLY: &str = "TotalMonthly";

    /// Umbrella category and the raw categories it absorbs.
    pub const ETL_TOOLS: &str = "ETL Tools";
    pub const ETL_TOOLS_MEMBERS: [&str; 2] = ["Azure Data Factory v2", "Azure Synapse Analytics"];
}

/// Column headers of the cost export.
pub mod columns {
    // The export really spells it "Monthy".
    pub const MONTHLY_COST: &str = "Monthy Cost";
    pub const METER_CATEGORY: &str = "MeterCategory";
    pub const PRICING_MODEL: &str = "PricingModel";
    pub const ENVIRONMENT: &str = "Environment";

    pub const REQUIRED: [&str; 4] = [MONTHLY_COST, METER_CATEGORY, PRICING_MODEL, ENVIRONMENT];
}
