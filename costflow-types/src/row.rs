use serde::{Deserialize, Serialize};
use std::fmt;

/// One billing line item as read from the cost export.
///
/// Every field is kept as text. Unknown columns are ignored by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRow {
    #[serde(rename = "MeterCategory")]
    pub category: String,

    #[serde(rename = "PricingModel")]
    pub pricing_model: String,

    #[serde(rename = "Environment")]
    pub environment: String,

    /// Locale-formatted decimal, e.g. `"1,234.56"`.
    #[serde(rename = "Monthy Cost")]
    pub monthly_cost: String,
}

impl CostRow {
    pub fn new(
        category: impl Into<String>,
        pricing_model: impl Into<String>,
        environment: impl Into<String>,
        monthly_cost: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            pricing_model: pricing_model.into(),
            environment: environment.into(),
            monthly_cost: monthly_cost.into(),
        }
    }
}

/// Pricing model of a line item.
///
/// Only the three known models become diagram sources. Anything else is carried as `Other` so its
/// cost still counts towards category and environment totals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PricingModel {
    SavingsPlan,
    Reservation,
    OnDemand,
    Other(String),
}

impl PricingModel {
    /// Source order of the first flow block. This is a business rule, not a cost ranking.
    pub const DISPLAY_ORDER: [PricingModel; 3] = [
        PricingModel::SavingsPlan,
        PricingModel::Reservation,
        PricingModel::OnDemand,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "SavingsPlan" => PricingModel::SavingsPlan,
            "Reservation" => PricingModel::Reservation,
            "OnDemand" => PricingModel::OnDemand,
            other => PricingModel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PricingModel::SavingsPlan => "SavingsPlan",
            PricingModel::Reservation => "Reservation",
            PricingModel::OnDemand => "OnDemand",
            PricingModel::Other(name) => name,
        }
    }

    pub fn is_reservation(&self) -> bool {
        matches!(self, PricingModel::Reservation)
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PricingModel {
    fn from(raw: &str) -> Self {
        PricingModel::parse(raw)
    }
}

impl Serialize for PricingModel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PricingModel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PricingModel::parse(&raw))
    }
}
