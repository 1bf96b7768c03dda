use std::collections::BTreeMap;

/// Built-in display labels for well-known raw names.
pub const DEFAULT_LABELS: [(&str, &str); 2] = [
    ("Azure Database for PostgreSQL", "PostgreSQL"),
    ("Azure Cognitive Search", "Azure Search"),
];

/// Raw name → display label table, applied to category and environment nodes.
///
/// Built once per run. Later layers win on key collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: BTreeMap<String, String>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LabelMap {
    pub fn empty() -> Self {
        Self {
            labels: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::empty().with_overrides(
            DEFAULT_LABELS
                .iter()
                .map(|(raw, label)| (raw.to_string(), label.to_string())),
        )
    }

    /// Layer `overrides` on top of the current table.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.labels.extend(overrides);
        self
    }

    /// Display label for `name`, or `name` itself when unmapped.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.labels.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
