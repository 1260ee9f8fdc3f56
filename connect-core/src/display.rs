use serde::{Deserialize, Serialize};

/// Affordance shown next to a row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accessory {
    #[default]
    None,
    /// The row can be opened to show the raw FHIR source.
    Disclosure,
}

/// Content of one row in a category list. Built once per render, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub subtitle: Option<String>,
    pub accessory: Accessory,
}

impl DisplayItem {
    pub fn new(title: impl Into<String>, subtitle: Option<String>, accessory: Accessory) -> Self {
        Self {
            title: title.into(),
            subtitle,
            accessory,
        }
    }

    /// Placeholder row for samples that cannot be summarized at all.
    pub fn error_item() -> Self {
        Self::new("Unknown", Some("An error occurred".to_string()), Accessory::None)
    }

    pub fn is_navigable(&self) -> bool {
        self.accessory == Accessory::Disclosure
    }
}
