use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which skill grouping a deployment uses. Never auto-detected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Languages, Frameworks, Developer Tools, Libraries.
    Technical,
    /// Languages, Frameworks & Libraries, Tools & Platforms.
    #[default]
    Grouped,
    /// Categories listed in the config file.
    Custom,
}

/// A user-declared skill category for the custom schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Label as written in `\textbf{...}`.
    pub label: String,
    /// JSON key; derived from the label when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// A skill category: JSON key plus the bold label that introduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub key: String,
    pub label: String,
    normalized: String,
}

impl SkillCategory {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            key: key.into(),
            normalized: normalize_label(&label),
            label,
        }
    }

    /// Whether a cleaned `\textbf` label names this category.
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        !self.normalized.is_empty() && normalize_label(label) == self.normalized
    }
}

/// Ordered list of categories to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSchema {
    pub kind: SchemaKind,
    categories: Vec<SkillCategory>,
}

impl SkillSchema {
    #[must_use]
    pub fn technical() -> Self {
        Self {
            kind: SchemaKind::Technical,
            categories: vec![
                SkillCategory::new("languages", "Languages"),
                SkillCategory::new("frameworks", "Frameworks"),
                SkillCategory::new("developerTools", "Developer Tools"),
                SkillCategory::new("libraries", "Libraries"),
            ],
        }
    }

    #[must_use]
    pub fn grouped() -> Self {
        Self {
            kind: SchemaKind::Grouped,
            categories: vec![
                SkillCategory::new("languages", "Languages"),
                SkillCategory::new("frameworksAndLibraries", "Frameworks & Libraries"),
                SkillCategory::new("toolsAndPlatforms", "Tools & Platforms"),
            ],
        }
    }

    #[must_use]
    pub fn custom(specs: &[CategorySpec]) -> Self {
        let categories = specs
            .iter()
            .map(|category| {
                let key = category
                    .key
                    .clone()
                    .unwrap_or_else(|| derive_key(&category.label));
                SkillCategory::new(key, category.label.clone())
            })
            .collect();
        Self {
            kind: SchemaKind::Custom,
            categories,
        }
    }

    #[must_use]
    pub fn from_kind(kind: SchemaKind, specs: &[CategorySpec]) -> Self {
        match kind {
            SchemaKind::Technical => Self::technical(),
            SchemaKind::Grouped => Self::grouped(),
            SchemaKind::Custom => Self::custom(specs),
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }
}

impl Default for SkillSchema {
    fn default() -> Self {
        Self::grouped()
    }
}

/// Category key to skill names, serialized as a JSON object in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(IndexMap<String, Vec<String>>);

impl SkillSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category. A key that is already present keeps its first value.
    pub fn insert(&mut self, key: impl Into<String>, skills: Vec<String>) -> bool {
        match self.0.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(skills);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Key for a label without an explicit one: lowercased, whitespace removed.
#[must_use]
pub fn derive_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Comparison form of a label: lowercase alphanumerics, `&` spelled as "and".
fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
