use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single entry in the topic directory.
///
/// Topics are created once when the catalog loads and never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    /// Symbolic icon key, resolved through an `IconRegistry`.
    #[serde(default)]
    pub icon: String,
    /// Navigation target. Opaque to this crate.
    pub route: String,
    pub order: i64,
    /// `None` puts the topic in the trailing uncategorized group.
    #[serde(default)]
    pub category: Option<String>,
}

/// The document shape of a catalog file (`topics-list.json`).
#[derive(Deserialize, Debug)]
struct CatalogDocument {
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    topics: Vec<Topic>,
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Two topics share an `id`.
    DuplicateId(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog I/O error: {e}"),
            CatalogError::Parse(e) => write!(f, "catalog parse error: {e}"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate topic id: {id}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The immutable, loaded-once set of topics plus the directory header.
#[derive(Debug, Clone)]
pub struct Catalog {
    title: String,
    subtitle: String,
    description: String,
    categories: Option<Vec<String>>,
    topics: Vec<Topic>,
}

impl Catalog {
    /// Builds a catalog from topics in their original catalog position.
    ///
    /// Rejects duplicate ids.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        description: impl Into<String>,
        topics: Vec<Topic>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for topic in &topics {
            if !seen.insert(topic.id.as_str()) {
                return Err(CatalogError::DuplicateId(topic.id.clone()));
            }
        }

        Ok(Self {
            title: title.into(),
            subtitle: subtitle.into(),
            description: description.into(),
            categories: None,
            topics,
        })
    }

    /// Parses a catalog from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json).map_err(CatalogError::Parse)?;
        let mut catalog = Catalog::new(doc.title, doc.subtitle, doc.description, doc.topics)?;
        catalog.categories = doc.categories;
        Ok(catalog)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category display order shipped with the catalog document, if any.
    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    /// Topics in original catalog position (not sorted).
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// The topic that follows `id` in display (`order`) order.
    ///
    /// `None` for the last topic or an unknown id. Sorts the whole catalog on
    /// each call, O(n log n).
    pub fn next_topic(&self, id: &str) -> Option<&Topic> {
        let sorted = crate::directory::sort_by_order(&self.topics);
        let pos = sorted.iter().position(|t| t.id == id)?;
        sorted.get(pos + 1).copied()
    }

    /// Configured categories that no topic references.
    pub fn unused_categories<'a>(&self, category_order: &'a [String]) -> Vec<&'a str> {
        category_order
            .iter()
            .filter(|c| !self.topics.iter().any(|t| t.category.as_ref() == Some(*c)))
            .map(|c| c.as_str())
            .collect()
    }
}
