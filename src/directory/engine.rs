use log::debug;

use crate::catalog::{Catalog, Topic};
use crate::directory::query::{
    CategoryFilter, CategoryGroup, DEFAULT_OTHER_LABEL, combined_filter, group_by_category_as,
    sort_by_order,
};

pub const DEFAULT_ALL_LABEL: &str = "All";

/// Category display order and sentinel labels, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub category_order: Vec<String>,
    pub all_label: String,
    pub other_label: String,
}

impl DirectoryConfig {
    pub fn new(category_order: Vec<String>) -> Self {
        Self {
            category_order,
            all_label: DEFAULT_ALL_LABEL.to_string(),
            other_label: DEFAULT_OTHER_LABEL.to_string(),
        }
    }
}

/// What the renderer should draw for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryView<'a> {
    /// At least one group with at least one topic.
    Groups(Vec<CategoryGroup<'a>>),
    /// The catalog has topics but none pass the active filter.
    NoMatches,
    /// The catalog itself has no topics.
    EmptyCatalog,
    /// No category order is configured, so nothing can be grouped for display.
    NoCategories,
}

impl<'a> DirectoryView<'a> {
    pub fn groups(&self) -> &[CategoryGroup<'a>] {
        match self {
            DirectoryView::Groups(groups) => groups,
            _ => &[],
        }
    }

    /// True for every variant except `Groups`.
    pub fn is_empty(&self) -> bool {
        !matches!(self, DirectoryView::Groups(_))
    }

    pub fn topic_count(&self) -> usize {
        self.groups().iter().map(|g| g.topics.len()).sum()
    }
}

/// Sort, filter and group over a catalog, with the category order passed in
/// rather than read from globals. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct DirectoryEngine {
    config: DirectoryConfig,
}

impl DirectoryEngine {
    pub fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Labels for a category picker: the "All" sentinel, then the configured order.
    pub fn category_labels(&self) -> Vec<&str> {
        std::iter::once(self.config.all_label.as_str())
            .chain(self.config.category_order.iter().map(String::as_str))
            .collect()
    }

    /// Topics passing `query` AND `category`, sorted by `order`, ungrouped.
    pub fn filtered<'a>(&self, catalog: &'a Catalog, query: &str, category: &str) -> Vec<&'a Topic> {
        let filter = CategoryFilter::parse(category, &self.config.all_label);
        combined_filter(sort_by_order(catalog.topics()), query, &filter)
    }

    /// Recomputes the grouped view from the full catalog.
    pub fn view<'a>(&self, catalog: &'a Catalog, query: &str, category: &str) -> DirectoryView<'a> {
        if catalog.is_empty() {
            return DirectoryView::EmptyCatalog;
        }
        if self.config.category_order.is_empty() {
            debug!("directory view: no categories configured");
            return DirectoryView::NoCategories;
        }

        let matching = self.filtered(catalog, query, category);
        let groups = group_by_category_as(
            matching,
            &self.config.category_order,
            &self.config.other_label,
        );
        debug!(
            "directory view: query={:?} category={:?} groups={}",
            query,
            category,
            groups.len()
        );

        if groups.is_empty() {
            DirectoryView::NoMatches
        } else {
            DirectoryView::Groups(groups)
        }
    }
}
