//! # Directory Engine
//!
//! Turns the catalog into what the directory screen shows: sorted by
//! `order`, filtered by search text and category, grouped by category.
//!
//! ```text
//! Catalog ──► sort_by_order ──► combined_filter(query, category) ──► group_by_category
//!                                                                        │
//!                                                   Groups | NoMatches | EmptyCatalog
//! ```
//!
//! Everything here is a pure function of its inputs, cheap enough to run on
//! every keystroke.

pub mod engine;
pub mod query;

pub use engine::{DEFAULT_ALL_LABEL, DirectoryConfig, DirectoryEngine, DirectoryView};
pub use query::{
    CategoryFilter, CategoryGroup, DEFAULT_OTHER_LABEL, combined_filter, filter_by_category,
    filter_by_text, group_by_category, group_by_category_as, sort_by_order,
};
