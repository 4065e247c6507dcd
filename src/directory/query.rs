//! Pure query operations over topics.
//!
//! Every function borrows its input and returns a new `Vec<&Topic>`; the
//! catalog is never touched. Callers re-run these against the full catalog
//! on every query change rather than against a previous result.

use std::collections::HashMap;

use crate::catalog::Topic;

/// Label of the trailing group for topics outside the configured order.
pub const DEFAULT_OTHER_LABEL: &str = "Other";

/// Which categories a query admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Identity filter.
    All,
    /// Exact match against `Topic::category`.
    Only(String),
}

impl CategoryFilter {
    /// `all_label` (e.g. `"All"`) maps to `All`; anything else to `Only`.
    pub fn parse(value: &str, all_label: &str) -> Self {
        if value == all_label {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    fn admits(&self, topic: &Topic) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => topic.category.as_deref() == Some(category.as_str()),
        }
    }
}

/// A display group: one category and its topics in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub name: String,
    pub topics: Vec<&'a Topic>,
}

/// Ascending by `order`. Equal keys keep their input order.
pub fn sort_by_order<'a, I>(topics: I) -> Vec<&'a Topic>
where
    I: IntoIterator<Item = &'a Topic>,
{
    let mut sorted: Vec<&Topic> = topics.into_iter().collect();
    // slice::sort_by_key is stable
    sorted.sort_by_key(|t| t.order);
    sorted
}

/// Case-insensitive substring match on title, subtitle or description.
///
/// An empty query matches everything.
pub fn filter_by_text<'a, I>(topics: I, query: &str) -> Vec<&'a Topic>
where
    I: IntoIterator<Item = &'a Topic>,
{
    let needle = query.to_lowercase();
    topics
        .into_iter()
        .filter(|t| matches_text(t, &needle))
        .collect()
}

pub fn filter_by_category<'a, I>(topics: I, category: &CategoryFilter) -> Vec<&'a Topic>
where
    I: IntoIterator<Item = &'a Topic>,
{
    topics.into_iter().filter(|t| category.admits(t)).collect()
}

/// Text AND category.
pub fn combined_filter<'a, I>(topics: I, query: &str, category: &CategoryFilter) -> Vec<&'a Topic>
where
    I: IntoIterator<Item = &'a Topic>,
{
    let needle = query.to_lowercase();
    topics
        .into_iter()
        .filter(|t| category.admits(t) && matches_text(t, &needle))
        .collect()
}

/// Groups topics in `category_order` order with a trailing `"Other"` group.
pub fn group_by_category<'a, I>(topics: I, category_order: &[String]) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Topic>,
{
    group_by_category_as(topics, category_order, DEFAULT_OTHER_LABEL)
}

/// Partitions topics by category.
///
/// Groups follow `category_order`; topics whose category is absent from it
/// (or unset) land in a trailing group named `other_label`. Intra-group order
/// is the input order. Empty groups are dropped. Repeated entries in
/// `category_order` only count once, so no topic is emitted twice.
pub fn group_by_category_as<'a, I>(
    topics: I,
    category_order: &[String],
    other_label: &str,
) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Topic>,
{
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(category_order.len());
    let mut names: Vec<&str> = Vec::with_capacity(category_order.len());
    for category in category_order {
        if !slots.contains_key(category.as_str()) {
            slots.insert(category.as_str(), names.len());
            names.push(category.as_str());
        }
    }

    let other_slot = names.len();
    let mut buckets: Vec<Vec<&Topic>> = vec![Vec::new(); names.len() + 1];
    for topic in topics {
        let slot = topic
            .category
            .as_deref()
            .and_then(|c| slots.get(c).copied())
            .unwrap_or(other_slot);
        buckets[slot].push(topic);
    }

    buckets
        .into_iter()
        .enumerate()
        .filter(|(_, members)| !members.is_empty())
        .map(|(slot, members)| CategoryGroup {
            name: names.get(slot).copied().unwrap_or(other_label).to_string(),
            topics: members,
        })
        .collect()
}

/// `needle` must already be lowercased.
fn matches_text(topic: &Topic, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&topic.title, &topic.subtitle, &topic.description]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{described, topic};

    fn ids(topics: &[&Topic]) -> Vec<String> {
        topics.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_sort_by_order_ascending() {
        let topics = vec![topic("a", 2, Some("Quran")), topic("b", 1, Some("Quran"))];
        assert_eq!(ids(&sort_by_order(&topics)), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_by_order_is_stable() {
        let topics = vec![
            topic("x", 5, None),
            topic("a", 1, None),
            topic("y", 5, None),
            topic("z", 5, None),
            topic("b", 1, None),
        ];
        assert_eq!(ids(&sort_by_order(&topics)), vec!["a", "b", "x", "y", "z"]);
    }

    #[test]
    fn test_sort_handles_negative_orders() {
        let topics = vec![topic("a", 0, None), topic("b", -3, None)];
        assert_eq!(ids(&sort_by_order(&topics)), vec!["b", "a"]);
    }

    #[test]
    fn test_filter_by_text_is_case_insensitive() {
        let topics = vec![described("t", "Tajweed Rules", "", "")];
        assert_eq!(filter_by_text(&topics, "tajweed").len(), 1);
        assert_eq!(filter_by_text(&topics, "RULES").len(), 1);
        assert_eq!(filter_by_text(&topics, "jweed ru").len(), 1);
    }

    #[test]
    fn test_filter_by_text_checks_each_field() {
        let topics = vec![
            described("title", "Jannah", "", ""),
            described("subtitle", "", "Journey", ""),
            described("description", "", "", "A long journey"),
            described("none", "Hadith", "Sayings", "Selected"),
        ];
        assert_eq!(
            ids(&filter_by_text(&topics, "journey")),
            vec!["subtitle", "description"]
        );
    }

    #[test]
    fn test_filter_by_text_empty_query_is_identity() {
        let topics = vec![topic("b", 2, None), topic("a", 1, None)];
        assert_eq!(ids(&filter_by_text(&topics, "")), vec!["b", "a"]);
    }

    #[test]
    fn test_filter_by_text_no_tokenization() {
        // words out of order are not a substring
        let topics = vec![described("t", "Tajweed Rules", "", "")];
        assert!(filter_by_text(&topics, "rules tajweed").is_empty());
    }

    #[test]
    fn test_filter_by_text_matches_urdu() {
        let topics = vec![described("t", "تجوید القرآن", "", "")];
        assert_eq!(filter_by_text(&topics, "تجوید").len(), 1);
    }

    #[test]
    fn test_filter_by_category() {
        let topics = vec![
            topic("a", 1, Some("Quran")),
            topic("b", 2, Some("Hadith")),
            topic("c", 3, None),
        ];
        assert_eq!(ids(&filter_by_category(&topics, &CategoryFilter::All)), vec!["a", "b", "c"]);
        assert_eq!(
            ids(&filter_by_category(&topics, &CategoryFilter::Only("Hadith".into()))),
            vec!["b"]
        );
        // exact equality, not case-insensitive
        assert!(filter_by_category(&topics, &CategoryFilter::Only("hadith".into())).is_empty());
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("All", "All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Quran", "All"),
            CategoryFilter::Only("Quran".to_string())
        );
        assert_eq!(CategoryFilter::parse("سب", "سب"), CategoryFilter::All);
    }

    #[test]
    fn test_combined_filter_requires_both() {
        let mut quran = described("a", "Tajweed Rules", "", "");
        quran.category = Some("Quran".into());
        let mut hadith = described("b", "Tajweed in Hadith", "", "");
        hadith.category = Some("Hadith".into());
        let topics = vec![quran, hadith];

        let only_quran = CategoryFilter::Only("Quran".into());
        assert_eq!(ids(&combined_filter(&topics, "tajweed", &only_quran)), vec!["a"]);
        assert!(combined_filter(&topics, "jannah", &only_quran).is_empty());
        assert_eq!(
            combined_filter(&topics, "tajweed", &CategoryFilter::All),
            filter_by_text(&topics, "tajweed")
        );
    }

    #[test]
    fn test_group_by_category_follows_configured_order() {
        let topics = vec![
            topic("h1", 1, Some("Hadith")),
            topic("q1", 2, Some("Quran")),
            topic("h2", 3, Some("Hadith")),
        ];
        let order = vec!["Quran".to_string(), "Hadith".to_string()];
        let groups = group_by_category(&topics, &order);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Quran");
        assert_eq!(ids(&groups[0].topics), vec!["q1"]);
        assert_eq!(groups[1].name, "Hadith");
        assert_eq!(ids(&groups[1].topics), vec!["h1", "h2"]);
    }

    #[test]
    fn test_group_by_category_trailing_other() {
        let topics = vec![
            topic("x", 1, Some("Fiqh")),
            topic("q", 2, Some("Quran")),
            topic("n", 3, None),
        ];
        let order = vec!["Quran".to_string()];
        let groups = group_by_category(&topics, &order);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].name, DEFAULT_OTHER_LABEL);
        assert_eq!(ids(&groups[1].topics), vec!["x", "n"]);
    }

    #[test]
    fn test_group_by_category_drops_empty_groups() {
        let topics = vec![topic("q", 1, Some("Quran"))];
        let order = vec!["Hadith".to_string(), "Quran".to_string(), "Islamic History".to_string()];
        let groups = group_by_category(&topics, &order);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Quran");
    }

    #[test]
    fn test_group_by_category_empty_input() {
        let order = vec!["Quran".to_string()];
        assert!(group_by_category(Vec::<&Topic>::new(), &order).is_empty());
    }

    #[test]
    fn test_group_by_category_repeated_order_entry() {
        let topics = vec![topic("q", 1, Some("Quran"))];
        let order = vec!["Quran".to_string(), "Quran".to_string()];
        let groups = group_by_category(&topics, &order);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].topics.len(), 1);
    }

    #[test]
    fn test_group_by_category_custom_other_label() {
        let topics = vec![topic("n", 1, None)];
        let groups = group_by_category_as(&topics, &[], "دیگر");
        assert_eq!(groups[0].name, "دیگر");
    }

    #[test]
    fn test_group_union_equals_input() {
        let topics = vec![
            topic("a", 1, Some("Quran")),
            topic("b", 2, Some("Fiqh")),
            topic("c", 3, Some("Hadith")),
            topic("d", 4, None),
            topic("e", 5, Some("Quran")),
        ];
        let order = vec!["Hadith".to_string(), "Quran".to_string()];
        let groups = group_by_category(&topics, &order);

        let mut seen: Vec<String> = groups
            .iter()
            .flat_map(|g| g.topics.iter().map(|t| t.id.clone()))
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
        assert!(groups.iter().all(|g| !g.topics.is_empty()));
    }
}
