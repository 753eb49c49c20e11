use crate::manifest::GalleryItem;

/// Chip label that disables category filtering.
pub const ALL_CATEGORY: &str = "All";

/// Whether `item` belongs in the filtered list for the given category and query.
///
/// The query is trimmed and compared case-insensitively against the item's
/// category, title and file name; a missing title counts as empty.
pub fn passes(item: &GalleryItem, active_category: &str, query: &str) -> bool {
    let in_category = active_category == ALL_CATEGORY || item.category == active_category;
    if !in_category {
        return false;
    }

    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [item.category.as_str(), item.title(), item.file.as_str()]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Active category chip and search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    active_category: String,
    query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORY.to_string(),
            query: String::new(),
        }
    }
}

impl FilterState {
    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Leaves the query untouched.
    pub fn select_category(&mut self, label: &str) {
        self.active_category = label.to_string();
    }

    /// Store the trimmed search box contents.
    pub fn set_query(&mut self, input: &str) {
        self.query = input.trim().to_string();
    }

    pub fn matches(&self, item: &GalleryItem) -> bool {
        passes(item, &self.active_category, &self.query)
    }

    /// Manifest positions of matching items, in manifest order.
    pub fn filtered_positions(&self, items: &[GalleryItem]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(category: &str, title: Option<&str>, file: &str) -> GalleryItem {
        GalleryItem {
            category: category.to_string(),
            title: title.map(str::to_string),
            file: file.to_string(),
        }
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let dock = item("Dock", Some("Front"), "a.jpg");
        assert!(passes(&dock, ALL_CATEGORY, "FRONT"));
        assert!(passes(&dock, ALL_CATEGORY, "dOcK"));
        assert!(passes(&dock, ALL_CATEGORY, ".JPG"));
        assert!(!passes(&dock, ALL_CATEGORY, "rear"));
    }

    #[test]
    fn test_query_is_trimmed() {
        let dock = item("Dock", Some("Front"), "a.jpg");
        assert!(passes(&dock, ALL_CATEGORY, "  front  "));
        assert!(passes(&dock, ALL_CATEGORY, "   "));
    }

    #[test]
    fn test_missing_title_is_empty() {
        let untitled = item("Dock", None, "a.jpg");
        assert!(passes(&untitled, ALL_CATEGORY, "dock"));
        assert!(!passes(&untitled, ALL_CATEGORY, "front"));
    }

    #[test]
    fn test_category_must_match_exactly() {
        let dock = item("Dock", Some("Front"), "a.jpg");
        assert!(passes(&dock, "Dock", ""));
        assert!(!passes(&dock, "dock", ""));
        assert!(!passes(&dock, "Yard", "front"));
    }

    #[test]
    fn test_filter_state_transitions() {
        let mut state = FilterState::default();
        assert_eq!(state.active_category(), ALL_CATEGORY);
        assert_eq!(state.query(), "");

        state.set_query("  crane ");
        assert_eq!(state.query(), "crane");

        state.select_category("Yard");
        assert_eq!(state.active_category(), "Yard");
        assert_eq!(state.query(), "crane");
    }

    #[test]
    fn test_filtered_positions_keep_manifest_order() {
        let items = vec![
            item("A", Some("One"), "1.jpg"),
            item("B", None, "2.jpg"),
            item("A", Some("Three"), "3.jpg"),
        ];
        let mut state = FilterState::default();
        assert_eq!(state.filtered_positions(&items), vec![0, 1, 2]);

        state.select_category("A");
        assert_eq!(state.filtered_positions(&items), vec![0, 2]);

        state.set_query("three");
        assert_eq!(state.filtered_positions(&items), vec![2]);
    }

    fn arb_item() -> impl Strategy<Value = GalleryItem> {
        (
            "[A-Za-z ]{0,8}",
            proptest::option::of("[A-Za-z0-9 <>&]{0,12}"),
            "[a-z0-9_]{1,8}\\.jpg",
        )
            .prop_map(|(category, title, file)| GalleryItem {
                category,
                title,
                file,
            })
    }

    proptest! {
        #[test]
        fn all_with_empty_query_passes_everything(it in arb_item()) {
            prop_assert!(passes(&it, ALL_CATEGORY, ""));
        }

        #[test]
        fn category_filter_implies_equal_category(
            it in arb_item(),
            category in "[A-Za-z ]{0,8}",
            query in "[A-Za-z]{0,3}",
        ) {
            prop_assume!(category != ALL_CATEGORY);
            if passes(&it, &category, &query) {
                prop_assert_eq!(&it.category, &category);
            }
        }

        #[test]
        fn query_case_does_not_matter(it in arb_item(), query in "[A-Za-z]{0,4}") {
            prop_assert_eq!(
                passes(&it, ALL_CATEGORY, &query.to_uppercase()),
                passes(&it, ALL_CATEGORY, &query.to_lowercase())
            );
        }
    }
}
