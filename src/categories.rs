use crate::filter::ALL_CATEGORY;
use crate::manifest::GalleryItem;
use crate::view::Chip;
use std::collections::HashSet;

/// Distinct categories found in the manifest plus the reserved placeholder.
///
/// The placeholder marks content that is not published yet. It is treated as
/// a sentinel: selecting it always shows the coming-soon notice, even if some
/// manifest item happens to use the same label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<String>,
    placeholder: String,
}

impl CategoryIndex {
    /// Categories appear in first-seen order; the placeholder is appended last
    /// unless the manifest already used it.
    pub fn build(items: &[GalleryItem], placeholder: &str) -> Self {
        let mut seen = HashSet::new();
        let mut categories: Vec<String> = items
            .iter()
            .filter(|item| seen.insert(item.category.as_str()))
            .map(|item| item.category.clone())
            .collect();

        if !categories.iter().any(|c| c == placeholder) {
            categories.push(placeholder.to_string());
        }

        Self {
            categories,
            placeholder: placeholder.to_string(),
        }
    }

    #[cfg(test)]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_placeholder(&self, label: &str) -> bool {
        label == self.placeholder
    }

    /// Chip bar labels: "All" followed by every category, without duplicates.
    pub fn chip_labels(&self) -> Vec<&str> {
        std::iter::once(ALL_CATEGORY)
            .chain(
                self.categories
                    .iter()
                    .map(String::as_str)
                    .filter(|c| *c != ALL_CATEGORY),
            )
            .collect()
    }

    pub fn chips(&self, active: &str) -> Vec<Chip> {
        self.chip_labels()
            .into_iter()
            .map(|label| Chip {
                label: label.to_string(),
                active: label == active,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str) -> GalleryItem {
        GalleryItem {
            category: category.to_string(),
            title: None,
            file: format!("{category}.jpg"),
        }
    }

    #[test]
    fn test_build_dedups_and_appends_placeholder() {
        let items = vec![item("B"), item("A"), item("B"), item("C"), item("A")];
        let index = CategoryIndex::build(&items, "Soon");
        assert_eq!(index.categories(), &["B", "A", "C", "Soon"]);
        assert!(index.is_placeholder("Soon"));
        assert!(!index.is_placeholder("A"));
    }

    #[test]
    fn test_placeholder_present_for_empty_manifest() {
        let index = CategoryIndex::build(&[], "Soon");
        assert_eq!(index.categories(), &["Soon"]);
        assert_eq!(index.chip_labels(), vec![ALL_CATEGORY, "Soon"]);
    }

    #[test]
    fn test_placeholder_not_duplicated_when_used_by_data() {
        let items = vec![item("Soon"), item("A")];
        let index = CategoryIndex::build(&items, "Soon");
        assert_eq!(index.categories(), &["Soon", "A"]);
    }

    #[test]
    fn test_chips_mark_only_active_label() {
        let items = vec![item("A"), item("B")];
        let index = CategoryIndex::build(&items, "Soon");
        let chips = index.chips("A");
        let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec![ALL_CATEGORY, "A", "B", "Soon"]);
        let active: Vec<&str> = chips
            .iter()
            .filter(|c| c.active)
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(active, vec!["A"]);
    }

    #[test]
    fn test_all_category_in_data_yields_single_chip() {
        let items = vec![item(ALL_CATEGORY), item("A")];
        let index = CategoryIndex::build(&items, "Soon");
        assert_eq!(index.chip_labels(), vec![ALL_CATEGORY, "A", "Soon"]);
    }
}
