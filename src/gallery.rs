use crate::categories::CategoryIndex;
use crate::config::Labels;
use crate::filter::FilterState;
use crate::lightbox::LightboxState;
use crate::manifest::{GalleryItem, Manifest};
use crate::view::{AssetPaths, Card, GalleryView, Notice, Slide};

/// Owns all gallery state and drives a [`GalleryView`].
pub struct Gallery {
    manifest: Manifest,
    categories: CategoryIndex,
    filter: FilterState,
    // Manifest positions of the last render's filtered list.
    filtered: Vec<usize>,
    lightbox: LightboxState,
    assets: AssetPaths,
    labels: Labels,
}

impl Gallery {
    pub fn new(manifest: Manifest, labels: Labels, assets: AssetPaths) -> Self {
        let categories = CategoryIndex::build(manifest.items(), &labels.placeholder);
        let filter = FilterState::default();
        let filtered = filter.filtered_positions(manifest.items());
        Self {
            manifest,
            categories,
            filter,
            filtered,
            lightbox: LightboxState::Closed,
            assets,
            labels,
        }
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[cfg(test)]
    pub fn lightbox(&self) -> LightboxState {
        self.lightbox
    }

    #[cfg(test)]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn placeholder_active(&self) -> bool {
        self.categories.is_placeholder(self.filter.active_category())
    }

    /// Items of the filtered list, in display order.
    pub fn filtered_items(&self) -> impl Iterator<Item = &GalleryItem> {
        self.filtered.iter().filter_map(|&pos| self.manifest.get(pos))
    }

    #[cfg(test)]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    fn filtered_item(&self, index: usize) -> Option<&GalleryItem> {
        self.filtered.get(index).and_then(|&pos| self.manifest.get(pos))
    }

    /// Notice the current filter calls for, if any.
    pub fn notice(&self) -> Option<Notice> {
        if self.placeholder_active() {
            Some(Notice::ComingSoon)
        } else if self.filtered.is_empty() {
            Some(Notice::NoMatches)
        } else {
            None
        }
    }

    /// Cards for the grid. Empty while the placeholder category is active.
    pub fn cards(&self) -> Vec<Card> {
        if self.placeholder_active() {
            return Vec::new();
        }
        self.filtered_items()
            .enumerate()
            .map(|(index, item)| Card::new(index, item, &self.assets))
            .collect()
    }

    pub fn slide(&self) -> Option<Slide> {
        let index = self.lightbox.index()?;
        let item = self.filtered_item(index)?;
        Some(Slide::new(index, self.filtered.len(), item, &self.assets))
    }

    /// Set the active category and re-render. The query is kept.
    pub fn select_category(&mut self, label: &str, view: &mut dyn GalleryView) {
        tracing::debug!(category = label, "category selected");
        self.filter.select_category(label);
        self.render(view);
    }

    /// Set the query from raw search box input and re-render.
    pub fn set_query(&mut self, input: &str, view: &mut dyn GalleryView) {
        self.filter.set_query(input);
        tracing::trace!(query = self.filter.query(), "query changed");
        self.render(view);
    }

    /// Full render pass: chips, filtered list, notice, grid.
    pub fn render(&mut self, view: &mut dyn GalleryView) {
        view.render_chips(&self.categories.chips(self.filter.active_category()));

        self.filtered = self.filter.filtered_positions(self.manifest.items());

        match self.notice() {
            Some(notice) => view.show_notice(notice, self.labels.notice(notice)),
            None => view.hide_notice(),
        }

        let cards = self.cards();
        view.render_grid(&cards);

        // An open lightbox must keep pointing into the new list.
        if let Some(index) = self.lightbox.index() {
            if index < cards.len() {
                self.show_slide(view);
            } else {
                self.close_lightbox(view);
            }
        }

        tracing::debug!(
            category = self.filter.active_category(),
            query = self.filter.query(),
            visible = cards.len(),
            "rendered"
        );
    }

    /// Card activation. No-op unless `index` addresses a rendered card.
    pub fn open_lightbox(&mut self, index: usize, view: &mut dyn GalleryView) -> bool {
        let visible = if self.placeholder_active() { 0 } else { self.filtered.len() };
        if !self.lightbox.open(index, visible) {
            return false;
        }
        self.show_slide(view);
        true
    }

    /// Move by `delta` with wraparound. No-op when closed or the list is empty.
    pub fn navigate(&mut self, delta: isize, view: &mut dyn GalleryView) -> bool {
        if self.lightbox.navigate(delta, self.filtered.len()).is_none() {
            return false;
        }
        self.show_slide(view);
        true
    }

    pub fn close_lightbox(&mut self, view: &mut dyn GalleryView) -> bool {
        if !self.lightbox.close() {
            return false;
        }
        view.close_overlay();
        true
    }

    fn show_slide(&self, view: &mut dyn GalleryView) {
        if let Some(slide) = self.slide() {
            tracing::debug!(index = slide.index, src = %slide.src, "lightbox showing");
            view.open_overlay(&slide);
        }
    }
}
