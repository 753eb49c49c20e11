use crate::manifest::GalleryItem;

/// One filter chip in the chip bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    pub active: bool,
}

/// A grid entry. `index` is the card's position in the filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub index: usize,
    pub thumb_src: String,
    pub alt: String,
    pub aria_label: String,
    pub title: String,
    pub category: String,
}

impl Card {
    pub fn new(index: usize, item: &GalleryItem, assets: &AssetPaths) -> Self {
        Self {
            index,
            thumb_src: assets.thumb(&item.file),
            alt: item.label().to_string(),
            aria_label: format!("View {} photo", item.category),
            title: item.title().to_string(),
            category: item.category.clone(),
        }
    }
}

/// Contents of the open lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub index: usize,
    pub total: usize,
    pub src: String,
    pub alt: String,
    pub title: String,
    pub caption: String,
}

impl Slide {
    pub fn new(index: usize, total: usize, item: &GalleryItem, assets: &AssetPaths) -> Self {
        Self {
            index,
            total,
            src: assets.full(&item.file),
            alt: item.label().to_string(),
            title: item.title().to_string(),
            caption: item.category.clone(),
        }
    }
}

/// Which empty-state message the notice area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ComingSoon,
    NoMatches,
    LoadFailed,
}

/// Relative directories for thumbnails and full-resolution images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub thumb_dir: String,
    pub full_dir: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            thumb_dir: "images/thumb".to_string(),
            full_dir: "images/full".to_string(),
        }
    }
}

impl AssetPaths {
    /// `file` is used verbatim.
    pub fn thumb(&self, file: &str) -> String {
        format!("{}/{}", self.thumb_dir.trim_end_matches('/'), file)
    }

    pub fn full(&self, file: &str) -> String {
        format!("{}/{}", self.full_dir.trim_end_matches('/'), file)
    }
}

/// Rendering surface driven by [`crate::gallery::Gallery`].
///
/// Implementations only populate or clear their regions; all filtering and
/// index math happens before these calls.
pub trait GalleryView {
    fn render_chips(&mut self, chips: &[Chip]);
    fn render_grid(&mut self, cards: &[Card]);
    fn show_notice(&mut self, notice: Notice, text: &str);
    fn hide_notice(&mut self);
    /// Reveal the overlay and suspend page scrolling.
    fn open_overlay(&mut self, slide: &Slide);
    /// Hide the overlay, drop the image source and restore page scrolling.
    fn close_overlay(&mut self);
}
