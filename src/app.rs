use crate::config::GalleryConfig;
use crate::gallery::Gallery;
use crate::manifest::{self, SiteRoot};
use crate::view::{Card, Chip, GalleryView, Notice, Slide};
use ratatui::layout::Rect;
use std::path::PathBuf;

/// Which part of the main screen receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Chips,
    Grid,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Chips => Self::Grid,
            Self::Grid => Self::Chips,
        }
    }
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Terminal copy of every gallery region, filled in through [`GalleryView`].
#[derive(Debug, Default)]
pub struct Screen {
    pub chips: Vec<Chip>,
    pub cards: Vec<Card>,
    pub notice: Option<(Notice, String)>,
    pub slide: Option<Slide>,
    /// Grid scrolling is suspended while the lightbox is up.
    pub scroll_locked: bool,
}

impl GalleryView for Screen {
    fn render_chips(&mut self, chips: &[Chip]) {
        self.chips = chips.to_vec();
    }

    fn render_grid(&mut self, cards: &[Card]) {
        self.cards = cards.to_vec();
    }

    fn show_notice(&mut self, notice: Notice, text: &str) {
        self.notice = Some((notice, text.to_string()));
    }

    fn hide_notice(&mut self) {
        self.notice = None;
    }

    fn open_overlay(&mut self, slide: &Slide) {
        self.slide = Some(slide.clone());
        self.scroll_locked = true;
    }

    fn close_overlay(&mut self) {
        self.slide = None;
        self.scroll_locked = false;
    }
}

/// Main application state.
pub struct App {
    /// `None` when the manifest failed to load; only the notice is shown then.
    pub gallery: Option<Gallery>,
    pub screen: Screen,
    pub site: SiteRoot,
    pub should_quit: bool,
    pub show_help: bool,
    pub input_mode: InputMode,
    pub focus: Focus,

    pub search: String,
    pub chip_selected: usize,
    pub card_selected: usize,

    /// Last known terminal area, used for grid geometry and mouse hit testing.
    pub area: Rect,

    pub status_msg: String,
}

impl App {
    pub fn new(mut gallery: Gallery, site: SiteRoot) -> Self {
        let mut screen = Screen::default();
        gallery.render(&mut screen);
        let mut app = Self::with_screen(Some(gallery), screen, site);
        app.sync_selection();
        app
    }

    /// Load the configured manifest once. Any failure becomes the fixed
    /// load-failure notice; the detail only goes to the log.
    pub async fn load(config: &GalleryConfig) -> Self {
        match manifest::open(&config.source, config.site_root.as_deref()).await {
            Ok((manifest, site)) => {
                let gallery = Gallery::new(manifest, config.labels.clone(), config.asset_paths());
                Self::new(gallery, site)
            }
            Err(e) => {
                tracing::error!(source = %config.source, error = %e, "{}", e.user_message());
                Self::failed(&config.labels.load_failed)
            }
        }
    }

    /// App for a failed load: no chips, no grid, just the fixed notice.
    pub fn failed(notice: &str) -> Self {
        let screen = Screen {
            notice: Some((Notice::LoadFailed, notice.to_string())),
            ..Screen::default()
        };
        let mut app = Self::with_screen(None, screen, SiteRoot::Dir(PathBuf::from(".")));
        app.status_msg = "Press q to quit".to_string();
        app
    }

    fn with_screen(gallery: Option<Gallery>, screen: Screen, site: SiteRoot) -> Self {
        Self {
            gallery,
            screen,
            site,
            should_quit: false,
            show_help: false,
            input_mode: InputMode::Normal,
            focus: Focus::Grid,
            search: String::new(),
            chip_selected: 0,
            card_selected: 0,
            area: Rect::new(0, 0, 80, 24),
            status_msg: String::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.gallery.is_some()
    }

    pub fn overlay_open(&self) -> bool {
        self.screen.slide.is_some()
    }

    pub fn update_area(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
    }

    /// Keep cursors inside the freshly rendered regions and refresh the status line.
    fn sync_selection(&mut self) {
        if let Some(active) = self.screen.chips.iter().position(|c| c.active) {
            self.chip_selected = active;
        }
        self.card_selected = self
            .card_selected
            .min(self.screen.cards.len().saturating_sub(1));

        if let Some(gallery) = &self.gallery {
            let filter = gallery.filter();
            self.status_msg = format!(
                "{} photos in \"{}\"{}",
                self.screen.cards.len(),
                filter.active_category(),
                if filter.query().is_empty() {
                    String::new()
                } else {
                    format!(" matching \"{}\"", filter.query())
                }
            );
        }
    }

    // ── Chips ──

    pub fn chip_next(&mut self) {
        if self.chip_selected + 1 < self.screen.chips.len() {
            self.chip_selected += 1;
        }
    }

    pub fn chip_prev(&mut self) {
        self.chip_selected = self.chip_selected.saturating_sub(1);
    }

    /// Make the chip at `index` the active category.
    pub fn select_chip(&mut self, index: usize) {
        let Some(label) = self.screen.chips.get(index).map(|c| c.label.clone()) else {
            return;
        };
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.select_category(&label, &mut self.screen);
            self.card_selected = 0;
            self.sync_selection();
        }
    }

    pub fn activate_selected_chip(&mut self) {
        self.select_chip(self.chip_selected);
    }

    // ── Search ──

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.apply_search();
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.apply_search();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.apply_search();
    }

    /// Every keystroke re-renders; there is no debounce.
    fn apply_search(&mut self) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.set_query(&self.search, &mut self.screen);
            self.card_selected = 0;
            self.sync_selection();
        }
    }

    // ── Grid ──

    /// Move the card cursor by `delta`, clamped to the grid.
    pub fn card_move(&mut self, delta: isize) {
        if self.screen.scroll_locked || self.screen.cards.is_empty() {
            return;
        }
        let last = self.screen.cards.len() - 1;
        let next = self.card_selected as isize + delta;
        self.card_selected = next.clamp(0, last as isize) as usize;
    }

    pub fn card_first(&mut self) {
        if !self.screen.scroll_locked {
            self.card_selected = 0;
        }
    }

    pub fn card_last(&mut self) {
        if !self.screen.scroll_locked {
            self.card_selected = self.screen.cards.len().saturating_sub(1);
        }
    }

    /// Open the lightbox on the card at filtered-list position `index`.
    pub fn activate_card(&mut self, index: usize) {
        if let Some(gallery) = self.gallery.as_mut()
            && gallery.open_lightbox(index, &mut self.screen)
        {
            self.card_selected = index;
        }
    }

    pub fn activate_selected_card(&mut self) {
        self.activate_card(self.card_selected);
    }

    // ── Lightbox ──

    pub fn lightbox_prev(&mut self) {
        self.lightbox_step(-1);
    }

    pub fn lightbox_next(&mut self) {
        self.lightbox_step(1);
    }

    fn lightbox_step(&mut self, delta: isize) {
        if let Some(gallery) = self.gallery.as_mut()
            && gallery.navigate(delta, &mut self.screen)
            && let Some(slide) = &self.screen.slide
        {
            self.card_selected = slide.index;
        }
    }

    pub fn close_lightbox(&mut self) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.close_lightbox(&mut self.screen);
        }
    }

    /// Hand the full-resolution image to the desktop viewer.
    pub fn open_full_image(&mut self) {
        let Some(slide) = &self.screen.slide else {
            return;
        };
        let target = self.site.resolve(&slide.src);
        match std::process::Command::new("xdg-open").arg(&target).spawn() {
            Ok(_) => {
                self.status_msg = format!("Opening: {}", target);
            }
            Err(e) => {
                tracing::warn!(%target, error = %e, "could not launch image viewer");
                self.status_msg = format!("Image: {} (viewer not available)", target);
            }
        }
    }
}
