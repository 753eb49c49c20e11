use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use unicode_width::UnicodeWidthStr;

pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 5;

/// Screen geometry shared by drawing and mouse hit testing.
#[derive(Debug, Clone)]
pub struct Regions {
    pub header: Rect,
    pub chips: Rect,
    pub chip_rects: Vec<Rect>,
    pub search: Rect,
    pub notice: Option<Rect>,
    pub grid: Rect,
    pub grid_columns: usize,
    /// Visible cards as (filtered-list index, area).
    pub card_rects: Vec<(usize, Rect)>,
    pub status: Rect,
    pub overlay: Option<OverlayRegions>,
}

#[derive(Debug, Clone, Copy)]
pub struct OverlayRegions {
    pub frame: Rect,
    pub body: Rect,
    pub prev: Rect,
    pub close: Rect,
    pub next: Rect,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Chip(usize),
    Card(usize),
    Search,
    OverlayPrev,
    OverlayNext,
    OverlayClose,
    OverlayContent,
    OverlayBackground,
}

pub fn chip_width(label: &str) -> u16 {
    label.width() as u16 + 2
}

/// Place chips left to right, wrapping onto a new line when `max_width` is exceeded.
fn flow(widths: &[u16], max_width: u16) -> Vec<(u16, u16)> {
    let mut positions = Vec::with_capacity(widths.len());
    let (mut x, mut y) = (0u16, 0u16);
    for &w in widths {
        if x > 0 && x.saturating_add(w) > max_width {
            x = 0;
            y += 1;
        }
        positions.push((x, y));
        x = x.saturating_add(w + 1);
    }
    positions
}

fn inner(rect: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_add(1),
        rect.y.saturating_add(1),
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    )
}

pub fn compute(app: &App, area: Rect) -> Regions {
    let widths: Vec<u16> = app.screen.chips.iter().map(|c| chip_width(&c.label)).collect();
    let positions = flow(&widths, area.width.saturating_sub(2));
    let chip_lines = positions.iter().map(|p| p.1 + 1).max().unwrap_or(1);
    let notice_height = if app.screen.notice.is_some() { 3 } else { 0 };

    // Layout: header(1) + chips + search(3) + notice + grid(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(chip_lines + 2),
            Constraint::Length(3),
            Constraint::Length(notice_height),
            Constraint::Min(CARD_HEIGHT + 2),
            Constraint::Length(1),
        ])
        .split(area);

    let chips_inner = inner(chunks[1]);
    let chip_rects = positions
        .iter()
        .zip(&widths)
        .map(|(&(x, y), &w)| {
            Rect::new(chips_inner.x + x, chips_inner.y + y, w, 1).intersection(chips_inner)
        })
        .collect();

    let grid_inner = inner(chunks[4]);
    let grid_columns = ((grid_inner.width / CARD_WIDTH) as usize).max(1);
    let grid_rows = ((grid_inner.height / CARD_HEIGHT) as usize).max(1);
    let selected_row = app.card_selected / grid_columns;
    let first_row = selected_row.saturating_sub(grid_rows - 1);
    let start = first_row * grid_columns;
    let end = ((first_row + grid_rows) * grid_columns).min(app.screen.cards.len());
    let card_rects = (start..end)
        .map(|i| {
            let col = (i % grid_columns) as u16;
            let row = (i / grid_columns - first_row) as u16;
            let rect = Rect::new(
                grid_inner.x + col * CARD_WIDTH,
                grid_inner.y + row * CARD_HEIGHT,
                CARD_WIDTH,
                CARD_HEIGHT,
            )
            .intersection(grid_inner);
            (app.screen.cards[i].index, rect)
        })
        .collect();

    let overlay = app.screen.slide.as_ref().map(|_| overlay_regions(area));

    Regions {
        header: chunks[0],
        chips: chunks[1],
        chip_rects,
        search: chunks[2],
        notice: (notice_height > 0).then_some(chunks[3]),
        grid: chunks[4],
        grid_columns,
        card_rects,
        status: chunks[5],
        overlay,
    }
}

fn overlay_regions(area: Rect) -> OverlayRegions {
    let frame = centered_rect(80, 80, area);
    let inside = inner(frame);
    let controls_y = inside.y + inside.height.saturating_sub(1);
    let body = Rect::new(inside.x, inside.y, inside.width, inside.height.saturating_sub(1));
    let button = |x: u16, width: u16| Rect::new(x, controls_y, width, 1).intersection(inside);
    OverlayRegions {
        frame,
        body,
        prev: button(inside.x, 10),
        close: button(inside.x + inside.width.saturating_sub(11) / 2, 11),
        next: button(inside.x + inside.width.saturating_sub(10), 10),
    }
}

pub fn hit_test(regions: &Regions, column: u16, row: u16) -> Option<Hit> {
    let pos = Position::new(column, row);

    if let Some(overlay) = &regions.overlay {
        let hit = if overlay.prev.contains(pos) {
            Hit::OverlayPrev
        } else if overlay.next.contains(pos) {
            Hit::OverlayNext
        } else if overlay.close.contains(pos) {
            Hit::OverlayClose
        } else if overlay.frame.contains(pos) {
            Hit::OverlayContent
        } else {
            Hit::OverlayBackground
        };
        return Some(hit);
    }

    if let Some(i) = regions.chip_rects.iter().position(|r| r.contains(pos)) {
        return Some(Hit::Chip(i));
    }
    if let Some((index, _)) = regions.card_rects.iter().find(|(_, r)| r.contains(pos)) {
        return Some(Hit::Card(*index));
    }
    if regions.search.contains(pos) {
        return Some(Hit::Search);
    }
    None
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
