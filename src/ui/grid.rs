use super::layout::Regions;
use crate::app::{App, Focus, InputMode};
use crate::view::{Card, Notice};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame, regions: &Regions) {
    // ── Header ──
    let header_text = format!(" Gallery Explorer   [{} photos]", app.screen.cards.len());
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    frame.render_widget(header, regions.header);

    render_chips(app, frame, regions);
    render_search(app, frame, regions.search);

    if let (Some((notice, text)), Some(area)) = (&app.screen.notice, regions.notice) {
        let color = match notice {
            Notice::LoadFailed => Color::Red,
            Notice::ComingSoon | Notice::NoMatches => Color::Yellow,
        };
        let notice = Paragraph::new(text.as_str())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(notice, area);
    }

    render_grid(app, frame, regions);

    // ── Status bar ──
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ←↑↓→"),
        Span::raw(" Move  "),
        key("Tab"),
        Span::raw(" Chips/Grid  "),
        key("/"),
        Span::raw(" Search  "),
        key("Enter"),
        Span::raw(" Open  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), regions.status);
}

fn render_chips(app: &App, frame: &mut Frame, regions: &Regions) {
    let focused = app.focus == Focus::Chips && app.input_mode == InputMode::Normal;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }))
        .title(" Categories ");
    frame.render_widget(block, regions.chips);

    for (i, (chip, area)) in app.screen.chips.iter().zip(&regions.chip_rects).enumerate() {
        let mut style = if chip.active {
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if focused && i == app.chip_selected {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
        }
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", chip.label), style)),
            *area,
        );
    }
}

fn render_search(app: &App, frame: &mut Frame, area: Rect) {
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " 🔍 Search (Enter/Esc to finish): "
    } else {
        " 🔍 Search (/): "
    };
    let search_text = format!("{}{}", search_label, app.search);
    let search_bar = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search_bar, area);

    // Set cursor position when editing
    if app.input_mode == InputMode::Editing {
        let cursor_x = area.x + 1 + search_label.width() as u16 + app.search.width() as u16;
        let cursor_y = area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_grid(app: &App, frame: &mut Frame, regions: &Regions) {
    let total = app.screen.cards.len();
    let page_info = format!(
        " {} of {} ",
        if total == 0 { 0 } else { app.card_selected + 1 },
        total
    );
    let grid_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Photos ")
        .title_bottom(Line::from(page_info).alignment(Alignment::Right));
    frame.render_widget(grid_block, regions.grid);

    let focused = app.focus == Focus::Grid && app.input_mode == InputMode::Normal;
    for (index, area) in &regions.card_rects {
        if let Some(card) = app.screen.cards.get(*index) {
            let selected = *index == app.card_selected;
            render_card(frame, *area, card, selected, focused);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card, selected: bool, focused: bool) {
    let border = match (selected, focused) {
        (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::DarkGray),
    };
    let width = area.width.saturating_sub(2) as usize;
    let title = if card.title.is_empty() { &card.alt } else { &card.title };
    let lines = vec![
        Line::from(Span::styled(
            truncate_str(title, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_str(&card.category, width),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            truncate_str(&card.thumb_src, width),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", card.index + 1)),
    );
    frame.render_widget(widget, area);
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_respects_display_width() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_str("물류센터전경", 5), "물류…");
        assert_eq!(truncate_str("abc", 0), "");
    }
}
