use super::layout::OverlayRegions;
use crate::app::App;
use crate::view::Slide;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(app: &App, frame: &mut Frame, slide: &Slide, regions: &OverlayRegions) {
    // Clear the area behind the overlay
    frame.render_widget(Clear, regions.frame);

    let heading = if slide.alt.is_empty() { "Untitled" } else { &slide.alt };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", heading))
        .title_bottom(
            Line::from(format!(" {} / {} ", slide.index + 1, slide.total))
                .alignment(Alignment::Right),
        );
    frame.render_widget(block, regions.frame);

    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));
    let body = vec![
        Line::from(""),
        Line::from(vec![
            label("  Title:    "),
            Span::styled(
                &slide.title,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("  Category: "),
            Span::styled(&slide.caption, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            label("  Image:    "),
            Span::styled(&slide.src, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            label("  Location: "),
            Span::styled(
                app.site.resolve(&slide.src),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press o to open the full-size image in your viewer",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), regions.body);

    let button = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Span::styled(" ◀ Prev ", button)), regions.prev);
    frame.render_widget(Paragraph::new(Span::styled(" ✕ Close ", button)), regions.close);
    frame.render_widget(Paragraph::new(Span::styled(" Next ▶ ", button)), regions.next);
}
