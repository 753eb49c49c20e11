use super::layout::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )])
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("    ?         ", "Toggle this help"),
        binding("    q         ", "Quit application"),
        binding("    Tab       ", "Switch between categories and photos"),
        binding("    /         ", "Search (every keystroke filters)"),
        binding("    Esc       ", "Clear search"),
        Line::from(""),
        section("  Categories"),
        binding("    ←/h →/l   ", "Move between chips"),
        binding("    Enter/Space", " Select category"),
        Line::from(""),
        section("  Photos"),
        binding("    ←↑↓→/hjkl ", "Move between cards"),
        binding("    g/G       ", "Jump to first/last photo"),
        binding("    Enter/Space", " Open the lightbox"),
        binding("    Click     ", "Open a card or select a chip"),
        Line::from(""),
        section("  Lightbox"),
        binding("    ←/→       ", "Previous/next photo (wraps around)"),
        binding("    o         ", "Open full-size image in viewer"),
        binding("    Esc/q     ", "Close (or click outside the frame)"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
