mod grid;
mod help;
pub mod layout;
mod lightbox;

use crate::app::App;
use ratatui::Frame;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let regions = layout::compute(app, frame.area());
    grid::render(app, frame, &regions);

    if let (Some(slide), Some(overlay)) = (&app.screen.slide, &regions.overlay) {
        lightbox::render(app, frame, slide, overlay);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::tests::{PLACEHOLDER, gallery, item};
    use crate::manifest::SiteRoot;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| render(app, frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let gallery = gallery(vec![item("Dock", Some("Front"), "a.jpg"), item("Yard", None, "b.jpg")]);
        App::new(gallery, SiteRoot::Dir(PathBuf::from("/srv/www")))
    }

    #[test]
    fn test_renders_chips_and_cards() {
        let screen = draw(&app());
        assert!(screen.contains("Dock"));
        assert!(screen.contains("Yard"));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains("Front"));
        assert!(screen.contains("images/thumb/a.jpg"));
    }

    #[test]
    fn test_renders_lightbox_and_help() {
        let mut app = app();
        app.activate_card(0);
        let screen = draw(&app);
        assert!(screen.contains("images/full/a.jpg"));
        assert!(screen.contains("1 / 2"));

        app.show_help = true;
        assert!(draw(&app).contains("Keybindings"));
    }

    #[test]
    fn test_renders_load_failure_notice() {
        let app = App::failed("Could not load");
        assert!(draw(&app).contains("Could not load"));
    }
}
