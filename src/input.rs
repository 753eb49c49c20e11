use crate::app::{App, Focus, InputMode};
use crate::ui::layout::{self, Hit};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Nothing to interact with after a failed load
    if !app.is_loaded() {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.should_quit = true;
        }
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.overlay_open() {
        handle_lightbox_key(app, key);
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }

    // Help toggle
    if key.code == KeyCode::Char('?') {
        app.show_help = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
        }
        KeyCode::Esc => {
            // Clear search
            if !app.search.is_empty() {
                app.clear_search();
            }
        }
        _ => match app.focus {
            Focus::Chips => handle_chips_key(app, key),
            Focus::Grid => handle_grid_key(app, key),
        },
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.pop_search();
        }
        KeyCode::Char(c) => {
            app.push_search(c);
        }
        _ => {}
    }
}

fn handle_chips_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.chip_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.chip_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected_chip(),
        KeyCode::Down | KeyCode::Char('j') => app.focus = Focus::Grid,
        _ => {}
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) {
    let columns = layout::compute(app, app.area).grid_columns as isize;
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.card_move(-1),
        KeyCode::Right | KeyCode::Char('l') => app.card_move(1),
        KeyCode::Down | KeyCode::Char('j') => app.card_move(columns),
        KeyCode::Up | KeyCode::Char('k') => {
            if (app.card_selected as isize) < columns {
                app.focus = Focus::Chips;
            } else {
                app.card_move(-columns);
            }
        }
        KeyCode::Char('g') | KeyCode::Home => app.card_first(),
        KeyCode::Char('G') | KeyCode::End => app.card_last(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected_card(),
        _ => {}
    }
}

fn handle_lightbox_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_lightbox(),
        KeyCode::Left | KeyCode::Char('h') => app.lightbox_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.lightbox_next(),
        KeyCode::Char('o') => app.open_full_image(),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !app.is_loaded() || app.show_help {
        return;
    }
    let regions = layout::compute(app, app.area);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match layout::hit_test(&regions, mouse.column, mouse.row) {
                Some(Hit::Chip(i)) => {
                    app.focus = Focus::Chips;
                    app.select_chip(i);
                }
                Some(Hit::Card(i)) => {
                    app.focus = Focus::Grid;
                    app.activate_card(i);
                }
                Some(Hit::Search) => app.input_mode = InputMode::Editing,
                Some(Hit::OverlayPrev) => app.lightbox_prev(),
                Some(Hit::OverlayNext) => app.lightbox_next(),
                Some(Hit::OverlayClose | Hit::OverlayBackground) => app.close_lightbox(),
                Some(Hit::OverlayContent) | None => {}
            }
        }
        MouseEventKind::ScrollDown => app.card_move(regions.grid_columns as isize),
        MouseEventKind::ScrollUp => app.card_move(-(regions.grid_columns as isize)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::tests::{gallery, item};
    use crate::manifest::SiteRoot;
    use crossterm::event::KeyEventState;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        let items = vec![
            item("A", Some("One"), "1.jpg"),
            item("B", None, "2.jpg"),
            item("A", Some("Three"), "3.jpg"),
        ];
        let mut app = App::new(gallery(items), SiteRoot::Dir(PathBuf::from(".")));
        app.update_area(120, 40);
        app
    }

    #[test]
    fn test_enter_and_space_open_lightbox() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.overlay_open());
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.overlay_open());

        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.screen.slide.as_ref().unwrap().index, 1);
    }

    #[test]
    fn test_arrow_keys_wrap_in_lightbox() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.screen.slide.as_ref().unwrap().index, 2);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.screen.slide.as_ref().unwrap().index, 0);
    }

    #[test]
    fn test_typing_filters_on_every_keystroke() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);
        handle_key(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.screen.cards.len(), 1);
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.screen.cards.len(), 3);
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search, "q");
    }

    #[test]
    fn test_chip_selection_by_keyboard() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Chips);
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.screen.cards.len(), 1);
        assert_eq!(app.screen.cards[0].category, "B");
    }

    #[test]
    fn test_mouse_click_card_then_background() {
        let mut app = app();
        let regions = layout::compute(&app, app.area);
        let (index, rect) = regions.card_rects[1];
        handle_mouse(&mut app, click(rect.x + 2, rect.y + 2));
        assert_eq!(app.screen.slide.as_ref().map(|s| s.index), Some(index));

        handle_mouse(&mut app, click(0, 0));
        assert!(!app.overlay_open());
    }

    #[test]
    fn test_mouse_click_chip() {
        let mut app = app();
        let regions = layout::compute(&app, app.area);
        let chip = regions.chip_rects[1];
        handle_mouse(&mut app, click(chip.x, chip.y));
        assert_eq!(app.screen.cards.len(), 2);
    }

    #[test]
    fn test_failed_load_only_quits() {
        let mut app = App::failed("nope");
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(!app.should_quit);
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
