//! Keyboard Input Handling Module
//!
//! Translates key events into query-state changes, navigation and the copy
//! action. Returns `true` from [`handle_key_events`] when the app should quit.

use crate::app::{App, InputMode};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Main keyboard event handler and dispatcher
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    // Ctrl-C always quits, whatever mode we are in
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    app.needs_redraw = true;

    match app.input_mode {
        InputMode::Search => handle_search_keys(key, app),
        InputMode::HelpMenu => handle_help_keys(key, app),
        InputMode::Normal => handle_normal_keys(key, app),
    }
}

fn handle_search_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_search();
        }
        KeyCode::Up => app.previous_result(),
        KeyCode::Down => app.next_result(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_search_char(c);
        }
        _ => {}
    }
    false
}

fn handle_help_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Char('?') => app.input_mode = InputMode::Normal,
        _ => {}
    }
    false
}

fn handle_normal_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,

        KeyCode::Char('?') => {
            app.clear_messages();
            app.input_mode = InputMode::HelpMenu;
        }

        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.clear_messages();
            app.input_mode = InputMode::Search;
        }

        KeyCode::Esc => {
            app.clear_messages();
            app.clear_search();
        }

        // Tag selection
        KeyCode::Left | KeyCode::Char('h') => app.previous_tag(),
        KeyCode::Right | KeyCode::Char('l') => app.next_tag(),
        KeyCode::Char(' ') | KeyCode::Char('t') => app.toggle_tag_at_cursor(),
        KeyCode::Char('0') => app.clear_tag_filter(),

        // Result navigation
        KeyCode::Up | KeyCode::Char('k') => app.previous_result(),
        KeyCode::Down | KeyCode::Char('j') => app.next_result(),
        KeyCode::PageDown => app.scroll_preview_down(),
        KeyCode::PageUp => app.scroll_preview_up(),

        KeyCode::Char('y') | KeyCode::Char('c') | KeyCode::Enter => {
            if let Err(e) = app.copy_selected() {
                app.set_error_message(e);
            }
        }

        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppSettings;
    use crate::clipboard::MemoryClipboard;
    use crate::models::{Snippet, SnippetCollection, SnippetSource, TagVocabulary};
    use crate::ui::colors::TagPalette;

    fn app() -> App {
        let settings = AppSettings {
            source: SnippetSource::parse("data.json"),
            vocabulary: TagVocabulary::from_labels(["Git", "Javascript"]),
            tags_from_data: false,
            palette: TagPalette::default(),
        };
        let collection = SnippetCollection::new(vec![
            Snippet::new("1", "Git rebase").with_tags(["Git"]),
            Snippet::new("2", "Array sort").with_tags(["Javascript"]),
        ]);
        App::with_collection(settings, collection, Box::new(MemoryClipboard::default()))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    #[test]
    fn slash_enters_search_and_typing_filters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);

        for c in "sort".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.query.search_text, "sort");
        assert_eq!(app.filtered.len(), 1);

        // 'q' is text while searching
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.query.search_text, "sort");
    }

    #[test]
    fn tag_keys_move_and_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.query.selected_tag.as_deref(), Some("Javascript"));

        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.query.selected_tag, None);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.input_mode = InputMode::Search;
        assert!(handle_key_events(ctrl_c, &mut app));
    }

    #[test]
    fn copy_key_sets_status() {
        let mut app = app();
        press(&mut app, KeyCode::Char('y'));
        assert!(app.success_message.is_some());
    }
}
