//! Keystroke transition handlers for mdwalk.
//!
//! Implements the transition tables for both interaction modes. Each keypress
//! is processed to completion and returns the [KeypressResult] side effect; no
//! handler performs terminal I/O itself, which keeps the state machine
//! testable without a terminal.

use crate::app::keymap::Action;
use crate::app::state::{AppState, KeypressResult, Mode, OpenRequest};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl AppState<'_> {
    /// Central key handler: dispatches to the table of the current mode.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        self.clear_status();

        // Ctrl-C terminates from either mode, like the quit key.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeypressResult::Quit;
        }

        match self.mode() {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Search => self.handle_search_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> KeypressResult {
        let Some(action) = self.keymap().lookup(key) else {
            return KeypressResult::Continue;
        };

        match action {
            Action::GoUp => {
                self.move_cursor(false);
                KeypressResult::Redraw
            }
            Action::GoDown => {
                self.move_cursor(true);
                KeypressResult::Redraw
            }
            Action::EnterSearch => {
                self.enter_search();
                KeypressResult::Redraw
            }
            Action::Open => match self.files().get(self.cursor()) {
                Some(doc) => KeypressResult::Open(OpenRequest::browse(doc.clone())),
                None => KeypressResult::Continue,
            },
            Action::Quit => KeypressResult::Quit,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            KeyCode::Esc => {
                self.leave_search();
                KeypressResult::Redraw
            }
            KeyCode::Backspace => {
                self.query_pop();
                KeypressResult::Redraw
            }
            KeyCode::Up => {
                if !self.results().is_empty() {
                    self.move_cursor(false);
                }
                KeypressResult::Redraw
            }
            KeyCode::Down => {
                if !self.results().is_empty() {
                    self.move_cursor(true);
                }
                KeypressResult::Redraw
            }
            KeyCode::Enter => match self.results().get(self.cursor()) {
                Some(result) => KeypressResult::Open(OpenRequest::search(
                    result.doc().clone(),
                    result.line(),
                )),
                None => KeypressResult::Continue,
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query_push(c);
                KeypressResult::Redraw
            }
            _ => KeypressResult::Continue,
        }
    }
}

impl OpenRequest {
    /// Open from the browse list: the viewer starts at the top.
    fn browse(doc: crate::core::docs::DocumentRef) -> Self {
        OpenRequest::with_resume(doc, None)
    }

    /// Open from a search result: the viewer starts at the matched line.
    fn search(doc: crate::core::docs::DocumentRef, line: usize) -> Self {
        OpenRequest::with_resume(doc, Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::docs::DocumentRef;
    use std::fs;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with_files<'a>(
        config: &'a Config,
        dir: &std::path::Path,
        names: &[(&str, &str)],
    ) -> AppState<'a> {
        let mut files = Vec::new();
        for (name, content) in names {
            let path = dir.join(name);
            fs::write(&path, content).unwrap();
            files.push(DocumentRef::new(path, (*name).to_string()));
        }
        AppState::new(config, dir.to_path_buf(), files)
    }

    #[test]
    fn slash_enters_search_mode() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let dir = tempdir()?;
        let mut app = state_with_files(&config, dir.path(), &[("a.md", "x")]);
        let result = app.handle_keypress(key(KeyCode::Char('/')));
        assert!(matches!(result, KeypressResult::Redraw));
        assert_eq!(app.mode(), Mode::Search);
        assert_eq!(app.cursor(), 0);
        Ok(())
    }

    #[test]
    fn typing_recomputes_results_and_backspace_refilters()
    -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let dir = tempdir()?;
        let mut app = state_with_files(
            &config,
            dir.path(),
            &[("a.md", "apple pie\n"), ("b.md", "banana split\n")],
        );
        app.handle_keypress(key(KeyCode::Char('/')));
        for c in "ba".chars() {
            app.handle_keypress(key(KeyCode::Char(c)));
        }
        assert_eq!(app.results().len(), 1);
        assert_eq!(app.results()[0].doc().display_name(), "b.md");

        app.handle_keypress(key(KeyCode::Backspace));
        assert_eq!(app.query(), "b");
        assert_eq!(app.results().len(), 1, "still only banana matches 'b'");

        app.handle_keypress(key(KeyCode::Backspace));
        assert!(app.query().is_empty());
        assert!(app.results().is_empty(), "empty query shows no results");
        Ok(())
    }

    #[test]
    fn escape_returns_to_browse_and_clears() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let dir = tempdir()?;
        let mut app = state_with_files(&config, dir.path(), &[("a.md", "apple\n")]);
        app.handle_keypress(key(KeyCode::Char('/')));
        app.handle_keypress(key(KeyCode::Char('a')));
        assert!(!app.results().is_empty());

        app.handle_keypress(key(KeyCode::Esc));
        assert_eq!(app.mode(), Mode::Browse);
        assert!(app.query().is_empty());
        assert!(app.results().is_empty());
        assert_eq!(app.cursor(), 0);
        Ok(())
    }

    #[test]
    fn enter_in_browse_opens_without_resume_line() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let dir = tempdir()?;
        let mut app = state_with_files(&config, dir.path(), &[("a.md", "x"), ("b.md", "y")]);
        app.handle_keypress(key(KeyCode::Char('j')));
        let result = app.handle_keypress(key(KeyCode::Enter));
        match result {
            KeypressResult::Open(request) => {
                assert_eq!(request.doc().display_name(), "b.md");
                assert_eq!(request.resume_line(), None);
            }
            _ => panic!("expected an open request"),
        }
        Ok(())
    }

    #[test]
    fn enter_on_search_result_carries_matched_line() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let dir = tempdir()?;
        let content = "intro\nfiller\nfiller\nfiller\nProject Alpha kickoff\n";
        let mut app = state_with_files(&config, dir.path(), &[("notes.md", content)]);
        app.handle_keypress(key(KeyCode::Char('/')));
        for c in "alpha".chars() {
            app.handle_keypress(key(KeyCode::Char(c)));
        }
        assert_eq!(app.results().len(), 1);
        assert_eq!(app.results()[0].line(), 5);
        assert_eq!(app.results()[0].preview(), "Project Alpha kickoff");

        let result = app.handle_keypress(key(KeyCode::Enter));
        match result {
            KeypressResult::Open(request) => {
                assert_eq!(request.doc().display_name(), "notes.md");
                assert_eq!(request.resume_line(), Some(5));
            }
            _ => panic!("expected an open request"),
        }

        // The viewer exit path re-enters browse mode with the cursor reset.
        app.return_from_viewer();
        assert_eq!(app.mode(), Mode::Browse);
        assert_eq!(app.cursor(), 0);
        Ok(())
    }

    #[test]
    fn enter_with_no_results_is_a_noop() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let dir = tempdir()?;
        let mut app = state_with_files(&config, dir.path(), &[("a.md", "apple\n")]);
        app.handle_keypress(key(KeyCode::Char('/')));
        let result = app.handle_keypress(key(KeyCode::Enter));
        assert!(matches!(result, KeypressResult::Continue));
        assert_eq!(app.mode(), Mode::Search);
        Ok(())
    }

    #[test]
    fn quit_key_and_ctrl_c_terminate() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let dir = tempdir()?;
        let mut app = state_with_files(&config, dir.path(), &[("a.md", "x")]);
        assert!(matches!(
            app.handle_keypress(key(KeyCode::Char('q'))),
            KeypressResult::Quit
        ));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(app.handle_keypress(ctrl_c), KeypressResult::Quit));

        app.handle_keypress(key(KeyCode::Char('/')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            app.handle_keypress(ctrl_c),
            KeypressResult::Quit
        ));
        Ok(())
    }
}
