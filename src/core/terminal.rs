//! Terminal rendering and event loop for mdwalk.
//!
//! Handles setup/teardown of raw mode and the alternate screen, full-screen
//! redraws, and dispatching key events to the browser state machine.
//!
//! Raw mode is a single global resource: exactly one of the browser loop and
//! the pager child owns the terminal at any time. The loop releases it before
//! the viewer handoff and re-acquires it when control returns, and teardown
//! runs on every exit path (the panic hook in `main.rs` covers unwinding).

use crate::app::{AppState, KeypressResult, OpenRequest};
use crate::core::error::BrowseError;
use crate::core::{pager, render};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{fs, io};

/// Initializes the terminal in raw mode and the alternate screen and runs the
/// main event loop. Blocks until quit.
///
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop: full clear-and-repaint on every state change, then block
/// on the next key event. One key event is processed to completion before the
/// next is read; nothing in this process runs concurrently with a transition.
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match app.handle_keypress(key) {
                    KeypressResult::Quit => break,
                    KeypressResult::Open(request) => {
                        match open_in_viewer(app, &request) {
                            // Selection resets on return: back to the list.
                            Ok(()) => app.return_from_viewer(),
                            // Stay in the current mode at the current cursor.
                            Err(e) => app.set_status(e.to_string()),
                        }
                        terminal.clear()?;
                    }
                    KeypressResult::Continue | KeypressResult::Redraw => {}
                }
            }
            Event::Resize(_, _) => {
                // Redrawn by the next loop iteration.
            }
            _ => {}
        }
    }
    Ok(())
}

/// Renders the requested document and hands the terminal to the pager.
///
/// Read and render failures are returned before the terminal is suspended, so
/// the browser never loses the screen for a document it cannot show.
fn open_in_viewer(app: &AppState, request: &OpenRequest) -> Result<(), BrowseError> {
    let doc = request.doc();
    let raw = fs::read_to_string(doc.path()).map_err(|e| BrowseError::Unreadable {
        path: doc.path().to_path_buf(),
        source: e,
    })?;

    let opts = app.config().render_options();
    let body = render::render(&raw, &opts);
    let artifact = pager::RenderedArtifact::new(doc.display_name().to_string(), body);

    if !pager::pager_available(app.config().pager()) {
        return Err(BrowseError::PagerLaunch {
            cmd: app.config().pager().cmd().to_string(),
            source: io::Error::other("not found in PATH"),
        });
    }

    // Temporarily release the terminal while the pager child owns it,
    // mirroring the raw-mode toggle around any external full-screen program.
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;

    let result = pager::display(&artifact, request.resume_line(), app.config().pager());

    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    result
}
