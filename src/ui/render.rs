//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop.
//! Every call repaints the whole screen from the current state, so the
//! display can never desynchronize from the browser.
//!
//! This module stays pure rendering: it reads state and produces widgets,
//! without owning any browser logic.

use crate::app::{AppState, Mode};
use crate::utils::color_enabled;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Renders the entire browser UI for one frame: header, active list, footer.
pub fn render(frame: &mut Frame, app: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_list(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn accent() -> Style {
    if color_enabled() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn dim() -> Style {
    if color_enabled() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn selection() -> Style {
    // Reversed stays readable even when colors are disabled.
    let style = Style::default().add_modifier(Modifier::REVERSED);
    if color_enabled() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn draw_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let title = match app.mode() {
        Mode::Browse => format!(
            " mdwalk  {}  ({} documents)",
            app.root().display(),
            app.files().len()
        ),
        Mode::Search => format!(" mdwalk  search in {}", app.root().display()),
    };
    frame.render_widget(Paragraph::new(title).style(accent()), area);
}

fn draw_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = match app.mode() {
        Mode::Browse => app
            .files()
            .iter()
            .map(|doc| ListItem::new(Line::raw(format!(" {}", doc.display_name()))))
            .collect(),
        Mode::Search => app
            .results()
            .iter()
            .map(|result| {
                let location = format!(" {}:{}", result.doc().display_name(), result.line());
                let preview = fit_preview(result.preview(), &location, area.width as usize);
                ListItem::new(Line::from(vec![
                    Span::raw(location),
                    Span::styled(preview, dim()),
                ]))
            })
            .collect(),
    };

    if items.is_empty() {
        let hint = if app.mode() == Mode::Search && app.query().is_empty() {
            " type to search"
        } else {
            " no matches"
        };
        frame.render_widget(Paragraph::new(hint).style(dim()), area);
        return;
    }

    let list = List::new(items).highlight_style(selection());
    let mut state = ListState::default();
    state.select(Some(app.cursor()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    if let Some(status) = app.status() {
        let style = if color_enabled() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(format!(" {status}")).style(style), area);
        return;
    }

    let footer = match app.mode() {
        Mode::Browse => Line::from(Span::styled(
            " j/k move   enter open   / search   q quit",
            dim(),
        )),
        Mode::Search => Line::from(vec![
            Span::styled(" /", accent()),
            Span::raw(app.query().to_string()),
            Span::styled("   esc cancel   enter open", dim()),
        ]),
    };
    frame.render_widget(Paragraph::new(footer), area);
}

/// Pads and truncates the preview so the row never exceeds the pane width.
fn fit_preview(preview: &str, location: &str, pane_width: usize) -> String {
    let used = UnicodeWidthStr::width(location) + 2;
    let budget = pane_width.saturating_sub(used);
    if budget == 0 {
        return String::new();
    }

    let mut out = String::from("  ");
    let mut width = 0;
    for ch in preview.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_preview_respects_pane_width() {
        let location = " notes.md:5";
        let fitted = fit_preview(&"x".repeat(200), location, 40);
        let total = UnicodeWidthStr::width(location) + UnicodeWidthStr::width(fitted.as_str());
        assert!(total <= 40, "row too wide: {total}");
    }

    #[test]
    fn fit_preview_handles_tiny_panes() {
        assert_eq!(fit_preview("preview", " long-location.md:10", 5), "");
    }
}
