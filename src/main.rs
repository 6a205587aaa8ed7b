//! main.rs
//! Entry point for mdwalk

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use mdwalk::app::AppState;
use mdwalk::config::Config;
use mdwalk::core::{self, pager, render, terminal};
use mdwalk::utils::cli::{CliAction, handle_args};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[mdwalk] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    let target = match action {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path_arg) => Some(PathBuf::from(path_arg)),
    };

    let config = Config::load();

    // Piped invocation with no argument: treat stdin as a single anonymous
    // document and end the process when the viewer closes.
    if target.is_none() && !std::io::stdin().is_terminal() {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        view_once("stdin".to_string(), raw, &config);
        return Ok(());
    }

    let target = target.unwrap_or_else(|| PathBuf::from("."));

    // A single file target is a one-shot view, no interactive state.
    if target.is_file() {
        let raw = match std::fs::read_to_string(&target) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("[mdwalk] Error: could not read '{}': {}", target.display(), e);
                std::process::exit(1);
            }
        };
        view_once(target.display().to_string(), raw, &config);
        return Ok(());
    }

    let general = config.general();
    let files = match core::resolve(&target, general.extensions(), general.exclude()) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("[mdwalk] Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = AppState::new(&config, target, files);
    terminal::run_terminal(&mut app)
}

/// Renders one document and blocks on the pager, then exits the process:
/// 0 when the view succeeded, 1 when it could not be shown.
fn view_once(title: String, raw: String, config: &Config) {
    let body = render::render(&raw, &config.render_options());
    let artifact = pager::RenderedArtifact::new(title, body);
    if let Err(e) = pager::display(&artifact, None, config.pager()) {
        eprintln!("[mdwalk] Error: {}", e);
        std::process::exit(1);
    }
}
