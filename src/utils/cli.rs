//! Command-line argument parsing and help for mdwalk.
//!
//! When invoked with no args (mdw), the browser opens on the current
//! directory. A single positional argument points it at another directory
//! or a single document.

/// What `main` should do after argument handling.
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        return CliAction::RunApp;
    }

    if args.len() > 2 {
        eprintln!("Error: mdwalk accepts only one argument at a time.");
        eprintln!("Usage: mdw [PATH] or mdw [OPTION]");
        return CliAction::Exit;
    }

    match args[1].as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("mdwalk {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"mdwalk - An interactive markdown browser for the terminal

USAGE:
  mdw [PATH]

PATH:
  Directory to browse or a single document to view
  (defaults to the current directory; reads stdin when piped)

OPTIONS:
  -h, --help              Print help information
  -v, --version           Display the current installed version of mdwalk

KEYS:
  j/k, arrows             Move the selection (wraps around)
  enter                   Open the selected document in the pager
  /                       Incremental content search
  esc                     Leave search
  q, ctrl+c               Quit

ENVIRONMENT:
  MDW_CONFIG              Override the default config path
  NO_COLOR                Disable all styled output
"#
    );
}
