//! Renderer tests for mdwalk
//!
//! End-to-end checks of `core::render::render`: fixed width, the uniform
//! left margin, marker cleanup and color suppression. Options are built
//! explicitly so the tests do not depend on the NO_COLOR environment.

use mdwalk::core::render::{RenderOptions, render};

fn plain(width: usize) -> RenderOptions {
    RenderOptions {
        width,
        color: false,
    }
}

#[test]
fn test_plain_output_has_no_styling_codes() {
    let out = render(
        "# Title\n\nSome **bold** and *italic* and `code`.\n",
        &plain(80),
    );
    assert!(!out.contains('\x1b'), "styling codes leaked: {:?}", out);
    assert!(out.contains("Title"));
    assert!(out.contains("bold"));
}

#[test]
fn test_colored_output_has_styling_codes() {
    let opts = RenderOptions {
        width: 80,
        color: true,
    };
    let out = render("# Title\n", &opts);
    assert!(out.contains('\x1b'));
}

#[test]
fn test_every_line_carries_the_margin() {
    let out = render("# One\n\ntext\n\n- item\n", &plain(60));
    for line in out.lines().filter(|l| !l.trim().is_empty()) {
        assert!(line.starts_with("  "), "missing margin on {:?}", line);
    }
}

#[test]
fn test_inline_markers_do_not_survive() {
    let out = render("plain **bold** middle *em* end `tick`\n", &plain(80));
    assert!(!out.contains("**"));
    assert!(!out.contains('`'));
}

#[test]
fn test_blank_runs_collapse_to_one() {
    let out = render("a\n\n\n\n\nb\n", &plain(80));
    assert!(!out.contains("\n\n\n"), "blank run survived: {:?}", out);
    assert!(out.contains('a') && out.contains('b'));
}

#[test]
fn test_paragraphs_wrap_to_the_configured_width() {
    let long = "word ".repeat(60);
    let out = render(&long, &plain(40));
    for line in out.lines() {
        // Content wraps at the configured width, then gains the margin.
        assert!(line.chars().count() <= 42, "line too wide: {:?}", line);
    }
    assert!(out.lines().count() > 1);
}

#[test]
fn test_table_rows_keep_cell_text() {
    let src = "| a | b |\n|---|---|\n| one | two |\n";
    let out = render(src, &plain(80));
    assert!(out.contains("one"));
    assert!(out.contains("two"));
}
