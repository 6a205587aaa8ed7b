//! Markdown rendering for mdwalk.
//!
//! Converts raw markdown text into a fixed-width, ANSI-styled text block that
//! is written to the transient artifact file and consumed by the external
//! pager. Structural parsing (headings, emphasis, code, block quotes, tables,
//! rules, links) is delegated to pulldown-cmark; this module only maps the
//! event stream onto styled terminal lines.
//!
//! Rendering is a pure function of the input text and [RenderOptions]: no
//! hidden state, byte-identical output for identical input.
//!
//! Three post-passes run after the structural conversion, in order:
//! 1. runs of 3+ blank lines collapse to a single blank line,
//! 2. literal `**`/`*`/`` ` `` marker pairs that survived conversion are
//!    re-interpreted as bold/italic/code styling so raw markup never leaks
//!    into the terminal,
//! 3. every output line gains a fixed 2-column left margin.

use crossterm::style::{Attribute, Color, ContentStyle};
use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use unicode_width::UnicodeWidthStr;

/// The fixed left margin applied to every rendered line.
pub const MARGIN: usize = 2;

/// Rendering configuration. `color: false` (set from `NO_COLOR`) suppresses
/// every styling code in the output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: usize,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 80,
            color: crate::utils::color_enabled(),
        }
    }
}

/// Renders `raw` markdown into the final styled text block.
pub fn render(raw: &str, opts: &RenderOptions) -> String {
    let source = substitute_emoji(raw);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(&source, options);
    let mut renderer = Renderer::new(opts);

    for event in parser {
        match event {
            Event::Start(tag) => renderer.handle_start(tag),
            Event::End(tag) => renderer.handle_end(tag),
            Event::Text(text) => renderer.add_text(&text),
            Event::Code(code) => renderer.add_inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => {
                renderer.add_text(&unescape_entities(&html));
            }
            Event::FootnoteReference(name) => renderer.add_text(&format!("[^{name}]")),
            Event::SoftBreak => renderer.soft_break(),
            Event::HardBreak => renderer.hard_break(),
            Event::Rule => renderer.add_rule(),
            Event::TaskListMarker(done) => renderer.add_task_marker(done),
            _ => {}
        }
    }

    let lines = renderer.finish();
    let lines = collapse_blank_runs(lines);
    let lines: Vec<String> = lines
        .into_iter()
        .map(|line| restyle_inline_markup(&line, opts.color))
        .collect();

    let margin = " ".repeat(MARGIN);
    let mut out = String::new();
    for line in lines {
        out.push_str(&margin);
        out.push_str(&line);
        out.push('\n');
    }
    out
}

// Style helpers

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..Default::default()
    }
}

fn with_attr(mut style: ContentStyle, attr: Attribute) -> ContentStyle {
    style.attributes.set(attr);
    style
}

fn heading_style(level: HeadingLevel) -> ContentStyle {
    let color = match level {
        HeadingLevel::H1 => Color::Yellow,
        HeadingLevel::H2 => Color::Magenta,
        _ => Color::Cyan,
    };
    with_attr(fg(color), Attribute::Bold)
}

/// One styled run of text within a line.
#[derive(Debug, Clone)]
struct Segment {
    text: String,
    style: ContentStyle,
}

/// Inline style counters, mirrored from the tag nesting.
#[derive(Default)]
struct InlineState {
    emphasis: usize,
    strong: usize,
    strikethrough: usize,
    link_depth: usize,
}

impl InlineState {
    fn style(&self) -> ContentStyle {
        let mut style = ContentStyle::default();
        if self.emphasis > 0 {
            style.attributes.set(Attribute::Italic);
        }
        if self.strong > 0 {
            style.attributes.set(Attribute::Bold);
        }
        if self.strikethrough > 0 {
            style.attributes.set(Attribute::CrossedOut);
        }
        if self.link_depth > 0 {
            style.foreground_color = Some(Color::Cyan);
            style.attributes.set(Attribute::Underlined);
        }
        style
    }
}

#[derive(Clone, Debug)]
struct ListLevel {
    ordered: bool,
    next_index: u64,
}

#[derive(Clone)]
struct ActiveLink {
    target: String,
    text: String,
}

#[derive(Clone)]
struct ActiveImage {
    target: String,
    alt: String,
}

#[derive(Default)]
struct TableState {
    in_head: bool,
    in_cell: bool,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    current_cell: String,
    alignments: Vec<Alignment>,
}

/// Event-stream renderer: accumulates styled segments per line, wrapping
/// paragraph text at the configured width.
struct Renderer {
    width: usize,
    color: bool,

    lines: Vec<String>,
    current: Vec<Segment>,
    current_width: usize,

    inline: InlineState,
    heading: Option<HeadingLevel>,
    blockquote_depth: usize,
    list_stack: Vec<ListLevel>,
    wrap_indent: String,

    active_link: Option<ActiveLink>,
    active_image: Option<ActiveImage>,

    code_block: Option<String>,
    code_buf: String,

    table: Option<TableState>,
}

impl Renderer {
    fn new(opts: &RenderOptions) -> Self {
        Renderer {
            width: opts.width.max(20),
            color: opts.color,
            lines: Vec::new(),
            current: Vec::new(),
            current_width: 0,
            inline: InlineState::default(),
            heading: None,
            blockquote_depth: 0,
            list_stack: Vec::new(),
            wrap_indent: String::new(),
            active_link: None,
            active_image: None,
            code_block: None,
            code_buf: String::new(),
            table: None,
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush_line();
        self.lines
    }

    fn paint(&self, text: &str, style: ContentStyle) -> String {
        if self.color && style != ContentStyle::default() {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Emits the current segments as one finished line.
    fn flush_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut line = String::new();
        for seg in self.current.drain(..) {
            if self.color && seg.style != ContentStyle::default() {
                line.push_str(&seg.style.apply(&seg.text).to_string());
            } else {
                line.push_str(&seg.text);
            }
        }
        self.current_width = 0;
        self.lines.push(line);
    }

    fn blank_line(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|l| l.is_empty()) {
            return;
        }
        self.lines.push(String::new());
    }

    /// Appends raw text to the current line without wrapping.
    fn push_raw(&mut self, text: &str, style: ContentStyle) {
        if text.is_empty() {
            return;
        }
        self.current_width += UnicodeWidthStr::width(text);
        self.current.push(Segment {
            text: text.to_string(),
            style,
        });
    }

    /// Appends text word by word, breaking the line at the configured width.
    /// Continuation lines repeat the current block indent.
    fn push_wrapped(&mut self, text: &str, style: ContentStyle) {
        for token in split_tokens(text) {
            let token_width = UnicodeWidthStr::width(token);
            let is_space = token.chars().all(char::is_whitespace);

            if is_space {
                let ends_with_space = self.current.last().is_some_and(|s| s.text.ends_with(' '));
                if self.current_width > 0 && !ends_with_space {
                    self.push_raw(" ", ContentStyle::default());
                }
                continue;
            }

            if self.current_width > 0 && self.current_width + token_width > self.width {
                // Drop a trailing space before breaking.
                if let Some(last) = self.current.last_mut()
                    && last.text == " "
                {
                    self.current.pop();
                }
                self.flush_line();
                if !self.wrap_indent.is_empty() {
                    let indent = self.wrap_indent.clone();
                    self.push_raw(&indent, ContentStyle::default());
                }
            }
            self.push_raw(token, style);
        }
    }

    fn block_prefix(&mut self) {
        if self.current_width > 0 {
            return;
        }
        if self.blockquote_depth > 0 {
            let prefix = "> ".repeat(self.blockquote_depth);
            self.push_raw(&prefix, fg(Color::DarkGrey));
        }
    }

    fn current_text_style(&self) -> ContentStyle {
        match self.heading {
            Some(level) => heading_style(level),
            None => self.inline.style(),
        }
    }

    fn handle_start(&mut self, tag: Tag<'_>) {
        if let Some(table) = self.table.as_mut() {
            match tag {
                Tag::TableHead => {
                    table.in_head = true;
                    return;
                }
                Tag::TableRow => {
                    table.current_row.clear();
                    return;
                }
                Tag::TableCell => {
                    table.in_cell = true;
                    table.current_cell.clear();
                    return;
                }
                _ => {}
            }
        }

        match tag {
            Tag::Heading { level, .. } => {
                self.blank_line();
                self.heading = Some(level);
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.blockquote_depth += 1;
                self.wrap_indent = "> ".repeat(self.blockquote_depth);
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                let lang = match kind {
                    CodeBlockKind::Fenced(name) => name.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code_block = Some(lang);
                self.code_buf.clear();
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
                self.list_stack.push(ListLevel {
                    ordered: start.is_some(),
                    next_index: start.unwrap_or(1),
                });
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.list_stack.len().saturating_sub(1);
                let indent = "  ".repeat(depth);

                let bullet = match self.list_stack.last_mut() {
                    Some(level) if level.ordered => {
                        let bullet = format!("{}. ", level.next_index);
                        level.next_index += 1;
                        bullet
                    }
                    _ => "- ".to_string(),
                };

                self.wrap_indent = " ".repeat(indent.len() + bullet.len());
                self.push_raw(&format!("{indent}{bullet}"), fg(Color::DarkGrey));
            }
            Tag::Emphasis => self.inline.emphasis += 1,
            Tag::Strong => self.inline.strong += 1,
            Tag::Strikethrough => self.inline.strikethrough += 1,
            Tag::Link { dest_url, .. } => {
                self.inline.link_depth += 1;
                self.active_link = Some(ActiveLink {
                    target: dest_url.to_string(),
                    text: String::new(),
                });
            }
            Tag::Image { dest_url, .. } => {
                self.active_image = Some(ActiveImage {
                    target: dest_url.to_string(),
                    alt: String::new(),
                });
            }
            Tag::Table(alignments) => {
                self.blank_line();
                self.table = Some(TableState {
                    alignments,
                    ..TableState::default()
                });
            }
            _ => {}
        }
    }

    fn handle_end(&mut self, tag: TagEnd) {
        if let Some(table) = self.table.as_mut() {
            match tag {
                TagEnd::TableCell => {
                    if table.in_cell {
                        table
                            .current_row
                            .push(table.current_cell.trim().to_string());
                        table.current_cell.clear();
                        table.in_cell = false;
                    }
                    return;
                }
                TagEnd::TableRow => {
                    let row = std::mem::take(&mut table.current_row);
                    table.rows.push(row);
                    return;
                }
                TagEnd::TableHead => {
                    table.headers = std::mem::take(&mut table.current_row);
                    table.in_head = false;
                    return;
                }
                TagEnd::Table => {
                    let table = self.table.take().unwrap_or_default();
                    self.render_table(&table);
                    self.blank_line();
                    return;
                }
                _ => {}
            }
        }

        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                self.blank_line();
            }
            TagEnd::Heading(_) => {
                self.heading = None;
                self.flush_line();
                self.blank_line();
            }
            TagEnd::BlockQuote => {
                self.flush_line();
                self.blockquote_depth = self.blockquote_depth.saturating_sub(1);
                self.wrap_indent = "> ".repeat(self.blockquote_depth);
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                let code = std::mem::take(&mut self.code_buf);
                self.code_block = None;
                self.render_code_block(&code);
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.wrap_indent.clear();
                    self.blank_line();
                }
            }
            TagEnd::Item => {
                self.flush_line();
                if self.list_stack.is_empty() {
                    self.wrap_indent.clear();
                }
            }
            TagEnd::Emphasis => self.inline.emphasis = self.inline.emphasis.saturating_sub(1),
            TagEnd::Strong => self.inline.strong = self.inline.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.inline.strikethrough = self.inline.strikethrough.saturating_sub(1);
            }
            TagEnd::Link => {
                self.inline.link_depth = self.inline.link_depth.saturating_sub(1);
                if let Some(link) = self.active_link.take() {
                    // Show the destination unless the label already is the URL.
                    if link.text.trim() != link.target && !link.target.starts_with('#') {
                        self.push_wrapped(&format!(" ({})", link.target), fg(Color::DarkGrey));
                    }
                }
            }
            TagEnd::Image => {
                if let Some(image) = self.active_image.take() {
                    let alt = if image.alt.trim().is_empty() {
                        "image".to_string()
                    } else {
                        image.alt.trim().to_string()
                    };
                    let placeholder = format!("[image: {alt}] ({})", image.target);
                    self.push_wrapped(&placeholder, fg(Color::Blue));
                }
            }
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.code_block.is_some() {
            self.code_buf.push_str(text);
            return;
        }
        if let Some(table) = self.table.as_mut() {
            if table.in_cell {
                table.current_cell.push_str(text);
            }
            return;
        }
        if let Some(image) = self.active_image.as_mut() {
            image.alt.push_str(text);
            return;
        }

        self.block_prefix();
        let style = self.current_text_style();
        self.push_wrapped(text, style);
        if let Some(link) = self.active_link.as_mut() {
            link.text.push_str(text);
        }
    }

    fn add_inline_code(&mut self, code: &str) {
        if self.code_block.is_some() {
            self.code_buf.push_str(code);
            return;
        }
        if let Some(table) = self.table.as_mut() {
            if table.in_cell {
                table.current_cell.push_str(code);
            }
            return;
        }
        self.block_prefix();
        self.push_wrapped(code, with_attr(fg(Color::Yellow), Attribute::Bold));
        if let Some(link) = self.active_link.as_mut() {
            link.text.push_str(code);
        }
    }

    fn soft_break(&mut self) {
        if self.code_block.is_some() {
            self.code_buf.push('\n');
            return;
        }
        if let Some(table) = self.table.as_mut() {
            if table.in_cell {
                table.current_cell.push(' ');
            }
            return;
        }
        // Reflow: a source line break inside a paragraph becomes a space.
        self.push_wrapped(" ", ContentStyle::default());
    }

    fn hard_break(&mut self) {
        if self.code_block.is_some() {
            self.code_buf.push('\n');
            return;
        }
        self.flush_line();
    }

    fn add_rule(&mut self) {
        self.flush_line();
        self.push_raw(&"\u{2500}".repeat(self.width), fg(Color::DarkGrey));
        self.flush_line();
        self.blank_line();
    }

    fn add_task_marker(&mut self, done: bool) {
        self.block_prefix();
        let marker = if done { "[x] " } else { "[ ] " };
        self.push_raw(marker, fg(Color::DarkGrey));
    }

    fn render_code_block(&mut self, code: &str) {
        let style = fg(Color::Green);
        for line in code.lines() {
            self.push_raw("  ", ContentStyle::default());
            self.push_raw(line, style);
            self.flush_line();
        }
    }

    fn render_table(&mut self, table: &TableState) {
        let mut rows: Vec<Vec<String>> = Vec::new();
        if !table.headers.is_empty() {
            rows.push(table.headers.clone());
        }
        rows.extend(table.rows.iter().filter(|r| !r.is_empty()).cloned());
        if rows.is_empty() {
            return;
        }

        let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(col_count, String::new());
        }

        let mut widths = vec![3usize; col_count];
        for row in &rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        let header = format_table_row(&rows[0], &widths);
        self.push_raw(&header, with_attr(fg(Color::Yellow), Attribute::Bold));
        self.flush_line();

        let mut sep_cells = Vec::with_capacity(col_count);
        for (idx, width) in widths.iter().enumerate() {
            let align = table
                .alignments
                .get(idx)
                .copied()
                .unwrap_or(Alignment::None);
            let sep = match align {
                Alignment::Left => format!(":{}", "-".repeat(width.saturating_sub(1))),
                Alignment::Center => format!(":{}:", "-".repeat(width.saturating_sub(2))),
                Alignment::Right => format!("{}:", "-".repeat(width.saturating_sub(1))),
                Alignment::None => "-".repeat(*width),
            };
            sep_cells.push(sep);
        }
        self.push_raw(&format_table_row(&sep_cells, &widths), fg(Color::DarkGrey));
        self.flush_line();

        for row in rows.iter().skip(1) {
            let line = format_table_row(row, &widths);
            self.push_raw(&line, ContentStyle::default());
            self.flush_line();
        }
    }
}

fn format_table_row(row: &[String], widths: &[usize]) -> String {
    let mut output = String::from("| ");
    for (idx, cell) in row.iter().enumerate() {
        let pad = widths[idx].saturating_sub(UnicodeWidthStr::width(cell.as_str()));
        output.push_str(cell);
        output.push_str(&" ".repeat(pad));
        output.push_str(" | ");
    }
    output.trim_end().to_string()
}

/// Splits text into alternating word / whitespace tokens for wrapping.
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (idx, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != is_space => {
                tokens.push(&text[start..idx]);
                start = idx;
                in_space = Some(is_space);
            }
            None => in_space = Some(is_space),
            _ => {}
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

// Post-processing passes

/// Collapses any run of 3 or more blank lines to exactly one blank line.
fn collapse_blank_runs(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut idx = 0;
    while idx < lines.len() {
        if lines[idx].is_empty() {
            let mut run = 0;
            while idx + run < lines.len() && lines[idx + run].is_empty() {
                run += 1;
            }
            if run >= 3 {
                out.push(String::new());
            } else {
                for _ in 0..run {
                    out.push(String::new());
                }
            }
            idx += run;
        } else {
            out.push(lines[idx].clone());
            idx += 1;
        }
    }
    // Trim leading and trailing blanks from the artifact body.
    while out.first().is_some_and(|l| l.is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}

/// Re-interprets literal emphasis markers the structural conversion left
/// behind. Rendering must never leak raw `**`, `*` or backtick spans into the
/// terminal; with colors disabled the markers are stripped instead of styled.
fn restyle_inline_markup(line: &str, color: bool) -> String {
    let line = restyle_marker_pairs(line, "**", with_attr(ContentStyle::default(), Attribute::Bold), color);
    let line = restyle_marker_pairs(&line, "*", with_attr(ContentStyle::default(), Attribute::Italic), color);
    restyle_marker_pairs(&line, "`", with_attr(fg(Color::Yellow), Attribute::Bold), color)
}

fn restyle_marker_pairs(line: &str, marker: &str, style: ContentStyle, color: bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    loop {
        let Some(open) = rest.find(marker) else {
            out.push_str(rest);
            break;
        };
        let after_open = &rest[open + marker.len()..];
        let Some(close) = after_open.find(marker) else {
            out.push_str(rest);
            break;
        };
        let inner = &after_open[..close];
        if inner.is_empty() {
            // Not a span, keep the literal characters and move past them.
            out.push_str(&rest[..open + marker.len()]);
            rest = after_open;
            continue;
        }
        out.push_str(&rest[..open]);
        if color {
            out.push_str(&style.apply(inner).to_string());
        } else {
            out.push_str(inner);
        }
        rest = &after_open[close + marker.len()..];
    }
    out
}

// Input pre-passes

/// Shortcodes substituted before parsing. Small on purpose: only the codes
/// that show up in real-world READMEs.
#[rustfmt::skip]
const EMOJI: &[(&str, &str)] = &[
    (":smile:", "\u{1F604}"), (":grin:", "\u{1F601}"), (":wink:", "\u{1F609}"),
    (":heart:", "\u{2764}\u{FE0F}"), (":star:", "\u{2B50}"), (":fire:", "\u{1F525}"),
    (":rocket:", "\u{1F680}"), (":tada:", "\u{1F389}"), (":warning:", "\u{26A0}\u{FE0F}"),
    (":check:", "\u{2705}"), (":white_check_mark:", "\u{2705}"), (":x:", "\u{274C}"),
    (":bulb:", "\u{1F4A1}"), (":memo:", "\u{1F4DD}"), (":book:", "\u{1F4D6}"),
    (":bug:", "\u{1F41B}"), (":zap:", "\u{26A1}"), (":thumbsup:", "\u{1F44D}"),
];

fn substitute_emoji(text: &str) -> String {
    if !text.contains(':') {
        return text.to_string();
    }
    let mut out = text.to_string();
    for (code, emoji) in EMOJI {
        if out.contains(code) {
            out = out.replace(code, emoji);
        }
    }
    out
}

/// Unescapes the common HTML entities found in inline HTML fragments.
/// Entities inside markdown text proper are already decoded by the parser.
pub fn unescape_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
