//! Browser state for mdwalk.
//!
//! [AppState] owns the interaction mode, the selection cursor, the incremental
//! search query and the active list (the file list in browse mode, the result
//! list in search mode). Keystrokes mutate it through the transition functions
//! in `app/handlers.rs`, which return a [KeypressResult] describing the side
//! effect the terminal loop must perform.
//!
//! Invariant: `cursor < active_len()` whenever the active list is non-empty,
//! and `cursor == 0` when it is empty. Mode transitions reset the cursor and
//! clear the query and results.

use crate::app::keymap::Keymap;
use crate::config::Config;
use crate::core::docs::DocumentRef;
use crate::core::search::SearchResult;

use std::path::{Path, PathBuf};

/// The two interaction modes of the browser.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mode {
    Browse,
    Search,
}

/// A request to open a document in the external viewer, produced by an
/// Enter transition. Search results carry their matched line so the viewer
/// can start there.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    doc: DocumentRef,
    resume_line: Option<usize>,
}

impl OpenRequest {
    pub(crate) fn with_resume(doc: DocumentRef, resume_line: Option<usize>) -> Self {
        OpenRequest { doc, resume_line }
    }

    #[inline]
    pub fn doc(&self) -> &DocumentRef {
        &self.doc
    }

    #[inline]
    pub fn resume_line(&self) -> Option<usize> {
        self.resume_line
    }
}

/// The side effect of one processed keypress.
pub enum KeypressResult {
    /// Key not bound to anything; state unchanged.
    Continue,
    /// State changed; the loop repaints.
    Redraw,
    /// Clear the screen and terminate with success.
    Quit,
    /// Hand the terminal to the viewer for this document.
    Open(OpenRequest),
}

/// Central state of the browser for one process invocation.
///
/// Owns the file list and search results for its lifetime; the terminal loop
/// holds a mutable borrow and drives it one key event at a time.
pub struct AppState<'a> {
    config: &'a Config,
    keymap: Keymap,

    root: PathBuf,
    files: Vec<DocumentRef>,

    mode: Mode,
    cursor: usize,
    query: String,
    results: Vec<SearchResult>,

    status: Option<String>,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config, root: PathBuf, files: Vec<DocumentRef>) -> Self {
        AppState {
            keymap: Keymap::from_config(config),
            config,
            root,
            files,
            mode: Mode::Browse,
            cursor: 0,
            query: String::new(),
            results: Vec::new(),
            status: None,
        }
    }

    // Accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub(crate) fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn files(&self) -> &[DocumentRef] {
        &self.files
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    pub(crate) fn clear_status(&mut self) {
        self.status = None;
    }

    /// Length of the list the cursor currently indexes.
    pub fn active_len(&self) -> usize {
        match self.mode {
            Mode::Browse => self.files.len(),
            Mode::Search => self.results.len(),
        }
    }

    // Transitions shared between handlers and the terminal loop

    /// Moves the cursor with wrap-around over the active list.
    pub(crate) fn move_cursor(&mut self, down: bool) {
        let len = self.active_len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if down {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    pub(crate) fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.query.clear();
        self.results.clear();
        self.cursor = 0;
    }

    pub(crate) fn leave_search(&mut self) {
        self.mode = Mode::Browse;
        self.query.clear();
        self.results.clear();
        self.cursor = 0;
    }

    /// Recomputes search results for the current query: a full rescan of the
    /// file list, by design. Empty query means no results ("type to search").
    pub(crate) fn recompute_results(&mut self) {
        self.results = crate::core::search::search(&self.files, &self.query);
        self.cursor = 0;
    }

    pub(crate) fn query_push(&mut self, c: char) {
        self.query.push(c);
        self.recompute_results();
    }

    pub(crate) fn query_pop(&mut self) {
        self.query.pop();
        if self.query.is_empty() {
            self.results.clear();
            self.cursor = 0;
        } else {
            self.recompute_results();
        }
    }

    /// Re-enters browse mode after the viewer exits: selection reset to the
    /// top of the list, any search state discarded.
    pub fn return_from_viewer(&mut self) {
        self.leave_search();
    }
}
