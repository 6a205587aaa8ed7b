//! Error taxonomy for mdwalk.
//!
//! Discovery errors ([BrowseError::NotFound], [BrowseError::EmptyDirectory]) are fatal
//! and reported before any interactive state is entered. Errors raised inside a
//! browsing session (a file vanished between listing and opening, the pager refused
//! to start) are caught at the transition boundary and shown as a status line
//! without ending the session.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// All errors surfaced by the document store, renderer and viewer handoff.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The invocation target does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The target directory exists but contains no matching documents.
    /// Reported differently from [BrowseError::NotFound] by the caller.
    #[error("no markdown documents found in {0}")]
    EmptyDirectory(PathBuf),

    /// A specific document could not be read while opening it.
    /// Recoverable: the browser stays in its current mode.
    #[error("could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external pager could not be started.
    #[error("failed to launch pager '{cmd}': {source}")]
    PagerLaunch {
        cmd: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
