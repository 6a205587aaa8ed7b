//! core.rs
//! Core modules for mdwalk: document discovery, content search, markdown
//! rendering, the viewer handoff and the terminal event loop.

pub mod docs;
pub mod error;
pub mod pager;
pub mod render;
pub mod search;
pub mod terminal;

pub use docs::{DocumentRef, resolve};
pub use error::BrowseError;
pub use pager::RenderedArtifact;
pub use search::{SearchResult, search};
