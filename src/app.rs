//! Application modules for mdwalk: browser state, key handling and keymap.

pub mod handlers;
pub mod keymap;
pub mod state;

pub use keymap::{Action, Keymap};
pub use state::{AppState, KeypressResult, Mode, OpenRequest};
