//! Miscellaneous utility functions for mdwalk.
//!
//! Holds the [cli] submodule for argument handling plus the process-wide
//! color switch shared by the renderer, the viewer handoff and the UI.

pub mod cli;

use once_cell::sync::Lazy;

static COLOR_ENABLED: Lazy<bool> = Lazy::new(|| std::env::var_os("NO_COLOR").is_none());

/// Whether styled output is allowed for this process.
///
/// Honors the `NO_COLOR` convention: any value, including an empty one,
/// disables all styling codes. Sampled once at first use.
pub fn color_enabled() -> bool {
    *COLOR_ENABLED
}
