//! Viewer handoff for mdwalk.
//!
//! Writes a rendered artifact to a uniquely named transient file and hands the
//! terminal over to the external pager until it exits. The pager inherits the
//! terminal's standard streams directly; while the child runs, the calling
//! process performs no terminal I/O.
//!
//! The transient file is backed by [tempfile::NamedTempFile], so it is removed
//! when the handle drops on every error and panic path. Drops do not run on
//! signal death, and while the child runs raw mode is off, so a Ctrl-C reaches
//! the whole foreground process group; [InterruptGuard] keeps SIGINT away from
//! the parent for the duration of the child wait so cleanup always runs. A
//! failed deletion is logged and ignored; it never aborts the flow.

use crate::config::PagerConfig;
use crate::core::error::BrowseError;

use crossterm::style::{Attribute, ContentStyle};
use std::io::{self, Write};
use std::process::Command;
use tempfile::NamedTempFile;

/// A completed styled-text buffer ready for viewing, plus the document's
/// display name for the artifact header. Immutable once built.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    title: String,
    body: String,
}

impl RenderedArtifact {
    pub fn new(title: String, body: String) -> Self {
        RenderedArtifact { title, body }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Writes `artifact` to a transient file and blocks on the pager until it
/// exits. `resume_line`, when greater than 1, becomes an initial-position
/// directive so the viewer opens directly at a search match.
///
/// The caller is responsible for releasing raw terminal mode before calling
/// and re-acquiring it afterwards, as the event loop does around each open.
pub fn display(
    artifact: &RenderedArtifact,
    resume_line: Option<usize>,
    pager: &PagerConfig,
) -> Result<(), BrowseError> {
    let file = write_artifact(artifact)?;
    let _interrupt = InterruptGuard::install();

    let mut cmd = Command::new(pager.cmd());
    // -R: raw control chars pass through, -i: case-insensitive search,
    // -M: long prompt with a percentage-of-file position.
    cmd.arg("-R").arg("-i").arg("-M");
    for arg in pager.extra_args() {
        cmd.arg(arg);
    }
    if let Some(line) = resume_line.filter(|l| *l > 1) {
        cmd.arg(format!("+{line}"));
    }
    cmd.arg(file.path());

    let status = cmd.status().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            BrowseError::PagerLaunch {
                cmd: pager.cmd().to_string(),
                source: io::Error::other(format!(
                    "'{}' was not found in PATH",
                    pager.cmd()
                )),
            }
        } else {
            BrowseError::PagerLaunch {
                cmd: pager.cmd().to_string(),
                source: e,
            }
        }
    });

    // Explicit close so a deletion failure is reported here instead of being
    // swallowed by drop. The flow continues either way.
    if let Err(e) = file.close() {
        eprintln!("[mdwalk] could not remove transient view file: {e}");
    }

    status.map(|_| ())
}

/// Checks that the configured pager resolves to an executable.
/// Used to fail a view attempt early with a clear message.
pub fn pager_available(pager: &PagerConfig) -> bool {
    which::which(pager.cmd()).is_ok()
}

/// Keeps SIGINT from terminating the parent while the pager child runs.
///
/// With raw mode released, Ctrl-C is delivered as SIGINT to the whole
/// foreground process group. The child handles it itself; the parent must
/// survive it so the transient file is removed and the terminal loop can
/// re-acquire raw mode. The registered no-op action is dropped with the
/// guard; inside the browser loop SIGINT cannot occur again because raw
/// mode turns Ctrl-C back into a key event.
struct InterruptGuard {
    id: Option<signal_hook::SigId>,
}

impl InterruptGuard {
    fn install() -> Self {
        // An empty handler is async-signal-safe.
        let id = unsafe { signal_hook::low_level::register(signal_hook::consts::SIGINT, || {}) };
        InterruptGuard { id: id.ok() }
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Writes the artifact to the platform temp dir: a styled header line with the
/// document's display name, a blank line, then the rendered body.
fn write_artifact(artifact: &RenderedArtifact) -> Result<NamedTempFile, BrowseError> {
    let mut file = tempfile::Builder::new()
        .prefix("mdwalk-view-")
        .suffix(".txt")
        .tempfile()
        .map_err(BrowseError::Io)?;

    let header = if crate::utils::color_enabled() {
        let mut style = ContentStyle::default();
        style.attributes.set(Attribute::Bold);
        style.attributes.set(Attribute::Underlined);
        style.apply(artifact.title()).to_string()
    } else {
        artifact.title().to_string()
    };

    writeln!(file, "{header}")?;
    writeln!(file)?;
    file.write_all(artifact.body().as_bytes())?;
    file.flush()?;
    Ok(file)
}
