//! Pager settings: the external viewer command and any extra arguments.
//!
//! The standard flags (`-R`, `-i`, `-M`) and the resume-position directive are
//! always passed by the viewer handoff; `args` adds to them.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PagerConfig {
    cmd: String,
    args: Vec<String>,
}

impl PagerConfig {
    /// Constructor used by tests to point at a specific binary.
    pub fn with_cmd(cmd: &str) -> Self {
        PagerConfig {
            cmd: cmd.to_string(),
            args: Vec::new(),
        }
    }

    #[inline]
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    #[inline]
    pub fn extra_args(&self) -> &[String] {
        &self.args
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        PagerConfig {
            cmd: "less".to_string(),
            args: Vec::new(),
        }
    }
}
