//! Render settings: the fixed output width of the styled artifact.

use serde::Deserialize;

const MIN_WIDTH: usize = 20;
const DEFAULT_WIDTH: usize = 80;
const MAX_WIDTH: usize = 200;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Render {
    width: usize,
}

impl Render {
    /// Output width, clamped to a sane range.
    #[inline]
    pub fn width(&self) -> usize {
        self.width.clamp(MIN_WIDTH, MAX_WIDTH)
    }
}

impl Default for Render {
    fn default() -> Self {
        Render {
            width: DEFAULT_WIDTH,
        }
    }
}
