//! General settings: which file extensions count as documents and which
//! directories are excluded from the scan on top of the built-in list.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    extensions: Vec<String>,
    exclude: Vec<String>,
}

impl General {
    #[inline]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Additional directory names pruned during discovery.
    #[inline]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }
}

impl Default for General {
    fn default() -> Self {
        General {
            extensions: vec!["md".to_string(), "markdown".to_string()],
            exclude: Vec::new(),
        }
    }
}
