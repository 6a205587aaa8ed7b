//! The main config loading module for mdwalk.
//!
//! Handles loading and deserializing settings from `mdwalk.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig]
//! used for parsing. A missing or invalid file falls back to the internal
//! defaults with a note on stderr; a broken config never prevents startup.

use crate::config::{General, Keys, PagerConfig, Render};

use serde::Deserialize;
use std::path::PathBuf;
use std::{env, fs};

/// Raw configuration as read from the toml file.
/// Deserialized directly, then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    render: Render,
    pager: PagerConfig,
    keys: Keys,
}

/// Main configuration struct for mdwalk.
#[derive(Debug, Default)]
pub struct Config {
    general: General,
    render: Render,
    pager: PagerConfig,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Config {
            general: raw.general,
            render: raw.render,
            pager: raw.pager,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the defaults.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => raw.into(),
                Err(e) => {
                    eprintln!("[mdwalk] error parsing {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Default config path: `MDW_CONFIG` override, else
    /// `<config_dir>/mdwalk/mdwalk.toml`.
    pub fn default_path() -> PathBuf {
        if let Ok(custom) = env::var("MDW_CONFIG") {
            return PathBuf::from(custom);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdwalk")
            .join("mdwalk.toml")
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn pager(&self) -> &PagerConfig {
        &self.pager
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Renderer options derived from the `[render]` section plus the
    /// process-wide color switch.
    pub fn render_options(&self) -> crate::core::render::RenderOptions {
        crate::core::render::RenderOptions {
            width: self.render.width(),
            color: crate::utils::color_enabled(),
        }
    }
}
