//! Browse-mode key bindings.
//!
//! Each action maps to a list of key names ("up", "k", "enter", single
//! characters). Search-mode input is raw and not remappable.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    go_up: Vec<String>,
    go_down: Vec<String>,
    open: Vec<String>,
    search: Vec<String>,
    quit: Vec<String>,
}

impl Keys {
    #[inline]
    pub fn go_up(&self) -> &[String] {
        &self.go_up
    }

    #[inline]
    pub fn go_down(&self) -> &[String] {
        &self.go_down
    }

    #[inline]
    pub fn open(&self) -> &[String] {
        &self.open
    }

    #[inline]
    pub fn search(&self) -> &[String] {
        &self.search
    }

    #[inline]
    pub fn quit(&self) -> &[String] {
        &self.quit
    }
}

impl Default for Keys {
    fn default() -> Self {
        let list = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Keys {
            go_up: list(&["up", "k"]),
            go_down: list(&["down", "j"]),
            open: list(&["enter"]),
            search: list(&["/"]),
            quit: list(&["q"]),
        }
    }
}
