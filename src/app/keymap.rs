//! Key mapping for the browse mode of mdwalk.
//!
//! Defines the key-to-action table, parsed from the config. Search mode reads
//! raw input (printable characters, backspace, escape) and is not remappable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions available in browse mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    GoUp,
    GoDown,
    Open,
    EnterSearch,
    Quit,
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the `[keys]` section of the config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        let mut bind = |names: &[String], action: Action| {
            for name in names {
                if let Some(key) = parse_key(name) {
                    map.insert(key, action);
                }
            }
        };

        bind(keys.go_up(), Action::GoUp);
        bind(keys.go_down(), Action::GoDown);
        bind(keys.open(), Action::Open);
        bind(keys.search(), Action::EnterSearch);
        bind(keys.quit(), Action::Quit);

        Keymap { map }
    }

    pub fn lookup(&self, event: KeyEvent) -> Option<Action> {
        let key = Key {
            code: event.code,
            modifiers: event.modifiers & !KeyModifiers::SHIFT,
        };
        self.map.get(&key).copied()
    }
}

fn parse_key(s: &str) -> Option<Key> {
    let code = match s.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        _ if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
        _ => return None,
    };
    Some(Key {
        code,
        modifiers: KeyModifiers::NONE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn default_bindings_resolve() {
        let keymap = Keymap::from_config(&Config::default());
        let cases = [
            (KeyCode::Up, Action::GoUp),
            (KeyCode::Char('k'), Action::GoUp),
            (KeyCode::Down, Action::GoDown),
            (KeyCode::Char('j'), Action::GoDown),
            (KeyCode::Enter, Action::Open),
            (KeyCode::Char('/'), Action::EnterSearch),
            (KeyCode::Char('q'), Action::Quit),
        ];
        for (code, want) in cases {
            let event = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(keymap.lookup(event), Some(want), "binding for {code:?}");
        }
    }

    #[test]
    fn unknown_key_maps_to_nothing() {
        let keymap = Keymap::from_config(&Config::default());
        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(keymap.lookup(event), None);
    }
}
