//! Key mapping from terminal events to game inputs.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use crate::types::{Direction, GameInput, KeyBindings};

/// Configured key-code to direction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    directions: HashMap<KeyCode, Direction>,
}

impl KeyMap {
    /// Build the table from configured key names.
    ///
    /// Letters are bound in both cases so caps lock does not matter.
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self> {
        let mut directions = HashMap::new();
        for direction in Direction::ALL {
            for name in bindings.for_direction(direction) {
                for code in parse_key_name(name)? {
                    if let Some(prev) = directions.insert(code, direction) {
                        if prev != direction {
                            return Err(anyhow!(
                                "key {:?} bound to both {} and {}",
                                name,
                                prev.as_str(),
                                direction.as_str()
                            ));
                        }
                    }
                }
            }
        }
        Ok(Self { directions })
    }

    /// Direction bound to `code`, if any.
    pub fn direction(&self, code: KeyCode) -> Option<Direction> {
        self.directions.get(&code).copied()
    }

    /// Map a terminal event to a game input.
    ///
    /// Unbound keys, key releases and repeats, and every other event kind are
    /// dropped.
    pub fn map_event(&self, event: &Event) -> Option<GameInput> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.map_key(*key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(GameInput::Restart),
                _ => None,
            },
            _ => None,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<GameInput> {
        if should_quit(key) {
            return Some(GameInput::Quit);
        }
        if let Some(direction) = self.direction(key.code) {
            return Some(GameInput::Steer(direction));
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(GameInput::Restart)
            }
            _ => None,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut directions = HashMap::new();
        for (code, direction) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ] {
            directions.insert(code, direction);
        }
        Self { directions }
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn parse_key_name(name: &str) -> Result<Vec<KeyCode>> {
    let codes = match name.to_lowercase().as_str() {
        "up" => vec![KeyCode::Up],
        "down" => vec![KeyCode::Down],
        "left" => vec![KeyCode::Left],
        "right" => vec![KeyCode::Right],
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => vec![
                    KeyCode::Char(c.to_ascii_lowercase()),
                    KeyCode::Char(c.to_ascii_uppercase()),
                ],
                (Some(c), None) if !c.is_whitespace() => vec![KeyCode::Char(c)],
                _ => return Err(anyhow!("unknown key name {:?}", name)),
            }
        }
    };
    Ok(codes)
}
