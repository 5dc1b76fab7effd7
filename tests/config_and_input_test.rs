use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use tui_snake::engine::{config_from_json, load_config};
use tui_snake::input::KeyMap;
use tui_snake::types::{Direction, GameConfig, GameInput};

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn config_file_feeds_the_key_map() {
    let mut config = GameConfig {
        tick_ms: 120,
        apple_count: 3,
        ..GameConfig::default()
    };
    config.keys.up = vec!["i".to_string()];

    let path = std::env::temp_dir().join(format!("tui-snake-config-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    let loaded = load_config(Some(&path));
    let _ = std::fs::remove_file(&path);
    let loaded = loaded.unwrap();

    assert_eq!(loaded.tick_ms, 120);
    assert_eq!(loaded.apple_count, 3);

    let keymap = KeyMap::from_bindings(&loaded.keys).unwrap();
    assert_eq!(keymap.map_event(&press(KeyCode::Char('i'))), Some(GameInput::Steer(Direction::Up)));
    assert_eq!(keymap.map_event(&press(KeyCode::Up)), None);
    assert_eq!(keymap.map_event(&press(KeyCode::Char('a'))), Some(GameInput::Steer(Direction::Left)));
}

#[test]
fn invalid_config_is_rejected_on_load() {
    let path = std::env::temp_dir().join(format!("tui-snake-bad-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"cols": 3, "snake_length": 5}"#).unwrap();
    let result = load_config(Some(&path));
    let _ = std::fs::remove_file(&path);

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("invalid configuration"));
}

#[test]
fn default_config_round_trips_through_json() {
    let config = GameConfig::default();
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(config_from_json(&text).unwrap(), config);
    assert!(config.validate().is_ok());
}
