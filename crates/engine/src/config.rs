//! Configuration loading.
//!
//! Order: built-in defaults, then an optional JSON file, then environment
//! overrides. The result is validated once; nothing reloads it later.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SNAKE_CONFIG` | path of a JSON config file |
//! | `SNAKE_TICK_MS` | `tick_ms` |
//! | `SNAKE_FPS` | `fps` |
//! | `SNAKE_LENGTH` | `snake_length` |
//! | `SNAKE_APPLE_COUNT` | `apple_count` |
//! | `SNAKE_POINTS_PER_APPLE` | `points_per_apple` |
//! | `SNAKE_GROWTH` | `growth_per_apple` |
//! | `SNAKE_COLS` | `cols` |
//! | `SNAKE_ROWS` | `rows` |

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::types::GameConfig;

pub const CONFIG_PATH_ENV: &str = "SNAKE_CONFIG";

/// Load the configuration from `path` (or `SNAKE_CONFIG`) and the process
/// environment.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let path: Option<PathBuf> = path.map(Path::to_path_buf).or_else(|| {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    });

    let mut config = match path {
        Some(path) => config_from_file(&path)?,
        None => GameConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

pub fn config_from_file(path: &Path) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    config_from_json(&text).with_context(|| format!("in config file {}", path.display()))
}

/// Parse a JSON config. Missing fields keep their defaults.
pub fn config_from_json(text: &str) -> Result<GameConfig> {
    serde_json::from_str(text).context("parsing config JSON")
}

/// Override fields from `lookup` (normally the process environment).
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides(config: &mut GameConfig, lookup: impl Fn(&str) -> Option<String>) {
    fn set<T: FromStr>(slot: &mut T, value: Option<String>) {
        if let Some(v) = value.and_then(|s| s.trim().parse().ok()) {
            *slot = v;
        }
    }

    set(&mut config.tick_ms, lookup("SNAKE_TICK_MS"));
    set(&mut config.fps, lookup("SNAKE_FPS"));
    set(&mut config.snake_length, lookup("SNAKE_LENGTH"));
    set(&mut config.apple_count, lookup("SNAKE_APPLE_COUNT"));
    set(&mut config.points_per_apple, lookup("SNAKE_POINTS_PER_APPLE"));
    set(&mut config.growth_per_apple, lookup("SNAKE_GROWTH"));
    set(&mut config.cols, lookup("SNAKE_COLS"));
    set(&mut config.rows, lookup("SNAKE_ROWS"));
}
