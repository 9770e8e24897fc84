use anyhow::Context;
use pairmatch_core::GameConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const GAME_CONFIG_FILE: &str = "game.json";
pub const CONFIG_ENV: &str = "PAIRMATCH_CONFIG";

/// Loads `<dir>/game.json`, or the built-in defaults when the file is absent.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(GAME_CONFIG_FILE);
    if !path.exists() {
        log::info!("{} not found, using default game config", path.display());
        let config = GameConfig::default();
        config.validate().context("validate default config")?;
        return Ok(config);
    }
    load_game_config_file(&path)
}

pub fn load_game_config_file(path: &Path) -> anyhow::Result<GameConfig> {
    let config: GameConfig = load_json(path)?;
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    log::info!("loaded game config from {}", path.display());
    Ok(config)
}

/// Resolves the config source from an explicit path, then `PAIRMATCH_CONFIG`,
/// then `<assets>/game.json`.
pub fn resolve_game_config(explicit: Option<&Path>, assets_dir: &Path) -> anyhow::Result<GameConfig> {
    if let Some(path) = explicit {
        return load_game_config_file(path);
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return load_game_config_file(&PathBuf::from(path));
    }
    load_game_config(assets_dir)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
