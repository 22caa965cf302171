//! Match configuration: defaults, an optional TOML file and environment
//! overrides.
//!
//! `POKEREMU_CONFIG` names the file; every key in it is optional.
//! `POKEREMU_SEED` overrides the deck seed.

use std::fs;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emulator::PlayerInfo;
use crate::errors::EngineError;
use crate::rules::GameRule;

pub const CONFIG_ENV: &str = "POKEREMU_CONFIG";
pub const SEED_ENV: &str = "POKEREMU_SEED";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    pub player_num: usize,
    pub max_round: u32,
    pub small_blind_amount: u32,
    pub ante: u32,
    pub initial_stack: u32,
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_num: 2,
            max_round: 10,
            small_blind_amount: 5,
            ante: 0,
            initial_stack: 100,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn game_rule(&self) -> Result<GameRule, EngineError> {
        GameRule::new(
            self.player_num,
            self.max_round,
            self.small_blind_amount,
            self.ante,
        )
    }

    /// Seats for `uuids` in table order, each starting with `initial_stack`.
    /// Names default to the uuid.
    pub fn players(&self, uuids: &[&str]) -> Vec<PlayerInfo> {
        uuids
            .iter()
            .map(|uuid| PlayerInfo::new(*uuid, *uuid, self.initial_stack))
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    player_num: Option<usize>,
    #[serde(default)]
    max_round: Option<u32>,
    #[serde(default)]
    small_blind_amount: Option<u32>,
    #[serde(default)]
    ante: Option<u32>,
    #[serde(default)]
    initial_stack: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}

impl FileConfig {
    fn apply(self, cfg: &mut MatchConfig) {
        if let Some(v) = self.player_num {
            cfg.player_num = v;
        }
        if let Some(v) = self.max_round {
            cfg.max_round = v;
        }
        if let Some(v) = self.small_blind_amount {
            cfg.small_blind_amount = v;
        }
        if let Some(v) = self.ante {
            cfg.ante = v;
        }
        if let Some(v) = self.initial_stack {
            cfg.initial_stack = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = Some(v);
        }
    }
}

/// Defaults, then the file named by `POKEREMU_CONFIG`, then `POKEREMU_SEED`.
pub fn load() -> Result<MatchConfig, ConfigError> {
    let mut cfg = MatchConfig::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let text = fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&text)?;
        file.apply(&mut cfg);
    }

    if let Ok(seed) = std::env::var(SEED_ENV) {
        if !seed.is_empty() {
            cfg.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::Invalid(format!("invalid seed {seed:?}")))?,
            );
        }
    }

    validate(&cfg)?;
    Ok(cfg)
}

/// Parses TOML text on top of the defaults. The environment is not read.
pub fn load_from_str(text: &str) -> Result<MatchConfig, ConfigError> {
    let mut cfg = MatchConfig::default();
    let file: FileConfig = toml::from_str(text)?;
    file.apply(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &MatchConfig) -> Result<(), ConfigError> {
    if cfg.initial_stack == 0 {
        return Err(ConfigError::Invalid("initial_stack must be >0".into()));
    }
    cfg.game_rule()
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}
