//! External configuration loader.
//!
//! Reads `stockout.toml` from the executable's directory (or CWD).
//! Falls back to the built-in rules if the file is missing or unusable.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::elimination::STAGES;
use crate::game::DEFAULT_PHRASE_LIMIT;
use crate::{ConfigError, STAGE_COUNT};

pub const CONFIG_FILE: &str = "stockout.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub rules: RulesConfig,
    pub stages: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulesConfig {
    pub long_phrase_limit: usize,
    pub seed: Option<u64>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    rules: TomlRules,
    #[serde(default)]
    elimination: TomlElimination,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_long_phrase_limit")]
    long_phrase_limit: usize,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlElimination {
    #[serde(default = "default_stages")]
    stages: Vec<String>,
}

// ── Defaults ──

fn default_long_phrase_limit() -> usize {
    DEFAULT_PHRASE_LIMIT
}

fn default_stages() -> Vec<String> {
    STAGES.iter().map(|s| s.to_string()).collect()
}

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            long_phrase_limit: default_long_phrase_limit(),
            seed: None,
        }
    }
}

impl Default for TomlElimination {
    fn default() -> Self {
        TomlElimination {
            stages: default_stages(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    fn from_toml(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            rules: RulesConfig {
                long_phrase_limit: toml_cfg.rules.long_phrase_limit,
                seed: toml_cfg.rules.seed,
            },
            stages: toml_cfg.elimination.stages,
        }
    }

    /// Parse a config document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let toml_cfg: TomlConfig = toml::from_str(text)?;
        let found = toml_cfg.elimination.stages.len();
        if found != STAGE_COUNT {
            return Err(ConfigError::StageCount {
                expected: STAGE_COUNT,
                found,
            });
        }
        Ok(GameConfig::from_toml(toml_cfg))
    }

    /// Load an explicitly requested file. Any problem is an error.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `stockout.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// A missing file means defaults; a broken one is reported and ignored.
    pub fn load() -> Self {
        load_from_dirs(&candidate_dirs())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// First readable config in `search_dirs` wins.
fn load_from_dirs(search_dirs: &[PathBuf]) -> GameConfig {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            continue;
        }
        match GameConfig::from_path(&path) {
            Ok(cfg) => {
                debug!(path = %path.display(), "loaded config");
                return cfg;
            }
            Err(e @ ConfigError::Read { .. }) => {
                warn!("{e}");
            }
            Err(e) => {
                warn!(path = %path.display(), "{e}; using default settings");
                return GameConfig::default();
            }
        }
    }
    GameConfig::default()
}
