use std::path::PathBuf;

use crate::Color;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("input closed before the game finished")]
    InputClosed,
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a color: {0:?} (expected R, B or Y)")]
    InvalidColor(String),
    #[error("word already used: {0}")]
    DuplicateWord(String),
    #[error("{nation} cannot borrow {color}: not among the opponent's past cards")]
    IllegalBorrow { nation: String, color: Color },
    #[error("{0} already has a weakness color")]
    WeaknessAlreadySet(String),
    #[error("phase not complete: {0}")]
    PhaseIncomplete(&'static str),
    #[error("all turns have been played")]
    GameOver,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("expected {expected} elimination stages, found {found}")]
    StageCount { expected: usize, found: usize },
}
