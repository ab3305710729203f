use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub mod config;
pub mod elimination;
pub mod error;
pub mod game;
pub mod nation;
pub mod prompt;
pub mod weakness;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{ConfigError, GameError};
pub use nation::Nation;

/// Number of turns in the main game
pub const TURNS: u8 = 5;
/// Turns whose cards are recorded into a nation's `past_cards`
pub const DOMESTIC_TURNS: u8 = 3;
/// The only turn a tails coin can twist
pub const TWIST_TURN: u8 = 4;
/// Number of elimination prompts, and so of lost items per nation
pub const STAGE_COUNT: usize = 5;

/// The three card colors. No other color exists anywhere in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    /// Pride
    R,
    /// Trust
    B,
    /// Leisure
    Y,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::R, Color::B, Color::Y];

    /// Tokens accepted at a color prompt, matched exactly.
    pub const TOKENS: [&'static str; 3] = ["R", "B", "Y"];

    pub fn token(self) -> &'static str {
        match self {
            Color::R => "R",
            Color::B => "B",
            Color::Y => "Y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Color::R => "🟥Pride",
            Color::B => "🟦Trust",
            Color::Y => "🟨Leisure",
        }
    }

    pub fn from_token(token: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.token() == token)
    }

    /// Cyclic remap used by the twist: R -> B -> Y -> R.
    pub fn twisted(self) -> Color {
        match self {
            Color::R => Color::B,
            Color::B => Color::Y,
            Color::Y => Color::R,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_token(s).ok_or_else(|| GameError::InvalidColor(s.to_string()))
    }
}

/// Join color labels with spaces, or `(none)` for an empty list.
pub fn color_list(colors: &[Color]) -> String {
    if colors.is_empty() {
        return "(none)".to_string();
    }
    colors
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The world tally. Every color always has an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    #[serde(deserialize_with = "deserialize_score")]
    score: BTreeMap<Color, u32>,
}

/// Colors missing from a stored tally read back as zero.
fn deserialize_score<'de, D>(deserializer: D) -> Result<BTreeMap<Color, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = BTreeMap::<Color, u32>::deserialize(deserializer)?;
    let mut score = WorldState::new().score;
    score.extend(stored);
    Ok(score)
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            score: Color::ALL.into_iter().map(|c| (c, 0)).collect(),
        }
    }

    /// Build a tally from explicit R/B/Y counts.
    pub fn from_counts(r: u32, b: u32, y: u32) -> Self {
        Self {
            score: BTreeMap::from([(Color::R, r), (Color::B, b), (Color::Y, y)]),
        }
    }

    pub fn get(&self, color: Color) -> u32 {
        self.score.get(&color).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, color: Color) {
        *self.score.entry(color).or_insert(0) += 1;
    }

    pub fn total(&self) -> u32 {
        self.score.values().sum()
    }

    /// Colors holding the highest count, in R/B/Y order.
    pub fn leaders(&self) -> Vec<Color> {
        let max = Color::ALL.into_iter().map(|c| self.get(c)).max().unwrap_or(0);
        Color::ALL.into_iter().filter(|&c| self.get(c) == max).collect()
    }

    pub fn ending(&self) -> Ending {
        resolve_ending(self)
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "🟥{} / 🟦{} / 🟨{}",
            self.get(Color::R),
            self.get(Color::B),
            self.get(Color::Y)
        )
    }
}

/// The four ways a game can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    OpenConflict,
    Alliance,
    InternalCollapse,
    BlankAgreement,
}

impl Ending {
    /// Ending bound to a color that leads the tally alone.
    pub fn for_color(color: Color) -> Ending {
        match color {
            Color::R => Ending::OpenConflict,
            Color::B => Ending::Alliance,
            Color::Y => Ending::InternalCollapse,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ending::OpenConflict => "Open-conflict ending",
            Ending::Alliance => "Alliance ending",
            Ending::InternalCollapse => "Internal-collapse ending",
            Ending::BlankAgreement => "Blank-agreement ending",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A unique leader picks its ending; any tie at the top, including all
/// zeros, is a blank agreement.
pub fn resolve_ending(world: &WorldState) -> Ending {
    match world.leaders().as_slice() {
        [only] => Ending::for_color(*only),
        _ => Ending::BlankAgreement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twist_is_a_three_cycle_without_fixed_points() {
        for c in Color::ALL {
            assert_ne!(c.twisted(), c);
            assert_eq!(c.twisted().twisted().twisted(), c);
        }
        assert_eq!(Color::R.twisted(), Color::B);
        assert_eq!(Color::B.twisted(), Color::Y);
        assert_eq!(Color::Y.twisted(), Color::R);
    }

    #[test]
    fn tokens_parse_exactly() {
        assert_eq!("R".parse::<Color>().unwrap(), Color::R);
        assert_eq!(Color::from_token("Y"), Some(Color::Y));
        assert!("r".parse::<Color>().is_err());
        assert!(Color::from_token("G").is_none());
    }

    #[test]
    fn new_world_has_every_color_at_zero() {
        let w = WorldState::new();
        for c in Color::ALL {
            assert_eq!(w.get(c), 0);
        }
        assert_eq!(w.to_string(), "🟥0 / 🟦0 / 🟨0");
    }

    #[test]
    fn unique_leader_picks_its_ending() {
        assert_eq!(resolve_ending(&WorldState::from_counts(3, 1, 1)), Ending::OpenConflict);
        assert_eq!(resolve_ending(&WorldState::from_counts(0, 2, 1)), Ending::Alliance);
        assert_eq!(resolve_ending(&WorldState::from_counts(1, 0, 4)), Ending::InternalCollapse);
    }

    #[test]
    fn ties_are_blank_agreements() {
        assert_eq!(resolve_ending(&WorldState::from_counts(2, 2, 0)), Ending::BlankAgreement);
        assert_eq!(resolve_ending(&WorldState::from_counts(1, 1, 1)), Ending::BlankAgreement);
        assert_eq!(resolve_ending(&WorldState::new()), Ending::BlankAgreement);
    }

    #[test]
    fn stored_tally_always_has_every_color() {
        let w: WorldState = serde_json::from_str(r#"{"score":{"B":2}}"#).unwrap();
        assert_eq!(w, WorldState::from_counts(0, 2, 0));
        assert_eq!(w.total(), 2);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"score":{"R":0,"B":2,"Y":0}}"#);
    }

    #[test]
    fn color_list_formats_labels() {
        assert_eq!(color_list(&[]), "(none)");
        assert_eq!(color_list(&[Color::R, Color::Y]), "🟥Pride 🟨Leisure");
    }
}
