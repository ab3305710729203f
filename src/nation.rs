use serde::{Deserialize, Serialize};

use crate::{Color, GameError, DOMESTIC_TURNS};

/// One player's nation and everything it accumulates during the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
    pub name: String,
    pub lost_items: Vec<String>,
    pub weakness_color: Option<Color>,
    pub past_cards: Vec<Color>,
}

impl Nation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lost_items: Vec::new(),
            weakness_color: None,
            past_cards: Vec::new(),
        }
    }

    /// Weakness is assigned once per game.
    pub fn set_weakness(&mut self, color: Color) -> Result<(), GameError> {
        if self.weakness_color.is_some() {
            return Err(GameError::WeaknessAlreadySet(self.name.clone()));
        }
        self.weakness_color = Some(color);
        Ok(())
    }

    pub fn is_weakness(&self, color: Color) -> bool {
        self.weakness_color == Some(color)
    }

    /// Whether an opponent may borrow `color` from this nation's past.
    pub fn can_lend(&self, color: Color) -> bool {
        self.past_cards.contains(&color)
    }

    /// Record a played card. Only domestic turns are remembered.
    pub fn record_card(&mut self, turn: u8, color: Color) -> bool {
        if turn > DOMESTIC_TURNS {
            return false;
        }
        self.past_cards.push(color);
        true
    }
}
