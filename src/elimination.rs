use std::collections::HashSet;
use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::prompt::Console;
use crate::{GameError, Nation};

/// Default elimination prompts, asked in this order.
pub const STAGES: [&str; 5] = [
    "Needed by humanity",
    "Needed by Japan",
    "Needed by Kyoto",
    "Needed at home",
    "Needed in your bag",
];

/// Every word accepted so far, from either nation.
#[derive(Debug, Clone, Default)]
pub struct WordLedger {
    seen: HashSet<String>,
}

impl WordLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Accept `word` for `nation` unless either nation already used it.
    pub fn claim(&mut self, nation: &mut Nation, word: &str) -> Result<(), GameError> {
        if !self.seen.insert(word.to_string()) {
            return Err(GameError::DuplicateWord(word.to_string()));
        }
        nation.lost_items.push(word.to_string());
        Ok(())
    }

    /// Accept one word per nation for the same stage, or neither.
    pub fn claim_pair(
        &mut self,
        a: &mut Nation,
        word_a: &str,
        b: &mut Nation,
        word_b: &str,
    ) -> Result<(), GameError> {
        if self.is_used(word_a) {
            return Err(GameError::DuplicateWord(word_a.to_string()));
        }
        if self.is_used(word_b) || word_a == word_b {
            return Err(GameError::DuplicateWord(word_b.to_string()));
        }
        self.claim(a, word_a)?;
        self.claim(b, word_b)
    }
}

/// Collect one unused word per nation for each stage, A before B.
pub fn elimination_phase<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    a: &mut Nation,
    b: &mut Nation,
    stages: &[String],
) -> Result<WordLedger, GameError> {
    writeln!(console, "\n=== Part one: the elimination game ===")?;
    let mut ledger = WordLedger::new();
    for stage in stages {
        writeln!(console, "\n--- {stage} ---")?;
        for nation in [&mut *a, &mut *b] {
            loop {
                let word = console.ask(&format!("{}'s answer (one noun): ", nation.name), None)?;
                match ledger.claim(nation, &word) {
                    Ok(()) => break,
                    Err(GameError::DuplicateWord(_)) => {
                        debug!(nation = %nation.name, word = %word, "duplicate elimination word");
                        writeln!(console, "  That word was already used. Enter a different one.")?;
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }

    writeln!(console, "\n🏯🏰 Topple the castles! Declaration of disappearance!")?;
    for nation in [&*a, &*b] {
        writeln!(
            console,
            "From the {} empire, {} ... have vanished 💥",
            nation.name,
            nation.lost_items.join(", ")
        )?;
    }
    info!(words = ledger.len(), "elimination phase complete");
    Ok(ledger)
}
