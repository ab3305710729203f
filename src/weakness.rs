use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::prompt::Console;
use crate::{Color, GameError, Nation};

/// What each color tends to stand for, shown before the weakness prompt.
pub const HINTS: [(Color, &[&str]); 3] = [
    (
        Color::R,
        &["face", "hierarchy", "authority", "intimidation", "valor", "rank", "seniority"],
    ),
    (
        Color::B,
        &["information", "exchange", "tourism", "communication", "culture", "media", "internet"],
    ),
    (
        Color::Y,
        &["day and night", "time", "leeway", "daily life", "stamina", "recovery", "sleep"],
    ),
];

/// A selection is a whole number made only of digits. Full-width digits
/// from a Japanese IME count the same as ASCII ones.
///
/// Digit strings too large for `usize` still count as whole numbers and
/// saturate, so they clamp to the last item like any other big value.
pub fn parse_selection(raw: &str) -> Option<usize> {
    let digits: String = raw.chars().map(ascii_digit).collect::<Option<_>>()?;
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(usize::MAX))
}

fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{FF10}'..='\u{FF19}' => char::from_u32(c as u32 - 0xFF10 + '0' as u32),
        _ => None,
    }
}

/// Clamp a 1-based selection into `1..=len` and return it 0-based.
pub fn clamp_index(selection: usize, len: usize) -> usize {
    selection.clamp(1, len.max(1)) - 1
}

/// Pick the most painful lost item, then a weakness color the opponent may
/// veto once.
pub fn decide_weakness<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    nation: &mut Nation,
    opponent: &Nation,
) -> Result<Color, GameError> {
    if nation.lost_items.is_empty() {
        return Err(GameError::PhaseIncomplete("elimination"));
    }

    writeln!(console, "\n[{}] Decide the national loss", nation.name)?;
    for (i, item) in nation.lost_items.iter().enumerate() {
        writeln!(console, "  {}. {}", i + 1, item)?;
    }

    let selection = loop {
        let raw = console.ask("Pick the number that hurts the most: ", None)?;
        match parse_selection(&raw) {
            Some(n) => break n,
            None => writeln!(console, "Enter a number.")?,
        }
    };
    let idx = clamp_index(selection, nation.lost_items.len());
    if idx + 1 != selection {
        debug!(selection, clamped = idx + 1, "selection clamped into range");
    }
    writeln!(console, "Chosen: {}", nation.lost_items[idx])?;

    writeln!(console, "Choose a weakness color (hints):")?;
    for (color, hints) in HINTS {
        writeln!(console, "  {}: {} <- {}", color.token(), color, hints.join(", "))?;
    }
    let mut weakness = console.ask_color("Weakness color (R/B/Y): ")?;

    writeln!(console, "{} may demand one replacement.", opponent.name)?;
    let veto = console.ask_yes_no(&format!("{}, demand a replacement? (y/n): ", opponent.name))?;
    if veto {
        weakness = console.ask_color("Replacement weakness color (R/B/Y): ")?;
    }

    nation.set_weakness(weakness)?;
    writeln!(console, "=> {}'s blank card color is {}", nation.name, weakness)?;
    info!(nation = %nation.name, color = ?weakness, veto, "weakness decided");
    Ok(weakness)
}
