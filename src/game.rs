use std::fmt;
use std::io::{BufRead, Write};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::elimination::elimination_phase;
use crate::prompt::Console;
use crate::weakness::decide_weakness;
use crate::{
    color_list, Color, Ending, GameError, Nation, WorldState, DOMESTIC_TURNS, TURNS, TWIST_TURN,
};

/// Phrases longer than this many characters turn the card into leisure.
pub const DEFAULT_PHRASE_LIMIT: usize = 20;

/// Pre-game coin. Tails arms the twist for turn 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    pub fn toss<R: Rng>(rng: &mut R) -> Coin {
        if rng.gen_bool(0.5) {
            Coin::Heads
        } else {
            Coin::Tails
        }
    }

    pub fn twists(self) -> bool {
        self == Coin::Tails
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Coin::Heads => "heads",
            Coin::Tails => "tails",
        };
        write!(f, "{}", s)
    }
}

/// Turns 4 and 5 borrow from the opponent's domestic cards.
pub fn is_borrowing_turn(turn: u8) -> bool {
    turn > DOMESTIC_TURNS
}

/// What one nation put down in a turn, before the long-phrase rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub chosen: Color,
    pub phrase: String,
}

impl Play {
    pub fn new(chosen: Color, phrase: impl Into<String>) -> Self {
        Self {
            chosen,
            phrase: phrase.into(),
        }
    }

    /// Length is counted in characters, not bytes.
    pub fn is_long(&self, limit: usize) -> bool {
        self.phrase.chars().count() > limit
    }

    /// The color that actually counts.
    pub fn color(&self, limit: usize) -> Color {
        if self.is_long(limit) {
            Color::Y
        } else {
            self.chosen
        }
    }
}

/// How a turn's pair of colors moved the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOutcome {
    Mismatch,
    Absorbed(Color),
    Twisted { from: Color, to: Color },
    Resonance(Color),
}

impl fmt::Display for ScoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreOutcome::Mismatch => write!(f, "Different colors, nothing changes."),
            ScoreOutcome::Absorbed(c) => write!(
                f,
                "{c} is someone's blank card. Resonance, but no point."
            ),
            ScoreOutcome::Twisted { from, to } => {
                write!(f, "Twist! {from} resonance -> {to} +1")
            }
            ScoreOutcome::Resonance(c) => write!(f, "Resonance! {c} +1"),
        }
    }
}

/// Apply one turn's colors to the tally. At most one color gains one point.
///
/// A weakness on the shared color absorbs the resonance before the twist is
/// considered.
pub fn score_turn(
    world: &mut WorldState,
    a: &Nation,
    b: &Nation,
    color_a: Color,
    color_b: Color,
    twist: bool,
) -> ScoreOutcome {
    if color_a != color_b {
        return ScoreOutcome::Mismatch;
    }
    let color = color_a;
    if a.is_weakness(color) || b.is_weakness(color) {
        return ScoreOutcome::Absorbed(color);
    }
    if twist {
        let to = color.twisted();
        world.increment(to);
        ScoreOutcome::Twisted { from: color, to }
    } else {
        world.increment(color);
        ScoreOutcome::Resonance(color)
    }
}

/// A card as it landed on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub nation: String,
    pub chosen: Color,
    pub color: Color,
    pub phrase: String,
}

impl PlayedCard {
    pub fn overridden(&self) -> bool {
        self.chosen != self.color
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u8,
    pub twist: bool,
    pub a: PlayedCard,
    pub b: PlayedCard,
    pub outcome: ScoreOutcome,
    pub world: WorldState,
}

/// The five-turn main game, advanced one turn at a time.
#[derive(Debug, Clone)]
pub struct Rounds {
    turn: u8,
    coin: Coin,
    world: WorldState,
    phrase_limit: usize,
}

impl Rounds {
    pub fn new(coin: Coin, phrase_limit: usize) -> Self {
        Self {
            turn: 1,
            coin,
            world: WorldState::new(),
            phrase_limit,
        }
    }

    /// The turn about to be played.
    pub fn turn(&self) -> u8 {
        self.turn
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn phrase_limit(&self) -> usize {
        self.phrase_limit
    }

    pub fn is_finished(&self) -> bool {
        self.turn > TURNS
    }

    /// Ending once every turn is played.
    pub fn ending(&self) -> Option<Ending> {
        self.is_finished().then(|| self.world.ending())
    }

    /// On borrowing turns the raw choice must come from the opponent's past.
    pub fn check_borrow(
        &self,
        nation: &Nation,
        opponent: &Nation,
        chosen: Color,
    ) -> Result<(), GameError> {
        if is_borrowing_turn(self.turn) && !opponent.can_lend(chosen) {
            return Err(GameError::IllegalBorrow {
                nation: nation.name.clone(),
                color: chosen,
            });
        }
        Ok(())
    }

    /// Resolve a turn: long-phrase overrides, domestic recording, scoring.
    pub fn play_turn(
        &mut self,
        a: &mut Nation,
        b: &mut Nation,
        play_a: Play,
        play_b: Play,
    ) -> Result<TurnReport, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.check_borrow(a, b, play_a.chosen)?;
        self.check_borrow(b, a, play_b.chosen)?;

        let turn = self.turn;
        let color_a = play_a.color(self.phrase_limit);
        let color_b = play_b.color(self.phrase_limit);
        a.record_card(turn, color_a);
        b.record_card(turn, color_b);

        let twist = turn == TWIST_TURN && self.coin.twists();
        let outcome = score_turn(&mut self.world, a, b, color_a, color_b, twist);
        debug!(turn, ?color_a, ?color_b, twist, ?outcome, "turn resolved");
        self.turn += 1;

        Ok(TurnReport {
            turn,
            twist,
            a: PlayedCard {
                nation: a.name.clone(),
                chosen: play_a.chosen,
                color: color_a,
                phrase: play_a.phrase,
            },
            b: PlayedCard {
                nation: b.name.clone(),
                chosen: play_b.chosen,
                color: color_b,
                phrase: play_b.phrase,
            },
            outcome,
            world: self.world.clone(),
        })
    }
}

/// Prompt one nation for its card and phrase.
///
/// On borrowing turns this keeps asking until the color is among the
/// opponent's past cards. With no past cards that never happens.
pub fn choose_card<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    nation: &Nation,
    opponent: &Nation,
    turn: u8,
    phrase_limit: usize,
) -> Result<Play, GameError> {
    writeln!(console, "\n[{}] Turn {} choice", nation.name, turn)?;
    writeln!(console, "  Colors: R={} / B={} / Y={}", Color::R, Color::B, Color::Y)?;
    let chosen = if !is_borrowing_turn(turn) {
        console.ask_color("  Color to play (R/B/Y): ")?
    } else {
        writeln!(
            console,
            "  Diplomacy phase: borrow from {}'s past cards",
            opponent.name
        )?;
        writeln!(console, "  Opponent's past: {}", color_list(&opponent.past_cards))?;
        loop {
            let color = console.ask_color("  Color to borrow (R/B/Y): ")?;
            if opponent.can_lend(color) {
                break color;
            }
            debug!(nation = %nation.name, ?color, "borrow rejected");
            writeln!(console, "  That color is not among the opponent's past cards.")?;
        }
    };
    let phrase = console.ask("  A few words (keep it short): ", None)?;
    let play = Play::new(chosen, phrase);
    if play.is_long(phrase_limit) {
        writeln!(console, "  Long speech -> this turn counts as {}", Color::Y)?;
    }
    Ok(play)
}

/// Everything left after the final turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub coin: Coin,
    pub nations: [Nation; 2],
    pub world: WorldState,
    pub ending: Ending,
}

/// Part two: coin, five turns, ending. Returns the final tally.
pub fn main_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    a: &mut Nation,
    b: &mut Nation,
    coin: Coin,
    phrase_limit: usize,
) -> Result<WorldState, GameError> {
    writeln!(console, "\n=== Part two: World, Out of Stock ===")?;
    let mut rounds = Rounds::new(coin, phrase_limit);
    writeln!(console, "Incident coin toss (applies after turn 3): {coin}")?;
    info!(%coin, "main game started");

    while !rounds.is_finished() {
        let turn = rounds.turn();
        writeln!(console, "\n===== Turn {turn} =====")?;
        let play_a = choose_card(console, a, b, turn, phrase_limit)?;
        let play_b = choose_card(console, b, a, turn, phrase_limit)?;
        let report = rounds.play_turn(a, b, play_a, play_b)?;

        for card in [&report.a, &report.b] {
            writeln!(console, "{}: {} \"{}\"", card.nation, card.color, card.phrase)?;
        }
        writeln!(console, "{}", report.outcome)?;
        writeln!(console, "Stock: {}", report.world)?;
    }

    let world = rounds.world().clone();
    let ending = world.ending();
    writeln!(console, "\n=== Result ===")?;
    writeln!(console, "Final stock: {world}")?;
    writeln!(console, "Ending: {ending}")?;
    info!(%world, ?ending, "game finished");
    Ok(world)
}

/// Run a whole game on one console: names, elimination, negotiation, turns.
pub fn play_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &GameConfig,
    coin: Coin,
) -> Result<GameSummary, GameError> {
    writeln!(console, "World, Out of Stock CLI")?;
    let mut a = Nation::new(console.ask("Nation 1 name: ", None)?);
    let mut b = Nation::new(console.ask("Nation 2 name: ", None)?);

    elimination_phase(console, &mut a, &mut b, &config.stages)?;
    decide_weakness(console, &mut a, &b)?;
    decide_weakness(console, &mut b, &a)?;

    let world = main_game(console, &mut a, &mut b, coin, config.rules.long_phrase_limit)?;
    let ending = world.ending();
    Ok(GameSummary {
        coin,
        nations: [a, b],
        world,
        ending,
    })
}
