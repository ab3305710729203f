use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::elimination::WordLedger;
use crate::game::{Coin, Play, Rounds};
use crate::{Color, GameError, Nation};

/// Browser driver: the same rules, fed one form submission at a time.
#[wasm_bindgen]
pub struct WasmGame {
    a: Nation,
    b: Nation,
    ledger: WordLedger,
    stages: Vec<String>,
    rounds: Rounds,
}

fn js_err(e: GameError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_color(token: &str) -> Result<Color, JsValue> {
    token.parse().map_err(js_err)
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(name_a: String, name_b: String, seed: Option<u64>) -> WasmGame {
        let coin = match seed {
            Some(seed) => Coin::toss(&mut StdRng::seed_from_u64(seed)),
            None => Coin::toss(&mut rand::thread_rng()),
        };
        let config = GameConfig::default();
        WasmGame {
            a: Nation::new(name_a),
            b: Nation::new(name_b),
            ledger: WordLedger::new(),
            stages: config.stages,
            rounds: Rounds::new(coin, config.rules.long_phrase_limit),
        }
    }

    /// Current elimination prompt, or `None` once every stage is answered.
    pub fn stage_label(&self) -> Option<String> {
        self.stages.get(self.a.lost_items.len()).cloned()
    }

    pub fn add_items(&mut self, word_a: String, word_b: String) -> Result<(), JsValue> {
        if self.stage_label().is_none() {
            return Err(js_err(GameError::PhaseIncomplete("elimination is over")));
        }
        let (a, b) = (word_a.trim(), word_b.trim());
        if a.is_empty() || b.is_empty() {
            return Err(JsValue::from_str("both nations must answer"));
        }
        self.ledger
            .claim_pair(&mut self.a, a, &mut self.b, b)
            .map_err(js_err)
    }

    pub fn set_weaknesses(&mut self, color_a: String, color_b: String) -> Result<(), JsValue> {
        if self.stage_label().is_some() {
            return Err(js_err(GameError::PhaseIncomplete("elimination")));
        }
        let (ca, cb) = (parse_color(&color_a)?, parse_color(&color_b)?);
        self.a.set_weakness(ca).map_err(js_err)?;
        self.b.set_weakness(cb).map_err(js_err)
    }

    /// Play one turn and return its report as a JS object.
    pub fn play_turn(
        &mut self,
        color_a: String,
        text_a: String,
        color_b: String,
        text_b: String,
    ) -> Result<JsValue, JsValue> {
        if self.a.weakness_color.is_none() || self.b.weakness_color.is_none() {
            return Err(js_err(GameError::PhaseIncomplete("weakness negotiation")));
        }
        let (text_a, text_b) = (text_a.trim(), text_b.trim());
        if text_a.is_empty() || text_b.is_empty() {
            return Err(JsValue::from_str("both nations must say something"));
        }
        let play_a = Play::new(parse_color(&color_a)?, text_a);
        let play_b = Play::new(parse_color(&color_b)?, text_b);
        let report = self
            .rounds
            .play_turn(&mut self.a, &mut self.b, play_a, play_b)
            .map_err(js_err)?;
        swb::to_value(&report).map_err(JsValue::from)
    }

    pub fn turn(&self) -> u8 {
        self.rounds.turn()
    }

    pub fn coin(&self) -> String {
        self.rounds.coin().to_string()
    }

    /// R, B and Y counts.
    pub fn scores(&self) -> Vec<u32> {
        let world = self.rounds.world();
        Color::ALL.iter().map(|&c| world.get(c)).collect()
    }

    pub fn ending(&self) -> Option<String> {
        self.rounds.ending().map(|e| e.to_string())
    }
}
