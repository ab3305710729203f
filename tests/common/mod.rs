#![allow(dead_code)]

use std::io::Cursor;

use stockout::prompt::Console;

pub type Scripted = Console<Cursor<Vec<u8>>, Vec<u8>>;

/// Answers for a whole game, in prompt order.
pub struct GameScript {
    lines: Vec<String>,
}

impl GameScript {
    pub fn new(name_a: &str, name_b: &str) -> Self {
        let mut s = Self { lines: Vec::new() };
        s.push(name_a).push(name_b);
        s
    }

    pub fn push(&mut self, line: &str) -> &mut Self {
        self.lines.push(line.to_string());
        self
    }

    /// Ten distinct words, A then B for each stage.
    pub fn elimination(&mut self) -> &mut Self {
        for stage in 0..5 {
            self.push(&format!("a{stage}")).push(&format!("b{stage}"));
        }
        self
    }

    pub fn weakness(&mut self, pick: &str, color: &str, veto: Option<&str>) -> &mut Self {
        self.push(pick).push(color);
        match veto {
            Some(replacement) => self.push("y").push(replacement),
            None => self.push("n"),
        }
    }

    pub fn turn(
        &mut self,
        color_a: &str,
        phrase_a: &str,
        color_b: &str,
        phrase_b: &str,
    ) -> &mut Self {
        self.push(color_a).push(phrase_a).push(color_b).push(phrase_b)
    }

    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    pub fn console(&self) -> Scripted {
        Console::new(Cursor::new(self.text().into_bytes()), Vec::new())
    }
}

/// Yamato (weak to Y) against Ezo (weak to B after a veto). Turns 1-3 never
/// match; turn 4 resonates on R; turn 5 is spoiled by a long speech.
pub fn conflict_script() -> GameScript {
    let mut s = GameScript::new("Yamato", "Ezo");
    s.elimination()
        .weakness("9", "Y", None)
        .weakness("3", "R", Some("B"))
        .turn("R", "pride first", "B", "trust us")
        .turn("B", "we listen", "Y", "let us rest")
        .turn("Y", "nap time", "R", "bow down")
        .turn("R", "borrowed pride", "R", "same here")
        .turn("R", "again", "R", "this is a far too long speech for anyone");
    s
}
