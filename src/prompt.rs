use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::debug;

use crate::{Color, GameError};

/// Line-oriented prompt over any reader/writer pair.
///
/// Invalid answers are never errors: the prompt is simply repeated. The
/// only way out of a prompt without a valid answer is closed input.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Ask until a non-empty answer (restricted to `valid` when given) arrives.
    pub fn ask(&mut self, prompt: &str, valid: Option<&[&str]>) -> Result<String, GameError> {
        loop {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }
            let answer = line.trim();
            if answer.is_empty() {
                continue;
            }
            if let Some(valid) = valid {
                if !valid.contains(&answer) {
                    debug!(answer, "rejected answer outside the allowed set");
                    writeln!(self.out, "Enter one of {}.", valid.join("/"))?;
                    continue;
                }
            }
            return Ok(answer.to_string());
        }
    }

    pub fn ask_color(&mut self, prompt: &str) -> Result<Color, GameError> {
        let token = self.ask(prompt, Some(&Color::TOKENS[..]))?;
        token.parse()
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, GameError> {
        Ok(self.ask(prompt, Some(&["y", "n"][..]))? == "y")
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
pub(crate) fn scripted(lines: &[&str]) -> Console<io::Cursor<Vec<u8>>, Vec<u8>> {
    let mut text = lines.join("\n");
    text.push('\n');
    Console::new(io::Cursor::new(text.into_bytes()), Vec::new())
}
