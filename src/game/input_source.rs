use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::input_handler::{InputError, MoveInput};

/// Where a human player's moves come from.
pub trait InputSource {
    /// Reads the next move. Unparseable text is reported as
    /// `InputError::InvalidInput` so the caller can ask again.
    fn next_move_input(&mut self) -> Result<MoveInput, InputError>;
}

/// Reads one move per line from standard input, after a prompt.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn next_move_input(&mut self) -> Result<MoveInput, InputError> {
        print!("your move: ");
        io::stdout().flush().map_err(|error| InputError::IOError {
            error: error.to_string(),
        })?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|error| InputError::IOError {
                error: error.to_string(),
            })?;
        if read == 0 {
            return Err(InputError::EndOfInput);
        }
        line.parse()
    }
}

/// Replays a fixed list of inputs, for tests and scripted games.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_move_input(&mut self) -> Result<MoveInput, InputError> {
        match self.lines.pop_front() {
            Some(line) => line.parse(),
            None => Err(InputError::EndOfInput),
        }
    }
}
