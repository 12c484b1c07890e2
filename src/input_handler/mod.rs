//! Human input: square selection and FEN handling.

pub mod fen;
pub mod fen_serialize;

use std::io::{self, BufRead, Write};

use common::bitboard::Square;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
    #[error("input source closed")]
    InputClosed,
}

/// A source of square selections, such as clicks on a rendered board.
/// Each call blocks until the next selection is made.
pub trait SquareSelector {
    fn select_square(&mut self) -> Result<Square, InputError>;
}

/// Reads one algebraic square (`e2`) per line. End of input closes the source.
pub struct TerminalSquareSelector<R> {
    reader: R,
    prompt: bool,
}

impl TerminalSquareSelector<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            reader: io::stdin().lock(),
            prompt: true,
        }
    }
}

impl<R: BufRead> TerminalSquareSelector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            prompt: false,
        }
    }
}

impl<R: BufRead> SquareSelector for TerminalSquareSelector<R> {
    fn select_square(&mut self) -> Result<Square, InputError> {
        if self.prompt {
            print!("square> ");
            io::stdout().flush().map_err(|error| InputError::IOError {
                error: error.to_string(),
            })?;
        }

        let mut input = String::new();
        let read = self
            .reader
            .read_line(&mut input)
            .map_err(|error| InputError::IOError {
                error: error.to_string(),
            })?;
        if read == 0 {
            return Err(InputError::InputClosed);
        }

        let raw = input.trim();
        Square::from_algebraic(raw).ok_or_else(|| InputError::InvalidInput {
            input: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::*;

    #[test]
    fn test_terminal_selector_reads_squares_per_line() {
        let mut selector = TerminalSquareSelector::new("e2\n  E4 \nz9\n".as_bytes());
        assert_eq!(selector.select_square().unwrap(), E2);
        assert_eq!(selector.select_square().unwrap(), E4);
        assert!(matches!(
            selector.select_square(),
            Err(InputError::InvalidInput { .. })
        ));
        assert!(matches!(
            selector.select_square(),
            Err(InputError::InputClosed)
        ));
    }
}
