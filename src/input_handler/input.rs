//! Move input parsing.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::{piece::Piece, square::Square};

static COORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-h][1-8])([a-h][1-8])([nbrq])?$").expect("COORD_RE regex should be valid")
});
static CASTLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[oO0]-[oO0](-[oO0])?$").expect("CASTLE_RE regex should be valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
    #[error("no more input")]
    EndOfInput,
    #[error("user exit")]
    UserExit,
}

/// A move as typed by a player, before it is matched against the legal
/// moves of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInput {
    Coordinate {
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    },
    CastleKingside,
    CastleQueenside,
    Undo,
}

impl FromStr for MoveInput {
    type Err = InputError;

    /// Accepts coordinate notation ("e2e4", "e7e8q"), castling ("O-O",
    /// "o-o-o", "0-0"), "undo", and "exit"/"quit" (reported as
    /// `InputError::UserExit`).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();

        match lowered.as_str() {
            "undo" | "u" => return Ok(MoveInput::Undo),
            "exit" | "quit" | "q" => return Err(InputError::UserExit),
            _ => {}
        }

        if let Some(caps) = COORD_RE.captures(&lowered) {
            let invalid = || InputError::InvalidInput {
                input: input.to_string(),
            };
            let from = Square::from_algebraic(&caps[1]).map_err(|_| invalid())?;
            let to = Square::from_algebraic(&caps[2]).map_err(|_| invalid())?;
            let promotion = caps
                .get(3)
                .and_then(|m| m.as_str().chars().next())
                .and_then(Piece::from_promotion_char);
            return Ok(MoveInput::Coordinate {
                from,
                to,
                promotion,
            });
        }

        if let Some(caps) = CASTLE_RE.captures(trimmed) {
            return Ok(if caps.get(1).is_some() {
                MoveInput::CastleQueenside
            } else {
                MoveInput::CastleKingside
            });
        }

        Err(InputError::InvalidInput {
            input: input.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;

    #[test]
    fn test_parse_coordinate_move() {
        assert_eq!(
            Ok(MoveInput::Coordinate {
                from: E2,
                to: E4,
                promotion: None
            }),
            "e2e4".parse::<MoveInput>()
        );
        assert_eq!(
            Ok(MoveInput::Coordinate {
                from: E2,
                to: E4,
                promotion: None
            }),
            "  E2E4\n".parse::<MoveInput>()
        );
    }

    #[test]
    fn test_parse_promotion() {
        assert_eq!(
            Ok(MoveInput::Coordinate {
                from: E7,
                to: E8,
                promotion: Some(Piece::Queen)
            }),
            "e7e8q".parse::<MoveInput>()
        );
        assert_eq!(
            Ok(MoveInput::Coordinate {
                from: B2,
                to: A1,
                promotion: Some(Piece::Knight)
            }),
            "b2a1n".parse::<MoveInput>()
        );
    }

    #[test]
    fn test_parse_castles() {
        for input in ["O-O", "o-o", "0-0"].iter() {
            assert_eq!(Ok(MoveInput::CastleKingside), input.parse::<MoveInput>());
        }
        for input in ["O-O-O", "o-o-o", "0-0-0"].iter() {
            assert_eq!(Ok(MoveInput::CastleQueenside), input.parse::<MoveInput>());
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Ok(MoveInput::Undo), "undo".parse::<MoveInput>());
        assert_eq!(Err(InputError::UserExit), "exit".parse::<MoveInput>());
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "e2", "e2e9", "i2i4", "e7e8k", "Nf3"].iter() {
            assert!(
                matches!(
                    input.parse::<MoveInput>(),
                    Err(InputError::InvalidInput { .. })
                ),
                "{} should not parse",
                input
            );
        }
    }
}
