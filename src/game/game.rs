use std::fmt;

use log::debug;
use rustc_hash::FxHashMap;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::move_generator::{ChessMoveList, MoveGenerator, PositionStatus};
use crate::rules;

use super::engine::{ChessEngine, EngineError};

/// Halfmove clock value at which the fifty-move rule ends the game.
const FIFTY_MOVE_HALFMOVES: u16 = 100;
const REPETITIONS_FOR_DRAW: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate { winner: Color },
    Stalemate,
    ThreefoldRepetition,
    FiftyMoveRule,
    InsufficientMaterial,
}

impl fmt::Display for GameEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnding::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameEnding::Stalemate => write!(f, "draw by stalemate"),
            GameEnding::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameEnding::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
            GameEnding::InsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

/// A game in progress: the current position, the moves that led to it, and
/// how often each position has occurred.
pub struct Game {
    board: Board,
    history: Vec<ChessMove>,
    position_counts: FxHashMap<u64, u8>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::starting_position())
    }
}

impl Game {
    pub fn new(board: Board) -> Self {
        let mut position_counts = FxHashMap::default();
        position_counts.insert(board.position_hash(), 1);
        Self {
            board,
            history: Vec::new(),
            position_counts,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[ChessMove] {
        &self.history
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.history.last().copied()
    }

    pub fn legal_moves(&mut self) -> Result<ChessMoveList, BoardError> {
        rules::legal_moves(&mut self.board)
    }

    /// How many times the current position has occurred in this game.
    pub fn repetition_count(&self) -> u8 {
        self.position_counts
            .get(&self.board.position_hash())
            .copied()
            .unwrap_or(0)
    }

    /// Plays `chess_move`, which must be legal in the current position.
    pub fn apply_move(&mut self, chess_move: &ChessMove) -> Result<(), BoardError> {
        rules::apply(&mut self.board, chess_move)?;
        self.history.push(*chess_move);
        *self
            .position_counts
            .entry(self.board.position_hash())
            .or_insert(0) += 1;
        debug!("played {}, position now {:?}", chess_move, self.board);
        Ok(())
    }

    /// Takes back the last move. Returns `None` at the start of the game.
    pub fn undo_last_move(&mut self) -> Result<Option<ChessMove>, BoardError> {
        let chess_move = match self.history.last() {
            Some(chess_move) => *chess_move,
            None => return Ok(None),
        };

        let hash = self.board.position_hash();
        rules::undo(&mut self.board, &chess_move)?;
        self.history.pop();

        if let Some(count) = self.position_counts.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.position_counts.remove(&hash);
            }
        }
        debug!("took back {}", chess_move);
        Ok(Some(chess_move))
    }

    /// Asks `engine` for a move and plays it. Returns `None` when the side to
    /// move has no legal move.
    pub fn play_turn(
        &mut self,
        engine: &mut dyn ChessEngine,
    ) -> Result<Option<ChessMove>, EngineError> {
        let chess_move = match engine.choose_move(&self.board)? {
            Some(chess_move) => chess_move,
            None => return Ok(None),
        };
        self.apply_move(&chess_move)?;
        Ok(Some(chess_move))
    }

    /// Whether the game is over, and how. Checkmate and stalemate take
    /// precedence over the draw rules.
    pub fn game_ending(&mut self) -> Option<GameEnding> {
        match MoveGenerator::new().status(&mut self.board) {
            PositionStatus::Checkmate => {
                return Some(GameEnding::Checkmate {
                    winner: self.board.turn().opposite(),
                })
            }
            PositionStatus::Stalemate => return Some(GameEnding::Stalemate),
            PositionStatus::InPlay | PositionStatus::Check => {}
        }

        if self.repetition_count() >= REPETITIONS_FOR_DRAW {
            Some(GameEnding::ThreefoldRepetition)
        } else if self.board.halfmove_clock() >= FIFTY_MOVE_HALFMOVES {
            Some(GameEnding::FiftyMoveRule)
        } else if has_insufficient_material(&self.board) {
            Some(GameEnding::InsufficientMaterial)
        } else {
            None
        }
    }
}

/// Neither side can ever mate: bare kings, a single minor piece, or one
/// bishop each on squares of the same color.
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::new();
    for color in Color::ALL.iter() {
        for (square, piece) in board.pieces(*color) {
            match piece {
                Piece::King => {}
                Piece::Knight | Piece::Bishop => minors.push((piece, square, *color)),
                _ => return false,
            }
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [(Piece::Bishop, a, a_color), (Piece::Bishop, b, b_color)] => {
            a_color != b_color && a.is_light() == b.is_light()
        }
        _ => false,
    }
}
