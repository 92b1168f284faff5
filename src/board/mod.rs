pub mod castle_rights;
pub mod color;
pub mod error;
pub mod piece;
pub mod square;

mod display;
mod move_info;
mod state_stack;
mod zobrist;

use castle_rights::CastleRights;
use color::Color;
use error::BoardError;
use piece::Piece;
use square::Square;

pub use move_info::MoveState;

use crate::chess_position;

use self::move_info::MoveInfo;

/// Represents the state of a chess board. The top level struct holds piece
/// placement and the side to move, whereas the lower level `move_info` holds
/// the en passant target, castling rights and clocks, stacked so that every
/// applied move can be undone exactly.
#[derive(Clone)]
pub struct Board {
    squares: [Option<(Piece, Color)>; 64],
    turn: Color,
    move_info: MoveInfo,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            turn: Color::White,
            move_info: MoveInfo::new(),
        }
    }
}

impl PartialEq for Board {
    /// Two boards are equal when they describe the same position. How the
    /// position was reached (the undo history) is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.turn == other.turn
            && self.move_info.current() == other.move_info.current()
            && self.fullmove_number() == other.fullmove_number()
    }
}

impl Eq for Board {}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        }
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        self.squares[square.index()]
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupiedBoardPutError);
        }
        self.squares[square.index()] = Some((piece, color));
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        self.squares[square.index()].take()
    }

    /// All occupied squares holding a piece of the given color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| match self.get(square) {
            Some((piece, c)) if c == color => Some((square, piece)),
            _ => None,
        })
    }

    pub fn count(&self, piece: Piece, color: Color) -> usize {
        self.pieces(color).filter(|&(_, p)| p == piece).count()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|&(_, piece)| piece == Piece::King)
            .map(|(square, _)| square)
    }

    /// Checks the one invariant every reachable position must hold: exactly
    /// one king per side.
    pub fn validate(&self) -> Result<(), BoardError> {
        for &color in &Color::ALL {
            let king_count = self.count(Piece::King, color);
            if king_count != 1 {
                return Err(BoardError::CorruptPositionError { color, king_count });
            }
        }
        Ok(())
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) -> Color {
        self.turn = turn;
        turn
    }

    pub fn toggle_turn(&mut self) -> Color {
        self.turn = self.turn.opposite();
        self.turn
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.move_info.current().en_passant_target
    }

    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.move_info.current_mut().en_passant_target = target;
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.move_info.current().castle_rights
    }

    pub fn set_castle_rights(&mut self, rights: CastleRights) {
        self.move_info.current_mut().castle_rights = rights;
    }

    pub fn lose_castle_rights(&mut self, lost_rights: CastleRights) -> CastleRights {
        let rights = self.castle_rights().without(lost_rights);
        self.set_castle_rights(rights);
        rights
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.move_info.current().halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.move_info.current_mut().halfmove_clock = clock;
    }

    pub fn fullmove_number(&self) -> u16 {
        self.move_info.fullmove_number()
    }

    pub fn set_fullmove_number(&mut self, number: u16) {
        self.move_info.set_fullmove_number(number);
    }

    pub fn move_state(&self) -> MoveState {
        *self.move_info.current()
    }

    /// Number of moves applied to this board that can still be undone.
    pub fn applied_move_count(&self) -> usize {
        self.move_info.applied_move_count()
    }

    /// Finishes applying a move: records the new irreversible state, bumps
    /// the full-move number after black moves, and passes the turn.
    pub(crate) fn end_turn(&mut self, state: MoveState) {
        self.move_info.push(state);
        if self.turn == Color::Black {
            let number = self.fullmove_number() + 1;
            self.move_info.set_fullmove_number(number);
        }
        self.toggle_turn();
    }

    /// Inverse of `end_turn`. Afterwards `turn()` is the side that made the
    /// move being undone.
    pub(crate) fn revert_turn(&mut self) -> Result<MoveState, BoardError> {
        let state = self.move_info.pop().ok_or(BoardError::NoMoveToUndoError)?;
        self.toggle_turn();
        if self.turn == Color::Black {
            let number = self.fullmove_number().saturating_sub(1);
            self.move_info.set_fullmove_number(number);
        }
        Ok(state)
    }

    /// Zobrist key of the position (placement, side, castling, en passant).
    pub fn position_hash(&self) -> u64 {
        zobrist::hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;

    #[test]
    fn test_starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(Some((Piece::King, Color::White)), board.get(E1));
        assert_eq!(Some((Piece::Queen, Color::Black)), board.get(D8));
        assert_eq!(Some((Piece::Pawn, Color::White)), board.get(A2));
        assert_eq!(None, board.get(E4));
        assert_eq!(16, board.pieces(Color::White).count());
        assert_eq!(16, board.pieces(Color::Black).count());
        assert_eq!(Color::White, board.turn());
        assert_eq!(CastleRights::all(), board.castle_rights());
        assert_eq!(1, board.fullmove_number());
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_put_on_occupied_square_fails() {
        let mut board = Board::new();
        board.put(A1, Piece::Rook, Color::White).unwrap();
        assert_eq!(
            Err(BoardError::SquareOccupiedBoardPutError),
            board.put(A1, Piece::Knight, Color::Black)
        );
    }

    #[test]
    fn test_validate_rejects_missing_king() {
        let mut board = Board::starting_position();
        board.remove(E8);
        assert_eq!(
            Err(BoardError::CorruptPositionError {
                color: Color::Black,
                king_count: 0
            }),
            board.validate()
        );
    }

    #[test]
    fn test_validate_rejects_two_kings() {
        let mut board = Board::starting_position();
        board.put(E4, Piece::King, Color::White).unwrap();
        assert!(matches!(
            board.validate(),
            Err(BoardError::CorruptPositionError {
                color: Color::White,
                king_count: 2
            })
        ));
    }

    #[test]
    fn test_end_turn_and_revert_turn_track_fullmove_number() {
        let mut board = Board::starting_position();
        let state = board.move_state();

        board.end_turn(state);
        assert_eq!(Color::Black, board.turn());
        assert_eq!(1, board.fullmove_number());

        board.end_turn(state);
        assert_eq!(Color::White, board.turn());
        assert_eq!(2, board.fullmove_number());

        board.revert_turn().unwrap();
        assert_eq!(Color::Black, board.turn());
        assert_eq!(1, board.fullmove_number());

        board.revert_turn().unwrap();
        assert_eq!(Board::starting_position(), board);
        assert_eq!(Err(BoardError::NoMoveToUndoError), board.revert_turn());
    }
}
