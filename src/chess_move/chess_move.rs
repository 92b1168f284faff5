use core::fmt;

use crate::board::{error::BoardError, piece::Piece, square::Square, Board};

use super::capture::Capture;
use super::castle::CastleChessMove;
use super::en_passant::EnPassantChessMove;
use super::pawn_promotion::PawnPromotionChessMove;
use super::standard::StandardChessMove;

/// Coarse classification of a move, independent of its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChessMove {
    Standard(StandardChessMove),
    PawnPromotion(PawnPromotionChessMove),
    EnPassant(EnPassantChessMove),
    Castle(CastleChessMove),
}

macro_rules! delegate_to_variants {
    ($self:ident, $method:ident, $($variant:ident),*) => {
        match $self {
            $(ChessMove::$variant(m) => m.$method(),)*
        }
    };
}

macro_rules! delegate_to_variants_mut {
    ($self:ident, $method:ident, $arg:expr, $($variant:ident),*) => {
        match $self {
            $(ChessMove::$variant(m) => m.$method($arg),)*
        }
    };
}

impl ChessMove {
    pub fn to_square(&self) -> Square {
        delegate_to_variants!(self, to_square, Standard, PawnPromotion, EnPassant, Castle)
    }

    pub fn from_square(&self) -> Square {
        delegate_to_variants!(self, from_square, Standard, PawnPromotion, EnPassant, Castle)
    }

    pub fn captures(&self) -> Option<Capture> {
        match self {
            ChessMove::Standard(m) => m.captures(),
            ChessMove::PawnPromotion(m) => m.captures(),
            ChessMove::EnPassant(m) => Some(m.captures()),
            ChessMove::Castle(_m) => None,
        }
    }

    pub fn promotion(&self) -> Option<Piece> {
        match self {
            ChessMove::PawnPromotion(m) => Some(m.promote_to_piece()),
            _ => None,
        }
    }

    pub fn kind(&self) -> MoveKind {
        match self {
            ChessMove::Standard(m) if m.captures().is_some() => MoveKind::Capture,
            ChessMove::Standard(_) => MoveKind::Normal,
            ChessMove::PawnPromotion(_) => MoveKind::Promotion,
            ChessMove::EnPassant(_) => MoveKind::EnPassant,
            ChessMove::Castle(m) if m.is_kingside() => MoveKind::CastleKingside,
            ChessMove::Castle(_) => MoveKind::CastleQueenside,
        }
    }

    #[must_use = "move application may fail"]
    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        delegate_to_variants_mut!(self, apply, board, Standard, PawnPromotion, EnPassant, Castle)
    }

    #[must_use = "move undo may fail"]
    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        delegate_to_variants_mut!(self, undo, board, Standard, PawnPromotion, EnPassant, Castle)
    }

    pub fn to_uci(&self) -> String {
        let from = self.from_square().to_algebraic();
        let to = self.to_square().to_algebraic();
        match self.promotion().and_then(|piece| piece.to_promotion_char()) {
            Some(c) => format!("{}{}{}", from, to, c),
            None => format!("{}{}", from, to),
        }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessMove::Standard(m) => m.fmt(f),
            ChessMove::PawnPromotion(m) => m.fmt(f),
            ChessMove::EnPassant(m) => m.fmt(f),
            ChessMove::Castle(m) => m.fmt(f),
        }
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}", self).fmt(f)
    }
}
