use core::fmt;

use super::color::Color;
use super::square::{Square, A1, A8, E1, E8, H1, H8};

/// The four independent castling rights, packed into the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const fn white_kingside() -> Self {
        Self(0b1000)
    }

    pub const fn black_kingside() -> Self {
        Self(0b0100)
    }

    pub const fn white_queenside() -> Self {
        Self(0b0010)
    }

    pub const fn black_queenside() -> Self {
        Self(0b0001)
    }

    pub const fn all() -> Self {
        Self(
            Self::white_kingside().0
                | Self::black_kingside().0
                | Self::white_queenside().0
                | Self::black_queenside().0,
        )
    }

    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn without(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    pub fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::white_kingside(),
            Color::Black => Self::black_kingside(),
        }
    }

    pub fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::white_queenside(),
            Color::Black => Self::black_queenside(),
        }
    }

    pub fn for_color(color: Color) -> Self {
        Self::kingside(color) | Self::queenside(color)
    }

    /// Rights that are lost for good once a piece leaves, or is captured on,
    /// the given square.
    pub fn lost_by_touching(square: Square) -> Self {
        match square {
            A1 => Self::white_queenside(),
            H1 => Self::white_kingside(),
            E1 => Self::for_color(Color::White),
            A8 => Self::black_queenside(),
            H8 => Self::black_kingside(),
            E8 => Self::for_color(Color::Black),
            _ => Self::none(),
        }
    }
}

impl std::ops::BitOr for CastleRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for CastleRights {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for CastleRights {
    /// FEN castling field: some subset of "KQkq", or "-".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let flags = [
            (Self::white_kingside(), 'K'),
            (Self::white_queenside(), 'Q'),
            (Self::black_kingside(), 'k'),
            (Self::black_queenside(), 'q'),
        ];
        for (right, c) in flags.iter() {
            if self.contains(*right) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
