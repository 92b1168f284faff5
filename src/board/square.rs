use core::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::BoardError;

static ALGEBRAIC_SQUARE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").expect("algebraic square pattern is valid"));

/// A square on the board, stored as `rank * 8 + file`. A `Square` is always
/// on the board; off-board coordinates are rejected at construction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Result<Self, BoardError> {
        if file >= 8 || rank >= 8 {
            return Err(BoardError::SquareOutOfRangeError { file, rank });
        }
        Ok(Self(rank * 8 + file))
    }

    pub fn from_index(index: u8) -> Result<Self, BoardError> {
        Self::new(index % 8, index / 8)
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, BoardError> {
        let caps = ALGEBRAIC_SQUARE.captures(algebraic).ok_or_else(|| {
            BoardError::InvalidAlgebraicSquareError {
                input: algebraic.to_string(),
            }
        })?;
        let file = caps[1].as_bytes()[0].to_ascii_lowercase() - b'a';
        let rank = caps[2].as_bytes()[0] - b'1';
        Self::new(file, rank)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the square `df` files and `dr` ranks away, or `None` if that
    /// would fall off the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// The same file, reflected across the middle of the board.
    pub fn flip_rank(self) -> Square {
        Square((7 - self.rank()) * 8 + self.file())
    }

    pub fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

pub const A1: Square = Square(0);
pub const B1: Square = Square(1);
pub const C1: Square = Square(2);
pub const D1: Square = Square(3);
pub const E1: Square = Square(4);
pub const F1: Square = Square(5);
pub const G1: Square = Square(6);
pub const H1: Square = Square(7);
pub const A2: Square = Square(8);
pub const B2: Square = Square(9);
pub const C2: Square = Square(10);
pub const D2: Square = Square(11);
pub const E2: Square = Square(12);
pub const F2: Square = Square(13);
pub const G2: Square = Square(14);
pub const H2: Square = Square(15);
pub const A3: Square = Square(16);
pub const B3: Square = Square(17);
pub const C3: Square = Square(18);
pub const D3: Square = Square(19);
pub const E3: Square = Square(20);
pub const F3: Square = Square(21);
pub const G3: Square = Square(22);
pub const H3: Square = Square(23);
pub const A4: Square = Square(24);
pub const B4: Square = Square(25);
pub const C4: Square = Square(26);
pub const D4: Square = Square(27);
pub const E4: Square = Square(28);
pub const F4: Square = Square(29);
pub const G4: Square = Square(30);
pub const H4: Square = Square(31);
pub const A5: Square = Square(32);
pub const B5: Square = Square(33);
pub const C5: Square = Square(34);
pub const D5: Square = Square(35);
pub const E5: Square = Square(36);
pub const F5: Square = Square(37);
pub const G5: Square = Square(38);
pub const H5: Square = Square(39);
pub const A6: Square = Square(40);
pub const B6: Square = Square(41);
pub const C6: Square = Square(42);
pub const D6: Square = Square(43);
pub const E6: Square = Square(44);
pub const F6: Square = Square(45);
pub const G6: Square = Square(46);
pub const H6: Square = Square(47);
pub const A7: Square = Square(48);
pub const B7: Square = Square(49);
pub const C7: Square = Square(50);
pub const D7: Square = Square(51);
pub const E7: Square = Square(52);
pub const F7: Square = Square(53);
pub const G7: Square = Square(54);
pub const H7: Square = Square(55);
pub const A8: Square = Square(56);
pub const B8: Square = Square(57);
pub const C8: Square = Square(58);
pub const D8: Square = Square(59);
pub const E8: Square = Square(60);
pub const F8: Square = Square(61);
pub const G8: Square = Square(62);
pub const H8: Square = Square(63);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        assert_eq!(A1, Square::new(0, 0).unwrap());
        assert_eq!(B2, Square::new(1, 1).unwrap());
        assert_eq!(E4, Square::new(4, 3).unwrap());
        assert_eq!(H8, Square::new(7, 7).unwrap());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(matches!(
            Square::new(8, 0),
            Err(BoardError::SquareOutOfRangeError { file: 8, rank: 0 })
        ));
        assert!(Square::new(0, 8).is_err());
        assert!(Square::from_index(64).is_err());
    }

    #[test]
    fn test_from_algebraic() {
        assert_eq!(A1, Square::from_algebraic("a1").unwrap());
        assert_eq!(A1, Square::from_algebraic("A1").unwrap());
        assert_eq!(E5, Square::from_algebraic("e5").unwrap());
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("a10").is_err());
    }

    #[test]
    fn test_to_algebraic() {
        assert_eq!("a1", A1.to_algebraic());
        assert_eq!("a8", A8.to_algebraic());
        assert_eq!("h8", H8.to_algebraic());
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Some(B3), A1.offset(1, 2));
        assert_eq!(None, A1.offset(-1, 0));
        assert_eq!(None, H8.offset(0, 1));
        assert_eq!(None, H4.offset(1, 0));
    }

    #[test]
    fn test_flip_rank_and_color() {
        assert_eq!(E8, E1.flip_rank());
        assert_eq!(C6, C3.flip_rank());
        assert!(!A1.is_light());
        assert!(H1.is_light());
    }
}
