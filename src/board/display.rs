use std::fmt;

use super::square::Square;
use super::Board;

impl Board {
    /// Renders the board rank by rank from white's side, with file and rank
    /// labels and the side to move underneath.
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..8u8 {
                let square = match Square::new(file, rank) {
                    Ok(square) => square,
                    Err(_) => continue,
                };
                let c = match self.get(square) {
                    Some((piece, color)) => piece.to_fen(color),
                    None => '.',
                };
                out.push(c);
                if file < 7 {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out.push_str(&format!("{} to move", self.turn()));
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_ascii())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", crate::input_handler::to_fen(self))
    }
}

#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        // Ensure we have exactly 64 squares
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (piece, color) = $crate::board::piece::Piece::from_fen(c)
                    .expect("Invalid character in chess position");
                // The macro input is from white's perspective, so the first
                // character is A8 rather than A1.
                let row = i / 8;
                let col = i % 8;
                let square = $crate::board::square::Square::new(col as u8, (7 - row) as u8)
                    .expect("chess position square is on the board");
                board.put(square, piece, color).expect("chess position square is empty");
            }
        }
        board
    }};
}

#[cfg(test)]
mod tests {
    use crate::board::color::Color;
    use crate::board::piece::Piece;
    use crate::board::square::*;
    use crate::board::Board;

    #[test]
    fn test_chess_position_macro_orientation() {
        let board = chess_position! {
            k.......
            ........
            ........
            ........
            ........
            ........
            ........
            .......K
        };
        assert_eq!(Some((Piece::King, Color::Black)), board.get(A8));
        assert_eq!(Some((Piece::King, Color::White)), board.get(H1));
    }

    #[test]
    fn test_to_ascii() {
        let board = Board::starting_position();
        let ascii = board.to_ascii();
        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!("8 r n b q k b n r", lines[0]);
        assert_eq!("4 . . . . . . . .", lines[4]);
        assert_eq!("1 R N B Q K B N R", lines[7]);
        assert_eq!("  a b c d e f g h", lines[8]);
        assert_eq!("white to move", lines[9]);
    }
}
