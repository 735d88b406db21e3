use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::alliance::Alliance;
use crate::coord::{Coord, NUM_SQUARES};
use crate::piece::Piece;

lazy_static! {
    // Empty squares carry no state besides their coordinate, so one instance
    // per coordinate serves every board in the process.
    static ref EMPTY_SQUARES: [Square; NUM_SQUARES as usize] = {
        let mut squares = [Square::Empty(Coord::from_index(0)); NUM_SQUARES as usize];
        for coord in Coord::all() {
            squares[coord.index()] = Square::Empty(coord);
        }
        squares
    };
}

/// One cell of a board snapshot, immutable after creation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Square {
    Empty(Coord),
    Occupied(Coord, Piece),
}

impl Square {
    pub fn of(coord: Coord, piece: Option<Piece>) -> Square {
        match piece {
            Some(piece) => Square::Occupied(coord, piece),
            None => EMPTY_SQUARES[coord.index()],
        }
    }

    pub fn coord(self) -> Coord {
        match self {
            Square::Empty(coord) | Square::Occupied(coord, _) => coord,
        }
    }

    pub fn is_occupied(self) -> bool { matches!(self, Square::Occupied(..)) }

    pub fn piece(self) -> Option<Piece> {
        match self {
            Square::Empty(_) => None,
            Square::Occupied(_, piece) => Some(piece),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Square::Empty(_) => write!(f, "-"),
            Square::Occupied(_, piece) => {
                let letter = piece.kind.to_letter();
                match piece.alliance {
                    Alliance::White => write!(f, "{letter}"),
                    Alliance::Black => write!(f, "{}", letter.to_ascii_lowercase()),
                }
            }
        }
    }
}
