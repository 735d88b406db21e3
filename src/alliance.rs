use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::{Coord, EIGHTH_RANK, FIRST_RANK, SECOND_RANK, SEVENTH_RANK};

/// One of the two sides. White sits on rows 6..8 of the index space and moves
/// toward index 0; Black mirrors it.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize,
    Deserialize,
)]
pub enum Alliance {
    White,
    Black,
}

impl Alliance {
    pub fn opponent(self) -> Alliance {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    /// Sign applied to pawn offsets: moving "forward" subtracts for White and
    /// adds for Black.
    pub fn direction(self) -> i16 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    // Used for en-passant offset arithmetic: the captured pawn sits one file
    // aside, i.e. one step in the opponent-relative direction.
    pub fn opposite_direction(self) -> i16 { -self.direction() }

    pub fn is_promotion_square(self, coord: Coord) -> bool {
        match self {
            Alliance::White => EIGHTH_RANK[coord.index()],
            Alliance::Black => FIRST_RANK[coord.index()],
        }
    }

    /// The rank a pawn double-push may start from.
    pub fn is_pawn_start_square(self, coord: Coord) -> bool {
        match self {
            Alliance::White => SECOND_RANK[coord.index()],
            Alliance::Black => SEVENTH_RANK[coord.index()],
        }
    }
}
