use std::fmt;

use serde::{Deserialize, Serialize};

pub const NUM_SQUARES: u8 = 64;
pub const NUM_SQUARES_PER_ROW: u8 = 8;

const fn column_table(mut idx: usize) -> [bool; 64] {
    let mut table = [false; 64];
    while idx < NUM_SQUARES as usize {
        table[idx] = true;
        idx += NUM_SQUARES_PER_ROW as usize;
    }
    table
}

const fn row_table(row: usize) -> [bool; 64] {
    let mut table = [false; 64];
    let mut idx = row * NUM_SQUARES_PER_ROW as usize;
    let end = idx + NUM_SQUARES_PER_ROW as usize;
    while idx < end {
        table[idx] = true;
        idx += 1;
    }
    table
}

pub const FIRST_COLUMN: [bool; 64] = column_table(0);
pub const SECOND_COLUMN: [bool; 64] = column_table(1);
pub const SEVENTH_COLUMN: [bool; 64] = column_table(6);
pub const EIGHTH_COLUMN: [bool; 64] = column_table(7);

// Rank names follow chess convention: rank 1 is the bottom row of the index
// space (56..64), rank 8 the top (0..8).
pub const FIRST_RANK: [bool; 64] = row_table(7);
pub const SECOND_RANK: [bool; 64] = row_table(6);
pub const SEVENTH_RANK: [bool; 64] = row_table(1);
pub const EIGHTH_RANK: [bool; 64] = row_table(0);

/// Index of a board square: 0 is a8 (top-left), 63 is h1 (bottom-right).
/// Rows grow downward, so White moves toward lower indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    idx: u8,
}

impl Coord {
    pub const fn from_index(idx: u8) -> Self {
        assert!(idx < NUM_SQUARES);
        Self { idx }
    }

    // Bounds check for offset arithmetic that may have left the board.
    pub fn from_signed(idx: i16) -> Option<Self> {
        if (0..NUM_SQUARES as i16).contains(&idx) {
            Some(Self { idx: idx as u8 })
        } else {
            None
        }
    }

    pub const fn index(self) -> usize { self.idx as usize }
    pub const fn row(self) -> u8 { self.idx / NUM_SQUARES_PER_ROW }
    pub const fn col(self) -> u8 { self.idx % NUM_SQUARES_PER_ROW }

    pub fn shifted(self, offset: i16) -> Option<Self> {
        Self::from_signed(self.idx as i16 + offset)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_SQUARES).map(Self::from_index)
    }

    pub fn from_algebraic(s: &str) -> Self {
        let mut chars = s.chars();
        let (file, rank) = (chars.next().unwrap(), chars.next().unwrap());
        assert!(chars.next().is_none(), "bad square: {s}");
        let col = file as u8 - b'a';
        let row = b'8' - rank as u8;
        assert!(
            col < NUM_SQUARES_PER_ROW && row < NUM_SQUARES_PER_ROW,
            "bad square: {s}"
        );
        Self::from_index(row * NUM_SQUARES_PER_ROW + col)
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col()) as char, (b'8' - self.row()) as char)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        assert_eq!(Coord::from_algebraic("a8").index(), 0);
        assert_eq!(Coord::from_algebraic("h1").index(), 63);
        assert_eq!(Coord::from_algebraic("e1").index(), 60);
        assert_eq!(Coord::from_algebraic("d8").index(), 3);
        for coord in Coord::all() {
            assert_eq!(Coord::from_algebraic(&coord.to_algebraic()), coord);
        }
    }

    #[test]
    fn shifted_stays_on_board() {
        assert_eq!(Coord::from_index(0).shifted(-1), None);
        assert_eq!(Coord::from_index(63).shifted(1), None);
        assert_eq!(Coord::from_index(53).shifted(-8), Some(Coord::from_index(45)));
    }

    #[test]
    fn membership_tables() {
        assert!(FIRST_COLUMN[Coord::from_algebraic("a4").index()]);
        assert!(EIGHTH_COLUMN[Coord::from_algebraic("h8").index()]);
        assert!(SECOND_RANK[Coord::from_algebraic("e2").index()]);
        assert!(SEVENTH_RANK[Coord::from_algebraic("e7").index()]);
        assert!(EIGHTH_RANK[Coord::from_algebraic("c8").index()]);
        assert!(!FIRST_RANK[Coord::from_algebraic("c8").index()]);
        assert_eq!(FIRST_COLUMN.iter().filter(|&&v| v).count(), 8);
        assert_eq!(SECOND_RANK.iter().filter(|&&v| v).count(), 8);
    }
}
