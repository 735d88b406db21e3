use std::fmt;
use std::ops;

use enum_map::EnumMap;
use itertools::Itertools;

use crate::alliance::Alliance;
use crate::coord::{Coord, NUM_SQUARES, NUM_SQUARES_PER_ROW};
use crate::moves::{Move, MoveKind};
use crate::piece::{Piece, PieceKind};
use crate::player::Player;
use crate::square::Square;

/// An immutable position snapshot. Move execution never mutates a board; it
/// builds a successor through `BoardBuilder`, so a board stays valid (and
/// safe to share read-only) for as long as anyone holds it.
#[derive(Clone, Debug)]
pub struct Board {
    squares: [Square; NUM_SQUARES as usize],
    pieces: EnumMap<Alliance, Vec<Piece>>,
    // Pseudo-legal moves merged with castles, per alliance. King safety is
    // *not* folded in here; `Player::make_move` enforces it per attempt.
    legal_moves: EnumMap<Alliance, Vec<Move>>,
    kings: EnumMap<Alliance, Piece>,
    in_check: EnumMap<Alliance, bool>,
    en_passant_pawn: Option<Piece>,
    to_move: Alliance,
}

impl Board {
    /// The classic initial setup, White to move.
    pub fn standard() -> Board {
        use Alliance::*;
        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut builder = BoardBuilder::new();
        for (col, &kind) in back_rank.iter().enumerate() {
            let col = col as u8;
            builder = builder
                .set_piece(Piece::initial(kind, Black, Coord::from_index(col)))
                .set_piece(Piece::initial(Pawn, Black, Coord::from_index(8 + col)))
                .set_piece(Piece::initial(Pawn, White, Coord::from_index(48 + col)))
                .set_piece(Piece::initial(kind, White, Coord::from_index(56 + col)));
        }
        builder.set_next_to_move(White).build()
    }

    pub fn get_square(&self, coord: Coord) -> Square { self.squares[coord.index()] }
    pub fn side_to_move(&self) -> Alliance { self.to_move }
    pub fn en_passant_pawn(&self) -> Option<Piece> { self.en_passant_pawn }
    pub fn active_pieces(&self, alliance: Alliance) -> &[Piece] { &self.pieces[alliance] }
    pub fn king(&self, alliance: Alliance) -> Piece { self.kings[alliance] }
    pub fn is_in_check(&self, alliance: Alliance) -> bool { self.in_check[alliance] }

    /// Pseudo-legal moves plus castles for one side.
    pub fn legal_moves(&self, alliance: Alliance) -> &[Move] { &self.legal_moves[alliance] }

    pub fn all_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.pieces[Alliance::White]
            .iter()
            .chain(self.pieces[Alliance::Black].iter())
            .copied()
    }

    pub fn player(&self, alliance: Alliance) -> Player<'_> { Player::new(self, alliance) }
    pub fn current_player(&self) -> Player<'_> { self.player(self.to_move) }

    /// The only coordinate-pair lookup: scans the current player's legal
    /// moves for a matching (source, destination).
    pub fn find_move(&self, from: Coord, to: Coord) -> Option<Move> {
        self.legal_moves[self.to_move]
            .iter()
            .find(|mv| mv.source() == from && mv.destination() == to)
            .cloned()
    }

    fn calculate_pseudo_legal(&self, alliance: Alliance) -> Vec<Move> {
        self.pieces[alliance]
            .iter()
            .flat_map(|piece| piece.calculate_legal_moves(self))
            .collect()
    }
}

impl ops::Index<Coord> for Board {
    type Output = Square;
    fn index(&self, coord: Coord) -> &Self::Output { &self.squares[coord.index()] }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares.iter().chunks(NUM_SQUARES_PER_ROW as usize) {
            for square in row {
                write!(f, "{:>3}", square.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Accumulates placements for one board snapshot. `build` computes all
/// derived state (active pieces, both sides' move sets, check flags).
pub struct BoardBuilder {
    config: [Option<Piece>; NUM_SQUARES as usize],
    next_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl BoardBuilder {
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            config: [None; NUM_SQUARES as usize],
            next_to_move: Alliance::White,
            en_passant_pawn: None,
        }
    }

    /// Places a piece at its own position, replacing any previous occupant.
    pub fn set_piece(mut self, piece: Piece) -> Self {
        self.config[piece.position.index()] = Some(piece);
        self
    }

    pub fn set_next_to_move(mut self, alliance: Alliance) -> Self {
        self.next_to_move = alliance;
        self
    }

    /// Marks a pawn as capturable in passing for the immediately following
    /// move. Only `PawnJump` execution sets this.
    pub fn set_en_passant_pawn(mut self, pawn: Piece) -> Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// Panics if either side has no king: that is a broken position, not a
    /// recoverable error, and no partial board may escape.
    pub fn build(self) -> Board {
        let mut squares = [Square::of(Coord::from_index(0), None); NUM_SQUARES as usize];
        for coord in Coord::all() {
            squares[coord.index()] = Square::of(coord, self.config[coord.index()]);
        }

        let mut pieces: EnumMap<Alliance, Vec<Piece>> = EnumMap::default();
        for square in &squares {
            if let Some(piece) = square.piece() {
                pieces[piece.alliance].push(piece);
            }
        }

        let kings = EnumMap::from_fn(|alliance: Alliance| {
            pieces[alliance]
                .iter()
                .copied()
                .find(|piece| piece.kind == PieceKind::King)
                .unwrap_or_else(|| panic!("Not a valid board: no {alliance:?} king"))
        });

        let mut board = Board {
            squares,
            pieces,
            legal_moves: EnumMap::default(),
            kings,
            in_check: EnumMap::default(),
            en_passant_pawn: self.en_passant_pawn,
            to_move: self.next_to_move,
        };

        // Generation only reads squares and the en-passant pawn, so both
        // sides can be computed against the half-initialized board.
        let pseudo_legal: EnumMap<Alliance, Vec<Move>> =
            EnumMap::from_fn(|alliance| board.calculate_pseudo_legal(alliance));
        let in_check = EnumMap::from_fn(|alliance: Alliance| {
            let king_pos = board.kings[alliance].position;
            pseudo_legal[alliance.opponent()].iter().any(|mv| mv.destination() == king_pos)
        });
        board.legal_moves = EnumMap::from_fn(|alliance: Alliance| {
            let mut moves = pseudo_legal[alliance].clone();
            moves.extend(calculate_castles(
                &board,
                alliance,
                &pseudo_legal[alliance.opponent()],
                in_check[alliance],
            ));
            moves
        });
        board.in_check = in_check;
        board
    }
}

// Castles need opponent-attack data, so they are derived here rather than in
// piece generation. Eligibility: king unmoved and not in check, the squares
// between king and rook empty, the king's path unattacked, and an unmoved
// rook on its corner.
fn calculate_castles(
    board: &Board, alliance: Alliance, opponent_moves: &[Move], in_check: bool,
) -> Vec<Move> {
    let mut castles = Vec::new();
    let king = board.kings[alliance];
    if !king.is_first_move || in_check {
        return castles;
    }
    let back_rank = match alliance {
        Alliance::White => 56,
        Alliance::Black => 0,
    };
    let at = |col: u8| Coord::from_index(back_rank + col);
    let empty = |col: u8| !board.get_square(at(col)).is_occupied();
    let unattacked =
        |col: u8| !opponent_moves.iter().any(|mv| mv.destination() == at(col));
    let corner_rook = |col: u8| {
        board.get_square(at(col)).piece().filter(|rook| {
            rook.kind == PieceKind::Rook && rook.is_first_move && rook.alliance == alliance
        })
    };

    // King side: f and g files clear and safe, rook on h.
    if empty(5) && empty(6) && unattacked(5) && unattacked(6) {
        if let Some(rook) = corner_rook(7) {
            castles.push(Move::new(
                king,
                at(6),
                MoveKind::KingSideCastle { rook, rook_to: at(5) },
            ));
        }
    }
    // Queen side: b, c and d files clear, c and d safe, rook on a. The b
    // square only needs to be empty for the rook's passage.
    if empty(1) && empty(2) && empty(3) && unattacked(2) && unattacked(3) {
        if let Some(rook) = corner_rook(0) {
            castles.push(Move::new(
                king,
                at(2),
                MoveKind::QueenSideCastle { rook, rook_to: at(3) },
            ));
        }
    }
    castles
}
