use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::alliance::Alliance;
use crate::board::Board;
use crate::coord::{
    Coord, EIGHTH_COLUMN, FIRST_COLUMN, SECOND_COLUMN, SEVENTH_COLUMN,
};
use crate::moves::{Move, MoveKind};

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Evaluation value, consumed by external search/scoring layers.
    pub fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 10000,
        }
    }

    pub fn to_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A piece value tied to one board snapshot. The first-move flag governs pawn
/// double-push and castling eligibility and is cleared by any relocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub alliance: Alliance,
    pub position: Coord,
    pub is_first_move: bool,
}

impl Piece {
    pub fn initial(kind: PieceKind, alliance: Alliance, position: Coord) -> Piece {
        Piece::new(kind, alliance, position, true)
    }

    pub fn moved_to(self, to: Coord) -> Piece {
        Piece { position: to, is_first_move: false, ..self }
    }

    /// Pseudo-legal moves for this piece: movement rule and occupancy only,
    /// king safety is checked later by `Player::make_move`. Castles are never
    /// generated here (they need opponent-attack data only the board build
    /// has).
    pub fn calculate_legal_moves(&self, board: &Board) -> Vec<Move> {
        match self.kind {
            PieceKind::Pawn => pawn_moves(*self, board),
            PieceKind::Knight => step_moves(*self, board, &KNIGHT_OFFSETS, knight_excluded),
            PieceKind::Bishop => sliding_moves(*self, board, &BISHOP_VECTORS),
            PieceKind::Rook => sliding_moves(*self, board, &ROOK_VECTORS),
            PieceKind::Queen => sliding_moves(*self, board, &QUEEN_VECTORS),
            PieceKind::King => step_moves(*self, board, &KING_OFFSETS, king_excluded),
        }
    }
}

const KNIGHT_OFFSETS: [i16; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_OFFSETS: [i16; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const BISHOP_VECTORS: [i16; 4] = [-9, -7, 7, 9];
const ROOK_VECTORS: [i16; 4] = [-8, -1, 1, 8];
const QUEEN_VECTORS: [i16; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

// A fixed offset wraps around the board edge when applied near a rim column;
// membership tables catch exactly those cases.
fn knight_excluded(from: Coord, offset: i16) -> bool {
    let idx = from.index();
    (FIRST_COLUMN[idx] && matches!(offset, -17 | -10 | 6 | 15))
        || (SECOND_COLUMN[idx] && matches!(offset, -10 | 6))
        || (SEVENTH_COLUMN[idx] && matches!(offset, -6 | 10))
        || (EIGHTH_COLUMN[idx] && matches!(offset, -15 | -6 | 10 | 17))
}

fn king_excluded(from: Coord, offset: i16) -> bool {
    let idx = from.index();
    (FIRST_COLUMN[idx] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[idx] && matches!(offset, -7 | 1 | 9))
}

fn ray_excluded(at: Coord, offset: i16) -> bool {
    let idx = at.index();
    (FIRST_COLUMN[idx] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[idx] && matches!(offset, -7 | 1 | 9))
}

fn step_moves(
    piece: Piece, board: &Board, offsets: &[i16], excluded: fn(Coord, i16) -> bool,
) -> Vec<Move> {
    let mut moves = Vec::new();
    for &offset in offsets {
        if excluded(piece.position, offset) {
            continue;
        }
        let Some(to) = piece.position.shifted(offset) else {
            continue;
        };
        match board.get_square(to).piece() {
            None => moves.push(Move::new(piece, to, MoveKind::Major)),
            Some(target) => {
                if target.alliance != piece.alliance {
                    moves.push(Move::new(piece, to, MoveKind::Attack { captured: target }));
                }
            }
        }
    }
    moves
}

fn sliding_moves(piece: Piece, board: &Board, vectors: &[i16]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &vector in vectors {
        let mut at = piece.position;
        loop {
            if ray_excluded(at, vector) {
                break;
            }
            let Some(to) = at.shifted(vector) else {
                break;
            };
            match board.get_square(to).piece() {
                None => {
                    moves.push(Move::new(piece, to, MoveKind::Major));
                    at = to;
                }
                Some(target) => {
                    if target.alliance != piece.alliance {
                        moves.push(Move::new(piece, to, MoveKind::Attack { captured: target }));
                    }
                    break;
                }
            }
        }
    }
    moves
}

fn promotable(mv: Move) -> Move {
    if mv.piece.alliance.is_promotion_square(mv.to) {
        Move::new(mv.piece, mv.to, MoveKind::Promotion(Box::new(mv)))
    } else {
        mv
    }
}

fn pawn_moves(piece: Piece, board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    let alliance = piece.alliance;
    let dir = alliance.direction();
    let from = piece.position;

    // Single push.
    if let Some(to) = from.shifted(dir * 8) {
        if !board.get_square(to).is_occupied() {
            moves.push(promotable(Move::new(piece, to, MoveKind::Major)));
        }
    }

    // Double push: only from the unmoved starting rank, both squares empty.
    if piece.is_first_move && alliance.is_pawn_start_square(from) {
        let behind = from.shifted(dir * 8).unwrap();
        let to = from.shifted(dir * 16).unwrap();
        if !board.get_square(behind).is_occupied() && !board.get_square(to).is_occupied() {
            moves.push(Move::new(piece, to, MoveKind::PawnJump));
        }
    }

    // Diagonal captures. Offset 7 bends toward the h-file for White and the
    // a-file for Black; offset 9 the other way around.
    let captures = [
        (7, EIGHTH_COLUMN[from.index()], FIRST_COLUMN[from.index()], 1),
        (9, FIRST_COLUMN[from.index()], EIGHTH_COLUMN[from.index()], -1),
    ];
    for (offset, white_edge, black_edge, en_passant_side) in captures {
        let edge_excluded = match alliance {
            Alliance::White => white_edge,
            Alliance::Black => black_edge,
        };
        if edge_excluded {
            continue;
        }
        let Some(to) = from.shifted(dir * offset) else {
            continue;
        };
        match board.get_square(to).piece() {
            Some(target) => {
                if target.alliance != alliance {
                    moves.push(promotable(Move::new(
                        piece,
                        to,
                        MoveKind::Attack { captured: target },
                    )));
                }
            }
            None => {
                // The en-passant pawn must sit directly beside the mover on
                // the capture's file.
                if let Some(en_passant_pawn) = board.en_passant_pawn() {
                    let beside =
                        from.shifted(alliance.opposite_direction() * en_passant_side);
                    if beside == Some(en_passant_pawn.position)
                        && en_passant_pawn.alliance != alliance
                    {
                        moves.push(Move::new(
                            piece,
                            to,
                            MoveKind::EnPassant { captured: en_passant_pawn },
                        ));
                    }
                }
            }
        }
    }
    moves
}
