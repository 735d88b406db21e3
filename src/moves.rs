use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardBuilder};
use crate::coord::Coord;
use crate::piece::{Piece, PieceKind};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MoveKind {
    /// Quiet relocation to an empty square.
    Major,
    Attack { captured: Piece },
    /// Pawn double push; arms the en-passant window for the reply move.
    PawnJump,
    /// The captured pawn is *not* on the destination square.
    EnPassant { captured: Piece },
    /// Wraps the pawn push or capture that reached the promotion rank.
    Promotion(Box<Move>),
    KingSideCastle { rook: Piece, rook_to: Coord },
    QueenSideCastle { rook: Piece, rook_to: Coord },
}

/// One candidate move, tied to the board it was generated against.
/// `execute` must be called with that same board.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub piece: Piece,
    pub to: Coord,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(piece: Piece, to: Coord, kind: MoveKind) -> Move {
        Move { piece, to, kind }
    }

    pub fn source(&self) -> Coord { self.piece.position }
    pub fn destination(&self) -> Coord { self.to }

    pub fn is_attack(&self) -> bool {
        match &self.kind {
            MoveKind::Attack { .. } | MoveKind::EnPassant { .. } => true,
            MoveKind::Promotion(inner) => inner.is_attack(),
            _ => false,
        }
    }

    pub fn is_castling_move(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::KingSideCastle { .. } | MoveKind::QueenSideCastle { .. }
        )
    }

    pub fn attacked_piece(&self) -> Option<Piece> {
        match &self.kind {
            MoveKind::Attack { captured } | MoveKind::EnPassant { captured } => Some(*captured),
            MoveKind::Promotion(inner) => inner.attacked_piece(),
            _ => None,
        }
    }

    /// Builds the successor board. The input board is never mutated; every
    /// surviving piece is copied, the moved piece lands with its first-move
    /// flag cleared and the side to move flips.
    pub fn execute(&self, board: &Board) -> Board {
        match &self.kind {
            MoveKind::Major | MoveKind::Attack { .. } | MoveKind::PawnJump
            | MoveKind::EnPassant { .. } => self.execute_plain(board),
            MoveKind::Promotion(inner) => {
                let after = inner.execute(board);
                let mut builder = BoardBuilder::new();
                for piece in after.all_pieces() {
                    if piece.position == self.to {
                        // The landed pawn becomes a queen; no under-promotion.
                        builder = builder.set_piece(Piece::new(
                            PieceKind::Queen,
                            self.piece.alliance,
                            self.to,
                            false,
                        ));
                    } else {
                        builder = builder.set_piece(piece);
                    }
                }
                builder.set_next_to_move(after.side_to_move()).build()
            }
            MoveKind::KingSideCastle { rook, rook_to }
            | MoveKind::QueenSideCastle { rook, rook_to } => {
                let mover = self.piece.alliance;
                let mut builder = BoardBuilder::new();
                for piece in board.active_pieces(mover) {
                    if *piece != self.piece && piece != rook {
                        builder = builder.set_piece(*piece);
                    }
                }
                for piece in board.active_pieces(mover.opponent()) {
                    builder = builder.set_piece(*piece);
                }
                builder
                    .set_piece(self.piece.moved_to(self.to))
                    .set_piece(Piece::new(PieceKind::Rook, mover, *rook_to, false))
                    .set_next_to_move(mover.opponent())
                    .build()
            }
        }
    }

    fn execute_plain(&self, board: &Board) -> Board {
        let mover = self.piece.alliance;
        let captured = self.attacked_piece();
        let mut builder = BoardBuilder::new();
        for piece in board.active_pieces(mover) {
            if *piece != self.piece {
                builder = builder.set_piece(*piece);
            }
        }
        for piece in board.active_pieces(mover.opponent()) {
            // Exclusion by piece identity, not destination coordinate: the
            // en-passant victim does not sit on the destination square.
            if Some(*piece) != captured {
                builder = builder.set_piece(*piece);
            }
        }
        let moved = self.piece.moved_to(self.to);
        builder = builder.set_piece(moved);
        if matches!(self.kind, MoveKind::PawnJump) {
            builder = builder.set_en_passant_pawn(moved);
        }
        builder.set_next_to_move(mover.opponent()).build()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_attack() { 'x' } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            self.piece.kind.to_letter(),
            self.source().to_algebraic(),
            sep,
            self.to.to_algebraic()
        )
    }
}

/// Outcome of `Player::make_move`. Rejections are ordinary values, never
/// errors: the engine has nothing to retry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    pub fn is_done(self) -> bool { self == MoveStatus::Done }
}

/// A resulting board paired with the status of the attempt. On rejection the
/// board is the unchanged originating board.
#[derive(Clone, Debug)]
pub struct MoveTransition {
    pub board: Board,
    pub status: MoveStatus,
}
