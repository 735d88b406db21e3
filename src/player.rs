use log::trace;

use crate::alliance::Alliance;
use crate::board::Board;
use crate::moves::{Move, MoveStatus, MoveTransition};
use crate::piece::Piece;

/// One side's view of a single board. A player never outlives its board and
/// is never carried over to a successor: ask the successor board for a fresh
/// one.
#[derive(Clone, Copy)]
pub struct Player<'a> {
    board: &'a Board,
    alliance: Alliance,
}

impl<'a> Player<'a> {
    pub(crate) fn new(board: &'a Board, alliance: Alliance) -> Player<'a> {
        Player { board, alliance }
    }

    pub fn alliance(&self) -> Alliance { self.alliance }

    pub fn opponent(&self) -> Player<'a> {
        Player { board: self.board, alliance: self.alliance.opponent() }
    }

    pub fn king(&self) -> Piece { self.board.king(self.alliance) }

    pub fn active_pieces(&self) -> &'a [Piece] { self.board.active_pieces(self.alliance) }

    /// Pseudo-legal moves plus castles. Entries may still be rejected by
    /// `make_move` for exposing the king.
    pub fn legal_moves(&self) -> &'a [Move] { self.board.legal_moves(self.alliance) }

    pub fn is_move_legal(&self, mv: &Move) -> bool { self.legal_moves().contains(mv) }

    pub fn is_in_check(&self) -> bool { self.board.is_in_check(self.alliance) }

    pub fn is_in_checkmate(&self) -> bool { self.is_in_check() && !self.has_escape_moves() }

    pub fn is_in_stalemate(&self) -> bool { !self.is_in_check() && !self.has_escape_moves() }

    // The dominant cost of mate/stalemate detection: every legal move is
    // tried until one yields a Done transition.
    pub fn has_escape_moves(&self) -> bool {
        self.legal_moves().iter().any(|mv| self.make_move(mv).status.is_done())
    }

    /// Attempts a move. Rejection leaves the originating board untouched;
    /// the hypothetical successor built for the king-safety test is
    /// discarded.
    pub fn make_move(&self, mv: &Move) -> MoveTransition {
        if !self.is_move_legal(mv) {
            trace!("{mv} rejected for {:?}: not a legal move here", self.alliance);
            return MoveTransition {
                board: self.board.clone(),
                status: MoveStatus::IllegalMove,
            };
        }
        let successor = mv.execute(self.board);
        if successor.is_in_check(self.alliance) {
            trace!("{mv} rejected for {:?}: leaves the king attacked", self.alliance);
            return MoveTransition {
                board: self.board.clone(),
                status: MoveStatus::LeavesPlayerInCheck,
            };
        }
        trace!("{mv} played by {:?}", self.alliance);
        MoveTransition { board: successor, status: MoveStatus::Done }
    }
}
