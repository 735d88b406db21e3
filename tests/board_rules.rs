use classic_chess::alliance::Alliance;
use classic_chess::board::{Board, BoardBuilder};
use classic_chess::coord::Coord;
use classic_chess::moves::{Move, MoveKind, MoveStatus};
use classic_chess::piece::{Piece, PieceKind};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

fn at(square: &str) -> Coord { Coord::from_algebraic(square) }

fn king(alliance: Alliance, square: &str) -> Piece {
    Piece::initial(PieceKind::King, alliance, at(square))
}

/// Looks the move up by coordinates and plays it, asserting a Done status.
fn play(board: &Board, from: u8, to: u8) -> Board {
    let mv = board
        .find_move(Coord::from_index(from), Coord::from_index(to))
        .unwrap_or_else(|| panic!("no candidate move {from}->{to}"));
    let transition = board.current_player().make_move(&mv);
    assert_eq!(transition.status, MoveStatus::Done, "move {from}->{to} rejected");
    transition.board
}

#[test]
fn initial_board() {
    let board = Board::standard();
    for alliance in Alliance::iter() {
        assert_eq!(board.active_pieces(alliance).len(), 16);
        assert!(!board.is_in_check(alliance));
    }
    assert_eq!(board.side_to_move(), Alliance::White);
    // 16 pawn moves + 4 knight moves, symmetric before either side moves.
    assert_eq!(board.current_player().legal_moves().len(), 20);
    assert_eq!(board.current_player().opponent().legal_moves().len(), 20);
    assert!(!board.current_player().is_in_check());
    assert_eq!(board.en_passant_pawn(), None);
}

#[test]
fn fools_mate() {
    let board = Board::standard();
    let board = play(&board, 53, 45); // f2-f3
    let board = play(&board, 12, 28); // e7-e5
    let board = play(&board, 54, 38); // g2-g4
    let board = play(&board, 3, 39); // Qd8-h4#
    assert_eq!(board.side_to_move(), Alliance::White);
    assert!(board.current_player().is_in_check());
    assert!(board.current_player().is_in_checkmate());
    assert!(!board.current_player().is_in_stalemate());
}

#[test]
fn unknown_move_is_rejected_and_board_preserved() {
    let board = Board::standard();
    let pawn = board.get_square(at("e2")).piece().unwrap();
    // A three-square pawn push exists in no legal move set.
    let bogus = Move::new(pawn, at("e5"), MoveKind::Major);
    let transition = board.current_player().make_move(&bogus);
    assert_eq!(transition.status, MoveStatus::IllegalMove);
    assert_eq!(transition.board.to_string(), board.to_string());
    assert_eq!(transition.board.side_to_move(), Alliance::White);
}

#[test]
fn pinned_piece_move_leaves_player_in_check() {
    let board = BoardBuilder::new()
        .set_piece(king(Alliance::White, "e1"))
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::White, at("e2")))
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::Black, at("e8")))
        .set_piece(king(Alliance::Black, "h8"))
        .set_next_to_move(Alliance::White)
        .build();
    let mv = board.find_move(at("e2"), at("d2")).unwrap();
    let transition = board.current_player().make_move(&mv);
    assert_eq!(transition.status, MoveStatus::LeavesPlayerInCheck);
    assert_eq!(transition.board.to_string(), board.to_string());
    // Moving along the pin is still fine.
    let board = play(&board, at("e2").index() as u8, at("e5").index() as u8);
    assert_eq!(board.side_to_move(), Alliance::Black);
}

#[test]
fn king_side_castle() {
    let board = BoardBuilder::new()
        .set_piece(king(Alliance::White, "e1"))
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::White, at("h1")))
        .set_piece(king(Alliance::Black, "e8"))
        .set_next_to_move(Alliance::White)
        .build();
    let castle = board.find_move(Coord::from_index(60), Coord::from_index(62)).unwrap();
    assert!(castle.is_castling_move());
    assert!(!castle.is_attack());
    let board = play(&board, 60, 62);
    assert_eq!(board.get_square(Coord::from_index(62)).piece().unwrap().kind, PieceKind::King);
    assert_eq!(board.get_square(Coord::from_index(61)).piece().unwrap().kind, PieceKind::Rook);
    assert!(!board.get_square(Coord::from_index(62)).piece().unwrap().is_first_move);
    assert!(!board.get_square(Coord::from_index(61)).piece().unwrap().is_first_move);
    assert!(!board.get_square(Coord::from_index(60)).is_occupied());
    assert!(!board.get_square(Coord::from_index(63)).is_occupied());
}

#[test]
fn queen_side_castle_for_black() {
    let board = BoardBuilder::new()
        .set_piece(king(Alliance::Black, "e8"))
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::Black, at("a8")))
        .set_piece(king(Alliance::White, "e1"))
        .set_next_to_move(Alliance::Black)
        .build();
    let castle = board.find_move(at("e8"), at("c8")).unwrap();
    assert!(castle.is_castling_move());
    let board = play(&board, 4, 2);
    assert_eq!(board.get_square(at("c8")).piece().unwrap().kind, PieceKind::King);
    assert_eq!(board.get_square(at("d8")).piece().unwrap().kind, PieceKind::Rook);
    assert!(!board.get_square(at("a8")).is_occupied());
    assert!(!board.get_square(at("e8")).is_occupied());
}

#[test]
fn castle_through_attacked_square_is_not_offered() {
    let board = BoardBuilder::new()
        .set_piece(king(Alliance::White, "e1"))
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::White, at("h1")))
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::Black, at("f8")))
        .set_piece(king(Alliance::Black, "a8"))
        .set_next_to_move(Alliance::White)
        .build();
    // f1 is covered by the rook on f8, so 0-0 must not be generated.
    assert_eq!(board.find_move(Coord::from_index(60), Coord::from_index(62)), None);
}

#[test]
fn moved_rook_disables_castling() {
    let board = BoardBuilder::new()
        .set_piece(king(Alliance::White, "e1"))
        .set_piece(Piece::new(PieceKind::Rook, Alliance::White, at("h1"), false))
        .set_piece(king(Alliance::Black, "e8"))
        .set_next_to_move(Alliance::White)
        .build();
    assert_eq!(board.find_move(at("e1"), at("g1")), None);
}

#[test]
fn en_passant_capture() {
    let board = BoardBuilder::new()
        .set_piece(Piece::initial(PieceKind::Pawn, Alliance::White, Coord::from_index(28)))
        .set_piece(Piece::initial(PieceKind::Pawn, Alliance::Black, Coord::from_index(11)))
        .set_piece(king(Alliance::White, "e1"))
        .set_piece(king(Alliance::Black, "e8"))
        .set_next_to_move(Alliance::Black)
        .build();

    // Black double-jumps d7-d5, arming the en-passant window.
    let board = play(&board, 11, 27);
    assert_eq!(board.en_passant_pawn().map(|p| p.position), Some(Coord::from_index(27)));

    // White captures in passing: e5xd6. The victim is not on the
    // destination square.
    let capture = board.find_move(Coord::from_index(28), Coord::from_index(19)).unwrap();
    assert!(capture.is_attack());
    assert_eq!(capture.attacked_piece().map(|p| p.position), Some(Coord::from_index(27)));
    let board = play(&board, 28, 19);
    assert!(!board.get_square(Coord::from_index(27)).is_occupied());
    let landed = board.get_square(Coord::from_index(19)).piece().unwrap();
    assert_eq!(landed.kind, PieceKind::Pawn);
    assert_eq!(landed.alliance, Alliance::White);
    assert_eq!(board.active_pieces(Alliance::Black).len(), 1);
    assert_eq!(board.en_passant_pawn(), None);
}

#[test]
fn en_passant_window_lasts_one_move() {
    let board = BoardBuilder::new()
        .set_piece(Piece::initial(PieceKind::Pawn, Alliance::White, Coord::from_index(28)))
        .set_piece(Piece::initial(PieceKind::Pawn, Alliance::Black, Coord::from_index(11)))
        .set_piece(king(Alliance::White, "e1"))
        .set_piece(king(Alliance::Black, "e8"))
        .set_next_to_move(Alliance::Black)
        .build();
    let board = play(&board, 11, 27); // d7-d5
    let board = play(&board, 60, 59); // Ke1-d1, declining the capture
    let board = play(&board, 4, 3); // Ke8-d8
    // The window is gone: e5xd6 no longer exists.
    assert_eq!(board.en_passant_pawn(), None);
    assert_eq!(board.find_move(Coord::from_index(28), Coord::from_index(19)), None);
}

#[test]
fn rook_on_an_empty_board_has_fourteen_destinations() {
    let board = BoardBuilder::new()
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::White, Coord::from_index(35)))
        .set_piece(king(Alliance::White, "h1"))
        .set_piece(king(Alliance::Black, "e8"))
        .set_next_to_move(Alliance::White)
        .build();
    let rook_moves = board
        .current_player()
        .legal_moves()
        .iter()
        .filter(|mv| mv.source() == Coord::from_index(35))
        .count();
    assert_eq!(rook_moves, 14);
}

#[test]
fn captures_shrink_the_opponent_by_exactly_one() {
    let board = Board::standard();
    let board = play(&board, 51, 35); // d2-d4
    assert_eq!(board.active_pieces(Alliance::White).len(), 16);
    assert_eq!(board.active_pieces(Alliance::Black).len(), 16);
    let board = play(&board, 12, 28); // e7-e5
    let board = play(&board, 35, 28); // d4xe5
    assert_eq!(board.active_pieces(Alliance::White).len(), 16);
    assert_eq!(board.active_pieces(Alliance::Black).len(), 15);
    let pawn = board.get_square(Coord::from_index(28)).piece().unwrap();
    assert_eq!((pawn.kind, pawn.alliance), (PieceKind::Pawn, Alliance::White));
}

#[test]
fn promotion_always_yields_a_queen() {
    let board = BoardBuilder::new()
        .set_piece(Piece::new(PieceKind::Pawn, Alliance::White, at("b7"), false))
        .set_piece(king(Alliance::White, "e1"))
        .set_piece(king(Alliance::Black, "h6"))
        .set_next_to_move(Alliance::White)
        .build();
    let promotion = board.find_move(at("b7"), at("b8")).unwrap();
    assert!(matches!(promotion.kind, MoveKind::Promotion(_)));
    let board = play(&board, at("b7").index() as u8, at("b8").index() as u8);
    let queen = board.get_square(at("b8")).piece().unwrap();
    assert_eq!(queen.kind, PieceKind::Queen);
    assert_eq!(queen.alliance, Alliance::White);
    assert!(!queen.is_first_move);
    // The pawn was replaced, not duplicated.
    assert_eq!(board.active_pieces(Alliance::White).len(), 2);
}

#[test]
fn cornered_king_stalemate() {
    // Black king a8, White queen c7, White king b6: Black has no move but is
    // not in check.
    let board = BoardBuilder::new()
        .set_piece(king(Alliance::Black, "a8"))
        .set_piece(Piece::initial(PieceKind::Queen, Alliance::White, at("c7")))
        .set_piece(king(Alliance::White, "b6"))
        .set_next_to_move(Alliance::Black)
        .build();
    let black = board.current_player();
    assert!(!black.is_in_check());
    assert!(black.is_in_stalemate());
    assert!(!black.is_in_checkmate());
}

#[test]
fn back_rank_mate() {
    let board = BoardBuilder::new()
        .set_piece(king(Alliance::Black, "g8"))
        .set_piece(Piece::initial(PieceKind::Pawn, Alliance::Black, at("f7")))
        .set_piece(Piece::initial(PieceKind::Pawn, Alliance::Black, at("g7")))
        .set_piece(Piece::initial(PieceKind::Pawn, Alliance::Black, at("h7")))
        .set_piece(Piece::initial(PieceKind::Rook, Alliance::White, at("a8")))
        .set_piece(king(Alliance::White, "g1"))
        .set_next_to_move(Alliance::Black)
        .build();
    let black = board.current_player();
    assert!(black.is_in_check());
    assert!(black.is_in_checkmate());
}
