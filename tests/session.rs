//! End-to-end drive of the public API: whole games played through the
//! session layer, the value-level move application, and the game-over
//! classification a UI would consume.

use chesskit::{
    ChessError, Color, Game, GameStatus, Move, PieceType, Position, Square, apply_move,
    is_checkmate, is_stalemate, legal_moves, move_to_san, parse_lan, parse_san,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

// =====================================================================
// Whole games
// =====================================================================

#[test]
fn scholars_mate_full_game() {
    let mut game = Game::new();
    for san in ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6"] {
        game.make_san_move(san).unwrap();
    }
    let last = game.make_san_move("Qxf7").unwrap();
    assert_eq!(last.san, "Qxf7#");
    assert_eq!(last.capture, Some(PieceType::Pawn));

    assert_eq!(*game.status(), GameStatus::Checkmate);
    assert!(game.is_game_over());
    assert!(is_checkmate(game.position()));
    assert_eq!(game.history().len(), 7);

    // The loser cannot keep playing.
    assert!(matches!(
        game.make_san_move("Ke7"),
        Err(ChessError::GameOver(_))
    ));
}

#[test]
fn game_replays_from_lan_history() {
    let mut game = Game::new();
    for lan in [
        "e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6",
    ] {
        game.make_lan_move(lan).unwrap();
    }
    let history = game.lan_history();
    let strs: Vec<&str> = history.iter().map(String::as_str).collect();
    let replayed = Game::from_lan_moves(&strs).unwrap();
    assert_eq!(replayed.to_fen(), game.to_fen());
    assert_eq!(replayed.history().len(), game.history().len());
}

// =====================================================================
// Value semantics of apply_move
// =====================================================================

#[test]
fn apply_move_leaves_the_input_untouched() {
    let start = Position::starting();
    let fen_before = start.to_fen();

    let mv = parse_lan(&start, "d2d4").unwrap();
    let next = apply_move(&start, mv).unwrap();

    assert_eq!(start.to_fen(), fen_before);
    assert_ne!(next.to_fen(), fen_before);
    assert_eq!(next.side_to_move(), Color::Black);

    // Two applications from the same position are independent.
    let other = apply_move(&start, parse_lan(&start, "g1f3").unwrap()).unwrap();
    assert_ne!(other.to_fen(), next.to_fen());
}

#[test]
fn rejected_moves_surface_typed_errors() {
    let start = Position::starting();
    // Fabricated move, never generated.
    let bogus = Move::new(sq("a1"), sq("a5"));
    assert!(matches!(
        apply_move(&start, bogus),
        Err(ChessError::IllegalMove { .. })
    ));
    // Malformed wire input.
    assert!(matches!(
        parse_lan(&start, "hello"),
        Err(ChessError::InvalidSquare(_))
    ));
}

// =====================================================================
// Castling, per the rights-lifecycle rules
// =====================================================================

#[test]
fn kingside_castle_after_clearing_the_wing() {
    let mut game = Game::new();
    // 1.e4 e5 2.Nf3 Nc6 3.Bc4 Bc5 — both wings cleared for O-O.
    for san in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"] {
        game.make_san_move(san).unwrap();
    }
    let castle = game.make_san_move("O-O").unwrap();
    assert_eq!(castle.san, "O-O");
    let pos = game.position();
    assert_eq!(pos.piece_at(sq("g1")), Some((Color::White, PieceType::King)));
    assert_eq!(pos.piece_at(sq("f1")), Some((Color::White, PieceType::Rook)));
    assert!(!pos.castling_rights().kingside(Color::White));
    assert!(!pos.castling_rights().queenside(Color::White));
}

#[test]
fn castling_needs_safe_path_and_empty_squares() {
    // Empty path but f1 covered by the f8 rook: O-O is illegal, O-O-O fine.
    let pos = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let sans: Vec<String> = legal_moves(&pos)
        .iter()
        .map(|m| move_to_san(&pos, *m, &legal_moves(&pos)))
        .collect();
    assert!(!sans.iter().any(|s| s == "O-O"));
    assert!(sans.iter().any(|s| s == "O-O-O"));

    // Blocked f1 square: no kingside castle even with rights intact.
    let blocked = Position::from_fen("4k3/8/8/8/8/8/8/R3KB1R w KQ - 0 1").unwrap();
    assert!(parse_san(&blocked, "O-O").is_err());
}

// =====================================================================
// En passant through a full sequence
// =====================================================================

#[test]
fn en_passant_sequence_e4_nf6_e5_d5() {
    let mut game = Game::new();
    game.make_lan_move("e2e4").unwrap();
    // Not capturable by any black pawn: no target recorded.
    assert_eq!(game.position().en_passant_target(), None);

    game.make_lan_move("g8f6").unwrap();
    game.make_lan_move("e4e5").unwrap();
    game.make_lan_move("d7d5").unwrap();

    // The e5 pawn stands beside d5: target d6 is live.
    assert_eq!(game.position().en_passant_target(), Some(sq("d6")));

    let capture = game.make_lan_move("e5d6").unwrap();
    assert_eq!(capture.san, "exd6");
    assert_eq!(capture.capture, Some(PieceType::Pawn));
    let pos = game.position();
    assert_eq!(pos.piece_at(sq("d6")), Some((Color::White, PieceType::Pawn)));
    assert_eq!(pos.piece_at(sq("d5")), None, "the passed pawn is removed");
}

#[test]
fn en_passant_window_closes_after_one_move() {
    let mut game = Game::new();
    for lan in ["e2e4", "g8f6", "e4e5", "d7d5"] {
        game.make_lan_move(lan).unwrap();
    }
    // White declines the capture...
    game.make_lan_move("b1c3").unwrap();
    game.make_lan_move("f6g8").unwrap();
    // ...and can never take d6 en passant again.
    assert_eq!(game.position().en_passant_target(), None);
    assert!(game.make_lan_move("e5d6").is_err());
}

// =====================================================================
// Game-over banners
// =====================================================================

#[test]
fn stalemate_banner() {
    let game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(*game.status(), GameStatus::Stalemate);
    assert!(is_stalemate(game.position()));
    assert!(game.legal_moves().is_empty());
    assert!(!game.position().is_in_check());
}

#[test]
fn fools_mate_position_is_checkmate() {
    let pos =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    assert!(is_checkmate(&pos));
    assert!(legal_moves(&pos).is_empty());
}

#[test]
fn status_strings_for_display() {
    let mate = Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert_eq!(mate.status().as_str(), "checkmate");
    assert_eq!(
        serde_json::to_string(mate.status()).unwrap(),
        "\"checkmate\""
    );
}
