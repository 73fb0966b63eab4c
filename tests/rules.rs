use arbiter::{
    check, Board, Color, Displacement, Game, IllegalMove, Move, MoveFlags, Outcome, PlayError,
    Square,
};

fn mv(uci: &str) -> Move {
    let (from, to) = uci.split_at(2);
    Move::new(from.parse().expect("from"), to.parse().expect("to"))
}

fn play_all(game: &mut Game, moves: &str) {
    for uci in moves.split_whitespace() {
        game.play(mv(uci))
            .unwrap_or_else(|err| panic!("{uci}: {err}"));
    }
}

fn illegal(reason: IllegalMove) -> Result<(), PlayError> {
    Err(PlayError::Illegal(reason))
}

/// Initial position with the given squares cleared.
fn cleared(squares: &[Square]) -> Board {
    let mut board = Board::new();
    for &sq in squares {
        board.remove_piece_at(sq);
    }
    board
}

#[test]
fn test_castling_both_sides() {
    let board = cleared(&[
        Square::B1,
        Square::C1,
        Square::D1,
        Square::F1,
        Square::G1,
        Square::B8,
        Square::C8,
        Square::D8,
        Square::F8,
        Square::G8,
    ]);
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    let legal = game.play(mv("e1g1")).expect("white castles short");
    assert!(legal.is_castle());
    assert_eq!(
        legal.aux,
        Some(Displacement::Relocate(Move::new(Square::H1, Square::F1)))
    );
    assert_eq!(game.board().piece_at(Square::G1), Some(Color::White.king()));
    assert_eq!(game.board().piece_at(Square::F1), Some(Color::White.rook()));
    assert_eq!(game.board().piece_at(Square::H1), None);
    assert_eq!(game.board().piece_at(Square::E1), None);

    game.play(mv("e8c8")).expect("black castles long");
    assert_eq!(game.board().piece_at(Square::C8), Some(Color::Black.king()));
    assert_eq!(game.board().piece_at(Square::D8), Some(Color::Black.rook()));
    assert_eq!(game.board().piece_at(Square::A8), None);

    assert!(game.history().has_moved_from(Square::E1));
    assert!(game.history().has_moved_from(Square::E8));
    assert!(!game.history().has_moved_from(Square::A1));
}

#[test]
fn test_castling_after_king_returned() {
    let board = cleared(&[Square::F1, Square::G1]);
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    play_all(&mut game, "e1f1 a7a6 f1e1 a6a5");
    assert_eq!(game.board().piece_at(Square::E1), Some(Color::White.king()));
    assert_eq!(
        game.play(mv("e1g1")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );
}

#[test]
fn test_castling_after_rook_returned() {
    let board = cleared(&[Square::F1, Square::G1]);
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    play_all(&mut game, "h1g1 a7a6 g1h1 a6a5");
    assert_eq!(
        game.play(mv("e1g1")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );
}

#[test]
fn test_castling_through_attack() {
    let mut board = Board::empty();
    board.set_piece_at(Square::E1, Color::White.king());
    board.set_piece_at(Square::A1, Color::White.rook());
    board.set_piece_at(Square::H1, Color::White.rook());
    board.set_piece_at(Square::D8, Color::Black.king());
    board.set_piece_at(Square::F5, Color::Black.rook());
    let mut game = Game::from_board(board.clone(), Color::White).expect("valid position");

    // f1 is attacked.
    assert_eq!(
        game.validate(mv("e1g1")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );
    assert!(game.validate(mv("e1c1")).is_ok());

    // In check.
    board.remove_piece_at(Square::F5);
    board.set_piece_at(Square::E5, Color::Black.rook());
    let mut game = Game::from_board(board.clone(), Color::White).expect("valid position");
    assert!(game.is_check());
    assert_eq!(
        game.validate(mv("e1g1")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );
    assert_eq!(
        game.validate(mv("e1c1")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );

    // Queen side: b1 may be attacked, it is only crossed by the rook.
    board.remove_piece_at(Square::E5);
    board.set_piece_at(Square::B5, Color::Black.rook());
    let mut game = Game::from_board(board, Color::White).expect("valid position");
    assert!(game.validate(mv("e1c1")).is_ok());
}

#[test]
fn test_en_passant() {
    let mut game = Game::new();
    play_all(&mut game, "e2e4 a7a6 e4e5 d7d5");

    let legal = game.play(mv("e5d6")).expect("en passant");
    assert_eq!(legal.flags, MoveFlags::EN_PASSANT);
    assert!(legal.is_capture());
    assert_eq!(game.board().piece_at(Square::D5), None);
    assert_eq!(game.board().piece_at(Square::D6), Some(Color::White.pawn()));
    assert_eq!(game.board().count(), 31);
    assert_eq!(game.halfmoves(), 0);
}

#[test]
fn test_en_passant_expires() {
    let mut game = Game::new();
    play_all(&mut game, "e2e4 a7a6 e4e5 d7d5 g1f3 a6a5");
    assert_eq!(
        game.play(mv("e5d6")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );
}

#[test]
fn test_en_passant_needs_double_push() {
    let mut game = Game::new();
    play_all(&mut game, "e2e4 d7d6 e4e5 d6d5");
    assert_eq!(
        game.play(mv("e5d6")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );
}

#[test]
fn test_validation_does_not_mutate() {
    let mut game = Game::new();
    play_all(&mut game, "e2e4 a7a6 e4e5 d7d5");

    let mut board = game.board().clone();
    let before = board.clone();

    for (m, aux, exposed) in [
        (mv("e5d6"), Some(Displacement::Remove(Square::D5)), false),
        (mv("e1e2"), None, false),
        (mv("d1h5"), None, false),
        // The king walks into the d5 pawn's attack.
        (mv("e1e4"), None, true),
    ] {
        assert_eq!(
            check::would_leave_king_in_check(&mut board, m, aux, Color::White),
            Ok(exposed),
            "{m}"
        );
        assert_eq!(board, before);
    }

    for m in game.legal_moves().expect("valid position") {
        let _ = game.validate(m.m);
        assert_eq!(game.board(), &before);
    }
}

#[test]
fn test_pinned_piece() {
    let mut board = Board::empty();
    board.set_piece_at(Square::E1, Color::White.king());
    board.set_piece_at(Square::E2, Color::White.knight());
    board.set_piece_at(Square::E8, Color::Black.rook());
    board.set_piece_at(Square::A8, Color::Black.king());
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    assert_eq!(
        game.play(mv("e2c3")).map(|_| ()),
        illegal(IllegalMove::KingInCheck)
    );
    assert_eq!(
        game.play(mv("e1e3")).map(|_| ()),
        illegal(IllegalMove::IncompatibleMovement)
    );
    assert!(game.play(mv("e1d1")).is_ok());
}

#[test]
fn test_threefold_repetition() {
    let mut game = Game::new();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    for (ply, uci) in shuffle.iter().cycle().take(8).enumerate() {
        assert_eq!(game.outcome(), None, "ply {ply}");
        game.play(mv(uci)).expect("legal shuffle");
    }

    assert_eq!(game.history().repetitions(), 3);
    assert_eq!(game.outcome(), Some(Outcome::ThreefoldRepetition));
}

#[test]
fn test_insufficient_material() {
    let mut board = Board::empty();
    board.set_piece_at(Square::E1, Color::White.king());
    board.set_piece_at(Square::C1, Color::White.bishop());
    board.set_piece_at(Square::E8, Color::Black.king());
    let game = Game::from_board(board.clone(), Color::Black).expect("valid position");
    assert_eq!(game.outcome(), Some(Outcome::InsufficientMaterial));

    board.set_piece_at(Square::F1, Color::White.bishop());
    let game = Game::from_board(board, Color::Black).expect("valid position");
    assert_eq!(game.outcome(), None);
}

#[test]
fn test_insufficient_material_after_capture() {
    let mut board = Board::empty();
    board.set_piece_at(Square::E1, Color::White.king());
    board.set_piece_at(Square::B2, Color::White.bishop());
    board.set_piece_at(Square::E8, Color::Black.king());
    board.set_piece_at(Square::G7, Color::Black.pawn());
    let mut game = Game::from_board(board, Color::White).expect("valid position");
    assert_eq!(game.outcome(), None);

    game.play(mv("b2g7")).expect("capture");
    assert_eq!(game.outcome(), Some(Outcome::InsufficientMaterial));
    assert_eq!(
        game.play(mv("e8e7")).map(|_| ()),
        illegal(IllegalMove::GameOver)
    );
}

/// Rooks walking along their ranks, never repeating a position three times
/// within a hundred half-moves.
fn rook_walk() -> (Game, Vec<Move>) {
    let mut board = Board::empty();
    board.set_piece_at(Square::H1, Color::White.king());
    board.set_piece_at(Square::A2, Color::White.rook());
    board.set_piece_at(Square::H8, Color::Black.king());
    board.set_piece_at(Square::A7, Color::Black.rook());
    let game = Game::from_board(board, Color::White).expect("valid position");

    let white_files = 7;
    let black_files = 6;
    let mut moves = Vec::new();
    for n in 0..50 {
        moves.push(Move::new(
            Square::new(6, n % white_files),
            Square::new(6, (n + 1) % white_files),
        ));
        moves.push(Move::new(
            Square::new(1, n % black_files),
            Square::new(1, (n + 1) % black_files),
        ));
    }
    (game, moves)
}

#[test]
fn test_fifty_moves() {
    let (mut game, moves) = rook_walk();

    for (ply, &m) in moves.iter().enumerate() {
        assert_eq!(game.outcome(), None, "ply {ply}");
        game.play(m).unwrap_or_else(|err| panic!("ply {ply}: {m}: {err}"));
    }

    assert_eq!(game.halfmoves(), 100);
    assert_eq!(game.outcome(), Some(Outcome::FiftyMoves));
}

#[test]
fn test_capture_resets_halfmoves() {
    let mut board = Board::empty();
    board.set_piece_at(Square::H1, Color::White.king());
    board.set_piece_at(Square::A2, Color::White.rook());
    board.set_piece_at(Square::D2, Color::Black.knight());
    board.set_piece_at(Square::H8, Color::Black.king());
    board.set_piece_at(Square::A7, Color::Black.rook());
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    play_all(&mut game, "h1g1 a7b7 g1h1 b7c7 h1g1 c7d7 g1h1 d7e7");
    assert_eq!(game.halfmoves(), 8);

    play_all(&mut game, "a2d2");
    assert_eq!(game.halfmoves(), 0);

    play_all(&mut game, "e7e6");
    assert_eq!(game.halfmoves(), 1);
}

#[test]
fn test_back_rank_mate() {
    let mut board = Board::empty();
    board.set_piece_at(Square::G1, Color::White.king());
    board.set_piece_at(Square::D1, Color::White.queen());
    board.set_piece_at(Square::G8, Color::Black.king());
    board.set_piece_at(Square::F7, Color::Black.pawn());
    board.set_piece_at(Square::G7, Color::Black.pawn());
    board.set_piece_at(Square::H7, Color::Black.pawn());
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    game.play(mv("d1d8")).expect("queen to the back rank");
    assert!(game.is_check());
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn test_back_rank_escape() {
    let mut board = Board::empty();
    board.set_piece_at(Square::G1, Color::White.king());
    board.set_piece_at(Square::D1, Color::White.queen());
    board.set_piece_at(Square::G8, Color::Black.king());
    board.set_piece_at(Square::F7, Color::Black.pawn());
    board.set_piece_at(Square::G6, Color::Black.pawn());
    board.set_piece_at(Square::H7, Color::Black.pawn());
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    game.play(mv("d1d8")).expect("queen to the back rank");
    assert!(game.is_check());
    assert_eq!(game.outcome(), None);
    assert!(game.play(mv("g8g7")).is_ok());
}

#[test]
fn test_stalemate() {
    let mut board = Board::empty();
    board.set_piece_at(Square::E1, Color::White.king());
    board.set_piece_at(Square::C1, Color::White.queen());
    board.set_piece_at(Square::A8, Color::Black.king());
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    game.play(mv("c1c7")).expect("quiet queen move");
    assert!(!game.is_check());
    assert_eq!(game.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn test_knight_destinations() {
    let mut board = Board::empty();
    board.set_piece_at(Square::A1, Color::White.king());
    board.set_piece_at(Square::H8, Color::Black.king());
    board.set_piece_at(Square::D4, Color::White.knight());
    board.set_piece_at(Square::E6, Color::White.pawn());
    board.set_piece_at(Square::C6, Color::Black.pawn());
    let mut game = Game::from_board(board, Color::White).expect("valid position");

    let mut destinations: Vec<Square> = game
        .legal_moves()
        .expect("valid position")
        .into_iter()
        .filter(|legal| legal.m.from() == Square::D4)
        .map(|legal| legal.m.to())
        .collect();
    destinations.sort();

    let mut expected = vec![
        Square::C6,
        Square::B5,
        Square::B3,
        Square::C2,
        Square::E2,
        Square::F3,
        Square::F5,
    ];
    expected.sort();
    assert_eq!(destinations, expected);
}
