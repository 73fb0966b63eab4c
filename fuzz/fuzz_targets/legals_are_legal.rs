#![no_main]

use arbitrary::Arbitrary;
use arbiter::{Game, Move};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    prelude: Vec<Move>,
    candidate: Move,
}

fuzz_target!(|data: Data| {
    let mut game = Game::new();
    for m in data.prelude {
        let _ = game.play(m);
    }

    let legals = game.legal_moves().expect("kings on board");
    let before = game.board().clone();

    let validated = game.validate(data.candidate);
    assert_eq!(game.board(), &before);
    assert_eq!(
        legals.iter().any(|legal| legal.m == data.candidate),
        validated.is_ok()
    );
    assert!(legals.iter().all(|legal| game.clone().validate(legal.m).is_ok()));
});
