#![no_main]

use arbiter::{Command, Game};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(command) = Command::from_ascii(data) else {
        return;
    };

    // Whatever parses must be safe to hand to the game.
    let mut game = Game::new();
    let before = game.board().clone();
    match command {
        Command::Play { coords, promotion } => {
            if game.play_coords(coords, promotion).is_err() {
                assert_eq!(game.board(), &before);
                assert_eq!(game.history().len(), 1);
            }
        }
        Command::Resign => assert!(game.resign().is_ok()),
        Command::OfferDraw => assert!(game.accept_draw().is_ok()),
    }
});
