// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fs;
use std::path::PathBuf;

use knightchess::save::{self, Snapshot};
use knightchess::setup::{self, PLAYER_1, PLAYER_2};
use knightchess::{BoardError, Engine, LoadError};

fn scratch_file(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("knightchess-{}-{}.cfg", std::process::id(), name));
    path
}

fn play(engine: &mut Engine, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        let from = engine.tiles().parse_name(from).unwrap();
        let to = engine.tiles().parse_name(to).unwrap();
        let id = engine.tiles().occupant(from).unwrap();
        engine.select_piece(id).unwrap();
        engine.attempt_move(to).unwrap();
    }
}

fn save_text(engine: &Engine) -> String {
    let mut buf = vec![];
    save::serialize(engine.board()).write_to(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn file_round_trip_resumes_game() {
    let mut engine = Engine::new(setup::start_position());
    play(&mut engine, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);

    let path = scratch_file("round-trip");
    save::save_to(engine.board(), &path).unwrap();
    let board = save::load_from(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(save::serialize(engine.board()), save::serialize(&board));
    assert_eq!(PLAYER_2, board.current_player().name());
    assert_eq!(1, board.player(PLAYER_1).unwrap().points());

    // the resumed game keeps going, and undo reaches back past the load.
    let mut resumed = Engine::new(board);
    play(&mut resumed, &[("d8", "d5")]);
    for _ in 0..4 {
        resumed.undo().unwrap();
    }

    let fresh = save::serialize(&setup::start_position());
    let rewound = save::serialize(resumed.board());
    assert_eq!(fresh.players, rewound.players);
    assert!(rewound.moves.is_empty());
}

#[test]
fn save_leaves_no_temporary_file() {
    let engine = Engine::new(setup::start_position());
    let path = scratch_file("no-temp");
    save::save_to(engine.board(), &path).unwrap();

    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    assert!(!PathBuf::from(tmp).exists());
    fs::remove_file(&path).unwrap();
}

#[test]
fn knights_game_round_trip() {
    let board = setup::knights_board(5, [PLAYER_1, PLAYER_2]).unwrap();
    let mut engine = Engine::new(board);
    play(&mut engine, &[("b2", "c4")]);

    let text = save_text(&engine);
    let board = save::deserialize(&Snapshot::parse(&text).unwrap()).unwrap();
    assert_eq!(25, board.tiles().len());
    assert_eq!(1, board.move_stack().len());
    assert_eq!(save::serialize(engine.board()), save::serialize(&board));
}

#[test]
fn missing_file() {
    match save::load_from(scratch_file("does-not-exist")) {
        Err(LoadError::Io(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_section() {
    let engine = Engine::new(setup::start_position());
    let text = save_text(&engine).replace("[kings]", "[castles]");
    match Snapshot::parse(&text) {
        Err(LoadError::MissingSection("kings")) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn malformed_entry() {
    let engine = Engine::new(setup::start_position());
    let text = save_text(&engine).replace("\"current_player\"", "\"current\"");
    match Snapshot::parse(&text) {
        Err(LoadError::Json("board", 0, _)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn garbage_is_a_syntax_error() {
    match Snapshot::parse("this is not a saved game\n") {
        Err(LoadError::Syntax(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn two_pieces_on_one_space() {
    let engine = Engine::new(setup::start_position());
    let mut snapshot = save::serialize(engine.board());

    // put a white pawn on a black pawn's space.
    let pawns = &snapshot.pieces[0];
    let black = pawns.iter().find(|entry| entry.owner == PLAYER_2).unwrap().space;
    let white = pawns.iter().position(|entry| entry.owner == PLAYER_1).unwrap();
    snapshot.pieces[0][white].space = black;
    assert!(save::deserialize(&snapshot).is_err());
}

#[test]
fn unknown_current_player() {
    let engine = Engine::new(setup::start_position());
    let mut snapshot = save::serialize(engine.board());
    snapshot.board.current_player = "Nobody".to_owned();
    assert!(save::deserialize(&snapshot).is_err());
}

fn is_inconsistent(result: Result<knightchess::Board, LoadError>) -> bool {
    if let Err(LoadError::Inconsistent(_)) = result {
        true
    } else {
        false
    }
}

#[test]
fn history_must_match_positions() {
    let mut engine = Engine::new(setup::start_position());
    play(
        &mut engine,
        &[("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("d8", "d5")],
    );
    let snapshot = save::serialize(engine.board());
    assert!(save::deserialize(&snapshot).is_ok());

    // the queen cannot have come from e8, the black king stands there.
    let mut forged = snapshot.clone();
    forged.moves[3].old_space = 4;
    assert!(is_inconsistent(save::deserialize(&forged)));

    // the queen is on d5, not e3.
    let mut forged = snapshot.clone();
    forged.moves[3].new_space = 44;
    assert!(is_inconsistent(save::deserialize(&forged)));

    // the pawn taken on d5 is claimed to still be on the board.
    let mut forged = snapshot.clone();
    forged.moves[3].other_piece = Some("pawn_8".to_owned());
    assert!(is_inconsistent(save::deserialize(&forged)));

    // more moves than the queen has made.
    let mut forged = snapshot;
    let queen = forged.moves[3].clone();
    forged.moves.push(queen);
    assert!(save::deserialize(&forged).is_err());
}

#[test]
fn oversized_tile_count() {
    let engine = Engine::new(setup::start_position());
    let mut snapshot = save::serialize(engine.board());
    snapshot.tiles = 1_000_000_000_000;
    match save::deserialize(&snapshot) {
        Err(LoadError::Board(BoardError::TooLarge { side: 1_000_000, .. })) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let text = save_text(&engine).replace(
        "[tiles]\nlength = 64\n",
        &format!("[tiles]\nlength = {}\n", usize::max_value()),
    );
    assert_ne!(save_text(&engine), text);
    match Snapshot::parse(&text).and_then(|snapshot| save::deserialize(&snapshot)) {
        Err(LoadError::Board(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}
