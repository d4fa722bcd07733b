// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Random playouts checking that every move can be taken back exactly and that
// nothing which only inspects the board changes it.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use knightchess::setup::{self, PLAYER_1, PLAYER_2};
use knightchess::{all_legal_moves, Board, Engine};

const PLAYOUTS: u64 = 8;
const PLIES: usize = 40;

fn playout(start: Board, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = Engine::new(start);
    let mut history = vec![engine.board().clone()];
    for _ in 0..PLIES {
        if engine.is_game_over() {
            break;
        }

        let team = engine.board().current_team();
        let mut scratch = engine.board().clone();
        let moves = all_legal_moves(&mut scratch, team);
        assert_eq!(engine.board(), &scratch, "move listing changed the board");

        let (piece, to) = match moves.choose(&mut rng) {
            Some(&mov) => mov,
            None => break,
        };

        engine.select_piece(piece).unwrap();
        engine.attempt_move(to).unwrap();
        engine.board().check_invariants().unwrap();

        // threats are a pure function of occupancy.
        let mut recomputed = engine.board().clone();
        recomputed.recompute_all_threats();
        assert_eq!(engine.board(), &recomputed);

        let before = engine.board().clone();
        engine.is_checkmate();
        assert_eq!(&before, engine.board(), "checkmate search changed the board");

        history.push(engine.board().clone());
    }

    history.pop();
    while let Some(expected) = history.pop() {
        engine.undo().unwrap();
        assert_eq!(&expected, engine.board());
    }

    assert!(engine.undo().is_err());
}

#[test]
fn standard_playouts_undo_exactly() {
    for seed in 0..PLAYOUTS {
        playout(setup::start_position(), seed);
    }
}

#[test]
fn knights_playouts_undo_exactly() {
    for seed in 0..PLAYOUTS {
        let board = setup::knights_board(6, [PLAYER_1, PLAYER_2]).unwrap();
        playout(board, 100 + seed);
    }
}
