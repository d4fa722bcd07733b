// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::engine::all_legal_moves;

/// Counts the leaf positions reachable in exactly `depth` legal moves from `board`, with the
/// current player moving first. Subtrees of the root are counted in parallel.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut root = board.clone();
    root.deselect_piece();
    root.recompute_all_threats();
    let team = root.current_team();
    let moves = all_legal_moves(&mut root, team);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&(id, to)| {
            let mut child = root.clone();
            child
                .make_move(id, to)
                .expect("legal move is accepted by the board");
            child.advance_turn();
            child.recompute_all_threats();
            perft_sequential(&mut child, depth - 1)
        })
        .sum()
}

fn perft_sequential(board: &mut Board, depth: u32) -> u64 {
    let team = board.current_team();
    let moves = all_legal_moves(board, team);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for (id, to) in moves {
        board
            .make_move(id, to)
            .expect("legal move is accepted by the board");
        board.advance_turn();
        board.recompute_all_threats();
        nodes += perft_sequential(board, depth - 1);
        board.unmake_move();
        board.retreat_turn();
        board.recompute_all_threats();
    }

    nodes
}
