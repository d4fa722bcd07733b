// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Write;

use csv::Writer;

use crate::board::Board;

/// One row of an exported move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub ply: usize,
    pub player: String,
    pub piece: String,
    pub from: String,
    pub to: String,
    pub captured: Option<String>,
}

/// The move stack of a board, oldest move first, with spaces given by name.
pub fn history(board: &Board) -> Vec<HistoryRecord> {
    let tiles = board.tiles();
    board
        .move_stack()
        .iter()
        .enumerate()
        .map(|(ply, record)| {
            let piece = board.piece(record.piece());
            HistoryRecord {
                ply: ply + 1,
                player: piece.owner().to_owned(),
                piece: piece.name().to_owned(),
                from: tiles.name(record.origin()),
                to: tiles.name(record.destination()),
                captured: record
                    .captured()
                    .map(|id| board.piece(id).name().to_owned()),
            }
        })
        .collect()
}

/// Writes the move history of a board as CSV.
pub fn write_history<W: Write>(board: &Board, writer: W) -> csv::Result<()> {
    let mut writer = Writer::from_writer(writer);
    for record in history(board) {
        writer.serialize(&record)?;
    }

    writer.flush()?;
    Ok(())
}
