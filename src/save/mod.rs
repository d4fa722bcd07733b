// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Saving and loading games.
//!
//! A `Snapshot` is the information content of a saved game: the tile count,
//! every piece grouped by kind, the players, whose turn it is and the full
//! move history. Snapshots are written as text sections whose entries are
//! JSON objects, and loading rebuilds a fresh board from them. A load that
//! fails at any point returns an error and no board.
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::board::Board;
use crate::error::{LoadError, SaveError};
use crate::moves::MoveRecord;
use crate::piece::Piece;
use crate::player::Player;
use crate::setup::BoardBuilder;
use crate::types::{PieceId, PieceKind, SpaceId, TableIndex, Team, PIECE_KINDS};

mod format;

pub use self::format::Document;

const TILES: &str = "tiles";
const PLAYERS: &str = "players";
const BOARD: &str = "board";
const MOVES: &str = "moves";

/// Name of the section holding pieces of a kind.
pub fn section_name(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::Pawn => "pawns",
        PieceKind::Knight => "knights",
        PieceKind::Bishop => "bishops",
        PieceKind::Rook => "rooks",
        PieceKind::Queen => "queens",
        PieceKind::King => "kings",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceEntry {
    /// Sprite reference.
    pub file: String,
    pub owner: String,
    pub name: String,
    pub team: Team,
    pub space: Option<usize>,
    pub times_moved: u32,
    pub claimed_pieces: u32,
    pub on_board: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_space: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub team: Team,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub current_player: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub piece: String,
    pub other_piece: Option<String>,
    pub old_space: usize,
    pub new_space: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub tiles: usize,
    /// Pieces grouped by kind, indexed by `PieceKind`.
    pub pieces: [Vec<PieceEntry>; 6],
    pub players: Vec<PlayerEntry>,
    pub board: BoardEntry,
    pub moves: Vec<MoveEntry>,
}

/// Captures everything needed to resume a game.
pub fn serialize(board: &Board) -> Snapshot {
    let mut pieces: [Vec<PieceEntry>; 6] = Default::default();
    for piece in board.pieces() {
        pieces[piece.kind().as_index()].push(PieceEntry {
            file: piece.sprite().to_owned(),
            owner: piece.owner().to_owned(),
            name: piece.name().to_owned(),
            team: piece.team(),
            space: piece.space().map(SpaceId::index),
            times_moved: piece.times_moved(),
            claimed_pieces: piece.claimed(),
            on_board: piece.is_on_board(),
            home_space: piece.home().map(SpaceId::index),
        });
    }

    let players = board
        .players()
        .iter()
        .map(|p| PlayerEntry {
            name: p.name().to_owned(),
            team: p.team(),
            points: p.points(),
        })
        .collect();

    let moves = board
        .move_stack()
        .iter()
        .map(|record| MoveEntry {
            piece: board.piece(record.piece()).name().to_owned(),
            other_piece: record.captured().map(|id| board.piece(id).name().to_owned()),
            old_space: record.origin().index(),
            new_space: record.destination().index(),
        })
        .collect();

    Snapshot {
        tiles: board.tiles().len(),
        pieces,
        players,
        board: BoardEntry {
            current_player: board.current_player().name().to_owned(),
        },
        moves,
    }
}

/// Rebuilds a board from a snapshot. Pieces are added kind by kind in section order.
pub fn deserialize(snapshot: &Snapshot) -> Result<Board, LoadError> {
    let mut builder = BoardBuilder::with_tile_count(snapshot.tiles)?;
    for entry in &snapshot.players {
        builder.add_player(Player::new(entry.name.as_str(), entry.team).with_points(entry.points))?;
    }

    for &kind in &PIECE_KINDS {
        for entry in &snapshot.pieces[kind.as_index()] {
            if entry.on_board != entry.space.is_some() {
                return Err(LoadError::Inconsistent(format!(
                    "{} is marked {} the board but has space {:?}",
                    entry.name,
                    if entry.on_board { "on" } else { "off" },
                    entry.space
                )));
            }

            if let Some(owner) = snapshot.players.iter().find(|p| p.name == entry.owner) {
                if owner.team != entry.team {
                    return Err(LoadError::Inconsistent(format!(
                        "{} is on team {} but its owner plays {}",
                        entry.name, entry.team, owner.team
                    )));
                }
            }

            let piece = Piece::new(kind, entry.team, entry.owner.as_str(), entry.name.as_str())
                .with_sprite(entry.file.as_str())
                .with_counters(entry.times_moved, entry.claimed_pieces);
            let id = builder.add_piece(piece, entry.space.map(SpaceId))?;
            if kind == PieceKind::Pawn {
                builder.set_home(id, entry.home_space.map(SpaceId))?;
            }
        }
    }

    let mut names = vec![];
    for &kind in &PIECE_KINDS {
        for entry in &snapshot.pieces[kind.as_index()] {
            names.push(entry.name.as_str());
        }
    }

    let find = |name: &str| -> Result<_, LoadError> {
        names
            .iter()
            .position(|&n| n == name)
            .map(PieceId)
            .ok_or_else(|| LoadError::UnknownPiece(name.to_owned()))
    };

    for entry in &snapshot.moves {
        let piece = find(&entry.piece)?;
        let captured = match entry.other_piece {
            Some(ref name) => Some(find(name)?),
            None => None,
        };

        builder.push_move(MoveRecord::new(
            piece,
            captured,
            SpaceId(entry.old_space),
            SpaceId(entry.new_space),
        ))?;
    }

    builder.set_current_player(&snapshot.board.current_player)?;
    let board = builder.build()?;
    board.check_invariants().map_err(LoadError::Inconsistent)?;
    Ok(board)
}

impl Snapshot {
    /// Writes the snapshot in the sectioned text layout.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), SaveError> {
        format::write_length(w, TILES, self.tiles)?;
        for &kind in &PIECE_KINDS {
            let entries = encode(&self.pieces[kind.as_index()])?;
            format::write_entries(w, section_name(kind), &entries)?;
        }

        format::write_entries(w, PLAYERS, &encode(&self.players)?)?;
        format::write_entries(w, BOARD, &encode(&[self.board.clone()])?)?;
        format::write_entries(w, MOVES, &encode(&self.moves)?)?;
        Ok(())
    }

    /// Reads a snapshot from its text layout. Every section must be present.
    pub fn parse(text: &str) -> Result<Snapshot, LoadError> {
        let doc = Document::parse(text)?;
        let tiles = doc.length(TILES)?;
        let mut pieces: [Vec<PieceEntry>; 6] = Default::default();
        for &kind in &PIECE_KINDS {
            pieces[kind.as_index()] = decode(&doc, section_name(kind))?;
        }

        let players = decode(&doc, PLAYERS)?;
        let mut boards: Vec<BoardEntry> = decode(&doc, BOARD)?;
        if boards.len() != 1 {
            return Err(LoadError::LengthMismatch {
                section: BOARD,
                declared: 1,
                actual: boards.len(),
            });
        }

        let board = boards.remove(0);
        let moves = decode(&doc, MOVES)?;
        Ok(Snapshot {
            tiles,
            pieces,
            players,
            board,
            moves,
        })
    }
}

fn encode<T: serde::Serialize>(items: &[T]) -> Result<Vec<String>, SaveError> {
    items
        .iter()
        .map(|item| serde_json::to_string(item).map_err(SaveError::from))
        .collect()
}

fn decode<T>(doc: &Document, section: &'static str) -> Result<Vec<T>, LoadError>
where
    T: serde::de::DeserializeOwned,
{
    doc.entries(section)?
        .into_iter()
        .enumerate()
        .map(|(idx, text)| {
            serde_json::from_str(text).map_err(|err| LoadError::Json(section, idx, err))
        })
        .collect()
}

/// Saves a board to `path`. The save is written to a temporary file first and renamed over
/// the target, so a failed save never leaves a partial file behind.
pub fn save_to<P: AsRef<Path>>(board: &Board, path: P) -> Result<(), SaveError> {
    let path = path.as_ref();
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serialize(board).write_to(&mut writer)?;
        writer.flush()?;
    }

    fs::rename(&tmp, path)?;
    info!("saved game to {}", path.display());
    Ok(())
}

/// Loads a board from `path`.
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Board, LoadError> {
    let path = path.as_ref();
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    let board = Snapshot::parse(&text)
        .and_then(|snapshot| deserialize(&snapshot))
        .map_err(|err| {
            warn!("could not load {}: {}", path.display(), err);
            err
        })?;

    info!("loaded game from {}", path.display());
    Ok(board)
}
