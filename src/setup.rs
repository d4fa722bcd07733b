// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board setup: the built-in game modes, placement diagrams, and the builder
//! every board is assembled with.
use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::error::{BoardError, BuildError, DiagramError};
use crate::moves::MoveRecord;
use crate::piece::Piece;
use crate::player::Player;
use crate::space::{Tiles, MAX_SIDE};
use crate::types::{PieceId, PieceKind, SpaceId, Team};

pub const PLAYER_1: &str = "Player 1";
pub const PLAYER_2: &str = "Player 2";

const STANDARD_TILES: usize = 64;
const KNIGHTS_MIN_SIDE: usize = 4;

static BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// The classical layout on an 8x8 board.
    Standard,
    /// Knights only, on any square board of side 4 or more. There are no kings, so a game is
    /// won by capturing every opposing knight.
    Knights,
}

impl GameMode {
    pub fn default_tiles(self) -> usize {
        STANDARD_TILES
    }

    pub fn name(self) -> &'static str {
        match self {
            GameMode::Standard => "standard",
            GameMode::Knights => "knights",
        }
    }
}

impl Default for GameMode {
    fn default() -> GameMode {
        GameMode::Standard
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<GameMode, String> {
        match s {
            "standard" => Ok(GameMode::Standard),
            "knights" => Ok(GameMode::Knights),
            _ => Err(format!("unknown game mode '{}'", s)),
        }
    }
}

/// Assembles a board piece by piece, validating every part as it is added.
/// Building recomputes all threats and evaluates check for the player to move,
/// so a built board is ready to play.
pub struct BoardBuilder {
    board: Board,
}

impl BoardBuilder {
    pub fn new(tiles: Tiles) -> BoardBuilder {
        BoardBuilder {
            board: Board::new(tiles),
        }
    }

    pub fn with_tile_count(count: usize) -> Result<BoardBuilder, BuildError> {
        Ok(BoardBuilder::new(Tiles::new(count)?))
    }

    /// Adds a player. The first player added moves first unless `set_current_player` says
    /// otherwise.
    pub fn add_player(&mut self, player: Player) -> Result<(), BuildError> {
        let name = player.name().to_owned();
        self.board
            .add_player(player)
            .map_err(|_| BuildError::DuplicatePlayer(name))
    }

    pub fn add_piece(&mut self, piece: Piece, space: Option<SpaceId>) -> Result<PieceId, BuildError> {
        if self.board.find_piece(piece.name()).is_some() {
            return Err(BuildError::DuplicatePiece(piece.name().to_owned()));
        }

        if self.board.player(piece.owner()).is_none() {
            return Err(BuildError::UnknownPlayer(piece.owner().to_owned()));
        }

        if let Some(space) = space {
            if !self.board.tiles().contains(space) {
                return Err(BuildError::SpaceOutOfRange(space.index()));
            }

            if self.board.tiles()[space].is_occupied() {
                return Err(BuildError::DoubleOccupancy(space.index()));
            }
        }

        let id = self
            .board
            .add_piece(piece, space)
            .expect("piece was validated but could not be added");
        Ok(id)
    }

    /// Overrides the home space of a pawn. Has no effect on other kinds.
    pub fn set_home(&mut self, id: PieceId, home: Option<SpaceId>) -> Result<(), BuildError> {
        if id.index() >= self.board.pieces().len() {
            return Err(BuildError::UnknownPiece(id.index()));
        }

        if let Some(home) = home {
            if !self.board.tiles().contains(home) {
                return Err(BuildError::SpaceOutOfRange(home.index()));
            }
        }

        self.board.set_home(id, home);
        Ok(())
    }

    /// Appends a record to the move history without applying it.
    pub fn push_move(&mut self, record: MoveRecord) -> Result<(), BuildError> {
        let pieces = self.board.pieces().len();
        for id in Some(record.piece()).into_iter().chain(record.captured()) {
            if id.index() >= pieces {
                return Err(BuildError::UnknownPiece(id.index()));
            }
        }

        for &space in &[record.origin(), record.destination()] {
            if !self.board.tiles().contains(space) {
                return Err(BuildError::SpaceOutOfRange(space.index()));
            }
        }

        self.board.push_move(record);
        Ok(())
    }

    pub fn set_current_player(&mut self, name: &str) -> Result<(), BuildError> {
        if self.board.set_current_player(name) {
            Ok(())
        } else {
            Err(BuildError::UnknownPlayer(name.to_owned()))
        }
    }

    pub fn build(self) -> Result<Board, BuildError> {
        let mut board = self.board;
        if board.players().is_empty() {
            return Err(BuildError::NoPlayers);
        }

        board.recompute_all_threats();
        let check = board.is_current_player_in_check();
        board.set_check(check);
        Ok(board)
    }
}

fn add_players(builder: &mut BoardBuilder, names: [&str; 2]) -> Result<(), BuildError> {
    builder.add_player(Player::new(names[0], Team::White))?;
    builder.add_player(Player::new(names[1], Team::Black))
}

fn owner(names: [&str; 2], team: Team) -> &str {
    match team {
        Team::White => names[0],
        Team::Black => names[1],
    }
}

fn add_on(
    builder: &mut BoardBuilder,
    names: [&str; 2],
    kind: PieceKind,
    team: Team,
    space: usize,
) -> Result<PieceId, BuildError> {
    let name = format!("{}_{}", kind.name(), space);
    let piece = Piece::new(kind, team, owner(names, team), name);
    builder.add_piece(piece, Some(SpaceId(space)))
}

/// The classical starting position. The first name plays white and moves first.
pub fn standard_board(names: [&str; 2]) -> Result<Board, BuildError> {
    let mut builder = BoardBuilder::with_tile_count(STANDARD_TILES)?;
    add_players(&mut builder, names)?;

    let side = 8;
    for (col, &kind) in BACK_RANK.iter().enumerate() {
        add_on(&mut builder, names, kind, Team::Black, col)?;
    }

    for col in 0..side {
        add_on(&mut builder, names, PieceKind::Pawn, Team::Black, side + col)?;
    }

    for col in 0..side {
        add_on(&mut builder, names, PieceKind::Pawn, Team::White, 6 * side + col)?;
    }

    for (col, &kind) in BACK_RANK.iter().enumerate() {
        add_on(&mut builder, names, kind, Team::White, 7 * side + col)?;
    }

    builder.build()
}

/// The classical starting position with the default player names.
pub fn start_position() -> Board {
    standard_board([PLAYER_1, PLAYER_2]).expect("default players have distinct names")
}

/// A knights-only game: black knights fill the first two rows, white knights the last two.
pub fn knights_board(side: usize, names: [&str; 2]) -> Result<Board, BuildError> {
    if side < KNIGHTS_MIN_SIDE {
        return Err(BoardError::TooSmall {
            side,
            minimum: KNIGHTS_MIN_SIDE,
        }
        .into());
    }

    if side > MAX_SIDE {
        return Err(BoardError::TooLarge {
            side,
            maximum: MAX_SIDE,
        }
        .into());
    }

    let count = side * side;
    let mut builder = BoardBuilder::with_tile_count(count)?;
    add_players(&mut builder, names)?;
    for space in 0..2 * side {
        add_on(&mut builder, names, PieceKind::Knight, Team::Black, space)?;
    }

    for space in count - 2 * side..count {
        add_on(&mut builder, names, PieceKind::Knight, Team::White, space)?;
    }

    builder.build()
}

/// A new game of the given mode on `tiles` spaces.
pub fn new_game(mode: GameMode, tiles: usize, names: [&str; 2]) -> Result<Board, BuildError> {
    match mode {
        GameMode::Standard => {
            if tiles != STANDARD_TILES {
                return Err(BoardError::NotStandard(tiles).into());
            }

            standard_board(names)
        }
        GameMode::Knights => {
            let side = Tiles::new(tiles)?.side();
            knights_board(side, names)
        }
    }
}

/// Parses a placement diagram into a board with the default players. Rows run from north to
/// south and are separated by `/`; runs of empty spaces are written as decimal numbers.
pub fn from_diagram(diagram: &str, to_move: Team) -> Result<Board, DiagramError> {
    let diagram = diagram.trim();
    if diagram.is_empty() {
        return Err(DiagramError::Empty);
    }

    let mut rows: Vec<Vec<Option<(PieceKind, Team)>>> = vec![];
    for (idx, row) in diagram.split('/').enumerate() {
        // the first row sets the width every later row must match.
        let width = rows.first().map(Vec::len);
        let too_wide = match width {
            Some(_) => DiagramError::RowDoesNotSumToSide(idx),
            None => DiagramError::TooLarge(MAX_SIDE),
        };

        let cells = parse_row(row, width.unwrap_or(MAX_SIDE), too_wide)?;
        if width.map_or(false, |width| cells.len() != width) {
            return Err(DiagramError::RowDoesNotSumToSide(idx));
        }

        rows.push(cells);
        if rows.len() > MAX_SIDE {
            return Err(DiagramError::WrongRowCount(rows.len()));
        }
    }

    let side = rows[0].len();
    if side == 0 {
        return Err(DiagramError::Empty);
    }

    if rows.len() != side {
        return Err(DiagramError::WrongRowCount(rows.len()));
    }

    let names = [PLAYER_1, PLAYER_2];
    let mut builder = BoardBuilder::new(Tiles::with_side(side));
    add_players(&mut builder, names).expect("default players have distinct names");
    for (space, cell) in rows.iter().flatten().enumerate() {
        if let Some((kind, team)) = *cell {
            add_on(&mut builder, names, kind, team, space)
                .expect("diagram spaces are distinct and on the board");
        }
    }

    let current = owner(names, to_move);
    builder
        .set_current_player(current)
        .expect("default player exists");
    Ok(builder.build().expect("diagram board has players"))
}

/// Parses one row of a diagram, failing with `too_wide` once it grows past `max_width`.
fn parse_row(
    row: &str,
    max_width: usize,
    too_wide: DiagramError,
) -> Result<Vec<Option<(PieceKind, Team)>>, DiagramError> {
    let mut cells = vec![];
    let mut chars = row.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(digit) = c.to_digit(10) {
            let mut run = digit as usize;
            while let Some(digit) = chars.peek().and_then(|next| next.to_digit(10)) {
                run = match run.checked_mul(10).and_then(|run| run.checked_add(digit as usize)) {
                    Some(run) => run,
                    None => return Err(DiagramError::InvalidRunLength),
                };
                chars.next();
            }

            if run == 0 {
                return Err(DiagramError::InvalidRunLength);
            }

            if run > max_width - cells.len() {
                return Err(too_wide);
            }

            cells.extend((0..run).map(|_| None));
            continue;
        }

        match PieceKind::from_letter(c) {
            Some(piece) if cells.len() < max_width => cells.push(Some(piece)),
            Some(_) => return Err(too_wide),
            None => return Err(DiagramError::UnknownPiece(c)),
        }
    }

    Ok(cells)
}
