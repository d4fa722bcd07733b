// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;
use std::io;

/// Errors constructing the board graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    Empty,
    NotSquare(usize),
    TooSmall { side: usize, minimum: usize },
    TooLarge { side: usize, maximum: usize },
    NotStandard(usize),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::Empty => write!(f, "a board needs at least one tile"),
            BoardError::NotSquare(count) => {
                write!(f, "number of tiles is not a square number: {}", count)
            }
            BoardError::TooSmall { side, minimum } => write!(
                f,
                "a board of side {} is too small, the minimum is {}",
                side, minimum
            ),
            BoardError::TooLarge { side, maximum } => write!(
                f,
                "a board of side {} is too large, the maximum is {}",
                side, maximum
            ),
            BoardError::NotStandard(count) => {
                write!(f, "a standard game is played on 64 tiles, not {}", count)
            }
        }
    }
}

impl Error for BoardError {}

/// Errors assembling a board from its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    Board(BoardError),
    NoPlayers,
    DuplicatePlayer(String),
    UnknownPlayer(String),
    DuplicatePiece(String),
    SpaceOutOfRange(usize),
    DoubleOccupancy(usize),
    UnknownPiece(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildError::Board(err) => write!(f, "{}", err),
            BuildError::NoPlayers => write!(f, "a game needs at least one player"),
            BuildError::DuplicatePlayer(name) => write!(f, "player {} appears twice", name),
            BuildError::UnknownPlayer(name) => write!(f, "unknown player {}", name),
            BuildError::DuplicatePiece(name) => write!(f, "piece {} appears twice", name),
            BuildError::SpaceOutOfRange(idx) => write!(f, "space index {} is out of range", idx),
            BuildError::DoubleOccupancy(idx) => write!(f, "space {} holds two pieces", idx),
            BuildError::UnknownPiece(idx) => write!(f, "piece index {} is out of range", idx),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BuildError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for BuildError {
    fn from(err: BoardError) -> BuildError {
        BuildError::Board(err)
    }
}

/// Possible errors that can arise when parsing a placement diagram into a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagramError {
    Empty,
    UnknownPiece(char),
    InvalidRunLength,
    RowDoesNotSumToSide(usize),
    WrongRowCount(usize),
    TooLarge(usize),
}

impl fmt::Display for DiagramError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagramError::Empty => write!(f, "empty diagram"),
            DiagramError::UnknownPiece(c) => write!(f, "unknown piece '{}'", c),
            DiagramError::InvalidRunLength => write!(f, "invalid run of empty spaces"),
            DiagramError::RowDoesNotSumToSide(row) => {
                write!(f, "row {} does not match the board width", row)
            }
            DiagramError::WrongRowCount(rows) => {
                write!(f, "diagram has {} rows, expected a square board", rows)
            }
            DiagramError::TooLarge(maximum) => {
                write!(f, "diagram is wider than {} spaces", maximum)
            }
        }
    }
}

impl Error for DiagramError {}

/// Reasons a piece cannot be selected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    UnknownPiece,
    NotYourPiece,
    OffBoard,
    AnotherPieceSelected,
}

/// Reasons a move is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    NoPieceSelected,
    UnknownSpace,
    NotHighlighted,
    OwnPiece,
    LeavesKingInCheck,
}

/// Errors returned by the turn engine. None of them change the game state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnError {
    IllegalSelection(SelectionError),
    IllegalMove(MoveError),
    EmptyUndoStack,
    PieceSelected,
    GameOver,
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TurnError::IllegalSelection(SelectionError::UnknownPiece) => {
                write!(f, "there is no such piece")
            }
            TurnError::IllegalSelection(SelectionError::NotYourPiece) => {
                write!(f, "that piece belongs to the other player")
            }
            TurnError::IllegalSelection(SelectionError::OffBoard) => {
                write!(f, "that piece is no longer on the board")
            }
            TurnError::IllegalSelection(SelectionError::AnotherPieceSelected) => {
                write!(f, "deselect the current piece first")
            }
            TurnError::IllegalMove(MoveError::NoPieceSelected) => write!(f, "no piece selected"),
            TurnError::IllegalMove(MoveError::UnknownSpace) => write!(f, "there is no such space"),
            TurnError::IllegalMove(MoveError::NotHighlighted) => write!(f, "invalid space"),
            TurnError::IllegalMove(MoveError::OwnPiece) => {
                write!(f, "invalid space, occupied by your own piece")
            }
            TurnError::IllegalMove(MoveError::LeavesKingInCheck) => {
                write!(f, "invalid space, still in check")
            }
            TurnError::EmptyUndoStack => write!(f, "cannot undo, no move left to undo"),
            TurnError::PieceSelected => write!(f, "cannot undo, deselect piece first"),
            TurnError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl Error for TurnError {}

/// Errors loading a saved game. A failed load never produces a partially populated board.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Syntax(String),
    DuplicateSection(String),
    MissingSection(&'static str),
    MissingEntry(&'static str, usize),
    LengthMismatch {
        section: &'static str,
        declared: usize,
        actual: usize,
    },
    Json(&'static str, usize, serde_json::Error),
    InvalidLength(&'static str),
    Board(BoardError),
    Build(BuildError),
    SpaceOutOfRange(usize),
    UnknownPiece(String),
    Inconsistent(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "could not read save: {}", err),
            LoadError::Syntax(msg) => write!(f, "malformed save: {}", msg),
            LoadError::DuplicateSection(name) => write!(f, "section [{}] appears twice", name),
            LoadError::MissingSection(name) => write!(f, "missing section [{}]", name),
            LoadError::MissingEntry(name, idx) => {
                write!(f, "section [{}] is missing entry {}", name, idx)
            }
            LoadError::LengthMismatch {
                section,
                declared,
                actual,
            } => write!(
                f,
                "section [{}] declares {} entries but has {}",
                section, declared, actual
            ),
            LoadError::Json(name, idx, err) => {
                write!(f, "entry {} of section [{}] is malformed: {}", idx, name, err)
            }
            LoadError::InvalidLength(name) => write!(f, "section [{}] has an invalid length", name),
            LoadError::Board(err) => write!(f, "{}", err),
            LoadError::Build(err) => write!(f, "{}", err),
            LoadError::SpaceOutOfRange(idx) => write!(f, "space index {} is out of range", idx),
            LoadError::UnknownPiece(name) => write!(f, "unknown piece {}", name),
            LoadError::Inconsistent(msg) => write!(f, "inconsistent save: {}", msg),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Json(_, _, err) => Some(err),
            LoadError::Board(err) => Some(err),
            LoadError::Build(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> LoadError {
        LoadError::Io(err)
    }
}

impl From<BoardError> for LoadError {
    fn from(err: BoardError) -> LoadError {
        LoadError::Board(err)
    }
}

impl From<BuildError> for LoadError {
    fn from(err: BuildError) -> LoadError {
        match err {
            BuildError::Board(err) => LoadError::Board(err),
            BuildError::SpaceOutOfRange(idx) => LoadError::SpaceOutOfRange(idx),
            err => LoadError::Build(err),
        }
    }
}

/// Errors writing a saved game.
#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SaveError::Io(err) => write!(f, "could not write save: {}", err),
            SaveError::Json(err) => write!(f, "could not encode save: {}", err),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SaveError::Io(err) => Some(err),
            SaveError::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> SaveError {
        SaveError::Io(err)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> SaveError {
        SaveError::Json(err)
    }
}
