// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;
use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// Index of a space in the board graph. Space 0 is the north-west corner of the board and
/// indices increase eastward, then southward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(pub usize);

impl SpaceId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a piece in a board's piece arena. Piece ids are stable for the lifetime of a board;
/// captured pieces keep their id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

impl PieceId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    White,
    Black,
}

impl Team {
    pub fn toggle(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// The direction pawns of this team advance in. White starts on the southern rows.
    pub fn forward(self) -> Cardinal {
        match self {
            Team::White => Cardinal::North,
            Team::Black => Cardinal::South,
        }
    }

    pub fn reach(self) -> Reach {
        match self {
            Team::White => Reach::WHITE,
            Team::Black => Reach::BLACK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::White => "white",
            Team::Black => "black",
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub static TEAMS: [Team; 2] = [Team::White, Team::Black];

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    FromPrimitive,
    ToPrimitive,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Points awarded to a player for capturing a piece of this kind.
    pub fn point_value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Diagram letter for a piece of this kind; white pieces are uppercase.
    pub fn letter(self, team: Team) -> char {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match team {
            Team::White => chr.to_ascii_uppercase(),
            Team::Black => chr,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.letter(Team::Black))
    }
}

impl PieceKind {
    /// Parses a diagram letter into the kind and team it denotes.
    pub fn from_letter(c: char) -> Option<(PieceKind, Team)> {
        let res = match c {
            'P' => (PieceKind::Pawn, Team::White),
            'N' => (PieceKind::Knight, Team::White),
            'B' => (PieceKind::Bishop, Team::White),
            'R' => (PieceKind::Rook, Team::White),
            'Q' => (PieceKind::Queen, Team::White),
            'K' => (PieceKind::King, Team::White),
            'p' => (PieceKind::Pawn, Team::Black),
            'n' => (PieceKind::Knight, Team::Black),
            'b' => (PieceKind::Bishop, Team::Black),
            'r' => (PieceKind::Rook, Team::Black),
            'q' => (PieceKind::Queen, Team::Black),
            'k' => (PieceKind::King, Team::Black),
            _ => return None,
        };
        Some(res)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The four links every space carries to its neighbours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    pub fn opposite(self) -> Cardinal {
        match self {
            Cardinal::North => Cardinal::South,
            Cardinal::East => Cardinal::West,
            Cardinal::South => Cardinal::North,
            Cardinal::West => Cardinal::East,
        }
    }
}

pub static CARDINALS: [Cardinal; 4] = [
    Cardinal::North,
    Cardinal::East,
    Cardinal::South,
    Cardinal::West,
];

/// A single step in one of the eight compass directions. Diagonal steps are walked as two
/// cardinal links, north/south first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub fn steps(self) -> ArrayVec<[Cardinal; 2]> {
        match self {
            Direction::North => single(Cardinal::North),
            Direction::NorthEast => ArrayVec::from([Cardinal::North, Cardinal::East]),
            Direction::East => single(Cardinal::East),
            Direction::SouthEast => ArrayVec::from([Cardinal::South, Cardinal::East]),
            Direction::South => single(Cardinal::South),
            Direction::SouthWest => ArrayVec::from([Cardinal::South, Cardinal::West]),
            Direction::West => single(Cardinal::West),
            Direction::NorthWest => ArrayVec::from([Cardinal::North, Cardinal::West]),
        }
    }
}

fn single(step: Cardinal) -> ArrayVec<[Cardinal; 2]> {
    let mut steps = ArrayVec::new();
    steps.push(step);
    steps
}

pub static ORTHOGONALS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

pub static DIAGONALS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

pub static DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

bitflags! {
    /// The set of teams that threaten a space.
    pub struct Reach: u8 {
        const NONE = 0;
        const WHITE = 0b0000_0001;
        const BLACK = 0b0000_0010;
        const BOTH = Self::WHITE.bits | Self::BLACK.bits;
    }
}
