// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The board graph. A board is a square grid of `Space`s, each linked to its
//! neighbours in the four cardinal directions. Pieces never look at grid
//! coordinates directly; all movement is expressed as walks along these links,
//! which is what keeps move generation independent of the board size.
//!
//! Spaces also carry the per-team threat flags used for check detection. The
//! flags are scratch state owned by the board's threat recomputation and are
//! reset wholesale before every recompute.
use std::ops::{Index, IndexMut};

use crate::error::BoardError;
use crate::types::{Cardinal, Direction, PieceId, Reach, SpaceId, TableIndex, Team};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Space {
    id: SpaceId,
    neighbors: [Option<SpaceId>; 4],
    occupant: Option<PieceId>,
    reach: Reach,
}

impl Space {
    pub fn new(id: SpaceId) -> Space {
        Space {
            id,
            neighbors: [None; 4],
            occupant: None,
            reach: Reach::NONE,
        }
    }

    pub fn id(&self) -> SpaceId {
        self.id
    }

    pub fn link(&mut self, dir: Cardinal, space: Option<SpaceId>) {
        self.neighbors[dir.as_index()] = space;
    }

    pub fn neighbor(&self, dir: Cardinal) -> Option<SpaceId> {
        self.neighbors[dir.as_index()]
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    /// Places a piece on this space. Fails if the space already holds a piece.
    pub fn place(&mut self, piece: PieceId) -> Result<(), ()> {
        if self.occupant.is_some() {
            return Err(());
        }

        self.occupant = Some(piece);
        Ok(())
    }

    /// Clears this space, returning the piece that was on it.
    pub fn remove(&mut self) -> Option<PieceId> {
        self.occupant.take()
    }

    pub fn mark_reachable(&mut self, team: Team) {
        self.reach |= team.reach();
    }

    pub fn reset_reachable(&mut self) {
        self.reach = Reach::NONE;
    }

    pub fn is_reachable_by(&self, team: Team) -> bool {
        self.reach.contains(team.reach())
    }

    pub fn reach(&self) -> Reach {
        self.reach
    }
}

/// Largest side a board may have.
pub const MAX_SIDE: usize = 256;

/// The grid of spaces making up a board. Construction links every space to
/// its neighbours; the links never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tiles {
    spaces: Vec<Space>,
    side: usize,
}

impl Tiles {
    /// Builds a square grid of `count` spaces. `count` must be a non-zero perfect square with
    /// a side of at most `MAX_SIDE`.
    pub fn new(count: usize) -> Result<Tiles, BoardError> {
        if count == 0 {
            return Err(BoardError::Empty);
        }

        let side = integer_sqrt(count);
        if side > MAX_SIDE {
            return Err(BoardError::TooLarge {
                side,
                maximum: MAX_SIDE,
            });
        }

        if side * side != count {
            return Err(BoardError::NotSquare(count));
        }

        Ok(Tiles::with_side(side))
    }

    pub fn with_side(side: usize) -> Tiles {
        assert!(side > 0, "a board needs at least one space");
        assert!(side <= MAX_SIDE, "a board of side {} is too large", side);
        let count = side * side;
        let mut spaces: Vec<_> = (0..count).map(|i| Space::new(SpaceId(i))).collect();
        for (i, space) in spaces.iter_mut().enumerate() {
            let north = i.checked_sub(side);
            let south = Some(i + side).filter(|&s| s < count);

            // East and west links must not wrap around onto the next row.
            let east = if i % side == side - 1 {
                None
            } else {
                Some(i + 1)
            };
            let west = if i % side == 0 { None } else { Some(i - 1) };

            space.link(Cardinal::North, north.map(SpaceId));
            space.link(Cardinal::South, south.map(SpaceId));
            space.link(Cardinal::East, east.map(SpaceId));
            space.link(Cardinal::West, west.map(SpaceId));
        }

        Tiles { spaces, side }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn contains(&self, id: SpaceId) -> bool {
        id.index() < self.spaces.len()
    }

    pub fn get(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = SpaceId> {
        (0..self.spaces.len()).map(SpaceId)
    }

    pub fn occupant(&self, id: SpaceId) -> Option<PieceId> {
        self[id].occupant()
    }

    pub fn neighbor(&self, id: SpaceId, dir: Cardinal) -> Option<SpaceId> {
        self[id].neighbor(dir)
    }

    /// Follows a sequence of links from `from`, returning `None` if the walk leaves the board.
    pub fn walk(&self, from: SpaceId, path: &[Cardinal]) -> Option<SpaceId> {
        path.iter()
            .try_fold(from, |space, &dir| self.neighbor(space, dir))
    }

    /// Takes one step in a compass direction.
    pub fn step(&self, from: SpaceId, dir: Direction) -> Option<SpaceId> {
        self.walk(from, &dir.steps())
    }

    pub fn reset_reachable(&mut self) {
        for space in &mut self.spaces {
            space.reset_reachable();
        }
    }

    /// Row of a space, counting from the northern edge.
    pub fn row(&self, id: SpaceId) -> usize {
        id.index() / self.side
    }

    /// Column of a space, counting from the western edge.
    pub fn column(&self, id: SpaceId) -> usize {
        id.index() % self.side
    }

    /// The algebraic name of a space: a file letter counted from the west and a rank counted
    /// from the south. Boards wider than the alphabet fall back to raw indices.
    pub fn name(&self, id: SpaceId) -> String {
        if self.side > 26 {
            return id.index().to_string();
        }

        let file = (b'a' + self.column(id) as u8) as char;
        let rank = self.side - self.row(id);
        format!("{}{}", file, rank)
    }

    /// Parses an algebraic space name, or a raw space index.
    pub fn parse_name(&self, name: &str) -> Option<SpaceId> {
        let name = name.trim();
        if let Ok(index) = name.parse::<usize>() {
            let id = SpaceId(index);
            return if self.contains(id) { Some(id) } else { None };
        }

        let mut chars = name.chars();
        let file = chars.next()?.to_ascii_lowercase();
        if !file.is_ascii_lowercase() {
            return None;
        }

        let column = (file as u8 - b'a') as usize;
        let rank = chars.as_str().parse::<usize>().ok()?;
        if column >= self.side || rank == 0 || rank > self.side {
            return None;
        }

        Some(SpaceId((self.side - rank) * self.side + column))
    }
}

impl Index<SpaceId> for Tiles {
    type Output = Space;

    fn index(&self, id: SpaceId) -> &Space {
        &self.spaces[id.index()]
    }
}

impl IndexMut<SpaceId> for Tiles {
    fn index_mut(&mut self, id: SpaceId) -> &mut Space {
        &mut self.spaces[id.index()]
    }
}

fn integer_sqrt(n: usize) -> usize {
    let square = |r: usize| r.checked_mul(r);
    let mut root = (n as f64).sqrt() as usize;
    while square(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }

    while square(root + 1).map_or(false, |sq| sq <= n) {
        root += 1;
    }

    root
}

#[cfg(test)]
mod tests {
    use super::{integer_sqrt, Space, Tiles, MAX_SIDE};
    use crate::error::BoardError;
    use crate::types::{Cardinal, Direction, PieceId, SpaceId, Team};

    #[test]
    fn non_square_count_is_rejected() {
        assert_eq!(Err(BoardError::NotSquare(63)), Tiles::new(63));
        assert_eq!(Err(BoardError::Empty), Tiles::new(0));
        assert_eq!(8, Tiles::new(64).unwrap().side());
        assert_eq!(1, Tiles::new(1).unwrap().side());
    }

    #[test]
    fn integer_sqrt_smoke() {
        assert_eq!(0, integer_sqrt(0));
        assert_eq!(3, integer_sqrt(15));
        assert_eq!(4, integer_sqrt(16));
        assert_eq!(100, integer_sqrt(10_000));
        assert_eq!(1_000_000, integer_sqrt(1_000_000_000_000));
        let max = integer_sqrt(usize::max_value());
        assert!(max.checked_mul(max).is_some());
        assert!((max + 1).checked_mul(max + 1).is_none());
    }

    #[test]
    fn oversized_count_is_rejected() {
        assert_eq!(
            Err(BoardError::TooLarge {
                side: 1_000_000,
                maximum: MAX_SIDE
            }),
            Tiles::new(1_000_000_000_000)
        );
        assert!(Tiles::new(usize::max_value()).is_err());
        assert_eq!(MAX_SIDE, Tiles::new(MAX_SIDE * MAX_SIDE).unwrap().side());
    }

    #[test]
    fn corner_links() {
        let tiles = Tiles::with_side(8);
        let nw = &tiles[SpaceId(0)];
        assert_eq!(None, nw.neighbor(Cardinal::North));
        assert_eq!(None, nw.neighbor(Cardinal::West));
        assert_eq!(Some(SpaceId(1)), nw.neighbor(Cardinal::East));
        assert_eq!(Some(SpaceId(8)), nw.neighbor(Cardinal::South));

        let se = &tiles[SpaceId(63)];
        assert_eq!(None, se.neighbor(Cardinal::South));
        assert_eq!(None, se.neighbor(Cardinal::East));
        assert_eq!(Some(SpaceId(55)), se.neighbor(Cardinal::North));
        assert_eq!(Some(SpaceId(62)), se.neighbor(Cardinal::West));
    }

    #[test]
    fn east_west_links_do_not_wrap() {
        let tiles = Tiles::with_side(8);
        assert_eq!(None, tiles.neighbor(SpaceId(7), Cardinal::East));
        assert_eq!(None, tiles.neighbor(SpaceId(8), Cardinal::West));
        assert_eq!(None, tiles.neighbor(SpaceId(15), Cardinal::East));
        assert_eq!(Some(SpaceId(14)), tiles.neighbor(SpaceId(15), Cardinal::West));
    }

    #[test]
    fn links_are_symmetric() {
        let tiles = Tiles::with_side(5);
        for id in tiles.ids() {
            for &dir in &crate::types::CARDINALS {
                if let Some(next) = tiles.neighbor(id, dir) {
                    assert_eq!(Some(id), tiles.neighbor(next, dir.opposite()));
                }
            }
        }
    }

    #[test]
    fn walk_and_step() {
        let tiles = Tiles::with_side(8);
        // g1 is index 62; two north and one west lands on f3 (index 45).
        let path = [Cardinal::North, Cardinal::North, Cardinal::West];
        assert_eq!(Some(SpaceId(45)), tiles.walk(SpaceId(62), &path));
        assert_eq!(None, tiles.walk(SpaceId(7), &[Cardinal::East]));
        assert_eq!(Some(SpaceId(9)), tiles.step(SpaceId(18), Direction::NorthWest));
        assert_eq!(None, tiles.step(SpaceId(0), Direction::NorthEast));
    }

    #[test]
    fn place_and_remove() {
        let mut space = Space::new(SpaceId(3));
        assert!(!space.is_occupied());
        assert_eq!(Ok(()), space.place(PieceId(1)));
        assert_eq!(Err(()), space.place(PieceId(2)));
        assert_eq!(Some(PieceId(1)), space.occupant());
        assert_eq!(Some(PieceId(1)), space.remove());
        assert!(!space.is_occupied());
        assert_eq!(None, space.remove());
    }

    #[test]
    fn reachable_flags() {
        let mut space = Space::new(SpaceId(0));
        space.mark_reachable(Team::Black);
        assert!(space.is_reachable_by(Team::Black));
        assert!(!space.is_reachable_by(Team::White));
        space.mark_reachable(Team::White);
        assert!(space.is_reachable_by(Team::White));
        space.reset_reachable();
        assert!(!space.is_reachable_by(Team::Black));
        assert!(!space.is_reachable_by(Team::White));
    }

    #[test]
    fn algebraic_names() {
        let tiles = Tiles::with_side(8);
        assert_eq!("a8", tiles.name(SpaceId(0)));
        assert_eq!("h1", tiles.name(SpaceId(63)));
        assert_eq!("e2", tiles.name(SpaceId(52)));
        assert_eq!(Some(SpaceId(52)), tiles.parse_name("e2"));
        assert_eq!(Some(SpaceId(0)), tiles.parse_name("A8"));
        assert_eq!(Some(SpaceId(17)), tiles.parse_name("17"));
        assert_eq!(None, tiles.parse_name("i1"));
        assert_eq!(None, tiles.parse_name("a9"));
        assert_eq!(None, tiles.parse_name("a0"));
        assert_eq!(None, tiles.parse_name("64"));
        assert_eq!(None, tiles.parse_name(""));
    }
}
