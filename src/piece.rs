// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::types::{PieceKind, SpaceId, Team};

/// A piece in a board's piece arena.
///
/// Pieces refer to the space they stand on by index, and the space refers back
/// to the piece the same way; the board keeps the two sides in agreement. A
/// piece without a space has been captured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    team: Team,
    owner: String,
    name: String,
    sprite: String,
    space: Option<SpaceId>,
    times_moved: u32,
    claimed: u32,
    potential: Vec<SpaceId>,
    home: Option<SpaceId>,
}

impl Piece {
    pub fn new<O, N>(kind: PieceKind, team: Team, owner: O, name: N) -> Piece
    where
        O: Into<String>,
        N: Into<String>,
    {
        Piece {
            kind,
            team,
            owner: owner.into(),
            name: name.into(),
            sprite: format!("{}_{}", kind.name(), team.name()),
            space: None,
            times_moved: 0,
            claimed: 0,
            potential: Vec::new(),
            home: None,
        }
    }

    pub fn with_sprite<S: Into<String>>(mut self, sprite: S) -> Piece {
        self.sprite = sprite.into();
        self
    }

    pub fn with_counters(mut self, times_moved: u32, claimed: u32) -> Piece {
        self.times_moved = times_moved;
        self.claimed = claimed;
        self
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn team(&self) -> Team {
        self.team
    }

    /// Name of the player owning this piece.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Object name; unique on a board.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sprite reference for the rendering collaborator. The engine never interprets it.
    pub fn sprite(&self) -> &str {
        &self.sprite
    }

    pub fn space(&self) -> Option<SpaceId> {
        self.space
    }

    pub fn is_on_board(&self) -> bool {
        self.space.is_some()
    }

    pub fn times_moved(&self) -> u32 {
        self.times_moved
    }

    /// Number of opposing pieces this piece has captured.
    pub fn claimed(&self) -> u32 {
        self.claimed
    }

    pub fn point_value(&self) -> u32 {
        self.kind.point_value()
    }

    /// The space a pawn may double-step from. Always `None` for other kinds.
    pub fn home(&self) -> Option<SpaceId> {
        self.home
    }

    /// Legal destinations as of the last threat recompute.
    pub fn potential_spaces(&self) -> &[SpaceId] {
        &self.potential
    }

    /// Whether `space` is highlighted for this piece.
    pub fn can_reach(&self, space: SpaceId) -> bool {
        self.potential.contains(&space)
    }

    pub(crate) fn set_potential(&mut self, spaces: Vec<SpaceId>) {
        self.potential = spaces;
    }

    pub(crate) fn set_home(&mut self, home: Option<SpaceId>) {
        if self.kind == PieceKind::Pawn {
            self.home = home;
        }
    }

    /// Puts the piece on a space. A pawn that has never been on the board and never moved
    /// remembers its first space as its home.
    pub(crate) fn set_space(&mut self, space: SpaceId) {
        let first_placement = self.space.is_none() && self.times_moved == 0;
        self.space = Some(space);
        if first_placement && self.kind == PieceKind::Pawn && self.home.is_none() {
            self.home = Some(space);
        }
    }

    /// Returns a captured piece to the space it was captured on.
    pub(crate) fn restore(&mut self, space: SpaceId) {
        assert!(self.space.is_none(), "restoring a piece that is still on the board");
        self.space = Some(space);
    }

    pub(crate) fn take_off_board(&mut self) -> Option<SpaceId> {
        self.potential.clear();
        self.space.take()
    }

    pub(crate) fn record_move(&mut self, to: SpaceId, captured: bool) {
        self.space = Some(to);
        self.times_moved += 1;
        if captured {
            self.claimed += 1;
        }
    }

    pub(crate) fn revert_move(&mut self, from: SpaceId, captured: bool) {
        assert!(self.times_moved > 0, "reverting a move of a piece that never moved");
        self.space = Some(from);
        self.times_moved -= 1;
        if captured {
            assert!(self.claimed > 0, "reverting a capture that was never counted");
            self.claimed -= 1;
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
