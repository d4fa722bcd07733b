// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-piece move generation over the space graph.
//!
//! Generation produces two lists for a piece. `moves` holds the spaces the
//! piece may legally move to and becomes its potential spaces. `threats` holds
//! every space the piece attacks, whether or not it could move there: a space
//! guarded by an allied piece is still attacked, and a slider keeps attacking
//! through the opposing king. The board marks threats on the spaces and uses
//! them for check detection and for keeping kings out of attacked spaces.
use crate::piece::Piece;
use crate::space::Tiles;
use crate::types::{Cardinal, Direction, PieceId, PieceKind, SpaceId, Team};
use crate::types::{DIAGONALS, DIRECTIONS, ORTHOGONALS};

/// The output of move generation for a single piece.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generated {
    pub moves: Vec<SpaceId>,
    pub threats: Vec<SpaceId>,
}

static KNIGHT_PATHS: [[Cardinal; 3]; 8] = [
    [Cardinal::North, Cardinal::North, Cardinal::East],
    [Cardinal::North, Cardinal::North, Cardinal::West],
    [Cardinal::South, Cardinal::South, Cardinal::East],
    [Cardinal::South, Cardinal::South, Cardinal::West],
    [Cardinal::West, Cardinal::West, Cardinal::North],
    [Cardinal::West, Cardinal::West, Cardinal::South],
    [Cardinal::East, Cardinal::East, Cardinal::North],
    [Cardinal::East, Cardinal::East, Cardinal::South],
];

/// Generates moves and threats for the piece `id`. The result depends only on the occupancy
/// of `tiles` and, for kings, on the threat flags already marked on it.
pub fn generate(tiles: &Tiles, pieces: &[Piece], id: PieceId) -> Generated {
    let piece = &pieces[id.index()];
    let from = match piece.space() {
        Some(space) => space,
        None => return Generated::default(),
    };

    let walker = Walker {
        tiles,
        pieces,
        team: piece.team(),
    };

    let mut gen = Generated::default();
    match piece.kind() {
        PieceKind::Pawn => walker.pawn(from, piece.home(), &mut gen),
        PieceKind::Knight => walker.knight(from, &mut gen),
        PieceKind::Bishop => walker.slide(from, &DIAGONALS, &mut gen),
        PieceKind::Rook => walker.slide(from, &ORTHOGONALS, &mut gen),
        PieceKind::Queen => {
            walker.slide(from, &ORTHOGONALS, &mut gen);
            walker.slide(from, &DIAGONALS, &mut gen);
        }
        PieceKind::King => walker.king(from, &mut gen),
    }

    gen
}

struct Walker<'a> {
    tiles: &'a Tiles,
    pieces: &'a [Piece],
    team: Team,
}

enum Occupancy {
    Empty,
    Ally,
    Enemy(PieceKind),
}

impl<'a> Walker<'a> {
    fn occupancy(&self, space: SpaceId) -> Occupancy {
        match self.tiles.occupant(space) {
            None => Occupancy::Empty,
            Some(id) => {
                let other = &self.pieces[id.index()];
                if other.team() == self.team {
                    Occupancy::Ally
                } else {
                    Occupancy::Enemy(other.kind())
                }
            }
        }
    }

    fn slide(&self, from: SpaceId, dirs: &[Direction], gen: &mut Generated) {
        for &dir in dirs {
            let mut cursor = from;
            while let Some(next) = self.tiles.step(cursor, dir) {
                cursor = next;
                gen.threats.push(next);
                match self.occupancy(next) {
                    Occupancy::Empty => gen.moves.push(next),
                    Occupancy::Ally => break,
                    Occupancy::Enemy(kind) => {
                        gen.moves.push(next);
                        if kind == PieceKind::King {
                            self.x_ray(next, dir, gen);
                        }
                        break;
                    }
                }
            }
        }
    }

    // Keeps marking threats past a checked king so it can't retreat along the checking line.
    fn x_ray(&self, from: SpaceId, dir: Direction, gen: &mut Generated) {
        let mut cursor = from;
        while let Some(next) = self.tiles.step(cursor, dir) {
            cursor = next;
            gen.threats.push(next);
            if self.tiles[next].is_occupied() {
                break;
            }
        }
    }

    fn knight(&self, from: SpaceId, gen: &mut Generated) {
        for path in &KNIGHT_PATHS {
            if let Some(landing) = self.tiles.walk(from, path) {
                gen.threats.push(landing);
                match self.occupancy(landing) {
                    Occupancy::Empty | Occupancy::Enemy(_) => gen.moves.push(landing),
                    Occupancy::Ally => {}
                }
            }
        }
    }

    fn king(&self, from: SpaceId, gen: &mut Generated) {
        let enemy = self.team.toggle();
        for &dir in &DIRECTIONS {
            if let Some(next) = self.tiles.step(from, dir) {
                gen.threats.push(next);
                if self.tiles[next].is_reachable_by(enemy) {
                    continue;
                }

                match self.occupancy(next) {
                    Occupancy::Empty | Occupancy::Enemy(_) => gen.moves.push(next),
                    Occupancy::Ally => {}
                }
            }
        }
    }

    fn pawn(&self, from: SpaceId, home: Option<SpaceId>, gen: &mut Generated) {
        let forward = self.team.forward();
        if let Some(one) = self.tiles.neighbor(from, forward) {
            if !self.tiles[one].is_occupied() {
                gen.moves.push(one);
                if home == Some(from) {
                    if let Some(two) = self.tiles.neighbor(one, forward) {
                        if !self.tiles[two].is_occupied() {
                            gen.moves.push(two);
                        }
                    }
                }
            }
        }

        for &side in &[Cardinal::East, Cardinal::West] {
            if let Some(diagonal) = self.tiles.walk(from, &[forward, side]) {
                gen.threats.push(diagonal);
                if let Occupancy::Enemy(_) = self.occupancy(diagonal) {
                    gen.moves.push(diagonal);
                }
            }
        }
    }
}
