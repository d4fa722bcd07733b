// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The turn engine. Every intent coming from a player (select a piece, move
//! it, undo the last move) goes through an `Engine`, which validates it
//! against the board, applies it, and reports what happened as a list of
//! `Notification`s.
//!
//! Every operation either applies completely or leaves the board exactly as
//! it found it. Moves are first applied speculatively and rolled back if they
//! leave the mover's king threatened, and the checkmate search runs entirely
//! by making and unmaking trial moves on the engine's own board, which no one
//! else can observe while the engine holds it mutably.
use std::fmt;

use crate::board::Board;
use crate::error::{MoveError, TurnError};
use crate::moves::MoveRecord;
use crate::piece::Piece;
use crate::player::Player;
use crate::space::Tiles;
use crate::types::{PieceId, PieceKind, SpaceId, Team};

/// Something that happened as the result of an engine operation, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Selected { piece: String },
    Deselected { piece: String },
    Moved { piece: String },
    Captured {
        piece: String,
        captured: String,
        player: String,
        points: u32,
    },
    TurnChanged { player: String },
    Check { player: String },
    CheckCleared,
    GameWon { winner: String, team: Team },
    Undone,
    Restored {
        piece: String,
        player: String,
        points: u32,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notification::Selected { piece } => write!(f, "{} selected", piece),
            Notification::Deselected { piece } => write!(f, "{} deselected", piece),
            Notification::Moved { .. } => write!(f, "successfully moved"),
            Notification::Captured {
                piece,
                captured,
                player,
                points,
            } => write!(
                f,
                "{} was defeated by {} (+{} for {})",
                captured, piece, points, player
            ),
            Notification::TurnChanged { player } => write!(f, "{}'s turn", player),
            Notification::Check { .. } => write!(f, "Check!"),
            Notification::CheckCleared => write!(f, "no longer in check"),
            Notification::GameWon { winner, team } => {
                write!(f, "Game finished! {} ({}) won!", winner, team)
            }
            Notification::Undone => write!(f, "undo last move"),
            Notification::Restored {
                piece,
                player,
                points,
            } => write!(f, "{} returned to the board (-{} for {})", piece, points, player),
        }
    }
}

pub type Notifications = Vec<Notification>;

/// Drives a game on a board it owns.
pub struct Engine {
    board: Board,
    winner: Option<usize>,
}

impl Engine {
    /// Takes over a board, refreshing its threats and deciding whether the game it holds is
    /// already over.
    pub fn new(mut board: Board) -> Engine {
        board.deselect_piece();
        board.recompute_all_threats();
        let check = board.is_current_player_in_check();
        board.set_check(check);
        let mut engine = Engine {
            board,
            winner: None,
        };
        engine.winner = engine.decide_winner(None);
        info!(
            "new game on {} tiles, {} to move",
            engine.board.tiles().len(),
            engine.board.current_player()
        );
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn tiles(&self) -> &Tiles {
        self.board.tiles()
    }

    pub fn pieces(&self) -> &[Piece] {
        self.board.pieces()
    }

    pub fn players(&self) -> &[Player] {
        self.board.players()
    }

    pub fn current_player(&self) -> &Player {
        self.board.current_player()
    }

    pub fn is_in_check(&self) -> bool {
        self.board.is_in_check()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|idx| &self.board.players()[idx])
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Spaces highlighted for the selected piece.
    pub fn highlighted(&self) -> &[SpaceId] {
        match self.board.selected() {
            Some(id) => self.board.piece(id).potential_spaces(),
            None => &[],
        }
    }

    /// Selects a piece of the current player. Selecting the selected piece again deselects it.
    pub fn select_piece(&mut self, id: PieceId) -> Result<Notifications, TurnError> {
        if self.is_game_over() {
            return Err(TurnError::GameOver);
        }

        if self.board.selected() == Some(id) {
            self.board.deselect_piece();
            let piece = self.board.piece(id).name().to_owned();
            return Ok(vec![Notification::Deselected { piece }]);
        }

        self.board.select_piece(id).map_err(|err| {
            warn!("rejected selection of {}: {:?}", id, err);
            TurnError::IllegalSelection(err)
        })?;

        let piece = self.board.piece(id).name().to_owned();
        Ok(vec![Notification::Selected { piece }])
    }

    /// Moves the selected piece, using the forced-response rules when the current player is
    /// in check.
    pub fn attempt_move(&mut self, to: SpaceId) -> Result<Notifications, TurnError> {
        if self.board.is_in_check() {
            self.move_piece_under_check(to)
        } else {
            self.move_piece(to)
        }
    }

    /// Moves the selected piece when the current player is not in check.
    pub fn move_piece(&mut self, to: SpaceId) -> Result<Notifications, TurnError> {
        self.commit_move(to, false)
    }

    /// Moves the selected piece in response to check. The move is rejected if the king is
    /// still threatened afterwards.
    pub fn move_piece_under_check(&mut self, to: SpaceId) -> Result<Notifications, TurnError> {
        self.commit_move(to, true)
    }

    fn commit_move(&mut self, to: SpaceId, in_check: bool) -> Result<Notifications, TurnError> {
        if self.is_game_over() {
            return Err(TurnError::GameOver);
        }

        let id = match self.board.selected() {
            Some(id) => id,
            None => return Err(TurnError::IllegalMove(MoveError::NoPieceSelected)),
        };

        let record = try_move(&mut self.board, id, to).map_err(|err| {
            warn!("rejected move of {} to {}: {:?}", id, to, err);
            TurnError::IllegalMove(err)
        })?;

        let mover = self.board.piece(id);
        let mut notes = vec![];
        match record.captured() {
            Some(captured) => {
                let captured = self.board.piece(captured);
                notes.push(Notification::Captured {
                    piece: mover.name().to_owned(),
                    captured: captured.name().to_owned(),
                    player: mover.owner().to_owned(),
                    points: captured.point_value(),
                });
            }
            None => notes.push(Notification::Moved {
                piece: mover.name().to_owned(),
            }),
        }

        if in_check {
            notes.push(Notification::CheckCleared);
        }

        self.board.deselect_piece();
        self.board.advance_turn();
        let check = self.board.is_current_player_in_check();
        self.board.set_check(check);
        notes.push(Notification::TurnChanged {
            player: self.board.current_player().name().to_owned(),
        });

        if check {
            info!("{} is in check", self.board.current_player());
            notes.push(Notification::Check {
                player: self.board.current_player().name().to_owned(),
            });
        }

        self.winner = self.decide_winner(Some(record));
        if let Some(winner) = self.winner() {
            info!("game won by {}", winner);
            notes.push(Notification::GameWon {
                winner: winner.name().to_owned(),
                team: winner.team(),
            });
        }

        Ok(notes)
    }

    /// Reverts the last move. Undo is refused while a piece is selected and stays available
    /// after the game is won, which reopens it.
    pub fn undo(&mut self) -> Result<Notifications, TurnError> {
        if self.board.selected().is_some() {
            warn!("undo refused, a piece is selected");
            return Err(TurnError::PieceSelected);
        }

        let record = match self.board.unmake_move() {
            Some(record) => record,
            None => return Err(TurnError::EmptyUndoStack),
        };

        self.board.retreat_turn();
        self.board.recompute_all_threats();
        self.winner = None;

        let was_in_check = self.board.is_in_check();
        let check = self.board.is_current_player_in_check();
        self.board.set_check(check);
        info!("undid {}", record);

        let mut notes = vec![Notification::Undone];
        if let Some(captured) = record.captured() {
            let captured = self.board.piece(captured);
            notes.push(Notification::Restored {
                piece: captured.name().to_owned(),
                player: self.board.piece(record.piece()).owner().to_owned(),
                points: captured.point_value(),
            });
        }

        notes.push(Notification::TurnChanged {
            player: self.board.current_player().name().to_owned(),
        });

        if check {
            notes.push(Notification::Check {
                player: self.board.current_player().name().to_owned(),
            });
        } else if was_in_check {
            notes.push(Notification::CheckCleared);
        }

        Ok(notes)
    }

    /// Destinations of a piece that do not leave its own king threatened.
    pub fn legal_moves_of(&mut self, id: PieceId) -> Vec<SpaceId> {
        legal_moves(&mut self.board, id)
    }

    /// Whether the current player is checkmated. Runs the full search; the board is left
    /// exactly as it was.
    pub fn is_checkmate(&mut self) -> bool {
        let team = self.board.current_team();
        self.board.is_team_in_check(team) && !has_escape(&mut self.board, team)
    }

    fn decide_winner(&mut self, last: Option<MoveRecord>) -> Option<usize> {
        let loser = self.board.current_team();
        let king_taken = last
            .and_then(|record| record.captured())
            .map_or(false, |id| self.board.piece(id).kind() == PieceKind::King);
        let eliminated = self.board.pieces_of(loser).next().is_none();
        if king_taken || eliminated || self.is_checkmate() {
            let winner = self.board.other_player().name().to_owned();
            self.board.player_index(&winner)
        } else {
            None
        }
    }
}

/// Applies a move and keeps it only if the mover's king is not threatened afterwards. On
/// success the threats reflect the new position; on failure the board is unchanged.
fn try_move(board: &mut Board, id: PieceId, to: SpaceId) -> Result<MoveRecord, MoveError> {
    let team = board.piece(id).team();
    let record = board.make_move(id, to)?;
    board.recompute_all_threats();
    if board.is_team_in_check(team) {
        board.unmake_move();
        board.recompute_all_threats();
        return Err(MoveError::LeavesKingInCheck);
    }

    Ok(record)
}

/// Destinations of a piece that do not leave its own king threatened. The board is left
/// exactly as it was.
pub fn legal_moves(board: &mut Board, id: PieceId) -> Vec<SpaceId> {
    let team = board.piece(id).team();
    let candidates = board.piece(id).potential_spaces().to_vec();
    candidates
        .into_iter()
        .filter(|&to| trial(board, id, to, team))
        .collect()
}

/// Every legal move of a team, as (piece, destination) pairs.
pub fn all_legal_moves(board: &mut Board, team: Team) -> Vec<(PieceId, SpaceId)> {
    let pieces: Vec<_> = board.pieces_of(team).collect();
    let mut moves = vec![];
    for id in pieces {
        for to in legal_moves(board, id) {
            moves.push((id, to));
        }
    }

    moves
}

/// Whether any move of `team` leaves its king unthreatened. Tries the king first, then every
/// other piece, making and unmaking each candidate.
fn has_escape(board: &mut Board, team: Team) -> bool {
    let mut pieces: Vec<_> = board.pieces_of(team).collect();
    pieces.sort_by_key(|&id| board.piece(id).kind() != PieceKind::King);

    let mut trials = 0;
    for id in pieces {
        let candidates = board.piece(id).potential_spaces().to_vec();
        for to in candidates {
            trials += 1;
            if trial(board, id, to, team) {
                debug!("{} escapes check after {} trials", board.piece(id), trials);
                return true;
            }
        }
    }

    debug!("no escape from check after {} trials", trials);
    false
}

fn trial(board: &mut Board, id: PieceId, to: SpaceId, team: Team) -> bool {
    if board.make_move(id, to).is_err() {
        return false;
    }

    board.recompute_all_threats();
    let safe = !board.is_team_in_check(team);
    board.unmake_move();
    board.recompute_all_threats();
    safe
}

#[cfg(test)]
mod tests {
    use super::{legal_moves, Engine, Notification};
    use crate::error::{MoveError, SelectionError, TurnError};
    use crate::setup::{self, PLAYER_1, PLAYER_2};
    use crate::types::{PieceId, SpaceId, Team};

    fn space(engine: &Engine, name: &str) -> SpaceId {
        engine.tiles().parse_name(name).unwrap()
    }

    fn piece_on(engine: &Engine, name: &str) -> PieceId {
        engine.tiles().occupant(space(engine, name)).unwrap()
    }

    fn play(engine: &mut Engine, from: &str, to: &str) -> Vec<Notification> {
        let id = piece_on(engine, from);
        engine.select_piece(id).unwrap();
        let to = space(engine, to);
        engine.attempt_move(to).unwrap()
    }

    #[test]
    fn knight_opening() {
        let mut engine = Engine::new(setup::start_position());
        let notes = play(&mut engine, "g1", "f3");
        assert_eq!(
            vec![
                Notification::Moved {
                    piece: "knight_62".to_owned()
                },
                Notification::TurnChanged {
                    player: PLAYER_2.to_owned()
                },
            ],
            notes
        );
        assert_eq!(PLAYER_2, engine.current_player().name());
        assert_eq!(1, engine.board().move_stack().len());
        assert_eq!(None, engine.board().selected());
    }

    #[test]
    fn selecting_twice_deselects() {
        let mut engine = Engine::new(setup::start_position());
        let knight = piece_on(&engine, "g1");
        engine.select_piece(knight).unwrap();
        assert_eq!(2, engine.highlighted().len());
        let notes = engine.select_piece(knight).unwrap();
        assert_eq!(
            vec![Notification::Deselected {
                piece: "knight_62".to_owned()
            }],
            notes
        );
        assert!(engine.highlighted().is_empty());
    }

    #[test]
    fn opponent_piece_cannot_be_selected() {
        let mut engine = Engine::new(setup::start_position());
        let pawn = piece_on(&engine, "e7");
        assert_eq!(
            Err(TurnError::IllegalSelection(SelectionError::NotYourPiece)),
            engine.select_piece(pawn)
        );
    }

    #[test]
    fn move_without_selection() {
        let mut engine = Engine::new(setup::start_position());
        let e4 = space(&engine, "e4");
        assert_eq!(
            Err(TurnError::IllegalMove(MoveError::NoPieceSelected)),
            engine.attempt_move(e4)
        );
    }

    #[test]
    fn invalid_space_keeps_selection() {
        let mut engine = Engine::new(setup::start_position());
        let knight = piece_on(&engine, "g1");
        engine.select_piece(knight).unwrap();
        let g4 = space(&engine, "g4");
        assert_eq!(
            Err(TurnError::IllegalMove(MoveError::NotHighlighted)),
            engine.attempt_move(g4)
        );
        assert_eq!(Some(knight), engine.board().selected());
        assert_eq!(PLAYER_1, engine.current_player().name());
    }

    #[test]
    fn capture_awards_points() {
        let board = setup::from_diagram("4k3/8/8/8/8/8/p7/R3K3", Team::White).unwrap();
        let mut engine = Engine::new(board);
        let notes = play(&mut engine, "a1", "a2");
        assert_eq!(
            Notification::Captured {
                piece: "rook_56".to_owned(),
                captured: "pawn_48".to_owned(),
                player: PLAYER_1.to_owned(),
                points: 1,
            },
            notes[0]
        );
        assert_eq!(1, engine.board().player(PLAYER_1).unwrap().points());
    }

    #[test]
    fn pinned_piece_cannot_expose_king() {
        let board = setup::from_diagram("4r1k1/8/8/8/8/8/4B3/4K3", Team::White).unwrap();
        let mut engine = Engine::new(board);
        let before = engine.board().clone();
        let bishop = piece_on(&engine, "e2");
        engine.select_piece(bishop).unwrap();
        let d3 = space(&engine, "d3");
        assert_eq!(
            Err(TurnError::IllegalMove(MoveError::LeavesKingInCheck)),
            engine.attempt_move(d3)
        );

        engine.select_piece(bishop).unwrap();
        assert_eq!(&before, engine.board());
    }

    #[test]
    fn check_must_be_answered() {
        let board = setup::from_diagram("4k3/8/8/8/8/8/P7/K3r3", Team::White).unwrap();
        let mut engine = Engine::new(board);
        assert!(engine.is_in_check());
        assert!(!engine.is_game_over());

        let pawn = piece_on(&engine, "a2");
        engine.select_piece(pawn).unwrap();
        let a3 = space(&engine, "a3");
        assert_eq!(
            Err(TurnError::IllegalMove(MoveError::LeavesKingInCheck)),
            engine.attempt_move(a3)
        );
        engine.select_piece(pawn).unwrap();

        let notes = play(&mut engine, "a1", "b2");
        assert!(notes.contains(&Notification::CheckCleared));
        assert!(!engine.is_in_check());
        assert_eq!(PLAYER_2, engine.current_player().name());
    }

    #[test]
    fn back_rank_mate() {
        let board = setup::from_diagram("6k1/5ppp/8/8/8/8/8/R5K1", Team::White).unwrap();
        let mut engine = Engine::new(board);
        let notes = play(&mut engine, "a1", "a8");
        assert!(notes.contains(&Notification::Check {
            player: PLAYER_2.to_owned()
        }));
        assert_eq!(
            Some(&Notification::GameWon {
                winner: PLAYER_1.to_owned(),
                team: Team::White,
            }),
            notes.last()
        );
        assert!(engine.is_game_over());

        let pawn = piece_on(&engine, "h7");
        assert_eq!(Err(TurnError::GameOver), engine.select_piece(pawn));

        engine.undo().unwrap();
        assert!(!engine.is_game_over());
        assert!(!engine.is_in_check());
        assert_eq!(PLAYER_1, engine.current_player().name());
    }

    #[test]
    fn checkmate_search_leaves_board_untouched() {
        let board = setup::from_diagram("R7/8/4k3/8/8/8/6PP/r6K", Team::White).unwrap();
        let mut engine = Engine::new(board);
        assert!(engine.is_in_check());
        let before = engine.board().clone();
        assert!(!engine.is_checkmate());
        assert_eq!(&before, engine.board());
    }

    #[test]
    fn undo_restores_capture() {
        let board = setup::from_diagram("4k3/8/8/8/8/8/p7/R3K3", Team::White).unwrap();
        let mut engine = Engine::new(board);
        let before = engine.board().clone();
        play(&mut engine, "a1", "a2");

        let notes = engine.undo().unwrap();
        assert_eq!(Notification::Undone, notes[0]);
        assert_eq!(
            Notification::Restored {
                piece: "pawn_48".to_owned(),
                player: PLAYER_1.to_owned(),
                points: 1,
            },
            notes[1]
        );
        assert_eq!(&before, engine.board());
    }

    #[test]
    fn undo_requires_no_selection() {
        let mut engine = Engine::new(setup::start_position());
        play(&mut engine, "e2", "e4");
        let pawn = piece_on(&engine, "e7");
        engine.select_piece(pawn).unwrap();
        assert_eq!(Err(TurnError::PieceSelected), engine.undo());
        assert_eq!(1, engine.board().move_stack().len());
    }

    #[test]
    fn undo_empty_stack() {
        let mut engine = Engine::new(setup::start_position());
        assert_eq!(Err(TurnError::EmptyUndoStack), engine.undo());
        assert!(engine.board().move_stack().is_empty());
    }

    #[test]
    fn knights_game_ends_by_elimination() {
        let board = setup::from_diagram("4/1n2/4/N3", Team::White).unwrap();
        let mut engine = Engine::new(board);
        let notes = play(&mut engine, "a1", "b3");
        assert_eq!(
            Some(&Notification::GameWon {
                winner: PLAYER_1.to_owned(),
                team: Team::White,
            }),
            notes.last()
        );
    }

    #[test]
    fn legal_moves_filters_self_check() {
        let board = setup::from_diagram("4r1k1/8/8/8/8/8/4B3/4K3", Team::White).unwrap();
        let mut engine = Engine::new(board);
        let bishop = piece_on(&engine, "e2");
        let mut board = engine.into_board();
        assert!(legal_moves(&mut board, bishop).is_empty());
        assert!(!board.piece(bishop).potential_spaces().is_empty());
    }
}
