// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use hashbrown::HashMap;

use crate::error::{MoveError, SelectionError};
use crate::movegen;
use crate::moves::MoveRecord;
use crate::piece::Piece;
use crate::player::Player;
use crate::space::Tiles;
use crate::types::{PieceId, PieceKind, SpaceId, Team};

/// The full state of a game: the space graph, every piece that took part in
/// it, the players, whose turn it is and the history of moves.
///
/// The board keeps spaces and pieces in agreement at all times: a space holds
/// a piece exactly when that piece stands on the space. Threat flags and each
/// piece's potential spaces are derived state, refreshed by
/// `recompute_all_threats`.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    tiles: Tiles,
    pieces: Vec<Piece>,
    pieces_by_name: HashMap<String, PieceId>,
    players: Vec<Player>,
    players_by_name: HashMap<String, usize>,
    current: usize,
    check: bool,
    selected: Option<PieceId>,
    moves: Vec<MoveRecord>,
}

//
// Board state getters
//

impl Board {
    pub fn new(tiles: Tiles) -> Board {
        Board {
            tiles,
            pieces: Vec::new(),
            pieces_by_name: HashMap::new(),
            players: Vec::new(),
            players_by_name: HashMap::new(),
            current: 0,
            check: false,
            selected: None,
            moves: Vec::new(),
        }
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    /// Every piece of the game, including captured ones.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    pub fn piece_at(&self, space: SpaceId) -> Option<&Piece> {
        self.tiles
            .get(space)
            .and_then(|s| s.occupant())
            .map(|id| self.piece(id))
    }

    pub fn find_piece(&self, name: &str) -> Option<PieceId> {
        self.pieces_by_name.get(name).cloned()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players_by_name.get(name).map(|&idx| &self.players[idx])
    }

    pub fn player_index(&self, name: &str) -> Option<usize> {
        self.players_by_name.get(name).cloned()
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_team(&self) -> Team {
        self.current_player().team()
    }

    /// The first player, in turn order, that is not the current one.
    pub fn other_player(&self) -> &Player {
        let next = (self.current + 1) % self.players.len();
        &self.players[next]
    }

    /// Whether the current player was found to be in check the last time it was evaluated.
    pub fn is_in_check(&self) -> bool {
        self.check
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    pub fn move_stack(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Ids of the on-board pieces of a team, in arena order.
    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.team() == team && p.is_on_board())
            .map(|(idx, _)| PieceId(idx))
    }

    pub fn king_of(&self, team: Team) -> Option<PieceId> {
        self.pieces_of(team)
            .find(|&id| self.piece(id).kind() == PieceKind::King)
    }
}

//
// Setup
//

impl Board {
    /// Adds a player. Fails if a player of the same name exists.
    pub fn add_player(&mut self, player: Player) -> Result<(), ()> {
        if self.players_by_name.contains_key(player.name()) {
            return Err(());
        }

        self.players_by_name
            .insert(player.name().to_owned(), self.players.len());
        self.players.push(player);
        Ok(())
    }

    /// Adds a piece to the arena, placing it on `space` if one is given. Fails if the space
    /// is taken or off the board, the name is taken, or the owner is not a player.
    pub fn add_piece(&mut self, mut piece: Piece, space: Option<SpaceId>) -> Result<PieceId, ()> {
        if self.pieces_by_name.contains_key(piece.name())
            || !self.players_by_name.contains_key(piece.owner())
        {
            return Err(());
        }

        let id = PieceId(self.pieces.len());
        if let Some(space) = space {
            if !self.tiles.contains(space) {
                return Err(());
            }

            self.tiles[space].place(id)?;
            piece.set_space(space);
        }

        self.pieces_by_name.insert(piece.name().to_owned(), id);
        self.pieces.push(piece);
        Ok(id)
    }

    pub(crate) fn set_home(&mut self, id: PieceId, home: Option<SpaceId>) {
        self.pieces[id.index()].set_home(home);
    }

    pub fn set_current_player(&mut self, name: &str) -> bool {
        if let Some(&idx) = self.players_by_name.get(name) {
            self.current = idx;
            true
        } else {
            false
        }
    }

    /// Pushes a record without applying it. Used when rebuilding a saved game whose pieces
    /// already stand where the history leaves them.
    pub(crate) fn push_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    /// Removes a piece from play without recording a move. Returns the space it stood on.
    pub fn take_off_board(&mut self, id: PieceId) -> Option<SpaceId> {
        if self.selected == Some(id) {
            self.selected = None;
        }

        let space = self.pieces[id.index()].take_off_board()?;
        self.tiles[space].remove();
        Some(space)
    }
}

//
// Selection and turn order
//

impl Board {
    pub fn select_piece(&mut self, id: PieceId) -> Result<(), SelectionError> {
        if id.index() >= self.pieces.len() {
            return Err(SelectionError::UnknownPiece);
        }

        if self.selected.is_some() {
            return Err(SelectionError::AnotherPieceSelected);
        }

        let piece = self.piece(id);
        if piece.owner() != self.current_player().name() {
            return Err(SelectionError::NotYourPiece);
        }

        if !piece.is_on_board() {
            return Err(SelectionError::OffBoard);
        }

        self.selected = Some(id);
        Ok(())
    }

    pub fn deselect_piece(&mut self) -> Option<PieceId> {
        self.selected.take()
    }

    pub fn advance_turn(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    pub fn retreat_turn(&mut self) {
        let count = self.players.len();
        self.current = (self.current + count - 1) % count;
    }

    pub(crate) fn set_check(&mut self, check: bool) {
        self.check = check;
    }
}

//
// Threats and check
//

impl Board {
    /// Legal destinations for a piece given the current occupancy and threat flags. Does not
    /// touch the board.
    pub fn compute_reachable_spaces(&self, id: PieceId) -> Vec<SpaceId> {
        movegen::generate(&self.tiles, &self.pieces, id).moves
    }

    /// Clears every threat flag, then regenerates moves and threats for every non-king piece
    /// followed by the kings. Kings run twice: a king's moves depend on the squares the
    /// opposing king threatens, which are only all marked after the first pass.
    pub fn recompute_all_threats(&mut self) {
        self.tiles.reset_reachable();
        let (kings, others): (Vec<_>, Vec<_>) = (0..self.pieces.len())
            .map(PieceId)
            .partition(|&id| self.piece(id).kind() == PieceKind::King);

        for &id in &others {
            self.recompute_piece(id);
        }

        for _ in 0..2 {
            for &id in &kings {
                self.recompute_piece(id);
            }
        }

        debug!(
            "recomputed threats for {} pieces and {} kings",
            others.len(),
            kings.len()
        );
    }

    fn recompute_piece(&mut self, id: PieceId) {
        let generated = movegen::generate(&self.tiles, &self.pieces, id);
        let team = self.piece(id).team();
        for &space in &generated.threats {
            self.tiles[space].mark_reachable(team);
        }

        self.pieces[id.index()].set_potential(generated.moves);
    }

    /// Whether `team`'s king stands on a space threatened by the other team. A team
    /// without a king on the board is never in check.
    pub fn is_team_in_check(&self, team: Team) -> bool {
        self.king_of(team)
            .and_then(|king| self.piece(king).space())
            .map(|space| self.tiles[space].is_reachable_by(team.toggle()))
            .unwrap_or(false)
    }

    pub fn is_current_player_in_check(&self) -> bool {
        self.is_team_in_check(self.current_team())
    }
}

//
// Move application
//

impl Board {
    /// Moves a piece to one of its potential spaces, capturing whatever opposing piece stands
    /// there, awarding the capture's points to the piece's owner and recording the move.
    /// Neither the turn nor the threat flags change. Fails without side effects.
    pub fn make_move(&mut self, id: PieceId, to: SpaceId) -> Result<MoveRecord, MoveError> {
        let from = match self.piece(id).space() {
            Some(space) => space,
            None => return Err(MoveError::NotHighlighted),
        };

        if !self.tiles.contains(to) {
            return Err(MoveError::UnknownSpace);
        }

        let team = self.piece(id).team();
        if let Some(other) = self.tiles.occupant(to) {
            if self.piece(other).team() == team {
                return Err(MoveError::OwnPiece);
            }
        }

        if !self.piece(id).can_reach(to) {
            return Err(MoveError::NotHighlighted);
        }

        let captured = self.tiles[to].remove();
        if let Some(captured) = captured {
            self.pieces[captured.index()].take_off_board();
        }

        self.tiles[from].remove();
        self.tiles[to]
            .place(id)
            .expect("destination was cleared but is still occupied");
        self.pieces[id.index()].record_move(to, captured.is_some());

        if let Some(captured) = captured {
            let points = self.piece(captured).point_value();
            let owner = self.owner_index(id);
            self.players[owner].award(points);
        }

        let record = MoveRecord::new(id, captured, from, to);
        debug!("make move {}", record);
        self.moves.push(record);
        Ok(record)
    }

    /// Exactly reverses the last recorded move: the mover returns to its origin, a captured
    /// piece returns to the destination, and points and counters are restored. Neither the
    /// turn nor the threat flags change.
    pub fn unmake_move(&mut self) -> Option<MoveRecord> {
        let record = self.moves.pop()?;
        let id = record.piece();
        self.tiles[record.destination()].remove();
        self.tiles[record.origin()]
            .place(id)
            .expect("origin of an unmade move is occupied");
        self.pieces[id.index()].revert_move(record.origin(), record.is_capture());

        if let Some(captured) = record.captured() {
            self.tiles[record.destination()]
                .place(captured)
                .expect("destination of an unmade capture is occupied");
            self.pieces[captured.index()].restore(record.destination());
            let points = self.piece(captured).point_value();
            let owner = self.owner_index(id);
            self.players[owner].revoke(points);
        }

        debug!("unmake move {}", record);
        Some(record)
    }

    fn owner_index(&self, id: PieceId) -> usize {
        let owner = self.piece(id).owner();
        *self
            .players_by_name
            .get(owner)
            .expect("piece owned by an unknown player")
    }

    /// Checks that every space and piece agree on occupancy, that the move stack only names
    /// known pieces and spaces and can be unmade in full, and that the turn pointer is valid.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.current >= self.players.len() {
            return Err(format!("current player {} out of range", self.current));
        }

        for space in self.tiles.iter() {
            if let Some(id) = space.occupant() {
                let piece = self
                    .pieces
                    .get(id.index())
                    .ok_or_else(|| format!("space {} holds unknown piece {}", space.id(), id))?;
                if piece.space() != Some(space.id()) {
                    return Err(format!(
                        "space {} holds {} but the piece is on {:?}",
                        space.id(),
                        piece,
                        piece.space()
                    ));
                }
            }
        }

        for (idx, piece) in self.pieces.iter().enumerate() {
            if let Some(space) = piece.space() {
                if !self.tiles.contains(space) || self.tiles.occupant(space) != Some(PieceId(idx)) {
                    return Err(format!("{} claims space {} it does not hold", piece, space));
                }
            }
        }

        for record in &self.moves {
            if record.piece().index() >= self.pieces.len()
                || record.captured().map_or(false, |c| c.index() >= self.pieces.len())
                || !self.tiles.contains(record.origin())
                || !self.tiles.contains(record.destination())
            {
                return Err(format!("move {} refers outside the board", record));
            }
        }

        self.check_history()
    }

    /// Replays the move stack backwards on plain copies of occupancy, counters and scores,
    /// failing on the first record that `unmake_move` could not take back.
    fn check_history(&self) -> Result<(), String> {
        let mut occupants: Vec<_> = self.tiles.iter().map(|space| space.occupant()).collect();
        let mut spaces: Vec<_> = self.pieces.iter().map(Piece::space).collect();
        let mut moved: Vec<_> = self.pieces.iter().map(Piece::times_moved).collect();
        let mut claimed: Vec<_> = self.pieces.iter().map(Piece::claimed).collect();
        let mut points: Vec<_> = self.players.iter().map(Player::points).collect();
        for record in self.moves.iter().rev() {
            let id = record.piece();
            let (origin, destination) = (record.origin(), record.destination());
            if spaces[id.index()] != Some(destination) {
                return Err(format!(
                    "move {} expects {} on {} but it is on {:?}",
                    record,
                    self.piece(id),
                    destination,
                    spaces[id.index()]
                ));
            }

            occupants[destination.index()] = None;
            if occupants[origin.index()].is_some() {
                return Err(format!("move {} starts from an occupied space", record));
            }

            moved[id.index()] = moved[id.index()]
                .checked_sub(1)
                .ok_or_else(|| format!("move {} exceeds the moves of {}", record, self.piece(id)))?;
            occupants[origin.index()] = Some(id);
            spaces[id.index()] = Some(origin);

            if let Some(captured) = record.captured() {
                if captured == id || spaces[captured.index()].is_some() {
                    return Err(format!(
                        "move {} captures {} which is still on the board",
                        record,
                        self.piece(captured)
                    ));
                }

                if occupants[destination.index()].is_some() {
                    return Err(format!("move {} captures on the space it starts from", record));
                }

                claimed[id.index()] = claimed[id.index()].checked_sub(1).ok_or_else(|| {
                    format!("move {} exceeds the captures of {}", record, self.piece(id))
                })?;
                let owner = self
                    .players_by_name
                    .get(self.piece(id).owner())
                    .cloned()
                    .ok_or_else(|| format!("{} has an unknown owner", self.piece(id)))?;
                points[owner] = points[owner]
                    .checked_sub(self.piece(captured).point_value())
                    .ok_or_else(|| format!("move {} exceeds the points of its player", record))?;
                occupants[destination.index()] = Some(captured);
                spaces[captured.index()] = Some(destination);
            }
        }

        Ok(())
    }

    /// The placement diagram of the board: rows from north to south separated by `/`, runs
    /// of empty spaces as numbers.
    pub fn diagram(&self) -> String {
        let side = self.tiles.side();
        let mut buf = String::new();
        for row in 0..side {
            let mut empty = 0;
            for col in 0..side {
                let space = SpaceId(row * side + col);
                if let Some(piece) = self.piece_at(space) {
                    if empty != 0 {
                        buf.push_str(&empty.to_string());
                        empty = 0;
                    }

                    buf.push(piece.kind().letter(piece.team()));
                } else {
                    empty += 1;
                }
            }

            if empty != 0 {
                buf.push_str(&empty.to_string());
            }

            if row != side - 1 {
                buf.push('/');
            }
        }

        buf
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let side = self.tiles.side();
        for row in 0..side {
            for col in 0..side {
                let space = SpaceId(row * side + col);
                if let Some(piece) = self.piece_at(space) {
                    write!(f, " {} ", piece.kind().letter(piece.team()))?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", side - row)?;
        }

        for _ in 0..side {
            write!(f, "---")?;
        }

        writeln!(f)?;
        if side <= 26 {
            for col in 0..side {
                write!(f, " {} ", (b'a' + col as u8) as char)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::error::{MoveError, SelectionError};
    use crate::moves::MoveRecord;
    use crate::piece::Piece;
    use crate::player::Player;
    use crate::setup::{self, PLAYER_1, PLAYER_2};
    use crate::space::Tiles;
    use crate::types::{PieceId, PieceKind, SpaceId, Team};

    fn space(board: &Board, name: &str) -> SpaceId {
        board.tiles().parse_name(name).unwrap()
    }

    fn piece_on(board: &Board, name: &str) -> PieceId {
        board.tiles().occupant(space(board, name)).unwrap()
    }

    #[test]
    fn add_piece_rejects_occupied_space() {
        let mut board = Board::new(Tiles::with_side(4));
        board.add_player(Player::new(PLAYER_1, Team::White)).unwrap();
        let first = Piece::new(PieceKind::Rook, Team::White, PLAYER_1, "rook_0");
        let second = Piece::new(PieceKind::Rook, Team::White, PLAYER_1, "rook_1");
        assert_eq!(Ok(PieceId(0)), board.add_piece(first, Some(SpaceId(0))));
        assert_eq!(Err(()), board.add_piece(second, Some(SpaceId(0))));
        assert_eq!(1, board.pieces().len());
    }

    #[test]
    fn add_piece_rejects_duplicate_names_and_unknown_owners() {
        let mut board = Board::new(Tiles::with_side(4));
        board.add_player(Player::new(PLAYER_1, Team::White)).unwrap();
        let rook = Piece::new(PieceKind::Rook, Team::White, PLAYER_1, "rook_0");
        board.add_piece(rook.clone(), Some(SpaceId(0))).unwrap();
        assert_eq!(Err(()), board.add_piece(rook, Some(SpaceId(1))));

        let stranger = Piece::new(PieceKind::Rook, Team::Black, "nobody", "rook_2");
        assert_eq!(Err(()), board.add_piece(stranger, Some(SpaceId(2))));
    }

    #[test]
    fn duplicate_players_are_rejected() {
        let mut board = Board::new(Tiles::with_side(4));
        board.add_player(Player::new(PLAYER_1, Team::White)).unwrap();
        assert_eq!(Err(()), board.add_player(Player::new(PLAYER_1, Team::Black)));
    }

    #[test]
    fn selection_rules() {
        let mut board = setup::start_position();
        let black_pawn = piece_on(&board, "e7");
        let white_knight = piece_on(&board, "g1");
        let white_pawn = piece_on(&board, "e2");

        assert_eq!(
            Err(SelectionError::NotYourPiece),
            board.select_piece(black_pawn)
        );
        assert_eq!(
            Err(SelectionError::UnknownPiece),
            board.select_piece(PieceId(1000))
        );
        assert_eq!(Ok(()), board.select_piece(white_knight));
        assert_eq!(
            Err(SelectionError::AnotherPieceSelected),
            board.select_piece(white_pawn)
        );
        assert_eq!(Some(white_knight), board.deselect_piece());

        board.take_off_board(white_pawn);
        assert_eq!(Err(SelectionError::OffBoard), board.select_piece(white_pawn));
    }

    #[test]
    fn turn_order_wraps() {
        let mut board = setup::start_position();
        assert_eq!(PLAYER_1, board.current_player().name());
        board.advance_turn();
        assert_eq!(PLAYER_2, board.current_player().name());
        assert_eq!(Team::Black, board.current_team());
        board.advance_turn();
        assert_eq!(PLAYER_1, board.current_player().name());
        board.retreat_turn();
        assert_eq!(PLAYER_2, board.current_player().name());
    }

    #[test]
    fn make_and_unmake_quiet_move() {
        let mut board = setup::start_position();
        let before = board.clone();
        let knight = piece_on(&board, "g1");
        let f3 = space(&board, "f3");

        let record = board.make_move(knight, f3).unwrap();
        assert_eq!(None, record.captured());
        assert_eq!(Some(f3), board.piece(knight).space());
        assert_eq!(1, board.piece(knight).times_moved());
        assert_eq!(1, board.move_stack().len());
        assert!(board.check_invariants().is_ok());

        assert_eq!(Some(record), board.unmake_move());
        board.recompute_all_threats();
        assert_eq!(before, board);
    }

    #[test]
    fn make_and_unmake_capture() {
        let mut board = setup::from_diagram("4k3/8/8/8/8/8/p7/R3K3", Team::White).unwrap();
        let before = board.clone();
        let rook = piece_on(&board, "a1");
        let pawn = piece_on(&board, "a2");
        let a2 = space(&board, "a2");

        let record = board.make_move(rook, a2).unwrap();
        assert_eq!(Some(pawn), record.captured());
        assert!(!board.piece(pawn).is_on_board());
        assert_eq!(1, board.player(PLAYER_1).unwrap().points());
        assert_eq!(1, board.piece(rook).claimed());
        assert!(board.check_invariants().is_ok());

        board.unmake_move();
        board.recompute_all_threats();
        assert_eq!(before, board);
        assert_eq!(Some(a2), board.piece(pawn).space());
        assert_eq!(0, board.player(PLAYER_1).unwrap().points());
    }

    #[test]
    fn rejected_moves_have_no_side_effects() {
        let mut board = setup::start_position();
        let before = board.clone();
        let rook = piece_on(&board, "a1");
        let knight = piece_on(&board, "g1");

        assert_eq!(
            Err(MoveError::OwnPiece),
            board.make_move(rook, space(&board, "a2"))
        );
        assert_eq!(
            Err(MoveError::NotHighlighted),
            board.make_move(knight, space(&board, "g4"))
        );
        assert_eq!(
            Err(MoveError::UnknownSpace),
            board.make_move(knight, SpaceId(64))
        );
        assert_eq!(before, board);
    }

    #[test]
    fn unmake_on_empty_stack() {
        let mut board = setup::start_position();
        assert_eq!(None, board.unmake_move());
        assert!(board.move_stack().is_empty());
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut board = setup::from_diagram("r3k3/8/2n5/8/3Q4/8/5p2/4K2R", Team::White).unwrap();
        board.recompute_all_threats();
        let once = board.clone();
        board.recompute_all_threats();
        assert_eq!(once, board);
    }

    #[test]
    fn check_detection() {
        let board = setup::from_diagram("4k3/8/8/8/8/8/8/4R1K1", Team::Black).unwrap();
        assert!(board.is_team_in_check(Team::Black));
        assert!(!board.is_team_in_check(Team::White));
        assert!(board.is_current_player_in_check());
    }

    #[test]
    fn king_cannot_retreat_along_checking_line() {
        let board = setup::from_diagram("8/8/8/8/4k3/8/8/4R1K1", Team::Black).unwrap();
        let king = piece_on(&board, "e4");
        let potential = board.piece(king).potential_spaces();
        assert!(!potential.contains(&space(&board, "e5")));
        assert!(!potential.contains(&space(&board, "e3")));
        assert!(potential.contains(&space(&board, "d5")));
    }

    #[test]
    fn king_cannot_capture_defended_piece() {
        let board = setup::from_diagram("8/8/8/8/8/8/3qk3/3K4", Team::White).unwrap();
        let king = piece_on(&board, "d1");
        let queen = space(&board, "d2");
        assert!(!board.piece(king).can_reach(queen));
    }

    #[test]
    fn kings_keep_their_distance() {
        let board = setup::from_diagram("8/8/8/3k4/8/3K4/8/8", Team::White).unwrap();
        let king = piece_on(&board, "d3");
        for name in &["c4", "d4", "e4"] {
            assert!(!board.piece(king).can_reach(space(&board, name)));
        }
    }

    #[test]
    fn invariants_hold_for_new_boards() {
        let board = setup::start_position();
        assert!(board.check_invariants().is_ok());
        assert_eq!(32, board.pieces().len());
        assert!(board.king_of(Team::White).is_some());
        assert!(board.king_of(Team::Black).is_some());
    }

    #[test]
    fn history_must_match_occupancy() {
        let mut board = setup::start_position();
        let knight = piece_on(&board, "g1");
        board.make_move(knight, space(&board, "f3")).unwrap();
        assert!(board.check_invariants().is_ok());

        // the knight is on f3, not h3.
        let mut forged = board.clone();
        forged.unmake_move();
        forged.push_move(MoveRecord::new(knight, None, space(&board, "g1"), space(&board, "h3")));
        assert!(forged.check_invariants().is_err());

        // e2 is still occupied, so the knight could not have come from there.
        let mut forged = board.clone();
        forged.unmake_move();
        forged.push_move(MoveRecord::new(knight, None, space(&board, "e2"), space(&board, "g1")));
        assert!(forged.check_invariants().is_err());
    }

    #[test]
    fn diagram_round_trip() {
        let diagram = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
        let board = setup::from_diagram(diagram, Team::White).unwrap();
        assert_eq!(diagram, board.diagram());
    }

    #[test]
    fn display_grid() {
        let board = setup::from_diagram("k3/4/4/3K", Team::White).unwrap();
        let expected = concat!(
            " k  .  .  . | 4\n",
            " .  .  .  . | 3\n",
            " .  .  .  . | 2\n",
            " .  .  .  K | 1\n",
            "------------\n",
            " a  b  c  d \n"
        );
        assert_eq!(expected, board.to_string());
    }
}
